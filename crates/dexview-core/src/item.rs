//! Catalogue item identifiers and detail records.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique name of a catalogue entry.
///
/// Identifiers are stable for the lifetime of a session and their order of
/// first appearance defines the default navigation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(CompactString);

impl ItemId {
    /// Create a new identifier.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-friendly form with the first letter capitalized.
    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One of the six base statistics, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    /// All stats in the fixed order used by charts.
    pub const ALL: [StatKind; 6] = [
        StatKind::Hp,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpecialAttack,
        StatKind::SpecialDefense,
        StatKind::Speed,
    ];

    /// Name used by the remote API and as the chart label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special-attack",
            Self::SpecialDefense => "special-defense",
            Self::Speed => "speed",
        }
    }

    /// Parse an API stat name.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// Labels of the six stats in chart order.
pub const STAT_LABELS: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

/// Fixed six-component base statistics vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl StatBlock {
    /// Get a single stat value.
    pub fn get(&self, kind: StatKind) -> u16 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.special_attack,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::Speed => self.speed,
        }
    }

    /// Set a single stat value.
    pub fn set(&mut self, kind: StatKind, value: u16) {
        let slot = match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::SpecialAttack => &mut self.special_attack,
            StatKind::SpecialDefense => &mut self.special_defense,
            StatKind::Speed => &mut self.speed,
        };
        *slot = value;
    }

    /// Values in chart order.
    pub fn series(&self) -> [u16; 6] {
        StatKind::ALL.map(|kind| self.get(kind))
    }

    /// Sum of all six stats.
    pub fn total(&self) -> u32 {
        self.series().iter().map(|&v| u32::from(v)).sum()
    }
}

/// Immutable detail record for a catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    /// Identifier this record belongs to.
    pub id: ItemId,
    /// National catalogue number.
    pub number: u32,
    /// Artwork URL, if the source has one.
    pub image: Option<String>,
    /// Category tags in slot order; the first is the primary type.
    pub types: Vec<String>,
    /// Base statistics.
    pub stats: StatBlock,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Experience gained for defeating this creature.
    pub base_experience: Option<u32>,
    /// Formatted ability names.
    pub abilities: Vec<String>,
}

impl ItemDetail {
    /// Display name with the first letter capitalized.
    pub fn display_name(&self) -> String {
        self.id.display_name()
    }

    /// Primary category tag.
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// Height in metres.
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Catalogue number padded to three digits (`#007`).
    pub fn number_label(&self) -> String {
        format!("#{:03}", self.number)
    }
}

/// Format an API ability name for display.
///
/// The first letter is capitalized and every hyphen is dropped with the
/// following letter upper-cased, so `solar-power` becomes `SolarPower`.
pub fn format_ability(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper_next = true;
    for c in raw.chars() {
        if c == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
