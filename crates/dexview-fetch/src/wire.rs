//! JSON shapes of the remote API and their conversion into typed records.
//!
//! Responses are validated once, here. Everything downstream works with
//! [`ItemDetail`] and never sees the raw JSON.

use dexview_core::{format_ability, ItemDetail, ItemId, StatBlock, StatKind};
use serde::Deserialize;
use thiserror::Error;

use crate::source::ListEntry;

/// A listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    /// Total number of items the server knows about.
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<ListEntry>,
}

/// A `{ name, url }` reference to another resource.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub slot: u8,
}

/// A per-item detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatEntry>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

/// Shape problems found while converting a detail response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("item has an empty name")]
    EmptyName,

    #[error("stat '{stat}' is missing")]
    MissingStat { stat: &'static str },

    #[error("item has no types")]
    NoTypes,
}

impl ItemResponse {
    /// Preferred artwork URL, falling back to the default sprite.
    fn image(&self) -> Option<String> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.clone())
            .or_else(|| self.sprites.front_default.clone())
    }
}

impl TryFrom<ItemResponse> for ItemDetail {
    type Error = WireError;

    fn try_from(wire: ItemResponse) -> Result<Self, Self::Error> {
        if wire.name.trim().is_empty() {
            return Err(WireError::EmptyName);
        }

        let mut stats = StatBlock::default();
        let mut seen = [false; 6];
        for entry in &wire.stats {
            // Unknown stats (accuracy, evasion in older data) are ignored.
            if let Some(kind) = StatKind::from_label(&entry.stat.name) {
                stats.set(kind, entry.base_stat);
                if let Some(i) = StatKind::ALL.iter().position(|k| *k == kind) {
                    seen[i] = true;
                }
            }
        }
        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(WireError::MissingStat {
                stat: StatKind::ALL[i].label(),
            });
        }

        let mut types = wire.types.clone();
        if types.is_empty() {
            return Err(WireError::NoTypes);
        }
        types.sort_by_key(|t| t.slot);

        let mut abilities = wire.abilities.clone();
        abilities.sort_by_key(|a| a.slot);

        Ok(ItemDetail {
            id: ItemId::new(wire.name.as_str()),
            number: wire.id,
            image: wire.image(),
            types: types.into_iter().map(|t| t.kind.name).collect(),
            stats,
            height: wire.height,
            weight: wire.weight,
            base_experience: wire.base_experience,
            abilities: abilities
                .iter()
                .map(|a| format_ability(&a.ability.name))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHARIZARD: &str = r#"{
        "id": 6,
        "name": "charizard",
        "height": 17,
        "weight": 905,
        "base_experience": 267,
        "sprites": {
            "front_default": "https://img/6-small.png",
            "other": { "official-artwork": { "front_default": "https://img/6.png" } }
        },
        "types": [
            { "slot": 2, "type": { "name": "flying", "url": "" } },
            { "slot": 1, "type": { "name": "fire", "url": "" } }
        ],
        "stats": [
            { "base_stat": 78, "effort": 0, "stat": { "name": "hp" } },
            { "base_stat": 84, "effort": 0, "stat": { "name": "attack" } },
            { "base_stat": 78, "effort": 0, "stat": { "name": "defense" } },
            { "base_stat": 109, "effort": 3, "stat": { "name": "special-attack" } },
            { "base_stat": 85, "effort": 0, "stat": { "name": "special-defense" } },
            { "base_stat": 100, "effort": 0, "stat": { "name": "speed" } }
        ],
        "abilities": [
            { "ability": { "name": "blaze" }, "slot": 1, "is_hidden": false },
            { "ability": { "name": "solar-power" }, "slot": 3, "is_hidden": true }
        ]
    }"#;

    #[test]
    fn test_convert_detail() {
        let wire: ItemResponse = serde_json::from_str(CHARIZARD).unwrap();
        let detail = ItemDetail::try_from(wire).unwrap();

        assert_eq!(detail.id.as_str(), "charizard");
        assert_eq!(detail.number, 6);
        assert_eq!(detail.types, ["fire", "flying"]);
        assert_eq!(detail.stats.series(), [78, 84, 78, 109, 85, 100]);
        assert_eq!(detail.abilities, ["Blaze", "SolarPower"]);
        assert_eq!(detail.image.as_deref(), Some("https://img/6.png"));
        assert_eq!(detail.base_experience, Some(267));
    }

    #[test]
    fn test_missing_stat_is_rejected() {
        let json = CHARIZARD.replace(r#""name": "speed""#, r#""name": "accuracy""#);
        let wire: ItemResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(
            ItemDetail::try_from(wire),
            Err(WireError::MissingStat { stat: "speed" })
        );
    }

    #[test]
    fn test_null_base_experience_and_sprite_fallback() {
        let json = CHARIZARD
            .replace(r#""base_experience": 267"#, r#""base_experience": null"#)
            .replace(r#""front_default": "https://img/6.png""#, r#""front_default": null"#);
        let wire: ItemResponse = serde_json::from_str(&json).unwrap();
        let detail = ItemDetail::try_from(wire).unwrap();
        assert_eq!(detail.base_experience, None);
        assert_eq!(detail.image.as_deref(), Some("https://img/6-small.png"));
    }

    #[test]
    fn test_list_response() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
            "previous": null,
            "results": [{ "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" }]
        }"#;
        let page: ListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, Some(1302));
        assert_eq!(page.results[0].id().as_str(), "bulbasaur");
    }
}
