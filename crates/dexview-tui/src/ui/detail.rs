//! Detail overlay for the focused item.

use itertools::Itertools;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Widget};
use strum::IntoEnumIterator;

use dexview_core::{ItemDetail, ItemId, STAT_LABELS};

use super::{centered_popup, StatsChart};
use crate::app::DetailTab;
use crate::theme::Theme;

const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 18;

/// Modal with the Main and Statistics tabs of one item.
pub struct DetailView<'a> {
    detail: &'a ItemDetail,
    neighbors: Option<(&'a ItemId, &'a ItemId)>,
    tab: DetailTab,
    position: Option<(usize, usize)>,
    theme: &'a Theme,
}

impl<'a> DetailView<'a> {
    pub fn new(detail: &'a ItemDetail, tab: DetailTab, theme: &'a Theme) -> Self {
        Self {
            detail,
            neighbors: None,
            tab,
            position: None,
            theme,
        }
    }

    /// Previous and next item in the active list.
    pub fn neighbors(mut self, neighbors: Option<(&'a ItemId, &'a ItemId)>) -> Self {
        self.neighbors = neighbors;
        self
    }

    /// One-based position and length of the active list.
    pub fn position(mut self, position: Option<(usize, usize)>) -> Self {
        self.position = position;
        self
    }

    fn accent(&self) -> Style {
        self.theme.card_border(self.detail.primary_type())
    }

    fn render_types(&self, area: Rect, buf: &mut Buffer) {
        let badges = self.detail.types.iter().map(|kind| {
            Span::styled(
                format!(" {kind} "),
                Style::new()
                    .bg(self.theme.type_color(kind))
                    .fg(self.theme.background)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let spans: Vec<Span> = Itertools::intersperse(badges, Span::raw(" ")).collect();
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let titles = DetailTab::iter().map(|tab| tab.to_string());
        Tabs::new(titles)
            .select(self.tab as usize)
            .style(self.theme.help_desc)
            .highlight_style(self.accent().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
            .divider("|")
            .render(area, buf);
    }

    fn render_main(&self, area: Rect, buf: &mut Buffer) {
        let detail = self.detail;
        let label = self.theme.help_key;
        let value = Style::new().fg(self.theme.foreground);

        let experience = detail
            .base_experience
            .map_or_else(|| "unknown".to_string(), |xp| xp.to_string());
        let abilities = if detail.abilities.is_empty() {
            "none".to_string()
        } else {
            detail.abilities.iter().join(", ")
        };

        let rows = [
            ("Height", format!("{:.1} m", detail.height_m())),
            ("Weight", format!("{:.1} kg", detail.weight_kg())),
            ("Base Experience", experience),
            ("Abilities", abilities),
            ("Stat Total", detail.stats.total().to_string()),
        ];

        let lines: Vec<Line> = rows
            .into_iter()
            .map(|(name, text)| {
                Line::from(vec![
                    Span::styled(format!("{name:>15}: "), label),
                    Span::styled(text, value),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }

    fn render_statistics(&self, area: Rect, buf: &mut Buffer) {
        let series = self.detail.stats.series();
        StatsChart::new(
            &STAT_LABELS,
            &series,
            format!("{} Stats", self.detail.display_name()),
        )
        .title_style(self.accent().add_modifier(Modifier::BOLD))
        .label_style(self.theme.help_desc)
        .bar_style(self.theme.stat_bar)
        .empty_style(self.theme.stat_empty)
        .render(area, buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let Some((previous, next)) = self.neighbors else {
            return;
        };

        let prev_text = format!("◀ {}", previous.display_name());
        let next_text = format!("{} ▶", next.display_name());
        let middle = self
            .position
            .map(|(index, len)| format!("{index}/{len}"))
            .unwrap_or_default();

        let [left, center, right] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(9),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(prev_text)
            .style(self.theme.help_desc)
            .render(left, buf);
        Paragraph::new(middle)
            .style(Style::new().fg(self.theme.muted))
            .centered()
            .render(center, buf);
        Paragraph::new(next_text)
            .style(self.theme.help_desc)
            .right_aligned()
            .render(right, buf);
    }
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_popup(POPUP_WIDTH, POPUP_HEIGHT, area);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(Span::styled(
                format!(
                    " {} {} ",
                    self.detail.number_label(),
                    self.detail.display_name()
                ),
                self.theme.title,
            ))
            .title_bottom(Line::from(" Esc close · Tab switch · ←/→ browse ").right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.accent())
            .style(Style::new().bg(self.theme.background));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let [types, tabs, _, body, nav] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_types(types, buf);
        self.render_tabs(tabs, buf);
        match self.tab {
            DetailTab::Main => self.render_main(body, buf),
            DetailTab::Statistics => self.render_statistics(body, buf),
        }
        self.render_nav(nav, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexview_core::{StatBlock, StatKind};

    fn charizard() -> ItemDetail {
        let mut stats = StatBlock::default();
        for (kind, value) in StatKind::ALL.into_iter().zip([78, 84, 78, 109, 85, 100]) {
            stats.set(kind, value);
        }
        ItemDetail {
            id: ItemId::new("charizard"),
            number: 6,
            image: None,
            types: vec!["fire".to_string(), "flying".to_string()],
            stats,
            height: 17,
            weight: 905,
            base_experience: Some(267),
            abilities: vec!["Blaze".to_string(), "SolarPower".to_string()],
        }
    }

    fn render(view: DetailView<'_>) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_main_tab() {
        let theme = Theme::dark();
        let detail = charizard();
        let text = render(DetailView::new(&detail, DetailTab::Main, &theme));

        assert!(text.contains("#006 Charizard"));
        assert!(text.contains(" fire "));
        assert!(text.contains("1.7 m"));
        assert!(text.contains("90.5 kg"));
        assert!(text.contains("267"));
        assert!(text.contains("Blaze, SolarPower"));
    }

    #[test]
    fn test_statistics_tab_and_neighbors() {
        let theme = Theme::dark();
        let detail = charizard();
        let previous = ItemId::new("charmeleon");
        let next = ItemId::new("squirtle");

        let text = render(
            DetailView::new(&detail, DetailTab::Statistics, &theme)
                .neighbors(Some((&previous, &next)))
                .position(Some((6, 151))),
        );

        assert!(text.contains("Charizard Stats"));
        assert!(text.contains("special-attack 109"));
        assert!(text.contains("◀ Charmeleon"));
        assert!(text.contains("Squirtle ▶"));
        assert!(text.contains("6/151"));
    }

    #[test]
    fn test_unknown_experience() {
        let theme = Theme::dark();
        let mut detail = charizard();
        detail.base_experience = None;
        detail.abilities.clear();
        let text = render(DetailView::new(&detail, DetailTab::Main, &theme));
        assert!(text.contains("unknown"));
        assert!(text.contains("none"));
    }
}
