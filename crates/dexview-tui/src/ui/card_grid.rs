//! Card grid widget for the catalogue overview.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use dexview_core::ItemDetail;

use super::truncate;
use crate::theme::Theme;

/// Minimum width of a card, borders included.
pub const CARD_WIDTH: u16 = 24;

/// Height of a card, borders included.
pub const CARD_HEIGHT: u16 = 5;

/// Number of card columns that fit in `width`.
pub fn grid_columns(width: u16) -> usize {
    usize::from(width / CARD_WIDTH).max(1)
}

/// Grid of catalogue cards with an optional selection.
///
/// Scrolls by whole rows so the selected card is always visible.
pub struct CardGrid<'a> {
    cards: &'a [&'a ItemDetail],
    selected: Option<usize>,
    theme: &'a Theme,
    empty_message: &'a str,
}

impl<'a> CardGrid<'a> {
    pub fn new(cards: &'a [&'a ItemDetail], theme: &'a Theme) -> Self {
        Self {
            cards,
            selected: None,
            theme,
            empty_message: "Nothing loaded",
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Set the text shown when there are no cards.
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    fn render_card(&self, detail: &ItemDetail, selected: bool, area: Rect, buf: &mut Buffer) {
        let border_type = if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(self.theme.card_border(detail.primary_type()))
            .title(Span::styled(
                format!(" {} ", detail.number_label()),
                self.theme.card_number,
            ));

        let inner = block.inner(area);
        block.render(area, buf);

        let width = usize::from(inner.width);
        let name_style = if selected {
            self.theme.selected
        } else {
            self.theme.card_name
        };
        let name = Line::from(Span::styled(truncate(&detail.display_name(), width), name_style));

        let mut type_spans = Vec::with_capacity(detail.types.len() * 2);
        for (i, kind) in detail.types.iter().enumerate() {
            if i > 0 {
                type_spans.push(Span::raw(" "));
            }
            type_spans.push(Span::styled(
                kind.as_str(),
                Style::new().fg(self.theme.type_color(kind)),
            ));
        }

        Paragraph::new(vec![name, Line::from(type_spans)]).render(inner, buf);
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.cards.is_empty() {
            let y = area.y + area.height / 2;
            Paragraph::new(self.empty_message)
                .style(Style::new().fg(self.theme.muted))
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, y, area.width, 1), buf);
            return;
        }

        let columns = grid_columns(area.width);
        let card_width = area.width / columns as u16;
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));

        let selected_row = self.selected.map_or(0, |s| s / columns);
        let first_row = (selected_row + 1).saturating_sub(visible_rows);

        let visible = self
            .cards
            .iter()
            .enumerate()
            .skip(first_row * columns)
            .take(visible_rows * columns);

        for (index, detail) in visible {
            let row = index / columns - first_row;
            let col = index % columns;

            let card_area = Rect::new(
                area.x + col as u16 * card_width,
                area.y + row as u16 * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            )
            .intersection(area);

            if card_area.height < CARD_HEIGHT {
                break;
            }

            self.render_card(detail, self.selected == Some(index), card_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexview_core::{ItemId, StatBlock};

    fn detail(name: &str, number: u32, types: &[&str]) -> ItemDetail {
        ItemDetail {
            id: ItemId::new(name),
            number,
            image: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: StatBlock::default(),
            height: 7,
            weight: 69,
            base_experience: Some(64),
            abilities: vec!["Overgrow".to_string()],
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(23), 1);
        assert_eq!(grid_columns(48), 2);
        assert_eq!(grid_columns(100), 4);
    }

    #[test]
    fn test_cards_render_name_number_and_types() {
        let theme = Theme::dark();
        let bulbasaur = detail("bulbasaur", 1, &["grass", "poison"]);
        let charmander = detail("charmander", 4, &["fire"]);
        let cards = [&bulbasaur, &charmander];

        let area = Rect::new(0, 0, 48, 5);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&cards, &theme)
            .selected(Some(1))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("#001"));
        assert!(text.contains("Bulbasaur"));
        assert!(text.contains("grass poison"));
        assert!(text.contains("Charmander"));

        // Thick border marks the selection
        assert_eq!(buf[(24, 0)].symbol(), "┏");
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(0, 0)].fg, theme.type_color("grass"));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let theme = Theme::dark();
        let items: Vec<ItemDetail> = (1..=6)
            .map(|n| detail(&format!("mon{n}"), n, &["normal"]))
            .collect();
        let cards: Vec<&ItemDetail> = items.iter().collect();

        // One column, room for two rows
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&cards, &theme)
            .selected(Some(4))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Mon4"));
        assert!(text.contains("Mon5"));
        assert!(!text.contains("Mon1"));
    }

    #[test]
    fn test_empty_message() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&[], &theme)
            .empty_message("No matches")
            .render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No matches"));
    }
}
