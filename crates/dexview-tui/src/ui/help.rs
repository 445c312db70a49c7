//! Help overlay widget.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Widget};

use super::centered_popup;
use crate::event::{get_help_sections, HelpSection};
use crate::theme::Theme;

/// Help overlay showing key bindings organized by section.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    /// Create a new help overlay.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn render_section_column(&self, sections: &[HelpSection], area: Rect, buf: &mut Buffer) {
        let bottom = area.y + area.height;
        let mut y = area.y;

        for section in sections {
            if y >= bottom {
                break;
            }

            let title_line = Line::from(Span::styled(
                section.title,
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            ));
            buf.set_line(area.x, y, &title_line, area.width);
            y += 1;

            for binding in &section.bindings {
                if y >= bottom {
                    break;
                }

                let line = Line::from(vec![
                    Span::styled(format!("{:>10}", binding.keys), self.theme.help_key),
                    Span::styled(format!(" {}", binding.description), self.theme.help_desc),
                ]);
                buf.set_line(area.x, y, &line, area.width);
                y += 1;
            }

            // Spacing between sections
            y += 1;
        }
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_popup(76, 16, area);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Help - Press ? or Esc to close ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let [left_col, right_col] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);

        // Browsing on the left, search and general keys on the right
        let mut sections = get_help_sections();
        let right = sections.split_off(sections.len().div_ceil(2));

        self.render_section_column(&sections, left_col, buf);
        self.render_section_column(&right, right_col, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_help_lists_every_section() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 90, 24);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new(&theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        for section in get_help_sections() {
            assert!(text.contains(section.title), "missing {}", section.title);
        }
        assert!(text.contains("Load more items"));
    }
}
