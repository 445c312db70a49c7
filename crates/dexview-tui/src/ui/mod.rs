//! UI components and widgets.

mod card_grid;
mod detail;
mod help;
mod stats_chart;

pub use card_grid::{grid_columns, CardGrid, CARD_HEIGHT};
pub use detail::DetailView;
pub use help::HelpOverlay;
pub use stats_chart::StatsChart;

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub search: Option<Rect>,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect, show_search: bool) -> Self {
        let [header, search, main, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(u16::from(show_search)),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            search: show_search.then_some(search),
            main,
            footer,
        }
    }
}

/// Center a fixed-size popup within an area, shrinking it to fit.
pub fn centered_popup(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Shorten `text` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
