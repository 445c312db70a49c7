//! Horizontal bar chart for base statistics.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// A labelled horizontal bar per value, scaled from zero to the largest value.
pub struct StatsChart<'a> {
    labels: &'a [&'a str],
    series: &'a [u16],
    title: String,
    title_style: Style,
    label_style: Style,
    bar_style: Style,
    empty_style: Style,
}

impl<'a> StatsChart<'a> {
    /// Create a chart. Extra labels or values beyond the shorter slice are ignored.
    pub fn new(labels: &'a [&'a str], series: &'a [u16], title: impl Into<String>) -> Self {
        Self {
            labels,
            series,
            title: title.into(),
            title_style: Style::default().add_modifier(Modifier::BOLD),
            label_style: Style::default(),
            bar_style: Style::default(),
            empty_style: Style::default(),
        }
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Set the style for the filled portion of each bar.
    pub fn bar_style(mut self, style: Style) -> Self {
        self.bar_style = style;
        self
    }

    /// Set the style for the empty portion of each bar.
    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }

    fn scale_max(&self) -> u16 {
        self.series.iter().copied().max().unwrap_or(0).max(1)
    }
}

impl Widget for StatsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = Line::from(Span::styled(self.title.as_str(), self.title_style));
        buf.set_line(area.x, area.y, &title, area.width);

        let label_width = self.labels.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        // label, space, three-digit value, space
        let bar_x = area.x + label_width + 5;
        let bar_width = (area.x + area.width).saturating_sub(bar_x);
        let max = f64::from(self.scale_max());

        let rows = self.labels.iter().zip(self.series.iter());
        for (row, (label, &value)) in rows.enumerate() {
            let y = area.y + 2 + row as u16;
            if y >= area.y + area.height {
                break;
            }

            let text = format!("{label:>w$} {value:>3} ", w = label_width as usize);
            buf.set_stringn(area.x, y, &text, area.width as usize, self.label_style);

            let filled = (f64::from(bar_width) * f64::from(value) / max).round() as u16;
            for x in 0..bar_width {
                let (symbol, style) = if x < filled {
                    ("█", self.bar_style)
                } else {
                    ("░", self.empty_style)
                };
                buf[(bar_x + x, y)].set_symbol(symbol).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexview_core::STAT_LABELS;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_largest_value_fills_bar() {
        let series = [50, 100, 0, 25, 100, 75];
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);

        StatsChart::new(&STAT_LABELS, &series, "Pikachu Stats").render(area, &mut buf);

        assert!(row(&buf, 0).starts_with("Pikachu Stats"));
        // "special-defense" is the widest label (15), bars start at 20
        let attack = row(&buf, 3);
        assert!(attack.starts_with("         attack 100 "));
        assert_eq!(attack[20..].chars().filter(|&c| c == '█').count(), 20);

        let defense = row(&buf, 4);
        assert!(defense.contains("defense   0"));
        assert!(!defense.contains('█'));
    }

    #[test]
    fn test_all_zero_series() {
        let series = [0; 6];
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        StatsChart::new(&STAT_LABELS, &series, "").render(area, &mut buf);
        assert!(!row(&buf, 2).contains('█'));
    }

    #[test]
    fn test_short_area_clips_rows() {
        let series = [1, 2, 3, 4, 5, 6];
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        StatsChart::new(&STAT_LABELS, &series, "t").render(area, &mut buf);
        assert!(row(&buf, 3).contains("attack"));
    }
}
