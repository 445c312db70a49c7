//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Widget};

use dexview_core::{navigation, ItemDetail, Session};
use dexview_fetch::FetchProgress;

use crate::search::SearchInput;
use crate::theme::Theme;
use crate::ui::{AppLayout, CardGrid, DetailView, HelpOverlay};

use super::state::{AppMode, DetailTab, StatusLevel};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub session: &'a Session,
    pub cards: &'a [&'a ItemDetail],
    pub selected: Option<usize>,
    pub search: &'a SearchInput,
    pub load_progress: Option<&'a FetchProgress>,
    pub loading: bool,
    pub spinner: &'a str,
    pub status: Option<&'a (StatusLevel, String)>,
    pub loaded: usize,
    pub max_items: usize,
    pub exhausted: bool,
    pub detail_tab: DetailTab,
}

impl RenderContext<'_> {
    fn show_search(&self) -> bool {
        self.mode == AppMode::Search || !self.search.query().is_empty()
    }
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area, ctx.show_search());

    render_header(ctx, layout.header, buf);
    if let Some(search_area) = layout.search {
        render_search_bar(ctx, search_area, buf);
    }
    render_grid(ctx, layout.main, buf);
    render_footer(ctx, layout.footer, buf);

    match ctx.mode {
        AppMode::Help => HelpOverlay::new(ctx.theme).render(area, buf),
        AppMode::Detail => render_detail(ctx, area, buf),
        _ => {}
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" dexview ", ctx.theme.title.add_modifier(Modifier::BOLD));

    let mut spans = vec![
        title,
        Span::styled(
            format!(" {}/{} loaded ", ctx.loaded, ctx.max_items),
            ctx.theme.header,
        ),
    ];

    if ctx.loading {
        let (fetched, total) = ctx
            .load_progress
            .map_or((0, 0), |p| (p.fetched, p.total));
        spans.push(Span::styled(
            format!(" {} Loading {fetched}/{total} ", ctx.spinner),
            Style::default().fg(ctx.theme.info),
        ));
    } else if ctx.exhausted {
        spans.push(Span::styled(" all loaded ", Style::default().fg(ctx.theme.muted)));
    }

    if let Some(query) = ctx.session.filter().query() {
        let count = ctx.session.filter().matches().len();
        spans.push(Span::styled(
            format!(" {count} match{} for \"{query}\" ", if count == 1 { "" } else { "es" }),
            Style::default().fg(ctx.theme.background).bg(ctx.theme.info),
        ));
    }

    if let Some((level, msg)) = ctx.status {
        let color = match level {
            StatusLevel::Info => ctx.theme.success,
            StatusLevel::Warning => ctx.theme.warning,
            StatusLevel::Error => ctx.theme.error,
        };
        spans.push(Span::styled(format!(" {msg} "), Style::default().fg(color)));
    }

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.header)
        .render(area, buf);

    // Thin page progress bar on the right edge while loading
    if let Some(progress) = ctx.load_progress.filter(|_| ctx.loading) {
        let width = 20.min(area.width / 4);
        if width > 0 {
            let gauge_area = Rect::new(area.x + area.width - width, area.y, width, 1);
            Gauge::default()
                .ratio(progress.ratio())
                .label("")
                .gauge_style(ctx.theme.progress_bar)
                .style(ctx.theme.progress_bg)
                .render(gauge_area, buf);
        }
    }
}

fn render_search_bar(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let query = ctx.search.query();
    let cursor = ctx.search.cursor();
    let editing = ctx.search.active;

    let mut spans = vec![Span::styled(" / ", ctx.theme.search_prompt)];

    if editing {
        let before: String = query.chars().take(cursor).collect();
        let at: String = query.chars().skip(cursor).take(1).collect();
        let after: String = query.chars().skip(cursor + 1).collect();

        spans.push(Span::styled(before, ctx.theme.search_input));
        spans.push(Span::styled(
            if at.is_empty() { " ".to_string() } else { at },
            ctx.theme.search_cursor,
        ));
        spans.push(Span::styled(after, ctx.theme.search_input));
    } else {
        spans.push(Span::styled(query.to_string(), ctx.theme.search_input));
    }

    let min_len = ctx.session.config().min_query_len;
    if !ctx.session.filter().is_active() && !query.trim().is_empty() {
        spans.push(Span::styled(
            format!("  type at least {min_len} letters to filter"),
            Style::default().fg(ctx.theme.muted),
        ));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_grid(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let empty_message = if ctx.session.filter().is_no_match() {
        "No matches"
    } else if ctx.loading {
        "Loading..."
    } else if ctx.loaded == 0 {
        "Nothing loaded yet - press m to load"
    } else {
        ""
    };

    CardGrid::new(ctx.cards, ctx.theme)
        .selected(ctx.selected)
        .empty_message(empty_message)
        .render(area, buf);
}

fn render_detail(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let Some(detail) = ctx.session.focused_detail() else {
        return;
    };

    let active = ctx.session.active_list();
    let neighbors = navigation::neighbors(active, &detail.id)
        .ok()
        .map(|n| (n.previous, n.next));
    let position = active
        .iter()
        .position(|id| *id == detail.id)
        .map(|index| (index + 1, active.len()));

    DetailView::new(detail, ctx.detail_tab, ctx.theme)
        .neighbors(neighbors)
        .position(position)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let mut keys: Vec<(&str, &str)> = match ctx.mode {
        AppMode::Search => vec![("Enter", "Keep filter"), ("Esc", "Clear")],
        AppMode::Detail => vec![("←/→", "Prev/Next"), ("Tab", "Stats"), ("Esc", "Close")],
        AppMode::Help => vec![("Esc", "Close")],
        AppMode::Normal | AppMode::Quit => {
            let mut v = vec![("hjkl", "Move"), ("Enter", "Open"), ("/", "Search")];
            if ctx.session.can_load_more() && !ctx.exhausted {
                v.push(("m", "More"));
            }
            if ctx.session.filter().is_active() {
                v.push(("Esc", "Clear filter"));
            }
            v.push(("t", "Theme"));
            v
        }
    };

    if ctx.mode != AppMode::Search {
        keys.extend([("?", "Help"), ("q", "Quit")]);
    }

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key} "), ctx.theme.help_key),
                Span::styled(format!("{desc} "), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}
