//! Filter pills: global axes, quick filters with badges, and the search box.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use propdesk_core::{DateRange, FilterState, ALL};

use crate::admin::ViewSnapshot;
use crate::app::InputMode;
use crate::theme;

fn pill(label: String, active: bool) -> Span<'static> {
    let style = if active {
        theme::pill_active()
    } else {
        theme::pill_inactive()
    };
    Span::styled(format!(" {label} "), style)
}

/// `[d]ate`, `[p]lan` and `[t]` status, shared by every view.
pub fn render_global(f: &mut Frame, area: Rect, filters: &FilterState) {
    let mut spans = vec![Span::styled("Date ", theme::muted())];
    for range in DateRange::ALL {
        spans.push(pill(range.label().to_string(), range == filters.date_range));
    }

    spans.push(Span::styled("  Plan ", theme::muted()));
    spans.push(pill(filters.plan.clone(), filters.plan != ALL));

    spans.push(Span::styled("  Status ", theme::muted()));
    spans.push(pill(filters.status.clone(), filters.status != ALL));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Quick-filter row. "All" carries the globally filtered count.
pub fn render_quick(f: &mut Frame, area: Rect, snap: &ViewSnapshot) {
    let none_active = snap.quick.iter().all(|p| !p.active);
    let mut spans = vec![
        Span::styled("Quick ", theme::muted()),
        pill(format!("All {}", snap.global), none_active),
    ];
    for p in &snap.quick {
        spans.push(Span::raw(" "));
        spans.push(pill(format!("{} {}", p.label, p.count), p.active));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_search(f: &mut Frame, area: Rect, snap: &ViewSnapshot, mode: InputMode) {
    let focused = mode == InputMode::Search;
    let mut spans = vec![Span::styled(
        "/ ",
        if focused { theme::accent_bold() } else { theme::muted() },
    )];
    if snap.search.is_empty() && !focused {
        spans.push(Span::styled(snap.search_placeholder.clone(), theme::muted()));
    } else {
        spans.push(Span::styled(snap.search.clone(), theme::text()));
    }
    if focused {
        spans.push(Span::styled("█", theme::accent()));
    }

    let counts = if snap.selectable && snap.selected > 0 {
        format!("   {} of {} rows, {} selected", snap.visible, snap.total, snap.selected)
    } else {
        format!("   {} of {} rows", snap.visible, snap.total)
    };
    spans.push(Span::styled(counts, theme::muted()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
