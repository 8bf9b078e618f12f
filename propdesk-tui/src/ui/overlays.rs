//! Overlay widgets: key help and the row detail drill-down.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "Enter", "Open the admin console (home screen)");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Console");
    key(&mut lines, "1 / 2 / 3", "Accounts / Payouts / Risk Alerts");
    key(&mut lines, "Esc", "Back to home (filters and selection are discarded)");
    lines.push(Line::from(""));

    section(&mut lines, "Filters (shared by every view)");
    key(&mut lines, "d", "Cycle date range (Today → 7D → 30D → 90D → Custom)");
    key(&mut lines, "p", "Cycle plan");
    key(&mut lines, "t", "Cycle status");
    key(&mut lines, "r", "Reset filters to defaults");
    key(&mut lines, "f", "Cycle this view's quick filter");
    lines.push(Line::from(""));

    section(&mut lines, "Table");
    key(&mut lines, "/", "Search (Enter done, Esc clear)");
    key(&mut lines, "j / k", "Move row cursor");
    key(&mut lines, "h / l", "Move column cursor");
    key(&mut lines, "o", "Sort by column under cursor (asc ↔ desc)");
    key(&mut lines, "Space", "Toggle row selection");
    key(&mut lines, "a", "Toggle select all visible rows");
    key(&mut lines, "c", "Clear selection");
    key(&mut lines, "Enter", "Row detail");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

/// Key/value drill-down for one record.
pub fn render_detail(f: &mut Frame, area: Rect, title: &str, fields: &[(String, String)]) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {title} [Esc]close "))
        .title_style(theme::accent_bold());

    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let lines: Vec<Line> = fields
        .iter()
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("{k:>width$}  "), theme::muted()),
                Span::styled(v.as_str(), theme::text()),
            ])
        })
        .collect();

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>12}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
