//! Data table widget built from a view snapshot.

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::admin::{SnapshotBody, ViewSnapshot};
use crate::theme;

const CHECKBOX_WIDTH: u16 = 3;

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn header(snap: &ViewSnapshot) -> Row<'static> {
    let mut cells = Vec::with_capacity(snap.headers.len() + 1);
    if snap.selectable {
        cells.push(Cell::from(checkbox(snap.all_selected)).style(theme::accent()));
    }
    for (i, h) in snap.headers.iter().enumerate() {
        let label = match h.sorted {
            Some(dir) => format!("{} {}", h.label, dir.arrow()),
            None => h.label.clone(),
        };
        let mut style = if h.sorted.is_some() {
            theme::accent_bold()
        } else {
            theme::accent()
        };
        if i == snap.column {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        cells.push(Cell::from(label).style(style));
    }
    Row::new(cells).height(1)
}

fn widths(snap: &ViewSnapshot) -> Vec<Constraint> {
    let mut out = Vec::with_capacity(snap.headers.len() + 1);
    if snap.selectable {
        out.push(Constraint::Length(CHECKBOX_WIDTH));
    }
    out.extend(
        snap.headers
            .iter()
            .map(|h| h.width.map_or(Constraint::Min(8), Constraint::Length)),
    );
    out
}

pub fn render(f: &mut Frame, area: Rect, snap: &ViewSnapshot) {
    let widths = widths(snap);
    let header = header(snap);

    match &snap.body {
        SnapshotBody::Skeleton { rows, columns } => {
            let rows = (0..*rows).map(|_| {
                Row::new((0..*columns).map(|_| Cell::from("░░░░░░").style(theme::muted())))
            });
            let table = Table::new(rows, widths)
                .header(header)
                .column_spacing(1);
            f.render_widget(table, area);
        }
        SnapshotBody::Empty { message, .. } => {
            let table = Table::new(Vec::<Row>::new(), widths)
                .header(header)
                .column_spacing(1);
            f.render_widget(table, area);
            let below = Rect {
                y: area.y.saturating_add(2),
                height: area.height.saturating_sub(2).min(1),
                ..area
            };
            let para = Paragraph::new(Span::styled(message.clone(), theme::muted()))
                .alignment(Alignment::Center);
            f.render_widget(para, below);
        }
        SnapshotBody::Rows(rows) => {
            let rows = rows.iter().map(|r| {
                let mut cells = Vec::with_capacity(r.cells.len() + 1);
                if snap.selectable {
                    cells.push(Cell::from(checkbox(r.selected)).style(theme::accent()));
                }
                cells.extend(
                    r.cells
                        .iter()
                        .map(|c| Cell::from(c.text.clone()).style(theme::tone(c.tone))),
                );
                Row::new(cells)
            });
            let table = Table::new(rows, widths)
                .header(header)
                .column_spacing(1)
                .row_highlight_style(theme::cursor_row());
            let mut state = TableState::default().with_selected(Some(snap.cursor));
            f.render_stateful_widget(table, area, &mut state);
        }
    }
}
