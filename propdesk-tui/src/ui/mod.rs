//! Top-level UI layout: active screen with a status bar underneath.

pub mod filter_bar;
pub mod home;
pub mod overlays;
pub mod status_bar;
pub mod table;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Screen};
use crate::theme;
use crate::views::ViewKind;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    match app.screen {
        Screen::Home => home::render(f, main_area),
        Screen::Console => draw_console(f, main_area, app),
    }

    status_bar::render(f, status_area, app);

    match &app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::Detail { title, fields } => overlays::render_detail(f, main_area, title, fields),
        Overlay::None => {}
    }
}

fn draw_console(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let snap = session.snapshot(&app.now());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(
            " {} [{}] ",
            snap.kind.label(),
            snap.kind.index() + 1
        ))
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // view tabs
            Constraint::Length(1), // global filters
            Constraint::Length(1), // quick filters
            Constraint::Length(1), // search
            Constraint::Min(3),    // table
        ])
        .split(inner);

    f.render_widget(Paragraph::new(tabs(snap.kind)), rows[0]);
    filter_bar::render_global(f, rows[1], session.filters().filters());
    filter_bar::render_quick(f, rows[2], &snap);
    filter_bar::render_search(f, rows[3], &snap, app.input_mode);
    table::render(f, rows[4], &snap);
}

fn tabs(active: ViewKind) -> Line<'static> {
    let mut spans = Vec::new();
    for kind in ViewKind::ALL {
        let style = if kind == active {
            theme::pill_active()
        } else {
            theme::pill_inactive()
        };
        spans.push(Span::styled(
            format!(" {}:{} ", kind.index() + 1, kind.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chrono::Utc;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use propdesk_core::sample::sample_set;
    use propdesk_core::{AppConfig, DateRange};

    use crate::loader::LoaderResponse;

    fn screen_text(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> (AppState, mpsc::Receiver<crate::loader::LoaderCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(AppConfig::default(), cmd_tx, resp_rx), cmd_rx)
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
    }

    #[test]
    fn home_screen_renders() {
        let (app, _rx) = app();
        let text = screen_text(&app);
        assert!(text.contains("PropDesk"));
    }

    #[test]
    fn console_shows_skeleton_then_rows() {
        let (mut app, _rx) = app();
        app.enter_console();
        let text = screen_text(&app);
        assert!(text.contains("Accounts [1]"));
        assert!(text.contains("░"));

        let request = app.session.as_ref().unwrap().request;
        app.handle_loader_response(LoaderResponse::Loaded {
            request,
            set: Box::new(sample_set(&app.config.sample, Utc::now())),
        });
        app.session
            .as_mut()
            .unwrap()
            .filters_mut()
            .set_date_range(DateRange::Custom);
        let text = screen_text(&app);
        assert!(text.contains("Trader"));
        assert!(text.contains("A-"));
        assert!(!text.contains("░"));
    }

    #[test]
    fn empty_state_message_is_drawn() {
        let (mut app, _rx) = app();
        app.enter_console();
        let request = app.session.as_ref().unwrap().request;
        app.handle_loader_response(LoaderResponse::Loaded {
            request,
            set: Box::new(sample_set(&app.config.sample, Utc::now())),
        });
        app.session
            .as_mut()
            .unwrap()
            .filters_mut()
            .set_status_filter("no such status");
        assert!(screen_text(&app).contains("No results found."));
    }
}
