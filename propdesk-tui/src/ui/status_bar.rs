//! Bottom status bar: key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, InputMode, Screen, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = match (app.screen, app.input_mode) {
        (Screen::Home, _) => " Enter:Console ?:Help q:Quit",
        (Screen::Console, InputMode::Search) => " Type to search  Enter:Done Esc:Clear",
        (Screen::Console, InputMode::Normal) => {
            " 1-3:View /:Search d/p/t:Filters f:Quick o:Sort Space/a:Select Esc:Home ?:Help"
        }
    };
    spans.push(Span::styled(hints, theme::muted()));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
