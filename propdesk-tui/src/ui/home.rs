//! Home screen: the landing page before the admin console is mounted.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled("PropDesk", theme::accent_bold())),
        Line::from(Span::styled(
            "Prop-firm admin console",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Accounts, payouts and risk alerts with shared date, plan and status filters.",
            theme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", theme::accent()),
            Span::styled(" open console  ", theme::muted()),
            Span::styled("[?]", theme::accent()),
            Span::styled(" help  ", theme::muted()),
            Span::styled("[q]", theme::accent()),
            Span::styled(" quit", theme::muted()),
        ]),
    ];

    let para = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(para, centered_rect(80, 40, inner));
}
