//! Console palette and style helpers.
//!
//! # Color Palette
//! - **Accent**: teal (focus, active pills, headers)
//! - **Positive**: green (profit, paid, funded)
//! - **Negative**: red (losses, breaches, rejections)
//! - **Warning**: amber (drawdown thresholds, pending review)
//! - **Muted**: slate (secondary text, skeleton rows)

use ratatui::style::{Color, Modifier, Style};

use propdesk_core::Tone;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::desk()
    }
}

impl Theme {
    pub fn desk() -> Self {
        Self {
            background: Color::Rgb(16, 20, 24),
            accent: Color::Rgb(45, 212, 191),
            positive: Color::Rgb(74, 222, 128),
            negative: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(251, 191, 36),
            muted: Color::Rgb(100, 116, 139),
            text_primary: Color::White,
            text_secondary: Color::Rgb(180, 180, 180),
        }
    }

    /// Map a cell tone onto the palette.
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Default => self.text_primary,
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Warning => self.warning,
            Tone::Muted => self.muted,
            Tone::Accent => self.accent,
        }
    }
}

pub fn tone(tone: Tone) -> Style {
    Style::default().fg(Theme::default().tone_color(tone))
}

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn negative() -> Style {
    Style::default().fg(Theme::default().negative)
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text_primary)
}

/// Active filter pill.
pub fn pill_active() -> Style {
    let t = Theme::default();
    Style::default()
        .fg(t.background)
        .bg(t.accent)
        .add_modifier(Modifier::BOLD)
}

pub fn pill_inactive() -> Style {
    Style::default().fg(Theme::default().text_secondary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn cursor_row() -> Style {
    let t = Theme::default();
    Style::default()
        .bg(Color::Rgb(30, 41, 59))
        .fg(t.text_primary)
        .add_modifier(Modifier::BOLD)
}
