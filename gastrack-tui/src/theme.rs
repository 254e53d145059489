//! Neon-on-charcoal theme tokens for the gastrack TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, key hints, info status)
//! - **Positive**: Neon green (LOW fees)
//! - **Warning**: Neon orange (MEDIUM fees, warnings)
//! - **Negative**: Hot pink (HIGH fees, errors)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (labels, disabled)

use ratatui::style::{Color, Modifier, Style};

use gastrack_core::presenter::Tier;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Color for a fee tier; `None` (nothing presented yet) is muted.
pub fn tier_color(tier: Option<Tier>) -> Color {
    match tier {
        Some(Tier::Low) => POSITIVE,
        Some(Tier::Medium) => WARNING,
        Some(Tier::High) => NEGATIVE,
        None => MUTED,
    }
}

pub fn tier_style(tier: Option<Tier>) -> Style {
    Style::default().fg(tier_color(tier)).add_modifier(Modifier::BOLD)
}

/// Convert a chart's RGB triple.
pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}
