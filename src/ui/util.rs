//! Small UI helpers shared by the panels.

use ratatui::style::Color;

pub fn truncate_middle(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    format!("{}...{}", &s[..left], &s[s.len() - right..])
}

// Shared load coloring: calm under 25%, warm under 60%, hot above.
pub fn load_color(percent: u16) -> Color {
    match percent {
        p if p < 25 => Color::Green,
        p if p < 60 => Color::Yellow,
        _ => Color::Red,
    }
}
