//! Remote keyboard panel: string buffer, modifier toggles, key bindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::keycodes::Modifiers;

fn toggle_span(label: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[{label}]"), style)
}

pub fn draw_keyboard(f: &mut ratatui::Frame<'_>, area: Rect, input: &str, mods: Modifiers) {
    let lines = vec![
        Line::from(vec![
            Span::raw("String to send: "),
            Span::styled(input.to_string(), Style::default().fg(Color::White)),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("Modifiers: "),
            toggle_span("CTRL", mods.ctrl),
            Span::raw(" "),
            toggle_span("SHIFT", mods.shift),
            Span::raw(" "),
            toggle_span("ALT", mods.alt),
            Span::raw(" "),
            toggle_span("WIN/CMD", mods.gui),
            Span::raw("   (F1-F4 toggle)"),
        ]),
        Line::from(Span::raw(
            "Enter sends the string | F5=Tab F6=Esc F7=Return F8=Backspace | arrows relay directly",
        )),
    ];
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Remote Keyboard"));
    f.render_widget(panel, area);
}
