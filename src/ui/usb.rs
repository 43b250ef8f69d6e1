//! USB link state panel.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::types::UsbLinkState;

pub fn draw_usb(f: &mut ratatui::Frame<'_>, area: Rect, state: Option<UsbLinkState>) {
    let (text, color) = match state {
        None => ("---", Color::DarkGray),
        Some(UsbLinkState::Online) => ("Online", Color::Green),
        Some(UsbLinkState::Offline) => ("Offline", Color::Yellow),
        Some(UsbLinkState::Invalid) => ("Invalid", Color::Red),
        Some(UsbLinkState::Error) => ("Error", Color::Red),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("State: "),
            Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::raw("Ctrl+R resets the interface")),
    ];
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("USB Interface"));
    f.render_widget(panel, area);
}
