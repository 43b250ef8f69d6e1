//! Top header with the device address and the report status line.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::poller::ReportView;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, device: &str, view: &ReportView) {
    let stamp = view
        .last_success
        .as_deref()
        .map(|t| format!(" (at {t})"))
        .unwrap_or_default();
    let title = format!(
        "oakmon — device: {} | {}{}  (Ctrl+Q to quit)",
        device, view.status, stamp
    );
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
