//! Memory gauge.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::progress::{bytes_to_mib, compute};
use crate::types::MemoryUsage;

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, m: Option<MemoryUsage>) {
    let block = Block::default().borders(Borders::ALL).title("Memory");
    let Some(mem) = m else {
        f.render_widget(Paragraph::new("no data").block(block), area);
        return;
    };

    let p = compute(
        bytes_to_mib(mem.used_bytes()),
        bytes_to_mib(mem.total_bytes),
        "MiB used",
    );
    if !p.has_data {
        // a zero-byte total meters nothing; show the label without a bar
        f.render_widget(Paragraph::new(p.label).block(block), area);
        return;
    }

    let g = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(p.percent)
        .label(format!("{} ({}%)", p.label, p.percent));
    f.render_widget(g, area);
}
