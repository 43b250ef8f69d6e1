//! Per-core CPU load bars.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::progress;
use crate::types::StatusReport;
use crate::ui::util::load_color;

pub fn draw_cpu_cores(f: &mut ratatui::Frame<'_>, area: Rect, report: &StatusReport) {
    f.render_widget(Block::default().borders(Borders::ALL).title("CPU"), area);
    if report.cpu_cores.is_empty() {
        return;
    }

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height == 0 {
        return;
    }

    let show_n = (inner.height as usize).min(report.cpu_cores.len());
    let constraints: Vec<Constraint> = (0..show_n).map(|_| Constraint::Length(1)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, slot) in rows.iter().enumerate() {
        let load = report.cpu_cores[i];
        let p = progress::compute(load, 100.0, "");
        let g = Gauge::default()
            .percent(p.percent)
            .gauge_style(Style::default().fg(load_color(p.percent)))
            .label(format!("cpu{:<2} {:>5.1}%", i, load));
        f.render_widget(g, *slot);
    }
}
