//! Disk cards with per-mount gauge and title line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::progress::{bytes_to_gib, compute};
use crate::types::DiskUsage;
use crate::ui::util::{load_color, truncate_middle};

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, disks: &[DiskUsage]) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Disks"), area);
    if disks.is_empty() {
        return;
    }

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height < 3 {
        return;
    }

    let per_disk_h = 3u16;
    let max_cards = (inner.height / per_disk_h).min(disks.len() as u16) as usize;

    let constraints: Vec<Constraint> = (0..max_cards)
        .map(|_| Constraint::Length(per_disk_h))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, slot) in rows.iter().enumerate() {
        let d = &disks[i];
        let p = compute(
            bytes_to_gib(d.used_bytes),
            bytes_to_gib(d.total_bytes),
            "GiB used",
        );

        let title = format!(
            "{}   {}  ({}%)",
            truncate_middle(&d.mount_label, (slot.width.saturating_sub(6)) as usize / 2),
            p.label,
            p.percent
        );
        let card = Block::default().borders(Borders::ALL).title(title);
        f.render_widget(card, *slot);

        if !p.has_data {
            continue;
        }

        let inner_card = Rect {
            x: slot.x + 1,
            y: slot.y + 1,
            width: slot.width.saturating_sub(2),
            height: slot.height.saturating_sub(2),
        };
        if inner_card.height == 0 {
            continue;
        }

        let g = Gauge::default()
            .percent(p.percent)
            .gauge_style(Style::default().fg(load_color(p.percent)));
        f.render_widget(
            g,
            Rect {
                x: inner_card.x,
                y: inner_card.y,
                width: inner_card.width,
                height: 1,
            },
        );
    }
}
