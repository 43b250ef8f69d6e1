//! Pure progress math shared by every gauge in the UI.

/// One gauge's worth of display data.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Rounded percentage, clamped to 0..=100 for display.
    pub percent: u16,
    /// `"{current}/{max} {unit}"`, both rounded to whole numbers.
    pub label: String,
    /// False when `max == 0`: there is nothing to meter, so the bar is
    /// suppressed rather than drawn full or empty.
    pub has_data: bool,
}

/// Map `(current, max)` to a percentage and a formatted label. Unit
/// conversion happens before this call; the function is unit-agnostic.
pub fn compute(current: f64, max: f64, unit: &str) -> Progress {
    let label = format!("{:.0}/{:.0} {}", current, max, unit);
    if max == 0.0 {
        return Progress {
            percent: 0,
            label,
            has_data: false,
        };
    }
    let percent = (current / max * 100.0).round().clamp(0.0, 100.0) as u16;
    Progress {
        percent,
        label,
        has_data: true,
    }
}

pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0 * 1024.0)
}
