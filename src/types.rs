//! Types that mirror the device's JSON schema.

use std::fmt;

/// Memory usage as reported by the device. `available_bytes` may exceed
/// `total_bytes` on a misbehaving collector; display code saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemoryUsage {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub mount_label: String,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

/// Latest displayed telemetry. Built by merging `ReportPatch`es; fields the
/// device has never reported stay empty rather than defaulting to zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    pub timestamp: Option<String>,
    // one entry per logical core, device enumeration order
    pub cpu_cores: Vec<f64>,
    pub memory: Option<MemoryUsage>,
    pub disks: Vec<DiskUsage>,
}

impl StatusReport {
    /// Merge a decoded patch: present fields replace wholesale, absent
    /// fields leave the prior value untouched.
    pub fn apply(&mut self, patch: ReportPatch) {
        if let Some(t) = patch.timestamp {
            self.timestamp = Some(t);
        }
        if let Some(c) = patch.cpu_cores {
            self.cpu_cores = c;
        }
        if let Some(m) = patch.memory {
            self.memory = Some(m);
        }
        if let Some(d) = patch.disks {
            self.disks = d;
        }
    }
}

/// Decode product of one `/report` response. Every top-level key is
/// independently optional so the device can report a subset of metrics
/// without invalidating the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPatch {
    pub timestamp: Option<String>,
    pub cpu_cores: Option<Vec<f64>>,
    pub memory: Option<MemoryUsage>,
    pub disks: Option<Vec<DiskUsage>>,
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none()
            && self.cpu_cores.is_none()
            && self.memory.is_none()
            && self.disks.is_none()
    }
}

/// Connectivity of the device's USB-HID interface, recomputed each poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbLinkState {
    Offline,
    Online,
    /// Structurally valid response lacking the expected fields or carrying
    /// an unrecognized status code.
    Invalid,
    /// Transport or decode failure.
    Error,
}

impl fmt::Display for UsbLinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UsbLinkState::Offline => "Offline",
            UsbLinkState::Online => "Online",
            UsbLinkState::Invalid => "Invalid",
            UsbLinkState::Error => "Error",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_only_present_fields() {
        let mut report = StatusReport {
            timestamp: Some("2016-05-01 10:00:00".into()),
            cpu_cores: vec![50.0, 60.0],
            memory: Some(MemoryUsage {
                total_bytes: 100,
                available_bytes: 40,
            }),
            disks: vec![DiskUsage {
                mount_label: "/".into(),
                used_bytes: 1,
                total_bytes: 2,
            }],
        };

        report.apply(ReportPatch {
            cpu_cores: Some(vec![10.0]),
            ..ReportPatch::default()
        });

        assert_eq!(report.cpu_cores, vec![10.0]);
        assert_eq!(report.timestamp.as_deref(), Some("2016-05-01 10:00:00"));
        assert!(report.memory.is_some());
        assert_eq!(report.disks.len(), 1);
    }

    #[test]
    fn used_bytes_saturates_when_available_exceeds_total() {
        let m = MemoryUsage {
            total_bytes: 10,
            available_bytes: 25,
        };
        assert_eq!(m.used_bytes(), 0);
    }
}
