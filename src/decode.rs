//! Defensive decoders for the device's JSON payloads.
//!
//! The device firmware may report any subset of the telemetry keys, and its
//! JSON encoder has been seen stringifying numbers. Each top-level key
//! resolves independently: a missing or unusable key degrades to "absent"
//! for that key alone instead of failing the whole decode.

use serde_json::Value;
use thiserror::Error;

use crate::types::{DiskUsage, MemoryUsage, ReportPatch, UsbLinkState};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response body is not a JSON object")]
    NotAnObject,
}

// Accepts JSON numbers and strings that parse as numbers.
fn lenient_f64(v: &Value) -> Option<f64> {
    if let Some(n) = v.as_f64() {
        return Some(n);
    }
    v.as_str().and_then(|s| s.trim().parse::<f64>().ok())
}

fn lenient_u64(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return Some(n);
    }
    if let Some(f) = v.as_f64() {
        return (f >= 0.0).then_some(f as u64);
    }
    v.as_str().and_then(|s| s.trim().parse::<u64>().ok())
}

fn decode_cpu_cores(v: &Value) -> Option<Vec<f64>> {
    v.as_array()?.iter().map(lenient_f64).collect()
}

fn decode_memory(v: &Value) -> Option<MemoryUsage> {
    let obj = v.as_object()?;
    Some(MemoryUsage {
        total_bytes: lenient_u64(obj.get("t")?)?,
        available_bytes: lenient_u64(obj.get("a")?)?,
    })
}

fn decode_disk(v: &Value) -> Option<DiskUsage> {
    let obj = v.as_object()?;
    Some(DiskUsage {
        mount_label: obj.get("m")?.as_str()?.to_string(),
        used_bytes: lenient_u64(obj.get("u")?)?,
        total_bytes: lenient_u64(obj.get("t")?)?,
    })
}

fn decode_disks(v: &Value) -> Option<Vec<DiskUsage>> {
    v.as_array()?.iter().map(decode_disk).collect()
}

/// Decode one `/report` body into a patch. Fails only when the body is not
/// a JSON object; the caller keeps its prior report on failure.
pub fn decode_report(body: &str) -> Result<ReportPatch, DecodeError> {
    let value: Value = serde_json::from_str(body)?;
    let obj = value.as_object().ok_or(DecodeError::NotAnObject)?;

    Ok(ReportPatch {
        timestamp: obj
            .get("t")
            .and_then(Value::as_str)
            .map(|s| s.to_string()),
        cpu_cores: obj.get("c").and_then(decode_cpu_cores),
        memory: obj.get("m").and_then(decode_memory),
        disks: obj.get("d").and_then(decode_disks),
    })
}

/// Decode one `/usbstate` body. A well-formed `{r: 200, state: n}` maps to
/// Online/Offline; any other parseable JSON is `Invalid`. Unparseable
/// bodies are the caller's transport-failure path (`Error`).
pub fn decode_usb_state(body: &str) -> Result<UsbLinkState, DecodeError> {
    let value: Value = serde_json::from_str(body)?;
    let Some(obj) = value.as_object() else {
        return Ok(UsbLinkState::Invalid);
    };
    let code = obj.get("r").and_then(lenient_u64);
    let state = obj.get("state").and_then(lenient_u64);
    match (code, state) {
        (Some(200), Some(0)) => Ok(UsbLinkState::Offline),
        (Some(200), Some(_)) => Ok(UsbLinkState::Online),
        _ => Ok(UsbLinkState::Invalid),
    }
}
