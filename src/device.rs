//! HTTP client for the device's fixed endpoint surface.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::decode::{self, DecodeError};
use crate::keycodes::Modifiers;
use crate::types::{ReportPatch, UsbLinkState};

// Device requests are tiny; a hung link should surface as a poll Error
// well before the next re-arm piles up behind it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] DecodeError),
    #[error("invalid device url {url}: {reason}")]
    BadUrl { url: String, reason: String },
}

#[derive(Debug, Serialize)]
struct KeySpecForm {
    #[serde(rename = "mod")]
    modifiers: u8,
    chr: u8,
}

#[derive(Debug, Serialize)]
struct KeyStringForm<'a> {
    #[serde(rename = "mod")]
    modifiers: u8,
    #[serde(rename = "str")]
    text: &'a str,
}

/// Thin client bound to one device base address. Cheap to clone; relay
/// sends run on clones in fire-and-forget tasks.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base: String,
}

impl DeviceClient {
    pub fn new(base_url: &str) -> Result<Self, DeviceError> {
        let bad = |reason: String| DeviceError::BadUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| bad(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(bad("expected an http(s) address".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// GET `/usbstate` and decode the link state. `Invalid` is a decoded
    /// value; an `Err` here is the caller's `Error` display state.
    pub async fn usb_state(&self) -> Result<UsbLinkState, DeviceError> {
        let body = self
            .http
            .get(format!("{}/usbstate", self.base))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(decode::decode_usb_state(&body)?)
    }

    /// GET `/report` and decode the telemetry patch.
    pub async fn report(&self) -> Result<ReportPatch, DeviceError> {
        let body = self
            .http
            .get(format!("{}/report", self.base))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(decode::decode_report(&body)?)
    }

    /// POST `/kbdspec`: one special key with the current modifier mask.
    pub async fn send_special(&self, modifiers: Modifiers, keycode: u8) -> Result<(), DeviceError> {
        self.http
            .post(format!("{}/kbdspec", self.base))
            .form(&KeySpecForm {
                modifiers: modifiers.mask(),
                chr: keycode,
            })
            .send()
            .await?
            .error_for_status()?;
        debug!(keycode, mask = modifiers.mask(), "special key sent");
        Ok(())
    }

    /// POST `/kbdstr`: a string for the device to type. Empty strings are
    /// sendable; the device is authoritative on acceptance.
    pub async fn send_text(&self, modifiers: Modifiers, text: &str) -> Result<(), DeviceError> {
        self.http
            .post(format!("{}/kbdstr", self.base))
            .form(&KeyStringForm {
                modifiers: modifiers.mask(),
                text,
            })
            .send()
            .await?
            .error_for_status()?;
        debug!(len = text.len(), mask = modifiers.mask(), "string sent");
        Ok(())
    }

    /// GET `/usbrst`: fire-and-forget reset trigger, response ignored.
    pub async fn reset_usb(&self) -> Result<(), DeviceError> {
        self.http
            .get(format!("{}/usbrst", self.base))
            .send()
            .await?;
        debug!("usb reset triggered");
        Ok(())
    }
}
