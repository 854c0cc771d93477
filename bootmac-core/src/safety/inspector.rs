//! Interprets `diskutil info` output.
//!
//! This is a heuristic over free text. It is kept behind [`DiskDescriptor`] so a
//! structured source (`diskutil info -plist`) can replace it without touching the
//! guards in `safety`.

use super::DiskIdentifier;
use bootmac_hal::{combined_output, DiskUtilOps, SystemHal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Internal,
    External,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Usb,
    Thunderbolt,
    Other(String),
    Unknown,
}

impl Transport {
    /// Bus-powered, hot-pluggable transports.
    pub fn is_hot_pluggable(&self) -> bool {
        matches!(self, Transport::Usb | Transport::Thunderbolt)
    }
}

/// What `diskutil info` says about a disk. Never cached: media can change
/// between invocations.
///
/// `attachment` and `transport` describe the last matching line. Eligibility uses
/// the marker flags, which only ever get set, so a later contradicting line cannot
/// cancel an earlier marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskDescriptor {
    pub attachment: Attachment,
    pub removable: bool,
    pub transport: Transport,
    /// `Device Location: External` seen.
    pub external_location: bool,
    /// `Internal: No` seen.
    pub internal_no: bool,
    /// `Protocol: USB` or `Protocol: Thunderbolt` seen.
    pub hot_pluggable: bool,
    /// Unparsed inspection text, kept for diagnostics.
    pub raw: String,
}

/// `Key:   Value` -> (`key`, `value`), lower-cased with whitespace collapsed.
fn key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.split_whitespace().collect::<Vec<_>>().join(" ");
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
    Some((key.to_ascii_lowercase(), value.to_ascii_lowercase()))
}

impl DiskDescriptor {
    pub fn from_diskutil_info(text: &str) -> Self {
        let mut descriptor = DiskDescriptor {
            attachment: Attachment::Unknown,
            removable: false,
            transport: Transport::Unknown,
            external_location: false,
            internal_no: false,
            hot_pluggable: false,
            raw: text.to_string(),
        };

        for (key, value) in text.lines().filter_map(key_value) {
            match key.as_str() {
                "removable media" => {
                    descriptor.removable |= matches!(value.as_str(), "yes" | "removable");
                }
                "protocol" => {
                    descriptor.transport = match value.split_whitespace().next() {
                        Some("usb") => Transport::Usb,
                        Some("thunderbolt") => Transport::Thunderbolt,
                        Some(other) => Transport::Other(other.to_string()),
                        None => Transport::Unknown,
                    };
                    descriptor.hot_pluggable |= descriptor.transport.is_hot_pluggable();
                }
                "device location" => match value.as_str() {
                    "external" => {
                        descriptor.attachment = Attachment::External;
                        descriptor.external_location = true;
                    }
                    "internal" => descriptor.attachment = Attachment::Internal,
                    _ => {}
                },
                "internal" => match value.as_str() {
                    "no" => {
                        descriptor.attachment = Attachment::External;
                        descriptor.internal_no = true;
                    }
                    "yes" => descriptor.attachment = Attachment::Internal,
                    _ => {}
                },
                _ => {}
            }
        }

        descriptor
    }

    /// Any single marker is enough: removable media, USB / Thunderbolt transport,
    /// external location, or not internal.
    pub fn is_eligible_for_write(&self) -> bool {
        self.removable || self.hot_pluggable || self.external_location || self.internal_no
    }
}

/// Run `diskutil info` for an identifier.
///
/// `Err` carries a human-readable reason: launch failure, non-zero exit or empty output.
pub fn inspect<H: SystemHal + ?Sized>(
    hal: &H,
    identifier: &DiskIdentifier,
) -> Result<DiskDescriptor, String> {
    let output = hal
        .diskutil_info(identifier.as_str())
        .map_err(|err| format!("disk inspection failed: {}", err))?;

    if !output.status.success() {
        let diagnostic = combined_output(&output);
        return Err(if diagnostic.is_empty() {
            format!("diskutil info exited with {:?}", output.status.code())
        } else {
            diagnostic
        });
    }

    let text = String::from_utf8_lossy(&output.stdout).to_string();
    if text.trim().is_empty() {
        return Err("diskutil info produced no output".to_string());
    }

    Ok(DiskDescriptor::from_diskutil_info(&text))
}
