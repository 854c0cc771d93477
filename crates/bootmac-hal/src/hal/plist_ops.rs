//! Property list lookups through `PlistBuddy`.

use super::diskutil_ops::QUERY_TIMEOUT;
use super::ProcessOps;
use crate::HalResult;
use std::path::Path;

pub const PLIST_BUDDY: &str = "/usr/libexec/PlistBuddy";

pub trait PlistOps: ProcessOps {
    /// Read a top-level string value by key.
    ///
    /// Returns `Ok(None)` when PlistBuddy exits non-zero (missing key or file) or
    /// prints nothing. Launch failures are still errors.
    fn plist_string(&self, plist: &Path, key: &str) -> HalResult<Option<String>> {
        let command = format!("Print :{}", key);
        let path = plist.display().to_string();
        let output = self.command_output(
            PLIST_BUDDY,
            &["-c", &command, &path],
            Some(QUERY_TIMEOUT),
        )?;
        if !output.status.success() {
            log::debug!(
                "PlistBuddy could not read {} from {} (exit={:?})",
                key,
                path,
                output.status.code()
            );
            return Ok(None);
        }
        let value = String::from_utf8(output.stdout)?.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }
}

impl<T: ProcessOps + ?Sized> PlistOps for T {}
