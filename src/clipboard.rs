//! External clipboard helper integration.
//!
//! The terminal interface copies snippet content by piping it to a helper
//! program's stdin. The helper being missing is a reported condition, not a
//! crash; the rest of the session continues.

use std::io::Write;
use std::process::{Command, Stdio};

pub fn copy(helper: &str, text: &str) -> Result<(), String> {
    let mut child = Command::new(helper)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("clipboard helper '{helper}' not found")
            } else {
                format!("failed to run '{helper}': {e}")
            }
        })?;

    // stdin is piped above, so take() always yields a handle
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| format!("failed to write to '{helper}': {e}"))?;
    }

    let status = child
        .wait()
        .map_err(|e| format!("failed to wait for '{helper}': {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("'{helper}' exited with {status}"))
    }
}
