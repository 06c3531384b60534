//! Browser and clipboard delegation
//!
//! Desktop actions shell out to the system tools: xdg-open for the browser,
//! wl-copy (Wayland) or xclip (X11) for the clipboard.

use std::io::Write;
use std::process::{Command, Stdio};

/// Open a URL in the default browser.
pub fn open_in_browser(url: &str) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(url)
        .spawn()
        .map_err(|e| format!("Failed to open {}: {}", url, e))?;
    Ok(())
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    // Try wl-copy first (Wayland)
    let mut wl_copy = Command::new("wl-copy");
    if pipe_to(&mut wl_copy, text) {
        return Ok(());
    }

    // Try xclip (X11)
    let mut xclip = Command::new("xclip");
    xclip.args(["-selection", "clipboard"]);
    if pipe_to(&mut xclip, text) {
        return Ok(());
    }

    Err("No clipboard tool available (need wl-copy or xclip)".to_string())
}

/// Write text to a command's stdin and wait for it to finish.
fn pipe_to(cmd: &mut Command, text: &str) -> bool {
    let child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match child {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                if stdin.write_all(text.as_bytes()).is_err() {
                    return false;
                }
            }
            child.wait().map(|status| status.success()).unwrap_or(false)
        }
        Err(_) => false,
    }
}
