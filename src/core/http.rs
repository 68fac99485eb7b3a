use std::time::Duration;

use reqwest::blocking::Client;

use crate::core::ReflinksError;

/// Blocking client with a per-call timeout. Every network action in the app
/// runs on the UI thread, so the timeout is what bounds a frozen frame.
pub fn client(timeout: Duration) -> Result<Client, ReflinksError> {
    Client::builder()
        .timeout(timeout)
        .user_agent("reflinks/0.3 (+reqwest)")
        .build()
        .map_err(|e| ReflinksError::Custom(format!("HTTP client build failed: {e}")))
}
