//! Purpose: Hold the immutable connection settings for one table store instance.
//! Exports: `ClientConfig`.
//! Role: Built once by the host (CLI, adapters) and handed to `TableClient::new`.
//! Invariants: The password is never printed through `Debug`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::time::Duration;

#[derive(Clone, Eq, PartialEq)]
pub struct ClientConfig {
    pub instance_url: String,
    pub username: String,
    pub password: String,
    /// Applied to each request as a whole; expiry surfaces as a transport error.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(
        instance_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            instance_url: instance_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `Basic base64(username:password)`.
    pub fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("instance_url", &self.instance_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
