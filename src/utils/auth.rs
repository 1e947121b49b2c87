use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;

/// Key/secret pair for the tagging service. Read once at startup.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// `Authorization` value for HTTP Basic auth: `Basic base64(key:secret)`.
    pub fn authorization_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.key, self.secret));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}
