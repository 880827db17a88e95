use serde::{Deserialize, Serialize};

/// Address used when no proxy header identifies the caller.
pub const LOCAL_ADDRESS: &str = "127.0.0.1";

/// Who sent a request, as far as the headers tell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl ClientMetadata {
    pub fn new(ip_address: impl Into<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent,
        }
    }
}

impl Default for ClientMetadata {
    fn default() -> Self {
        Self::new(LOCAL_ADDRESS, None)
    }
}
