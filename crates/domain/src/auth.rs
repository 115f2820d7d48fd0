use serde::{Deserialize, Serialize};

/// Length of a descriptor cookie in bytes.
pub const DESCRIPTOR_COOKIE_LEN: usize = 16;

/// Client authorization mode configured for a hidden service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    #[default]
    NoAuth,
    Basic,
    Stealth,
}

impl AuthType {
    pub fn requires_authorization(&self) -> bool {
        !matches!(self, AuthType::NoAuth)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAuth => "no_auth",
            Self::Basic => "basic",
            Self::Stealth => "stealth",
        }
    }
}

/// Shared secret used to decrypt a service's introduction points.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptorCookie([u8; DESCRIPTOR_COOKIE_LEN]);

impl DescriptorCookie {
    pub const fn new(bytes: [u8; DESCRIPTOR_COOKIE_LEN]) -> Self {
        Self(bytes)
    }

    /// An all-zero cookie means "no cookie configured".
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; DESCRIPTOR_COOKIE_LEN] {
        &self.0
    }
}

// Never print key material.
impl std::fmt::Debug for DescriptorCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DescriptorCookie(..)")
    }
}
