//! Secret wrappers that are zeroized on drop.
//!
//! The client secret and the bearer token are cleared from memory when
//! they're no longer needed and never show up in `Debug` output.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string wrapper that zeroizes its contents on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Bearer token shared read-only by every authorized call in a run.
///
/// Never refreshed: a run is expected to finish well within the token lifetime.
#[derive(Clone, Debug)]
pub struct AccessToken {
    value: SecretString,
}

impl AccessToken {
    pub fn new(value: String) -> Self {
        Self {
            value: SecretString::new(value),
        }
    }

    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_debug() {
        let secret = SecretString::new("super_secret_value".to_string());
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "[REDACTED]");
        assert!(!debug_output.contains("super_secret"));
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("eyJ0eXAi".to_string());
        let debug_output = format!("{:?}", token);
        assert!(!debug_output.contains("eyJ0eXAi"));
        assert_eq!(token.as_str(), "eyJ0eXAi");
    }
}
