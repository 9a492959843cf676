//! Azure AD authentication module.
//!
//! Provides the OAuth2 client-credentials grant and the zeroizing
//! wrappers for the client secret and bearer token.

pub mod oauth;
pub mod secret;

pub use oauth::OAuth2Client;
pub use secret::{AccessToken, SecretString};
