//! # EduExtra Auth
//!
//! Stateless bearer token issuance and validation for the EduExtra API.
//!
//! This crate provides:
//!
//! - [`claims`]: claim, role and identity types
//! - [`clock`]: injectable time sources
//! - [`key`]: the HMAC signing key
//! - [`codec`]: the compact `<claims>.<signature>` token format
//! - [`service`]: [`TokenService`], the only component that mints or validates tokens
//!
//! # Token Types
//!
//! - **Access Token**: short-lived, authorizes resource requests
//! - **Refresh Token**: long-lived, only accepted by the refresh flow
//!
//! There is no server-side token store. A token is valid iff its signature
//! verifies under the deployment key and the clock is before its expiry.

pub mod claims;
pub mod clock;
pub mod codec;
pub mod error;
pub mod key;
pub mod service;

// Re-export commonly used types at crate root
pub use claims::{Claims, Principal, Role, SignedToken, TokenKind, TokenPair, UnknownRole};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TokenError;
pub use key::{KeyError, SigningKey};
pub use service::TokenService;
