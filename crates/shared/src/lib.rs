//! # frigate-config-shared
//!
//! Shared result types, error envelopes, and redaction helpers for the
//! frigate-config workspace.
//!
//! - `ErrorEnvelope` is the boundary error type every crate converts into.
//! - Redaction helpers keep secrets (API keys, passwords) out of messages.
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod redaction;
pub mod result;

pub use errors::{
    ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, redact_metadata,
};
pub use redaction::{REDACTED, is_secret_key, redact_if_secret};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
