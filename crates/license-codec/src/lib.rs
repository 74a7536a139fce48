//! Tenant-scoped license encryption.
//!
//! A license payload is sealed with a fresh AES-256-GCM data key; the data key
//! is wrapped with a key derived from the tenant identifier. Only the tenant
//! identifier is needed to recover the payload.

pub mod codec;
pub mod config;
pub mod error;
pub mod types;

pub use codec::{decrypt_license, encrypt_license, LicenseCodec};
pub use config::CodecConfig;
pub use error::LicenseError;
pub use types::LicenseResult;
