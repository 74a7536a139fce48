//! Primitives for tenant-scoped license encryption: per-tenant derivation,
//! random data keys, the AES-256-GCM payload cipher and the AES-256-CBC key wrap.

pub mod base64;
pub mod dek;
pub mod derive;
pub mod error;
pub mod payload;
pub mod types;

pub use base64::{base64_decode, base64_encode};
pub use dek::{generate_data_key, unwrap_data_key, wrap_data_key};
pub use derive::{derive_nonce, derive_nonce_with_prefix, derive_wrap_key};
pub use error::CryptoError;
pub use payload::{decrypt_payload, encrypt_payload, SealedPayload};
pub use types::{
    DataKey, PayloadNonce, WrapKey, AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH,
    DEFAULT_NONCE_PREFIX, WRAPPED_DATA_KEY_SIZE,
};
