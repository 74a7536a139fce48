use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// AES-GCM nonce length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_NONCE_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES block length in bytes; also the CBC IV length.
pub const AES_BLOCK_LENGTH: usize = 16;

/// Size of a wrapped data key: 32 key bytes plus one full PKCS7 padding block.
pub const WRAPPED_DATA_KEY_SIZE: usize = AES_KEY_LENGTH + AES_BLOCK_LENGTH;

/// Default prefix hashed in front of the tenant identifier for nonce derivation.
pub const DEFAULT_NONCE_PREFIX: &str = "nonce:";

/// Payload nonce, derived per tenant.
pub type PayloadNonce = [u8; AES_GCM_NONCE_LENGTH];

/// Per-call random key that encrypts the license payload.
///
/// Zeroed on drop. Never persisted in the clear.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DataKey([u8; AES_KEY_LENGTH]);

impl DataKey {
    pub fn from_bytes(bytes: [u8; AES_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.0
    }
}

/// Tenant key-encryption key, derived from the tenant identifier.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WrapKey([u8; AES_KEY_LENGTH]);

impl WrapKey {
    pub fn from_bytes(bytes: [u8; AES_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DataKey(..)")
    }
}

impl std::fmt::Debug for WrapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WrapKey(..)")
    }
}
