use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Tenant identifier must not be empty")]
    EmptyTenantId,

    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid tag length: expected {expected} bytes, got {got}")]
    InvalidTagLength { expected: usize, got: usize },

    #[error("Encrypted data too short")]
    DataTooShort,

    #[error("Invalid wrapped key length: expected {expected} bytes, got {got}")]
    InvalidWrappedKeyLength { expected: usize, got: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed: tag mismatch")]
    AuthenticationFailed,

    #[error("AES-CBC wrap failed: {0}")]
    WrapFailed(String),

    #[error("AES-CBC unwrap failed: {0}")]
    UnwrapFailed(String),

    #[error("Base64 decode error: {0}")]
    Base64Decode(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
