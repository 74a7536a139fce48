use license_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LicenseError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Malformed {field}")]
    Format {
        field: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cryptographic failure")]
    Cryptographic(#[source] CryptoError),

    /// Same message for wrap-step and tag failures.
    #[error("Decryption failed: license invalid or tenant mismatch")]
    DecryptionFailed(#[source] CryptoError),

    #[error("Invalid license JSON")]
    Json(#[from] serde_json::Error),
}

impl LicenseError {
    pub(crate) fn empty(what: &str) -> Self {
        Self::Argument(format!("{what} must not be empty"))
    }

    pub(crate) fn format(
        field: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Format {
            field,
            source: source.into(),
        }
    }

    /// Short kind label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Argument(_) => "argument",
            Self::Format { .. } => "format",
            Self::Cryptographic(_) => "cryptographic",
            Self::DecryptionFailed(_) => "decryption_failed",
            Self::Json(_) => "json",
        }
    }
}
