use license_crypto::DEFAULT_NONCE_PREFIX;
use serde::Deserialize;

use crate::error::LicenseError;

/// Codec settings. `nonce_prefix` takes part in what a stored license
/// decrypts to, so it must never change for existing records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Prefix hashed before the tenant identifier when deriving the nonce.
    pub nonce_prefix: String,
    /// Largest accepted payload, in bytes. `None` accepts any size.
    pub max_payload_bytes: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            nonce_prefix: DEFAULT_NONCE_PREFIX.to_string(),
            max_payload_bytes: None,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a JSON config document. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, LicenseError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LicenseError> {
        if self.nonce_prefix.is_empty() {
            return Err(LicenseError::empty("nonce_prefix"));
        }
        if self.max_payload_bytes == Some(0) {
            return Err(LicenseError::Argument(
                "max_payload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
