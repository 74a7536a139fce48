use serde::{Deserialize, Serialize};

/// Persisted form of an encrypted license.
///
/// `encrypted_license` = base64(ciphertext || tag)
/// `encrypted_private_key` = base64(wrapped data key)
///
/// Missing fields deserialize as empty strings and are rejected on decrypt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseResult {
    #[serde(rename = "EncryptedLicense", default)]
    pub encrypted_license: String,
    #[serde(rename = "EncryptedPrivateKey", default)]
    pub encrypted_private_key: String,
}
