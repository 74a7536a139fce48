//! License envelope codec.
//!
//! Encrypt: tenant → (wrap key, nonce); fresh data key → AES-GCM(payload) →
//!          AES-CBC wrap(data key) → base64 both
//! Decrypt: base64 → unwrap data key → AES-GCM open → UTF-8

use license_crypto::{
    base64_decode, base64_encode, decrypt_payload, derive_nonce_with_prefix, derive_wrap_key,
    encrypt_payload, generate_data_key, unwrap_data_key, wrap_data_key, CryptoError,
    SealedPayload,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::config::CodecConfig;
use crate::error::LicenseError;
use crate::types::LicenseResult;

const FIELD_LICENSE: &str = "EncryptedLicense";
const FIELD_PRIVATE_KEY: &str = "EncryptedPrivateKey";

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Map a primitive failure that happened before any secret-dependent step.
fn setup_error(e: CryptoError) -> LicenseError {
    match e {
        CryptoError::EmptyTenantId => LicenseError::empty("tenant id"),
        other => LicenseError::Cryptographic(other),
    }
}

/// Stateless license encryptor/decryptor. Cheap to clone, safe to share.
#[derive(Debug, Clone, Default)]
pub struct LicenseCodec {
    config: CodecConfig,
}

impl LicenseCodec {
    pub fn new(config: CodecConfig) -> Result<Self, LicenseError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encrypt a license payload for a tenant.
    ///
    /// Every call draws a new data key, so repeated calls with the same
    /// arguments produce different results.
    pub fn encrypt_license(
        &self,
        payload: &str,
        tenant_id: &str,
    ) -> Result<LicenseResult, LicenseError> {
        if is_blank(payload) {
            return Err(LicenseError::empty("payload"));
        }
        if is_blank(tenant_id) {
            return Err(LicenseError::empty("tenant id"));
        }
        if let Some(max) = self.config.max_payload_bytes {
            if payload.len() > max {
                return Err(LicenseError::Argument(format!(
                    "payload is {} bytes, limit is {max}",
                    payload.len()
                )));
            }
        }

        let wrap_key = derive_wrap_key(tenant_id).map_err(setup_error)?;
        let nonce =
            derive_nonce_with_prefix(tenant_id, &self.config.nonce_prefix).map_err(setup_error)?;
        let data_key = generate_data_key().map_err(LicenseError::Cryptographic)?;

        let sealed = encrypt_payload(payload.as_bytes(), &data_key, &nonce)
            .map_err(LicenseError::Cryptographic)?;
        let wrapped = wrap_data_key(&data_key, &wrap_key).map_err(LicenseError::Cryptographic)?;

        debug!(payload_bytes = payload.len(), "license encrypted");

        Ok(LicenseResult {
            encrypted_license: base64_encode(&sealed.to_bytes()),
            encrypted_private_key: base64_encode(&wrapped),
        })
    }

    /// Decrypt a stored license with the tenant identifier it was issued for.
    pub fn decrypt_license(
        &self,
        result: &LicenseResult,
        tenant_id: &str,
    ) -> Result<String, LicenseError> {
        let outcome = self.open(result, tenant_id);
        match &outcome {
            Ok(payload) => debug!(payload_bytes = payload.len(), "license decrypted"),
            Err(e) => warn!(kind = e.kind(), "license decryption failed"),
        }
        outcome
    }

    fn open(&self, result: &LicenseResult, tenant_id: &str) -> Result<String, LicenseError> {
        if is_blank(&result.encrypted_license) {
            return Err(LicenseError::empty(FIELD_LICENSE));
        }
        if is_blank(&result.encrypted_private_key) {
            return Err(LicenseError::empty(FIELD_PRIVATE_KEY));
        }
        if is_blank(tenant_id) {
            return Err(LicenseError::empty("tenant id"));
        }

        let license_bytes = base64_decode(&result.encrypted_license)
            .map_err(|e| LicenseError::format(FIELD_LICENSE, e))?;
        let wrapped = base64_decode(&result.encrypted_private_key)
            .map_err(|e| LicenseError::format(FIELD_PRIVATE_KEY, e))?;

        let sealed = SealedPayload::from_bytes(&license_bytes)
            .map_err(|e| LicenseError::format(FIELD_LICENSE, e))?;

        // A wrapped key of the wrong size is a Cryptographic failure; padding
        // and recovered-length failures share the authentication message.
        let wrap_key = derive_wrap_key(tenant_id).map_err(setup_error)?;
        let data_key = unwrap_data_key(&wrapped, &wrap_key).map_err(|e| match e {
            CryptoError::UnwrapFailed(_) => LicenseError::DecryptionFailed(e),
            other => LicenseError::Cryptographic(other),
        })?;
        let nonce =
            derive_nonce_with_prefix(tenant_id, &self.config.nonce_prefix).map_err(setup_error)?;

        let plaintext = Zeroizing::new(
            decrypt_payload(&sealed.ciphertext, &sealed.tag, &data_key, &nonce).map_err(
                |e| match e {
                    CryptoError::AuthenticationFailed => LicenseError::DecryptionFailed(e),
                    other => LicenseError::Cryptographic(other),
                },
            )?,
        );

        String::from_utf8(plaintext.to_vec()).map_err(|e| LicenseError::format("payload", e))
    }

    /// Serialize `value` to JSON and encrypt it.
    pub fn encrypt_license_json<T: Serialize>(
        &self,
        value: &T,
        tenant_id: &str,
    ) -> Result<LicenseResult, LicenseError> {
        let payload = Zeroizing::new(serde_json::to_string(value)?);
        self.encrypt_license(&payload, tenant_id)
    }

    /// Decrypt and deserialize a JSON license payload.
    pub fn decrypt_license_json<T: DeserializeOwned>(
        &self,
        result: &LicenseResult,
        tenant_id: &str,
    ) -> Result<T, LicenseError> {
        let payload = Zeroizing::new(self.decrypt_license(result, tenant_id)?);
        Ok(serde_json::from_str(&payload)?)
    }
}

/// Encrypt with the default codec settings.
pub fn encrypt_license(payload: &str, tenant_id: &str) -> Result<LicenseResult, LicenseError> {
    LicenseCodec::default().encrypt_license(payload, tenant_id)
}

/// Decrypt with the default codec settings.
pub fn decrypt_license(result: &LicenseResult, tenant_id: &str) -> Result<String, LicenseError> {
    LicenseCodec::default().decrypt_license(result, tenant_id)
}
