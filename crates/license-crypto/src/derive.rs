//! Deterministic per-tenant key and nonce derivation (SHA-256).
//!
//! wrap key = SHA-256(tenant_id)
//! nonce    = SHA-256(prefix || tenant_id)[..12]
//!
//! The prefix keeps the two preimages distinct, so the nonce is never a
//! truncation of the wrap key.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::error::CryptoError;
use crate::types::{
    PayloadNonce, WrapKey, AES_GCM_NONCE_LENGTH, AES_KEY_LENGTH, DEFAULT_NONCE_PREFIX,
};

fn validate_tenant_id(tenant_id: &str) -> Result<(), CryptoError> {
    if tenant_id.trim().is_empty() {
        return Err(CryptoError::EmptyTenantId);
    }
    Ok(())
}

/// Derive the 32-byte wrap key for a tenant.
pub fn derive_wrap_key(tenant_id: &str) -> Result<WrapKey, CryptoError> {
    validate_tenant_id(tenant_id)?;
    let mut digest = Sha256::digest(tenant_id.as_bytes());
    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    key.copy_from_slice(&digest);
    digest.as_mut_slice().zeroize();
    Ok(WrapKey::from_bytes(*key))
}

/// Derive the 12-byte payload nonce for a tenant using the default prefix.
pub fn derive_nonce(tenant_id: &str) -> Result<PayloadNonce, CryptoError> {
    derive_nonce_with_prefix(tenant_id, DEFAULT_NONCE_PREFIX)
}

/// Derive the 12-byte payload nonce for a tenant.
///
/// # Arguments
/// * `tenant_id` - Stable tenant identifier
/// * `prefix` - Domain-separation prefix hashed before the identifier
pub fn derive_nonce_with_prefix(
    tenant_id: &str,
    prefix: &str,
) -> Result<PayloadNonce, CryptoError> {
    validate_tenant_id(tenant_id)?;
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(tenant_id.as_bytes());
    let digest = hasher.finalize();

    let mut nonce = [0u8; AES_GCM_NONCE_LENGTH];
    nonce.copy_from_slice(&digest[..AES_GCM_NONCE_LENGTH]);
    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_key_is_sha256_of_tenant_id() {
        let key = derive_wrap_key("abc").unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn nonce_is_truncated_prefixed_hash() {
        let nonce = derive_nonce("abc").unwrap();
        assert_eq!(hex::encode(nonce), "5d576b815612cb77143d86c9");
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            derive_wrap_key("42").unwrap().as_bytes(),
            derive_wrap_key("42").unwrap().as_bytes()
        );
        assert_eq!(derive_nonce("42").unwrap(), derive_nonce("42").unwrap());
    }

    #[test]
    fn different_tenants_different_outputs() {
        assert_ne!(
            derive_wrap_key("42").unwrap().as_bytes(),
            derive_wrap_key("43").unwrap().as_bytes()
        );
        assert_ne!(derive_nonce("42").unwrap(), derive_nonce("43").unwrap());
    }

    #[test]
    fn nonce_is_not_a_wrap_key_prefix() {
        let key = derive_wrap_key("tenant-7").unwrap();
        let nonce = derive_nonce("tenant-7").unwrap();
        assert_ne!(&key.as_bytes()[..AES_GCM_NONCE_LENGTH], &nonce[..]);
    }

    #[test]
    fn prefix_changes_nonce() {
        let a = derive_nonce_with_prefix("42", "nonce:").unwrap();
        let b = derive_nonce_with_prefix("42", "iv:").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(derive_wrap_key(""), Err(CryptoError::EmptyTenantId)));
        assert!(matches!(derive_wrap_key("  \t"), Err(CryptoError::EmptyTenantId)));
        assert!(matches!(derive_nonce(""), Err(CryptoError::EmptyTenantId)));
        assert!(matches!(derive_nonce(" "), Err(CryptoError::EmptyTenantId)));
    }
}
