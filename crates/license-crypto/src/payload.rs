//! AES-256-GCM payload cipher.
//!
//! Transport format: [N bytes: ciphertext][16 bytes: tag]
//! The nonce is not carried; it is re-derived from the tenant identifier.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};

use crate::error::CryptoError;
use crate::types::{DataKey, PayloadNonce, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};

/// Payload ciphertext with its detached authentication tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    pub ciphertext: Vec<u8>,
    pub tag: [u8; AES_GCM_TAG_LENGTH],
}

impl SealedPayload {
    /// Concatenate as `ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ciphertext.len() + AES_GCM_TAG_LENGTH);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Split `ciphertext || tag` on the fixed tag length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < AES_GCM_TAG_LENGTH {
            return Err(CryptoError::DataTooShort);
        }
        let split = bytes.len() - AES_GCM_TAG_LENGTH;
        let mut tag = [0u8; AES_GCM_TAG_LENGTH];
        tag.copy_from_slice(&bytes[split..]);
        Ok(Self {
            ciphertext: bytes[..split].to_vec(),
            tag,
        })
    }
}

fn cipher_for(data_key: &DataKey) -> Result<Aes256Gcm, CryptoError> {
    Aes256Gcm::new_from_slice(data_key.as_bytes()).map_err(|_| CryptoError::InvalidKeyLength {
        expected: AES_KEY_LENGTH,
        got: data_key.as_bytes().len(),
    })
}

/// Encrypt a payload with AES-256-GCM and no associated data.
pub fn encrypt_payload(
    plaintext: &[u8],
    data_key: &DataKey,
    nonce: &PayloadNonce,
) -> Result<SealedPayload, CryptoError> {
    let cipher = cipher_for(data_key)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut tag_bytes = [0u8; AES_GCM_TAG_LENGTH];
    tag_bytes.copy_from_slice(&tag);
    Ok(SealedPayload {
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Authenticate and decrypt a payload.
///
/// Fails closed: on tag mismatch no plaintext is returned.
pub fn decrypt_payload(
    ciphertext: &[u8],
    tag: &[u8],
    data_key: &DataKey,
    nonce: &PayloadNonce,
) -> Result<Vec<u8>, CryptoError> {
    if tag.len() != AES_GCM_TAG_LENGTH {
        return Err(CryptoError::InvalidTagLength {
            expected: AES_GCM_TAG_LENGTH,
            got: tag.len(),
        });
    }
    let cipher = cipher_for(data_key)?;
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buffer,
            Tag::from_slice(tag),
        )
        .map_err(|_| CryptoError::AuthenticationFailed)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dek::generate_data_key;
    use crate::derive::derive_nonce;

    const NONCE: PayloadNonce = [7u8; 12];

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = generate_data_key().unwrap();
        let sealed = encrypt_payload(b"Hello, World!", &key, &NONCE).unwrap();
        let plain = decrypt_payload(&sealed.ciphertext, &sealed.tag, &key, &NONCE).unwrap();
        assert_eq!(plain, b"Hello, World!");
    }

    #[test]
    fn ciphertext_length_matches_plaintext() {
        let key = generate_data_key().unwrap();
        let sealed = encrypt_payload(&[0u8; 37], &key, &NONCE).unwrap();
        assert_eq!(sealed.ciphertext.len(), 37);
        assert_eq!(sealed.to_bytes().len(), 37 + AES_GCM_TAG_LENGTH);
    }

    #[test]
    fn known_answer() {
        let key = DataKey::from_bytes([0x11; 32]);
        let nonce = derive_nonce("abc").unwrap();
        let sealed = encrypt_payload(br#"{"seats":5}"#, &key, &nonce).unwrap();
        assert_eq!(hex::encode(&sealed.ciphertext), "13c306e8a634868bcfbda8");
        assert_eq!(hex::encode(sealed.tag), "7d1cea3425025cd8a2bf0e6bfee13d5f");
    }

    #[test]
    fn fresh_key_changes_ciphertext_under_same_nonce() {
        let k1 = generate_data_key().unwrap();
        let k2 = generate_data_key().unwrap();
        let a = encrypt_payload(b"same", &k1, &NONCE).unwrap();
        let b = encrypt_payload(b"same", &k2, &NONCE).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_tampered_ciphertext() {
        let key = generate_data_key().unwrap();
        let mut sealed = encrypt_payload(b"secret", &key, &NONCE).unwrap();
        sealed.ciphertext[0] ^= 0x01;
        let err = decrypt_payload(&sealed.ciphertext, &sealed.tag, &key, &NONCE).unwrap_err();
        assert!(matches!(err, CryptoError::AuthenticationFailed));
    }

    #[test]
    fn rejects_tampered_tag() {
        let key = generate_data_key().unwrap();
        let mut sealed = encrypt_payload(b"secret", &key, &NONCE).unwrap();
        sealed.tag[15] ^= 0x80;
        assert!(matches!(
            decrypt_payload(&sealed.ciphertext, &sealed.tag, &key, &NONCE),
            Err(CryptoError::AuthenticationFailed)
        ));
    }

    #[test]
    fn wrong_key_or_nonce_fails() {
        let key = generate_data_key().unwrap();
        let other = generate_data_key().unwrap();
        let sealed = encrypt_payload(b"secret", &key, &NONCE).unwrap();
        assert!(decrypt_payload(&sealed.ciphertext, &sealed.tag, &other, &NONCE).is_err());
        assert!(decrypt_payload(&sealed.ciphertext, &sealed.tag, &key, &[8u8; 12]).is_err());
    }

    #[test]
    fn rejects_short_tag() {
        let key = generate_data_key().unwrap();
        let err = decrypt_payload(b"abc", &[0u8; 8], &key, &NONCE).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidTagLength { got: 8, .. }));
    }

    #[test]
    fn split_concatenated_form() {
        let key = generate_data_key().unwrap();
        let sealed = encrypt_payload(b"payload", &key, &NONCE).unwrap();
        let parsed = SealedPayload::from_bytes(&sealed.to_bytes()).unwrap();
        assert_eq!(parsed, sealed);
    }

    #[test]
    fn split_rejects_truncated() {
        let err = SealedPayload::from_bytes(&[0u8; 15]).unwrap_err();
        assert!(err.to_string().contains("too short"));
        // Exactly one tag and no ciphertext is structurally valid.
        assert!(SealedPayload::from_bytes(&[0u8; 16]).unwrap().ciphertext.is_empty());
    }

    #[test]
    fn handles_large_data() {
        let key = generate_data_key().unwrap();
        let mut plaintext = vec![0u8; 100 * 1024];
        getrandom::getrandom(&mut plaintext).unwrap();
        let sealed = encrypt_payload(&plaintext, &key, &NONCE).unwrap();
        let plain = decrypt_payload(&sealed.ciphertext, &sealed.tag, &key, &NONCE).unwrap();
        assert_eq!(plain, plaintext);
    }
}
