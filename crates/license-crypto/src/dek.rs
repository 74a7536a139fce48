//! Per-license Data Key primitives.
//!
//! Every encryption gets a fresh random 256-bit data key. The payload is
//! encrypted with the data key; the data key is wrapped with the tenant's
//! wrap key using AES-256-CBC with PKCS7 padding and an all-zero IV.
//!
//! Wrapped data key wire format: [AES-CBC(wrap key, data key || pad16)] = 48 bytes

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::types::{DataKey, WrapKey, AES_BLOCK_LENGTH, AES_KEY_LENGTH, WRAPPED_DATA_KEY_SIZE};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Fixed IV for the wrap step. Safe only because the wrapped plaintext is a
/// fresh random key on every call.
const WRAP_IV: [u8; AES_BLOCK_LENGTH] = [0u8; AES_BLOCK_LENGTH];

/// Generate a random 256-bit data key.
///
/// Must stay random per call: the payload nonce is fixed per tenant.
pub fn generate_data_key() -> Result<DataKey, CryptoError> {
    let mut bytes = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    getrandom::getrandom(&mut bytes[..]).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(DataKey::from_bytes(*bytes))
}

/// Wrap a data key under the tenant wrap key.
///
/// # Returns
/// 48-byte wrapped key: AES-256-CBC(wrap_key, IV=0, PKCS7(data_key))
pub fn wrap_data_key(data_key: &DataKey, wrap_key: &WrapKey) -> Result<Vec<u8>, CryptoError> {
    let encryptor = Aes256CbcEnc::new_from_slices(wrap_key.as_bytes(), &WRAP_IV)
        .map_err(|e| CryptoError::WrapFailed(e.to_string()))?;
    let wrapped = encryptor.encrypt_padded_vec_mut::<Pkcs7>(data_key.as_bytes());

    if wrapped.len() != WRAPPED_DATA_KEY_SIZE {
        return Err(CryptoError::WrapFailed(format!(
            "unexpected wrapped length {}",
            wrapped.len()
        )));
    }
    Ok(wrapped)
}

/// Unwrap a data key with the tenant wrap key.
///
/// A wrong wrap key usually fails the padding check. When the padding
/// happens to verify, the recovered length is checked; a wrong key that
/// survives both is only caught by payload authentication.
pub fn unwrap_data_key(wrapped: &[u8], wrap_key: &WrapKey) -> Result<DataKey, CryptoError> {
    if wrapped.len() != WRAPPED_DATA_KEY_SIZE {
        return Err(CryptoError::InvalidWrappedKeyLength {
            expected: WRAPPED_DATA_KEY_SIZE,
            got: wrapped.len(),
        });
    }

    let decryptor = Aes256CbcDec::new_from_slices(wrap_key.as_bytes(), &WRAP_IV)
        .map_err(|e| CryptoError::UnwrapFailed(e.to_string()))?;
    let unwrapped = Zeroizing::new(
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(wrapped)
            .map_err(|e| CryptoError::UnwrapFailed(e.to_string()))?,
    );

    if unwrapped.len() != AES_KEY_LENGTH {
        return Err(CryptoError::UnwrapFailed(format!(
            "recovered key has {} bytes",
            unwrapped.len()
        )));
    }

    let mut bytes = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    bytes.copy_from_slice(&unwrapped);
    Ok(DataKey::from_bytes(*bytes))
}
