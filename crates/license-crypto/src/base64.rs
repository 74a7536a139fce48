use base64ct::{Base64, Encoding};

use crate::error::CryptoError;

/// Standard (padded) base64 encode.
pub fn base64_encode(data: &[u8]) -> String {
    Base64::encode_string(data)
}

/// Standard (padded) base64 decode.
pub fn base64_decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(s).map_err(|e| CryptoError::Base64Decode(e.to_string()))
}
