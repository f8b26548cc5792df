//! Basic-style credential decoding (`<scheme> <base64(user:secret)>`).

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// The `Authorization` header was present but could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedCredentialsError {
    #[error("authorization header carries no credentials token")]
    MissingToken,

    #[error("credentials token is not valid base64")]
    InvalidEncoding,

    #[error("credentials have no ':' separator")]
    MissingSeparator,
}

/// Identity carried by a decoded credential. The secret is checked for shape
/// and then dropped; it is never kept or logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
}

impl BasicCredentials {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Interpret raw header bytes as ISO-8859-1 text (every byte is a code point).
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode an authorization header value.
///
/// The scheme word is not interpreted; the second whitespace-separated token
/// must be standard base64 of `user:secret` in ISO-8859-1. The returned
/// username is upper-cased.
pub fn decode_basic_credentials(header: &str) -> Result<BasicCredentials, MalformedCredentialsError> {
    let token = header
        .split_whitespace()
        .nth(1)
        .ok_or(MalformedCredentialsError::MissingToken)?;

    let raw = STANDARD
        .decode(token)
        .map_err(|_| MalformedCredentialsError::InvalidEncoding)?;
    let decoded = decode_latin1(&raw);

    let (user, _secret) = decoded
        .split_once(':')
        .ok_or(MalformedCredentialsError::MissingSeparator)?;

    Ok(BasicCredentials {
        username: user.to_uppercase(),
    })
}
