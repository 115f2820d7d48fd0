//! Hidden service identifiers and their base32 text form.
//!
//! Both identifiers use RFC 4648 base32 with the lowercase alphabet
//! `a-z2-7` and no padding. Decoding accepts either case.

use crate::errors::IdentifierError;
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Length of a descriptor id digest in bytes.
pub const DIGEST_LEN: usize = 20;

/// Length of a descriptor id in base32 characters.
pub const DESC_ID_BASE32_LEN: usize = 32;

/// Number of digest bytes kept for a service id.
pub const SERVICE_ID_LEN: usize = 10;

/// Length of a service id in base32 characters.
pub const SERVICE_ID_BASE32_LEN: usize = 16;

const BASE32_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Encode `bytes` as lowercase, unpadded base32.
pub fn base32_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let idx = ((buffer >> bits) & 0x1f) as usize;
            out.push(char::from(BASE32_ALPHABET[idx]));
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        let idx = ((buffer << (5 - bits)) & 0x1f) as usize;
        out.push(char::from(BASE32_ALPHABET[idx]));
    }

    out
}

/// Decode unpadded base32 text. Trailing bits that do not fill a byte are dropped.
pub fn base32_decode(input: &str) -> Result<Vec<u8>, IdentifierError> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for c in input.chars() {
        let value = decode_symbol(c).ok_or(IdentifierError::InvalidCharacter(c))?;
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((buffer >> bits) & 0xff) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(out)
}

fn decode_symbol(c: char) -> Option<u8> {
    match c {
        'a'..='z' => Some(c as u8 - b'a'),
        'A'..='Z' => Some(c as u8 - b'A'),
        '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

fn check_length(input: &str, expected: usize) -> Result<(), IdentifierError> {
    if input.len() != expected {
        return Err(IdentifierError::InvalidLength {
            expected,
            actual: input.len(),
        });
    }
    Ok(())
}

/// 20-byte descriptor id; indexes the directory-side cache.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorId([u8; DIGEST_LEN]);

impl DescriptorId {
    #[inline]
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a 32-character base32 descriptor id.
    pub fn from_base32(input: &str) -> Result<Self, IdentifierError> {
        check_length(input, DESC_ID_BASE32_LEN)?;
        let decoded = base32_decode(input)?;
        let bytes: [u8; DIGEST_LEN] =
            decoded
                .try_into()
                .map_err(|v: Vec<u8>| IdentifierError::InvalidLength {
                    expected: DESC_ID_BASE32_LEN,
                    actual: v.len() * 8 / 5,
                })?;
        Ok(Self(bytes))
    }

    pub fn to_base32(&self) -> String {
        base32_encode(&self.0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base32())
    }
}

impl fmt::Debug for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DescriptorId({})", self.to_base32())
    }
}

impl FromStr for DescriptorId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base32(s)
    }
}

/// Stable hidden service address (without the `.onion` suffix), always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceId(String);

impl ServiceId {
    /// Validate a 16-character base32 service id. Case is folded to lowercase.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        check_length(input, SERVICE_ID_BASE32_LEN)?;
        if let Some(bad) = input.chars().find(|c| decode_symbol(*c).is_none()) {
            return Err(IdentifierError::InvalidCharacter(bad));
        }
        Ok(Self(input.to_ascii_lowercase()))
    }

    /// Service id of a public key: base32 of the first 10 bytes of its SHA-1 digest.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, IdentifierError> {
        if public_key.is_empty() {
            return Err(IdentifierError::EmptyPublicKey);
        }
        let digest = Sha1::digest(public_key);
        Ok(Self(base32_encode(&digest[..SERVICE_ID_LEN])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ServiceId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
