use thiserror::Error;

/// Malformed identifiers (descriptor ids, service ids) and failed derivations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid identifier length: expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid base32 character: {0:?}")]
    InvalidCharacter(char),

    #[error("Cannot derive service id from an empty public key")]
    EmptyPublicKey,
}

/// Failures reported by the external descriptor collaborators
/// (wire parser, intro-point decryptor, intro-point parser).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Descriptor parse error: {0}")]
    Parse(String),

    #[error("Introduction point decryption failed: {0}")]
    Decrypt(String),

    #[error("Introduction point parse error: {0}")]
    IntroPoints(String),
}

/// Why a descriptor was refused by the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorRejection {
    #[error("no descriptor could be parsed")]
    NothingParsed,

    #[error("descriptor id is not valid base32")]
    InvalidDescriptorId,

    #[error("descriptor could not be parsed")]
    Unparseable,

    #[error("service id could not be computed")]
    ServiceIdDerivation,

    #[error("descriptor belongs to a different service id")]
    ServiceIdMismatch,

    #[error("descriptor id does not match the requested one")]
    DescriptorIdMismatch,

    #[error("introduction points could not be decrypted")]
    DecryptionFailed,

    #[error("no introduction points could be parsed")]
    NoIntroPoints,

    #[error("too many introduction points: {count} (max {max})")]
    TooManyIntroPoints { count: usize, max: usize },

    #[error("descriptor is too old")]
    TooOld,

    #[error("descriptor is too far in the future")]
    TooNew,
}

/// Caller-facing error taxonomy of every cache operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Invalid identifier")]
    InvalidIdentifier,

    #[error("Descriptor not found")]
    NotFound,

    #[error("Not acting as hidden service directory")]
    NotActingAsDirectory,

    #[error("Bad descriptor: {0}")]
    BadDescriptor(#[from] DescriptorRejection),
}

impl From<IdentifierError> for CacheError {
    fn from(_: IdentifierError) -> Self {
        CacheError::InvalidIdentifier
    }
}
