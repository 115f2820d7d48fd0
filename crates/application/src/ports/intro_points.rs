use rend_cache_domain::{DescriptorCookie, DescriptorError, IntroductionPoint, ServiceDescriptor};

/// Decrypts an introduction-point section with a descriptor cookie.
pub trait IntroPointDecryptor: Send + Sync {
    fn decrypt(&self, cookie: &DescriptorCookie, payload: &[u8])
        -> Result<Vec<u8>, DescriptorError>;
}

/// Parses a (plaintext) introduction-point section.
///
/// Returns the parsed points; the cache decides whether the count is
/// acceptable and attaches them to the descriptor.
pub trait IntroPointParser: Send + Sync {
    fn parse_points(
        &self,
        descriptor: &ServiceDescriptor,
        payload: &[u8],
    ) -> Result<Vec<IntroductionPoint>, DescriptorError>;
}
