/// Relay endpoint a client contacts first to reach a hidden service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroductionPoint {
    pub identity: String,
    pub address: String,
    pub port: u16,
}

/// Parsed form of a v2 hidden service descriptor.
///
/// `intro_points` is `None` until the introduction-point section has been
/// parsed. Directory-side entries never parse it; client-side entries always
/// carry `Some` (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub public_key: Vec<u8>,
    /// Publication time, seconds since UNIX epoch.
    pub timestamp: i64,
    pub intro_points: Option<Vec<IntroductionPoint>>,
}

impl ServiceDescriptor {
    pub fn new(public_key: Vec<u8>, timestamp: i64) -> Self {
        Self {
            public_key,
            timestamp,
            intro_points: None,
        }
    }

    pub fn intro_point_count(&self) -> usize {
        self.intro_points.as_ref().map_or(0, Vec::len)
    }
}
