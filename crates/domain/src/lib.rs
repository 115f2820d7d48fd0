//! Rend Cache Domain Layer
pub mod auth;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod identifiers;

pub use auth::{AuthType, DescriptorCookie};
pub use config::{CacheConfig, Config, ConfigError, LoggingConfig, MaintenanceConfig};
pub use descriptor::{IntroductionPoint, ServiceDescriptor};
pub use errors::{CacheError, DescriptorError, DescriptorRejection, IdentifierError};
pub use identifiers::{DescriptorId, ServiceId};
