//! Rend Cache Application Layer
//!
//! Ports the descriptor cache depends on. Implementations live outside the
//! cache (wire parser, crypto, hash-ring bookkeeping) and are injected when
//! the cache is built.
pub mod ports;
