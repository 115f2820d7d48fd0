//! Rend Cache Infrastructure Layer
//!
//! In-memory hidden service descriptor caches.
pub mod rendcache;
