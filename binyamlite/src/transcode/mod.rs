//! Encoders for formats rendered with third-party libraries.

pub mod cbor;
pub mod toml;
pub mod yaml;
