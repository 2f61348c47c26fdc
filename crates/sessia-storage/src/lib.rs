//! sessia-storage
//!
//! S3 operations. Thin wrapper around the AWS S3 SDK, plus typed JSON
//! document helpers for the collections defined in `sessia_core::keys`.

pub mod client;
pub mod docs;
pub mod error;
pub mod objects;
