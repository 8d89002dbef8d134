//! Publishing of rendered podcasts.
//!
//! A [`Publisher`] derives a storage key from the request id, writes the
//! audio once through an [`AudioStore`], and returns the URL the client
//! downloads it from.

pub mod config;
pub mod error;
pub mod publisher;
pub mod store;

pub use config::{build_store, StorageBackend, StorageConfig};
pub use error::StoreError;
pub use publisher::Publisher;
pub use store::{AudioStore, LocalStore, S3Store};
