pub mod client;
pub mod credentials;

pub use client::{ApiClient, ClientConfig};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
