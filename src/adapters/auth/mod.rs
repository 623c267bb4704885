//! Authentication adapters.
//!
//! - `InMemoryCredentialStore` - Peppered HMAC digests, constant-time checks

mod credential_store;

pub use credential_store::InMemoryCredentialStore;
