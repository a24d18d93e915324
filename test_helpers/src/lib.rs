//! Test helpers shared across the studio-content workspace.
//!
//! - [`store::StaticStore`]: an in-memory [`studio_content::DocumentStore`]
//!   that records every request and can be told to fail.
//! - [`wire`]: builders for tagged wire documents.
//! - [`jail`]: a thin wrapper over `figment::Jail` for configuration tests.

pub mod jail;
pub mod store;
pub mod wire;

pub use store::{StaticStore, StoreRequest};
