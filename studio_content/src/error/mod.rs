//! Error types produced while fetching, mapping and resolving content.

mod constructors;
mod conversions;
mod types;

pub use types::ContentError;

#[cfg(test)]
mod tests;
