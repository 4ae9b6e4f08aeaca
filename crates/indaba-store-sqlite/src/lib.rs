//! SQLite implementation of [`indaba_core::backend::ContentBackend`].
//!
//! One database file holds every collection plus the admin accounts.
//! Access goes through [`tokio_rusqlite`], which runs the blocking rusqlite
//! calls on a dedicated thread so the async runtime never stalls.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
