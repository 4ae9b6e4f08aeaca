//! Domain types for the Indaba community site: the four content kinds
//! (community updates, job postings, service alerts, news), job
//! applications, the [`backend::ContentBackend`] service boundary, HTML
//! sanitization, and pure view projections.
//!
//! Everything here is transport- and storage-agnostic; the SQLite store,
//! the HTTP service, and the HTTP client all build on this crate.

pub mod alert;
pub mod application;
pub mod backend;
pub mod error;
pub mod job;
pub mod news;
pub mod sanitize;
pub mod update;
pub mod view;

pub use error::{Error, Result};
