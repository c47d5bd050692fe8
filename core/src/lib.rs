//! Core library for the nosh calorie tracker.
//!
//! Everything here is synchronous and single-session: a [`Session`] owns the
//! food catalog, the consumption log, the daily goal, and preferences, and
//! snapshots each of them to a [`SnapshotStore`] after every mutation. The
//! presentation layer (the `nosh` CLI) only calls into [`Session`] and reads
//! derived state.

pub mod catalog;
pub mod error;
pub mod goal;
pub mod log;
pub mod log_csv;
pub mod models;
pub mod numeric;
pub mod session;
pub mod store;

pub use error::{Error, Result};
pub use session::Session;
pub use store::SnapshotStore;
