//! Core logic for `syncconf`: the agent's `sync.conf` document model,
//! value coercion, the mutation driver, and the agent restart controller.
//!
//! The CLI crate owns flag parsing and logging setup; everything that can
//! be exercised without a terminal lives here.

pub mod agent;
pub mod coerce;
pub mod constants;
pub mod document;
pub mod error;
pub mod mutation;

pub use document::ConfigDocument;
pub use error::{AgentError, ConfigError, Error, Result};
pub use mutation::{Assignment, MutationSet};
