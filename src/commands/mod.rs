//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod load;
pub mod models;
pub mod query;
pub mod serve;

// Re-export main command functions
pub use load::{execute_load, validate_args};
pub use models::{LoadArgs, QueryArgs, QueryKind};
pub use query::execute_query;
pub use serve::execute_serve;
