//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`check`] - Configuration validation
//! - [`routes`] - Routing tree display and label resolution
//! - [`inhibit`] - Inhibition rule evaluation

pub mod check;
pub mod inhibit;
pub mod routes;

pub use check::CheckCommand;
pub use inhibit::InhibitCommand;
pub use routes::RoutesCommand;
