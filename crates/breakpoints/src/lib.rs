//! Element-level responsive breakpoints.
//!
//! Modules are elements marked with a breakpoint attribute or a module class.
//! The engine measures each module's width and toggles one class per breakpoint
//! threshold the width meets, so styles can respond to the space a component
//! actually has instead of the viewport width.
//!
//! The document is reached only through the [`Host`] trait.

#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod host;
pub mod ordering;
pub mod table;

pub use classify::PassSummary;
pub use config::{Config, InitOn, Options};
pub use discovery::{Module, TableSource};
pub use engine::{Engine, State};
pub use error::{ConfigError, ModuleError, TableError};
pub use host::{Host, ModuleSelector, Signal, WidthBox};
pub use table::BreakpointTable;
