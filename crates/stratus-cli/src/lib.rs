//! # stratus-cli
//!
//! Stratus command-line interface.
//!
//! Provides commands for:
//! - Scaling and restarting application processes
//! - Creating and deleting applications
//! - Binding security groups to spaces
//!
//! # Architecture
//!
//! Commands parse arguments with clap, read the targeted org/space from
//! the persisted config, and drive `stratus-actor` workflows over the
//! `stratus-api` HTTP client. Output goes through [`ui::Ui`]: text on
//! stdout, warnings on stderr.
//!
//! ```text
//! ┌─────────────┐   workflows    ┌───────────────┐    HTTP/JSON
//! │ stratus-cli │───────────────►│ stratus-actor │───────────────► API
//! └─────────────┘                └───────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ui;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::CliError;
pub use ui::Ui;
