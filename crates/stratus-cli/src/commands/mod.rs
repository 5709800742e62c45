//! Command implementations.
//!
//! Each command is a small struct built from parsed arguments. Execution
//! takes the actor, the loaded config, and the UI, so tests can drive
//! commands end to end against a scripted client and in-memory streams.

pub mod app;
pub mod restart_instance;
pub mod scale;
pub mod security_group;

pub use app::{CreateAppCommand, DeleteCommand};
pub use restart_instance::RestartAppInstanceCommand;
pub use scale::ScaleCommand;
pub use security_group::{
    BindSecurityGroupCommand, SecurityGroupsCommand, UnbindSecurityGroupCommand,
};
