//! Command-line argument parsing with clap.

use clap::{Args, Parser, Subcommand};

/// Stratus CLI - application platform operations.
#[derive(Parser, Debug, Clone)]
#[command(name = "stratus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API endpoint, overriding the targeted one.
    #[arg(long, env = "STRATUS_API")]
    pub api: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show or change the scale of a process.
    Scale(ScaleArgs),

    /// Terminate one application instance so the platform recreates it.
    RestartAppInstance(RestartAppInstanceArgs),

    /// Create an application in the targeted space.
    CreateApp {
        /// Application name.
        name: String,
    },

    /// Delete an application from the targeted space.
    Delete {
        /// Application name.
        name: String,

        /// Delete without confirmation.
        #[arg(short, long)]
        force: bool,
    },

    /// Bind a security group to a space.
    BindSecurityGroup(BindSecurityGroupArgs),

    /// Unbind a security group from a space.
    UnbindSecurityGroup(UnbindSecurityGroupArgs),

    /// List security groups and the spaces they are bound to.
    SecurityGroups,
}

/// Arguments for `stratus scale`.
#[derive(Args, Debug, Clone)]
pub struct ScaleArgs {
    /// Application name.
    pub name: String,

    /// Process type to scale.
    #[arg(long = "process", default_value = "web")]
    pub process_type: String,

    /// Desired instance count.
    #[arg(short, long)]
    pub instances: Option<u32>,

    /// Memory limit per instance in megabytes.
    #[arg(short, long)]
    pub memory: Option<u64>,

    /// Disk limit per instance in megabytes.
    #[arg(short = 'k', long)]
    pub disk: Option<u64>,

    /// Scale without the restart confirmation prompt.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `stratus restart-app-instance`.
#[derive(Args, Debug, Clone)]
pub struct RestartAppInstanceArgs {
    /// Application name.
    pub name: String,

    /// Zero-based instance index.
    pub index: u32,

    /// Process type the instance belongs to.
    #[arg(long = "process", default_value = "web")]
    pub process_type: String,
}

/// Arguments for `stratus bind-security-group`.
#[derive(Args, Debug, Clone)]
pub struct BindSecurityGroupArgs {
    /// Security group name.
    pub security_group: String,

    /// Organization name.
    pub organization: String,

    /// Space name.
    pub space: String,

    /// Lifecycle phase of the binding.
    #[arg(long, default_value = "running")]
    pub lifecycle: String,
}

/// Arguments for `stratus unbind-security-group`.
///
/// With no organization and space, the targeted space is used.
#[derive(Args, Debug, Clone)]
pub struct UnbindSecurityGroupArgs {
    /// Security group name.
    pub security_group: String,

    /// Organization name.
    #[arg(requires = "space")]
    pub organization: Option<String>,

    /// Space name.
    pub space: Option<String>,

    /// Lifecycle phase of the binding.
    #[arg(long, default_value = "running")]
    pub lifecycle: String,
}
