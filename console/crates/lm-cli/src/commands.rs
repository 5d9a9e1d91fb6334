use crate::{license_commands::LicenseCommands, user_commands::UserCommands};

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sign in and store the admin token
    Login {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,
    },

    /// Forget the stored admin token
    Logout,

    /// Check that the backend is reachable
    Ping,

    /// User operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// License operations
    License {
        #[command(subcommand)]
        action: LicenseCommands,
    },

    /// Monthly statistics (defaults to the current month)
    Report {
        /// Month, 1-12
        #[arg(long)]
        month: Option<u32>,

        /// Year
        #[arg(long)]
        year: Option<i32>,
    },
}
