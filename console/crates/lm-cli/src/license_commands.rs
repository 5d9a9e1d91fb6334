use clap::Subcommand;

#[derive(Subcommand)]
pub enum LicenseCommands {
    /// List licenses with their status
    List {
        /// Case-insensitive filter on owner email and code
        #[arg(long)]
        search: Option<String>,
    },

    /// Issue a license for a user
    Create {
        /// Email (or unique email fragment) of the license owner
        #[arg(long)]
        user: String,

        /// License type: local, monthly, or lifetime
        #[arg(long, value_parser = ["local", "monthly", "lifetime"])]
        r#type: String,

        /// Machine ID (required for local licenses)
        #[arg(long)]
        machine_id: Option<String>,
    },

    /// Renew a user's monthly license for 30 more days
    Renew {
        /// User ID of the license owner
        user_id: String,
    },
}
