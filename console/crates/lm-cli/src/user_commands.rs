use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users, active first
    List {
        /// Case-insensitive filter on name and email
        #[arg(long)]
        search: Option<String>,

        /// Sort column
        #[arg(long, value_parser = ["name", "email", "created-at", "active", "plan"])]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Get a user by ID
    Get {
        /// User ID
        id: String,
    },

    /// Create a new user
    Create {
        /// User email
        #[arg(long)]
        email: String,

        /// User name
        #[arg(long)]
        name: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Update a user; omitted fields keep their stored value
    Update {
        /// User ID
        id: String,

        /// New email
        #[arg(long)]
        email: Option<String>,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New last name
        #[arg(long)]
        last_name: Option<String>,

        /// New phone
        #[arg(long)]
        phone: Option<String>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,

        /// Plan: local, monthly, lifetime, or undecided
        #[arg(long, value_parser = ["local", "monthly", "lifetime", "undecided"])]
        plan: Option<String>,
    },

    /// Activate or deactivate a user
    Toggle {
        /// User ID
        id: String,
    },
}
