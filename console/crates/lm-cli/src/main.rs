//! lm - license admin console
//!
//! Command-line front end for the licensing backend: users, licenses and
//! the monthly dashboard. Output is JSON on stdout; notices go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Sign in once; the token is kept in .lm/session.token
//! lm login --email admin@example.com --password secret
//!
//! # Licenses with their status, pretty-printed
//! lm license list --pretty
//!
//! # Issue a machine-bound license
//! lm license create --user ana@example.com --type local --machine-id M-1
//! ```

mod cli;
mod commands;
mod license_commands;
mod user_commands;

use crate::{
    cli::Cli, commands::Commands, license_commands::LicenseCommands,
    user_commands::UserCommands,
};

use lm_cli::{
    CliError, CliResult, Console, HttpGateway, IssuedRow, LicenseRow, RenewOutcome, ReportRow,
    SessionStore, TerminalNavigator, TerminalNotifier, UserRow, ViewScope, WorkflowError, logger,
};
use lm_config::Config;
use lm_core::{
    EntityId, LicenseField, LicenseType, NewUser, ReportPeriod, SortDirection, UserField,
    UserUpdate,
};

use std::path::Path;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use log::debug;
use serde_json::{Value, json};

type AdminConsole = Console<HttpGateway, TerminalNotifier, TerminalNavigator>;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli {
        command,
        server,
        pretty,
        yes,
    } = Cli::parse();

    let config = match load_config(server) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::initialize(
        config.logging.level,
        config.logging.file.as_deref().map(Path::new),
        config.logging.colored,
    ) {
        eprintln!("Warning: {}", e);
    }
    config.log_summary();

    let (console, store) = match build_console(&config, yes) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(command, &console, &store).await;

    // A rejected token is cleared in memory; drop it from disk as well
    if let Err(e) = store.sync(console.session()) {
        eprintln!("Warning: {}", e);
    }

    // Handle result
    match result {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            if already_reported(&e) {
                debug!("{}", e);
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Load config.toml and environment overrides; `--server` wins over both.
fn load_config(server: Option<String>) -> CliResult<Config> {
    let mut config = Config::load()?;
    if let Some(url) = server {
        config.api.base_url = url;
    }
    config.validate()?;
    Ok(config)
}

fn build_console(config: &Config, assume_yes: bool) -> CliResult<(AdminConsole, SessionStore)> {
    let store = SessionStore::new(config.token_path()?);
    let session = store.restore()?;
    let gateway = HttpGateway::with_timeout(
        &config.api.base_url,
        session.clone(),
        config.api.timeout(),
    )?;

    let console = Console::new(
        gateway,
        session,
        TerminalNotifier::new(assume_yes),
        TerminalNavigator,
    );
    Ok((console, store))
}

/// Backend failures were already shown as a notice by the workflow.
fn already_reported(error: &CliError) -> bool {
    matches!(error, CliError::Workflow(WorkflowError::Request(_)))
}

async fn run(command: Commands, console: &AdminConsole, store: &SessionStore) -> CliResult<Value> {
    match command {
        Commands::Login { email, password } => {
            let token = console.login(&email, &password).await?;
            store.save(&token)?;
            Ok(json!({ "authenticated": true }))
        }
        Commands::Logout => {
            console.logout();
            store.clear()?;
            Ok(json!({ "authenticated": false }))
        }
        Commands::Ping => {
            console.ping().await?;
            Ok(json!({ "reachable": true, "server": console.gateway().base_url }))
        }
        Commands::User { action } => run_user(action, console).await,
        Commands::License { action } => run_license(action, console).await,
        Commands::Report { month, year } => {
            let current = ReportPeriod::current(&Local::now());
            let period = ReportPeriod::new(
                month.unwrap_or(current.month()),
                year.unwrap_or(current.year()),
            )
            .map_err(WorkflowError::from)?;

            let stats = console.load_report(&ViewScope::new(), period).await?;
            Ok(serde_json::to_value(ReportRow::new(period, &stats))?)
        }
    }
}

async fn run_user(action: UserCommands, console: &AdminConsole) -> CliResult<Value> {
    let scope = ViewScope::new();

    match action {
        UserCommands::List { search, sort, desc } => {
            let mut users = console.load_users(&scope).await?;

            if let Some(query) = search {
                users.search(&query, &UserField::LIST_SEARCH);
            }
            if let Some(key) = sort.as_deref().and_then(user_sort_key) {
                users.sort_by(key, sort_direction(desc));
            }

            let rows: Vec<UserRow> = users.view().iter().map(UserRow::from).collect();
            Ok(serde_json::to_value(rows)?)
        }
        UserCommands::Get { id } => {
            let user = console.load_user(&scope, &entity_id(&id)).await?;
            Ok(serde_json::to_value(UserRow::from(&user))?)
        }
        UserCommands::Create { email, name, notes } => {
            let new_user = NewUser { email, name, notes };
            console.create_user(&new_user).await?;
            Ok(json!({ "created": true, "email": new_user.email }))
        }
        UserCommands::Update {
            id,
            email,
            name,
            last_name,
            phone,
            notes,
            plan,
        } => {
            let id = entity_id(&id);
            let user = console.load_user(&scope, &id).await?;

            let mut update = UserUpdate::from(&user);
            if let Some(email) = email {
                update.email = email;
            }
            if let Some(name) = name {
                update.name = name;
            }
            if last_name.is_some() {
                update.last_name = last_name;
            }
            if phone.is_some() {
                update.phone = phone;
            }
            if notes.is_some() {
                update.notes = notes;
            }
            if let Some(plan) = plan {
                update.plan = LicenseType::parse_plan(&plan)?;
            }

            console.update_user(&id, &update).await?;
            Ok(json!({ "updated": true, "id": id.to_string() }))
        }
        UserCommands::Toggle { id } => {
            let id = entity_id(&id);
            let mut users = console.load_users(&scope).await?;
            let updated = console.toggle_user_active(&mut users, &id).await?;
            Ok(serde_json::to_value(UserRow::from(&updated))?)
        }
    }
}

async fn run_license(action: LicenseCommands, console: &AdminConsole) -> CliResult<Value> {
    let scope = ViewScope::new();

    match action {
        LicenseCommands::List { search } => {
            let mut licenses = console.load_licenses(&scope).await?;

            if let Some(query) = search {
                licenses.search(&query, &LicenseField::LIST_SEARCH);
            }

            let now = Local::now();
            let rows: Vec<LicenseRow> = licenses
                .view()
                .iter()
                .map(|license| LicenseRow::new(license, &now))
                .collect();
            Ok(serde_json::to_value(rows)?)
        }
        LicenseCommands::Create {
            user,
            r#type,
            machine_id,
        } => {
            let license_type: LicenseType = r#type.parse()?;
            let mut picker = console.load_user_picker(&scope).await?;

            let matches = picker.set_query(&user).len();
            if picker.select_best_match().is_none() && matches > 1 {
                eprintln!("{} users match '{}':", matches, user);
                for candidate in picker.candidates() {
                    eprintln!("  {}", candidate.email);
                }
            }

            let machine_id = machine_id.unwrap_or_default();
            let issued = console
                .create_license(picker.draft(license_type, &machine_id))
                .await?;
            Ok(serde_json::to_value(IssuedRow::from(&issued))?)
        }
        LicenseCommands::Renew { user_id } => {
            let user_id = entity_id(&user_id);
            let mut licenses = console.load_licenses(&scope).await?;
            let outcome = console
                .renew_license(&scope, &mut licenses, &user_id)
                .await?;

            let now = Local::now();
            let rows: Vec<LicenseRow> = licenses
                .view()
                .iter()
                .filter(|license| license.owner_id() == Some(&user_id))
                .map(|license| LicenseRow::new(license, &now))
                .collect();

            Ok(json!({
                "renewed": outcome != RenewOutcome::Declined,
                "refreshed": outcome == RenewOutcome::Renewed { refreshed: true },
                "licenses": serde_json::to_value(rows)?,
            }))
        }
    }
}

fn entity_id(raw: &str) -> EntityId {
    let Ok(id) = raw.parse::<EntityId>();
    id
}

fn user_sort_key(name: &str) -> Option<UserField> {
    match name {
        "name" => Some(UserField::Name),
        "email" => Some(UserField::Email),
        "created-at" => Some(UserField::CreatedAt),
        "active" => Some(UserField::Active),
        "plan" => Some(UserField::Plan),
        _ => None,
    }
}

fn sort_direction(descending: bool) -> SortDirection {
    if descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}
