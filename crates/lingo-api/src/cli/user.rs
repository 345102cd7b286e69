//! User management CLI commands: create, show.

use anyhow::{Context, Result};
use chrono::{SubsecRound, Utc};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use uuid::Uuid;

use lingo_core::repository::user::UserRepository;
use lingo_types::user::User;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user.
    Create {
        /// Display name.
        #[arg(long)]
        name: String,

        /// Role used to pick the tutor prompt ("student" or "teacher").
        #[arg(long)]
        role: Option<String>,
    },

    /// Show a user.
    Show {
        /// User id.
        id: Uuid,
    },
}

pub async fn run(state: &AppState, action: UserCommand, json: bool) -> Result<()> {
    match action {
        UserCommand::Create { name, role } => create_user(state, name, role, json).await,
        UserCommand::Show { id } => show_user(state, id, json).await,
    }
}

/// Create a user and print its id.
///
/// ```bash
/// lingo user create --name Anna --role student
/// ```
pub async fn create_user(
    state: &AppState,
    name: String,
    role: Option<String>,
    json: bool,
) -> Result<()> {
    let name = name.trim().to_string();
    anyhow::ensure!(!name.is_empty(), "User name must not be empty");

    let user = User {
        id: Uuid::now_v7(),
        name,
        role: role.filter(|r| !r.trim().is_empty()),
        created_at: Utc::now().trunc_subsecs(6),
    };
    let user = state.user_repo.create_user(&user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Created user '{}'",
        style("✓").green().bold(),
        style(&user.name).cyan()
    );
    println!("  {} {}", style("id:").dim(), user.id);
    println!();
    println!(
        "  Open a session with: {}",
        style(format!("lingo session open --user {}", user.id)).yellow()
    );
    println!();

    Ok(())
}

pub async fn show_user(state: &AppState, id: Uuid, json: bool) -> Result<()> {
    let user = state
        .user_repo
        .get_user(&id)
        .await?
        .with_context(|| format!("User '{id}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("Id").fg(Color::White), Cell::new(user.id)]);
    table.add_row(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new(&user.name).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Role").fg(Color::White),
        Cell::new(user.role().unwrap_or("(none)")),
    ]);
    table.add_row(vec![
        Cell::new("Created").fg(Color::White),
        Cell::new(user.created_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
    ]);

    println!();
    println!("{table}");
    println!();

    Ok(())
}
