//! Session history CLI command.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use uuid::Uuid;

use lingo_core::repository::user::UserRepository;
use lingo_types::chat::SenderType;

use crate::state::AppState;

/// Longest content shown in a table cell before eliding.
const PREVIEW_CHARS: usize = 80;

/// Print the history of the session identified by `token`, oldest first.
///
/// Goes through the same session validation as the HTTP endpoint, so a
/// closed or expired session is refused here too.
///
/// ```bash
/// lingo history --user <user-id> --token <token>
/// ```
pub async fn show_history(state: &AppState, user_id: Uuid, token: &str, json: bool) -> Result<()> {
    let user = state
        .user_repo
        .get_user(&user_id)
        .await?
        .with_context(|| format!("User '{user_id}' not found"))?;

    let messages = state.chat_service.history(&user, token).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!("  {} No messages in this session yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("Sender").fg(Color::White),
        Cell::new("Content").fg(Color::White),
    ]);

    for message in &messages {
        let sender = match message.sender_type {
            SenderType::User => Cell::new("user").fg(Color::Cyan),
            SenderType::Ai => Cell::new("ai").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(message.created_at.format("%Y-%m-%d %H:%M:%S").to_string())
                .fg(Color::DarkGrey),
            sender,
            Cell::new(preview(&message.content)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} message{}",
        style(messages.len()).bold(),
        if messages.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Truncate to `PREVIEW_CHARS` characters on a char boundary.
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
