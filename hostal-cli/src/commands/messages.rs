use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};
use hostal_core::messages::{self, load_conversation, Conversation};
use hostal_core::{ListFilter, MessageFilter, Notification, SenderRole};

use crate::context::CliContext;
use crate::output::{new_table, print_json, print_notification, truncate, wants_json};

#[derive(Subcommand)]
pub enum MessagesCommand {
    #[command(about = "List conversations, most recent first")]
    List {
        #[arg(short, long, help = "Only conversations with unread client messages")]
        unread: bool,

        #[arg(short, long, help = "Only messages from ADMIN or CLIENT")]
        sender: Option<SenderRole>,

        #[arg(short, long, help = "Match message text")]
        text: Option<String>,

        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },

    #[command(about = "Show every message exchanged with a user")]
    Thread {
        user_id: String,

        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },

    #[command(about = "Reply to a user as the administrator")]
    Send {
        user_id: String,

        #[arg(help = "Message text (1-1000 characters)")]
        text: String,
    },

    #[command(about = "Mark a user's conversation as read")]
    Read { user_id: String },

    #[command(about = "Count unread client messages per user")]
    Unread {
        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },
}

pub async fn handle_messages_command(ctx: &CliContext, cmd: Option<MessagesCommand>) -> Result<()> {
    match cmd.unwrap_or(MessagesCommand::List {
        unread: false,
        sender: None,
        text: None,
        format: "text".to_string(),
    }) {
        MessagesCommand::List {
            unread,
            sender,
            text,
            format,
        } => {
            let filter = MessageFilter {
                unread_only: false,
                sender,
                text,
            };
            cmd_messages_list(ctx, &filter, unread, &format).await
        }
        MessagesCommand::Thread { user_id, format } => {
            cmd_messages_thread(ctx, &user_id, &format).await
        }
        MessagesCommand::Send { user_id, text } => {
            messages::reply(&ctx.api, &user_id, &text).await?;
            print_notification(&Notification::success(format!("Reply sent to {}", user_id)));
            Ok(())
        }
        MessagesCommand::Read { user_id } => {
            let count = messages::mark_conversation_read(&ctx.api, &user_id).await?;
            if count == 0 {
                print_notification(&Notification::info(format!(
                    "No unread messages from {}",
                    user_id
                )));
            } else {
                print_notification(&Notification::success(format!(
                    "Marked {} message(s) from {} as read",
                    count, user_id
                )));
            }
            Ok(())
        }
        MessagesCommand::Unread { format } => cmd_messages_unread(ctx, &format).await,
    }
}

async fn cmd_messages_list(
    ctx: &CliContext,
    filter: &MessageFilter,
    unread_only: bool,
    format: &str,
) -> Result<()> {
    let json = wants_json(format)?;
    let all = ctx.api.support_messages().list_all(ctx.page_size()).await?;
    let conversations: Vec<Conversation> = messages::group_conversations(filter.apply_owned(all))
        .into_iter()
        .filter(|c| !unread_only || c.unread_count() > 0)
        .collect();

    if json {
        return print_json(&conversations);
    }

    if conversations.is_empty() {
        println!("{}", "No conversations found.".yellow());
        return Ok(());
    }

    println!("{}", "Support Conversations".cyan().bold());
    println!();

    let mut table = new_table(&["User", "Messages", "Unread", "Last activity", "Last message"]);
    for conversation in &conversations {
        let unread = conversation.unread_count();
        let unread_cell = if unread > 0 {
            Cell::new(unread).fg(Color::Yellow)
        } else {
            Cell::new(unread).fg(Color::DarkGrey)
        };
        let last = conversation
            .last_message()
            .and_then(|m| m.text.as_deref())
            .map(|t| truncate(t, 40))
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(&conversation.user_id).fg(Color::Cyan),
            Cell::new(conversation.messages.len()),
            unread_cell,
            Cell::new(ctx.timestamp(conversation.last_activity())),
            Cell::new(last),
        ]);
    }

    println!("{table}");
    println!();
    println!("  Total: {} conversations", conversations.len());
    Ok(())
}

async fn cmd_messages_thread(ctx: &CliContext, user_id: &str, format: &str) -> Result<()> {
    let json = wants_json(format)?;
    let conversation = load_conversation(&ctx.api, user_id).await?;

    if json {
        return print_json(&conversation);
    }

    if conversation.messages.is_empty() {
        println!("{}", format!("No messages with {}.", user_id).yellow());
        return Ok(());
    }

    println!("{} {}", "Conversation with".cyan().bold(), user_id.cyan().bold());
    println!("{}", "═".repeat(40).dimmed());

    for message in &conversation.messages {
        let who = if message.is_from_admin() {
            "Admin".blue().bold()
        } else {
            "Client".green().bold()
        };
        let marker = if !message.is_from_admin() && !message.is_read() {
            " ●".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}{}",
            ctx.timestamp(message.sent_at).dimmed(),
            who,
            marker
        );
        println!("    {}", message.text.as_deref().unwrap_or_default());
    }

    let unread = conversation.unread_count();
    if unread > 0 {
        println!();
        println!(
            "  {}",
            format!(
                "{} unread; run 'hostal messages read {}' to mark them",
                unread, user_id
            )
            .dimmed()
        );
    }
    Ok(())
}

async fn cmd_messages_unread(ctx: &CliContext, format: &str) -> Result<()> {
    let json = wants_json(format)?;
    let filter = MessageFilter {
        unread_only: true,
        sender: Some(SenderRole::Client),
        text: None,
    };
    let all = ctx.api.support_messages().list_all(ctx.page_size()).await?;
    let unread = filter.apply_owned(all);
    let total = messages::unread_count(&unread);
    let conversations = messages::group_conversations(unread);

    if json {
        let output: Vec<serde_json::Value> = conversations
            .iter()
            .map(|c| {
                serde_json::json!({
                    "user_id": c.user_id,
                    "unread": c.unread_count(),
                    "last_activity": c.last_activity().map(|t| t.to_rfc3339()),
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "total": total, "users": output }));
    }

    if total == 0 {
        println!("{}", "Inbox is clear.".green());
        return Ok(());
    }

    println!("{}", "Unread Messages".cyan().bold());
    println!();
    let mut table = new_table(&["User", "Unread", "Since"]);
    for conversation in &conversations {
        let since = conversation
            .messages
            .first()
            .and_then(|m| m.sent_at);
        table.add_row(vec![
            Cell::new(&conversation.user_id).fg(Color::Cyan),
            Cell::new(conversation.unread_count()).fg(Color::Yellow),
            Cell::new(ctx.timestamp(since)),
        ]);
    }
    println!("{table}");
    println!();
    println!("  Total: {} unread from {} users", total, conversations.len());
    Ok(())
}
