use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};
use hostal_core::{Notification, RoomStateFilter, RoomStateForm, RoomStateName};

use crate::commands::rooms::default_list_args;
use crate::context::CliContext;
use crate::output::{
    active_cell, fetch_listing, new_table, or_dash, print_json, print_listing_footer,
    print_notification, truncate, wants_json, ListArgs,
};

#[derive(Subcommand)]
pub enum StatesCommand {
    #[command(about = "List room states")]
    List {
        #[arg(short, long, help = "Match name or description")]
        text: Option<String>,

        #[arg(long, help = "Only active states")]
        active: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Create a room state")]
    Create {
        #[arg(help = "DISPONIBLE, OCUPADA or MANTENIMIENTO")]
        name: RoomStateName,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, help = "Create the state inactive")]
        inactive: bool,
    },

    #[command(about = "Update an existing room state")]
    Update {
        id: i64,

        #[arg(short, long)]
        name: Option<RoomStateName>,

        #[arg(short, long)]
        description: Option<String>,
    },

    #[command(about = "Delete a room state")]
    Delete {
        id: i64,

        #[arg(short, long, help = "Skip the confirmation check")]
        yes: bool,
    },

    #[command(about = "Mark a room state as active")]
    Activate { id: i64 },

    #[command(about = "Mark a room state as inactive")]
    Deactivate { id: i64 },
}

pub async fn handle_states_command(ctx: &CliContext, cmd: Option<StatesCommand>) -> Result<()> {
    let states = ctx.api.room_states();

    match cmd.unwrap_or(StatesCommand::List {
        text: None,
        active: false,
        list: default_list_args(),
    }) {
        StatesCommand::List { text, active, list } => {
            let filter = RoomStateFilter {
                text,
                active_only: active,
            };
            let json = wants_json(&list.format)?;
            let listing = fetch_listing(&states, &list, ctx.page_size(), &filter).await?;

            if json {
                return print_json(&listing.items);
            }
            if listing.items.is_empty() {
                println!("{}", "No room states found.".yellow());
                return Ok(());
            }

            println!("{}", "Room States".cyan().bold());
            println!();

            let mut table = new_table(&["ID", "Name", "Description", "Status"]);
            for state in &listing.items {
                table.add_row(vec![
                    Cell::new(state.id.map(|id| id.to_string()).unwrap_or_default()),
                    Cell::new(state.display_name()).fg(Color::Cyan),
                    Cell::new(truncate(&or_dash(state.description.as_deref()), 50)),
                    active_cell(state.is_active()),
                ]);
            }
            println!("{table}");
            print_listing_footer(&listing, "states");
            Ok(())
        }
        StatesCommand::Create {
            name,
            description,
            inactive,
        } => {
            let form = RoomStateForm {
                name,
                description,
                active: !inactive,
            };
            let state = form.submit(&ctx.api, None).await?;
            print_notification(&Notification::created(&format!(
                "State {}",
                state.display_name()
            )));
            Ok(())
        }
        StatesCommand::Update {
            id,
            name,
            description,
        } => {
            let current = states.get(id).await?;
            let mut form = RoomStateForm::from_state(&current)
                .or_else(|| {
                    name.map(|name| RoomStateForm {
                        name,
                        description: current.description.clone(),
                        active: current.is_active(),
                    })
                })
                .ok_or_else(|| anyhow!("Room state {} has no name; pass --name", id))?;

            if let Some(name) = name {
                form.name = name;
            }
            if description.is_some() {
                form.description = description;
            }

            let state = form.submit(&ctx.api, Some(id)).await?;
            print_notification(&Notification::updated(&format!(
                "State {}",
                state.display_name()
            )));
            Ok(())
        }
        StatesCommand::Delete { id, yes } => {
            if !yes {
                bail!("Deleting room state {} cannot be undone; re-run with --yes", id);
            }
            states.delete(id).await?;
            print_notification(&Notification::deleted(&format!("State #{}", id)));
            Ok(())
        }
        StatesCommand::Activate { id } => {
            states.activate(id).await?;
            print_notification(&Notification::activated(&format!("State #{}", id)));
            Ok(())
        }
        StatesCommand::Deactivate { id } => {
            states.deactivate(id).await?;
            print_notification(&Notification::deactivated(&format!("State #{}", id)));
            Ok(())
        }
    }
}
