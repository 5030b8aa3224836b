use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};
use hostal_core::{
    CategoryName, Notification, Room, RoomFilter, RoomForm, RoomStateName,
};

use crate::context::CliContext;
use crate::output::{
    active_cell, fetch_listing, new_table, or_dash, print_json, print_listing_footer,
    print_notification, wants_json, ListArgs,
};

#[derive(Subcommand)]
pub enum RoomsCommand {
    #[command(about = "List rooms with optional filters")]
    List {
        #[arg(short, long, help = "Match number, description, category or state")]
        text: Option<String>,

        #[arg(short, long, help = "Category (SIMPLE, DOBLE, SUITE, FAMILIAR)")]
        category: Option<CategoryName>,

        #[arg(short, long, help = "State (DISPONIBLE, OCUPADA, MANTENIMIENTO)")]
        state: Option<RoomStateName>,

        #[arg(long, help = "Minimum number of guests")]
        min_capacity: Option<u32>,

        #[arg(long, help = "Minimum nightly price")]
        min_price: Option<f64>,

        #[arg(long, help = "Maximum nightly price")]
        max_price: Option<f64>,

        #[arg(long, help = "Only active rooms")]
        active: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Show one room")]
    Show {
        id: i64,

        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },

    #[command(about = "Create a room")]
    Create {
        #[arg(short, long, help = "Room number shown to guests")]
        number: String,

        #[arg(short = 'p', long, help = "Number of guests (1-10)")]
        capacity: u32,

        #[arg(short, long, help = "Category id")]
        category: i64,

        #[arg(short, long, help = "Room state id")]
        state: i64,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, help = "Image reference")]
        image: Option<String>,

        #[arg(long, help = "Create the room inactive")]
        inactive: bool,
    },

    #[command(about = "Update fields of an existing room")]
    Update {
        id: i64,

        #[arg(short, long)]
        number: Option<String>,

        #[arg(short = 'p', long)]
        capacity: Option<u32>,

        #[arg(short, long, help = "Category id")]
        category: Option<i64>,

        #[arg(short, long, help = "Room state id")]
        state: Option<i64>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    #[command(about = "Delete a room")]
    Delete {
        id: i64,

        #[arg(short, long, help = "Skip the confirmation check")]
        yes: bool,
    },

    #[command(about = "Mark a room as active")]
    Activate { id: i64 },

    #[command(about = "Mark a room as inactive")]
    Deactivate { id: i64 },

    #[command(about = "Flip a room between active and inactive")]
    Toggle { id: i64 },

    #[command(about = "Show the active categories and states a room can use")]
    Options,
}

pub async fn handle_rooms_command(ctx: &CliContext, cmd: Option<RoomsCommand>) -> Result<()> {
    match cmd.unwrap_or(RoomsCommand::List {
        text: None,
        category: None,
        state: None,
        min_capacity: None,
        min_price: None,
        max_price: None,
        active: false,
        list: default_list_args(),
    }) {
        RoomsCommand::List {
            text,
            category,
            state,
            min_capacity,
            min_price,
            max_price,
            active,
            list,
        } => {
            let filter = RoomFilter {
                text,
                category,
                state,
                min_capacity,
                min_price,
                max_price,
                active_only: active,
            };
            cmd_rooms_list(ctx, &filter, &list).await
        }
        RoomsCommand::Show { id, format } => cmd_rooms_show(ctx, id, &format).await,
        RoomsCommand::Create {
            number,
            capacity,
            category,
            state,
            description,
            image,
            inactive,
        } => {
            let form = RoomForm {
                number,
                capacity,
                description,
                image,
                category_id: category,
                state_id: state,
                active: !inactive,
            };
            let room = form.submit(&ctx.api, None).await?;
            print_notification(&Notification::created(&room.label()));
            Ok(())
        }
        RoomsCommand::Update {
            id,
            number,
            capacity,
            category,
            state,
            description,
            image,
        } => {
            let current = ctx.api.rooms().get(id).await?;
            let mut form = RoomForm::from_room(&current);
            if let Some(number) = number {
                form.number = number;
            }
            if let Some(capacity) = capacity {
                form.capacity = capacity;
            }
            if let Some(category) = category {
                form.category_id = category;
            }
            if let Some(state) = state {
                form.state_id = state;
            }
            if description.is_some() {
                form.description = description;
            }
            if image.is_some() {
                form.image = image;
            }

            let room = form.submit(&ctx.api, Some(id)).await?;
            print_notification(&Notification::updated(&room.label()));
            Ok(())
        }
        RoomsCommand::Delete { id, yes } => {
            if !yes {
                bail!("Deleting room {} cannot be undone; re-run with --yes", id);
            }
            ctx.api.rooms().delete(id).await?;
            print_notification(&Notification::deleted(&format!("Room #{}", id)));
            Ok(())
        }
        RoomsCommand::Activate { id } => {
            ctx.api.rooms().activate(id).await?;
            print_notification(&Notification::activated(&format!("Room #{}", id)));
            Ok(())
        }
        RoomsCommand::Deactivate { id } => {
            ctx.api.rooms().deactivate(id).await?;
            print_notification(&Notification::deactivated(&format!("Room #{}", id)));
            Ok(())
        }
        RoomsCommand::Toggle { id } => {
            let room = ctx.api.rooms().get(id).await?;
            let now_active = ctx.api.rooms().toggle_active(id, room.is_active()).await?;
            let notification = if now_active {
                Notification::activated(&room.label())
            } else {
                Notification::deactivated(&room.label())
            };
            print_notification(&notification);
            Ok(())
        }
        RoomsCommand::Options => cmd_rooms_options(ctx).await,
    }
}

pub(crate) fn default_list_args() -> ListArgs {
    ListArgs {
        page: 0,
        size: None,
        sort: Vec::new(),
        all: false,
        format: "text".to_string(),
    }
}

async fn cmd_rooms_list(ctx: &CliContext, filter: &RoomFilter, args: &ListArgs) -> Result<()> {
    let json = wants_json(&args.format)?;
    let listing = fetch_listing(&ctx.api.rooms(), args, ctx.page_size(), filter).await?;

    if json {
        return print_json(&listing.items);
    }

    if listing.items.is_empty() {
        println!("{}", "No rooms found.".yellow());
        return Ok(());
    }

    println!("{}", "Rooms".cyan().bold());
    println!();

    let mut table = new_table(&["ID", "Number", "Category", "State", "Guests", "Price", "Status"]);
    for room in &listing.items {
        table.add_row(vec![
            Cell::new(room.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(or_dash(room.number.as_deref())).fg(Color::Cyan),
            Cell::new(category_label(room)),
            state_cell(room),
            Cell::new(room.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(ctx.money(room.nightly_price())),
            active_cell(room.is_active()),
        ]);
    }

    println!("{table}");
    print_listing_footer(&listing, "rooms");
    Ok(())
}

async fn cmd_rooms_show(ctx: &CliContext, id: i64, format: &str) -> Result<()> {
    let json = wants_json(format)?;
    let room = ctx.api.rooms().get(id).await?;

    if json {
        return print_json(&room);
    }

    println!("{}", room.label().cyan().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!("  {:<14} {}", "ID:".bold(), id);
    println!("  {:<14} {}", "Category:".bold(), category_label(&room));
    println!(
        "  {:<14} {}",
        "State:".bold(),
        room.state
            .as_ref()
            .map(|s| s.display_name())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "  {:<14} {}",
        "Guests:".bold(),
        room.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".into())
    );
    println!("  {:<14} {}", "Price/night:".bold(), ctx.money(room.nightly_price()));
    println!(
        "  {:<14} {}",
        "Status:".bold(),
        if room.is_active() {
            "Active".green()
        } else {
            "Inactive".dimmed()
        }
    );
    println!("  {:<14} {}", "Image:".bold(), or_dash(room.image.as_deref()));
    if let Some(description) = room.description.as_deref() {
        println!();
        println!("  {}", description);
    }
    Ok(())
}

async fn cmd_rooms_options(ctx: &CliContext) -> Result<()> {
    let (category_service, state_service) = (ctx.api.categories(), ctx.api.room_states());
    let (categories, states) =
        tokio::try_join!(category_service.active(), state_service.active())?;

    println!("{}", "Active categories".cyan().bold());
    let mut table = new_table(&["ID", "Name", "Base price"]);
    for category in &categories {
        table.add_row(vec![
            Cell::new(category.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(category.display_name()),
            Cell::new(ctx.money(category.price())),
        ]);
    }
    println!("{table}");
    println!();

    println!("{}", "Active states".cyan().bold());
    let mut table = new_table(&["ID", "Name"]);
    for state in &states {
        table.add_row(vec![
            Cell::new(state.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(state.display_name()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn category_label(room: &Room) -> String {
    room.category
        .as_ref()
        .map(|c| c.display_name())
        .unwrap_or_else(|| "-".to_string())
}

fn state_cell(room: &Room) -> Cell {
    let name = room.state.as_ref().and_then(|s| s.name);
    let label = room
        .state
        .as_ref()
        .map(|s| s.display_name())
        .unwrap_or_else(|| "-".to_string());
    match name {
        Some(RoomStateName::Disponible) => Cell::new(label).fg(Color::Green),
        Some(RoomStateName::Ocupada) => Cell::new(label).fg(Color::Yellow),
        Some(RoomStateName::Mantenimiento) => Cell::new(label).fg(Color::Red),
        None => Cell::new(label).fg(Color::DarkGrey),
    }
}
