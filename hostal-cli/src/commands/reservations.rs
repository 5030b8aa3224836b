use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};
use hostal_core::reservations::{
    advance, create_reservation, edit_reservation, load_overview, ReservationOverview,
};
use hostal_core::{
    Notification, Reservation, ReservationFilter, ReservationForm, ReservationStatus,
    StatusAction,
};

use crate::commands::rooms::default_list_args;
use crate::context::CliContext;
use crate::output::{
    active_cell, fetch_listing, new_table, print_json, print_listing_footer, print_notification,
    wants_json, ListArgs,
};

#[derive(Subcommand)]
pub enum ReservationsCommand {
    #[command(about = "List reservations with optional filters")]
    List {
        #[arg(short, long, help = "PENDING, CONFIRMED, CHECK_IN, FINALIZED or CANCELED")]
        status: Option<ReservationStatus>,

        #[arg(short, long, help = "Client id")]
        client: Option<i64>,

        #[arg(short, long, help = "Match client name or email")]
        text: Option<String>,

        #[arg(long, help = "Stays ending on or after this date (YYYY-MM-DD)")]
        from: Option<NaiveDate>,

        #[arg(long, help = "Stays starting on or before this date (YYYY-MM-DD)")]
        to: Option<NaiveDate>,

        #[arg(long, help = "Only active reservations")]
        active: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Show a reservation with its client, rooms and total")]
    Show {
        id: i64,

        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },

    #[command(about = "Create a pending reservation for one or more rooms")]
    Create {
        #[arg(short, long, help = "Client id")]
        client: i64,

        #[arg(short, long, help = "Check-in date (YYYY-MM-DD)")]
        start: NaiveDate,

        #[arg(short, long, help = "Check-out date (YYYY-MM-DD)")]
        end: NaiveDate,

        #[arg(short, long, value_delimiter = ',', required = true, help = "Room ids, comma separated")]
        rooms: Vec<i64>,

        #[arg(long, help = "Create the reservation inactive")]
        inactive: bool,
    },

    #[command(about = "Change dates, client or rooms of a reservation")]
    Edit {
        id: i64,

        #[arg(short, long)]
        client: Option<i64>,

        #[arg(short, long)]
        start: Option<NaiveDate>,

        #[arg(short, long)]
        end: Option<NaiveDate>,

        #[arg(short, long, value_delimiter = ',', help = "Replace the room selection")]
        rooms: Option<Vec<i64>>,
    },

    #[command(about = "Confirm a pending reservation")]
    Confirm { id: i64 },

    #[command(about = "Check in a confirmed reservation")]
    CheckIn { id: i64 },

    #[command(about = "Finalize a checked-in reservation")]
    Finalize { id: i64 },

    #[command(about = "Cancel a reservation that is not finalized")]
    Cancel { id: i64 },

    #[command(about = "Delete a reservation")]
    Delete {
        id: i64,

        #[arg(short, long, help = "Skip the confirmation check")]
        yes: bool,
    },

    #[command(about = "Mark a reservation as active")]
    Activate { id: i64 },

    #[command(about = "Mark a reservation as inactive")]
    Deactivate { id: i64 },
}

pub async fn handle_reservations_command(
    ctx: &CliContext,
    cmd: Option<ReservationsCommand>,
) -> Result<()> {
    match cmd.unwrap_or(ReservationsCommand::List {
        status: None,
        client: None,
        text: None,
        from: None,
        to: None,
        active: false,
        list: default_list_args(),
    }) {
        ReservationsCommand::List {
            status,
            client,
            text,
            from,
            to,
            active,
            list,
        } => {
            let filter = ReservationFilter {
                status,
                client_id: client,
                text,
                from,
                to,
                active_only: active,
            };
            cmd_reservations_list(ctx, &filter, &list).await
        }
        ReservationsCommand::Show { id, format } => {
            let json = wants_json(&format)?;
            let overview = load_overview(&ctx.api, id).await?;
            if json {
                return print_json(&overview);
            }
            print_overview(ctx, &overview);
            Ok(())
        }
        ReservationsCommand::Create {
            client,
            start,
            end,
            rooms,
            inactive,
        } => {
            let mut form = ReservationForm::new(client, start, end, rooms);
            form.active = !inactive;

            let created = create_reservation(&ctx.api, &form).await?;
            let label = reservation_label(&created.reservation);
            print_notification(&Notification::created(&label));
            println!(
                "  {} {} room(s), {} night(s), status {}",
                "→".blue(),
                created.details.len(),
                form.nights(),
                status_colored(ReservationStatus::Pending)
            );
            Ok(())
        }
        ReservationsCommand::Edit {
            id,
            client,
            start,
            end,
            rooms,
        } => {
            let overview = load_overview(&ctx.api, id).await?;
            let mut form = ReservationForm::from_reservation(&overview.reservation, overview.room_ids())
                .ok_or_else(|| anyhow!("Reservation {} is missing its client or dates", id))?;

            if let Some(client) = client {
                form.client_id = client;
            }
            if let Some(start) = start {
                form.start_date = start;
            }
            if let Some(end) = end {
                form.end_date = end;
            }
            if let Some(rooms) = rooms {
                form.room_ids = rooms;
            }

            let report = edit_reservation(&ctx.api, id, &form).await?;
            print_notification(&Notification::updated(&reservation_label(&report.reservation)));
            if report.changed_rooms() {
                println!(
                    "  {} {} room(s) added, {} removed, {} kept",
                    "→".blue(),
                    report.added.len(),
                    report.removed.len(),
                    report.kept
                );
            }
            Ok(())
        }
        ReservationsCommand::Confirm { id } => cmd_advance(ctx, id, StatusAction::Confirm).await,
        ReservationsCommand::CheckIn { id } => cmd_advance(ctx, id, StatusAction::CheckIn).await,
        ReservationsCommand::Finalize { id } => cmd_advance(ctx, id, StatusAction::Finalize).await,
        ReservationsCommand::Cancel { id } => cmd_advance(ctx, id, StatusAction::Cancel).await,
        ReservationsCommand::Delete { id, yes } => {
            if !yes {
                bail!("Deleting reservation {} cannot be undone; re-run with --yes", id);
            }
            ctx.api.reservations().delete(id).await?;
            print_notification(&Notification::deleted(&format!("Reservation #{}", id)));
            Ok(())
        }
        ReservationsCommand::Activate { id } => {
            ctx.api.reservations().activate(id).await?;
            print_notification(&Notification::activated(&format!("Reservation #{}", id)));
            Ok(())
        }
        ReservationsCommand::Deactivate { id } => {
            ctx.api.reservations().deactivate(id).await?;
            print_notification(&Notification::deactivated(&format!("Reservation #{}", id)));
            Ok(())
        }
    }
}

async fn cmd_reservations_list(
    ctx: &CliContext,
    filter: &ReservationFilter,
    args: &ListArgs,
) -> Result<()> {
    let json = wants_json(&args.format)?;
    let listing = fetch_listing(&ctx.api.reservations(), args, ctx.page_size(), filter).await?;

    if json {
        return print_json(&listing.items);
    }

    if listing.items.is_empty() {
        println!("{}", "No reservations found.".yellow());
        return Ok(());
    }

    println!("{}", "Reservations".cyan().bold());
    println!();

    let mut table = new_table(&["ID", "Client", "Check-in", "Check-out", "Nights", "Status", "Active"]);
    for reservation in &listing.items {
        table.add_row(vec![
            Cell::new(reservation.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(
                reservation
                    .client
                    .as_ref()
                    .map(|c| c.full_name())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(ctx.date(reservation.start_date)),
            Cell::new(ctx.date(reservation.end_date)),
            Cell::new(reservation.nights()),
            status_cell(reservation.current_status()),
            active_cell(reservation.is_active()),
        ]);
    }

    println!("{table}");
    print_listing_footer(&listing, "reservations");
    Ok(())
}

async fn cmd_advance(ctx: &CliContext, id: i64, action: StatusAction) -> Result<()> {
    let updated = advance(&ctx.api, id, action).await?;
    print_notification(&Notification::success(format!(
        "{} is now {}",
        reservation_label(&updated),
        updated.current_status()
    )));
    Ok(())
}

fn print_overview(ctx: &CliContext, overview: &ReservationOverview) {
    let reservation = &overview.reservation;

    println!("{}", reservation_label(reservation).cyan().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!(
        "  {:<12} {}",
        "Client:".bold(),
        overview
            .client
            .as_ref()
            .map(|c| c.full_name())
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(email) = overview.client.as_ref().and_then(|c| c.email.as_deref()) {
        println!("  {:<12} {}", "Email:".bold(), email);
    }
    println!(
        "  {:<12} {} → {} ({} night(s))",
        "Stay:".bold(),
        ctx.date(reservation.start_date),
        ctx.date(reservation.end_date),
        overview.nights
    );
    println!("  {:<12} {}", "Status:".bold(), status_colored(overview.status()));
    println!(
        "  {:<12} {}",
        "Active:".bold(),
        if reservation.is_active() { "yes" } else { "no" }
    );
    println!();

    if overview.lines.is_empty() {
        println!("  {}", "No rooms linked.".yellow());
    } else {
        let mut table = new_table(&["Line", "Room", "Category", "Price/night", "Note"]);
        for line in &overview.lines {
            table.add_row(vec![
                Cell::new(line.detail.id.map(|id| id.to_string()).unwrap_or_default()),
                Cell::new(line.room_label()),
                Cell::new(
                    line.room
                        .as_ref()
                        .and_then(|r| r.category.as_ref())
                        .map(|c| c.display_name())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(ctx.money(line.detail.price())),
                Cell::new(line.detail.note.clone().unwrap_or_default()),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!("  {:<12} {}", "Total:".bold(), ctx.money(overview.total).green().bold());

    if !overview.actions.is_empty() {
        let commands: Vec<String> = overview
            .actions
            .iter()
            .map(|a| format!("hostal reservations {} {}", a.command(), reservation.id.unwrap_or_default()))
            .collect();
        println!();
        println!("  {}", "Available actions:".bold());
        for (action, command) in overview.actions.iter().zip(commands) {
            println!("    {:<10} {}", action.label(), command.dimmed());
        }
    }
}

fn reservation_label(reservation: &Reservation) -> String {
    reservation
        .id
        .map(|id| format!("Reservation #{}", id))
        .unwrap_or_else(|| "Reservation".to_string())
}

fn status_color(status: ReservationStatus) -> Color {
    match status {
        ReservationStatus::Pending => Color::Yellow,
        ReservationStatus::Confirmed => Color::Blue,
        ReservationStatus::CheckIn => Color::Cyan,
        ReservationStatus::Finalized => Color::Green,
        ReservationStatus::Canceled => Color::DarkGrey,
    }
}

fn status_cell(status: ReservationStatus) -> Cell {
    Cell::new(status.as_str()).fg(status_color(status))
}

fn status_colored(status: ReservationStatus) -> colored::ColoredString {
    match status {
        ReservationStatus::Pending => status.as_str().yellow(),
        ReservationStatus::Confirmed => status.as_str().blue(),
        ReservationStatus::CheckIn => status.as_str().cyan(),
        ReservationStatus::Finalized => status.as_str().green(),
        ReservationStatus::Canceled => status.as_str().dimmed(),
    }
}
