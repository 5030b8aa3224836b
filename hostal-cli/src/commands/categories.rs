use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};
use hostal_core::{CategoryFilter, CategoryForm, CategoryName, Notification};

use crate::commands::rooms::default_list_args;
use crate::context::CliContext;
use crate::output::{
    active_cell, fetch_listing, new_table, or_dash, print_json, print_listing_footer,
    print_notification, truncate, wants_json, ListArgs,
};

#[derive(Subcommand)]
pub enum CategoriesCommand {
    #[command(about = "List room categories")]
    List {
        #[arg(short, long, help = "Match name or description")]
        text: Option<String>,

        #[arg(long, help = "Minimum base price")]
        min_price: Option<f64>,

        #[arg(long, help = "Maximum base price")]
        max_price: Option<f64>,

        #[arg(long, help = "Only active categories")]
        active: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Show one category")]
    Show {
        id: i64,

        #[arg(short, long, default_value = "text", help = "Output format (text, json)")]
        format: String,
    },

    #[command(about = "Create a category")]
    Create {
        #[arg(help = "SIMPLE, DOBLE, SUITE or FAMILIAR")]
        name: CategoryName,

        #[arg(short, long, help = "Base price per night")]
        price: f64,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, help = "Create the category inactive")]
        inactive: bool,
    },

    #[command(about = "Update an existing category")]
    Update {
        id: i64,

        #[arg(short, long)]
        name: Option<CategoryName>,

        #[arg(short, long)]
        price: Option<f64>,

        #[arg(short, long)]
        description: Option<String>,
    },

    #[command(about = "Delete a category")]
    Delete {
        id: i64,

        #[arg(short, long, help = "Skip the confirmation check")]
        yes: bool,
    },

    #[command(about = "Mark a category as active")]
    Activate { id: i64 },

    #[command(about = "Mark a category as inactive")]
    Deactivate { id: i64 },
}

pub async fn handle_categories_command(
    ctx: &CliContext,
    cmd: Option<CategoriesCommand>,
) -> Result<()> {
    let categories = ctx.api.categories();

    match cmd.unwrap_or(CategoriesCommand::List {
        text: None,
        min_price: None,
        max_price: None,
        active: false,
        list: default_list_args(),
    }) {
        CategoriesCommand::List {
            text,
            min_price,
            max_price,
            active,
            list,
        } => {
            let filter = CategoryFilter {
                text,
                min_price,
                max_price,
                active_only: active,
            };
            cmd_categories_list(ctx, &filter, &list).await
        }
        CategoriesCommand::Show { id, format } => {
            let json = wants_json(&format)?;
            let category = categories.get(id).await?;
            if json {
                return print_json(&category);
            }

            println!("{}", category.display_name().cyan().bold());
            println!("{}", "═".repeat(40).dimmed());
            println!("  {:<14} {}", "ID:".bold(), id);
            println!("  {:<14} {}", "Base price:".bold(), ctx.money(category.price()));
            println!(
                "  {:<14} {}",
                "Status:".bold(),
                if category.is_active() {
                    "Active".green()
                } else {
                    "Inactive".dimmed()
                }
            );
            println!(
                "  {:<14} {}",
                "Description:".bold(),
                or_dash(category.description.as_deref())
            );
            Ok(())
        }
        CategoriesCommand::Create {
            name,
            price,
            description,
            inactive,
        } => {
            let form = CategoryForm {
                name,
                description,
                base_price: price,
                active: !inactive,
            };
            let category = form.submit(&ctx.api, None).await?;
            print_notification(&Notification::created(&format!(
                "Category {}",
                category.display_name()
            )));
            Ok(())
        }
        CategoriesCommand::Update {
            id,
            name,
            price,
            description,
        } => {
            let current = categories.get(id).await?;
            let mut form = CategoryForm::from_category(&current)
                .or_else(|| {
                    name.map(|name| CategoryForm {
                        name,
                        description: current.description.clone(),
                        base_price: current.price(),
                        active: current.is_active(),
                    })
                })
                .ok_or_else(|| anyhow!("Category {} has no name; pass --name", id))?;

            if let Some(name) = name {
                form.name = name;
            }
            if let Some(price) = price {
                form.base_price = price;
            }
            if description.is_some() {
                form.description = description;
            }

            let category = form.submit(&ctx.api, Some(id)).await?;
            print_notification(&Notification::updated(&format!(
                "Category {}",
                category.display_name()
            )));
            Ok(())
        }
        CategoriesCommand::Delete { id, yes } => {
            if !yes {
                bail!("Deleting category {} cannot be undone; re-run with --yes", id);
            }
            categories.delete(id).await?;
            print_notification(&Notification::deleted(&format!("Category #{}", id)));
            Ok(())
        }
        CategoriesCommand::Activate { id } => {
            categories.activate(id).await?;
            print_notification(&Notification::activated(&format!("Category #{}", id)));
            Ok(())
        }
        CategoriesCommand::Deactivate { id } => {
            categories.deactivate(id).await?;
            print_notification(&Notification::deactivated(&format!("Category #{}", id)));
            Ok(())
        }
    }
}

async fn cmd_categories_list(
    ctx: &CliContext,
    filter: &CategoryFilter,
    args: &ListArgs,
) -> Result<()> {
    let json = wants_json(&args.format)?;
    let listing = fetch_listing(&ctx.api.categories(), args, ctx.page_size(), filter).await?;

    if json {
        return print_json(&listing.items);
    }

    if listing.items.is_empty() {
        println!("{}", "No categories found.".yellow());
        return Ok(());
    }

    println!("{}", "Room Categories".cyan().bold());
    println!();

    let mut table = new_table(&["ID", "Name", "Base price", "Description", "Status"]);
    for category in &listing.items {
        table.add_row(vec![
            Cell::new(category.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(category.display_name()).fg(Color::Cyan),
            Cell::new(ctx.money(category.price())),
            Cell::new(truncate(&or_dash(category.description.as_deref()), 40)),
            active_cell(category.is_active()),
        ]);
    }

    println!("{table}");
    print_listing_footer(&listing, "categories");
    Ok(())
}
