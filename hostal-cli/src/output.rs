use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use hostal_core::{
    HostalResult, ListFilter, Notification, NotificationLevel, Page, PageRequest, Resource,
    ResourceService, SortOrder,
};
use serde::Serialize;

/// Paging and output flags shared by every `list` command.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 0, help = "Zero-based page number")]
    pub page: u32,

    #[arg(long, help = "Page size (defaults to display.page_size)")]
    pub size: Option<u32>,

    #[arg(long, help = "Sort as field[,asc|desc]; repeat for several keys")]
    pub sort: Vec<SortOrder>,

    #[arg(short, long, help = "Fetch every page before filtering")]
    pub all: bool,

    #[arg(
        short,
        long,
        default_value = "text",
        help = "Output format (text, json)"
    )]
    pub format: String,
}

impl ListArgs {
    pub fn request(&self, default_size: u32) -> PageRequest {
        PageRequest::new(self.page, self.size.unwrap_or(default_size)).with_sort(self.sort.clone())
    }
}

/// Position of a fetched page within the whole collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSummary {
    pub page: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
}

impl<T> From<&Page<T>> for PageSummary {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            total_count: page.total_count,
            total_pages: page.total_pages(),
            has_next: page.has_next(),
        }
    }
}

/// Items left after client-side filtering, with the page they came from.
pub struct Listing<T> {
    pub items: Vec<T>,
    pub page: Option<PageSummary>,
    pub fetched: usize,
}

pub async fn fetch_listing<T, F>(
    service: &ResourceService<'_, T>,
    args: &ListArgs,
    default_size: u32,
    filter: &F,
) -> HostalResult<Listing<T>>
where
    T: Resource,
    F: ListFilter<T>,
{
    let request = args.request(default_size);

    if args.all {
        let items = service.list_all(request.size).await?;
        let fetched = items.len();
        return Ok(Listing {
            items: filter.apply_owned(items),
            page: None,
            fetched,
        });
    }

    let page = service.list(&request).await?;
    let summary = PageSummary::from(&page);
    let fetched = page.items.len();
    Ok(Listing {
        items: filter.apply_owned(page.items),
        page: Some(summary),
        fetched,
    })
}

pub fn wants_json(format: &str) -> Result<bool> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        other => bail!("Unknown output format '{}', expected text or json", other),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::White))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn active_cell(active: bool) -> Cell {
    if active {
        Cell::new("✓ Active").fg(Color::Green)
    } else {
        Cell::new("✗ Inactive").fg(Color::DarkGrey)
    }
}

pub fn print_notification(notification: &Notification) {
    let line = match notification.level {
        NotificationLevel::Success => format!("{} {}", "✓".green().bold(), notification.message.green()),
        NotificationLevel::Info => format!("{} {}", "→".blue(), notification.message),
        NotificationLevel::Warning => format!("{} {}", "!".yellow().bold(), notification.message.yellow()),
        NotificationLevel::Error => format!("{} {}", "✗".red().bold(), notification.message.red()),
    };
    println!("{}", line);
}

pub fn print_listing_footer<T>(listing: &Listing<T>, noun: &str) {
    println!();
    match &listing.page {
        Some(page) => {
            println!(
                "  Showing {} of {} {} (page {} of {})",
                listing.items.len(),
                page.total_count,
                noun,
                page.page + 1,
                page.total_pages.max(1)
            );
            if page.has_next {
                println!(
                    "  {}",
                    format!("More results with --page {} or --all", page.page + 1).dimmed()
                );
            }
        }
        None => println!("  Total: {} {}", listing.items.len(), noun),
    }
    if listing.items.len() < listing.fetched {
        println!(
            "  {}",
            format!("{} hidden by filters", listing.fetched - listing.items.len()).dimmed()
        );
    }
}

pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
