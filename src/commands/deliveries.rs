//! Delivery list and detail command handlers

use colored::Colorize;
use prettytable::{row, Table};

use crate::api::deliveries::{self, DeliveryDetail, DeliveryFilter};
use crate::commands::AppContext;
use crate::error::{CourierError, Result};

fn require_signed_in(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        return Err(CourierError::Auth(
            "not signed in; run `courier login <email>` first".to_string(),
        )
        .into());
    }
    Ok(())
}

/// `courier deliveries [--date] [--status]` -- list assigned deliveries.
pub async fn run_list(
    ctx: &AppContext,
    date: Option<String>,
    status: Option<String>,
) -> Result<()> {
    require_signed_in(ctx)?;

    let filter = DeliveryFilter { date, status };
    let summaries = deliveries::list_deliveries(&ctx.client, &filter).await?;

    if summaries.is_empty() {
        println!("{}", "No deliveries assigned.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "ORDER", "CLIENT", "ADDRESS", "DUE", "STATUS", "ITEMS"]);
    for delivery in &summaries {
        table.add_row(row![
            delivery.id,
            delivery.order_number,
            delivery.client_name,
            delivery.address_line1,
            delivery.scheduled_for.format("%Y-%m-%d %H:%M"),
            delivery.status,
            delivery.item_count,
        ]);
    }
    table.printstd();
    println!("{} deliveries", summaries.len());
    Ok(())
}

/// `courier delivery <id>` -- show full detail for one delivery.
pub async fn run_detail(ctx: &AppContext, id: &str) -> Result<()> {
    require_signed_in(ctx)?;

    let detail = deliveries::delivery_detail(&ctx.client, id).await?;
    print_detail(&detail);
    Ok(())
}

fn print_detail(detail: &DeliveryDetail) {
    println!(
        "{} {}",
        detail.order_number.bold(),
        format!("({})", detail.status).cyan()
    );
    println!("  client:    {}", detail.client_name);
    println!("  address:   {}", detail.full_address);
    println!("  phone:     {}", detail.phone);
    println!(
        "  scheduled: {}",
        detail.scheduled_for.format("%Y-%m-%d %H:%M")
    );
    if let Some(vendor) = &detail.vendor_name {
        println!("  vendor:    {vendor}");
    }
    if let Some(total) = detail.total_cents {
        println!("  total:     ${:.2}", total as f64 / 100.0);
    }
    if !detail.notes.is_empty() {
        println!("  notes:     {}", detail.notes);
    }

    if !detail.items.is_empty() {
        println!("  items:");
        for item in &detail.items {
            println!("    {} x{} ({})", item.name, item.qty, item.vendor_name);
        }
    }

    let history: [(&str, Option<chrono::DateTime<chrono::Utc>>); 4] = [
        ("picked up", detail.picked_up_at),
        ("in transit", detail.in_transit_at),
        ("delivered", detail.delivered_at),
        ("exception", detail.exception_at),
    ];
    let any_history = history.iter().any(|(_, at)| at.is_some());
    if any_history {
        println!("  history:");
        for (label, at) in history {
            if let Some(at) = at {
                println!("    {label:<10} {}", at.format("%Y-%m-%d %H:%M"));
            }
        }
    }
    if let Some(reason) = &detail.exception_reason {
        println!("  {} {}", "exception:".red().bold(), reason);
    }
}
