//! Reachability probe command handler

use colored::Colorize;

use crate::api::ping::{self, PingOutcome};
use crate::commands::AppContext;
use crate::error::Result;

/// `courier ping` -- check that the API server is reachable.
pub async fn run_ping(ctx: &AppContext) -> Result<()> {
    println!("Pinging {} ...", ctx.config.api.base_url.bold());
    match ping::ping(&ctx.client).await {
        PingOutcome::Ok(status) => {
            println!("{} HTTP {status}", "OK:".green().bold());
        }
        PingOutcome::Reached(status) => {
            println!("{} server answered HTTP {status}", "Reached:".yellow().bold());
        }
        PingOutcome::Unreachable(reason) => {
            println!("{} {reason}", "Network error:".red().bold());
        }
    }
    Ok(())
}
