//! Sign-in and session command handlers

use colored::Colorize;

use crate::api::auth;
use crate::api::transport::ApiFailure;
use crate::commands::AppContext;
use crate::error::{CourierError, Result};

/// `courier login <email>` -- request a magic sign-in link.
pub async fn run_login(ctx: &AppContext, email: &str) -> Result<()> {
    let ack = auth::request_magic_link(&ctx.client, email).await?;
    if ack.ok {
        println!(
            "{} Check {} for your sign-in link, then run {}.",
            "Link requested.".green().bold(),
            email.bold(),
            "courier exchange <token>".cyan()
        );
    } else {
        println!("{}", "The server declined the link request.".yellow());
    }
    Ok(())
}

/// `courier exchange <token>` -- turn a magic-link token into a session.
pub async fn run_exchange(ctx: &AppContext, token: &str) -> Result<()> {
    let exchange = match auth::exchange_token(&ctx.client, token).await {
        Ok(exchange) => exchange,
        Err(e) => {
            // An auth-status rejection means the link is bad, not that the
            // world is on fire; say so in the driver's terms.
            if let Some(failure) = e.downcast_ref::<ApiFailure>() {
                if matches!(failure.status(), Some(400) | Some(401) | Some(410)) {
                    return Err(CourierError::Auth(
                        "this link is invalid or has expired; request a new one with `courier login`"
                            .to_string(),
                    )
                    .into());
                }
            }
            return Err(e);
        }
    };

    ctx.session.sign_in(exchange).await?;

    let driver = ctx.session.driver();
    let who = driver
        .as_ref()
        .and_then(|d| d.name.clone())
        .or_else(|| driver.as_ref().map(|d| d.email.clone()))
        .unwrap_or_else(|| "driver".to_string());
    println!("{} Signed in as {}.", "Welcome!".green().bold(), who.bold());
    Ok(())
}

/// `courier whoami` -- show the signed-in driver.
pub async fn run_whoami(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        println!("{}", "Not signed in.".yellow());
        return Ok(());
    }
    match ctx.session.driver() {
        Some(driver) => {
            println!("{}", "Signed in".green().bold());
            if let Some(name) = &driver.name {
                println!("  name:  {name}");
            }
            println!("  email: {}", driver.email);
            println!("  id:    {}", driver.id);
            println!("  (profile cached at sign-in)");
        }
        None => println!("{}", "Signed in (no cached profile).".green()),
    }
    Ok(())
}

/// `courier logout` -- end the session locally and (best-effort) remotely.
pub async fn run_logout(ctx: &AppContext) -> Result<()> {
    let was_authenticated = ctx.session.is_authenticated();
    ctx.session.sign_out(&ctx.client).await?;
    if was_authenticated {
        println!("{}", "Signed out.".green());
    } else {
        println!("{}", "Already signed out.".yellow());
    }
    Ok(())
}
