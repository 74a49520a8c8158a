//! Logs in to an authentication service and prints the session.
//!
//! ```text
//! YGG_BASE_URL=https://auth.example.com/ \
//! YGG_USERNAME=alice@example.com YGG_PASSWORD=secret \
//!     cargo run -p login
//! ```
//!
//! `YGG_ACCESS_TOKEN` may be set instead of (or next to) the password to
//! log in with a cached token. `YGG_PROXY` routes requests through a proxy.

use std::env;

use ygg::prelude::*;

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ygg::telemetry::init_tracing("info");

    let mut builder = Ygg::builder();
    if let Some(base_url) = var("YGG_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    if let Some(proxy) = var("YGG_PROXY") {
        builder = builder.proxy(proxy);
    }
    let ygg = builder.build()?;

    let mut session = ygg.session();
    session.set_username(var("YGG_USERNAME").ok_or("YGG_USERNAME is not set")?);
    if let Some(password) = var("YGG_PASSWORD") {
        session.set_password(password);
    }
    if let Some(token) = var("YGG_ACCESS_TOKEN") {
        session.set_access_token(token);
    }

    if !session.can_log_in() {
        return Err("set YGG_PASSWORD or YGG_ACCESS_TOKEN".into());
    }

    if let Err(e) = session.log_in().await {
        if let Some(remote) = e.remote() {
            if remote.kind() == RemoteErrorKind::UserMigrated {
                eprintln!("account migrated: log in with your email address");
            }
        }
        return Err(e.into());
    }

    if !session.can_play_online() {
        if let Some(profile) = session.available_profiles().first().cloned() {
            tracing::info!(profile = %profile, "no profile selected, picking the first one");
            session.select_game_profile(Some(&profile)).await?;
        }
    }

    println!("{session}");
    Ok(())
}
