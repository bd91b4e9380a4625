use crate::config::{self, TOKEN_ENV};
use crate::output::Output;
use anyhow::{Context, Result};
use colored::Colorize;

/// Warning for a token that still authenticates after the stored one is gone.
fn env_token_notice(env_token: Option<&str>) -> Option<String> {
    env_token.filter(|t| !t.is_empty()).map(|_| {
        format!(
            "{} is still set, so graphcool commands keep authenticating. Unset it (or remove it from .env) to fully log out.",
            TOKEN_ENV
        )
    })
}

pub async fn handle_logout(out: &Output) -> Result<()> {
    let mut cfg = config::load_config().context("Could not load the graphcool credentials file.")?;
    let env_token = std::env::var(TOKEN_ENV).ok();

    if cfg.token.is_none() {
        out.write(format!("{}", "No stored Graphcool token, nothing to remove.".yellow()));
    } else {
        cfg.token = None;
        config::save_config(&cfg).context("Failed to clear the stored Graphcool token.")?;
        out.write(format!("{}", "✔ Removed the stored Graphcool token.".green()));
    }

    if let Some(notice) = env_token_notice(env_token.as_deref()) {
        out.warn(format!("{}", notice.yellow()));
    }
    Ok(())
}
