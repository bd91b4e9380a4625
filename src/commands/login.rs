use crate::config;
use crate::output::Output;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;

pub async fn handle_login(token: Option<String>, out: &Output) -> Result<()> {
    let token = match token {
        Some(t) => t,
        None => rpassword::prompt_password("Paste your Graphcool token: ")?,
    };
    let token = token.trim();
    if token.is_empty() {
        return Err(anyhow!("Token must not be empty."));
    }

    let mut cfg = config::load_config().unwrap_or_default();
    cfg.token = Some(token.to_string());
    config::save_config(&cfg).context("Failed to save credentials")?;

    out.success(format!("{}", "✔ Login successful! Token saved.".green()));
    Ok(())
}
