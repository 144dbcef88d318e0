//! Telegram Drive Bot setup wizard.
//!
//! Prompts for the bot token, listen port and public webhook URL, then writes
//! `config.toml` to the project root (`DRIVE_BOT_ROOT`, or the current
//! directory).

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;

// ── Config formatting ──────────────────────────────────────────────────────────

struct ConfigParams<'a> {
    bot_token: &'a str,
    port: u16,
    public_url: &'a str,
    send_timeout_secs: u64,
}

/// Produces a valid config.toml string. Extracted so it can be unit-tested.
fn format_config(p: &ConfigParams<'_>) -> String {
    let url_line = if p.public_url.is_empty() {
        "# public_url = \"https://your.domain/webhook\"".to_owned()
    } else {
        format!("public_url = \"{}\"", p.public_url)
    };

    let bot_token = p.bot_token;
    let port = p.port;
    let send_timeout_secs = p.send_timeout_secs;

    format!(
        r#"[telegram]
bot_token = "{bot_token}"

[server]
host = "0.0.0.0"
port = {port}

[webhook]
{url_line}
send_timeout_secs = {send_timeout_secs}
"#
    )
}

fn parse_port(input: &str) -> Result<u16> {
    if input.is_empty() {
        return Ok(5000);
    }
    input
        .parse()
        .with_context(|| format!("Invalid port: {input}"))
}

// ── Entry point ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let project_root =
        PathBuf::from(std::env::var("DRIVE_BOT_ROOT").unwrap_or_else(|_| ".".to_string()));

    println!("=== Telegram Drive Bot Setup ===\n");

    let read_line = |prompt: &str| -> Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        Ok(buf.trim().to_owned())
    };

    let bot_token = read_line("Telegram bot token: ")?;
    if bot_token.is_empty() {
        anyhow::bail!("A bot token is required");
    }
    let port = parse_port(&read_line("Listen port [5000]: ")?)?;
    let public_url = read_line("Public webhook URL (optional, e.g. https://your.domain/webhook): ")?;

    let config = format_config(&ConfigParams {
        bot_token: &bot_token,
        port,
        public_url: &public_url,
        send_timeout_secs: 10,
    });

    let config_path = project_root.join("config.toml");
    std::fs::write(&config_path, &config)
        .with_context(|| format!("Could not write {}", config_path.display()))?;

    println!("\n✓  config.toml saved to {}", config_path.display());
    println!("   Run the bot with:  cargo run");
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
