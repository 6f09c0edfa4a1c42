//! `dangle config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

/// Token with everything but the ends hidden
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    config.token = config.token.as_deref().map(mask);

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            let unset = || "(not set)".dimmed().to_string();

            println!("{}", "Current Configuration:".bold());
            println!();
            println!(
                "  {} {}",
                "endpoint:".bold(),
                config.endpoint.clone().unwrap_or_else(unset)
            );
            println!("  {} {}", "token:".bold(), config.token.clone().unwrap_or_else(unset));
            println!("  {} {}", "zone_id:".bold(), config.zone_id.clone().unwrap_or_else(unset));
            println!("  {} {}", "ip_inventory:".bold(), config.ip_inventory);
            println!("  {} {}", "name_inventory:".bold(), config.name_inventory);
            println!("  {} {}", "recognized_report:".bold(), config.recognized_report);
            println!("  {} {}", "unknown_report:".bold(), config.unknown_report);
            println!("  {} {}", "format:".bold(), config.format);
            println!(
                "  {} {}",
                "page_size:".bold(),
                config.page_size.map_or_else(unset, |n| n.to_string())
            );
            println!("  {} {}/s", "rate_limit:".bold(), config.rate_limit);

            let t = &config.timeouts;
            println!(
                "  {} connect {}s, tls {}s, header {}s, request {}s, idle {}s, keep-alive {}s, {} idle/host",
                "timeouts:".bold(),
                t.connect,
                t.tls_handshake,
                t.response_header,
                t.request,
                t.idle_connection,
                t.keep_alive,
                t.max_idle_per_host
            );

            if config.ripe_domains.is_empty() {
                println!("  {} {}", "ripe_domains:".bold(), "(built-in only)".dimmed());
            } else {
                println!("  {}", "ripe_domains:".bold());
                for spec in &config.ripe_domains {
                    println!("    - {}", serde_json::to_string(spec)?);
                }
            }
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = if matches!(key, "token" | "api_token") {
        mask(value)
    } else {
        value.to_string()
    };
    println!("{} {} set to {}.", "Success:".green().bold(), key, shown.cyan());

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
