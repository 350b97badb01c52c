//! Site subcommand handlers for TransAssist.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use transassist_config::{Config, ConfigValidator};
use transassist_core::SiteRegistry;

use crate::adapters::hostname_of;
use crate::register::create_background_service;

#[derive(Serialize)]
struct SiteRow<'a> {
    host: &'a str,
    name: &'a str,
    #[serde(rename = "buttonPosition")]
    button_position: String,
}

/// List registered sites in match order, the default profile last.
pub(crate) fn sites_list(registry: &SiteRegistry, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<SiteRow<'_>> = registry
        .sites()
        .chain(std::iter::once(registry.default_config()))
        .map(|site| SiteRow {
            host: site.key(),
            name: site.name(),
            button_position: format!("{:?}", site.button_position()).to_lowercase(),
        })
        .collect();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            println!("{:<40} {:<24} {}", "HOST", "NAME", "BUTTON");
            println!("{}", "-".repeat(72));
            for row in rows {
                println!("{:<40} {:<24} {}", row.host, row.name, row.button_position);
            }
        }
    }
    Ok(())
}

/// Show the config a host resolves to and whether the assistant loads there.
pub(crate) async fn check_site(
    config: &Config,
    registry: Arc<SiteRegistry>,
    host: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hostname = hostname_of(host);
    let service = create_background_service(config, registry.clone());
    let site = registry.resolve(&hostname);

    println!("Host:           {}", hostname);
    println!("Config:         {} ({})", site.name(), site.key());
    println!("Supported:      {}", registry.is_supported(&hostname));
    println!("Load assistant: {}", service.should_inject(&hostname).await);
    let methods: Vec<&str> = site
        .profile()
        .source_text_methods
        .iter()
        .map(|m| m.as_str())
        .collect();
    println!("Source methods: {}", methods.join(", "));
    Ok(())
}

/// Add or remove a host from the force-enabled list.
pub(crate) async fn force_enable(
    config: &Config,
    registry: Arc<SiteRegistry>,
    host: &str,
    enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hostname = hostname_of(host);
    let service = create_background_service(config, registry);
    let changed = service.set_force_enabled(&hostname, enabled).await?;

    match (changed, enabled) {
        (true, true) => println!("Force-enabled {}", hostname),
        (true, false) => println!("{} removed from the force-enabled list", hostname),
        (false, true) => println!("{} is already force-enabled", hostname),
        (false, false) => println!("{} was not force-enabled", hostname),
    }
    if enabled && service.is_site_supported(&hostname) {
        info!("{} is a registered site; force-enabling has no effect", hostname);
    }
    Ok(())
}

/// Validate the loaded config. Errors fail the command.
pub(crate) fn validate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !result.is_valid() {
        return Err(format!("{} configuration error(s)", result.errors.len()).into());
    }
    println!("Configuration OK");
    Ok(())
}
