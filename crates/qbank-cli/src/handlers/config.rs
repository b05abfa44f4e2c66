//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use qbank_core::ClientConfig;
use serde::Serialize;

/// What `config show` prints: the file settings and the resolved client
#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    #[serde(flatten)]
    file: &'a Config,
    resolved_client: &'a ClientConfig,
}

/// Handle the config command
pub fn handle_config(
    args: ConfigArgs,
    config: &Config,
    client: &ClientConfig,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, client, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
    }
}

fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    client: &ClientConfig,
    output: &mut OutputWriter,
) -> Result<()> {
    let effective = EffectiveConfig {
        file: config,
        resolved_client: client,
    };

    let content = match args.format {
        ConfigFormat::Json => serde_json::to_string_pretty(&effective)
            .map_err(|e| Error::config(format!("Failed to serialize as JSON: {}", e)))?,
        ConfigFormat::Yaml => serde_yaml::to_string(&effective)
            .map_err(|e| Error::config(format!("Failed to serialize as YAML: {}", e)))?,
    };

    output.writeln(content.trim_end())?;
    if client.market_is_placeholder() {
        output.warning("⚠ market_base_url is still the placeholder address")?;
    }
    Ok(())
}

fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::starter().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to point the clients at your servers.")
}
