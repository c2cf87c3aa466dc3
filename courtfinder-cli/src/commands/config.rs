//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use clap::Subcommand;
use serde_json::{json, Map, Value};

use courtfinder::config::{config_file_path, ConfigFile, ConfigKey};

use super::common::print_json;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., mapbox.zoom)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., mapbox.zoom)
        key: String,

        /// Value to set (an empty string clears the access token)
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, json: bool) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key, json),
        ConfigCommands::Set { key, value } => run_set(&key, &value, json),
        ConfigCommands::List => run_list(json),
        ConfigCommands::Path => run_path(json),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'courtfinder config list' to see available keys.",
            key
        ))
    })
}

/// Mask all but the last four characters of a secret.
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// JSON object for a single setting; an unset value is `null`.
fn setting_json(config_key: &ConfigKey, value: &str) -> Value {
    let value = if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    };
    json!({ "key": config_key.name(), "value": value })
}

/// Get a configuration value.
fn run_get(key: &str, json: bool) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load()?;
    let value = config_key.get(&config);

    if json {
        return print_json(&setting_json(&config_key, &value));
    }

    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Set a configuration value.
fn run_set(key: &str, value: &str, json: bool) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load()?;
    config_key.set(&mut config, value)?;
    config.save()?;

    let shown = if config_key.is_secret() {
        mask(value)
    } else {
        value.to_string()
    };
    if json {
        return print_json(&setting_json(&config_key, &shown));
    }
    println!("Set {} = {}", config_key.name(), shown);

    Ok(())
}

/// List all configuration settings.
fn run_list(json: bool) -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    let display_value = |key: &ConfigKey| {
        let value = key.get(&config);
        if key.is_secret() {
            mask(&value)
        } else {
            value
        }
    };

    if json {
        let entries: Map<String, Value> = ConfigKey::all()
            .iter()
            .map(|key| (key.name(), Value::String(display_value(key))))
            .collect();
        return print_json(&entries);
    }

    println!("Configuration Settings");
    println!("======================");
    println!();

    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }

        let value = display_value(key);
        if value.is_empty() {
            println!("  {} = (not set)", key.key_name());
        } else {
            println!("  {} = {}", key.key_name(), value);
        }
    }

    if !config.dedup.class_radii.is_empty() {
        println!();
        println!("[dedup.radius]");
        for (class, radius) in &config.dedup.class_radii {
            println!("  {} = {}", class, radius);
        }
    }

    Ok(())
}

/// Show the configuration file path.
fn run_path(json: bool) -> Result<(), CliError> {
    let path = config_file_path();
    if json {
        return print_json(&json!({ "path": path.display().to_string() }));
    }
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask("pk.abcdef1234"), "*********1234");
    }

    #[test]
    fn test_parse_key_error_mentions_list() {
        let err = parse_key("mapbox.nope").unwrap_err();
        assert!(err.to_string().contains("courtfinder config list"));
    }

    #[test]
    fn test_setting_json() {
        let key = parse_key("mapbox.zoom").unwrap();
        assert_eq!(
            setting_json(&key, "16"),
            json!({ "key": "mapbox.zoom", "value": "16" })
        );

        let token = parse_key("mapbox.access_token").unwrap();
        assert_eq!(
            setting_json(&token, ""),
            json!({ "key": "mapbox.access_token", "value": null })
        );
    }
}
