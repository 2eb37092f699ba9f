use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write the resolved configuration to the config file")]
    Init {
        #[arg(long, short = 'f', help = "Force overwrite existing config")]
        force: bool,
    },
    #[command(about = "Show current configuration")]
    Show,
    #[command(about = "Show configuration file path")]
    Path,
}

pub async fn handle_config(cmd: ConfigCommand, format: OutputFormat, _verbose: bool) -> Result<()> {
    let formatter = get_formatter(format);

    match cmd {
        ConfigCommand::Init { force } => {
            let path = Config::config_path()
                .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            let config = Config::load().unwrap_or_default();
            let written = config.save().context("failed to write config")?;
            println!(
                "{}",
                formatter.format_message(&format!("Created config at: {}", written.display()))
            );
        }
        ConfigCommand::Show => {
            let config = mask_secrets(Config::load()?);
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigCommand::Path => match Config::config_path() {
            Some(path) if path.exists() => {
                println!("Config file (active): {}", path.display());
            }
            Some(path) => {
                println!("Config file (would be): {}", path.display());
            }
            None => {
                println!("Could not determine config directory.");
            }
        },
    }

    Ok(())
}

fn mask_secrets(mut config: Config) -> Config {
    if config.vector_store.token.is_some() {
        config.vector_store.token = Some("********".to_string());
    }
    if config.embedding.api_token.is_some() {
        config.embedding.api_token = Some("********".to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secrets() {
        let mut config = Config::default();
        config.vector_store.token = Some("AstraCS:secret".to_string());

        let masked = mask_secrets(config);
        assert_eq!(masked.vector_store.token.as_deref(), Some("********"));
        assert!(masked.embedding.api_token.is_none());
    }
}
