//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// On/off switch for narration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    /// Enable
    On,
    /// Disable
    Off,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Turn spoken feedback on or off
    #[arg(long, value_enum)]
    narration: Option<Switch>,

    /// Speaking rate (0.1 - 10.0)
    #[arg(long)]
    rate: Option<f32>,

    /// Voice pitch (0.0 - 2.0)
    #[arg(long)]
    pitch: Option<f32>,

    /// Speech program template, e.g. "espeak-ng -s {wpm} -p {pitch}" (empty to clear)
    #[arg(long, value_name = "COMMAND")]
    speech_command: Option<String>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    narration: NarrationOutput,
    layout: crate::models::LayoutParams,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct NarrationOutput {
    enabled: bool,
    rate: f32,
    pitch: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_command: Option<String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_help: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&to_output(&config))
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.narration.is_none()
            && self.rate.is_none()
            && self.pitch.is_none()
            && self.speech_command.is_none()
            && self.theme.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --narration, --rate, --pitch, --speech-command, or --theme",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(switch) = self.narration {
            config.narration.enabled = switch == Switch::On;
        }
        if let Some(rate) = self.rate {
            config.narration.rate = rate;
        }
        if let Some(pitch) = self.pitch {
            config.narration.pitch = pitch;
        }
        if let Some(command) = &self.speech_command {
            config.narration.speech_command = if command.trim().is_empty() {
                None
            } else {
                Some(command.clone())
            };
        }
        if let Some(theme) = &self.theme {
            config.ui.theme_mode =
                theme.parse::<ThemeMode>().map_err(|e| CliError::validation(e.to_string()))?;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("✓ Configuration updated");
        Ok(())
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        narration: NarrationOutput {
            enabled: config.narration.enabled,
            rate: config.narration.rate,
            pitch: config.narration.pitch,
            speech_command: config.narration.speech_command.clone(),
        },
        layout: config.layout,
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
            show_help: config.ui.show_help,
        },
    }
}

fn output_human_readable(config: &Config) {
    println!("Configuration");
    println!();
    println!("Narration:");
    println!(
        "  Enabled:        {}",
        if config.narration.enabled { "yes" } else { "no" }
    );
    println!("  Rate:           {}", config.narration.rate);
    println!("  Pitch:          {}", config.narration.pitch);
    println!(
        "  Speech command: {}",
        config
            .narration
            .speech_command
            .as_deref()
            .unwrap_or("(none)")
    );
    println!();
    println!("Layout:");
    println!(
        "  Line:   start ({}, {}), spacing {}",
        config.layout.line_x0, config.layout.line_y, config.layout.line_spacing
    );
    println!(
        "  Grid:   start ({}, {}), spacing {} x {}",
        config.layout.grid_x0,
        config.layout.grid_y0,
        config.layout.grid_col_spacing,
        config.layout.grid_row_spacing
    );
    println!(
        "  Circle: center ({}, {})",
        config.layout.circle_cx, config.layout.circle_cy
    );
    println!();
    println!("UI:");
    println!("  Theme: {}", config.ui.theme_mode.as_str());
}
