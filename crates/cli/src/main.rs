mod config;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hueprint_core::engine::{generate_theme_vars, render_stylesheet};
use hueprint_core::metadata::unocss_colors;
use hueprint_core::preset::{NoCache, PresetInputs, Size, SizeSettings, build_preset};
use hueprint_core::builtin;
use hueprint_protocol::ThemeMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "hueprint",
    version,
    about = "Derive theme CSS variables and component presets from seed colors"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ThemeSource {
    /// Theme preset file (JSON, or TOML by extension).
    #[arg(long, conflicts_with = "theme")]
    preset: Option<PathBuf>,
    /// Built-in theme name.
    #[arg(long, default_value = "default")]
    theme: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a stylesheet with `:root` (light) and `.dark` variables.
    Css {
        #[command(flatten)]
        source: ThemeSource,
    },
    /// Print the variable map for one mode as JSON.
    Vars {
        #[command(flatten)]
        source: ThemeSource,
        #[arg(long)]
        dark: bool,
    },
    /// Print the UnoCSS color table as JSON.
    Uno,
    /// Assemble a component preset and print it as JSON.
    Preset {
        /// Base preset to graft onto (JSON). Defaults to an empty object.
        #[arg(long)]
        base: Option<PathBuf>,
        #[arg(long, default_value = "default")]
        theme: String,
        #[arg(long, default_value = "medium")]
        size: Size,
        /// Control padding in rem.
        #[arg(long)]
        padding: Option<f32>,
        /// Corner radius in rem.
        #[arg(long)]
        rounded: Option<f32>,
        /// Base font size in px.
        #[arg(long)]
        font_size: Option<f32>,
        #[arg(long)]
        pretty: bool,
    },
    /// List built-in themes.
    Themes,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Css { source } => {
            let preset = config::resolve_theme(source.preset.as_deref(), &source.theme)?;
            write!(out, "{}", render_stylesheet(&preset))?;
        }
        Command::Vars { source, dark } => {
            let preset = config::resolve_theme(source.preset.as_deref(), &source.theme)?;
            let vars = generate_theme_vars(&preset, ThemeMode::from_dark(dark));
            writeln!(out, "{}", serde_json::to_string_pretty(&vars)?)?;
        }
        Command::Uno => {
            writeln!(out, "{}", serde_json::to_string_pretty(&unocss_colors())?)?;
        }
        Command::Preset {
            base,
            theme,
            size,
            padding,
            rounded,
            font_size,
            pretty,
        } => {
            let base_preset = config::load_base(base.as_deref())
                .with_context(|| "failed to load base preset")?;
            let defaults = SizeSettings::default();
            let sizes = SizeSettings {
                size,
                padding: padding.unwrap_or(defaults.padding),
                rounded: rounded.unwrap_or(defaults.rounded),
                font_size: font_size.unwrap_or(defaults.font_size),
            };
            let preset = build_preset(&base_preset, &PresetInputs::new(theme, sizes), &mut NoCache);
            let json = if pretty {
                serde_json::to_string_pretty(preset.as_ref())?
            } else {
                serde_json::to_string(preset.as_ref())?
            };
            writeln!(out, "{json}")?;
        }
        Command::Themes => {
            for preset in builtin::presets() {
                writeln!(out, "{:<10} {}", preset.name, preset.primary)?;
            }
        }
    }
    Ok(())
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_preset_flags() {
        let cli = Cli::try_parse_from([
            "hueprint", "preset", "--size", "lg", "--rounded", "0.5", "--font-size", "15",
        ])
        .unwrap();
        let Command::Preset {
            size,
            rounded,
            font_size,
            padding,
            ..
        } = cli.command
        else {
            unreachable!("expected preset command");
        };
        assert_eq!(size, Size::Large);
        assert_eq!(rounded, Some(0.5));
        assert_eq!(font_size, Some(15.0));
        assert_eq!(padding, None);
    }

    #[test]
    fn preset_file_conflicts_with_theme_name() {
        let result = Cli::try_parse_from([
            "hueprint", "css", "--preset", "a.json", "--theme", "rose",
        ]);
        assert!(result.is_err());
    }
}
