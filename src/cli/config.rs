use std::path::Path;

use planner::{Config, KeyPolicy};
use tracing::instrument;

use super::render::{self, Tone};

#[derive(Debug, clap::Parser)]
/// Show or initialize configuration
///
/// Configuration is read from planner.toml in the working directory, or from
/// the path given with --config.
///
/// Available configuration keys:
///   `default_file`                 Course source loaded when --file is not given
///   `key_policy`                   as-supplied (default) or uppercase
///   `warn_dangling_prerequisites`  Log unknown prerequisites on load (default: false)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the path of the configuration file
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, path: &Path) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                let config = Config::load_or_default(path)?;
                println!("{}", describe(&config, path));
                Ok(())
            }
            ConfigCommand::Path => {
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Init { force } => init(path, force),
        }
    }
}

fn describe(config: &Config, path: &Path) -> String {
    let origin = if path.exists() {
        format!("({})", path.display())
    } else {
        "(defaults)".to_string()
    };
    let policy = match config.key_policy() {
        KeyPolicy::AsSupplied => "as-supplied",
        KeyPolicy::Uppercase => "uppercase",
    };

    [
        format!("Configuration {}", render::paint(&origin, Tone::Dim)),
        format!("  default_file: {}", config.default_file().display()),
        format!("  key_policy: {policy}"),
        format!(
            "  warn_dangling_prerequisites: {}",
            config.warn_dangling_prerequisites
        ),
    ]
    .join("\n")
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!(
        "{}",
        render::paint(&format!("Wrote {}", path.display()), Tone::Success)
    );
    Ok(())
}
