use std::path::{Path, PathBuf};

mod config;
mod list;
mod menu;
mod render;
mod show;
mod validate;

use anyhow::Context;
use clap::ArgAction;
use list::List;
use menu::Menu;
use planner::{storage, Catalog, Config, LoadReport};
use show::Show;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The course source to load (defaults to the configured file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// The configuration file
    #[arg(short, long, global = true, default_value = Config::FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.execute()
    }

    /// `config` subcommands only get the config path, so they keep working
    /// when the file does not parse.
    fn execute(self) -> anyhow::Result<()> {
        let command = self
            .command
            .unwrap_or_else(|| Command::Menu(Menu::default()));
        let workspace = || Workspace::load(&self.config, self.file.as_deref());

        match command {
            Command::Menu(command) => command.run(&workspace()?),
            Command::List(command) => command.run(&workspace()?),
            Command::Show(command) => command.run(&workspace()?),
            Command::Validate(command) => command.run(&workspace()?),
            Command::Config(command) => command.run(&self.config),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Interactive course planner menu (default)
    Menu(Menu),

    /// List all courses in identifier order
    List(List),

    /// Show a course and its prerequisites
    Show(Show),

    /// Check the course source for malformed lines and broken prerequisites
    Validate(Validate),

    /// Show or initialize configuration
    Config(config::Command),
}

/// Settings resolved from the command line and configuration file.
#[derive(Debug)]
pub struct Workspace {
    config: Config,
    source: PathBuf,
}

impl Workspace {
    /// Reads the configuration and picks the course source: `file` if given,
    /// otherwise the configured default.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn load(config_path: &Path, file: Option<&Path>) -> anyhow::Result<Self> {
        let config = Config::load_or_default(config_path)?;
        let source = file.map_or_else(|| config.default_file().to_path_buf(), Path::to_path_buf);
        Ok(Self { config, source })
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The course source selected by `--file` or the configuration.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Reads and parses a course source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    pub fn load_report(path: &Path) -> anyhow::Result<LoadReport> {
        storage::load_courses(path)
            .with_context(|| format!("failed to load courses from {}", path.display()))
    }

    /// Loads the selected source into a fresh catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let report = Self::load_report(&self.source)?;
        Ok(self.build_catalog(report))
    }

    /// Builds a catalog using the configured key policy.
    pub fn build_catalog(&self, report: LoadReport) -> Catalog {
        build_catalog(report, &self.config)
    }
}

/// Builds a fresh catalog from `report`, warning about unknown prerequisites
/// if configured to.
fn build_catalog(report: LoadReport, config: &Config) -> Catalog {
    let catalog = report.into_catalog(config.key_policy());
    if config.warn_dangling_prerequisites {
        for dangling in planner::domain::prerequisites::dangling_prerequisites(&catalog) {
            tracing::warn!(
                "Course {} lists unknown prerequisite {}",
                dangling.course,
                dangling.prerequisite
            );
        }
    }
    catalog
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use planner::KeyPolicy;

    use super::*;

    fn workspace(source: PathBuf, config: Config) -> Workspace {
        Workspace { config, source }
    }

    fn cli(config: &Path, args: &[&str]) -> Cli {
        let config = config.to_str().unwrap();
        Cli::try_parse_from(["planner", "--config", config].iter().chain(args)).unwrap()
    }

    #[test]
    fn no_subcommand_defaults_to_menu() {
        let cli = Cli::try_parse_from(["planner"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("planner.toml"));
        assert!(cli.file.is_none());
    }

    #[test]
    fn global_options_follow_subcommands() {
        let cli = Cli::try_parse_from(["planner", "show", "csci100", "-vv", "--file", "x.csv"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("x.csv")));
        assert!(matches!(cli.command, Some(Command::Show(_))));
    }

    #[test]
    fn load_catalog_uses_configured_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"csci100,Intro\n").unwrap();

        let mut config = Config::default();
        config.set_key_policy(KeyPolicy::Uppercase);
        let catalog = workspace(file.path().to_path_buf(), config)
            .load_catalog()
            .unwrap();
        assert!(catalog.lookup("CSCI100").is_some());

        let catalog = workspace(file.path().to_path_buf(), Config::default())
            .load_catalog()
            .unwrap();
        assert!(catalog.lookup("CSCI100").is_none());
    }

    #[test]
    fn load_catalog_reports_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let error = workspace(tmp.path().join("missing.csv"), Config::default())
            .load_catalog()
            .unwrap_err();
        assert!(error.to_string().starts_with("failed to load courses from"));
    }

    #[test]
    fn file_overrides_configured_source() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join(Config::FILE_NAME);

        let workspace = Workspace::load(&config, None).unwrap();
        assert_eq!(workspace.source(), Path::new(planner::storage::DEFAULT_FILE));

        let workspace = Workspace::load(&config, Some(Path::new("spring.csv"))).unwrap();
        assert_eq!(workspace.source(), Path::new("spring.csv"));
    }

    #[test]
    fn config_commands_survive_unparseable_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join(Config::FILE_NAME);
        std::fs::write(&config, "key_policy = [").unwrap();

        cli(&config, &["config", "path"]).execute().unwrap();
        cli(&config, &["config", "init", "--force"]).execute().unwrap();

        assert_eq!(Config::load(&config).unwrap(), Config::default());
    }

    #[test]
    fn other_commands_report_unparseable_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join(Config::FILE_NAME);
        std::fs::write(&config, "key_policy = [").unwrap();

        let error = cli(&config, &["list"]).execute().unwrap_err();
        assert!(error.to_string().starts_with("failed to parse config file"));

        let error = cli(&config, &["config", "show"]).execute().unwrap_err();
        assert!(error.to_string().starts_with("failed to parse config file"));
    }
}
