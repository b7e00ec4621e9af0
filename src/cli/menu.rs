//! The interactive advising menu.
//!
//! A [`Session`] owns the catalog for the lifetime of the menu. Loading a new
//! source replaces the catalog only once the source has been read.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};
use planner::{storage, Catalog, Config, SourceError};
use tracing::instrument;

use super::{build_catalog, render, Workspace};

#[derive(Debug, Default, clap::Parser)]
#[command(about = "Interactive course planner menu")]
pub struct Menu {
    /// Load the course source before showing the menu
    #[arg(long)]
    load: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load,
    PrintList,
    PrintCourse,
    Exit,
}

impl Choice {
    const ALL: [Self; 4] = [Self::Load, Self::PrintList, Self::PrintCourse, Self::Exit];

    const fn label(self) -> &'static str {
        match self {
            Self::Load => "1. Load Data Structure.",
            Self::PrintList => "2. Print Course List.",
            Self::PrintCourse => "3. Print Course.",
            Self::Exit => "9. Exit",
        }
    }
}

/// Menu state: the catalog currently loaded, if any.
#[derive(Debug)]
struct Session {
    config: Config,
    catalog: Catalog,
}

impl Session {
    const fn new(config: Config) -> Self {
        Self {
            catalog: Catalog::with_policy(config.key_policy()),
            config,
        }
    }

    /// Replaces the catalog with the courses read from `path`.
    ///
    /// Returns the number of courses loaded. On error the current catalog is
    /// kept.
    fn load(&mut self, path: &Path) -> Result<usize, SourceError> {
        let report = storage::load_courses(path)?;
        self.catalog = build_catalog(report, &self.config);
        Ok(self.catalog.len())
    }

    fn load_and_report(&mut self, path: &Path) {
        match self.load(path) {
            Ok(0) => println!("No courses found in {}.", path.display()),
            Ok(_) => println!("Courses loaded."),
            Err(error) => eprintln!("Error: {error}"),
        }
    }

    fn course_list(&self) -> Vec<String> {
        self.catalog.iter().map(render::course_line).collect()
    }

    /// The detail view of a course. Whitespace around `query` is ignored.
    fn course_detail(&self, query: &str) -> Option<String> {
        self.catalog.lookup(query.trim()).map(render::course_detail)
    }
}

impl Menu {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = Session::new(workspace.config().clone());
        let labels: Vec<&str> = Choice::ALL.iter().map(|choice| choice.label()).collect();

        println!("Welcome to the course planner.");
        if self.load {
            session.load_and_report(workspace.source());
        }

        loop {
            println!();
            let index = Select::new()
                .with_prompt("What would you like to do?")
                .items(&labels[..])
                .default(0)
                .interact()?;
            println!();

            match Choice::ALL[index] {
                Choice::Load => {
                    let path = prompt_source(workspace.source())?;
                    session.load_and_report(&path);
                }
                Choice::PrintList => {
                    for line in session.course_list() {
                        println!("{line}");
                    }
                }
                Choice::PrintCourse => {
                    let query: String = Input::new()
                        .with_prompt("Enter course number")
                        .interact_text()?;
                    let detail = session
                        .course_detail(&query)
                        .unwrap_or_else(|| "Course not found.".to_string());
                    println!("{detail}");
                }
                Choice::Exit => {
                    println!("Thank you for using the course planner!");
                    return Ok(());
                }
            }
        }
    }
}

fn prompt_source(default: &Path) -> anyhow::Result<PathBuf> {
    let use_default = Confirm::new()
        .with_prompt(format!("Load default file: {}?", default.display()))
        .default(true)
        .interact()?;
    if use_default {
        return Ok(default.to_path_buf());
    }

    let path: String = Input::new()
        .with_prompt("Enter the file name to load")
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}
