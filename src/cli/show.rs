use clap::Parser;
use planner::{Catalog, Course};
use serde::Serialize;
use tracing::instrument;

use super::{render, Workspace};

#[derive(Debug, Parser)]
#[command(about = "Display a course and its prerequisites")]
pub struct Show {
    /// The course number to display (case-insensitive)
    course: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// JSON view of a course, with prerequisites resolved against the catalog.
#[derive(Debug, Serialize)]
struct CourseJson<'a> {
    identifier: &'a str,
    name: &'a str,
    prerequisites: Vec<PrerequisiteJson<'a>>,
}

#[derive(Debug, Serialize)]
struct PrerequisiteJson<'a> {
    identifier: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> CourseJson<'a> {
    fn new(course: &'a Course, catalog: &'a Catalog) -> Self {
        let prerequisites = course
            .prerequisites()
            .iter()
            .map(|identifier| PrerequisiteJson {
                identifier: identifier.as_str(),
                name: catalog.lookup(identifier).map(Course::name),
            })
            .collect();
        Self {
            identifier: course.identifier().as_str(),
            name: course.name(),
            prerequisites,
        }
    }
}

impl Show {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let catalog = workspace.load_catalog()?;

        let Some(course) = self.find(&catalog) else {
            eprintln!("Course {} not found.", self.course.trim());
            std::process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => println!("{}", render::course_detail(course)),
            OutputFormat::Json => {
                let json = CourseJson::new(course, &catalog);
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }

        Ok(())
    }

    /// Looks the course up, ignoring whitespace around the argument.
    fn find<'a>(&self, catalog: &'a Catalog) -> Option<&'a Course> {
        catalog.lookup(self.course.trim())
    }
}
