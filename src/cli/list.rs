use anyhow::Context;
use clap::{Parser, ValueEnum};
use planner::Course;
use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use super::{
    render::{self, Tone},
    Workspace,
};

/// Command arguments for `planner list`.
#[derive(Debug, Parser)]
#[command(about = "List all courses in identifier order")]
pub struct List {
    /// Output format (default: plain).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Case-insensitive substring match against course number and name.
    #[arg(long, conflicts_with = "regex")]
    contains: Option<String>,

    /// Regular expression match against course number and name.
    #[arg(long)]
    regex: Option<String>,

    /// Limit number of rows returned.
    #[arg(long)]
    limit: Option<usize>,

    /// Skip the first N rows.
    #[arg(long)]
    offset: Option<usize>,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One `NUMBER, NAME` line per course.
    #[default]
    Plain,
    /// Aligned columns including prerequisites.
    Table,
    Json,
    /// The comma-separated source format.
    Csv,
}

#[derive(Debug, Clone, Default)]
struct Filter {
    contains: Option<String>,
    regex: Option<Regex>,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    identifier: &'a str,
    name: &'a str,
    prerequisites: &'a [String],
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let catalog = workspace.load_catalog()?;
        let filter = Filter::new(self.contains.as_deref(), self.regex.as_deref())?;

        let courses: Vec<&Course> = catalog
            .iter()
            .filter(|course| filter.matches(course))
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        if courses.is_empty() && self.output != OutputFormat::Json {
            eprintln!("{}", paint_empty(catalog.is_empty()));
            return Ok(());
        }

        let rendered = match self.output {
            OutputFormat::Plain => render_plain(&courses),
            OutputFormat::Table => render_table(&courses, !render::is_narrow()),
            OutputFormat::Json => render_json(&courses)?,
            OutputFormat::Csv => render_csv(&courses),
        };
        println!("{rendered}");
        Ok(())
    }
}

fn paint_empty(catalog_empty: bool) -> String {
    let message = if catalog_empty {
        "No courses loaded."
    } else {
        "No courses match."
    };
    render::paint(message, Tone::Dim)
}

impl Filter {
    fn new(contains: Option<&str>, pattern: Option<&str>) -> anyhow::Result<Self> {
        let regex = pattern
            .map(|pattern| Regex::new(pattern).with_context(|| format!("invalid regex: {pattern}")))
            .transpose()?;
        Ok(Self {
            contains: contains.map(str::to_lowercase),
            regex,
        })
    }

    fn matches(&self, course: &Course) -> bool {
        if let Some(search) = &self.contains {
            let identifier = course.identifier().to_lowercase();
            let name = course.name().to_lowercase();
            if !identifier.contains(search) && !name.contains(search) {
                return false;
            }
        }

        if let Some(regex) = &self.regex {
            if !regex.is_match(course.identifier()) && !regex.is_match(course.name()) {
                return false;
            }
        }

        true
    }
}

fn render_plain(courses: &[&Course]) -> String {
    courses
        .iter()
        .map(|course| render::course_line(course))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(courses: &[&Course], with_prerequisites: bool) -> String {
    let id_width = courses
        .iter()
        .map(|course| course.identifier().chars().count())
        .chain(std::iter::once("Course".len()))
        .max()
        .unwrap_or_default();

    let mut lines = Vec::with_capacity(courses.len() + 1);
    let header = if with_prerequisites {
        format!("{:<id_width$}  {}  ({})", "Course", "Name", "Prerequisites")
    } else {
        format!("{:<id_width$}  {}", "Course", "Name")
    };
    lines.push(render::paint(&header, Tone::Dim));

    for course in courses {
        let mut line = format!("{:<id_width$}  {}", course.identifier().as_str(), course.name());
        if with_prerequisites && !course.prerequisites().is_empty() {
            line.push_str(&format!("  ({})", course.prerequisites().join(", ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn render_json(courses: &[&Course]) -> anyhow::Result<String> {
    let rows: Vec<Row<'_>> = courses
        .iter()
        .map(|course| Row {
            identifier: course.identifier().as_str(),
            name: course.name(),
            prerequisites: course.prerequisites(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn render_csv(courses: &[&Course]) -> String {
    courses
        .iter()
        .map(|course| {
            std::iter::once(course.identifier().as_str())
                .chain(std::iter::once(course.name()))
                .chain(course.prerequisites().iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use planner::{storage::parse_courses, Catalog, KeyPolicy};

    use super::*;

    fn catalog() -> Catalog {
        parse_courses(
            "MATH201,Discrete Mathematics\n\
             CSCI300,Introduction to Algorithms,CSCI200,MATH201\n\
             CSCI100,Introduction to Computer Science\n\
             CSCI200,Data Structures,CSCI101\n",
        )
        .into_catalog(KeyPolicy::default())
    }

    #[test]
    fn plain_lists_in_identifier_order() {
        let catalog = catalog();
        let courses = catalog.enumerate();
        assert_eq!(
            render_plain(&courses),
            "CSCI100, Introduction to Computer Science\n\
             CSCI200, Data Structures\n\
             CSCI300, Introduction to Algorithms\n\
             MATH201, Discrete Mathematics"
        );
    }

    #[test]
    fn csv_round_trips_through_the_parser() {
        let catalog = catalog();
        let csv = render_csv(&catalog.enumerate());
        let reparsed = parse_courses(&csv).into_catalog(KeyPolicy::default());
        assert_eq!(reparsed, catalog);
    }

    #[test]
    fn table_hides_prerequisites_when_narrow() {
        let catalog = catalog();
        let courses = catalog.enumerate();

        let wide = render_table(&courses, true);
        assert!(wide.contains("CSCI300  Introduction to Algorithms  (CSCI200, MATH201)"));

        let narrow = render_table(&courses, false);
        assert!(!narrow.contains("MATH201)"));
        assert!(narrow.contains("CSCI300  Introduction to Algorithms"));
    }

    #[test]
    fn contains_filter_is_case_insensitive() {
        let filter = Filter::new(Some("ALGO"), None).unwrap();
        let catalog = catalog();
        let matched: Vec<_> = catalog.iter().filter(|c| filter.matches(c)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].identifier().as_str(), "CSCI300");
    }

    #[test]
    fn regex_filter_matches_identifier() {
        let filter = Filter::new(None, Some("^MATH")).unwrap();
        let catalog = catalog();
        let matched: Vec<_> = catalog.iter().filter(|c| filter.matches(c)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name(), "Discrete Mathematics");
    }

    #[test]
    fn invalid_regex_is_reported() {
        let error = Filter::new(None, Some("(")).unwrap_err();
        assert!(error.to_string().starts_with("invalid regex"));
    }

    #[test]
    fn json_lists_prerequisites() {
        let catalog = catalog();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&catalog.enumerate()).unwrap()).unwrap();
        assert_eq!(json[2]["identifier"], "CSCI300");
        assert_eq!(json[2]["prerequisites"], serde_json::json!(["CSCI200", "MATH201"]));
    }
}
