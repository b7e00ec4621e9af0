use clap::Parser;
use planner::{
    domain::prerequisites::{dangling_prerequisites, prerequisite_cycles},
    Catalog, DanglingPrerequisite, LoadReport,
};
use serde_json::json;
use tracing::instrument;

use super::{
    render::{self, Tone},
    Workspace,
};

#[derive(Debug, Parser)]
#[command(about = "Check the course source for malformed lines and broken prerequisites")]
pub struct Validate {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output; only the exit status reports problems
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Default)]
struct ValidationResult {
    malformed_lines: Vec<(usize, String)>,
    dangling: Vec<DanglingPrerequisite>,
    cycles: Vec<Vec<String>>,
}

impl ValidationResult {
    fn collect(report: &LoadReport, catalog: &Catalog) -> Self {
        Self {
            malformed_lines: report
                .malformed()
                .map(|skipped| (skipped.line, skipped.error.to_string()))
                .collect(),
            dangling: dangling_prerequisites(catalog),
            cycles: prerequisite_cycles(catalog)
                .into_iter()
                .map(|cycle| cycle.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    fn issue_count(&self) -> usize {
        self.malformed_lines.len() + self.dangling.len() + self.cycles.len()
    }
}

impl Validate {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let report = Workspace::load_report(workspace.source())?;
        let catalog = workspace.build_catalog(report.clone());
        let result = ValidationResult::collect(&report, &catalog);

        if !self.quiet {
            match self.output {
                OutputFormat::Table => println!("{}", render_table(&result, catalog.len())),
                OutputFormat::Json => println!("{}", render_json(&result)?),
            }
        }

        if result.issue_count() > 0 {
            std::process::exit(2);
        }

        Ok(())
    }
}

fn render_table(result: &ValidationResult, course_count: usize) -> String {
    let mut lines = Vec::new();

    for (line, error) in &result.malformed_lines {
        lines.push(format!("line {line}: {error}"));
    }
    for dangling in &result.dangling {
        lines.push(format!(
            "{}: unknown prerequisite {}",
            dangling.course, dangling.prerequisite
        ));
    }
    for cycle in &result.cycles {
        lines.push(format!("prerequisite cycle: {}", cycle.join(" -> ")));
    }

    let summary = if result.issue_count() == 0 {
        render::paint(&format!("✅ {course_count} courses, no issues"), Tone::Success)
    } else {
        render::paint(
            &format!(
                "⚠️  {course_count} courses, {} issue(s)",
                result.issue_count()
            ),
            Tone::Warning,
        )
    };
    lines.push(summary);
    lines.join("\n")
}

fn render_json(result: &ValidationResult) -> anyhow::Result<String> {
    let output = json!({
        "malformed_lines": result
            .malformed_lines
            .iter()
            .map(|(line, error)| json!({ "line": line, "error": error }))
            .collect::<Vec<_>>(),
        "dangling_prerequisites": result
            .dangling
            .iter()
            .map(|d| json!({ "course": d.course.as_str(), "prerequisite": d.prerequisite }))
            .collect::<Vec<_>>(),
        "cycles": result.cycles,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
