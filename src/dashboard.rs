use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::report::{
    CODE_REVIEW_REPORT, DASHBOARD_FILE, Outcome, TEST_GENERATION_REPORT, write_report,
};

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");

const FILE_MARKER: &str = "## src/";
const TEST_MARKER: &str = "test('";
const SUGGESTION_MARKER: &str = "- ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    CodeReview,
    TestGeneration,
}

impl ReportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::CodeReview => CODE_REVIEW_REPORT,
            ReportKind::TestGeneration => TEST_GENERATION_REPORT,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::CodeReview => "Code Review Report",
            ReportKind::TestGeneration => "Test Generation Report",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub content: String,
}

/// Load whichever pipeline reports exist in `reports_dir`, review first.
pub fn read_reports(reports_dir: &Path) -> Vec<Report> {
    [ReportKind::CodeReview, ReportKind::TestGeneration]
        .into_iter()
        .filter_map(|kind| {
            let path = reports_dir.join(kind.file_name());
            match std::fs::read_to_string(&path) {
                Ok(content) => Some(Report { kind, content }),
                Err(e) => {
                    warn!("error reading {}: {e}", path.display());
                    None
                }
            }
        })
        .collect()
}

fn count_in(reports: &[Report], kind: Option<ReportKind>, marker: &str) -> usize {
    reports
        .iter()
        .filter(|r| kind.is_none_or(|k| r.kind == k))
        .map(|r| r.content.matches(marker).count())
        .sum()
}

/// `## src/` headings across every report.
pub fn count_files_analyzed(reports: &[Report]) -> usize {
    count_in(reports, None, FILE_MARKER)
}

/// `test('` occurrences in test generation reports.
pub fn count_tests_generated(reports: &[Report]) -> usize {
    count_in(reports, Some(ReportKind::TestGeneration), TEST_MARKER)
}

/// `- ` occurrences in code review reports.
pub fn count_suggestions(reports: &[Report]) -> usize {
    count_in(reports, Some(ReportKind::CodeReview), SUGGESTION_MARKER)
}

#[derive(Serialize)]
struct ReportView<'a> {
    title: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct DashboardContext<'a> {
    last_updated: &'a str,
    files_analyzed: usize,
    tests_generated: usize,
    suggestions_made: usize,
    reports: Vec<ReportView<'a>>,
}

/// Render the dashboard page. Report content is inserted verbatim.
pub fn render_dashboard_html(reports: &[Report], last_updated: &str) -> Result<String> {
    let context = DashboardContext {
        last_updated,
        files_analyzed: count_files_analyzed(reports),
        tests_generated: count_tests_generated(reports),
        suggestions_made: count_suggestions(reports),
        reports: reports
            .iter()
            .map(|r| ReportView {
                title: r.kind.title(),
                content: &r.content,
            })
            .collect(),
    };

    let engine = upon::Engine::new();
    let html = engine
        .compile(DASHBOARD_TEMPLATE)?
        .render(&engine, &context)
        .to_string()?;
    Ok(html)
}

/// Render `index.html` from the reports on disk.
pub fn run_dashboard(config: &Config) -> Result<Outcome<Report>> {
    let reports_dir = config.reports_path();
    let reports = read_reports(&reports_dir);
    if reports.is_empty() {
        info!("no reports found to generate dashboard");
        return Ok(Outcome::NothingToDo);
    }

    let last_updated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = render_dashboard_html(&reports, &last_updated)?;
    let path = write_report(&reports_dir, DASHBOARD_FILE, &html)?;
    info!("dashboard generated at {}", path.display());

    Ok(Outcome::Completed {
        records: reports,
        report: Some(path),
    })
}
