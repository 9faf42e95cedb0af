use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::chat::{ChatClient, ChatMessage};
use crate::config::Config;
use crate::discovery::{discover_source_files, read_file_content};
use crate::error::Result;
use crate::fallback::complete_ranked;
use crate::prompts::{PromptEngine, REVIEW_SYSTEM_PROMPT};
use crate::report::{CODE_REVIEW_REPORT, Outcome, report_timestamp, save_report_lossy};

const DEFAULT_SUGGESTION: &str =
    "Code looks good! Consider adding more comments for better documentation.";

/// Review one file's content with fixed substring checks.
///
/// Used whenever the remote reviewer is unavailable. Returns one `- ` line per
/// suggestion, joined with newlines.
pub fn local_review_suggestions(content: &str) -> String {
    let has = |needle: &str| content.contains(needle);
    let mut suggestions = Vec::new();

    if has("useState") && !has("useEffect") {
        suggestions.push("Consider if useEffect is needed for side effects with this state");
    }
    if has("props") && !has("type") {
        suggestions.push("Consider adding TypeScript interfaces/types for props");
    }
    if has("function") && !has("memo") {
        suggestions.push(
            "Consider using React.memo for performance optimization if this component rerenders frequently",
        );
    }
    if !has("catch") && !has("try") {
        suggestions.push("Consider adding error boundaries or try-catch for better error handling");
    }
    if !has("aria-") && !has("role=") {
        suggestions.push("Add ARIA attributes for better accessibility");
    }
    if suggestions.is_empty() {
        suggestions.push(DEFAULT_SUGGESTION);
    }

    suggestions
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub file: PathBuf,
    pub suggestions: String,
}

/// Reviews files through the ranked model list, falling back to
/// [`local_review_suggestions`].
pub struct CodeReviewer<'a> {
    client: Option<&'a dyn ChatClient>,
    models: &'a [String],
    prompts: &'a PromptEngine,
}

impl<'a> CodeReviewer<'a> {
    pub fn new(
        client: Option<&'a dyn ChatClient>,
        models: &'a [String],
        prompts: &'a PromptEngine,
    ) -> Self {
        Self {
            client,
            models,
            prompts,
        }
    }

    pub fn code_review(&self, file: &Path, content: &str) -> String {
        let Some(client) = self.client else {
            info!("using fallback review for {}", file.display());
            return local_review_suggestions(content);
        };

        let prompt = match self.prompts.render_for_file("review", file, content) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("{e}, falling back to local review");
                return local_review_suggestions(content);
            }
        };

        let messages = [
            ChatMessage::system(REVIEW_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];
        complete_ranked(client, self.models, &messages, None).unwrap_or_else(|| {
            info!("falling back to local review for {}", file.display());
            local_review_suggestions(content)
        })
    }
}

pub fn render_review_report(records: &[ReviewRecord], timestamp: &str) -> String {
    let mut out = String::from("# AI Code Review Report\n\n");
    let _ = write!(out, "Generated on: {timestamp}\n\n");
    for record in records {
        let _ = write!(
            out,
            "## {}\n\n{}\n\n",
            record.file.display(),
            record.suggestions
        );
    }
    out
}

/// Review every discovered component and write `code_review_report.md`.
pub fn run_code_review(
    config: &Config,
    client: Option<&dyn ChatClient>,
) -> Result<Outcome<ReviewRecord>> {
    let files = discover_source_files(&config.root, &config.components_path(), &config.extensions);
    if files.is_empty() {
        info!("no component files found to review");
        return Ok(Outcome::NothingToDo);
    }

    let prompts = PromptEngine::new(config.prompts_dir.clone());
    let reviewer = CodeReviewer::new(client, &config.models, &prompts);

    let mut records = Vec::new();
    for file in files {
        info!("Reviewing {}...", file.display());
        let content = read_file_content(&config.root.join(&file));
        if content.is_empty() {
            continue;
        }
        let suggestions = reviewer.code_review(&file, &content);
        records.push(ReviewRecord { file, suggestions });
    }

    if records.is_empty() {
        info!("no reviews to save");
        return Ok(Outcome::Completed {
            records,
            report: None,
        });
    }

    let markdown = render_review_report(&records, &report_timestamp());
    let report = save_report_lossy(&config.reports_path(), CODE_REVIEW_REPORT, &markdown);
    info!(files = records.len(), "code review completed");
    Ok(Outcome::Completed { records, report })
}
