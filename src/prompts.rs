use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

const DEFAULT_REVIEW: &str = include_str!("default_prompts/review.md");
const DEFAULT_GENERATE_TESTS: &str = include_str!("default_prompts/generate-tests.md");

pub const REVIEW_SYSTEM_PROMPT: &str =
    "You are an expert Next.js/React/TypeScript developer performing code reviews.";
pub const TEST_SYSTEM_PROMPT: &str = "You are an expert React testing engineer.";

fn default_template(phase: &str) -> Option<&'static str> {
    match phase {
        "review" => Some(DEFAULT_REVIEW),
        "generate-tests" => Some(DEFAULT_GENERATE_TESTS),
        _ => None,
    }
}

fn template_filename(phase: &str) -> String {
    format!("{phase}.md")
}

/// Values a prompt template may reference.
#[derive(Debug, Serialize)]
pub struct PromptContext<'a> {
    pub file_path: String,
    pub content: &'a str,
}

impl<'a> PromptContext<'a> {
    pub fn for_file(file: &Path, content: &'a str) -> Self {
        Self {
            file_path: file.display().to_string(),
            content,
        }
    }
}

/// Loads prompt templates, embedded or from an override directory, and
/// renders them with upon.
#[derive(Debug, Clone, Default)]
pub struct PromptEngine {
    override_dir: Option<PathBuf>,
}

impl PromptEngine {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    /// Load a prompt template for the given phase.
    /// User overrides in `override_dir` take precedence over defaults.
    pub fn load_template(&self, phase: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(template_filename(phase));
            if path.exists() {
                return std::fs::read_to_string(&path).map_err(|e| {
                    Error::Prompt(format!(
                        "failed to read override template {}: {e}",
                        path.display()
                    ))
                });
            }
        }

        default_template(phase)
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Prompt(format!("unknown prompt phase: {phase}")))
    }

    /// Render a phase for a single source file.
    pub fn render_for_file(&self, phase: &str, file: &Path, content: &str) -> Result<String> {
        let template = self.load_template(phase)?;
        render_template(&template, &PromptContext::for_file(file, content))
            .map_err(|e| Error::Prompt(format!("{phase} prompt: {e}")))
    }
}

/// Render a template against `context`. Unknown variables and malformed tags
/// are errors.
pub fn render_template(template: &str, context: &PromptContext<'_>) -> Result<String> {
    let engine = upon::Engine::new();
    let rendered = engine
        .compile(template)
        .and_then(|t| t.render(&engine, context).to_string())
        .map_err(|e| Error::Prompt(e.to_string()))?;
    Ok(rendered)
}
