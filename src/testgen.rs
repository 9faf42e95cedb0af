use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::chat::{ChatClient, ChatMessage};
use crate::config::Config;
use crate::discovery::{discover_source_files, read_file_content};
use crate::error::Result;
use crate::fallback::complete_ranked;
use crate::prompts::{PromptEngine, TEST_SYSTEM_PROMPT};
use crate::report::{Outcome, TEST_GENERATION_REPORT, report_timestamp, save_report_lossy};

const TEST_TEMPERATURE: f32 = 0.7;

/// Basename segments split on `.`: `Home.test.jsx` → `["Home", "test", "jsx"]`.
fn name_parts(file: &Path) -> Vec<String> {
    file.file_name()
        .map(|n| n.to_string_lossy().split('.').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Component name: the basename up to its first dot.
pub fn component_name(file: &Path) -> String {
    name_parts(file).into_iter().next().unwrap_or_default()
}

/// Minimal render + snapshot test file used when no model is reachable.
pub fn basic_test_template(file: &Path) -> String {
    let name = component_name(file);
    let path = file.display();
    format!(
        r#"
import React from 'react';
import {{ render, screen }} from '@testing-library/react';
import userEvent from '@testing-library/user-event';
import {name} from '{path}';

describe('{name}', () => {{
    test('renders without crashing', () => {{
        render(<{name} />);
    }});

    test('matches snapshot', () => {{
        const {{ container }} = render(<{name} />);
        expect(container).toMatchSnapshot();
    }});

    // Add more test cases here
}});
"#
    )
}

/// Where the generated test for `file` lives: `tests_dir/<parent>/<stem>.test.<ext>`.
pub fn test_file_path(tests_dir: &Path, file: &Path) -> PathBuf {
    let parts = name_parts(file);
    let stem = parts.first().map(String::as_str).unwrap_or_default();
    let ext = parts.get(1).map(String::as_str).unwrap_or_default();
    let parent = file.parent().unwrap_or_else(|| Path::new(""));
    tests_dir.join(parent).join(format!("{stem}.test.{ext}"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTest {
    pub file: PathBuf,
    pub content: String,
}

/// Generates tests through the ranked model list, falling back to
/// [`basic_test_template`].
pub struct TestGenerator<'a> {
    client: Option<&'a dyn ChatClient>,
    models: &'a [String],
    prompts: &'a PromptEngine,
}

impl<'a> TestGenerator<'a> {
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

    pub fn generate_test_cases(&self, file: &Path, content: &str) -> String {
        let Some(client) = self.client else {
            info!("using basic test template for {}", file.display());
            return basic_test_template(file);
        };

        let prompt = match self.prompts.render_for_file("generate-tests", file, content) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("{e}, falling back to basic test template");
                return basic_test_template(file);
            }
        };

        let messages = [
            ChatMessage::system(TEST_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];
        complete_ranked(client, self.models, &messages, Some(TEST_TEMPERATURE))
            .unwrap_or_else(|| basic_test_template(file))
    }
}

/// Write a generated test next to its mirrored path, creating directories.
pub fn save_test_file(tests_dir: &Path, file: &Path, content: &str) -> Result<PathBuf> {
    let path = test_file_path(tests_dir, file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    Ok(path)
}

pub fn render_test_report(tests: &[GeneratedTest], timestamp: &str) -> String {
    let mut out = String::from("# AI Test Generation Report\n\n");
    let _ = write!(out, "Generated on: {timestamp}\n\n");
    for test in tests {
        let _ = write!(
            out,
            "## {}\n\n```javascript\n{}\n```\n\n",
            test.file.display(),
            test.content
        );
    }
    out
}

/// Generate a test file for every discovered component and write
/// `test_generation_report.md`.
pub fn run_test_generation(
    config: &Config,
    client: Option<&dyn ChatClient>,
) -> Result<Outcome<GeneratedTest>> {
    let files = discover_source_files(&config.root, &config.components_path(), &config.extensions);
    if files.is_empty() {
        info!("no component files found to generate tests for");
        return Ok(Outcome::NothingToDo);
    }

    let prompts = PromptEngine::new(config.prompts_dir.clone());
    let generator = TestGenerator::new(client, &config.models, &prompts);
    let tests_dir = config.tests_path();

    let mut generated = Vec::new();
    for file in files {
        info!("Generating tests for {}...", file.display());
        let content = read_file_content(&config.root.join(&file));
        if content.is_empty() {
            continue;
        }
        let test_content = generator.generate_test_cases(&file, &content);
        match save_test_file(&tests_dir, &file, &test_content) {
            Ok(path) => info!("generated test file {}", path.display()),
            Err(e) => warn!("error saving test file for {}: {e}", file.display()),
        }
        generated.push(GeneratedTest {
            file,
            content: test_content,
        });
    }

    let markdown = render_test_report(&generated, &report_timestamp());
    let report = save_report_lossy(&config.reports_path(), TEST_GENERATION_REPORT, &markdown);
    info!(files = generated.len(), "test generation completed");
    Ok(Outcome::Completed {
        records: generated,
        report,
    })
}
