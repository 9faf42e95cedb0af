pub mod chat;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod discovery;
pub mod error;
pub mod fallback;
pub mod prompts;
pub mod report;
pub mod review;
pub mod testgen;

#[cfg(test)]
mod test_helpers;
