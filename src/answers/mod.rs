//! Answer sources.
//!
//! This module collects the user's answers:
//! - [`file`] - JSON or YAML answers file for non-interactive runs
//! - [`prompt`] - Interactive questions on a terminal

mod file;
mod prompt;

use crate::error::Result;
use crate::models::Answers;
use std::path::Path;

// Re-export public functions
pub use file::{load_answers, parse_answers};
pub use prompt::{
    ask, interactive_questions, DEFAULT_AZ_COUNT, DEFAULT_CLOUD, DEFAULT_PROJECT, DEFAULT_REGION,
    DEFAULT_VPC_CIDR,
};

/// Load answers from `answers_file`, or ask for them on stdin/stdout.
pub fn collect_answers(answers_file: Option<&Path>) -> Result<Answers> {
    match answers_file {
        Some(path) => load_answers(path),
        None => {
            log::info!("No answers file given, asking interactively");
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            interactive_questions(&mut input, &mut output)
        }
    }
}
