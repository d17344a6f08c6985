//! Resolved run configuration.

use crate::cli::Cli;
use crate::models::Answers;
use std::path::{Path, PathBuf};

/// Settings of one generator run, passed explicitly to each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Answers file; `None` asks interactively.
    pub answers_file: Option<PathBuf>,
    /// Output directory; `None` derives it from the project name.
    pub out: Option<PathBuf>,
    /// Handlebars templates root.
    pub templates_dir: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            answers_file: cli.answers,
            out: cli.out,
            templates_dir: cli.templates,
        }
    }
}

impl Config {
    /// Output directory for `answers`, `<cwd>/<project>-terraform` unless set.
    pub fn outdir(&self, answers: &Answers, cwd: &Path) -> PathBuf {
        match &self.out {
            Some(out) => out.clone(),
            None => cwd.join(format!("{}-terraform", answers.project_name())),
        }
    }
}
