//! Terraform starter generator built around a deterministic subnet planner.
//!
//! The planner in [`processing`] is pure; everything else collects answers
//! and writes the rendered project.

pub mod answers;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod models;
pub mod output;
pub mod processing;

use config::Config;
use error::{AppError, Result};
use models::{Answers, SubnetPlan};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug)]
pub struct Generated {
    pub plan: SubnetPlan,
    pub outdir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Validate the network answers and compute the subnet plan.
pub fn plan_for_answers(answers: &Answers) -> Result<SubnetPlan> {
    let base = answers.address_block()?;
    let zone_count = answers.zone_count()?;
    let plan = processing::compute_subnet_plan(base, zone_count)?;
    processing::verify_plan(&plan)
        .map_err(|e| AppError::Render(format!("Refusing to render inconsistent plan: {e}")))?;
    Ok(plan)
}

/// Plan the subnets and render the project for the given answers.
///
/// Nothing is written to disk unless the plan succeeds.
pub fn generate<W: Write>(
    answers: Answers,
    config: &Config,
    cwd: &Path,
    out: &mut W,
) -> Result<Generated> {
    answers.validate_project()?;
    let plan = plan_for_answers(&answers)?;
    output::write_plan(&plan, out)?;

    let outdir = config.outdir(&answers, cwd);
    let files = output::render_templates(&answers, &plan, &config.templates_dir, &outdir)?;
    output::write_next_steps(&outdir, files.len(), out)?;

    Ok(Generated {
        plan,
        outdir,
        files,
    })
}

/// Full run: collect answers from the file or terminal, then generate.
pub fn run(config: &Config) -> Result<Generated> {
    let answers = answers::collect_answers(config.answers_file.as_deref())?;
    let cwd = std::env::current_dir()?;
    let mut stdout = std::io::stdout();
    generate(answers, config, &cwd, &mut stdout)
}
