//! Interactive questions.

use crate::error::{AppError, Result};
use crate::models::{Answers, Cloud};
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

pub const DEFAULT_PROJECT: &str = "my-cloud-project";
pub const DEFAULT_CLOUD: &str = "aws";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";
pub const DEFAULT_AZ_COUNT: &str = "2";

/// Ask one question. An empty reply, or end of input, takes the default.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: Option<&str>,
) -> Result<String> {
    match default {
        Some(default) => write!(output, "{prompt} [{default}]: ")?,
        None => write!(output, "{prompt}: ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let reply = line.trim();

    Ok(match default {
        Some(default) if reply.is_empty() => default.to_string(),
        _ => reply.to_string(),
    })
}

/// Guide the user through the generator questions.
pub fn interactive_questions<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Answers> {
    writeln!(
        output,
        "{}",
        "Welcome to the Terraform starter generator for AWS, GCP, or Azure".bold()
    )?;

    let project = ask(input, output, "Project name", Some(DEFAULT_PROJECT))?;
    let cloud = ask(input, output, "Cloud provider (aws, gcp, azure)", Some(DEFAULT_CLOUD))?;
    let region = ask(
        input,
        output,
        "Cloud region/location (e.g., us-east-1, us-central1, eastus)",
        Some(DEFAULT_REGION),
    )?;
    let vpc_cidr = ask(input, output, "Network CIDR block", Some(DEFAULT_VPC_CIDR))?;
    let az_count = ask(
        input,
        output,
        "Number of availability zones (2 or 3 recommended)",
        Some(DEFAULT_AZ_COUNT),
    )?;

    let cloud: Cloud = cloud.parse().map_err(AppError::Answers)?;
    let az_count: i64 = az_count.parse().map_err(|_| {
        AppError::Answers(format!(
            "number of availability zones must be an integer, got '{az_count}'"
        ))
    })?;

    log::debug!(
        "Interactive answers: project={project} cloud={cloud} region={region} vpc_cidr={vpc_cidr} az_count={az_count}"
    );

    Ok(Answers {
        tags: BTreeMap::from([("Project".to_string(), project.clone())]),
        project: Some(project),
        cloud,
        region: Some(region),
        vpc_cidr: Some(vpc_cidr),
        az_count: Some(az_count),
        backend: true,
        ..Answers::default()
    })
}
