//! CLI argument parsing.
//!
//! Uses clap derive macros. Values not given on the command line fall back to
//! environment variables, which may come from a `.env` file.

use clap::Parser;
use std::path::PathBuf;

/// Generate a Terraform starter project (AWS, GCP, Azure) with one public and
/// one private subnet per availability zone.
#[derive(Parser, Debug, Clone)]
#[command(name = "subnet-terraform-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON or YAML file with answers for non-interactive runs.
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Output directory for the generated Terraform files
    /// [default: ./<project>-terraform].
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Directory holding the Handlebars templates.
    #[arg(
        long,
        value_name = "DIR",
        env = "TFGEN_TEMPLATES_DIR",
        default_value = "templates"
    )]
    pub templates: PathBuf,

    /// log4rs configuration file.
    #[arg(
        long,
        value_name = "FILE",
        env = "TFGEN_LOG_CONFIG",
        default_value = "log4rs.yml"
    )]
    pub log_config: PathBuf,
}
