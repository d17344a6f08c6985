//! Terminal output utilities.
//!
//! Provides formatting helpers and the closing instructions of a run.

use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Write where the files went and how to continue with Terraform.
pub fn write_next_steps<W: Write>(
    outdir: &Path,
    files: usize,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(
        out,
        "Generated Terraform configuration in: {} ({files} file(s))",
        outdir.display().to_string().green()
    )?;
    writeln!(out, "\n{}", "Next steps:".bold())?;
    writeln!(out, "1. cd {}", outdir.display())?;
    writeln!(out, "2. Review the generated *.tf files.")?;
    writeln!(out, "3. Run 'terraform init' to initialize the project.")?;
    writeln!(out, "4. Run 'terraform plan' to see the execution plan.")?;
    writeln!(out, "5. Run 'terraform apply' to deploy your infrastructure.")?;
    Ok(())
}
