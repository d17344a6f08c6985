//! Error types for subnet planning and project generation.
//!
//! [`PlanError`] is the taxonomy of the pure subnet planner. [`AppError`] wraps
//! it for the orchestration layer and maps every failure to an exit code.

use crate::exit_codes;
use crate::models::Ipv4;
use thiserror::Error;

/// Failures of the subnet planner. All are deterministic input-validation
/// failures; re-running with the same inputs reproduces them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Zone count was zero or negative.
    #[error("Invalid zone count {0}: at least one availability zone is required")]
    InvalidZoneCount(i64),

    /// The base block is not a canonical IPv4 CIDR.
    #[error("Invalid address block '{input}': {reason}")]
    InvalidAddressBlock { input: String, reason: String },

    /// The base block cannot hold one public and one private subnet per zone.
    #[error(
        "Network {base} is too small for {zone_count} zone(s): \
         {required} subnets needed, only {available} /{new_prefix} subnets available"
    )]
    BlockTooSmall {
        base: Ipv4,
        zone_count: u32,
        new_prefix: u8,
        available: u64,
        required: u64,
    },
}

impl PlanError {
    pub(crate) fn invalid_block(input: &str, reason: impl Into<String>) -> Self {
        PlanError::InvalidAddressBlock {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Top level error for a generator run.
#[derive(Error, Debug)]
pub enum AppError {
    /// Answers could not be loaded, were incomplete or malformed.
    #[error("Invalid answers: {0}")]
    Answers(String),

    /// Subnet planning failed.
    #[error("Could not compute subnet CIDRs: {0}")]
    Plan(#[from] PlanError),

    /// Template set could not be prepared.
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Answers(_) => exit_codes::USER_ERROR,
            AppError::Plan(_) => exit_codes::PLAN_FAILURE,
            AppError::Render(_) => exit_codes::OUTPUT_FAILURE,
            AppError::Io(_) => exit_codes::OUTPUT_FAILURE,
        }
    }
}

/// Result type alias for generator runs.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_error_is_user_error() {
        let err = AppError::Answers("missing vpc_cidr".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn plan_error_exit_code_is_nonzero() {
        let err: AppError = PlanError::InvalidZoneCount(0).into();
        assert_eq!(err.exit_code(), exit_codes::PLAN_FAILURE);
        assert_ne!(err.exit_code(), exit_codes::SUCCESS);
    }

    #[test]
    fn block_too_small_message_names_counts() {
        let err = PlanError::BlockTooSmall {
            base: "10.0.0.0/24".parse().unwrap(),
            zone_count: 64,
            new_prefix: 28,
            available: 16,
            required: 128,
        };
        let msg = err.to_string();
        assert!(msg.contains("10.0.0.0/24"), "{msg}");
        assert!(msg.contains("128 subnets needed"), "{msg}");
        assert!(msg.contains("16 /28 subnets"), "{msg}");
    }

    #[test]
    fn io_error_converts() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.exit_code(), exit_codes::OUTPUT_FAILURE);
        assert!(err.to_string().contains("disk full"));
    }
}
