//! Subnet planning logic.
//!
//! This module contains the pure computations of the generator:
//! - [`planner`] - Allocation of public/private subnets per zone
//! - [`overlap`] - Overlap and containment checks of a plan

mod overlap;
mod planner;

// Re-export public functions
pub use overlap::{find_overlaps, log_overlaps, verify_plan, OverlapConflict};
pub use planner::{compute_subnet_plan, plan_from_cidr, MIN_SUBNET_PREFIX};
