//! Domain models for the subnet generator.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - canonical IPv4 block with CIDR notation support
//! - [`ZoneCount`] and [`SubnetPlan`] - planner input and output
//! - [`Answers`] - the user's answers fed to the templates

mod answers;
mod ipv4;
mod plan;

// Re-export public types
pub use answers::{Answers, Cloud, FALLBACK_PROJECT};
pub use ipv4::{
    block_size, broadcast_addr, cut_addr, get_cidr_mask, usable_hosts, Ipv4,
    Subnets, MAX_LENGTH, RESERVED_PER_SUBNET,
};
pub use plan::{SubnetPlan, Zone, ZoneCount};
