//! Zone count and the computed subnet plan.

use super::Ipv4;
use crate::error::PlanError;
use serde::Serialize;
use std::fmt;

/// Number of availability zones to provision. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ZoneCount(u32);

impl ZoneCount {
    /// Validate a raw zone count as supplied by the user.
    pub fn new(count: i64) -> Result<ZoneCount, PlanError> {
        match u32::try_from(count) {
            Ok(n) if n >= 1 => Ok(ZoneCount(n)),
            _ => Err(PlanError::InvalidZoneCount(count)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// One public and one private subnet per zone.
    pub fn total_subnets(self) -> u64 {
        u64::from(self.0) * 2
    }
}

impl fmt::Display for ZoneCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public and private subnets per availability zone.
///
/// Index `i` of both lists belongs to zone `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetPlan {
    #[serde(skip)]
    pub base: Ipv4,
    #[serde(skip)]
    pub new_prefix: u8,
    pub public_subnets: Vec<Ipv4>,
    pub private_subnets: Vec<Ipv4>,
}

/// One row of a [`SubnetPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub index: usize,
    pub public: Ipv4,
    pub private: Ipv4,
}

impl SubnetPlan {
    pub fn zone_count(&self) -> usize {
        self.public_subnets.len()
    }

    pub fn zones(&self) -> impl Iterator<Item = Zone> + '_ {
        self.public_subnets
            .iter()
            .zip(self.private_subnets.iter())
            .enumerate()
            .map(|(index, (public, private))| Zone {
                index,
                public: *public,
                private: *private,
            })
    }

    /// Every block of the plan, public subnets first.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Ipv4> + '_ {
        self.public_subnets.iter().chain(self.private_subnets.iter())
    }

    /// Public subnets as CIDR strings, the shape templates expect.
    pub fn public_cidrs(&self) -> Vec<String> {
        self.public_subnets.iter().map(|s| s.to_string()).collect()
    }

    /// Private subnets as CIDR strings, the shape templates expect.
    pub fn private_cidrs(&self) -> Vec<String> {
        self.private_subnets.iter().map(|s| s.to_string()).collect()
    }
}
