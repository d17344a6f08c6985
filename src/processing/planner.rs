//! Subnet allocation.
//!
//! Splits a base network into one public and one private subnet per
//! availability zone. Pure computation: no I/O, no shared state.

use crate::error::PlanError;
use crate::models::{Ipv4, SubnetPlan, ZoneCount, MAX_LENGTH};
use itertools::Itertools;

/// Longest prefix handed out; subnets never get smaller than a /28.
pub const MIN_SUBNET_PREFIX: u8 = 28;

/// Prefix bits needed to address `total` equally sized sub-blocks,
/// i.e. the smallest `n` with `2^n >= total`.
fn extra_bits(total: u64) -> u32 {
    if total <= 1 {
        0
    } else {
        u64::BITS - (total - 1).leading_zeros()
    }
}

/// Compute the public and private subnets for every availability zone.
///
/// Zone `i` gets sub-block `2i` as its public subnet and `2i + 1` as its
/// private subnet, counting sub-blocks of `base` in ascending address order.
///
/// The subnet prefix is capped at /28 before the capacity check. A request
/// that only fits with smaller subnets therefore fails with
/// [`PlanError::BlockTooSmall`] instead of being stretched.
///
/// # Examples
/// ```
/// use subnet_terraform_gen::models::{Ipv4, ZoneCount};
/// use subnet_terraform_gen::processing::compute_subnet_plan;
///
/// let base = Ipv4::new("10.0.0.0/24").unwrap();
/// let plan = compute_subnet_plan(base, ZoneCount::new(1).unwrap()).unwrap();
/// assert_eq!(plan.public_cidrs(), vec!["10.0.0.0/25"]);
/// assert_eq!(plan.private_cidrs(), vec!["10.0.0.128/25"]);
/// ```
pub fn compute_subnet_plan(base: Ipv4, zone_count: ZoneCount) -> Result<SubnetPlan, PlanError> {
    let total_subnets = zone_count.total_subnets();
    let wanted_prefix = u32::from(base.prefix()) + extra_bits(total_subnets);
    let new_prefix = wanted_prefix.min(u32::from(MIN_SUBNET_PREFIX)) as u8;
    log::debug!(
        "compute_subnet_plan({base}, zones={zone_count}) total={total_subnets} prefix /{wanted_prefix} -> /{new_prefix}"
    );

    let too_small = |available: u64| PlanError::BlockTooSmall {
        base,
        zone_count: zone_count.get(),
        new_prefix,
        available,
        required: total_subnets,
    };

    if new_prefix > MAX_LENGTH {
        return Err(too_small(0));
    }

    // A base smaller than the /28 floor cannot be split at the floor at all.
    let subnets = base.subnets(new_prefix).map_err(|e| {
        log::debug!("Cannot split {base} into /{new_prefix}: {e}");
        too_small(0)
    })?;

    let available = subnets.remaining();
    if available < total_subnets {
        log::debug!("{base} yields {available} /{new_prefix} subnets, {total_subnets} needed");
        return Err(too_small(available));
    }

    let (public_subnets, private_subnets): (Vec<Ipv4>, Vec<Ipv4>) = subnets
        .take(total_subnets as usize)
        .tuples::<(Ipv4, Ipv4)>()
        .unzip();

    Ok(SubnetPlan {
        base,
        new_prefix,
        public_subnets,
        private_subnets,
    })
}

/// Validate raw answers and compute the plan.
///
/// The CIDR is checked before the zone count.
pub fn plan_from_cidr(vpc_cidr: &str, az_count: i64) -> Result<SubnetPlan, PlanError> {
    let base = Ipv4::new(vpc_cidr)?;
    let zone_count = ZoneCount::new(az_count)?;
    compute_subnet_plan(base, zone_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::verify_plan;

    fn plan(cidr: &str, zones: i64) -> Result<SubnetPlan, PlanError> {
        plan_from_cidr(cidr, zones)
    }

    #[test]
    fn test_extra_bits() {
        assert_eq!(extra_bits(1), 0);
        assert_eq!(extra_bits(2), 1);
        assert_eq!(extra_bits(3), 2);
        assert_eq!(extra_bits(4), 2);
        assert_eq!(extra_bits(5), 3);
        assert_eq!(extra_bits(128), 7);
        assert_eq!(extra_bits(129), 8);
    }

    #[test]
    fn test_two_zones_in_slash16() {
        let plan = plan("10.0.0.0/16", 2).unwrap();
        assert_eq!(plan.new_prefix, 18);
        assert_eq!(plan.public_cidrs(), vec!["10.0.0.0/18", "10.0.128.0/18"]);
        assert_eq!(plan.private_cidrs(), vec!["10.0.64.0/18", "10.0.192.0/18"]);
    }

    #[test]
    fn test_one_zone_halves_slash24() {
        let plan = plan("10.0.0.0/24", 1).unwrap();
        assert_eq!(plan.new_prefix, 25);
        assert_eq!(plan.public_cidrs(), vec!["10.0.0.0/25"]);
        assert_eq!(plan.private_cidrs(), vec!["10.0.0.128/25"]);
    }

    #[test]
    fn test_three_zones_leave_spare_blocks() {
        let plan = plan("10.0.0.0/16", 3).unwrap();
        assert_eq!(plan.new_prefix, 19);
        assert_eq!(
            plan.public_cidrs(),
            vec!["10.0.0.0/19", "10.0.64.0/19", "10.0.128.0/19"]
        );
        assert_eq!(
            plan.private_cidrs(),
            vec!["10.0.32.0/19", "10.0.96.0/19", "10.0.160.0/19"]
        );
    }

    #[test]
    fn test_many_zones_without_clamp() {
        let plan = plan("10.0.0.0/16", 64).unwrap();
        assert_eq!(plan.new_prefix, 23);
        assert_eq!(plan.zone_count(), 64);
        assert_eq!(plan.public_subnets[63].to_string(), "10.0.252.0/23");
        assert_eq!(plan.private_subnets[63].to_string(), "10.0.254.0/23");
    }

    #[test]
    fn test_clamp_then_capacity_failure() {
        // /24 + 7 bits would be /31, capped to /28 which only gives 16 blocks
        let err = plan("10.0.0.0/24", 64).unwrap_err();
        assert_eq!(
            err,
            PlanError::BlockTooSmall {
                base: Ipv4::new("10.0.0.0/24").unwrap(),
                zone_count: 64,
                new_prefix: 28,
                available: 16,
                required: 128,
            }
        );
    }

    #[test]
    fn test_clamp_still_fits() {
        // 8 zones need 16 blocks: /24 + 4 = /28 exactly
        let plan = plan("10.0.0.0/24", 8).unwrap();
        assert_eq!(plan.new_prefix, 28);
        assert_eq!(plan.private_subnets[7].to_string(), "10.0.0.240/28");

        // 5 zones in a /25: /25 + 4 = /29, capped to /28, 8 blocks >= 10 fails
        assert!(matches!(
            plan_from_cidr("10.0.0.0/25", 5),
            Err(PlanError::BlockTooSmall { available: 8, required: 10, .. })
        ));

        // 3 zones in a /25: /25 + 3 = /28, 8 blocks >= 6
        let plan = plan_from_cidr("10.0.0.0/25", 3).unwrap();
        assert_eq!(plan.new_prefix, 28);
    }

    #[test]
    fn test_base_at_or_below_floor() {
        // /28 cannot be split further
        assert!(matches!(
            plan("10.0.0.0/28", 1),
            Err(PlanError::BlockTooSmall { new_prefix: 28, available: 1, .. })
        ));
        // smaller than the floor cannot be cut to /28 at all
        for cidr in ["10.0.0.0/29", "10.0.0.0/30", "10.0.0.1/32"] {
            assert!(
                matches!(plan(cidr, 1), Err(PlanError::BlockTooSmall { available: 0, .. })),
                "{cidr}"
            );
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            plan("10.0.0.0/16", 0).unwrap_err(),
            PlanError::InvalidZoneCount(0)
        );
        assert_eq!(
            plan("10.0.0.0/16", -1).unwrap_err(),
            PlanError::InvalidZoneCount(-1)
        );
        for bad in ["10.0.0.0", "10.0.0.300/16", "10.0.0.0/40", "10.0.0.1/16", "garbage"] {
            assert!(
                matches!(plan(bad, 2), Err(PlanError::InvalidAddressBlock { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_whole_address_space() {
        let plan = plan("0.0.0.0/0", 1).unwrap();
        assert_eq!(plan.public_cidrs(), vec!["0.0.0.0/1"]);
        assert_eq!(plan.private_cidrs(), vec!["128.0.0.0/1"]);
    }

    #[test]
    fn test_deterministic() {
        let a = plan("172.16.0.0/12", 6).unwrap();
        let b = plan("172.16.0.0/12", 6).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        for prefix in [0u8, 8, 12, 16, 20, 22, 24, 26, 27] {
            let cidr = match prefix {
                0 => "0.0.0.0/0".to_string(),
                _ => format!("10.0.0.0/{prefix}"),
            };
            for zones in 1..=24 {
                match plan(&cidr, zones) {
                    Ok(plan) => {
                        assert_eq!(plan.public_subnets.len(), zones as usize);
                        assert_eq!(plan.private_subnets.len(), zones as usize);
                        assert!(plan.new_prefix <= MIN_SUBNET_PREFIX);
                        assert!(plan.all_blocks().all(|b| b.prefix() == plan.new_prefix));
                        verify_plan(&plan).unwrap();
                    }
                    Err(PlanError::BlockTooSmall {
                        available,
                        required,
                        ..
                    }) => assert!(available < required, "{cidr} x {zones}"),
                    Err(other) => panic!("{cidr} x {zones}: {other}"),
                }
            }
        }
    }
}
