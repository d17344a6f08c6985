//! Overlapping block detection.
//!
//! Re-checks a computed plan: every block inside the base network and no two
//! blocks sharing an address.

use crate::models::{Ipv4, SubnetPlan};
use std::error::Error;

/// Two blocks that share at least one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: Ipv4,
    pub second: Ipv4,
}

/// Find every pair of overlapping blocks.
///
/// # Arguments
/// * `blocks` - The blocks to compare, in any order
///
/// # Returns
/// The conflicting pairs, ordered by the lower block of each pair
pub fn find_overlaps(blocks: &[Ipv4]) -> Vec<OverlapConflict> {
    let mut sorted = blocks.to_vec();
    sorted.sort();

    let mut conflicts = Vec::new();
    for (i, first) in sorted.iter().enumerate() {
        // sorted by start address, so scanning stops at the first block
        // beginning after this one ends
        for second in sorted[i + 1..]
            .iter()
            .take_while(|b| b.lo() <= first.hi())
        {
            conflicts.push(OverlapConflict {
                first: *first,
                second: *second,
            });
        }
    }
    conflicts
}

/// Log overlap conflicts as warnings.
pub fn log_overlaps(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::debug!("No overlapping subnets found.");
        return;
    }

    log::warn!("Found {} overlapping subnet pair(s):", conflicts.len());
    for conflict in conflicts {
        log::warn!("  {} overlaps {}", conflict.first, conflict.second);
    }
}

/// Check a plan's blocks are disjoint and inside its base network.
///
/// # Returns
/// * `Ok(())` - The plan is consistent
/// * `Err` - Naming the first block outside the base or the overlapping pairs
pub fn verify_plan(plan: &SubnetPlan) -> Result<(), Box<dyn Error>> {
    if plan.public_subnets.len() != plan.private_subnets.len() {
        return Err(format!(
            "{} public subnets but {} private subnets",
            plan.public_subnets.len(),
            plan.private_subnets.len()
        )
        .into());
    }

    if let Some(outside) = plan.all_blocks().find(|b| !plan.base.contains_block(b)) {
        return Err(format!("Subnet {outside} lies outside {}", plan.base).into());
    }

    let blocks: Vec<Ipv4> = plan.all_blocks().copied().collect();
    let conflicts = find_overlaps(&blocks);
    if !conflicts.is_empty() {
        log_overlaps(&conflicts);
        let pairs = conflicts
            .iter()
            .map(|c| format!("{} / {}", c.first, c.second))
            .collect::<Vec<String>>()
            .join(", ");
        return Err(format!("Overlapping subnets: {pairs}").into());
    }

    log::debug!(
        "Plan for {} verified: {} disjoint /{} subnets",
        plan.base,
        blocks.len(),
        plan.new_prefix
    );
    Ok(())
}
