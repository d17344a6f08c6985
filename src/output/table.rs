//! CSV style table of a subnet plan.

use crate::models::{usable_hosts, Ipv4, SubnetPlan};
use std::io::Write;

use super::terminal::format_field;

/// One printed row: a single subnet of a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    /// Availability zone index.
    pub zone: usize,
    /// "public" or "private".
    pub tier: &'static str,
    /// Subnet CIDR notation.
    pub subnet_cidr: String,
    /// Broadcast address.
    pub broadcast: String,
    /// Addresses left after the cloud-reserved ones.
    pub usable_hosts: u64,
}

fn make_row(zone: usize, tier: &'static str, subnet: &Ipv4) -> PlanRow {
    PlanRow {
        zone,
        tier,
        subnet_cidr: subnet.to_string(),
        broadcast: subnet.hi().to_string(),
        usable_hosts: usable_hosts(subnet.prefix()).unwrap_or(0),
    }
}

/// Rows of the plan: per zone the public subnet, then the private one.
pub fn plan_rows(plan: &SubnetPlan) -> Vec<PlanRow> {
    plan.zones()
        .flat_map(|z| {
            [
                make_row(z.index, "public", &z.public),
                make_row(z.index, "private", &z.private),
            ]
        })
        .collect()
}

/// Write the plan as a CSV table.
pub fn write_plan<W: Write>(plan: &SubnetPlan, out: &mut W) -> std::io::Result<()> {
    log::info!(
        "#Start write_plan() {} zone(s) in {} at /{}",
        plan.zone_count(),
        plan.base,
        plan.new_prefix
    );

    writeln!(
        out,
        r#""zone",   "tier",       "subnet_cidr",        "broadcast",  "hosts""#
    )?;
    for row in plan_rows(plan) {
        writeln!(
            out,
            "{zone},{tier},{subnet_cidr},{broadcast},{hosts}",
            zone = format_field(row.zone, 6),
            tier = format_field(row.tier, 10),
            subnet_cidr = format_field(&row.subnet_cidr, 20),
            broadcast = format_field(format!("{}_br", row.broadcast), 20),
            hosts = format_field(row.usable_hosts, 8),
        )?;
    }
    Ok(())
}
