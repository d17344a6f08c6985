//! IPv4 address block and CIDR notation utilities.
//!
//! Provides [`Ipv4`], a canonical IPv4 network (host bits zero), along with
//! the prefix arithmetic used by the subnet planner.

use crate::error::PlanError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Addresses the cloud providers keep for themselves in every subnet
/// (network, gateway, two DNS/reserved, broadcast).
pub const RESERVED_PER_SUBNET: u64 = 5;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_terraform_gen::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> Result<u64, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        Ok(1u64 << (MAX_LENGTH - len))
    }
}

/// Number of usable host addresses in a cloud subnet of the given prefix.
///
/// Subnets of /30 and smaller leave no usable hosts once the reserved
/// addresses are taken.
pub fn usable_hosts(len: u8) -> Result<u64, Box<dyn Error>> {
    if len >= MAX_LENGTH - 2 {
        Err("Network length is too long or invalid".into())
    } else {
        Ok(block_size(len)? - RESERVED_PER_SUBNET)
    }
}

/// A canonical IPv4 network in CIDR notation.
///
/// The base address always has its host bits cleared, so two blocks compare
/// equal exactly when they cover the same address range.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, PlanError> {
        addr_cidr.parse()
    }

    /// Build a block from an address and prefix, rejecting set host bits.
    pub fn from_parts(addr: Ipv4Addr, prefix: u8) -> Result<Ipv4, PlanError> {
        let input = format!("{addr}/{prefix}");
        if prefix > MAX_LENGTH {
            return Err(PlanError::invalid_block(
                &input,
                format!("prefix length must be between 0 and {MAX_LENGTH}"),
            ));
        }
        let network =
            cut_addr(addr, prefix).map_err(|e| PlanError::invalid_block(&input, e.to_string()))?;
        if network != addr {
            return Err(PlanError::invalid_block(
                &input,
                format!("host bits set, network address is {network}/{prefix}"),
            ));
        }
        Ok(Ipv4 { addr, prefix })
    }

    /// Network (lowest) address of the block.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Prefix length (0-32).
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.prefix)
            .unwrap_or_else(|e| panic!("Error calculating broadcast address for {self}: {e}"))
    }

    /// Number of addresses covered by the block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    /// Check if an IP address is contained within this block.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// Check if `other` lies entirely within this block.
    pub fn contains_block(&self, other: &Ipv4) -> bool {
        self.contains(other.lo()) && self.contains(other.hi())
    }

    /// Check if the two blocks share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }

    /// Enumerate the sub-blocks of this block at `new_prefix`, in ascending
    /// address order.
    ///
    /// # Examples
    /// ```
    /// use subnet_terraform_gen::models::Ipv4;
    /// let net = Ipv4::new("10.0.0.0/24").unwrap();
    /// let halves: Vec<String> = net.subnets(25).unwrap().map(|s| s.to_string()).collect();
    /// assert_eq!(halves, vec!["10.0.0.0/25", "10.0.0.128/25"]);
    /// ```
    pub fn subnets(&self, new_prefix: u8) -> Result<Subnets, Box<dyn Error>> {
        if new_prefix > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        if new_prefix < self.prefix {
            return Err(format!(
                "new prefix /{new_prefix} must not be shorter than /{}",
                self.prefix
            )
            .into());
        }
        Ok(Subnets {
            start: u32::from(self.addr) as u64,
            step: block_size(new_prefix)?,
            prefix: new_prefix,
            next: 0,
            count: 1u64 << (new_prefix - self.prefix),
        })
    }
}

/// Ascending iterator over equally sized sub-blocks of an [`Ipv4`] block.
///
/// Blocks are computed from their index, so the final block of 255.255.255.255
/// is reached without overflowing.
#[derive(Debug, Clone)]
pub struct Subnets {
    start: u64,
    step: u64,
    prefix: u8,
    next: u64,
    count: u64,
}

impl Subnets {
    /// Number of sub-blocks not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.count - self.next
    }
}

impl Iterator for Subnets {
    type Item = Ipv4;

    fn next(&mut self) -> Option<Ipv4> {
        if self.next >= self.count {
            return None;
        }
        let bits = self.start + self.next * self.step;
        self.next += 1;
        Some(Ipv4 {
            addr: Ipv4Addr::from(bits as u32),
            prefix: self.prefix,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Subnets {}

impl FromStr for Ipv4 {
    type Err = PlanError;

    fn from_str(addr_cidr: &str) -> Result<Ipv4, PlanError> {
        let trimmed = addr_cidr.trim();
        let (addr, prefix) = trimmed
            .split_once('/')
            .ok_or_else(|| PlanError::invalid_block(trimmed, "expected address/prefix"))?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| {
            PlanError::invalid_block(trimmed, format!("invalid IPv4 address {addr}"))
        })?;
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlanError::invalid_block(
                trimmed,
                format!("invalid prefix length {prefix}"),
            ));
        }
        let prefix: u8 = prefix.parse().map_err(|_| {
            PlanError::invalid_block(trimmed, format!("invalid prefix length {prefix}"))
        })?;
        Ipv4::from_parts(addr, prefix).map_err(|e| match e {
            PlanError::InvalidAddressBlock { reason, .. } => {
                PlanError::invalid_block(trimmed, reason)
            }
            other => other,
        })
    }
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::from_str(&s).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}
