//! IPv4 CIDR block handling.
//!
//! Provides [`Ipv4Cidr`] for representing a network address with its prefix
//! length, along with the containment and overlap checks used when
//! validating the stack layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_PREFIX_LEN: u8 = 32;

/// Errors from parsing a CIDR block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("'{0}' is not in address/prefix form")]
    MissingPrefix(String),

    #[error("'{0}' is not a valid IPv4 address")]
    InvalidAddress(String),

    #[error("'{0}' is not a valid prefix length (0-32)")]
    InvalidPrefix(String),

    /// Host bits are set below the prefix, e.g. `10.0.1.5/24`
    #[error("'{cidr}' has host bits set; did you mean '{canonical}'?")]
    NotCanonical { cidr: String, canonical: String },
}

/// An IPv4 network in CIDR notation, e.g. `10.0.0.0/16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Cidr {
    addr: Ipv4Addr,
    prefix: u8,
}

/// Convert a prefix length to a subnet mask as u32.
fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (MAX_PREFIX_LEN - prefix)
    }
}

impl Ipv4Cidr {
    /// `0.0.0.0/0`
    pub const ANYWHERE: Ipv4Cidr = Ipv4Cidr {
        addr: Ipv4Addr::UNSPECIFIED,
        prefix: 0,
    };

    /// Network address
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Prefix length
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn first(&self) -> u32 {
        u32::from(self.addr)
    }

    fn last(&self) -> u32 {
        self.first() | !mask(self.prefix)
    }

    /// Whether `other` lies entirely inside this network
    pub fn contains(&self, other: &Ipv4Cidr) -> bool {
        other.prefix >= self.prefix && other.first() & mask(self.prefix) == self.first()
    }

    /// Whether the two networks share at least one address
    pub fn overlaps(&self, other: &Ipv4Cidr) -> bool {
        self.first() <= other.last() && other.first() <= self.last()
    }
}

impl FromStr for Ipv4Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| CidrError::MissingPrefix(s.to_string()))?;

        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| CidrError::InvalidAddress(addr.to_string()))?;
        let prefix: u8 = prefix
            .parse()
            .ok()
            .filter(|p| *p <= MAX_PREFIX_LEN)
            .ok_or_else(|| CidrError::InvalidPrefix(prefix.to_string()))?;

        let network = Ipv4Addr::from(u32::from(addr) & mask(prefix));
        if network != addr {
            return Err(CidrError::NotCanonical {
                cidr: s.to_string(),
                canonical: format!("{network}/{prefix}"),
            });
        }

        Ok(Self { addr, prefix })
    }
}

impl TryFrom<String> for Ipv4Cidr {
    type Error = CidrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ipv4Cidr> for String {
    fn from(cidr: Ipv4Cidr) -> Self {
        cidr.to_string()
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Ipv4Cidr {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let c = cidr("10.0.0.0/16");
        assert_eq!(c.addr(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(c.prefix(), 16);
        assert_eq!(c.to_string(), "10.0.0.0/16");
    }

    #[test]
    fn test_anywhere() {
        assert_eq!(cidr("0.0.0.0/0"), Ipv4Cidr::ANYWHERE);
        assert!(Ipv4Cidr::ANYWHERE.contains(&cidr("192.168.1.0/24")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "10.0.0.0".parse::<Ipv4Cidr>(),
            Err(CidrError::MissingPrefix(_))
        ));
        assert!(matches!(
            "10.0.0.300/16".parse::<Ipv4Cidr>(),
            Err(CidrError::InvalidAddress(_))
        ));
        assert!(matches!(
            "10.0.0.0/33".parse::<Ipv4Cidr>(),
            Err(CidrError::InvalidPrefix(_))
        ));
        assert!(matches!(
            "10.0.0.0/abc".parse::<Ipv4Cidr>(),
            Err(CidrError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_rejects_host_bits() {
        let err = "10.0.1.5/24".parse::<Ipv4Cidr>().unwrap_err();
        assert_eq!(
            err,
            CidrError::NotCanonical {
                cidr: "10.0.1.5/24".to_string(),
                canonical: "10.0.1.0/24".to_string(),
            }
        );
    }

    #[test]
    fn test_contains() {
        let vpc = cidr("10.0.0.0/16");
        assert!(vpc.contains(&cidr("10.0.1.0/24")));
        assert!(vpc.contains(&cidr("10.0.2.0/24")));
        assert!(vpc.contains(&vpc));
        assert!(!vpc.contains(&cidr("10.1.0.0/24")));
        assert!(!vpc.contains(&cidr("10.0.0.0/8")));
    }

    #[test]
    fn test_overlaps() {
        let public = cidr("10.0.1.0/24");
        let private = cidr("10.0.2.0/24");
        assert!(!public.overlaps(&private));
        assert!(public.overlaps(&cidr("10.0.0.0/16")));
        assert!(cidr("10.0.0.0/23").overlaps(&public));
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(String::from(cidr("10.0.2.0/24")), "10.0.2.0/24");
        assert!(Ipv4Cidr::try_from("10.0.2.1/24".to_string()).is_err());
    }
}
