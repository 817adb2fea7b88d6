//! Desired DNS record types
//!
//! A [`DnsRecord`] is the unit of work handed to the provider: "point
//! `dns_name` at the load balancer named by the first target". Only CNAME
//! records are supported; they are realized as Route 53 alias A records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// DNS record type of a desired record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Canonical name; the only type the alias provider handles
    Cname,
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Text
    Txt,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::Cname => "CNAME",
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Txt => "TXT",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CNAME" => Ok(RecordType::Cname),
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "TXT" => Ok(RecordType::Txt),
            _ => Err(Error::UnsupportedRecordType(s.to_string())),
        }
    }
}

/// A desired DNS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record type
    pub record_type: RecordType,

    /// Fully qualified domain name of the record
    pub dns_name: String,

    /// Record targets. Only the first one is used.
    #[serde(default)]
    pub targets: Vec<String>,
}

impl DnsRecord {
    /// Create a CNAME record pointing `dns_name` at `target`
    pub fn cname(dns_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            record_type: RecordType::Cname,
            dns_name: dns_name.into(),
            targets: vec![target.into()],
        }
    }

    /// Validate the record shape and return `(domain, target)`
    ///
    /// Targets beyond the first are ignored.
    pub fn alias_parts(&self) -> Result<(&str, &str)> {
        if self.record_type != RecordType::Cname {
            return Err(Error::UnsupportedRecordType(self.record_type.to_string()));
        }
        let target = self.targets.first().map(String::as_str).unwrap_or_default();
        if self.dns_name.is_empty() {
            return Err(Error::MissingDomain);
        }
        if target.is_empty() {
            return Err(Error::MissingTarget);
        }
        Ok((&self.dns_name, target))
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> [{}]",
            self.record_type,
            self.dns_name,
            self.targets.join(", ")
        )
    }
}
