//! Full port specifications: `1A,2B,4-8,10.01-10.04`, `*`, or a CSV path.

use crate::core::csv_loader;
use crate::core::normalize::normalize_port;
use crate::core::range::expand_range;
use crate::domain::model::{slot_number, CanonicalPort, Notation, PortList, PortRangeSpec};
use crate::utils::error::{PortSpecError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BOARD_COUNT: u32 = 32;

/// Ports addressed by `*` / `all`.
///
/// This is a fixed table, not a device query. Gateways with a different
/// layout should override it through the `[all_ports]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllPorts {
    pub boards: u32,
    pub slots: Vec<char>,
}

impl Default for AllPorts {
    fn default() -> Self {
        Self {
            boards: DEFAULT_BOARD_COUNT,
            slots: vec!['A'],
        }
    }
}

impl AllPorts {
    /// Board-major listing: `1A, 1B, .., 2A, ..`.
    pub fn ports(&self) -> Result<PortList> {
        let mut list = PortList::new();
        for board in 1..=self.boards {
            for &letter in &self.slots {
                let slot = slot_number(letter).ok_or_else(|| {
                    PortSpecError::invalid_format(letter.to_string(), "unrecognized slot letter")
                })?;
                list.push(CanonicalPort::new(board, slot, Notation::Alpha)?);
            }
        }
        Ok(list)
    }
}

fn is_wildcard(spec: &str) -> bool {
    spec == "*" || spec.eq_ignore_ascii_case("all")
}

/// Turns operator port specifications into an ordered, de-duplicated
/// [`PortList`]. Any bad token fails the whole parse.
#[derive(Debug, Clone, Default)]
pub struct PortSpecParser {
    all_ports: AllPorts,
}

impl PortSpecParser {
    pub fn new(all_ports: AllPorts) -> Self {
        Self { all_ports }
    }

    pub fn all_ports(&self) -> &AllPorts {
        &self.all_ports
    }

    /// Parses the literal grammar only; CSV paths are not considered.
    pub fn parse(&self, spec: &str) -> Result<PortList> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(PortSpecError::EmptySpecification);
        }

        if is_wildcard(spec) {
            tracing::debug!(boards = self.all_ports.boards, "expanding wildcard port spec");
            return self.all_ports.ports();
        }

        let mut ports = PortList::new();
        for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if PortRangeSpec::split(token).is_some() {
                tracing::debug!(token, "range token");
                ports.extend(expand_range(token)?);
            } else {
                tracing::debug!(token, "single token");
                ports.push(normalize_port(token)?);
            }
        }

        if ports.is_empty() {
            return Err(PortSpecError::EmptySpecification);
        }
        Ok(ports)
    }

    /// Like [`PortSpecParser::parse`], but a CSV file reference is loaded
    /// first and short-circuits the literal grammar.
    pub fn expand(&self, spec: &str) -> Result<PortList> {
        if spec.trim().is_empty() {
            return Err(PortSpecError::EmptySpecification);
        }

        match csv_loader::expand_ports_if_csv(spec)? {
            Some(ports) => Ok(ports),
            None => self.parse(spec),
        }
    }
}

/// Parses a literal port specification with the default `*` table.
pub fn parse_port_spec(spec: &str) -> Result<PortList> {
    PortSpecParser::default().parse(spec)
}

/// Parses a port specification or CSV file reference with the default `*` table.
pub fn expand_ports(spec: &str) -> Result<PortList> {
    PortSpecParser::default().expand(spec)
}
