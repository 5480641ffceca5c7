use crate::utils::error::{PortSpecError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Slot letters in addressing order; index + 1 is the slot number.
pub const SLOT_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

pub const MAX_SLOT: u8 = 4;

/// Maps a slot number (1..=4) to its letter.
pub fn slot_letter(slot: u8) -> Option<char> {
    match slot {
        1..=MAX_SLOT => Some(SLOT_LETTERS[usize::from(slot - 1)]),
        _ => None,
    }
}

/// Maps a slot letter (case-insensitive) to its number.
pub fn slot_number(letter: char) -> Option<u8> {
    let upper = letter.to_ascii_uppercase();
    SLOT_LETTERS
        .iter()
        .position(|&c| c == upper)
        .and_then(|idx| u8::try_from(idx + 1).ok())
}

/// Notation family of a port address. Also selects the output format an API
/// endpoint expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// `3B`
    #[default]
    Alpha,
    /// `3.02`
    Decimal,
}

/// One physical SIM slot on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalPort {
    board: u32,
    slot: u8,
    notation: Notation,
}

impl CanonicalPort {
    pub fn new(board: u32, slot: u8, notation: Notation) -> Result<Self> {
        Self::with_token(board, slot, notation, &format!("{}.{:02}", board, slot))
    }

    /// Same as [`CanonicalPort::new`], reporting `token` on failure.
    pub(crate) fn with_token(
        board: u32,
        slot: u8,
        notation: Notation,
        token: &str,
    ) -> Result<Self> {
        if board == 0 {
            return Err(PortSpecError::invalid_format(token, "board number must be at least 1"));
        }
        if !(1..=MAX_SLOT).contains(&slot) {
            return Err(PortSpecError::invalid_format(
                token,
                format!("slot {} is outside 1..{}", slot, MAX_SLOT),
            ));
        }
        Ok(Self {
            board,
            slot,
            notation,
        })
    }

    pub fn board(&self) -> u32 {
        self.board
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn board_and_slot(&self) -> (u32, u8) {
        (self.board, self.slot)
    }

    pub fn slot_letter(&self) -> char {
        SLOT_LETTERS[usize::from(self.slot - 1)]
    }

    pub fn in_notation(self, notation: Notation) -> Self {
        Self { notation, ..self }
    }

    pub fn to_alpha(self) -> Self {
        self.in_notation(Notation::Alpha)
    }

    pub fn to_decimal(self) -> Self {
        self.in_notation(Notation::Decimal)
    }
}

impl fmt::Display for CanonicalPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation {
            Notation::Alpha => write!(f, "{}{}", self.board, self.slot_letter()),
            Notation::Decimal => write!(f, "{}.{:02}", self.board, self.slot),
        }
    }
}

impl Serialize for CanonicalPort {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A `<start>-<end>` token split at its first interior dash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRangeSpec<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> PortRangeSpec<'a> {
    /// Returns `None` unless the token has a `-` that is neither leading nor trailing.
    pub fn split(token: &'a str) -> Option<Self> {
        let token = token.trim();
        if token.starts_with('-') || token.ends_with('-') {
            return None;
        }
        token.split_once('-').map(|(start, end)| Self {
            start: start.trim(),
            end: end.trim(),
        })
    }

    pub fn is_decimal(&self) -> bool {
        self.start.contains('.') || self.end.contains('.')
    }
}

/// Ordered port collection; the first occurrence of a port wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortList {
    ports: Vec<CanonicalPort>,
    seen: HashSet<CanonicalPort>,
}

impl PortList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `port` unless already present. Returns whether it was added.
    pub fn push(&mut self, port: CanonicalPort) -> bool {
        if self.seen.insert(port) {
            self.ports.push(port);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalPort> {
        self.ports.iter()
    }

    pub fn as_slice(&self) -> &[CanonicalPort] {
        &self.ports
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.ports.iter().map(ToString::to_string).collect()
    }

    pub fn into_vec(self) -> Vec<CanonicalPort> {
        self.ports
    }
}

impl Extend<CanonicalPort> for PortList {
    fn extend<I: IntoIterator<Item = CanonicalPort>>(&mut self, iter: I) {
        for port in iter {
            self.push(port);
        }
    }
}

impl FromIterator<CanonicalPort> for PortList {
    fn from_iter<I: IntoIterator<Item = CanonicalPort>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a PortList {
    type Item = &'a CanonicalPort;
    type IntoIter = std::slice::Iter<'a, CanonicalPort>;

    fn into_iter(self) -> Self::IntoIter {
        self.ports.iter()
    }
}

impl Serialize for PortList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.ports)
    }
}

/// IMEIs in operator order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImeiList(Vec<String>);

impl ImeiList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ImeiList {
    fn from(imeis: Vec<String>) -> Self {
        Self(imeis)
    }
}

/// One IMEI write, addressed by numeric board and slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImeiChange {
    pub board: u32,
    pub slot: u8,
    pub imei: String,
}

impl ImeiChange {
    pub fn port_label(&self) -> String {
        format!("{}.{:02}", self.board, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_mapping() {
        assert_eq!(slot_letter(1), Some('A'));
        assert_eq!(slot_letter(4), Some('D'));
        assert_eq!(slot_letter(0), None);
        assert_eq!(slot_letter(5), None);
        assert_eq!(slot_number('c'), Some(3));
        assert_eq!(slot_number('E'), None);
    }

    #[test]
    fn test_canonical_port_rejects_out_of_range() {
        assert!(CanonicalPort::new(0, 1, Notation::Alpha).is_err());
        assert!(CanonicalPort::new(1, 0, Notation::Decimal).is_err());
        assert!(CanonicalPort::new(1, 5, Notation::Decimal).is_err());
    }

    #[test]
    fn test_display_per_notation() {
        let port = CanonicalPort::new(3, 2, Notation::Alpha).unwrap();
        assert_eq!(port.to_string(), "3B");
        assert_eq!(port.to_decimal().to_string(), "3.02");
        assert_eq!(port.to_decimal().to_alpha(), port);
    }

    #[test]
    fn test_port_list_keeps_first_occurrence() {
        let a = CanonicalPort::new(1, 1, Notation::Alpha).unwrap();
        let b = CanonicalPort::new(2, 2, Notation::Alpha).unwrap();

        let list: PortList = [a, b, a].into_iter().collect();
        assert_eq!(list.to_strings(), vec!["1A", "2B"]);

        // 不同記法視為不同項目
        let mut list = list;
        assert!(list.push(a.to_decimal()));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_range_split() {
        let spec = PortRangeSpec::split("1A - 2B").unwrap();
        assert_eq!(spec.start, "1A");
        assert_eq!(spec.end, "2B");
        assert!(!spec.is_decimal());

        assert!(PortRangeSpec::split("2.01-2.04").unwrap().is_decimal());
        assert!(PortRangeSpec::split("-1").is_none());
        assert!(PortRangeSpec::split("1-").is_none());
        assert!(PortRangeSpec::split("1A").is_none());
    }

    #[test]
    fn test_imei_change_label() {
        let change = ImeiChange {
            board: 7,
            slot: 3,
            imei: "123456789012345".to_string(),
        };
        assert_eq!(change.port_label(), "7.03");
    }
}
