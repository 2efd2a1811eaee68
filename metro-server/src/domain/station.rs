//! Station identity and attributes.

use std::fmt;

use super::LineId;

/// Numeric station identifier, unique across the whole network.
///
/// Interchanges are modelled as several stations (one per line) sharing a
/// name, so two different `StationId`s can denote the same physical place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station node: one stop on one line/branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Unique identifier.
    pub id: StationId,

    /// Short station code from the source data.
    pub code: String,

    /// Display name. Shared by all nodes of an interchange.
    pub name: String,

    /// Line this node belongs to.
    pub line: LineId,

    /// Whether this node is an end of its line.
    pub is_terminus: bool,

    /// Branch/direction index on the line (0, 1, 2, ...).
    pub branch: u8,

    /// Terminus name given explicitly in the record, if any.
    pub terminus_name: Option<String>,
}

impl Station {
    /// Create a plain (non-terminus, branch 0) station.
    pub fn new(id: StationId, name: impl Into<String>, line: LineId) -> Self {
        Self {
            id,
            code: String::new(),
            name: name.into(),
            line,
            is_terminus: false,
            branch: 0,
            terminus_name: None,
        }
    }

    /// Mark this station as a terminus of its line.
    pub fn terminus(mut self) -> Self {
        self.is_terminus = true;
        self
    }

    /// Set the branch/direction index.
    pub fn with_branch(mut self, branch: u8) -> Self {
        self.branch = branch;
        self
    }

    /// Set the station code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}
