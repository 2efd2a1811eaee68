//! Line identifier type.

use std::fmt;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// An opaque line identifier such as `"4"` or `"7bis"`.
///
/// Line ids are compared as strings and carry no ordering or styling
/// meaning. Any non-empty token without whitespace or `;` is accepted.
///
/// # Examples
///
/// ```
/// use metro_server::domain::LineId;
///
/// let line = LineId::parse("7bis").unwrap();
/// assert_eq!(line.as_str(), "7bis");
///
/// assert!(LineId::parse("").is_err());
/// assert!(LineId::parse("7 bis").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(String);

impl LineId {
    /// Parse a line id from a record token.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        if s.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }
        if s.chars().any(|c| c.is_whitespace() || c == ';') {
            return Err(InvalidLineId {
                reason: "must be a single token",
            });
        }
        Ok(LineId(s.to_string()))
    }

    /// Returns the line id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(LineId::parse("1").is_ok());
        assert!(LineId::parse("3bis").is_ok());
        assert!(LineId::parse("RER-A").is_ok());
    }

    #[test]
    fn reject_separators() {
        assert!(LineId::parse("1;").is_err());
        assert!(LineId::parse("a b").is_err());
        assert!(LineId::parse("\t").is_err());
    }

    #[test]
    fn display_and_debug() {
        let line = LineId::parse("7bis").unwrap();
        assert_eq!(line.to_string(), "7bis");
        assert_eq!(format!("{:?}", line), "LineId(7bis)");
    }
}
