//! Parsing of the station and edge text formats.
//!
//! Station lines look like
//! `<code> <id> <name...> <line>;<is_terminus> <branch> [<terminus name>]`
//! and edge lines like `E <a> <b> <seconds>`. Parsing is best-effort: a
//! malformed line is logged and skipped so that one bad record never blocks
//! the rest of the dataset.

use tracing::warn;

use crate::domain::{InvalidLineId, LineId, Station, StationId};

use super::builder::EdgeRecord;

/// Marker token that starts an edge line.
const EDGE_MARKER: &str = "E";

/// Longest travel time accepted for a single edge, in seconds (one day).
const MAX_EDGE_SECONDS: f64 = 86_400.0;

/// Why a single record line could not be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Station line without exactly one `;`
    #[error("expected exactly one ';' separator")]
    Separator,

    /// A required field is absent
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A numeric field did not parse
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Travel time below zero
    #[error("negative travel time: {0}")]
    NegativeWeight(f64),

    /// Travel time too long to be a single hop
    #[error("travel time of {0} s exceeds {max} s", max = MAX_EDGE_SECONDS)]
    ImplausibleWeight(f64),

    /// Line id token is unusable
    #[error(transparent)]
    Line(#[from] InvalidLineId),
}

/// Records recovered from a file, plus how many lines were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Parse every station line in `text`.
pub fn parse_stations(text: &str) -> Parsed<Station> {
    parse_lines(text, "station", |line| parse_station(line).map(Some))
}

/// Parse every edge line in `text`. Lines without the edge marker are ignored.
pub fn parse_edges(text: &str) -> Parsed<EdgeRecord> {
    parse_lines(text, "edge", parse_edge)
}

fn parse_lines<T>(
    text: &str,
    kind: &'static str,
    parse: impl Fn(&str) -> Result<Option<T>, RecordError>,
) -> Parsed<T> {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse(line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                warn!(kind, line_no = idx + 1, error = %e, record = line, "Skipping malformed record");
                skipped += 1;
            }
        }
    }

    Parsed { records, skipped }
}

/// Parse one station line.
///
/// The name may contain spaces; the line id is the last token before `;`.
pub fn parse_station(line: &str) -> Result<Station, RecordError> {
    let mut halves = line.split(';');
    let (main, flags) = match (halves.next(), halves.next(), halves.next()) {
        (Some(main), Some(flags), None) => (main.trim(), flags),
        _ => return Err(RecordError::Separator),
    };

    let (code, rest) = main
        .split_once(char::is_whitespace)
        .ok_or(RecordError::MissingField("id"))?;
    let (id, rest) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or(RecordError::MissingField("name"))?;
    let (name, line_id) = rest
        .trim()
        .rsplit_once(char::is_whitespace)
        .ok_or(RecordError::MissingField("line"))?;

    let id = id.parse::<u32>().map_err(|_| RecordError::InvalidNumber {
        field: "station id",
        value: id.to_string(),
    })?;

    let mut flags = flags.split_whitespace();
    let is_terminus = flags
        .next()
        .ok_or(RecordError::MissingField("terminus flag"))?
        .eq_ignore_ascii_case("true");
    let branch = flags.next().ok_or(RecordError::MissingField("branch"))?;
    let branch = branch.parse::<u8>().map_err(|_| RecordError::InvalidNumber {
        field: "branch",
        value: branch.to_string(),
    })?;
    let terminus_name = flags.collect::<Vec<_>>().join(" ");

    Ok(Station {
        id: StationId(id),
        code: code.to_string(),
        name: name.trim_end().to_string(),
        line: LineId::parse(line_id)?,
        is_terminus,
        branch,
        terminus_name: (!terminus_name.is_empty()).then_some(terminus_name),
    })
}

/// Parse one edge line. Returns `Ok(None)` for lines of another kind.
pub fn parse_edge(line: &str) -> Result<Option<EdgeRecord>, RecordError> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some(EDGE_MARKER) {
        return Ok(None);
    }

    let mut next_id = |field: &'static str| -> Result<u32, RecordError> {
        let token = parts.next().ok_or(RecordError::MissingField(field))?;
        token.parse().map_err(|_| RecordError::InvalidNumber {
            field,
            value: token.to_string(),
        })
    };
    let a = next_id("first station")?;
    let b = next_id("second station")?;

    let token = parts.next().ok_or(RecordError::MissingField("travel time"))?;
    let seconds: f64 = token
        .parse()
        .ok()
        .filter(|s: &f64| s.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            field: "travel time",
            value: token.to_string(),
        })?;
    if seconds < 0.0 {
        return Err(RecordError::NegativeWeight(seconds));
    }
    if seconds > MAX_EDGE_SECONDS {
        return Err(RecordError::ImplausibleWeight(seconds));
    }

    Ok(Some(EdgeRecord::new(a, b, seconds)))
}
