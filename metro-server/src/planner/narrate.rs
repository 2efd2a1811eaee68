//! Turning a route into travel instructions.
//!
//! Only line changes are announced. The direction of travel on a line is
//! named after the terminus the train is heading to, which is resolved from
//! the line's two terminus names.

use std::fmt;

use tracing::debug;

use crate::domain::{LineId, Station, StationId};
use crate::network::{Network, TerminusTable};

/// One travel instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Board the first line of the route.
    Board {
        station: String,
        line: LineId,
        direction: Option<String>,
    },
    /// Change to another line.
    Change {
        station: String,
        line: LineId,
        direction: Option<String>,
    },
    /// Leave the network at the destination.
    Arrive { station: String },
    /// Source and destination are the same station.
    AlreadyThere { station: String },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Board {
                station,
                line,
                direction,
            } => {
                write!(f, "At {station}, board line {line}")?;
                write_direction(f, direction.as_deref())
            }
            Instruction::Change {
                station,
                line,
                direction,
            } => {
                write!(f, "At {station}, change and board line {line}")?;
                write_direction(f, direction.as_deref())
            }
            Instruction::Arrive { station } => write!(f, "Alight at {station}."),
            Instruction::AlreadyThere { station } => {
                write!(f, "You are already at {station}.")
            }
        }
    }
}

fn write_direction(f: &mut fmt::Formatter<'_>, direction: Option<&str>) -> fmt::Result {
    match direction {
        Some(d) => write!(f, " toward {d}."),
        None => f.write_str("."),
    }
}

/// A recoverable problem found while narrating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrationWarning {
    /// The line does not have exactly two termini, so the direction of
    /// travel cannot be named
    #[error("line {line} has {termini} terminus entries; direction not announced")]
    AmbiguousTerminusBranch { line: LineId, termini: usize },
}

/// Errors that prevent narration entirely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrationError {
    #[error("cannot narrate an empty path")]
    EmptyPath,

    #[error("path contains unknown station {0}")]
    UnknownStation(StationId),
}

/// Instructions for a route, plus any warnings raised along the way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Narration {
    pub instructions: Vec<Instruction>,
    pub warnings: Vec<NarrationWarning>,
}

impl Narration {
    /// Render every instruction as a sentence.
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }

    /// Number of line changes after the initial boarding.
    pub fn change_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Change { .. }))
            .count()
    }
}

/// Narrate a path through `network`, using its terminus table.
///
/// See [`narrate_with`] for the rules.
pub fn narrate(network: &Network, path: &[StationId]) -> Result<Narration, NarrationError> {
    narrate_with(network, network.termini(), path)
}

/// Narrate a path with an explicit terminus table.
///
/// A boarding instruction is emitted at the first station, a change
/// instruction wherever the line differs from the previous station's
/// (announced at the previous station, where the traveller actually
/// changes), and an arrival instruction at the end. A single-station path
/// gives one [`Instruction::AlreadyThere`].
pub fn narrate_with(
    network: &Network,
    termini: &TerminusTable,
    path: &[StationId],
) -> Result<Narration, NarrationError> {
    let stations = path
        .iter()
        .map(|&id| network.station(id).ok_or(NarrationError::UnknownStation(id)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut narration = Narration::default();

    let (last, _) = stations.split_last().ok_or(NarrationError::EmptyPath)?;
    if stations.len() == 1 {
        narration.instructions.push(Instruction::AlreadyThere {
            station: last.name.clone(),
        });
        return Ok(narration);
    }

    let mut previous: Option<&Station> = None;
    for (i, &station) in stations.iter().enumerate() {
        if previous.is_none_or(|p| p.line != station.line) {
            let next = stations.get(i + 1).map(|s| s.name.as_str());
            let direction = match resolve_direction(termini, station, next) {
                Ok(d) => Some(d.to_string()),
                Err(warning) => {
                    debug!(line = %station.line, "Narrating without direction");
                    narration.warnings.push(warning);
                    None
                }
            };

            narration.instructions.push(match previous {
                None => Instruction::Board {
                    station: station.name.clone(),
                    line: station.line.clone(),
                    direction,
                },
                Some(p) => Instruction::Change {
                    station: p.name.clone(),
                    line: station.line.clone(),
                    direction,
                },
            });
        }
        previous = Some(station);
    }

    narration.instructions.push(Instruction::Arrive {
        station: last.name.clone(),
    });

    Ok(narration)
}

/// Pick the terminus a train on `station`'s line is heading to.
///
/// If the next station is itself a terminus, that is the direction.
/// Otherwise it is the terminus that is not the current station; when the
/// current station is neither, the first terminus is named.
fn resolve_direction<'a>(
    termini: &'a TerminusTable,
    station: &Station,
    next: Option<&str>,
) -> Result<&'a str, NarrationWarning> {
    match termini.get(&station.line) {
        Some([first, second]) => {
            if let Some(next) = next {
                if next == first {
                    return Ok(first.as_str());
                }
                if next == second {
                    return Ok(second.as_str());
                }
            }
            Ok(if station.name == *first {
                second.as_str()
            } else {
                first.as_str()
            })
        }
        other => Err(NarrationWarning::AmbiguousTerminusBranch {
            line: station.line.clone(),
            termini: other.map_or(0, <[String]>::len),
        }),
    }
}
