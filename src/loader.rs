use tracing::{trace, warn};

use crate::lts::{Lts, LtsBuilder, Origin};

/// Represents the types of errors that can occur when parsing an LTS description.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// A record does not consist of exactly three fields.
    MalformedLine {
        /// One-based number of the offending line.
        line: usize,
    },
    /// A record has a blank source, action or target field.
    EmptyField {
        /// One-based number of the offending line.
        line: usize,
    },
    /// The text ended before the `!` end marker.
    MissingEndMarker,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedLine { line } => {
                write!(f, "Line {line} is not a source,action,target record")
            }
            ParseError::EmptyField { line } => {
                write!(f, "Line {line} has a blank field")
            }
            ParseError::MissingEndMarker => {
                write!(f, "Description ended without the ! end marker")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one process from its textual description. Every line is a transition record of
/// the form `source,action,target`, where `:` is accepted as a separator as well and
/// fields are trimmed; a line starting with `!` ends the description and everything after
/// it is ignored. States and actions are derived from the transitions, so a state that
/// appears on no transition cannot be expressed in this format (use
/// [`LtsBuilder::with_state`] for that).
pub fn parse_lts(text: &str, origin: Origin) -> Result<Lts, ParseError> {
    let mut builder = LtsBuilder::new(origin);
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.starts_with('!') {
            return Ok(builder.build());
        }
        let fields: Vec<&str> = raw.split([',', ':']).collect();
        if fields.len() != 3 {
            return Err(ParseError::MalformedLine { line });
        }
        let (source, action, target) = (fields[0].trim(), fields[1].trim(), fields[2].trim());
        if source.is_empty() || action.is_empty() || target.is_empty() {
            return Err(ParseError::EmptyField { line });
        }
        trace!("parsed transition ({source}, {action}, {target}) for {}", origin.letter());
        builder = builder.with_transitions([(source, action, target)]);
    }
    Err(ParseError::MissingEndMarker)
}

/// Loads a process by repeatedly requesting a textual description from `fetch` until one
/// parses. A description that fails to parse is reported and a fresh one is requested, so
/// an invalid source is recovered from the same way as a missing one. Errors of `fetch`
/// itself (e.g. an exhausted input stream) are passed through and end the retry loop.
pub fn load_lts<F, E>(mut fetch: F, origin: Origin) -> Result<Lts, E>
where
    F: FnMut() -> Result<String, E>,
{
    loop {
        match parse_lts(&fetch()?, origin) {
            Ok(lts) => return Ok(lts),
            Err(err) => warn!("{err}, requesting a new description for {}", origin.letter()),
        }
    }
}
