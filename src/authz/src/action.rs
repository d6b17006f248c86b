//! Dotted action paths
//!
//! An action such as `event.participant.signin` names a top-level resource,
//! zero or more sub-resources and a terminal verb. Parsing happens once, up
//! front, so tree traversal only ever sees validated segments.

use std::fmt;
use std::str::FromStr;

/// Separator between action segments
pub const SEPARATOR: char = '.';

/// Errors that can occur while parsing an action path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPathError {
    /// Empty action string provided
    Empty,
    /// Leading, trailing or doubled separator
    EmptySegment,
}

impl fmt::Display for ActionPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Action cannot be empty"),
            Self::EmptySegment => write!(f, "Action segment cannot be empty"),
        }
    }
}

impl std::error::Error for ActionPathError {}

/// A parsed, non-empty sequence of non-empty action segments
///
/// # Examples
///
/// ```
/// use clubhouse_authz::ActionPath;
///
/// let path = ActionPath::parse("event.participant.signin").unwrap();
/// assert_eq!(path.segments(), ["event", "participant", "signin"]);
/// assert_eq!(path.verb(), "signin");
///
/// assert!(ActionPath::parse("event..signin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionPath {
    /// Parsed segments, never empty
    segments: Vec<String>,
}

impl ActionPath {
    /// Parses a dotted action string
    ///
    /// Order is preserved. No tree lookups are performed.
    pub fn parse(raw: &str) -> Result<Self, ActionPathError> {
        if raw.is_empty() {
            return Err(ActionPathError::Empty);
        }

        let segments: Vec<String> = raw.split(SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ActionPathError::EmptySegment);
        }

        Ok(Self { segments })
    }

    /// Returns the segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (always at least one)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a parsed path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The first segment, naming the top-level resource
    pub fn resource(&self) -> &str {
        &self.segments[0]
    }

    /// The last segment, naming the verb
    pub fn verb(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Splits off the top-level resource from the remaining suffix
    pub fn split_first(&self) -> (&str, &[String]) {
        (&self.segments[0], &self.segments[1..])
    }
}

impl FromStr for ActionPath {
    type Err = ActionPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
