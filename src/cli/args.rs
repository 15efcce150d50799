#![forbid(unsafe_code)]

//! Raw command line tokenization
//!
//! Converts the flat list of process arguments into [`ArgumentRecord`]s. A
//! token starting with the marker character opens an option record; the next
//! non-option token, if any, becomes that option's value. Every other token is
//! a bare positional value.

use tracing::trace;

/// Character that marks a token as an option rather than a value
pub const OPTION_MARKER: char = '-';

/// One logical unit of the command line
///
/// At least one of the two fields is always set. A bare token produces a
/// record with only `value`; an option token produces a record with
/// `option_name`, and `value` only if a non-option token directly followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentRecord {
    /// Option name with exactly one leading marker removed (`--help` is `-help`)
    pub option_name: Option<String>,
    /// Value attached to the option, or the bare token itself
    pub value: Option<String>,
}

impl ArgumentRecord {
    /// Creates a record for an option token, without a value yet
    pub fn option(name: impl Into<String>) -> Self {
        ArgumentRecord {
            option_name: Some(name.into()),
            value: None,
        }
    }

    /// Creates a record for a bare positional token
    pub fn bare(value: impl Into<String>) -> Self {
        ArgumentRecord {
            option_name: None,
            value: Some(value.into()),
        }
    }

    /// Creates an option record that already carries its value
    #[cfg(test)]
    pub fn option_with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        ArgumentRecord {
            option_name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// Returns true if this record came from a bare token
    #[cfg(test)]
    pub fn is_positional(&self) -> bool {
        self.option_name.is_none()
    }
}

/// Parse raw tokens (program name excluded) into argument records
///
/// Scans left to right, keeping a single flag that says whether the most
/// recently opened option is still waiting for its value. The scan never
/// fails: a value with no open option simply becomes a positional record.
pub fn parse_arguments<I, S>(tokens: I) -> Vec<ArgumentRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records: Vec<ArgumentRecord> = Vec::new();
    let mut expecting_value = false;

    for token in tokens {
        let token = token.as_ref();

        if let Some(name) = token.strip_prefix(OPTION_MARKER) {
            records.push(ArgumentRecord::option(name));
            expecting_value = true;
            continue;
        }

        match records.last_mut() {
            Some(open) if expecting_value => open.value = Some(token.to_string()),
            _ => records.push(ArgumentRecord::bare(token)),
        }
        expecting_value = false;
    }

    trace!(count = records.len(), "parsed argument records");
    records
}
