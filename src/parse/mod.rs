mod error;
mod grammar;
mod link;

pub use error::ParseError;
pub use link::LinkValue;

use crate::types::Condition;

/// Parse a link-field raw value (`<link ... />`).
///
/// An empty or all-whitespace value decodes to the empty [`LinkValue`]; a
/// blank link field is authored data, not an error.
///
/// # Errors
///
/// Returns [`ParseError`] if the value is present but not valid link markup.
pub fn parse_link(input: &str) -> Result<LinkValue, ParseError> {
    if input.trim().is_empty() {
        return Ok(LinkValue::default());
    }
    use winnow::Parser;
    grammar::link
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

/// Parse a conditions field: one condition per line, blank lines and `#`
/// comments skipped.
///
/// # Errors
///
/// Returns [`ParseError`] if any line is not a well-formed condition.
pub fn parse_conditions(input: &str) -> Result<Vec<Condition>, ParseError> {
    use winnow::Parser;
    grammar::condition_list
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
