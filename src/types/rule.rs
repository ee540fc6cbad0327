use std::fmt;

use super::action::RuleAction;
use super::item::ItemId;

/// How the extra conditions of a rule combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalGrouping {
    /// Every condition must hold.
    #[default]
    MatchAll,
    /// At least one condition must hold.
    MatchAny,
}

/// Whether the pattern must match or must fail to match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchType {
    #[default]
    Matches,
    NoMatch,
}

/// Pattern dialect a rule is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEngine {
    #[default]
    Regex,
    Wildcard,
    Exact,
}

/// Where a condition reads its input from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionInput {
    ServerVariable(String),
    RequestHeader(String),
    ResponseHeader(String),
}

/// One extra condition evaluated alongside the main pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub input: ConditionInput,
    pub match_type: MatchType,
    pub pattern: String,
}

/// Unified, execution-ready representation of one rewrite/redirect
/// directive.
///
/// Both source shapes collapse into this; the request-matching executor
/// only ever sees `Rule`, never the definitions they came from. Pure data,
/// no matching logic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// Identity of the backing definition. Unique within the list the rule
    /// belongs to, and the key for incremental cache updates.
    pub id: ItemId,
    pub name: String,
    pub enabled: bool,
    pub ignore_case: bool,
    /// Site-name restriction inherited from the enclosing folder.
    pub site: Option<String>,
    pub grouping: LogicalGrouping,
    pub pattern: String,
    pub match_type: MatchType,
    pub engine: MatchEngine,
    pub conditions: Vec<Condition>,
    pub action: RuleAction,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.pattern)
    }
}
