use std::fmt;

use super::item::ItemId;

/// Target of a redirect: a literal URL or another repository item.
///
/// `Url` may be empty when the authored link field was blank or pointed at
/// an item that no longer exists. The rule is emitted anyway; what an empty
/// target means at request time is the executor's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RedirectTarget {
    Url(String),
    Item { id: ItemId, anchor: Option<String> },
}

impl RedirectTarget {
    /// `true` when neither a URL nor an item reference is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, RedirectTarget::Url(url) if url.is_empty())
    }
}

/// HTTP status a redirect answers with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RedirectStatus {
    Permanent,
    #[default]
    Found,
    SeeOther,
    Temporary,
}

impl RedirectStatus {
    /// Numeric status-code value.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            RedirectStatus::Permanent => 301,
            RedirectStatus::Found => 302,
            RedirectStatus::SeeOther => 303,
            RedirectStatus::Temporary => 307,
        }
    }

    /// The status for a numeric code, if it is one of the supported four.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            301 => Some(RedirectStatus::Permanent),
            302 => Some(RedirectStatus::Found),
            303 => Some(RedirectStatus::SeeOther),
            307 => Some(RedirectStatus::Temporary),
            _ => None,
        }
    }
}

impl fmt::Display for RedirectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Cache-control directive attached to a redirect response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cacheability {
    #[default]
    NoCache,
    Private,
    Server,
    Public,
}

/// Where an outbound rule rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutboundScope {
    ResponseBody,
    ResponseHeader(String),
}

/// Full parameter set of a redirect action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedirectAction {
    pub target: RedirectTarget,
    pub status: RedirectStatus,
    pub append_query_string: bool,
    pub cacheability: Cacheability,
    /// When set, a match suppresses evaluation of the rules after this one.
    pub stop_processing: bool,
}

/// What a matched rule does to the request or response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleAction {
    /// Answer with a redirect to the target.
    Redirect(RedirectAction),
    /// Rewrite the request path in place.
    Rewrite { url: String, stop_processing: bool },
    /// Short-circuit with a fixed status code.
    CustomResponse { status_code: u16, reason: Option<String> },
    /// Drop the connection without a response.
    Abort,
    /// Replace pattern matches in the response body or a named header.
    OutboundRewrite { scope: OutboundScope, value: String },
}
