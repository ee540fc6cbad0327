use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

/// Stable identity of a repository item.
///
/// A converted [`Rule`](super::Rule) keeps the identity of its backing
/// definition; it is the key the cache uses when replacing or removing a
/// single entry during incremental updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(Uuid);

impl ItemId {
    /// A fresh random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identity from a raw 128-bit value. Mostly useful in fixtures.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a braced or plain UUID string, as stored in link fields.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim().trim_start_matches('{').trim_end_matches('}');
        Uuid::parse_str(trimmed).ok().map(Self)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

/// Template marker of a repository item.
///
/// The scanner only ever dispatches on this closed set; anything the
/// repository stores beyond it is [`Content`](ItemKind::Content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Grouping folder carrying a shared site-name restriction.
    RedirectFolder,
    /// Minimal path-plus-target redirect definition.
    SimpleRedirect,
    /// Fully specified inbound rule definition.
    InboundRule,
    /// Fully specified outbound rule definition.
    OutboundRule,
    /// Any other node in the hierarchy.
    Content,
}

/// Well-known field names read off repository items.
pub mod fields {
    /// Request path of a simple redirect.
    pub const PATH: &str = "path";
    /// Link-field raw value naming a redirect target.
    pub const TARGET: &str = "target";
    /// Site-name restriction on a rule folder.
    pub const SITE: &str = "site";
    pub const ENABLED: &str = "enabled";
    pub const IGNORE_CASE: &str = "ignorecase";
    pub const PATTERN: &str = "pattern";
    pub const MATCH_TYPE: &str = "matchtype";
    pub const USING: &str = "using";
    pub const GROUPING: &str = "grouping";
    pub const CONDITIONS: &str = "conditions";
    pub const ACTION: &str = "action";
    pub const STATUS_CODE: &str = "statuscode";
    pub const APPEND_QUERY_STRING: &str = "appendquerystring";
    pub const CACHEABILITY: &str = "cacheability";
    pub const STOP_PROCESSING: &str = "stopprocessing";
    pub const REWRITE_URL: &str = "rewriteurl";
    pub const REASON: &str = "reason";
    pub const SCOPE: &str = "scope";
    pub const VALUE: &str = "value";
}

/// Read-only projection of one repository node: identity, name, template
/// marker, and the raw field values the converters read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    fields: HashMap<String, String>,
}

impl Item {
    #[must_use]
    pub fn new(id: ItemId, kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            fields: HashMap::new(),
        }
    }

    /// Attach a raw field value.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_owned(), value.into());
        self
    }

    /// Raw value of a field; `None` when the field was never set.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Checkbox-style field: `"1"` and `"true"` are set, anything else
    /// (including an absent field) is not.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.field(name), Some("1" | "true"))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.id)
    }
}
