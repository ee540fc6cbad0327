use crate::types::ItemId;

/// Decoded link-field raw value.
///
/// A link field names a redirect target either as a literal `url` or as the
/// `id` of another repository item (with an optional in-page `anchor`). A
/// blank field decodes to the empty value; which part wins when both are
/// present is the converter's call, not the parser's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkValue {
    pub id: Option<ItemId>,
    pub url: Option<String>,
    pub anchor: Option<String>,
}
