mod action;
mod error;
mod item;
mod rule;

pub use action::{
    Cacheability, OutboundScope, RedirectAction, RedirectStatus, RedirectTarget, RuleAction,
};
pub use error::ConvertError;
pub use item::{fields, Item, ItemId, ItemKind};
pub use rule::{Condition, ConditionInput, LogicalGrouping, MatchEngine, MatchType, Rule};
