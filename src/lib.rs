mod cache;
mod convert;
mod engine;
mod parse;
mod repo;
mod resolve;
mod sync;
mod types;

pub use cache::{CacheRegistry, RulesCache};
pub use convert::{
    convert_inbound_rule, convert_outbound_rule, convert_simple_redirect, site_restriction,
};
pub use engine::{EngineConfig, RewriteEngine};
pub use parse::{parse_conditions, parse_link, LinkValue, ParseError};
pub use repo::{MemoryRepository, Repository};
pub use resolve::{resolve_inbound, resolve_outbound};
pub use sync::{ChangeEvent, ChangeKind};
pub use types::{
    fields, Cacheability, Condition, ConditionInput, ConvertError, Item, ItemId, ItemKind,
    LogicalGrouping, MatchEngine, MatchType, OutboundScope, RedirectAction, RedirectStatus,
    RedirectTarget, Rule, RuleAction,
};
