use tracing::{debug, warn};

use crate::parse::{self, LinkValue};
use crate::repo::Repository;
use crate::types::{
    fields, Cacheability, Condition, ConvertError, Item, ItemKind, LogicalGrouping, MatchEngine,
    MatchType, RedirectAction, RedirectStatus, RedirectTarget, Rule, RuleAction,
};

/// Site-name restriction configured on a rule folder, if any.
///
/// Every rule defined beneath the folder inherits this; the definitions
/// themselves never carry a site name.
#[must_use]
pub fn site_restriction(folder: &Item) -> Option<String> {
    folder
        .field(fields::SITE)
        .filter(|site| !site.is_empty())
        .map(str::to_owned)
}

/// Convert a simple redirect definition into a [`Rule`].
///
/// Simple redirects have no enabled flag and no failure mode: the path is
/// anchored into a whole-path regex, the target link splits into either an
/// item reference or a literal URL (possibly empty), and every remaining
/// knob takes the fixed permanent-redirect defaults.
#[must_use]
pub fn convert_simple_redirect<R: Repository + ?Sized>(
    repo: &R,
    item: &Item,
    folder: &Item,
) -> Rule {
    let path = item.field(fields::PATH).unwrap_or_default();
    let link = match parse::parse_link(item.field(fields::TARGET).unwrap_or_default()) {
        Ok(link) => link,
        Err(err) => {
            warn!(item = %item.name, %err, "unreadable redirect target, emitting empty");
            LinkValue::default()
        }
    };
    let target = redirect_target(repo, &link);

    debug!(item = %item.name, id = %item.id, "converted simple redirect");

    Rule {
        id: item.id,
        name: item.name.clone(),
        enabled: true,
        ignore_case: true,
        site: site_restriction(folder),
        grouping: LogicalGrouping::MatchAll,
        pattern: format!("^{path}/?$"),
        match_type: MatchType::Matches,
        engine: MatchEngine::Regex,
        conditions: Vec::new(),
        action: RuleAction::Redirect(RedirectAction {
            target,
            status: RedirectStatus::Permanent,
            append_query_string: true,
            cacheability: Cacheability::NoCache,
            stop_processing: false,
        }),
    }
}

/// Convert a full inbound-rule definition into a [`Rule`].
///
/// A disabled definition still converts (with `enabled = false`) so the
/// synchronizer can tell "disabled" from "malformed".
///
/// # Errors
///
/// Returns [`ConvertError`] when the pattern is missing, an enum-valued
/// field holds unsupported text, or the target link or condition list does
/// not parse. Callers treat an error as "no rule contributed".
pub fn convert_inbound_rule<R: Repository + ?Sized>(
    repo: &R,
    item: &Item,
    folder: &Item,
) -> Result<Rule, ConvertError> {
    if item.kind != ItemKind::InboundRule {
        return Err(ConvertError::NotARule {
            name: item.name.clone(),
        });
    }

    Ok(Rule {
        id: item.id,
        name: item.name.clone(),
        enabled: item.flag(fields::ENABLED),
        ignore_case: item.flag(fields::IGNORE_CASE),
        site: site_restriction(folder),
        grouping: grouping_of(item)?,
        pattern: pattern_of(item)?,
        match_type: match_type_of(item)?,
        engine: engine_of(item)?,
        conditions: conditions_of(item)?,
        action: inbound_action(repo, item)?,
    })
}

/// Convert a full outbound-rule definition into a [`Rule`].
///
/// Structurally the inbound conversion with the action fixed to a
/// response rewrite over the configured scope.
///
/// # Errors
///
/// Same failure modes as [`convert_inbound_rule`].
pub fn convert_outbound_rule(item: &Item, folder: &Item) -> Result<Rule, ConvertError> {
    if item.kind != ItemKind::OutboundRule {
        return Err(ConvertError::NotARule {
            name: item.name.clone(),
        });
    }

    Ok(Rule {
        id: item.id,
        name: item.name.clone(),
        enabled: item.flag(fields::ENABLED),
        ignore_case: item.flag(fields::IGNORE_CASE),
        site: site_restriction(folder),
        grouping: grouping_of(item)?,
        pattern: pattern_of(item)?,
        match_type: match_type_of(item)?,
        engine: engine_of(item)?,
        conditions: conditions_of(item)?,
        action: RuleAction::OutboundRewrite {
            scope: scope_of(item)?,
            value: item.field(fields::VALUE).unwrap_or_default().to_owned(),
        },
    })
}

/// Split a decoded link into the redirect target: an item reference when the
/// target item still exists, the literal URL otherwise. The URL may be
/// empty; an unresolvable target is accepted, not an error.
fn redirect_target<R: Repository + ?Sized>(repo: &R, link: &LinkValue) -> RedirectTarget {
    match link.id {
        Some(id) if repo.exists(id) => RedirectTarget::Item {
            id,
            anchor: link.anchor.clone(),
        },
        _ => RedirectTarget::Url(link.url.clone().unwrap_or_default()),
    }
}

fn unsupported(item: &Item, field: &str, value: &str) -> ConvertError {
    ConvertError::UnsupportedValue {
        name: item.name.clone(),
        field: field.to_owned(),
        value: value.to_owned(),
    }
}

fn pattern_of(item: &Item) -> Result<String, ConvertError> {
    match item.field(fields::PATTERN) {
        Some(pattern) if !pattern.trim().is_empty() => Ok(pattern.to_owned()),
        _ => Err(ConvertError::MissingPattern {
            name: item.name.clone(),
        }),
    }
}

fn conditions_of(item: &Item) -> Result<Vec<Condition>, ConvertError> {
    parse::parse_conditions(item.field(fields::CONDITIONS).unwrap_or_default()).map_err(|source| {
        ConvertError::MalformedConditions {
            name: item.name.clone(),
            source,
        }
    })
}

fn match_type_of(item: &Item) -> Result<MatchType, ConvertError> {
    match item.field(fields::MATCH_TYPE) {
        None => Ok(MatchType::Matches),
        Some("matches") => Ok(MatchType::Matches),
        Some("nomatch") => Ok(MatchType::NoMatch),
        Some(other) => Err(unsupported(item, fields::MATCH_TYPE, other)),
    }
}

fn engine_of(item: &Item) -> Result<MatchEngine, ConvertError> {
    match item.field(fields::USING) {
        None => Ok(MatchEngine::Regex),
        Some("regex") => Ok(MatchEngine::Regex),
        Some("wildcard") => Ok(MatchEngine::Wildcard),
        Some("exact") => Ok(MatchEngine::Exact),
        Some(other) => Err(unsupported(item, fields::USING, other)),
    }
}

fn grouping_of(item: &Item) -> Result<LogicalGrouping, ConvertError> {
    match item.field(fields::GROUPING) {
        None => Ok(LogicalGrouping::MatchAll),
        Some("all") => Ok(LogicalGrouping::MatchAll),
        Some("any") => Ok(LogicalGrouping::MatchAny),
        Some(other) => Err(unsupported(item, fields::GROUPING, other)),
    }
}

fn status_of(item: &Item) -> Result<RedirectStatus, ConvertError> {
    match item.field(fields::STATUS_CODE) {
        None => Ok(RedirectStatus::Found),
        Some(raw) => raw
            .parse::<u16>()
            .ok()
            .and_then(RedirectStatus::from_code)
            .ok_or_else(|| unsupported(item, fields::STATUS_CODE, raw)),
    }
}

fn cacheability_of(item: &Item) -> Result<Cacheability, ConvertError> {
    match item.field(fields::CACHEABILITY) {
        None => Ok(Cacheability::NoCache),
        Some("nocache") => Ok(Cacheability::NoCache),
        Some("private") => Ok(Cacheability::Private),
        Some("server") => Ok(Cacheability::Server),
        Some("public") => Ok(Cacheability::Public),
        Some(other) => Err(unsupported(item, fields::CACHEABILITY, other)),
    }
}

fn scope_of(item: &Item) -> Result<crate::types::OutboundScope, ConvertError> {
    use crate::types::OutboundScope;
    match item.field(fields::SCOPE) {
        None | Some("response") => Ok(OutboundScope::ResponseBody),
        Some(scope) => match scope.strip_prefix("header:") {
            Some(header) if !header.is_empty() => {
                Ok(OutboundScope::ResponseHeader(header.to_owned()))
            }
            _ => Err(unsupported(item, fields::SCOPE, scope)),
        },
    }
}

/// Checkbox field with a non-false default.
fn flag_or(item: &Item, field: &str, default: bool) -> bool {
    item.field(field)
        .map_or(default, |value| value == "1" || value == "true")
}

fn inbound_action<R: Repository + ?Sized>(
    repo: &R,
    item: &Item,
) -> Result<RuleAction, ConvertError> {
    match item.field(fields::ACTION).unwrap_or("redirect") {
        "redirect" => {
            let link = parse::parse_link(item.field(fields::TARGET).unwrap_or_default()).map_err(
                |source| ConvertError::MalformedLink {
                    name: item.name.clone(),
                    source,
                },
            )?;
            Ok(RuleAction::Redirect(RedirectAction {
                target: redirect_target(repo, &link),
                status: status_of(item)?,
                append_query_string: flag_or(item, fields::APPEND_QUERY_STRING, true),
                cacheability: cacheability_of(item)?,
                stop_processing: item.flag(fields::STOP_PROCESSING),
            }))
        }
        "rewrite" => Ok(RuleAction::Rewrite {
            url: item.field(fields::REWRITE_URL).unwrap_or_default().to_owned(),
            stop_processing: item.flag(fields::STOP_PROCESSING),
        }),
        "customresponse" => {
            let raw = item.field(fields::STATUS_CODE).unwrap_or_default();
            let status_code = raw
                .parse::<u16>()
                .map_err(|_| unsupported(item, fields::STATUS_CODE, raw))?;
            Ok(RuleAction::CustomResponse {
                status_code,
                reason: item.field(fields::REASON).map(str::to_owned),
            })
        }
        "abort" => Ok(RuleAction::Abort),
        other => Err(unsupported(item, fields::ACTION, other)),
    }
}
