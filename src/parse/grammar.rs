use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use crate::types::{Condition, ConditionInput, ItemId, MatchType};

use super::link::LinkValue;

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

fn hspace(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

// -- Link-field raw values --------------------------------------------------
//
// `<link linktype="external" url="https://example.com/new" anchor="faq" />`
// Attribute order is free; unknown attributes are carried past.

fn attr_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    })
    .parse_next(input)
}

fn attr_value(input: &mut &str) -> ModalResult<String> {
    delimited('"', take_till(0.., '"'), '"')
        .map(str::to_owned)
        .parse_next(input)
}

fn attribute(input: &mut &str) -> ModalResult<(String, String)> {
    ws.parse_next(input)?;
    let name = attr_name.parse_next(input)?;
    cut_err('=').parse_next(input)?;
    let value = cut_err(attr_value)
        .context(StrContext::Expected(StrContextValue::Description(
            "quoted attribute value",
        )))
        .parse_next(input)?;
    Ok((name.to_ascii_lowercase(), value))
}

pub(super) fn link(input: &mut &str) -> ModalResult<LinkValue> {
    ws.parse_next(input)?;
    "<link".parse_next(input)?;
    let attrs: Vec<(String, String)> = repeat(0.., attribute).parse_next(input)?;
    ws.parse_next(input)?;
    opt('/').parse_next(input)?;
    cut_err('>').parse_next(input)?;
    ws.parse_next(input)?;

    let mut value = LinkValue::default();
    for (name, text) in attrs {
        match name.as_str() {
            // A malformed id is tolerated: the target then simply fails to
            // resolve and the converter falls back to the literal URL.
            "id" => value.id = ItemId::parse(&text),
            "url" if !text.is_empty() => value.url = Some(text),
            "anchor" if !text.is_empty() => value.anchor = Some(text),
            _ => {}
        }
    }
    Ok(value)
}

// -- Condition lists --------------------------------------------------------
//
// One condition per line: an input source, a match keyword, and the pattern
// running to the end of the line. Blank lines and `#` comments are skipped.
//
//     {HTTP_HOST} matches ^www\.
//     req:User-Agent nomatch bot
//     res:Content-Type matches text/html

fn cond_ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

fn header_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-').parse_next(input)
}

fn condition_input(input: &mut &str) -> ModalResult<ConditionInput> {
    alt((
        delimited(
            '{',
            take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
            '}',
        )
        .map(|name: &str| ConditionInput::ServerVariable(name.to_owned())),
        preceded("req:", cut_err(header_name))
            .map(|name: &str| ConditionInput::RequestHeader(name.to_owned())),
        preceded("res:", cut_err(header_name))
            .map(|name: &str| ConditionInput::ResponseHeader(name.to_owned())),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "condition input",
    )))
    .parse_next(input)
}

fn match_keyword(input: &mut &str) -> ModalResult<MatchType> {
    alt((
        "matches".value(MatchType::Matches),
        "nomatch".value(MatchType::NoMatch),
    ))
    .parse_next(input)
}

fn condition_line(input: &mut &str) -> ModalResult<Condition> {
    cond_ws.parse_next(input)?;
    let source = condition_input.parse_next(input)?;
    cut_err(hspace).parse_next(input)?;
    let match_type = cut_err(match_keyword)
        .context(StrContext::Expected(StrContextValue::Description(
            "'matches' or 'nomatch'",
        )))
        .parse_next(input)?;
    cut_err(hspace).parse_next(input)?;
    let pattern = cut_err(till_line_ending).parse_next(input)?.trim();
    if pattern.is_empty() {
        return Err(ErrMode::from_input(input).cut());
    }
    Ok(Condition {
        input: source,
        match_type,
        pattern: pattern.to_owned(),
    })
}

pub(super) fn condition_list(input: &mut &str) -> ModalResult<Vec<Condition>> {
    let conditions: Vec<Condition> = repeat(0.., condition_line).parse_next(input)?;
    cond_ws.parse_next(input)?;
    Ok(conditions)
}
