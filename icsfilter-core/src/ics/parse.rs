//! ICS parsing into a lossless [`CalendarDocument`].

use crate::document::{CalendarDocument, Component, ComponentKind, Parameter, Property};
use crate::error::ParseError;
use icalendar::parser::unfold;

/// Parse ICS content into a [`CalendarDocument`].
///
/// The content must hold exactly one `VCALENDAR` block. Property and block
/// names are upper-cased; values are kept verbatim.
pub fn parse_calendar(content: &str) -> Result<CalendarDocument, ParseError> {
    let unfolded = unfold(content);

    let mut stack: Vec<Component> = Vec::new();
    let mut document: Option<CalendarDocument> = None;
    let mut seen_content = false;

    for (index, raw) in unfolded.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }
        seen_content = true;

        if document.is_some() {
            return Err(ParseError::TrailingContent { line });
        }

        let prop = parse_content_line(raw, line)?;
        match prop.name.as_str() {
            "BEGIN" => {
                let name = block_name(&prop, line)?;
                if stack.is_empty() && name != "VCALENDAR" {
                    return Err(ParseError::MissingCalendar {
                        line,
                        found: format!("BEGIN:{name}"),
                    });
                }
                stack.push(Component::new(ComponentKind::from_name(&name)));
            }
            "END" => {
                let name = block_name(&prop, line)?;
                let Some(open) = stack.pop() else {
                    return Err(ParseError::UnexpectedEnd { line, found: name });
                };
                if open.kind.name() != name {
                    return Err(ParseError::MismatchedEnd {
                        line,
                        expected: open.kind.name().to_string(),
                        found: name,
                    });
                }
                match stack.last_mut() {
                    Some(parent) => parent.components.push(open),
                    None => {
                        document = Some(CalendarDocument {
                            properties: open.properties,
                            components: open.components,
                        })
                    }
                }
            }
            _ => match stack.last_mut() {
                Some(current) => current.properties.push(prop),
                None => {
                    return Err(ParseError::MissingCalendar {
                        line,
                        found: prop.name,
                    });
                }
            },
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::Unclosed(open.kind.name().to_string()));
    }

    match document {
        Some(document) => Ok(document),
        None if seen_content => Err(ParseError::Unclosed("VCALENDAR".to_string())),
        None => Err(ParseError::Empty),
    }
}

/// Upper-cased block name from a BEGIN/END line.
fn block_name(prop: &Property, line: usize) -> Result<String, ParseError> {
    let name = prop.value.trim().to_ascii_uppercase();
    if name.is_empty() {
        return Err(ParseError::InvalidLine {
            line,
            reason: "missing block name",
        });
    }
    Ok(name)
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Parse one unfolded content line: `NAME *(";" PARAM) ":" VALUE`.
///
/// All delimiters are ASCII, so byte offsets are always char boundaries.
fn parse_content_line(raw: &str, line: usize) -> Result<Property, ParseError> {
    let invalid = |reason| ParseError::InvalidLine { line, reason };
    let bytes = raw.as_bytes();

    let name_end = bytes
        .iter()
        .position(|&b| !is_name_char(b))
        .ok_or(invalid("missing ':'"))?;
    if name_end == 0 {
        return Err(invalid("missing property name"));
    }
    let name = raw[..name_end].to_ascii_uppercase();

    let mut pos = name_end;
    let mut params = Vec::new();
    while bytes[pos] == b';' {
        pos += 1;
        let key_len = bytes[pos..]
            .iter()
            .position(|&b| !is_name_char(b))
            .ok_or(invalid("missing ':'"))?;
        if key_len == 0 || bytes[pos + key_len] != b'=' {
            return Err(invalid("malformed parameter"));
        }
        let key = raw[pos..pos + key_len].to_ascii_uppercase();
        pos += key_len + 1;

        let mut values = Vec::new();
        loop {
            if bytes.get(pos) == Some(&b'"') {
                let close = bytes[pos + 1..]
                    .iter()
                    .position(|&b| b == b'"')
                    .ok_or(invalid("unterminated quoted parameter"))?;
                values.push(raw[pos + 1..pos + 1 + close].to_string());
                pos += close + 2;
            } else {
                let len = bytes[pos..]
                    .iter()
                    .position(|&b| matches!(b, b',' | b';' | b':'))
                    .ok_or(invalid("missing ':'"))?;
                values.push(raw[pos..pos + len].to_string());
                pos += len;
            }

            match bytes.get(pos) {
                Some(b',') => pos += 1,
                Some(b';') | Some(b':') => break,
                _ => return Err(invalid("malformed parameter")),
            }
        }
        params.push(Parameter { name: key, values });
    }

    if bytes[pos] != b':' {
        return Err(invalid("missing ':'"));
    }

    Ok(Property {
        name,
        params,
        value: raw[pos + 1..].to_string(),
    })
}
