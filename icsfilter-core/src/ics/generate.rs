//! ICS generation from a [`CalendarDocument`].

use crate::document::{CalendarDocument, Component, Property};

/// Maximum octets per physical line, excluding the CRLF.
const FOLD_WIDTH: usize = 75;

/// Generate .ics content for a whole document.
pub fn generate_calendar(document: &CalendarDocument) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    for prop in &document.properties {
        push_line(&mut out, &content_line(prop));
    }
    for component in &document.components {
        write_component(&mut out, component);
    }
    push_line(&mut out, "END:VCALENDAR");
    out
}

fn write_component(out: &mut String, component: &Component) {
    let name = component.kind.name();
    push_line(out, &format!("BEGIN:{name}"));
    for prop in &component.properties {
        push_line(out, &content_line(prop));
    }
    for child in &component.components {
        write_component(out, child);
    }
    push_line(out, &format!("END:{name}"));
}

fn content_line(prop: &Property) -> String {
    let mut line = prop.name.clone();
    for param in &prop.params {
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        for (i, value) in param.values.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            if value.contains([':', ';', ',']) {
                line.push('"');
                line.push_str(value);
                line.push('"');
            } else {
                line.push_str(value);
            }
        }
    }
    line.push(':');
    line.push_str(&prop.value);
    line
}

/// Append a content line, folded to [`FOLD_WIDTH`] octets without splitting
/// a UTF-8 sequence. Continuation lines start with a single space.
fn push_line(out: &mut String, line: &str) {
    let mut width = FOLD_WIDTH;
    let mut start = 0;
    let mut used = 0;

    for (idx, ch) in line.char_indices() {
        if used + ch.len_utf8() > width {
            out.push_str(&line[start..idx]);
            out.push_str("\r\n ");
            start = idx;
            used = 0;
            width = FOLD_WIDTH - 1;
        }
        used += ch.len_utf8();
    }

    out.push_str(&line[start..]);
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ComponentKind, Parameter};
    use crate::ics::parse_calendar;

    fn event(summary: &str) -> Component {
        let mut event = Component::new(ComponentKind::Event);
        event.properties.push(Property::new("UID", format!("{summary}@test")));
        event.properties.push(Property::new("SUMMARY", summary));
        event
    }

    #[test]
    fn test_generate_minimal_document() {
        let doc = CalendarDocument {
            properties: vec![Property::new("VERSION", "2.0")],
            components: vec![event("Lunch")],
        };

        assert_eq!(
            generate_calendar(&doc),
            "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:Lunch@test\r\n\
SUMMARY:Lunch\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_generate_quotes_parameter_values_when_needed() {
        let mut prop = Property::new("ATTENDEE", "mailto:jane@example.com");
        prop.params.push(Parameter {
            name: "CN".to_string(),
            values: vec!["Doe, Jane".to_string()],
        });
        prop.params.push(Parameter {
            name: "MEMBER".to_string(),
            values: vec![
                "mailto:team@example.com".to_string(),
                "plain".to_string(),
            ],
        });

        assert_eq!(
            content_line(&prop),
            "ATTENDEE;CN=\"Doe, Jane\";MEMBER=\"mailto:team@example.com\",plain:mailto:jane@example.com"
        );
    }

    #[test]
    fn test_generate_folds_long_lines() {
        let summary = "a".repeat(200);
        let mut out = String::new();
        push_line(&mut out, &format!("SUMMARY:{summary}"));

        let physical: Vec<&str> = out.trim_end_matches("\r\n").split("\r\n").collect();
        assert_eq!(physical.len(), 3);
        assert_eq!(physical[0].len(), 75);
        assert!(physical[1].starts_with(' '));
        assert!(physical.iter().all(|l| l.len() <= 75));

        let unfolded: String = physical
            .iter()
            .enumerate()
            .map(|(i, l)| if i == 0 { *l } else { &l[1..] })
            .collect();
        assert_eq!(unfolded, format!("SUMMARY:{summary}"));
    }

    #[test]
    fn test_generate_folds_on_char_boundaries() {
        let summary = "日本語のタイトル".repeat(10);
        let mut out = String::new();
        push_line(&mut out, &format!("SUMMARY:{summary}"));

        for physical in out.split("\r\n") {
            assert!(physical.len() <= 75);
        }
        let doc_text = format!("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\n{out}END:VEVENT\r\nEND:VCALENDAR\r\n");
        let doc = parse_calendar(&doc_text).expect("Should parse folded output");
        assert_eq!(doc.components[0].summary(), Some(summary));
    }

    #[test]
    fn test_generated_output_reads_with_icalendar() {
        use icalendar::parser::{read_calendar, unfold};

        let mut alarm = Component::new(ComponentKind::Other("VALARM".to_string()));
        alarm.properties.push(Property::new("ACTION", "DISPLAY"));
        alarm.properties.push(Property::new("TRIGGER", "-PT10M"));
        let mut lunch = event("Lunch");
        lunch.components.push(alarm);

        let doc = CalendarDocument {
            properties: vec![
                Property::new("VERSION", "2.0"),
                Property::new("PRODID", "-//icsfilter//EN"),
            ],
            components: vec![event("Standup"), lunch],
        };

        let ics = generate_calendar(&doc);
        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).expect("icalendar should read output");
        let summaries: Vec<String> = calendar
            .components
            .iter()
            .flat_map(|c| std::iter::once(c).chain(c.components.iter()))
            .filter(|c| c.name == "VEVENT")
            .filter_map(|c| c.find_prop("SUMMARY").map(|p| p.val.to_string()))
            .collect();
        assert_eq!(summaries, vec!["Standup", "Lunch"]);
    }
}
