//! Dropping events by title.

use std::collections::HashSet;

use crate::document::{CalendarDocument, Component, ComponentKind};
use crate::ics::generate_calendar;

/// Lower-cased event titles to drop from a calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    titles: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExclusionSet {
            titles: titles
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive membership test. Whitespace is significant.
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(&title.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExclusionSet::new(iter)
    }
}

/// Whether a top-level component survives filtering.
pub fn should_include(component: &Component, exclusions: &ExclusionSet) -> bool {
    match component.kind {
        ComponentKind::Event => match component.summary() {
            Some(title) if !title.is_empty() => !exclusions.contains(&title),
            _ => true,
        },
        ComponentKind::Todo | ComponentKind::Other(_) => true,
    }
}

/// Remove excluded events from the document's top-level components, keeping
/// everything else in order.
pub fn filter_calendar(mut document: CalendarDocument, exclusions: &ExclusionSet) -> CalendarDocument {
    document
        .components
        .retain(|component| should_include(component, exclusions));
    document
}

/// Filter the document and generate its .ics text.
pub fn filter_and_serialize(document: CalendarDocument, exclusions: &ExclusionSet) -> String {
    generate_calendar(&filter_calendar(document, exclusions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::parse_calendar;

    const CALENDAR: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Amsterdam\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:1\r\n\
SUMMARY:Standup\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:2\r\n\
SUMMARY:Lunch\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
UID:3\r\n\
SUMMARY:Standup\r\n\
END:VTODO\r\n\
BEGIN:VEVENT\r\n\
UID:4\r\n\
SUMMARY:STANDUP\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:5\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:6\r\n\
SUMMARY:\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:7\r\n\
SUMMARY: Standup \r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    fn uids(doc: &CalendarDocument) -> Vec<String> {
        doc.components
            .iter()
            .filter_map(|c| c.find_prop("UID").map(|p| p.value.clone()))
            .collect()
    }

    #[test]
    fn test_exclusion_set_is_case_insensitive() {
        let set = ExclusionSet::new(["StandUp", "standup", "LUNCH"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("Standup"));
        assert!(set.contains("lunch"));
        assert!(!set.contains(" standup"));
    }

    #[test]
    fn test_filter_drops_matching_events_only() {
        let doc = parse_calendar(CALENDAR).expect("Should parse");
        let filtered = filter_calendar(doc, &ExclusionSet::new(["standup"]));

        // The VTODO with the same title, untitled events and the padded title stay.
        assert_eq!(uids(&filtered), vec!["2", "3", "5", "6", "7"]);
        assert_eq!(filtered.components.len(), 6);
        assert_eq!(filtered.components[0].kind.name(), "VTIMEZONE");
    }

    #[test]
    fn test_filter_keeps_document_properties() {
        let doc = parse_calendar(CALENDAR).expect("Should parse");
        let properties = doc.properties.clone();
        let filtered = filter_calendar(doc, &ExclusionSet::new(["lunch"]));
        assert_eq!(filtered.properties, properties);
    }

    #[test]
    fn test_filter_matches_escaped_titles() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Lunch\\, team\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let doc = parse_calendar(ics).expect("Should parse");
        let filtered = filter_calendar(doc, &ExclusionSet::new(["lunch, team"]));
        assert!(filtered.components.is_empty());
    }

    #[test]
    fn test_empty_exclusions_keep_everything() {
        let doc = parse_calendar(CALENDAR).expect("Should parse");
        let filtered = filter_calendar(doc.clone(), &ExclusionSet::default());
        assert_eq!(filtered, doc);
    }

    #[test]
    fn test_document_without_events_is_unchanged() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VTODO\r\n\
SUMMARY:Standup\r\n\
END:VTODO\r\n\
BEGIN:VJOURNAL\r\n\
SUMMARY:Lunch\r\n\
END:VJOURNAL\r\n\
END:VCALENDAR\r\n";
        let doc = parse_calendar(ics).expect("Should parse");
        let output = filter_and_serialize(doc, &ExclusionSet::new(["standup", "lunch"]));
        assert_eq!(output, ics);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let exclusions = ExclusionSet::new(["standup", "lunch"]);
        let doc = parse_calendar(CALENDAR).expect("Should parse");
        let once = filter_calendar(doc, &exclusions);
        let twice = filter_calendar(once.clone(), &exclusions);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_roundtrip_after_filter() {
        let doc = parse_calendar(CALENDAR).expect("Should parse");
        let output = filter_and_serialize(doc.clone(), &ExclusionSet::default());
        let reparsed = parse_calendar(&output).expect("Should reparse");
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_standup_and_lunch_scenario() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Standup\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Lunch\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let doc = parse_calendar(ics).expect("Should parse");
        let output = filter_and_serialize(doc, &ExclusionSet::new(["standup"]));
        assert_eq!(
            output,
            "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Lunch\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
        );
    }
}
