//! In-memory model of an iCalendar document.
//!
//! The model keeps every property of every block in its original order, with
//! values still escaped exactly as they were read. Nothing is interpreted
//! beyond what filtering needs, so generating the document again reproduces
//! it without loss.

/// The `VCALENDAR` block: document-level properties plus its subcomponents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarDocument {
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl CalendarDocument {
    /// Top-level events, in document order.
    pub fn events(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Event)
    }
}

/// Block kind of a [`Component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    Event,
    Todo,
    /// Any other block (`VTIMEZONE`, `VALARM`, `VJOURNAL`, `X-...`), keeping its name.
    Other(String),
}

impl ComponentKind {
    /// Kind for a block name. The name is expected upper-cased.
    pub fn from_name(name: &str) -> Self {
        match name {
            "VEVENT" => ComponentKind::Event,
            "VTODO" => ComponentKind::Todo,
            other => ComponentKind::Other(other.to_string()),
        }
    }

    /// Block name as written after `BEGIN:` / `END:`.
    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Event => "VEVENT",
            ComponentKind::Todo => "VTODO",
            ComponentKind::Other(name) => name,
        }
    }
}

/// A `BEGIN:<name>` ... `END:<name>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Component {
            kind,
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// First property with the given (upper-case) name.
    pub fn find_prop(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Decoded `SUMMARY` text, if the block has one.
    pub fn summary(&self) -> Option<String> {
        self.find_prop("SUMMARY").map(Property::text)
    }
}

/// A single content line: `NAME;PARAM=VALUE:value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub params: Vec<Parameter>,
    /// Raw value, still escaped.
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// The value with RFC 5545 TEXT escapes (`\\`, `\;`, `\,`, `\n`) decoded.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.value.len());
        let mut chars = self.value.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') | Some('N') => out.push('\n'),
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        }
        out
    }
}

/// A property parameter. Values are stored without surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub values: Vec<String>,
}
