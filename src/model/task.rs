use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Title given to tasks whose title is blank after import or edit
pub const UNTITLED: &str = "Untitled task";

/// Project bucket for tasks that don't name one
pub const DEFAULT_PROJECT: &str = "General";

/// Urgency label on a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Urgent,
    #[default]
    Planned,
    Optional,
    Focus,
}

impl Importance {
    pub const ALL: [Importance; 4] = [
        Importance::Urgent,
        Importance::Planned,
        Importance::Optional,
        Importance::Focus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Importance::Urgent => "urgent",
            Importance::Planned => "planned",
            Importance::Optional => "optional",
            Importance::Focus => "focus",
        }
    }

    /// Parse a stored or typed value, ignoring case and surrounding space
    pub fn parse(s: &str) -> Option<Importance> {
        let s = s.trim();
        Importance::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s))
    }

    /// Next value in display order, wrapping around
    pub fn next(self) -> Importance {
        let idx = Importance::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Importance::ALL[(idx + 1) % Importance::ALL.len()]
    }

    /// Previous value in display order, wrapping around
    pub fn prev(self) -> Importance {
        let idx = Importance::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Importance::ALL[(idx + Importance::ALL.len() - 1) % Importance::ALL.len()]
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Importance::parse(s).ok_or_else(|| {
            format!("unknown importance '{s}' (expected urgent, planned, optional, or focus)")
        })
    }
}

/// Descriptive repeat schedule. Nothing is scheduled from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Custom,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Recurrence> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Recurrence::None),
            "daily" => Some(Recurrence::Daily),
            "weekly" => Some(Recurrence::Weekly),
            "custom" => Some(Recurrence::Custom),
            _ => None,
        }
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recurrence::parse(s)
            .ok_or_else(|| format!("unknown recurrence '{s}' (expected none, daily, weekly, or custom)"))
    }
}

/// Whether an attachment points at a file or a web link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[default]
    File,
    Link,
}

/// A file or link hanging off a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    /// Display name
    pub name: String,
}

/// A single todo record, the only persisted entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the collection; never reassigned once stored
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub importance: Importance,
    /// RFC 3339 timestamp, set once at creation
    pub created_at: String,
    /// Day-granularity due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

impl Task {
    /// Create a task with defaults for every optional field
    pub fn new(id: String, title: String, created_at: String) -> Self {
        Task {
            id,
            title,
            notes: String::new(),
            completed: false,
            importance: Importance::default(),
            created_at,
            due_date: None,
            project: default_project(),
            tags: Vec::new(),
            recurrence: Recurrence::None,
            attachments: Vec::new(),
        }
    }
}

/// Current time in the stored timestamp format (`2024-05-01T10:20:30.123Z`)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a fresh random identifier
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Parse user input for a due date. Blank input means "no due date".
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("invalid date '{trimmed}' (expected YYYY-MM-DD)"))
}

/// Remove blank and repeated tags, keeping first-seen order
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().trim_start_matches('#').to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn importance_parse_ignores_case() {
        assert_eq!(Importance::parse("URGENT"), Some(Importance::Urgent));
        assert_eq!(Importance::parse(" focus "), Some(Importance::Focus));
        assert_eq!(Importance::parse("high"), None);
    }

    #[test]
    fn importance_cycles_both_ways() {
        assert_eq!(Importance::Focus.next(), Importance::Urgent);
        assert_eq!(Importance::Urgent.prev(), Importance::Focus);
        assert_eq!(Importance::Planned.next().prev(), Importance::Planned);
    }

    #[test]
    fn task_serializes_camel_case() {
        let mut task = Task::new("a".into(), "Write".into(), "2024-01-01T00:00:00.000Z".into());
        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["dueDate"], "2024-03-01");
        assert_eq!(json["importance"], "planned");
        assert_eq!(json["recurrence"], "none");
        assert_eq!(json["project"], "General");
    }

    #[test]
    fn attachment_kind_uses_type_key() {
        let att = Attachment {
            id: "1".into(),
            kind: AttachmentKind::Link,
            url: "https://example.com".into(),
            name: "site".into(),
        };
        let json = serde_json::to_value(&att).unwrap();
        assert_eq!(json["type"], "link");
    }

    #[test]
    fn parse_date_input_accepts_blank_and_iso() {
        assert_eq!(parse_date_input("  "), Ok(None));
        assert_eq!(
            parse_date_input("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29))
        );
        assert!(parse_date_input("tomorrow").is_err());
    }

    #[test]
    fn dedupe_tags_keeps_first_order() {
        let tags = vec!["work".into(), "#home".into(), "work".into(), " ".into()];
        assert_eq!(dedupe_tags(tags), vec!["work".to_string(), "home".to_string()]);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(generate_id(), generate_id());
    }
}
