//! Field normalizers for raw division blocks
//!
//! Each normalizer is total: it always yields a best-effort value plus zero
//! or more issues, and never stops the caller. A field that cannot be decoded
//! degrades to absent (dates, parent) or empty (relations).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::Value;

use super::errors::{Issue, IssueCode, IssueLog};
use super::types::{ParentRef, NO_PARENT, YES_PARENT};

/// A normalized value together with the issues found producing it
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub issues: Vec<Issue>,
}

impl<T> Normalized<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            issues: Vec::new(),
        }
    }

    pub fn degraded(value: T, issue: Issue) -> Self {
        Self {
            value,
            issues: vec![issue],
        }
    }

    /// Moves the issues into `log` and returns the value
    pub fn absorb(self, log: &mut IssueLog) -> T {
        log.extend(self.issues);
        self.value
    }
}

/// Timestamp layouts accepted besides a bare `YYYY-MM-DD`
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dt%H:%M:%S%.f",
];

/// Normalizes a date field (`from`/`to`).
///
/// Accepts a calendar date or a timestamp (truncated to its date). `null`
/// and a missing field both mean open-ended.
pub fn normalize_date(value: Option<&Value>, field: &str, context: &str) -> Normalized<Option<NaiveDate>> {
    let value = match value {
        None | Some(Value::Null) => return Normalized::clean(None),
        Some(value) => value,
    };

    let text = match value {
        Value::String(text) => text,
        other => {
            return Normalized::degraded(
                None,
                Issue::normalization(
                    IssueCode::InvalidDate,
                    context,
                    format!(
                        "expected ISO date string or null for '{}', got {}",
                        field,
                        render_value(other)
                    ),
                ),
            )
        }
    };

    match parse_date(text) {
        Some(date) => Normalized::clean(Some(date)),
        None => Normalized::degraded(
            None,
            Issue::normalization(
                IssueCode::InvalidDate,
                context,
                format!("invalid date '{}' in '{}'", text, field),
            ),
        ),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
}

/// Plain scalars that YAML 1.1 resolves to `false`
const FALSY_TOKENS: &[&str] = &[
    "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF",
];

/// Plain scalars that YAML 1.1 resolves to `true`
const TRUTHY_TOKENS: &[&str] = &[
    "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON",
];

/// Folds a boolean-like parent token into `NO`/`YES`; other text is kept.
fn parent_token(text: &str) -> &str {
    if FALSY_TOKENS.contains(&text) {
        NO_PARENT
    } else if TRUTHY_TOKENS.contains(&text) {
        YES_PARENT
    } else {
        text
    }
}

/// Normalizes the `parent` field.
///
/// Booleans, and strings spelled like YAML 1.1 booleans (`no`, `off`, ...),
/// are folded into the `YES`/`NO` tokens; other strings are kept verbatim.
pub fn normalize_parent(value: Option<&Value>, context: &str) -> Normalized<ParentRef> {
    match value {
        None | Some(Value::Null) => Normalized::clean(ParentRef::Absent),
        Some(Value::Bool(flag)) => {
            let token = if *flag { YES_PARENT } else { NO_PARENT };
            Normalized::clean(ParentRef::from_token(token))
        }
        Some(Value::String(token)) => Normalized::clean(ParentRef::from_token(parent_token(token))),
        Some(other) => Normalized::degraded(
            ParentRef::Absent,
            Issue::normalization(
                IssueCode::InvalidParent,
                context,
                format!("parent must be string or null, got {}", render_value(other)),
            ),
        ),
    }
}

/// Normalizes a `was`/`became` list.
///
/// Items are bare ids or mappings carrying a string `id`. Bad items are
/// dropped one by one; a non-sequence field becomes empty.
pub fn normalize_relation(value: Option<&Value>, field: &str, context: &str) -> Normalized<Vec<String>> {
    let items = match value {
        None | Some(Value::Null) => return Normalized::clean(Vec::new()),
        Some(Value::Sequence(items)) => items,
        Some(other) => {
            return Normalized::degraded(
                Vec::new(),
                Issue::normalization(
                    IssueCode::InvalidRelation,
                    &format!("{} {}", context, field),
                    format!("expected list, got {}", type_name(other)),
                ),
            )
        }
    };

    let mut ids = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for item in items {
        match item {
            Value::String(id) => ids.push(id.clone()),
            Value::Mapping(map) => match map.get("id") {
                Some(Value::String(id)) => ids.push(id.clone()),
                _ => issues.push(Issue::normalization(
                    IssueCode::InvalidRelation,
                    &format!("{} {}", context, field),
                    format!(
                        "relation mapping missing string 'id' field: {}",
                        render_value(item)
                    ),
                )),
            },
            other => issues.push(Issue::normalization(
                IssueCode::InvalidRelation,
                &format!("{} {}", context, field),
                format!(
                    "expected string or mapping with id, got {}",
                    render_value(other)
                ),
            )),
        }
    }

    Normalized { value: ids, issues }
}

/// Short YAML type name for messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_f64() {
                "float"
            } else {
                "int"
            }
        }
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Renders a value on one line for messages
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        other => serde_json::to_string(other).unwrap_or_else(|_| {
            serde_yaml::to_string(other)
                .map(|s| s.trim_end().replace('\n', "; "))
                .unwrap_or_else(|_| format!("<{}>", type_name(other)))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    const CTX: &str = "norway/oslo.yaml (NO-03)";

    #[test]
    fn test_date_accepts_iso_string() {
        let value = yaml("2005-12-31");
        let out = normalize_date(Some(&value), "to", CTX);
        assert_eq!(out.value, NaiveDate::from_ymd_opt(2005, 12, 31));
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_date_accepts_timestamp() {
        let value = yaml("2001-02-03T10:00:00Z");
        let out = normalize_date(Some(&value), "from", CTX);
        assert_eq!(out.value, NaiveDate::from_ymd_opt(2001, 2, 3));

        let value = yaml("'2001-02-03 10:00:00'");
        let out = normalize_date(Some(&value), "from", CTX);
        assert_eq!(out.value, NaiveDate::from_ymd_opt(2001, 2, 3));
    }

    #[test]
    fn test_date_null_and_missing_are_open() {
        let null = Value::Null;
        assert_eq!(normalize_date(Some(&null), "from", CTX), Normalized::clean(None));
        assert_eq!(normalize_date(None, "from", CTX), Normalized::clean(None));
    }

    #[test]
    fn test_date_invalid_string_degrades() {
        let value = yaml("2005-13-01");
        let out = normalize_date(Some(&value), "from", CTX);
        assert_eq!(out.value, None);
        assert_eq!(out.issues.len(), 1);
        assert_eq!(out.issues[0].code(), IssueCode::InvalidDate);
        assert!(out.issues[0].message().contains("'2005-13-01'"));
    }

    #[test]
    fn test_date_wrong_type_degrades() {
        let value = yaml("1999");
        let out = normalize_date(Some(&value), "to", CTX);
        assert_eq!(out.value, None);
        assert_eq!(out.issues.len(), 1);
        assert!(out.issues[0].message().contains("got 1999"));
    }

    #[test]
    fn test_parent_boolean_tokens() {
        let no = Value::Bool(false);
        assert_eq!(normalize_parent(Some(&no), CTX).value, ParentRef::NoParent);

        let yes = Value::Bool(true);
        assert_eq!(
            normalize_parent(Some(&yes), CTX).value,
            ParentRef::Id("YES".to_string())
        );
    }

    #[test]
    fn test_parent_boolean_spellings() {
        for token in ["no", "No", "off", "Off", "OFF", "false", "False"] {
            let value = yaml(token);
            assert_eq!(
                normalize_parent(Some(&value), CTX).value,
                ParentRef::NoParent,
                "{}",
                token
            );
        }
        for token in ["yes", "On", "TRUE"] {
            let value = yaml(token);
            assert_eq!(
                normalize_parent(Some(&value), CTX).value,
                ParentRef::Id("YES".to_string()),
                "{}",
                token
            );
        }

        let value = yaml("Norway");
        assert_eq!(
            normalize_parent(Some(&value), CTX).value,
            ParentRef::Id("Norway".to_string())
        );
    }

    #[test]
    fn test_parent_string_and_sentinel() {
        let value = yaml("NO");
        assert_eq!(normalize_parent(Some(&value), CTX).value, ParentRef::NoParent);

        let value = yaml("NO-03");
        assert_eq!(
            normalize_parent(Some(&value), CTX).value,
            ParentRef::Id("NO-03".to_string())
        );
    }

    #[test]
    fn test_parent_invalid_type() {
        let value = yaml("[a, b]");
        let out = normalize_parent(Some(&value), CTX);
        assert_eq!(out.value, ParentRef::Absent);
        assert_eq!(out.issues.len(), 1);
        assert_eq!(out.issues[0].code(), IssueCode::InvalidParent);
    }

    #[test]
    fn test_relation_mixed_items() {
        let value = yaml("[A, {id: B, note: merged}, {name: C}, 7]");
        let out = normalize_relation(Some(&value), "was", CTX);
        assert_eq!(out.value, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(out.issues.len(), 2);
        assert!(out.issues[0].message().contains("missing string 'id'"));
        assert!(out.issues[1].message().contains("got 7"));
    }

    #[test]
    fn test_relation_not_a_list() {
        let value = yaml("A");
        let out = normalize_relation(Some(&value), "became", CTX);
        assert!(out.value.is_empty());
        assert_eq!(out.issues.len(), 1);
        assert_eq!(
            out.issues[0].message(),
            "norway/oslo.yaml (NO-03) became: expected list, got string"
        );
    }

    #[test]
    fn test_absorb_moves_issues() {
        let value = yaml("nope");
        let mut log = IssueLog::new();
        let date = normalize_date(Some(&value), "from", CTX).absorb(&mut log);
        assert_eq!(date, None);
        assert_eq!(log.len(), 1);
    }
}
