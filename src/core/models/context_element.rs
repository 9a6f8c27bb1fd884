//! Context element models
//!
//! A context element is a user-owned note made of a subject plus six
//! free-text fields describing a prompt setup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted subject, in characters
pub const MAX_SUBJECT_LEN: usize = 255;
/// Longest accepted value for each of the six fields, in characters
pub const MAX_FIELD_LEN: usize = 5000;
/// Largest offset a listing will ask storage for
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Subject plus the six element fields
///
/// Used as the create payload, as the partial update payload, and embedded
/// in the stored element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementContent {
    pub subject: String,
    pub task_goal: String,
    pub ai_role: String,
    pub my_role: String,
    pub key_info: String,
    pub behavior_rule: String,
    pub delivery_format: String,
}

impl ElementContent {
    /// Named view over the six long-text fields
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("task_goal", &self.task_goal),
            ("ai_role", &self.ai_role),
            ("my_role", &self.my_role),
            ("key_info", &self.key_info),
            ("behavior_rule", &self.behavior_rule),
            ("delivery_format", &self.delivery_format),
        ]
    }

    /// Overwrite every field that is non-empty in `patch`
    pub fn apply_patch(&mut self, patch: &ElementContent) {
        let pairs = [
            (&mut self.subject, &patch.subject),
            (&mut self.task_goal, &patch.task_goal),
            (&mut self.ai_role, &patch.ai_role),
            (&mut self.my_role, &patch.my_role),
            (&mut self.key_info, &patch.key_info),
            (&mut self.behavior_rule, &patch.behavior_rule),
            (&mut self.delivery_format, &patch.delivery_format),
        ];
        for (target, value) in pairs {
            if !value.is_empty() {
                target.clone_from(value);
            }
        }
    }

    /// Whether `needle` occurs in the subject or any of the six fields
    pub fn contains(&self, needle: &str) -> bool {
        self.subject.contains(needle) || self.fields().iter().any(|(_, v)| v.contains(needle))
    }
}

/// Stored context element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextElement {
    pub id: u64,
    pub user_id: u64,
    #[serde(flatten)]
    pub content: ElementContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column a listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Subject,
}

impl SortField {
    /// Unknown names order by creation time
    pub fn parse(name: &str) -> Self {
        match name {
            "updated_at" => SortField::UpdatedAt,
            "subject" => SortField::Subject,
            _ => SortField::CreatedAt,
        }
    }
}

/// Raw list query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementQuery {
    pub page: i64,
    pub size: i64,
    pub keyword: String,
    pub subject: String,
    pub ai_role: String,
    pub my_role: String,
    pub sort_by: String,
    pub sort_desc: bool,
}

/// Normalized listing parameters handed to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page
    pub page: u64,
    pub size: u64,
    pub keyword: Option<String>,
    pub subject: Option<String>,
    pub ai_role: Option<String>,
    pub my_role: Option<String>,
    pub sort_by: SortField,
    pub sort_desc: bool,
}

impl ListQuery {
    /// Rows to skip, never beyond what a signed 64-bit SQL offset holds
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.size)
            .min(MAX_OFFSET)
    }

    /// Whether an element passes every filter of the query
    pub fn matches(&self, content: &ElementContent) -> bool {
        let substring = |filter: &Option<String>, value: &str| {
            filter.as_deref().is_none_or(|needle| value.contains(needle))
        };

        substring(&self.subject, &content.subject)
            && substring(&self.ai_role, &content.ai_role)
            && substring(&self.my_role, &content.my_role)
            && self.keyword.as_deref().is_none_or(|kw| content.contains(kw))
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            keyword: None,
            subject: None,
            ai_role: None,
            my_role: None,
            sort_by: SortField::CreatedAt,
            sort_desc: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(subject: &str) -> ElementContent {
        ElementContent {
            subject: subject.to_string(),
            task_goal: "write a summary".to_string(),
            ai_role: "editor".to_string(),
            ..ElementContent::default()
        }
    }

    #[test]
    fn test_patch_only_overwrites_non_empty() {
        let mut current = content("Weekly report");
        let patch = ElementContent {
            ai_role: "reviewer".to_string(),
            ..ElementContent::default()
        };

        current.apply_patch(&patch);
        assert_eq!(current.subject, "Weekly report");
        assert_eq!(current.task_goal, "write a summary");
        assert_eq!(current.ai_role, "reviewer");
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(SortField::parse("subject"), SortField::Subject);
        assert_eq!(SortField::parse("updated_at"), SortField::UpdatedAt);
        assert_eq!(SortField::parse("created_at"), SortField::CreatedAt);
        assert_eq!(SortField::parse("id; DROP TABLE"), SortField::CreatedAt);
    }

    #[test]
    fn test_query_matches_filters() {
        let element = content("Weekly report");

        let query = ListQuery {
            keyword: Some("summary".to_string()),
            ai_role: Some("edit".to_string()),
            ..ListQuery::default()
        };
        assert!(query.matches(&element));

        let query = ListQuery {
            subject: Some("Monthly".to_string()),
            ..ListQuery::default()
        };
        assert!(!query.matches(&element));
    }

    #[test]
    fn test_offset() {
        let query = ListQuery {
            page: 3,
            size: 20,
            ..ListQuery::default()
        };
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_offset_clamped_for_huge_pages() {
        let query = ListQuery {
            page: 1_000_000_000_000_000_000,
            size: 10,
            ..ListQuery::default()
        };
        assert_eq!(query.offset(), MAX_OFFSET);

        let query = ListQuery {
            page: u64::MAX,
            size: u64::MAX,
            ..ListQuery::default()
        };
        assert_eq!(query.offset(), MAX_OFFSET);
    }

    #[test]
    fn test_element_serializes_flat() {
        let element = ContextElement {
            id: 1,
            user_id: 2,
            content: content("Weekly report"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["subject"], "Weekly report");
        assert_eq!(json["user_id"], 2);
        assert!(json.get("content").is_none());
    }
}
