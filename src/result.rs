//! Input schema: the structured output of the event-extraction service.
//!
//! Field names follow the service's PascalCase JSON. Anything the graph
//! does not use (offsets aside) is ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

use crate::error::{EventGraphError, Result};

/// Entity types the extraction service can emit.
pub const ENTITY_TYPES: [&str; 9] = [
    "DATE",
    "FACILITY",
    "LOCATION",
    "MONETARY_VALUE",
    "ORGANIZATION",
    "PERSON",
    "PERSON_TITLE",
    "QUANTITY",
    "STOCK_CODE",
];

/// Event (trigger) types the extraction service can emit.
pub const TRIGGER_TYPES: [&str; 11] = [
    "BANKRUPTCY",
    "EMPLOYMENT",
    "CORPORATE_ACQUISITION",
    "INVESTMENT_GENERAL",
    "CORPORATE_MERGER",
    "IPO",
    "RIGHTS_ISSUE",
    "SECONDARY_OFFERING",
    "SHELF_OFFERING",
    "TENDER_OFFERING",
    "STOCK_SPLIT",
];

/// Top-level extraction result: events plus coreference groups of entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractionResult {
    pub events: Vec<Event>,
    pub entities: Vec<EntityGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

/// Text span signalling that an event occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trigger {
    #[serde(rename = "Type")]
    pub trigger_type: String,
    pub text: String,
    pub score: f64,
    pub group_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<usize>,
}

/// Role-labelled link from an event to the entity group at `entity_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Argument {
    pub entity_index: usize,
    pub role: String,
    pub score: f64,
}

/// Coreference cluster of mentions believed to name the same entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityGroup {
    #[serde(rename = "Type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mention {
    pub text: String,
    #[serde(rename = "Type")]
    pub mention_type: String,
    pub score: f64,
    pub group_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<usize>,
}

impl ExtractionResult {
    /// Build a result from an already-parsed JSON value.
    ///
    /// `Events` and `Entities` must both be present; everything inside them
    /// must match the schema.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            EventGraphError::MalformedResult("extraction result must be a JSON object".to_string())
        })?;

        for field in ["Events", "Entities"] {
            if !object.contains_key(field) {
                return Err(EventGraphError::MalformedResult(format!(
                    "missing required field `{}`",
                    field
                )));
            }
        }

        serde_json::from_value(value).map_err(|e| EventGraphError::MalformedResult(e.to_string()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Events": [{
            "Type": "IPO",
            "Triggers": [{"Type": "IPO", "Text": "went public", "Score": 0.9, "GroupScore": 0.8,
                          "BeginOffset": 10, "EndOffset": 21}],
            "Arguments": [{"EntityIndex": 0, "Role": "COMPANY", "Score": 0.5}]
        }],
        "Entities": [{
            "Type": "ORGANIZATION",
            "Mentions": [{"Text": "Acme Corp", "Type": "ORGANIZATION", "Score": 0.95, "GroupScore": 0.9}]
        }]
    }"#;

    #[test]
    fn test_parse_sample() {
        let result = ExtractionResult::from_json_str(SAMPLE).unwrap();
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].triggers[0].trigger_type, "IPO");
        assert_eq!(result.events[0].triggers[0].begin_offset, Some(10));
        assert_eq!(result.events[0].arguments[0].role, "COMPANY");
        assert_eq!(result.entities[0].entity_type, "ORGANIZATION");
        assert_eq!(result.entities[0].mentions[0].text, "Acme Corp");
        assert_eq!(result.entities[0].mentions[0].end_offset, None);
    }

    #[test]
    fn test_missing_events_is_malformed() {
        let err = ExtractionResult::from_json_str(r#"{"Entities": []}"#).unwrap_err();
        assert!(matches!(err, EventGraphError::MalformedResult(_)));
        assert!(err.to_string().contains("Events"));
    }

    #[test]
    fn test_missing_entities_is_malformed() {
        let err = ExtractionResult::from_json_str(r#"{"Events": []}"#).unwrap_err();
        assert!(matches!(err, EventGraphError::MalformedResult(_)));
        assert!(err.to_string().contains("Entities"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = ExtractionResult::from_json_str("[]").unwrap_err();
        assert!(matches!(err, EventGraphError::MalformedResult(_)));
    }

    #[test]
    fn test_bad_inner_field_is_malformed() {
        let json = r#"{"Events": [{"Triggers": [{"Type": "IPO"}]}], "Entities": []}"#;
        let err = ExtractionResult::from_json_str(json).unwrap_err();
        assert!(matches!(err, EventGraphError::MalformedResult(_)));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = ExtractionResult::from_json_str("{").unwrap_err();
        assert!(matches!(err, EventGraphError::Json(_)));
    }

    #[test]
    fn test_empty_lists_default() {
        let json = r#"{"Events": [{}], "Entities": [{"Type": "PERSON"}]}"#;
        let result = ExtractionResult::from_json_str(json).unwrap();
        assert!(result.events[0].triggers.is_empty());
        assert!(result.events[0].arguments.is_empty());
        assert!(result.entities[0].mentions.is_empty());
    }

    #[test]
    fn test_vocabularies_are_disjoint() {
        for t in TRIGGER_TYPES {
            assert!(!ENTITY_TYPES.contains(&t));
        }
    }
}
