use serde_json::{json, Value};
use std::sync::LazyLock;

pub static SETTINGS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "title": { "type": "string" },
            "description": { "type": "string" },
            "template": { "type": "string", "minLength": 1 },
            "report_directory": { "type": "string" },
            "template_directory": { "type": "string" },
            "report_name_pattern": { "type": "string" },
            "display_report": { "type": "boolean" },
            "risks": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "informational": { "type": "boolean" },
                    "low": { "type": "boolean" },
                    "medium": { "type": "boolean" },
                    "high": { "type": "boolean" }
                }
            },
            "confidences": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "false_positive": { "type": "boolean" },
                    "low": { "type": "boolean" },
                    "medium": { "type": "boolean" },
                    "high": { "type": "boolean" },
                    "confirmed": { "type": "boolean" }
                }
            }
        }
    })
});
