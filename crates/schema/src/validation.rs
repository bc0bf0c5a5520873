//! Bundle validation.
//!
//! Validation never fails: every problem is recorded in the per-file
//! [`ValidationResult`], and sibling files and records keep being checked.

use crate::registry::{SchemaRegistry, Violation};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use validatehound_loader::Bundle;

/// Error recorded when a schema-mapped file does not hold a list.
pub const NOT_A_LIST: &str = "expected a list of objects";

/// Outcome of validating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub filename: String,
    /// Name of the schema the file was checked against, if any.
    pub schema: Option<String>,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            schema: None,
            valid_count: 0,
            invalid_count: 0,
            errors: Vec::new(),
        }
    }

    pub fn add_valid(&mut self) {
        self.valid_count += 1;
    }

    pub fn add_error(&mut self, message: String) {
        self.invalid_count += 1;
        self.errors.push(message);
    }

    /// Whether a schema was found for this file.
    pub fn is_validated(&self) -> bool {
        self.schema.is_some()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} valid, {} invalid",
            self.filename, self.valid_count, self.invalid_count
        )
    }
}

/// Per-file results in bundle order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn get(&self, filename: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn total_valid(&self) -> usize {
        self.results.iter().map(|r| r.valid_count).sum()
    }

    pub fn total_invalid(&self) -> usize {
        self.results.iter().map(|r| r.invalid_count).sum()
    }

    /// True when no record anywhere failed validation.
    pub fn is_clean(&self) -> bool {
        self.total_invalid() == 0
    }
}

impl FromIterator<ValidationResult> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

/// Validate every file of `bundle` against the schema its name resolves to.
pub fn validate(bundle: &Bundle, registry: &SchemaRegistry) -> ValidationReport {
    bundle
        .iter()
        .map(|(filename, content)| validate_file(filename, content, registry))
        .collect()
}

fn validate_file(filename: &str, content: &Value, registry: &SchemaRegistry) -> ValidationResult {
    let mut result = ValidationResult::new(filename);

    let Some(schema) = registry.resolve(filename) else {
        debug!("No schema for {}, skipping", filename);
        return result;
    };
    result.schema = Some(schema.name().to_string());

    let Some(records) = content.as_array() else {
        result.add_error(NOT_A_LIST.to_string());
        return result;
    };

    debug!(
        "Validating {} records of {} as {}",
        records.len(),
        filename,
        schema.name()
    );
    for (index, record) in records.iter().enumerate() {
        let violations = schema.check(record);
        if violations.is_empty() {
            result.add_valid();
        } else {
            result.add_error(format_record_error(index, &violations));
        }
    }

    result
}

/// Render all violations of the record at `index` as one error string.
pub fn format_record_error(index: usize, violations: &[Violation]) -> String {
    let details: Vec<String> = violations.iter().map(Violation::to_string).collect();
    format!("Item {}: {}", index, details.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builtin().unwrap()
    }

    fn bundle(files: Vec<(&str, Value)>) -> Bundle {
        Bundle::from_files(files).unwrap()
    }

    #[test]
    fn test_valid_users() {
        let bundle = bundle(vec![(
            "users.json",
            json!([
                {"objectid": "U1", "Name": "alice"},
                {"objectid": "U2", "Name": "bob"}
            ]),
        )]);

        let report = validate(&bundle, &registry());
        let users = report.get("users.json").unwrap();
        assert_eq!(users.valid_count, 2);
        assert_eq!(users.invalid_count, 0);
        assert!(users.errors.is_empty());
        assert_eq!(users.schema.as_deref(), Some("User"));
        assert_eq!(users.summary(), "users.json: 2 valid, 0 invalid");
    }

    #[test]
    fn test_missing_required_field() {
        let bundle = bundle(vec![(
            "users.json",
            json!([
                {"objectid": "U1", "Name": "alice"},
                {"objectid": "U2"}
            ]),
        )]);

        let report = validate(&bundle, &registry());
        let users = report.get("users.json").unwrap();
        assert_eq!(users.valid_count, 1);
        assert_eq!(users.invalid_count, 1);
        assert_eq!(users.errors.len(), 1);
        assert!(users.errors[0].starts_with("Item 1: "));
        assert!(users.errors[0].contains("Name"));
    }

    #[test]
    fn test_all_violations_of_a_record_reported() {
        let bundle = bundle(vec![("computers.json", json!([{"Name": 42, "Domain": 7}]))]);

        let report = validate(&bundle, &registry());
        let computers = report.get("computers.json").unwrap();
        assert_eq!(computers.invalid_count, 1);

        let error = &computers.errors[0];
        assert!(error.starts_with("Item 0: "), "{}", error);
        assert!(error.contains("objectid"), "{}", error);
        assert!(error.contains("/Name: "), "{}", error);
        assert!(error.contains("/Domain: "), "{}", error);
        assert_eq!(error.matches("; ").count(), 2, "{}", error);
    }

    #[test]
    fn test_nested_reference_violation() {
        let bundle = bundle(vec![(
            "users.json",
            json!([
                {"objectid": "U1", "Name": "alice", "ContainedBy": null},
                {"objectid": "U2", "Name": "bob",
                 "ContainedBy": {"ObjectIdentifier": "OU1", "ObjectType": 3}},
                {"objectid": "U3", "Name": "carol",
                 "ContainedBy": {"ObjectIdentifier": "OU1", "ObjectType": "OU"}}
            ]),
        )]);

        let report = validate(&bundle, &registry());
        let users = report.get("users.json").unwrap();
        assert_eq!(users.valid_count, 2);
        assert_eq!(users.invalid_count, 1);
        assert!(users.errors[0].starts_with("Item 1: /ContainedBy/ObjectType: "));
    }

    #[test]
    fn test_ace_violations() {
        let bundle = bundle(vec![(
            "groups.json",
            json!([{
                "objectid": "G1",
                "Name": "Domain Admins",
                "Members": ["U1"],
                "Aces": [
                    {"PrincipalSID": "S-1-5-32-544", "RightName": "GenericAll"},
                    {"PrincipalSID": "S-1-5-18", "IsInherited": "yes"}
                ]
            }]),
        )]);

        let report = validate(&bundle, &registry());
        let groups = report.get("groups.json").unwrap();
        assert_eq!(groups.invalid_count, 1);
        assert!(groups.errors[0].contains("/Aces/1"));
        assert!(groups.errors[0].contains("RightName"));
        assert!(groups.errors[0].contains("/Aces/1/IsInherited"));
    }

    #[test]
    fn test_extra_fields_allowed() {
        let bundle = bundle(vec![(
            "sessions.json",
            json!([{"UserId": "U1", "ComputerId": "C1", "LogonType": 2}]),
        )]);

        let report = validate(&bundle, &registry());
        assert_eq!(report.get("sessions.json").unwrap().valid_count, 1);
    }

    #[test]
    fn test_unknown_file_acknowledged() {
        let bundle = bundle(vec![("certtemplates.json", json!([{"anything": true}]))]);

        let report = validate(&bundle, &registry());
        assert_eq!(
            report.get("certtemplates.json").unwrap(),
            &ValidationResult::new("certtemplates.json")
        );
        assert!(!report.results()[0].is_validated());
    }

    #[test]
    fn test_object_content_single_error() {
        let bundle = bundle(vec![(
            "users.json",
            json!({"a": 1, "b": 2, "c": 3, "meta": {"count": 3}}),
        )]);

        let report = validate(&bundle, &registry());
        let users = report.get("users.json").unwrap();
        assert_eq!(users.valid_count, 0);
        assert_eq!(users.invalid_count, 1);
        assert_eq!(users.errors, vec![NOT_A_LIST.to_string()]);
    }

    #[test]
    fn test_non_object_record_invalid() {
        let bundle = bundle(vec![("users.json", json!(["U1", null]))]);

        let report = validate(&bundle, &registry());
        let users = report.get("users.json").unwrap();
        assert_eq!(users.invalid_count, 2);
        assert!(users.errors[0].starts_with("Item 0: (root): "));
        assert!(users.errors[1].starts_with("Item 1: (root): "));
    }

    #[test]
    fn test_prefixed_filename_uses_suffix_schema() {
        let bundle = bundle(vec![(
            "20240101120000_corp_users.json",
            json!([{"objectid": "U1", "Name": "alice"}, {"Name": "bob"}]),
        )]);

        let report = validate(&bundle, &registry());
        let result = &report.results()[0];
        assert_eq!(result.schema.as_deref(), Some("User"));
        assert_eq!((result.valid_count, result.invalid_count), (1, 1));
    }

    #[test]
    fn test_report_follows_bundle_order_and_is_stable() {
        let bundle = bundle(vec![
            ("users.json", json!([{"objectid": "U1"}, {"Name": "x"}, {}])),
            ("notes.json", json!({"text": "hi"})),
            ("groups.json", json!([{"objectid": "G1", "Name": "g", "Members": [1]}])),
        ]);
        let registry = registry();

        let first = validate(&bundle, &registry);
        let second = validate(&bundle, &registry);
        assert_eq!(first, second);

        let names: Vec<_> = first.results().iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["users.json", "notes.json", "groups.json"]);
        assert_eq!(first.total_valid(), 0);
        assert_eq!(first.total_invalid(), 4);
        assert!(!first.is_clean());

        let users = first.get("users.json").unwrap();
        assert!(users.errors[0].starts_with("Item 0: "));
        assert!(users.errors[1].starts_with("Item 1: "));
        assert!(users.errors[2].starts_with("Item 2: "));
    }

    #[test]
    fn test_empty_bundle() {
        let report = validate(&Bundle::default(), &registry());
        assert!(report.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_format_record_error() {
        let violations = vec![
            Violation {
                instance_path: String::new(),
                message: "\"objectid\" is a required property".to_string(),
            },
            Violation {
                instance_path: "/Name".to_string(),
                message: "42 is not of type \"string\"".to_string(),
            },
        ];
        assert_eq!(
            format_record_error(3, &violations),
            "Item 3: (root): \"objectid\" is a required property; /Name: 42 is not of type \"string\""
        );
    }
}
