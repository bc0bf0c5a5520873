//! JSON schema definitions for BloodHound record types.
//!
//! Schemas are open: only declared fields are checked and unknown keys are
//! accepted. Optional fields carry their default as a `default` annotation.

use serde_json::{json, Value};

/// Draft used by every built-in schema.
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Built-in registry table: `(match key, schema name, builder)`, in match
/// order.
pub const BUILTIN: &[(&str, &str, fn() -> Value)] = &[
    ("users.json", "User", user_schema),
    ("groups.json", "Group", group_schema),
    ("computers.json", "Computer", computer_schema),
    ("sessions.json", "Session", session_schema),
    ("domains.json", "Domain", domain_schema),
    ("gpos.json", "GPO", gpo_schema),
    ("ous.json", "OU", ou_schema),
    ("containers.json", "Container", container_schema),
];

/// A reference to another object (`ContainedBy`, `ChildObjects`).
fn reference(nullable: bool) -> Value {
    let ty = if nullable {
        json!(["object", "null"])
    } else {
        json!("object")
    };
    json!({
        "type": ty,
        "required": ["ObjectIdentifier", "ObjectType"],
        "properties": {
            "ObjectIdentifier": { "type": "string" },
            "ObjectType": { "type": "string" }
        }
    })
}

/// An access control entry.
fn ace() -> Value {
    json!({
        "type": "object",
        "required": ["PrincipalSID", "RightName"],
        "properties": {
            "PrincipalSID": { "type": "string" },
            "PrincipalType": { "type": "string" },
            "RightName": { "type": "string" },
            "IsInherited": { "type": "boolean", "default": false }
        }
    })
}

fn optional_string() -> Value {
    json!({ "type": ["string", "null"], "default": null })
}

/// Common shape of directory objects: identifier and name, plus the
/// optional properties bag and ACL. `extra` adds type-specific fields.
fn directory_object(title: &str, extra: Value) -> Value {
    let mut properties = json!({
        "objectid": { "type": "string" },
        "Name": { "type": "string" },
        "Properties": { "type": "object", "default": {} },
        "Aces": { "type": "array", "items": ace(), "default": [] }
    });

    if let (Some(base), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        base.extend(extra);
    }

    json!({
        "$schema": DRAFT_07,
        "title": title,
        "type": "object",
        "required": ["objectid", "Name"],
        "properties": properties
    })
}

fn contained_by() -> Value {
    let mut schema = reference(true);
    schema["default"] = Value::Null;
    schema
}

fn child_objects() -> Value {
    json!({ "type": "array", "items": reference(false), "default": [] })
}

pub fn user_schema() -> Value {
    directory_object(
        "User",
        json!({
            "Domain": optional_string(),
            "DistinguishedName": optional_string(),
            "ContainedBy": contained_by()
        }),
    )
}

pub fn group_schema() -> Value {
    directory_object(
        "Group",
        json!({
            "Members": {
                "type": ["array", "null"],
                "items": { "type": "string" },
                "default": null
            },
            "ContainedBy": contained_by()
        }),
    )
}

pub fn computer_schema() -> Value {
    directory_object(
        "Computer",
        json!({
            "Domain": optional_string(),
            "OperatingSystem": optional_string(),
            "ContainedBy": contained_by()
        }),
    )
}

pub fn session_schema() -> Value {
    json!({
        "$schema": DRAFT_07,
        "title": "Session",
        "type": "object",
        "required": ["UserId", "ComputerId"],
        "properties": {
            "UserId": { "type": "string" },
            "ComputerId": { "type": "string" }
        }
    })
}

pub fn domain_schema() -> Value {
    directory_object(
        "Domain",
        json!({
            "ChildObjects": child_objects(),
            "Trusts": { "type": "array", "items": { "type": "object" }, "default": [] }
        }),
    )
}

pub fn gpo_schema() -> Value {
    directory_object("GPO", json!({ "ContainedBy": contained_by() }))
}

pub fn ou_schema() -> Value {
    directory_object(
        "OU",
        json!({
            "ContainedBy": contained_by(),
            "ChildObjects": child_objects(),
            "Links": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "GUID": { "type": "string" },
                        "IsEnforced": { "type": "boolean" }
                    }
                },
                "default": []
            }
        }),
    )
}

pub fn container_schema() -> Value {
    directory_object(
        "Container",
        json!({
            "ContainedBy": contained_by(),
            "ChildObjects": child_objects()
        }),
    )
}
