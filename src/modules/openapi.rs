//! Shared pieces of the modules' OpenAPI fragments.

use serde_json::{json, Value};

/// A response whose body is the success envelope around `data`.
pub(crate) fn envelope_of(description: &str, data: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string" },
                        "data": data
                    },
                    "required": ["status"]
                }
            }
        }
    })
}

/// Add the 400 and 500 envelopes every endpoint can return.
pub(crate) fn error_responses(mut responses: Value) -> Value {
    for (code, description) in [
        ("400", "Invalid input or missing entity"),
        ("500", "Catalog store failure"),
    ] {
        responses[code] = json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
    }
    responses
}
