// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers for schemaless JSON documents held by a remote backend.

use std::cmp::Ordering;

use serde_json::Value;

/// Compare two documents by the value of one top-level field.
///
/// Numbers compare numerically and strings lexically. Documents missing the
/// field (or holding a value of another kind) sort after those that have it.
pub fn compare_by_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(_)), _) | (Some(Value::String(_)), _) => Ordering::Less,
        (_, Some(Value::Number(_))) | (_, Some(Value::String(_))) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Sort documents by one field. The sort is stable, and documents missing
/// the field stay last in both directions.
pub fn sort_documents(documents: &mut [Value], field: &str, descending: bool) {
    documents.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, field);
        let has_a = has_sortable(a, field);
        let has_b = has_sortable(b, field);
        if descending && has_a && has_b {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn has_sortable(document: &Value, field: &str) -> bool {
    matches!(
        document.get(field),
        Some(Value::Number(_)) | Some(Value::String(_))
    )
}

/// Return the document with its `id` field set.
pub fn with_id(mut document: Value, id: &str) -> Value {
    if let Some(fields) = document.as_object_mut() {
        fields.insert("id".to_string(), Value::from(id));
    }
    document
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
