//! Generic schema evaluation.
//!
//! A [`RequestSchema`] is an ordered table of [`FieldSpec`]s evaluated
//! against a raw JSON mapping. Results land in a per-request
//! [`ValidatedRequest`]: accepted values, the ordered set of populated
//! field names, and the accumulated field-to-message error map.

use super::fields::{FieldSpec, Presence};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Named, ordered set of field constraints describing one request shape.
///
/// Declared once, process-wide, immutable. Evaluation never stores state
/// on the schema itself.
#[derive(Debug, Clone, Copy)]
pub struct RequestSchema {
    name: &'static str,
    fields: &'static [FieldSpec],
}

impl RequestSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Apply every declared field to `input`, accumulating per-field
    /// errors. Required/nullable failures suppress the semantic check for
    /// that field; semantic failures leave the field unpopulated.
    pub fn validate(&self, input: &Map<String, Value>) -> ValidatedRequest {
        let mut validated = ValidatedRequest::new(self.name);

        for spec in self.fields {
            let raw = input.get(spec.name);

            match spec.validate_required_nullable(raw) {
                Err(message) => validated.add_error(spec.name, message),
                Ok(Presence::Present) => {
                    // Present implies the key exists in the input.
                    let value = raw.cloned().unwrap_or(Value::Null);
                    match spec.validate_semantics(&value) {
                        Err(message) => validated.add_error(spec.name, message),
                        Ok(()) => validated.populate(spec.name, value),
                    }
                }
                Ok(_) => {
                    // Accepted as empty: not populated, nothing stored.
                }
            }
        }

        validated
    }
}

/// Per-request validation outcome. Constructed fresh for every incoming
/// request and discarded with the response.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    schema_name: &'static str,
    values: HashMap<&'static str, Value>,
    populated: Vec<&'static str>,
    errors: BTreeMap<String, String>,
}

impl ValidatedRequest {
    fn new(schema_name: &'static str) -> Self {
        Self {
            schema_name,
            values: HashMap::new(),
            populated: Vec::new(),
            errors: BTreeMap::new(),
        }
    }

    fn populate(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
        self.populated.push(name);
    }

    /// Record a field error. Also used by request-level policies to attach
    /// synthetic errors (e.g. cross-field rejections).
    pub fn add_error(&mut self, name: &str, message: String) {
        self.errors.insert(name.to_string(), message);
    }

    /// A request is usable by downstream logic only when this is true.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    /// Field names that passed all constraints, in declaration order.
    pub fn populated_fields(&self) -> &[&'static str] {
        &self.populated
    }

    pub fn has(&self, name: &str) -> bool {
        self.populated.iter().any(|field| *field == name)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Integer list accessor for ClientIds fields.
    pub fn get_ids(&self, name: &str) -> Option<Vec<i64>> {
        self.get(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_i64).collect())
    }
}
