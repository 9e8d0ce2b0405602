//! Field descriptors and their constraint checks.
//!
//! A [`FieldSpec`] is plain data: name, kind, required, nullable. The kind
//! selects the semantic check; required/nullable are evaluated by the
//! schema engine before the semantic check runs. Specs hold no per-request
//! state, so a process-wide schema table can never leak values across
//! requests.

use crate::constants::Gender;
use chrono::{Datelike, Local, NaiveDate};
use serde_json::Value;

/// Semantic kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string.
    Text,
    /// A key/value mapping.
    Arguments,
    /// A string containing `@`.
    Email,
    /// A string or integer whose decimal form is 11 characters starting
    /// with `7`. Both conditions are required.
    Phone,
    /// A `DD.MM.YYYY` date string.
    Date,
    /// A `DD.MM.YYYY` date no later than today and no more than 70 years
    /// back.
    BirthDay,
    /// One of the integers 0, 1, 2.
    Gender,
    /// A sequence of non-negative integers.
    ClientIds,
}

/// Declarative constraint set for one named attribute of a request schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, required: bool, nullable: bool) -> Self {
        Self {
            name,
            kind,
            required,
            nullable,
        }
    }
}

/// How a raw value relates to the required/nullable rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Key absent from the input mapping.
    Missing,
    /// Key present but carrying the kind-appropriate empty value.
    Empty,
    /// A concrete value to run the semantic check against.
    Present,
}

/// Classify a raw value. Absent keys and the empty sentinels (`null`, `""`,
/// `{}`, `[]`) are distinguished from real values; integer `0` is a real
/// value.
pub fn presence(value: Option<&Value>) -> Presence {
    match value {
        None => Presence::Missing,
        Some(Value::Null) => Presence::Empty,
        Some(Value::String(s)) if s.is_empty() => Presence::Empty,
        Some(Value::Object(map)) if map.is_empty() => Presence::Empty,
        Some(Value::Array(items)) if items.is_empty() => Presence::Empty,
        Some(_) => Presence::Present,
    }
}

impl FieldSpec {
    /// Required/nullable evaluation, run before the semantic check.
    ///
    /// An absent key is treated as the kind-appropriate empty value unless
    /// the field is required.
    pub fn validate_required_nullable(&self, value: Option<&Value>) -> Result<Presence, String> {
        let presence = match presence(value) {
            Presence::Missing if self.required => {
                return Err("field is required".to_string());
            }
            Presence::Missing => Presence::Empty,
            other => other,
        };

        if presence == Presence::Empty && !self.nullable {
            return Err("field must not be empty".to_string());
        }

        Ok(presence)
    }

    /// Kind-specific constraint check. No side effects beyond the error.
    pub fn validate_semantics(&self, value: &Value) -> Result<(), String> {
        match self.kind {
            FieldKind::Text => expect_str(value).map(|_| ()),
            FieldKind::Arguments => match value {
                Value::Object(_) => Ok(()),
                _ => Err("value must be a mapping".to_string()),
            },
            FieldKind::Email => {
                let text = expect_str(value)?;
                if text.contains('@') {
                    Ok(())
                } else {
                    Err("value must be an email address".to_string())
                }
            }
            FieldKind::Phone => {
                let digits = phone_digits(value)?;
                if digits.len() == 11 && digits.starts_with('7') {
                    Ok(())
                } else {
                    Err("phone number must be 11 characters and begin with 7".to_string())
                }
            }
            FieldKind::Date => parse_date(value).map(|_| ()),
            FieldKind::BirthDay => {
                let date = parse_date(value)?;
                let today = Local::now().date_naive();
                if date > today {
                    return Err("birthday must not be in the future".to_string());
                }
                if date < years_before(today, 70) {
                    return Err("birthday must be within the last 70 years".to_string());
                }
                Ok(())
            }
            FieldKind::Gender => {
                let number = value
                    .as_i64()
                    .ok_or_else(|| "value must be an integer 0, 1 or 2".to_string())?;
                Gender::from_wire(number)
                    .map(|_| ())
                    .ok_or_else(|| "value must be an integer 0, 1 or 2".to_string())
            }
            FieldKind::ClientIds => {
                let items = value
                    .as_array()
                    .ok_or_else(|| "value must be a list".to_string())?;
                for item in items {
                    let number = item
                        .as_i64()
                        .ok_or_else(|| "list must contain integers".to_string())?;
                    if number < 0 {
                        return Err("list must contain non-negative integers".to_string());
                    }
                }
                Ok(())
            }
        }
    }
}

fn expect_str(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| "value must be a string".to_string())
}

/// Phone fields accept a string or an integer; either way the check runs
/// against the decimal-string form.
fn phone_digits(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => Ok(n.to_string()),
        _ => Err("value must be a string or an integer".to_string()),
    }
}

fn parse_date(value: &Value) -> Result<NaiveDate, String> {
    let text = expect_str(value)?;
    NaiveDate::parse_from_str(text, "%d.%m.%Y")
        .map_err(|_| "date must be a string in DD.MM.YYYY format".to_string())
}

/// The date exactly `years` years before `date` at the same month/day.
/// Feb 29 against a non-leap target year lands on Mar 1.
fn years_before(date: NaiveDate, years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() - years, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(date.year() - years, 3, 1))
        .unwrap_or(date)
}
