//! Request-shape validation for employee payloads.
//!
//! Raw JSON bodies are turned into typed inputs here and nowhere else. The
//! result is either the typed record or a map of field name to messages.

use std::collections::BTreeMap;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};
use crate::models::employee::{EmployeeUpdate, NewEmployee};

pub type FieldErrors = BTreeMap<String, Vec<String>>;

const REQUIRED: &str = "Required";
const EXPECTED_STRING: &str = "Expected string";
const EXPECTED_INTEGER: &str = "Expected integer";

#[derive(Debug, Default, Validate)]
struct EmployeeFields {
    #[validate(length(min = 1, message = "Name is required"))]
    name: Option<String>,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    email: Option<String>,
    #[validate(length(min = 1, message = "Position is required"))]
    position: Option<String>,
}

pub fn validate_new_employee(input: &Value) -> Result<NewEmployee, FieldErrors> {
    let empty = Map::new();
    let body = input.as_object().unwrap_or(&empty);
    let mut errors = FieldErrors::new();

    let fields = read_fields(body, &mut errors);
    for (key, value) in [
        ("name", &fields.name),
        ("email", &fields.email),
        ("position", &fields.position),
    ] {
        if value.is_none() && !errors.contains_key(key) {
            push_error(&mut errors, key, REQUIRED);
        }
    }
    check_rules(&fields, &mut errors);

    match (fields.name, fields.email, fields.position) {
        (Some(name), Some(email), Some(position)) if errors.is_empty() => Ok(NewEmployee {
            name,
            email,
            position,
        }),
        _ => Err(errors),
    }
}

pub fn validate_employee_update(input: &Value) -> Result<EmployeeUpdate, FieldErrors> {
    let empty = Map::new();
    let body = input.as_object().unwrap_or(&empty);
    let mut errors = FieldErrors::new();

    let id = match body.get("id") {
        None => {
            push_error(&mut errors, "id", REQUIRED);
            None
        }
        Some(value) => match value.as_i64() {
            Some(id) => Some(id),
            None => {
                push_error(&mut errors, "id", EXPECTED_INTEGER);
                None
            }
        },
    };

    let fields = read_fields(body, &mut errors);
    check_rules(&fields, &mut errors);

    match id {
        Some(id) if errors.is_empty() => Ok(EmployeeUpdate {
            id,
            name: fields.name,
            email: fields.email,
            position: fields.position,
        }),
        _ => Err(errors),
    }
}

fn read_fields(body: &Map<String, Value>, errors: &mut FieldErrors) -> EmployeeFields {
    EmployeeFields {
        name: read_string(body, "name", errors),
        email: read_string(body, "email", errors),
        position: read_string(body, "position", errors),
    }
}

// Absent and null both read as None; any other non-string is a type error.
fn read_string(body: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            push_error(errors, key, EXPECTED_STRING);
            None
        }
    }
}

fn check_rules(fields: &EmployeeFields, errors: &mut FieldErrors) {
    if let Err(err) = fields.validate() {
        merge_validation_errors(err, errors);
    }
}

fn merge_validation_errors(err: ValidationErrors, errors: &mut FieldErrors) {
    for (field, errs) in err.field_errors() {
        for e in errs.iter() {
            let message = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string());
            push_error(errors, field, &message);
        }
    }
}

fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}
