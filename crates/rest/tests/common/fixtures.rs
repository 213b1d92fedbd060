//! Patient payload fixtures.

use serde_json::{Value, json};

/// A payload that passes every server rule.
pub fn valid_payload() -> Value {
    json!({
        "nombre": "Ana",
        "apellido": "Lopez",
        "peso": 60,
        "talla": 1.65,
        "diagnostico": "Routine checkup"
    })
}

/// A valid payload with a different name.
pub fn payload_named(nombre: &str, apellido: &str) -> Value {
    let mut payload = valid_payload();
    payload["nombre"] = json!(nombre);
    payload["apellido"] = json!(apellido);
    payload
}

/// A valid payload with one field replaced.
pub fn payload_with(field: &str, value: Value) -> Value {
    let mut payload = valid_payload();
    payload[field] = value;
    payload
}

/// A valid payload with one field removed.
pub fn payload_without(field: &str) -> Value {
    let mut payload = valid_payload();
    if let Some(obj) = payload.as_object_mut() {
        obj.remove(field);
    }
    payload
}
