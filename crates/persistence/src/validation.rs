//! Patient record validation.
//!
//! [`validate_patient`] checks an arbitrary JSON payload against the field
//! constraints of the `pacientes` table and returns either a normalized
//! [`NewPatient`] or every field failure it found. It never touches storage.
//!
//! | field | rule |
//! |-------|------|
//! | `nombre` | string, trimmed length 2..=50 |
//! | `apellido` | string, trimmed length 2..=50 |
//! | `peso` | number (or numeric string), > 0, <= 500 |
//! | `talla` | number (or numeric string), > 0, <= 3 |
//! | `diagnostico` | string, trimmed length 4..=500 |
//!
//! Keys outside these five are rejected.
//!
//! # Example
//!
//! ```
//! use pacientes_persistence::validation::validate_patient;
//! use serde_json::json;
//!
//! let ok = validate_patient(&json!({
//!     "nombre": " Ana ",
//!     "apellido": "Lopez",
//!     "peso": 60,
//!     "talla": "1.65",
//!     "diagnostico": "Routine checkup"
//! }))
//! .unwrap();
//! assert_eq!(ok.nombre, "Ana");
//! assert_eq!(ok.talla, 1.65);
//!
//! let err = validate_patient(&json!({ "nombre": "A" })).unwrap_err();
//! assert!(err.messages().iter().any(|m| m.starts_with("nombre")));
//! ```

use serde_json::{Map, Value};

use crate::error::{ValidationDetail, ValidationError};
use crate::types::NewPatient;

/// Payload keys accepted by the validator, in reporting order.
pub const FIELDS: [&str; 5] = ["nombre", "apellido", "peso", "talla", "diagnostico"];

/// Length bounds for a text field, counted in characters after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    /// Minimum trimmed length.
    pub min: usize,
    /// Maximum trimmed length.
    pub max: usize,
}

/// Upper bound (and unit, for messages) of a positive numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRule {
    /// Inclusive maximum.
    pub max: f64,
    /// Unit shown in the "cannot exceed" message.
    pub unit: &'static str,
}

/// Field constraints applied by [`ValidationRules::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    /// `nombre` bounds.
    pub nombre: TextRule,
    /// `apellido` bounds.
    pub apellido: TextRule,
    /// `peso` bounds.
    pub peso: NumberRule,
    /// `talla` bounds.
    pub talla: NumberRule,
    /// `diagnostico` bounds.
    pub diagnostico: TextRule,
}

impl ValidationRules {
    /// Rules enforced by the server. These are authoritative.
    pub const SERVER: Self = Self {
        nombre: TextRule { min: 2, max: 50 },
        apellido: TextRule { min: 2, max: 50 },
        peso: NumberRule {
            max: 500.0,
            unit: "kg",
        },
        talla: NumberRule {
            max: 3.0,
            unit: "m",
        },
        diagnostico: TextRule { min: 4, max: 500 },
    };

    /// Rules mirrored by the client before submitting.
    ///
    /// The client requires a diagnosis of at least 5 characters while the
    /// server accepts 4. The two are intentionally left unreconciled.
    pub const CLIENT: Self = Self {
        diagnostico: TextRule { min: 5, max: 500 },
        ..Self::SERVER
    };

    /// Validates `payload`, collecting every failing field.
    pub fn validate(&self, payload: &Value) -> Result<NewPatient, ValidationError> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationError::InvalidRecord {
                details: vec![ValidationDetail::new(
                    "payload",
                    "payload must be a JSON object",
                )],
            });
        };

        let mut details = Vec::new();

        let nombre = check_text(object, "nombre", self.nombre, &mut details);
        let apellido = check_text(object, "apellido", self.apellido, &mut details);
        let peso = check_number(object, "peso", self.peso, &mut details);
        let talla = check_number(object, "talla", self.talla, &mut details);
        let diagnostico = check_text(object, "diagnostico", self.diagnostico, &mut details);

        let mut unknown: Vec<&String> = object
            .keys()
            .filter(|key| !FIELDS.contains(&key.as_str()))
            .collect();
        unknown.sort();
        for key in unknown {
            details.push(ValidationDetail::new(
                key.as_str(),
                format!("{} is not allowed", key),
            ));
        }

        match (nombre, apellido, peso, talla, diagnostico) {
            (Some(nombre), Some(apellido), Some(peso), Some(talla), Some(diagnostico))
                if details.is_empty() =>
            {
                Ok(NewPatient {
                    nombre,
                    apellido,
                    peso,
                    talla,
                    diagnostico,
                })
            }
            _ => Err(ValidationError::InvalidRecord { details }),
        }
    }
}

/// Validates `payload` against [`ValidationRules::SERVER`].
pub fn validate_patient(payload: &Value) -> Result<NewPatient, ValidationError> {
    ValidationRules::SERVER.validate(payload)
}

fn check_text(
    object: &Map<String, Value>,
    field: &str,
    rule: TextRule,
    details: &mut Vec<ValidationDetail>,
) -> Option<String> {
    let raw = match object.get(field) {
        None | Some(Value::Null) => {
            details.push(ValidationDetail::new(field, format!("{} is required", field)));
            return None;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            details.push(ValidationDetail::new(
                field,
                format!("{} must be a string", field),
            ));
            return None;
        }
    };

    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        details.push(ValidationDetail::new(field, format!("{} is required", field)));
        None
    } else if len < rule.min {
        details.push(ValidationDetail::new(
            field,
            format!("{} must be at least {} characters long", field, rule.min),
        ));
        None
    } else if len > rule.max {
        details.push(ValidationDetail::new(
            field,
            format!("{} must be at most {} characters long", field, rule.max),
        ));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn check_number(
    object: &Map<String, Value>,
    field: &str,
    rule: NumberRule,
    details: &mut Vec<ValidationDetail>,
) -> Option<f64> {
    let value = match object.get(field) {
        None | Some(Value::Null) => {
            details.push(ValidationDetail::new(field, format!("{} is required", field)));
            return None;
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            details.push(ValidationDetail::new(field, format!("{} is required", field)));
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let Some(value) = value.filter(|v| v.is_finite()) else {
        details.push(ValidationDetail::new(
            field,
            format!("{} must be a number", field),
        ));
        return None;
    };

    if value <= 0.0 {
        details.push(ValidationDetail::new(
            field,
            format!("{} must be a positive number", field),
        ));
        None
    } else if value > rule.max {
        details.push(ValidationDetail::new(
            field,
            format!("{} cannot exceed {} {}", field, rule.max, rule.unit),
        ));
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "nombre": "Ana",
            "apellido": "Lopez",
            "peso": 60,
            "talla": 1.65,
            "diagnostico": "Routine checkup"
        })
    }

    fn messages(payload: Value) -> Vec<String> {
        validate_patient(&payload).unwrap_err().messages()
    }

    #[test]
    fn test_valid_payload() {
        let patient = validate_patient(&valid_payload()).unwrap();
        assert_eq!(patient.nombre, "Ana");
        assert_eq!(patient.apellido, "Lopez");
        assert_eq!(patient.peso, 60.0);
        assert_eq!(patient.talla, 1.65);
        assert_eq!(patient.diagnostico, "Routine checkup");
    }

    #[test]
    fn test_strings_are_trimmed() {
        let mut payload = valid_payload();
        payload["nombre"] = json!("  Ana  ");
        payload["diagnostico"] = json!("\tFlu symptoms\n");
        let patient = validate_patient(&payload).unwrap();
        assert_eq!(patient.nombre, "Ana");
        assert_eq!(patient.diagnostico, "Flu symptoms");
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in FIELDS {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(field);
            let msgs = messages(payload);
            assert_eq!(msgs, vec![format!("{} is required", field)]);
        }
    }

    #[test]
    fn test_all_failures_are_collected_in_order() {
        let msgs = messages(json!({}));
        assert_eq!(
            msgs,
            vec![
                "nombre is required",
                "apellido is required",
                "peso is required",
                "talla is required",
                "diagnostico is required",
            ]
        );
    }

    #[test]
    fn test_nombre_too_short() {
        let mut payload = valid_payload();
        payload["nombre"] = json!("A");
        assert_eq!(
            messages(payload),
            vec!["nombre must be at least 2 characters long"]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut payload = valid_payload();
        payload["apellido"] = json!("   ");
        assert_eq!(messages(payload), vec!["apellido is required"]);
    }

    #[test]
    fn test_trimmed_length_is_checked() {
        let mut payload = valid_payload();
        payload["nombre"] = json!(" A ");
        assert_eq!(
            messages(payload),
            vec!["nombre must be at least 2 characters long"]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut payload = valid_payload();
        payload["nombre"] = json!("Ñ".repeat(50));
        assert!(validate_patient(&payload).is_ok());

        payload["nombre"] = json!("Ñ".repeat(51));
        assert_eq!(
            messages(payload),
            vec!["nombre must be at most 50 characters long"]
        );
    }

    #[test]
    fn test_text_boundaries() {
        let mut payload = valid_payload();
        payload["apellido"] = json!("Li");
        payload["diagnostico"] = json!("Flu.");
        assert!(validate_patient(&payload).is_ok());

        payload["diagnostico"] = json!("x".repeat(500));
        assert!(validate_patient(&payload).is_ok());

        payload["diagnostico"] = json!("x".repeat(501));
        assert_eq!(
            messages(payload),
            vec!["diagnostico must be at most 500 characters long"]
        );
    }

    #[test]
    fn test_diagnostico_minimum() {
        let mut payload = valid_payload();
        payload["diagnostico"] = json!("Flu");
        assert_eq!(
            messages(payload),
            vec!["diagnostico must be at least 4 characters long"]
        );
    }

    #[test]
    fn test_non_string_text_field() {
        let mut payload = valid_payload();
        payload["nombre"] = json!(42);
        assert_eq!(messages(payload), vec!["nombre must be a string"]);
    }

    #[test]
    fn test_peso_limits() {
        let mut payload = valid_payload();
        payload["peso"] = json!(500);
        assert!(validate_patient(&payload).is_ok());

        payload["peso"] = json!(500.5);
        assert_eq!(messages(payload.clone()), vec!["peso cannot exceed 500 kg"]);

        payload["peso"] = json!(0);
        assert_eq!(
            messages(payload.clone()),
            vec!["peso must be a positive number"]
        );

        payload["peso"] = json!(-10);
        assert_eq!(messages(payload), vec!["peso must be a positive number"]);
    }

    #[test]
    fn test_talla_limits() {
        let mut payload = valid_payload();
        payload["talla"] = json!(3);
        assert!(validate_patient(&payload).is_ok());

        payload["talla"] = json!(3.01);
        assert_eq!(messages(payload), vec!["talla cannot exceed 3 m"]);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let mut payload = valid_payload();
        payload["peso"] = json!("72.5");
        payload["talla"] = json!(" 1.80 ");
        let patient = validate_patient(&payload).unwrap();
        assert_eq!(patient.peso, 72.5);
        assert_eq!(patient.talla, 1.8);
    }

    #[test]
    fn test_non_numeric_values() {
        let mut payload = valid_payload();
        payload["peso"] = json!("heavy");
        payload["talla"] = json!(true);
        assert_eq!(
            messages(payload),
            vec!["peso must be a number", "talla must be a number"]
        );
    }

    #[test]
    fn test_non_finite_string_is_rejected() {
        let mut payload = valid_payload();
        payload["peso"] = json!("NaN");
        payload["talla"] = json!("inf");
        assert_eq!(
            messages(payload),
            vec!["peso must be a number", "talla must be a number"]
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut payload = valid_payload();
        payload["id"] = json!(99);
        payload["fecha_registro"] = json!("2020-01-01T00:00:00Z");
        assert_eq!(
            messages(payload),
            vec!["fecha_registro is not allowed", "id is not allowed"]
        );
    }

    #[test]
    fn test_non_object_payload() {
        let err = validate_patient(&json!(["Ana"])).unwrap_err();
        assert_eq!(err.messages(), vec!["payload must be a JSON object"]);
        assert_eq!(err.details()[0].field, "payload");
    }

    #[test]
    fn test_details_carry_field_names() {
        let err = validate_patient(&json!({"nombre": "A", "peso": 900})).unwrap_err();
        let fields: Vec<_> = err.details().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["nombre", "apellido", "peso", "talla", "diagnostico"]
        );
    }

    #[test]
    fn test_client_rules_are_stricter_on_diagnostico() {
        let mut payload = valid_payload();
        payload["diagnostico"] = json!("Flu.");
        assert!(ValidationRules::SERVER.validate(&payload).is_ok());

        let err = ValidationRules::CLIENT.validate(&payload).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["diagnostico must be at least 5 characters long"]
        );
        assert_eq!(ValidationRules::CLIENT.nombre, ValidationRules::SERVER.nombre);
    }
}
