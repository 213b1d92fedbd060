//! JSON response envelope.
//!
//! Every response body, success or failure, has the same top-level shape:
//!
//! ```json
//! { "success": true, "message": "...", "data": {...}, "total": 3, "errors": ["..."] }
//! ```
//!
//! Only `success` is always present; the other members are omitted when unset.

use serde::{Deserialize, Serialize};

/// The response body wrapper shared by every endpoint.
///
/// # Example
///
/// ```
/// use pacientes_rest::responses::Envelope;
///
/// let body = serde_json::to_value(Envelope::success(vec![1, 2]).with_total(2)).unwrap();
/// assert_eq!(body, serde_json::json!({"success": true, "data": [1, 2], "total": 2}));
///
/// let body = serde_json::to_value(Envelope::failure("route not found")).unwrap();
/// assert_eq!(body, serde_json::json!({"success": false, "message": "route not found"}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = ()> {
    /// Whether the request succeeded.
    pub success: bool,

    /// Human-readable outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Number of items in `data`, for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    /// Itemized validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    /// A successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            total: None,
            errors: None,
        }
    }

    /// Sets the outcome message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the item count.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

impl Envelope {
    /// A failed response with only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            total: None,
            errors: None,
        }
    }

    /// Attaches itemized validation messages.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }
}
