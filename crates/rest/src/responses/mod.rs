//! Response formatting for the patient registry API.
//!
//! - [`envelope`] - The `{success, message, data, total, errors}` body shape

pub mod envelope;

pub use envelope::Envelope;
