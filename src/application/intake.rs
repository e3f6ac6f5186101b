//! Intake: reading a clinical input from a request body.

use std::io::Read;

use crate::domain::ClinicalInput;
use crate::CardioError;

/// Read a JSON clinical input from `reader`.
///
/// With `validate`, missing or out-of-range fields are rejected; without it
/// the input is passed through as-is and bad fields simply score nothing.
///
/// # Errors
/// Returns `CardioError::Io` if reading fails, `CardioError::Serialization`
/// if the body is not a JSON object, and `CardioError::Validation` listing
/// every problem when validation is requested and fails.
pub fn read_input<R: Read>(mut reader: R, validate: bool) -> Result<ClinicalInput, CardioError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let input = ClinicalInput::from_json_str(&text)?;

    if validate {
        input
            .validate()
            .map_err(|errors| CardioError::Validation(errors.join("; ")))?;
    } else if !input.missing_fields().is_empty() {
        tracing::warn!(
            "Input has {} missing or non-numeric field(s)",
            input.missing_fields().len()
        );
    }

    Ok(input)
}
