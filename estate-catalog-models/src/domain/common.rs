use validator::ValidationError;

/// Builds a schema-level validation error whose message survives into the
/// HTTP error body unchanged.
pub(crate) fn schema_error(code: &'static str, message: &str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    err
}
