/// Failures a transform can surface to its caller.
///
/// Unresolvable or malformed constructs are never errors: they are left in
/// place as literal text. Only input the parser cannot read at all fails.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
