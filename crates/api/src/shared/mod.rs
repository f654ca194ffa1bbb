pub mod usecase;

/// Value of a request field, `None` when absent or blank. The value itself
/// is not trimmed so passwords reach the auth service unchanged.
pub fn required_field(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
