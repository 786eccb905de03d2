//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// An unset variable without a default is an error. Bare `$VAR` is left
/// alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // Unset variables resolve to `None` so `:-` defaults apply; anything
    // still wrapped in `${...}` afterwards had no default.
    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok());

    if let Some(start) = expanded.find("${") {
        let rest = &expanded[start + 2..];
        let name = rest.split(['}', ':']).next().unwrap_or(rest);
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(expanded.into_owned())
}
