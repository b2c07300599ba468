use serde::Serialize;

/// JSON style for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Minified,
    Pretty,
}

impl OutputFormat {
    /// Parse the `output.format` setting; unknown values fall back to minified.
    #[must_use]
    pub fn from_setting(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Minified,
        }
    }
}

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format_error(&e))
}

/// Format a result in the requested style.
pub fn format_as<T: Serialize>(result: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Minified => format_json(result),
        OutputFormat::Pretty => {
            serde_json::to_string_pretty(result).unwrap_or_else(|e| format_error(&e))
        }
    }
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
