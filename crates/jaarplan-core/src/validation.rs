//! Helpers for turning `validator` failures into user-facing messages.

use validator::ValidationErrors;

/// Flattens field errors into a single comma-separated message, preferring
/// the message attached to each error and falling back to `<field> is invalid`.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| format!("{path}: {msg}"))
                        .unwrap_or_else(|| format!("{path} is invalid"))
                }));
            }
            validator::ValidationErrorsKind::Struct(nested) => {
                collect_messages(nested, &path, out);
            }
            validator::ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}
