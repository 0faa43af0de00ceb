//! Validated user input.
//!
//! Each form mirrors one storefront input surface and carries its rules
//! as `validator` attributes. Services call
//! [`validator::Validate::validate`] before anything reaches the API and
//! turn failures into user-visible text with [`flatten_errors`].

pub mod auth;
pub mod profile;
pub mod search;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Builds a [`ValidationError`] with an attached user-facing message.
pub(crate) fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Flattens validator output into a single line of user-visible text.
///
/// Fields are sorted by path so the result is stable regardless of the
/// underlying map order. Nested forms contribute dotted paths such as
/// `shipping_address.zip`.
pub fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, None, &mut messages);
    messages.sort();
    messages.dedup();
    messages.join("; ")
}

fn collect_messages(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => (*field).to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let path = format!("{path}[{index}]");
                    collect_messages(nested, Some(&path), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Inner {
        #[validate(length(min = 1, message = "Kötelező mező"))]
        city: String,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(length(min = 1, message = "Kötelező mező"))]
        name: String,
        #[validate(nested)]
        address: Inner,
    }

    /// Nested failures show up under a dotted path, sorted by field.
    #[test]
    fn flatten_errors_walks_nested_forms() {
        let form = Outer {
            name: String::new(),
            address: Inner {
                city: String::new(),
            },
        };

        let errors = form.validate().unwrap_err();
        let text = flatten_errors(&errors);

        assert_eq!(text, "address.city: Kötelező mező; name: Kötelező mező");
    }

    /// Errors built without a message fall back to the error code.
    #[test]
    fn flatten_errors_defaults_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("zip", ValidationError::new("length"));

        assert_eq!(flatten_errors(&errors), "zip: length");
    }
}
