use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use registrar_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// `first_name` -> `firstName`, matching the JSON field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let name = camel_case(field);
            let message = errors
                .iter()
                .find_map(|error| error.message.as_ref().map(|msg| msg.to_string()))
                .unwrap_or_else(|| format!("{name} is invalid"));
            (name, message)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::bad_request(anyhow!("{} is required", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::bad_request(anyhow!("Invalid field type in request"));
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(anyhow!(
                        "Missing 'Content-Type: application/json' header"
                    ));
                }

                AppError::bad_request(anyhow!("Invalid request body"))
            })?;

        value.validate().map_err(|errors| {
            let fields = field_messages(&errors);
            let summary = fields
                .iter()
                .map(|(_, message)| message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            AppError::unprocessable(anyhow!("{summary}")).with_fields(fields)
        })?;

        Ok(ValidatedJson(value))
    }
}
