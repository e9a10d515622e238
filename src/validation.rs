//! Request payload validation.
//!
//! Payloads arrive as raw JSON and are checked in two passes: serde enforces
//! shape (types, required keys, no unknown keys) and `validator` enforces the
//! field rules. Either failure is a 400 before the repository is touched.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Number, Value};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::database::models::{Profile, UserChanges, UserDocument};
use crate::error::{ApiError, FieldErrors};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProfileRequest {
    pub code: String,
    #[serde(rename = "profileName")]
    pub profile_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    pub age: Number,
    #[validate(nested)]
    pub profile: ProfileRequest,
}

/// Same fields as create, all optional. `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(email(message = "email must be an email"))]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<Number>,
    #[serde(default)]
    #[validate(nested)]
    pub profile: Option<ProfileRequest>,
}

impl From<ProfileRequest> for Profile {
    fn from(req: ProfileRequest) -> Self {
        Profile {
            code: req.code,
            profile_name: req.profile_name,
        }
    }
}

impl From<CreateUserRequest> for UserDocument {
    fn from(req: CreateUserRequest) -> Self {
        UserDocument {
            name: req.name,
            email: req.email,
            age: req.age,
            profile: req.profile.into(),
        }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            name: req.name,
            email: req.email,
            age: req.age,
            profile: req.profile.map(Profile::from),
        }
    }
}

/// Validate a create payload into a document ready to insert
pub fn validate_create(payload: Value) -> Result<UserDocument, ApiError> {
    let request: CreateUserRequest = parse(payload)?;
    request.validate().map_err(rule_error)?;
    Ok(request.into())
}

/// Validate a partial update payload; only present fields are checked
pub fn validate_update(payload: Value) -> Result<UserChanges, ApiError> {
    let request: UpdateUserRequest = parse(payload)?;
    request.validate().map_err(rule_error)?;
    Ok(request.into())
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    if !payload.is_object() {
        return Err(ApiError::validation_error("Request body must be a JSON object", None));
    }
    serde_json::from_value(payload).map_err(|e| ApiError::validation_error(e.to_string(), None))
}

fn rule_error(errors: ValidationErrors) -> ApiError {
    let mut fields = FieldErrors::new();
    collect_field_errors(&errors, "", &mut fields);
    ApiError::validation_error("Validation failed", Some(fields))
}

/// Flatten nested validator output into dotted paths, e.g. `profile.code`
fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages: Vec<String> = list
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{} is invalid ({})", path, e.code),
                    })
                    .collect();
                out.insert(path, messages.join("; "));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{}.{}", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_user() -> Value {
        json!({
            "name": "Juan Pérez",
            "email": "rodri22@example.com",
            "age": 25,
            "profile": { "code": "P-002", "profileName": "basic" }
        })
    }

    fn field_errors(err: ApiError) -> FieldErrors {
        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => fields,
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_create() {
        let doc = validate_create(valid_user()).unwrap();
        assert_eq!(doc.name, "Juan Pérez");
        assert_eq!(doc.age, Number::from(25));
        assert_eq!(doc.profile.profile_name, "basic");
    }

    #[test]
    fn keeps_fractional_age() {
        let mut payload = valid_user();
        payload["age"] = json!(25.5);
        let doc = validate_create(payload).unwrap();
        assert_eq!(doc.age.as_f64(), Some(25.5));
    }

    #[test]
    fn rejects_empty_email() {
        let mut payload = valid_user();
        payload["email"] = json!("");
        let fields = field_errors(validate_create(payload).unwrap_err());
        assert_eq!(fields.get("email").map(String::as_str), Some("email must be an email"));
    }

    #[test]
    fn rejects_malformed_email() {
        let mut payload = valid_user();
        payload["email"] = json!("not-an-email");
        let err = validate_create(payload).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(field_errors(err).contains_key("email"));
    }

    #[test]
    fn rejects_empty_name() {
        let mut payload = valid_user();
        payload["name"] = json!("");
        let fields = field_errors(validate_create(payload).unwrap_err());
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn rejects_missing_field() {
        let mut payload = valid_user();
        payload.as_object_mut().unwrap().remove("email");
        let err = validate_create(payload).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("email"), "{}", err.message());
    }

    #[test]
    fn rejects_wrong_type() {
        let mut payload = valid_user();
        payload["age"] = json!("twenty five");
        assert_eq!(validate_create(payload).unwrap_err().status_code(), 400);

        let mut payload = valid_user();
        payload["name"] = json!(42);
        assert_eq!(validate_create(payload).unwrap_err().status_code(), 400);
    }

    #[test]
    fn rejects_unknown_fields() {
        let mut payload = valid_user();
        payload["role"] = json!("admin");
        let err = validate_create(payload).unwrap_err();
        assert!(err.message().contains("role"), "{}", err.message());

        let mut payload = valid_user();
        payload["profile"]["level"] = json!(3);
        assert!(validate_create(payload).is_err());
    }

    #[test]
    fn rejects_incomplete_profile() {
        let mut payload = valid_user();
        payload["profile"] = json!({ "code": "P-002" });
        assert!(validate_create(payload).is_err());
    }

    #[test]
    fn rejects_non_object_body() {
        assert!(validate_create(json!([1, 2, 3])).is_err());
        assert!(validate_update(json!("name")).is_err());
    }

    #[test]
    fn update_accepts_partial_payload() {
        let changes = validate_update(json!({ "age": 30 })).unwrap();
        assert_eq!(changes.age, Some(Number::from(30)));
        assert!(changes.name.is_none());
        assert!(changes.profile.is_none());

        assert!(validate_update(json!({})).unwrap().is_empty());
    }

    #[test]
    fn update_treats_null_as_absent() {
        let changes = validate_update(json!({ "name": null, "age": 31 })).unwrap();
        assert!(changes.name.is_none());
        assert_eq!(changes.age, Some(Number::from(31)));
    }

    #[test]
    fn update_validates_present_fields() {
        let fields = field_errors(validate_update(json!({ "email": "nope" })).unwrap_err());
        assert!(fields.contains_key("email"));

        assert!(validate_update(json!({ "name": "" })).is_err());
        assert!(validate_update(json!({ "age": "old" })).is_err());
        assert!(validate_update(json!({ "nickname": "JP" })).is_err());
        assert!(validate_update(json!({ "profile": { "profileName": "basic" } })).is_err());
    }
}
