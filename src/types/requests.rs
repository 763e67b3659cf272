//! Request bodies and their boundary validation rules.

use crate::error::VeridianError;
use crate::middleware::validate::ValidateRequest;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

const MIN_FIELD_LENGTH: usize = 5;

/// Body of `POST /api/v1/auth`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email_address: String,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl ValidateRequest for CreateAccountRequest {
    fn validate(&self) -> Result<(), VeridianError> {
        require_email(&self.email_address)?;
        require_min_length("username", "Username", &self.username)?;
        require_min_length("password", "Password", &self.password)?;
        require_min_length("name", "Name", &self.name)?;
        Ok(())
    }
}

/// Body of `PUT /api/v1/user`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub name: String,
}

impl ValidateRequest for UpdateUserRequest {
    fn validate(&self) -> Result<(), VeridianError> {
        require_min_length("username", "Username", &self.username)?;
        require_min_length("name", "Name", &self.name)?;
        Ok(())
    }
}

/// Body of `PUT /api/v1/user/email`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    pub email_address: String,
}

impl ValidateRequest for UpdateEmailRequest {
    fn validate(&self) -> Result<(), VeridianError> {
        require_email(&self.email_address)
    }
}

/// Body of `PUT /api/v1/user/profile-image`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileImageRequest {
    pub image_link: String,
    pub storage_uuid: String,
}

impl ValidateRequest for UpdateProfileImageRequest {
    fn validate(&self) -> Result<(), VeridianError> {
        if Url::parse(&self.image_link).is_err() {
            return Err(VeridianError::Validation(
                "Image URL is not a valid URL.".to_string(),
            ));
        }
        if Uuid::parse_str(&self.storage_uuid).is_err() {
            return Err(VeridianError::Validation(
                "Storage UUID is not a valid UUID.".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_min_length(field: &str, label: &str, value: &str) -> Result<(), VeridianError> {
    if value.is_empty() {
        return Err(VeridianError::Validation(format!(
            "Please enter a {field}."
        )));
    }
    if value.chars().count() < MIN_FIELD_LENGTH {
        return Err(VeridianError::Validation(format!(
            "{label} should be at least {MIN_FIELD_LENGTH} characters long."
        )));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), VeridianError> {
    if value.is_empty() {
        return Err(VeridianError::Validation(
            "Please enter an email address.".to_string(),
        ));
    }
    if !is_email(value) {
        return Err(VeridianError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

/// Shape check only: non-empty local part, a domain with a dot, no spaces.
fn is_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateAccountRequest {
        CreateAccountRequest {
            email_address: "a@x.com".to_string(),
            username: "abcde".to_string(),
            password: "abcde".to_string(),
            name: "abcde".to_string(),
        }
    }

    #[test]
    fn accepts_minimal_valid_registration() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "plainaddress", "a@b", "a @x.com", "@x.com", "a@.com"] {
            let mut req = base_request();
            req.email_address = bad.to_string();
            assert!(req.validate().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_short_fields_with_field_message() {
        let mut req = base_request();
        req.username = "abcd".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Username"));

        let mut req = base_request();
        req.password = String::new();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn profile_image_fields_must_parse() {
        let ok = UpdateProfileImageRequest {
            image_link: "https://cdn.example.com/a.png".to_string(),
            storage_uuid: "c56a4180-65aa-42ec-a945-5fd21dec0538".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_url = UpdateProfileImageRequest {
            image_link: "not a url".to_string(),
            ..ok.clone()
        };
        assert!(bad_url.validate().is_err());

        let bad_uuid = UpdateProfileImageRequest {
            storage_uuid: "not-a-uuid".to_string(),
            ..ok
        };
        assert!(bad_uuid.validate().is_err());
    }
}
