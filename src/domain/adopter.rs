//! Adopter domain entity and related types.
//!
//! CPF, CEP and phone are persisted in their canonical masks; the
//! request types accept any punctuation and are normalized before storage.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::formatters::{digits_only, format_cep, format_cpf, format_phone};
use super::validate_not_blank;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Adopter domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Adopter {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "(11) 98765-4321")]
    pub phone: String,
    pub sex: String,
    pub rg: String,
    #[schema(example = "123.456.789-01")]
    pub cpf: String,
    pub marital_status: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    #[schema(example = "01310-100")]
    pub cep: String,
    pub has_pets: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Adopter {
    /// Case-insensitive match on name, email, phone, CPF or RG.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.phone, &self.cpf, &self.rg]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Identity fields that must be unique across adopters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdopterIdentity {
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Adopter registration data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewAdopter {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    #[schema(example = "Maria Silva")]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "maria@example.com")]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Sex is required"))]
    pub sex: String,
    #[validate(custom(function = "validate_rg"))]
    pub rg: String,
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,
    #[validate(length(min = 1, message = "Marital status is required"))]
    pub marital_status: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "Number is required"))]
    pub number: String,
    #[serde(default)]
    pub complement: String,
    #[validate(custom(function = "validate_cep"))]
    pub cep: String,
    #[serde(default)]
    pub has_pets: bool,
    #[serde(default)]
    pub notes: String,
}

impl NewAdopter {
    /// Apply canonical masks and trim free text.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.cpf = format_cpf(&self.cpf);
        self.cep = format_cep(&self.cep);
        self.phone = format_phone(&self.phone);
        self.rg = digits_only(&self.rg);
        self
    }

    pub fn identity(&self) -> AdopterIdentity {
        AdopterIdentity {
            cpf: Some(self.cpf.clone()),
            rg: Some(self.rg.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
        }
    }
}

/// Partial adopter update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdopterChanges {
    #[validate(custom(function = "validate_not_blank", message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Sex cannot be empty"))]
    pub sex: Option<String>,
    #[validate(custom(function = "validate_rg"))]
    pub rg: Option<String>,
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,
    #[validate(length(min = 1, message = "Marital status cannot be empty"))]
    pub marital_status: Option<String>,
    #[validate(length(min = 1, message = "State cannot be empty"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "District cannot be empty"))]
    pub district: Option<String>,
    #[validate(length(min = 1, message = "Street cannot be empty"))]
    pub street: Option<String>,
    #[validate(length(min = 1, message = "Number cannot be empty"))]
    pub number: Option<String>,
    pub complement: Option<String>,
    #[validate(custom(function = "validate_cep"))]
    pub cep: Option<String>,
    pub has_pets: Option<bool>,
    pub notes: Option<String>,
}

impl AdopterChanges {
    /// Apply canonical masks to the fields being changed.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.map(|v| v.trim().to_string());
        self.email = self.email.map(|v| v.trim().to_lowercase());
        self.cpf = self.cpf.as_deref().map(format_cpf);
        self.cep = self.cep.as_deref().map(format_cep);
        self.phone = self.phone.as_deref().map(format_phone);
        self.rg = self.rg.as_deref().map(digits_only);
        self
    }

    pub fn identity(&self) -> AdopterIdentity {
        AdopterIdentity {
            cpf: self.cpf.clone(),
            rg: self.rg.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn digit_count_between(value: &str, min: usize, max: usize) -> bool {
    let count = digits_only(value).len();
    count >= min && count <= max
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL.is_match(value.trim()) {
        Ok(())
    } else {
        Err(invalid("email", "Invalid email address"))
    }
}

fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if digit_count_between(value, 11, 11) {
        Ok(())
    } else {
        Err(invalid("cpf", "CPF must have 11 digits"))
    }
}

fn validate_rg(value: &str) -> Result<(), ValidationError> {
    if digit_count_between(value, 5, 12) {
        Ok(())
    } else {
        Err(invalid("rg", "RG must have between 5 and 12 digits"))
    }
}

fn validate_cep(value: &str) -> Result<(), ValidationError> {
    if digit_count_between(value, 8, 8) {
        Ok(())
    } else {
        Err(invalid("cep", "CEP must have 8 digits"))
    }
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if digit_count_between(value, 10, 11) {
        Ok(())
    } else {
        Err(invalid("phone", "Phone must have 10 or 11 digits"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_adopter() -> NewAdopter {
        NewAdopter {
            name: " Maria Silva ".to_string(),
            email: "Maria@Example.com".to_string(),
            phone: "11987654321".to_string(),
            sex: "F".to_string(),
            rg: "12.345.678-9".to_string(),
            cpf: "12345678901".to_string(),
            marital_status: "Solteira".to_string(),
            state: "SP".to_string(),
            city: "São Paulo".to_string(),
            district: "Centro".to_string(),
            street: "Rua A".to_string(),
            number: "10".to_string(),
            complement: String::new(),
            cep: "01310100".to_string(),
            has_pets: false,
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_adopter_passes() {
        assert!(new_adopter().validate().is_ok());
    }

    #[test]
    fn test_field_rules() {
        let mut adopter = new_adopter();
        adopter.email = "maria@example".to_string();
        adopter.cpf = "123".to_string();
        adopter.rg = "1234".to_string();
        adopter.cep = "0131010".to_string();
        adopter.phone = "119876543".to_string();
        adopter.city = String::new();

        let errors = adopter.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["email", "cpf", "rg", "cep", "phone", "city"] {
            assert!(fields.contains_key(field), "expected error on {}", field);
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut adopter = new_adopter();
        adopter.name = "   ".to_string();
        let errors = adopter.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let changes = AdopterChanges {
            name: Some("\t ".to_string()),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }

    #[test]
    fn test_normalization_applies_masks() {
        let adopter = new_adopter().normalized();
        assert_eq!(adopter.name, "Maria Silva");
        assert_eq!(adopter.email, "maria@example.com");
        assert_eq!(adopter.cpf, "123.456.789-01");
        assert_eq!(adopter.cep, "01310-100");
        assert_eq!(adopter.phone, "(11) 98765-4321");
        assert_eq!(adopter.rg, "123456789");
    }

    #[test]
    fn test_changes_only_touch_present_fields() {
        let changes = AdopterChanges {
            cpf: Some("98765432100".to_string()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(changes.cpf.as_deref(), Some("987.654.321-00"));
        assert!(changes.phone.is_none());
        assert_eq!(changes.identity().email, None);
    }
}
