//! Staff member domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::image::ImageUpload;
use super::validate_not_blank;

/// Fixed set of staff roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum StaffRole {
    #[serde(rename = "Coordenador Geral")]
    GeneralCoordinator,
    #[serde(rename = "Veterinário")]
    Veterinarian,
    #[serde(rename = "Auxiliar de Veterinário")]
    VeterinaryAssistant,
    #[serde(rename = "Voluntário")]
    Volunteer,
    #[serde(rename = "Cuidador de Animais")]
    Caretaker,
    #[serde(rename = "Assistente Administrativo")]
    AdministrativeAssistant,
    #[serde(rename = "Responsável por Adoções")]
    AdoptionOfficer,
    #[serde(rename = "Marketing/Comunicação")]
    Marketing,
    #[serde(rename = "Financeiro")]
    Finance,
}

impl StaffRole {
    pub const ALL: [StaffRole; 9] = [
        StaffRole::GeneralCoordinator,
        StaffRole::Veterinarian,
        StaffRole::VeterinaryAssistant,
        StaffRole::Volunteer,
        StaffRole::Caretaker,
        StaffRole::AdministrativeAssistant,
        StaffRole::AdoptionOfficer,
        StaffRole::Marketing,
        StaffRole::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::GeneralCoordinator => "Coordenador Geral",
            StaffRole::Veterinarian => "Veterinário",
            StaffRole::VeterinaryAssistant => "Auxiliar de Veterinário",
            StaffRole::Volunteer => "Voluntário",
            StaffRole::Caretaker => "Cuidador de Animais",
            StaffRole::AdministrativeAssistant => "Assistente Administrativo",
            StaffRole::AdoptionOfficer => "Responsável por Adoções",
            StaffRole::Marketing => "Marketing/Comunicação",
            StaffRole::Finance => "Financeiro",
        }
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaffRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown staff role '{}'", s))
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    /// `None` when the stored label is not a known role
    pub role: Option<StaffRole>,
    pub email: String,
    pub phone: String,
    pub sex: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    /// Case-insensitive match on name or role.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self
                .role
                .map(|role| role.as_str().to_lowercase().contains(&query))
                .unwrap_or(false)
    }
}

/// Staff registration data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewStaff {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    #[schema(example = "Ana Souza")]
    pub name: String,
    pub role: StaffRole,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Sex is required"))]
    pub sex: String,
    #[serde(default)]
    #[validate(nested)]
    pub image: Option<ImageUpload>,
}

/// Partial staff update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct StaffChanges {
    #[validate(custom(function = "validate_not_blank", message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Sex cannot be empty"))]
    pub sex: Option<String>,
    #[serde(skip)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        for role in StaffRole::ALL {
            assert_eq!(role.as_str().parse::<StaffRole>(), Ok(role));
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        assert!("Gerente".parse::<StaffRole>().is_err());
    }

    #[test]
    fn test_unknown_role_is_rejected_on_input() {
        let payload = serde_json::json!({
            "name": "Ana",
            "role": "Gerente",
            "email": "ana@example.com",
            "phone": "11999999999",
            "sex": "F"
        });
        assert!(serde_json::from_value::<NewStaff>(payload).is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let payload = serde_json::json!({
            "name": "  ",
            "role": "Veterinário",
            "email": "ana@example.com",
            "phone": "11999999999",
            "sex": "F"
        });
        let staff: NewStaff = serde_json::from_value(payload).unwrap();
        assert!(staff.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_search_on_role() {
        let now = Utc::now();
        let staff = Staff {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            role: Some(StaffRole::Veterinarian),
            email: String::new(),
            phone: String::new(),
            sex: "F".to_string(),
            image: None,
            created_at: now,
            updated_at: now,
        };
        assert!(staff.matches_search("veterin"));
        assert!(staff.matches_search("ana"));
        assert!(!staff.matches_search("financeiro"));
    }
}
