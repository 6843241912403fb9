//! Animal domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::image::ImageUpload;
use super::validate_not_blank;
use crate::config::{AGE_NOT_INFORMED, ANIMAL_SEXES, ANIMAL_SIZES, ANIMAL_SPECIES};

/// Shelter status of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum AnimalStatus {
    #[default]
    #[serde(rename = "Disponível")]
    Available,
    #[serde(rename = "Adotado")]
    Adopted,
    #[serde(rename = "Em andamento")]
    InProgress,
    #[serde(rename = "Em tratamento")]
    InTreatment,
}

impl AnimalStatus {
    pub const ALL: [AnimalStatus; 4] = [
        AnimalStatus::Available,
        AnimalStatus::Adopted,
        AnimalStatus::InProgress,
        AnimalStatus::InTreatment,
    ];

    /// Stored and displayed label
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Available => "Disponível",
            AnimalStatus::Adopted => "Adotado",
            AnimalStatus::InProgress => "Em andamento",
            AnimalStatus::InTreatment => "Em tratamento",
        }
    }
}

impl FromStr for AnimalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown animal status '{}'", s))
    }
}

impl fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animal domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Animal {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub size: String,
    pub sex: String,
    pub birth_date: Option<NaiveDate>,
    pub rescue_date: Option<NaiveDate>,
    pub status: AnimalStatus,
    /// Download URL or inline `data:` URL
    pub image: Option<String>,
    pub needs_vaccine: bool,
    pub needs_checkup: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Animal {
    /// Whole years since birth as of `today`.
    pub fn age_in_years(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?;
        let mut years = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        Some(years.max(0))
    }

    /// Human readable age, e.g. `"1 ano"`, `"3 anos"`.
    pub fn age_label(&self, today: NaiveDate) -> String {
        match self.age_in_years(today) {
            Some(1) => "1 ano".to_string(),
            Some(years) => format!("{} anos", years),
            None => AGE_NOT_INFORMED.to_string(),
        }
    }

    /// Case-insensitive match on name or breed.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.breed.to_lowercase().contains(&query)
    }
}

/// Animal with derived display fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnimalResponse {
    #[serde(flatten)]
    pub animal: Animal,
    /// Age label derived from the birth date
    #[schema(example = "3 anos")]
    pub age: String,
}

impl AnimalResponse {
    pub fn new(animal: Animal, today: NaiveDate) -> Self {
        let age = animal.age_label(today);
        Self { animal, age }
    }
}

/// Animal registration data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewAnimal {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    #[schema(example = "Rex")]
    pub name: String,
    #[validate(custom(function = "validate_species"))]
    #[schema(example = "cachorro")]
    pub species: String,
    #[validate(length(min = 1, message = "Breed is required"))]
    pub breed: String,
    #[validate(length(min = 1, message = "Color is required"))]
    pub color: String,
    #[validate(custom(function = "validate_size"))]
    #[schema(example = "medio")]
    pub size: String,
    #[validate(custom(function = "validate_sex"))]
    #[schema(example = "M")]
    pub sex: String,
    pub birth_date: NaiveDate,
    pub rescue_date: NaiveDate,
    /// Defaults to "Disponível"
    #[serde(default)]
    pub status: Option<AnimalStatus>,
    #[serde(default)]
    pub needs_vaccine: bool,
    #[serde(default)]
    pub needs_checkup: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub image: Option<ImageUpload>,
}

/// Partial animal update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AnimalChanges {
    #[validate(custom(function = "validate_not_blank", message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_species"))]
    pub species: Option<String>,
    #[validate(length(min = 1, message = "Breed cannot be empty"))]
    pub breed: Option<String>,
    #[validate(length(min = 1, message = "Color cannot be empty"))]
    pub color: Option<String>,
    #[validate(custom(function = "validate_size"))]
    pub size: Option<String>,
    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub rescue_date: Option<NaiveDate>,
    pub status: Option<AnimalStatus>,
    pub needs_vaccine: Option<bool>,
    pub needs_checkup: Option<bool>,
    pub notes: Option<String>,
    /// Resolved image reference; set by the service after upload
    #[serde(skip)]
    pub image: Option<String>,
}

/// Direct status change by staff
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AnimalStatusChange {
    pub status: AnimalStatus,
}

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let mut err = ValidationError::new(code);
    err.message = Some(format!("must be one of: {}", allowed.join(", ")).into());
    Err(err)
}

fn validate_species(value: &str) -> Result<(), ValidationError> {
    one_of(value, ANIMAL_SPECIES, "species")
}

fn validate_size(value: &str) -> Result<(), ValidationError> {
    one_of(value, ANIMAL_SIZES, "size")
}

fn validate_sex(value: &str) -> Result<(), ValidationError> {
    one_of(value, ANIMAL_SEXES, "sex")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn animal(birth_date: Option<NaiveDate>) -> Animal {
        let now = Utc::now();
        Animal {
            id: Uuid::new_v4(),
            name: "Rex".to_string(),
            species: "cachorro".to_string(),
            breed: "Vira-lata".to_string(),
            color: "caramelo".to_string(),
            size: "medio".to_string(),
            sex: "M".to_string(),
            birth_date,
            rescue_date: None,
            status: AnimalStatus::Available,
            image: None,
            needs_vaccine: false,
            needs_checkup: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let rex = animal(Some(date(2020, 6, 15)));
        assert_eq!(rex.age_in_years(date(2023, 6, 14)), Some(2));
        assert_eq!(rex.age_in_years(date(2023, 6, 15)), Some(3));
        assert_eq!(rex.age_label(date(2021, 7, 1)), "1 ano");
        assert_eq!(rex.age_label(date(2023, 7, 1)), "3 anos");
        assert_eq!(rex.age_label(date(2020, 7, 1)), "0 anos");
    }

    #[test]
    fn test_age_not_informed() {
        assert_eq!(animal(None).age_label(date(2024, 1, 1)), "Não informado");
    }

    #[test]
    fn test_status_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&AnimalStatus::InTreatment).unwrap();
        assert_eq!(json, "\"Em tratamento\"");
        assert_eq!("Disponível".parse::<AnimalStatus>(), Ok(AnimalStatus::Available));
        assert!("available".parse::<AnimalStatus>().is_err());
    }

    #[test]
    fn test_search_on_name_and_breed() {
        let rex = animal(None);
        assert!(rex.matches_search("REX"));
        assert!(rex.matches_search("vira"));
        assert!(rex.matches_search("  "));
        assert!(!rex.matches_search("gato"));
    }

    #[test]
    fn test_new_animal_rejects_unknown_species() {
        let payload = serde_json::json!({
            "name": "Mimi",
            "species": "papagaio",
            "breed": "SRD",
            "color": "verde",
            "size": "pequeno",
            "sex": "F",
            "birth_date": "2022-01-01",
            "rescue_date": "2023-01-01"
        });
        let new: NewAnimal = serde_json::from_value(payload).unwrap();
        let errors = new.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("species"));
    }
}
