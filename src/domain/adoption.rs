//! Adoption domain entity, status transitions and display rows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::animal::{Animal, AnimalStatus};
use crate::config::UNKNOWN_NAME;

/// Lifecycle status of an adoption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AdoptionStatus {
    #[serde(rename = "Em andamento")]
    InProgress,
    #[serde(rename = "Adotado")]
    Adopted,
    #[serde(rename = "Devolvido")]
    Returned,
}

impl AdoptionStatus {
    pub const ALL: [AdoptionStatus; 3] = [
        AdoptionStatus::InProgress,
        AdoptionStatus::Adopted,
        AdoptionStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::InProgress => "Em andamento",
            AdoptionStatus::Adopted => "Adotado",
            AdoptionStatus::Returned => "Devolvido",
        }
    }

    /// Status the linked animal must carry while the adoption is in this state.
    pub fn animal_status(&self) -> AnimalStatus {
        match self {
            AdoptionStatus::InProgress => AnimalStatus::InProgress,
            AdoptionStatus::Adopted => AnimalStatus::Adopted,
            AdoptionStatus::Returned => AnimalStatus::Available,
        }
    }

    /// Active adoptions hold the animal; at most one may exist per animal.
    pub fn is_active(&self) -> bool {
        !matches!(self, AdoptionStatus::Returned)
    }

    /// Statuses a new adoption may be registered with.
    pub fn can_open(&self) -> bool {
        self.is_active()
    }

    /// Status shown on the adoption board given the animal's current status.
    pub fn displayed_for(&self, animal: AnimalStatus) -> AdoptionStatus {
        match (self, animal) {
            (AdoptionStatus::InProgress, _) => AdoptionStatus::InProgress,
            (_, AnimalStatus::Available) => AdoptionStatus::Returned,
            _ => AdoptionStatus::Adopted,
        }
    }
}

impl FromStr for AdoptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdoptionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown adoption status '{}'", s))
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adoption domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Adoption {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    /// Staff member who approved the adoption
    pub employee_id: Uuid,
    pub status: AdoptionStatus,
    pub adoption_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Adoption registration data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewAdoption {
    pub adopter_id: Uuid,
    pub animal_id: Uuid,
    pub employee_id: Uuid,
    pub status: AdoptionStatus,
    pub adoption_date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Notes are too long"))]
    pub notes: Option<String>,
}

/// Adoption update data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdoptionUpdate {
    pub status: AdoptionStatus,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Notes are too long"))]
    pub notes: Option<String>,
    #[serde(default)]
    pub adoption_date: Option<NaiveDate>,
}

/// Adoption with resolved names, as listed on the adoption board
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdoptionRow {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    pub employee_id: Uuid,
    pub animal_name: String,
    pub adopter_name: String,
    pub employee_name: String,
    /// Status as persisted on the adoption
    pub recorded_status: AdoptionStatus,
    /// Status derived from the recorded status and the animal's status
    pub status: AdoptionStatus,
    pub adoption_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl AdoptionRow {
    /// Build a row, falling back to "Desconhecido" for unresolved references.
    pub fn resolve(
        adoption: &Adoption,
        animal: Option<&Animal>,
        adopter_name: Option<&str>,
        employee_name: Option<&str>,
    ) -> Self {
        let mut row = Self {
            id: adoption.id,
            animal_id: adoption.animal_id,
            adopter_id: adoption.adopter_id,
            employee_id: adoption.employee_id,
            animal_name: UNKNOWN_NAME.to_string(),
            adopter_name: adopter_name.unwrap_or(UNKNOWN_NAME).to_string(),
            employee_name: employee_name.unwrap_or(UNKNOWN_NAME).to_string(),
            recorded_status: adoption.status,
            status: adoption.status,
            adoption_date: adoption.adoption_date,
            notes: adoption.notes.clone(),
        };
        row.rederive(animal);
        row
    }

    /// Refresh animal name and displayed status. A missing animal leaves the row as is.
    pub fn rederive(&mut self, animal: Option<&Animal>) {
        if let Some(animal) = animal {
            self.animal_name = animal.name.clone();
            self.status = self.recorded_status.displayed_for(animal.status);
        }
    }

    /// Case-insensitive match on adopter, animal, employee or status.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            self.adopter_name.as_str(),
            self.animal_name.as_str(),
            self.employee_name.as_str(),
            self.status.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adoption(status: AdoptionStatus) -> Adoption {
        let now = Utc::now();
        Adoption {
            id: Uuid::new_v4(),
            animal_id: Uuid::new_v4(),
            adopter_id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            status,
            adoption_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn animal_with(status: AnimalStatus) -> Animal {
        let now = Utc::now();
        Animal {
            id: Uuid::new_v4(),
            name: "Luna".to_string(),
            species: "gato".to_string(),
            breed: "SRD".to_string(),
            color: "preta".to_string(),
            size: "pequeno".to_string(),
            sex: "F".to_string(),
            birth_date: None,
            rescue_date: None,
            status,
            image: None,
            needs_vaccine: false,
            needs_checkup: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_animal_status_derivation() {
        assert_eq!(AdoptionStatus::Returned.animal_status(), AnimalStatus::Available);
        assert_eq!(AdoptionStatus::Adopted.animal_status(), AnimalStatus::Adopted);
        assert_eq!(AdoptionStatus::InProgress.animal_status(), AnimalStatus::InProgress);
    }

    #[test]
    fn test_only_active_statuses_can_open() {
        assert!(AdoptionStatus::InProgress.can_open());
        assert!(AdoptionStatus::Adopted.can_open());
        assert!(!AdoptionStatus::Returned.can_open());
    }

    #[test]
    fn test_displayed_status() {
        use AdoptionStatus::*;
        assert_eq!(InProgress.displayed_for(AnimalStatus::Available), InProgress);
        assert_eq!(Adopted.displayed_for(AnimalStatus::Available), Returned);
        assert_eq!(Adopted.displayed_for(AnimalStatus::Adopted), Adopted);
        assert_eq!(Returned.displayed_for(AnimalStatus::InTreatment), Adopted);
        assert_eq!(Returned.displayed_for(AnimalStatus::Available), Returned);
    }

    #[test]
    fn test_row_with_missing_references() {
        let row = AdoptionRow::resolve(&adoption(AdoptionStatus::Adopted), None, None, Some("Ana"));
        assert_eq!(row.animal_name, "Desconhecido");
        assert_eq!(row.adopter_name, "Desconhecido");
        assert_eq!(row.employee_name, "Ana");
        assert_eq!(row.status, AdoptionStatus::Adopted);
    }

    #[test]
    fn test_row_rederives_from_animal() {
        let luna = animal_with(AnimalStatus::Adopted);
        let mut row = AdoptionRow::resolve(
            &adoption(AdoptionStatus::Adopted),
            Some(&luna),
            Some("Maria"),
            Some("Ana"),
        );
        assert_eq!(row.animal_name, "Luna");
        assert_eq!(row.status, AdoptionStatus::Adopted);

        let mut returned = luna.clone();
        returned.status = AnimalStatus::Available;
        returned.name = "Luna II".to_string();
        row.rederive(Some(&returned));
        assert_eq!(row.status, AdoptionStatus::Returned);
        assert_eq!(row.animal_name, "Luna II");

        row.rederive(None);
        assert_eq!(row.animal_name, "Luna II");
        assert!(row.matches_search("maria"));
        assert!(row.matches_search("devolvido"));
    }
}
