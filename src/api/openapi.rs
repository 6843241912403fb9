//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    adopter_handler, adoption_handler, animal_handler, auth_handler, dashboard_handler,
    staff_handler,
};
use crate::domain::{
    AccountResponse, Adopter, AdopterChanges, Adoption, AdoptionRow, AdoptionStatus,
    AdoptionUpdate, Animal, AnimalChanges, AnimalResponse, AnimalStatus, AnimalStatusChange,
    DashboardStats, ImageUpload, NewAdopter, NewAdoption, NewAnimal, NewStaff, Staff,
    StaffChanges, StaffRole,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelter Admin API",
        version = "0.1.0",
        description = "Administration backend for an animal shelter: animals, adopters, staff and adoptions",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::logout,
        auth_handler::me,
        animal_handler::list_animals,
        animal_handler::create_animal,
        animal_handler::get_animal,
        animal_handler::update_animal,
        animal_handler::change_status,
        animal_handler::set_image,
        animal_handler::delete_animal,
        adopter_handler::list_adopters,
        adopter_handler::create_adopter,
        adopter_handler::get_adopter,
        adopter_handler::update_adopter,
        adopter_handler::delete_adopter,
        staff_handler::list_staff,
        staff_handler::create_staff,
        staff_handler::get_staff,
        staff_handler::update_staff,
        staff_handler::set_image,
        staff_handler::delete_staff,
        adoption_handler::list_adoptions,
        adoption_handler::create_adoption,
        adoption_handler::get_adoption,
        adoption_handler::update_adoption,
        adoption_handler::delete_adoption,
        dashboard_handler::stats,
    ),
    components(
        schemas(
            Animal,
            AnimalStatus,
            AnimalResponse,
            NewAnimal,
            AnimalChanges,
            AnimalStatusChange,
            ImageUpload,
            Adopter,
            NewAdopter,
            AdopterChanges,
            Staff,
            StaffRole,
            NewStaff,
            StaffChanges,
            Adoption,
            AdoptionStatus,
            AdoptionRow,
            NewAdoption,
            AdoptionUpdate,
            DashboardStats,
            AccountResponse,
            auth_handler::LoginRequest,
            TokenResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Staff sign-in and sign-out"),
        (name = "Animals", description = "Sheltered animals"),
        (name = "Adopters", description = "Registered adopters"),
        (name = "Staff", description = "Shelter staff"),
        (name = "Adoptions", description = "Adoptions and their effect on animal status"),
        (name = "Dashboard", description = "Aggregate counts")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
