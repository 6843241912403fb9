//! Migration: Create animals, adopters, staff and adoptions tables.
//!
//! Descriptive columns are nullable so rows written by other tools load;
//! the domain mapping fills the gaps.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn timestamps(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Alias::new("created_at"))
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Alias::new("updated_at"))
                .timestamp_with_time_zone()
                .not_null(),
        )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Animals::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Animals::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Animals::Name).string())
                        .col(ColumnDef::new(Animals::Species).string())
                        .col(ColumnDef::new(Animals::Breed).string())
                        .col(ColumnDef::new(Animals::Color).string())
                        .col(ColumnDef::new(Animals::Size).string())
                        .col(ColumnDef::new(Animals::Sex).string())
                        .col(ColumnDef::new(Animals::BirthDate).date())
                        .col(ColumnDef::new(Animals::RescueDate).date())
                        .col(ColumnDef::new(Animals::Status).string().not_null())
                        .col(ColumnDef::new(Animals::Image).text())
                        .col(ColumnDef::new(Animals::NeedsVaccine).boolean())
                        .col(ColumnDef::new(Animals::NeedsCheckup).boolean())
                        .col(ColumnDef::new(Animals::Notes).text()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Adopters::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Adopters::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Adopters::Name).string())
                        .col(ColumnDef::new(Adopters::Email).string())
                        .col(ColumnDef::new(Adopters::Phone).string())
                        .col(ColumnDef::new(Adopters::Sex).string())
                        .col(ColumnDef::new(Adopters::Rg).string())
                        .col(ColumnDef::new(Adopters::Cpf).string())
                        .col(ColumnDef::new(Adopters::MaritalStatus).string())
                        .col(ColumnDef::new(Adopters::State).string())
                        .col(ColumnDef::new(Adopters::City).string())
                        .col(ColumnDef::new(Adopters::District).string())
                        .col(ColumnDef::new(Adopters::Street).string())
                        .col(ColumnDef::new(Adopters::Number).string())
                        .col(ColumnDef::new(Adopters::Complement).string())
                        .col(ColumnDef::new(Adopters::Cep).string())
                        .col(ColumnDef::new(Adopters::HasPets).boolean())
                        .col(ColumnDef::new(Adopters::Notes).text()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Staff::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Staff::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Staff::Name).string())
                        .col(ColumnDef::new(Staff::Role).string())
                        .col(ColumnDef::new(Staff::Email).string())
                        .col(ColumnDef::new(Staff::Phone).string())
                        .col(ColumnDef::new(Staff::Sex).string())
                        .col(ColumnDef::new(Staff::Image).text()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Adoptions::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Adoptions::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Adoptions::AnimalId).uuid().not_null())
                        .col(ColumnDef::new(Adoptions::AdopterId).uuid().not_null())
                        .col(ColumnDef::new(Adoptions::EmployeeId).uuid().not_null())
                        .col(ColumnDef::new(Adoptions::Status).string().not_null())
                        .col(ColumnDef::new(Adoptions::AdoptionDate).date())
                        .col(ColumnDef::new(Adoptions::Notes).text()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adoptions_animal_id")
                    .table(Adoptions::Table)
                    .col(Adoptions::AnimalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_adoptions_animal_id")
                    .table(Adoptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Adoptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Adopters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
    Name,
    Species,
    Breed,
    Color,
    Size,
    Sex,
    BirthDate,
    RescueDate,
    Status,
    Image,
    NeedsVaccine,
    NeedsCheckup,
    Notes,
}

#[derive(Iden)]
enum Adopters {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Sex,
    Rg,
    Cpf,
    MaritalStatus,
    State,
    City,
    District,
    Street,
    Number,
    Complement,
    Cep,
    HasPets,
    Notes,
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    Name,
    Role,
    Email,
    Phone,
    Sex,
    Image,
}

#[derive(Iden)]
enum Adoptions {
    Table,
    Id,
    AnimalId,
    AdopterId,
    EmployeeId,
    Status,
    AdoptionDate,
    Notes,
}
