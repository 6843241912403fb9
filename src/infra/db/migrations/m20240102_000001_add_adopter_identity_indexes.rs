//! Migration: Unique CPF and RG per adopter.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_adopters_cpf")
                    .table(Adopters::Table)
                    .col(Adopters::Cpf)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adopters_rg")
                    .table(Adopters::Table)
                    .col(Adopters::Rg)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_adopters_rg", "idx_adopters_cpf"] {
            manager
                .drop_index(Index::drop().name(name).table(Adopters::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Adopters {
    Table,
    Cpf,
    Rg,
}
