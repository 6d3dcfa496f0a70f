use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Autos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Autos::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Autos::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Autos::MetaInfo).json().not_null())
                    .col(
                        ColumnDef::new(Autos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Autos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Autos {
    Table,
    Id,
    Name,
    MetaInfo,
    CreatedAt,
}
