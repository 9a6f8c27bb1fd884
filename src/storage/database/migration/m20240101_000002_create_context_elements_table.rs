use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContextElements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContextElements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContextElements::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ContextElements::Subject).string_len(255).not_null())
                    .col(ColumnDef::new(ContextElements::TaskGoal).text().not_null())
                    .col(ColumnDef::new(ContextElements::AiRole).text().not_null())
                    .col(ColumnDef::new(ContextElements::MyRole).text().not_null())
                    .col(ColumnDef::new(ContextElements::KeyInfo).text().not_null())
                    .col(ColumnDef::new(ContextElements::BehaviorRule).text().not_null())
                    .col(ColumnDef::new(ContextElements::DeliveryFormat).text().not_null())
                    .col(
                        ColumnDef::new(ContextElements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContextElements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContextElements::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_context_elements_user_id")
                            .from(ContextElements::Table, ContextElements::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_context_elements_user_id")
                    .table(ContextElements::Table)
                    .col(ContextElements::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_context_elements_subject")
                    .table(ContextElements::Table)
                    .col(ContextElements::Subject)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_context_elements_deleted_at")
                    .table(ContextElements::Table)
                    .col(ContextElements::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContextElements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContextElements {
    Table,
    Id,
    UserId,
    Subject,
    TaskGoal,
    AiRole,
    MyRole,
    KeyInfo,
    BehaviorRule,
    DeliveryFormat,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
