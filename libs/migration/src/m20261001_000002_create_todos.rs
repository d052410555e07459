use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261001_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Todos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Todos::Title))
                    .col(text(Todos::Contents))
                    .col(string(Todos::Weather))
                    .col(big_integer(Todos::UserId))
                    .col(
                        timestamp_with_time_zone(Todos::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Todos::ModifiedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todos_user_id")
                            .from(Todos::Table, Todos::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing sorts by modified_at; search filters on the other three
        for (name, column) in [
            ("idx_todos_modified_at", Todos::ModifiedAt),
            ("idx_todos_created_at", Todos::CreatedAt),
            ("idx_todos_weather", Todos::Weather),
            ("idx_todos_user_id", Todos::UserId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Todos::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER todos_touch_modified_at
                    BEFORE UPDATE ON todos
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_modified_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS todos_touch_modified_at ON todos")
            .await?;

        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Todos {
    Table,
    Id,
    Title,
    Contents,
    Weather,
    UserId,
    CreatedAt,
    ModifiedAt,
}
