use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Routines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Routines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Routines::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Routines::Data).text().not_null())
                    .col(ColumnDef::new(Routines::UpdatedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routines_user")
                            .from(Routines::Table, Routines::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersonalRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PersonalRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PersonalRecords::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PersonalRecords::Bench)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(PersonalRecords::Squat)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(PersonalRecords::Deadlift)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(ColumnDef::new(PersonalRecords::UpdatedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personal_records_user")
                            .from(PersonalRecords::Table, PersonalRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkoutHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkoutHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkoutHistory::UserId).integer().not_null())
                    .col(ColumnDef::new(WorkoutHistory::WorkoutTitle).string().not_null())
                    .col(ColumnDef::new(WorkoutHistory::Date).string().not_null())
                    .col(ColumnDef::new(WorkoutHistory::Timestamp).double().null())
                    .col(ColumnDef::new(WorkoutHistory::Exercises).text().not_null())
                    .col(
                        ColumnDef::new(WorkoutHistory::IsLoadOut)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(WorkoutHistory::CreatedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workout_history_user")
                            .from(WorkoutHistory::Table, WorkoutHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkoutHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonalRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Routines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Routines {
    Table,
    Id,
    UserId,
    Data,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PersonalRecords {
    Table,
    Id,
    UserId,
    Bench,
    Squat,
    Deadlift,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WorkoutHistory {
    Table,
    Id,
    UserId,
    WorkoutTitle,
    Date,
    Timestamp,
    Exercises,
    IsLoadOut,
    CreatedAt,
}
