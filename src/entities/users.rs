use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Legacy rows created through email-only sign-up have no username.
    #[sea_orm(unique)]
    pub username: Option<String>,

    #[sea_orm(unique)]
    pub email: Option<String>,

    /// Argon2id password hash
    pub password_hash: String,

    pub is_load_out: bool,

    pub theme: String,

    pub height: Option<String>,

    /// Bodyweight as entered by the client; parsed leniently by the leaderboard.
    pub weight: Option<String>,

    pub age: Option<i32>,

    pub gender: Option<String>,

    pub fitness_goal: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::routines::Entity")]
    Routines,
    #[sea_orm(has_one = "super::personal_records::Entity")]
    PersonalRecords,
    #[sea_orm(has_many = "super::workout_history::Entity")]
    WorkoutHistory,
}

impl Related<super::routines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Routines.def()
    }
}

impl Related<super::personal_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonalRecords.def()
    }
}

impl Related<super::workout_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkoutHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
