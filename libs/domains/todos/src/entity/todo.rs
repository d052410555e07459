use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "todos";
    /// Mount point of the todo routes under `/api`
    pub const URL: &'static str = "/todos";
}

impl From<Model> for crate::models::Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            contents: model.contents,
            weather: model.weather,
            user_id: model.user_id,
            created_at: model.created_at.into(),
            modified_at: model.modified_at.into(),
        }
    }
}

// Id and timestamps are assigned by the database
impl From<crate::models::NewTodo> for ActiveModel {
    fn from(input: crate::models::NewTodo) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            contents: Set(input.contents),
            weather: Set(input.weather),
            user_id: Set(input.user_id),
            created_at: NotSet,
            modified_at: NotSet,
        }
    }
}
