use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[sea_orm(string_value = "question_asked")]
    QuestionAsked,
    #[sea_orm(string_value = "question_answered")]
    QuestionAnswered,
    #[sea_orm(string_value = "letter_guessed")]
    LetterGuessed,
    #[sea_orm(string_value = "word_guessed")]
    WordGuessed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "session_id")]
    pub session_id: Uuid,
    /// The acting player.
    #[sea_orm(column_name = "player_number", column_type = "SmallInteger")]
    pub player_number: i16,
    #[sea_orm(column_name = "event_type")]
    pub event_type: EventType,
    #[sea_orm(column_name = "event_data", column_type = "Json")]
    pub event_data: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id"
    )]
    Session,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
