use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The five canonical question topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Topic {
    #[sea_orm(string_value = "Politics")]
    #[serde(rename = "Politics")]
    Politics,
    #[sea_orm(string_value = "Science")]
    #[serde(rename = "Science")]
    Science,
    #[sea_orm(string_value = "History")]
    #[serde(rename = "History")]
    History,
    #[sea_orm(string_value = "Art")]
    #[serde(rename = "Art")]
    Art,
    #[sea_orm(string_value = "Current Affairs")]
    #[serde(rename = "Current Affairs")]
    CurrentAffairs,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Politics,
        Topic::Science,
        Topic::History,
        Topic::Art,
        Topic::CurrentAffairs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Politics => "Politics",
            Topic::Science => "Science",
            Topic::History => "History",
            Topic::Art => "Art",
            Topic::CurrentAffairs => "Current Affairs",
        }
    }

    pub fn parse(s: &str) -> Option<Topic> {
        Topic::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// How a cell came to be revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RevealedBy {
    #[sea_orm(string_value = "question")]
    Question,
    #[sea_orm(string_value = "guess")]
    Guess,
    #[sea_orm(string_value = "auto")]
    Auto,
}

/// JSON wrapper for the topics already asked against a cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TopicList(pub Vec<Topic>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cell_states")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "session_id")]
    pub session_id: Uuid,
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_name = "player_number",
        column_type = "SmallInteger"
    )]
    pub player_number: i16,
    #[sea_orm(
        primary_key,
        auto_increment = false,
        column_name = "cell_index",
        column_type = "SmallInteger"
    )]
    pub cell_index: i16,
    pub revealed: bool,
    pub locked: bool,
    /// Set only once the cell is revealed; null while hidden.
    pub letter: Option<String>,
    #[sea_orm(column_name = "revealed_by")]
    pub revealed_by: Option<RevealedBy>,
    #[sea_orm(column_name = "topics_used")]
    pub topics_used: TopicList,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
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
