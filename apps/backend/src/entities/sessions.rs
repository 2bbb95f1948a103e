use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[sea_orm(string_value = "lobby")]
    Lobby,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "complete")]
    Complete,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub status: SessionStatus,
    /// 1 or 2.
    #[sea_orm(column_name = "current_turn", column_type = "SmallInteger")]
    pub current_turn: i16,
    #[sea_orm(column_name = "player1_grid_id")]
    pub player1_grid_id: i64,
    #[sea_orm(column_name = "player2_grid_id")]
    pub player2_grid_id: i64,
    #[sea_orm(column_name = "player1_name")]
    pub player1_name: Option<String>,
    #[sea_orm(column_name = "player2_name")]
    pub player2_name: Option<String>,
    #[sea_orm(column_name = "player1_score")]
    pub player1_score: i32,
    #[sea_orm(column_name = "player2_score")]
    pub player2_score: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grids::Entity",
        from = "Column::Player1GridId",
        to = "super::grids::Column::Id"
    )]
    Player1Grid,
    #[sea_orm(
        belongs_to = "super::grids::Entity",
        from = "Column::Player2GridId",
        to = "super::grids::Column::Id"
    )]
    Player2Grid,
    #[sea_orm(has_many = "super::cell_states::Entity")]
    CellStates,
    #[sea_orm(has_many = "super::cell_locks::Entity")]
    CellLocks,
    #[sea_orm(has_many = "super::event_logs::Entity")]
    EventLogs,
}

impl Related<super::cell_states::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CellStates.def()
    }
}

impl Related<super::cell_locks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CellLocks.def()
    }
}

impl Related<super::event_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
