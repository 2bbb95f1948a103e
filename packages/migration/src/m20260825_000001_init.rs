use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{
    ColumnDef, Expr, ForeignKeyAction, Index, Table, TableCreateStatement,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Grids {
    Table,
    Id,
    Cells,
    WordsAcross,
    WordsDown,
    ContentHash,
    CreatedAt,
}

#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    Status,
    CurrentTurn,
    Player1GridId,
    Player2GridId,
    Player1Name,
    Player2Name,
    Player1Score,
    Player2Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CellStates {
    Table,
    SessionId,
    PlayerNumber,
    CellIndex,
    Revealed,
    Locked,
    Letter,
    RevealedBy,
    TopicsUsed,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CellLocks {
    Table,
    Id,
    SessionId,
    PlayerNumber,
    CellIndex,
    CreatedAt,
    ClearedAt,
}

#[derive(Iden)]
enum EventLogs {
    Table,
    Id,
    SessionId,
    PlayerNumber,
    EventType,
    EventData,
    CreatedAt,
}

// grids: immutable 5x5 letter pool, identity derivable from content
fn grids_table() -> TableCreateStatement {
    Table::create()
        .table(Grids::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Grids::Id)
                .big_integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Grids::Cells).char_len(25).not_null())
        .col(ColumnDef::new(Grids::WordsAcross).json().not_null())
        .col(ColumnDef::new(Grids::WordsDown).json().not_null())
        .col(ColumnDef::new(Grids::ContentHash).string().not_null())
        .col(
            ColumnDef::new(Grids::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

fn sessions_table() -> TableCreateStatement {
    Table::create()
        .table(Sessions::Table)
        .if_not_exists()
        .col(ColumnDef::new(Sessions::Id).uuid().not_null().primary_key())
        .col(
            ColumnDef::new(Sessions::Status)
                .string()
                .not_null()
                .default("in_progress")
                .check(Expr::col(Sessions::Status).is_in(["lobby", "in_progress", "complete"])),
        )
        .col(
            ColumnDef::new(Sessions::CurrentTurn)
                .small_integer()
                .not_null()
                .default(1)
                .check(Expr::col(Sessions::CurrentTurn).is_in([1, 2])),
        )
        .col(
            ColumnDef::new(Sessions::Player1GridId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Sessions::Player2GridId)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(Sessions::Player1Name).string_len(30).null())
        .col(ColumnDef::new(Sessions::Player2Name).string_len(30).null())
        .col(
            ColumnDef::new(Sessions::Player1Score)
                .integer()
                .not_null()
                .default(100),
        )
        .col(
            ColumnDef::new(Sessions::Player2Score)
                .integer()
                .not_null()
                .default(100),
        )
        .col(
            ColumnDef::new(Sessions::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Sessions::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Sessions::Table, Sessions::Player1GridId)
                .to(Grids::Table, Grids::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Sessions::Table, Sessions::Player2GridId)
                .to(Grids::Table, Grids::Id),
        )
        .to_owned()
}

// cell_states: 25 ledger rows per player, created with the session.
// A hidden row must carry neither a letter nor a reveal cause.
fn cell_states_table() -> TableCreateStatement {
    Table::create()
        .table(CellStates::Table)
        .if_not_exists()
        .col(ColumnDef::new(CellStates::SessionId).uuid().not_null())
        .col(
            ColumnDef::new(CellStates::PlayerNumber)
                .small_integer()
                .not_null()
                .check(Expr::col(CellStates::PlayerNumber).is_in([1, 2])),
        )
        .col(
            ColumnDef::new(CellStates::CellIndex)
                .small_integer()
                .not_null()
                .check(Expr::col(CellStates::CellIndex).between(0, 24)),
        )
        .col(
            ColumnDef::new(CellStates::Revealed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(CellStates::Locked)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(CellStates::Letter).char_len(1).null())
        .col(
            ColumnDef::new(CellStates::RevealedBy)
                .string()
                .null()
                .check(Expr::col(CellStates::RevealedBy).is_in(["question", "guess", "auto"]))
                .check(
                    Expr::col(CellStates::Revealed).eq(true).or(Expr::col(
                        CellStates::Letter,
                    )
                    .is_null()
                    .and(Expr::col(CellStates::RevealedBy).is_null())),
                ),
        )
        .col(ColumnDef::new(CellStates::TopicsUsed).json().not_null())
        .col(
            ColumnDef::new(CellStates::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(CellStates::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(CellStates::SessionId)
                .col(CellStates::PlayerNumber)
                .col(CellStates::CellIndex),
        )
        .foreign_key(
            ForeignKey::create()
                .from(CellStates::Table, CellStates::SessionId)
                .to(Sessions::Table, Sessions::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

// cell_locks: append-only wrong-guess lock queue
fn cell_locks_table() -> TableCreateStatement {
    Table::create()
        .table(CellLocks::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(CellLocks::Id)
                .big_integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(CellLocks::SessionId).uuid().not_null())
        .col(
            ColumnDef::new(CellLocks::PlayerNumber)
                .small_integer()
                .not_null()
                .check(Expr::col(CellLocks::PlayerNumber).is_in([1, 2])),
        )
        .col(
            ColumnDef::new(CellLocks::CellIndex)
                .small_integer()
                .not_null()
                .check(Expr::col(CellLocks::CellIndex).between(0, 24)),
        )
        .col(
            ColumnDef::new(CellLocks::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(CellLocks::ClearedAt)
                .timestamp_with_time_zone()
                .null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(CellLocks::Table, CellLocks::SessionId)
                .to(Sessions::Table, Sessions::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

// event_logs: append-only audit trail, one row per turn action
fn event_logs_table() -> TableCreateStatement {
    Table::create()
        .table(EventLogs::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(EventLogs::Id)
                .big_integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(EventLogs::SessionId).uuid().not_null())
        .col(
            ColumnDef::new(EventLogs::PlayerNumber)
                .small_integer()
                .not_null()
                .check(Expr::col(EventLogs::PlayerNumber).is_in([1, 2])),
        )
        .col(ColumnDef::new(EventLogs::EventType).string().not_null())
        .col(ColumnDef::new(EventLogs::EventData).json().not_null())
        .col(
            ColumnDef::new(EventLogs::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(EventLogs::Table, EventLogs::SessionId)
                .to(Sessions::Table, Sessions::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(grids_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grids_content_hash_unique")
                    .table(Grids::Table)
                    .col(Grids::ContentHash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grids_cells_unique")
                    .table(Grids::Table)
                    .col(Grids::Cells)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager.create_table(sessions_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_status_created_at")
                    .table(Sessions::Table)
                    .col(Sessions::Status)
                    .col(Sessions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager.create_table(cell_states_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cell_states_session_player_locked")
                    .table(CellStates::Table)
                    .col(CellStates::SessionId)
                    .col(CellStates::PlayerNumber)
                    .col(CellStates::Locked)
                    .to_owned(),
            )
            .await?;

        manager.create_table(cell_locks_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cell_locks_session_player_created")
                    .table(CellLocks::Table)
                    .col(CellLocks::SessionId)
                    .col(CellLocks::PlayerNumber)
                    .col(CellLocks::CreatedAt)
                    .col(CellLocks::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cell_locks_session_player_cell")
                    .table(CellLocks::Table)
                    .col(CellLocks::SessionId)
                    .col(CellLocks::PlayerNumber)
                    .col(CellLocks::CellIndex)
                    .to_owned(),
            )
            .await?;

        manager.create_table(event_logs_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_logs_session_created")
                    .table(EventLogs::Table)
                    .col(EventLogs::SessionId)
                    .col(EventLogs::CreatedAt)
                    .col(EventLogs::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_logs_session_player_type")
                    .table(EventLogs::Table)
                    .col(EventLogs::SessionId)
                    .col(EventLogs::PlayerNumber)
                    .col(EventLogs::EventType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventLogs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CellLocks::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CellStates::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grids::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_query::PostgresQueryBuilder;

    use super::{cell_states_table, sessions_table};

    #[test]
    fn sessions_constrain_status_and_turn() {
        let sql = sessions_table().to_string(PostgresQueryBuilder);
        assert!(
            sql.contains(r#""status" IN ('lobby', 'in_progress', 'complete')"#),
            "{sql}"
        );
        assert!(sql.contains(r#""current_turn" IN (1, 2)"#), "{sql}");
    }

    #[test]
    fn cell_states_constrain_reveal_cause_and_hidden_rows() {
        let sql = cell_states_table().to_string(PostgresQueryBuilder);
        assert!(
            sql.contains(r#""revealed_by" IN ('question', 'guess', 'auto')"#),
            "{sql}"
        );
        // Hidden rows must not carry a letter or reveal cause.
        assert!(sql.contains(r#""revealed" = TRUE"#), "{sql}");
        assert!(sql.contains(r#""letter" IS NULL"#), "{sql}");
        assert!(sql.contains(r#""cell_index" BETWEEN 0 AND 24"#), "{sql}");
        assert!(sql.contains(r#""player_number" IN (1, 2)"#), "{sql}");
    }
}
