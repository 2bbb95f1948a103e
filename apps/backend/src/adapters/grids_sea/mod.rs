//! SeaORM adapter for the grid pool.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::grids;

pub mod dto;

pub use dto::GridCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    grid_id: i64,
) -> Result<Option<grids::Model>, sea_orm::DbErr> {
    grids::Entity::find_by_id(grid_id).one(conn).await
}

pub async fn find_by_content_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    content_hash: &str,
) -> Result<Option<grids::Model>, sea_orm::DbErr> {
    grids::Entity::find()
        .filter(grids::Column::ContentHash.eq(content_hash))
        .one(conn)
        .await
}

/// Draw `n` distinct grids uniformly at random from the pool.
pub async fn pick_random<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    n: u64,
) -> Result<Vec<grids::Model>, sea_orm::DbErr> {
    grids::Entity::find()
        .order_by(Expr::cust("RANDOM()"), Order::Asc)
        .limit(n)
        .all(conn)
        .await
}

pub async fn insert_grid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GridCreate,
) -> Result<grids::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let grid_active = grids::ActiveModel {
        id: NotSet,
        cells: Set(dto.cells),
        words_across: Set(grids::WordList(dto.words_across)),
        words_down: Set(grids::WordList(dto.words_down)),
        content_hash: Set(dto.content_hash),
        created_at: Set(now),
    };
    grid_active.insert(conn).await
}
