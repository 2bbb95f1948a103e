use sea_orm::ConnectionTrait;

use crate::adapters::grids_sea::{self, GridCreate};
use crate::domain::grid::GridContent;
use crate::entities::grids;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Load a grid and rebuild its validated content. A stored grid that no
/// longer validates is corruption, not caller error.
pub async fn load_content<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    grid_id: i64,
) -> Result<GridContent, DomainError> {
    let model = grids_sea::find_by_id(conn, grid_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Grid, format!("grid {grid_id}")))?;
    let content = GridContent {
        cells: model.cells,
        words_across: model.words_across.0,
        words_down: model.words_down.0,
    };
    content
        .validate()
        .map_err(|e| DomainError::corrupt(format!("grid {grid_id} failed validation: {e}")))?;
    Ok(content)
}

/// Draw two distinct grids at random from the pool.
pub async fn pick_two_random<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<(grids::Model, grids::Model), DomainError> {
    let mut picked = grids_sea::pick_random(conn, 2).await?;
    if picked.len() < 2 {
        return Err(DomainError::conflict(
            ConflictKind::GridsUnavailable,
            "fewer than two grids exist in the pool",
        ));
    }
    let second = picked.pop().expect("len checked above");
    let first = picked.pop().expect("len checked above");
    Ok((first, second))
}

/// Insert a validated grid unless its content already exists.
/// Returns None when an identical grid is already pooled.
pub async fn add_grid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    content: &GridContent,
) -> Result<Option<grids::Model>, DomainError> {
    content.validate()?;
    let content_hash = content.content_hash();
    if grids_sea::find_by_content_hash(conn, &content_hash)
        .await?
        .is_some()
    {
        return Ok(None);
    }
    let model = grids_sea::insert_grid(
        conn,
        GridCreate {
            cells: content.cells.clone(),
            words_across: content.words_across.clone(),
            words_down: content.words_down.clone(),
            content_hash,
        },
    )
    .await?;
    Ok(Some(model))
}
