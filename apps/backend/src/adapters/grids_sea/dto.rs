//! DTOs for the grids_sea adapter.

/// DTO for inserting a validated grid into the pool.
#[derive(Debug, Clone)]
pub struct GridCreate {
    pub cells: String,
    pub words_across: Vec<String>,
    pub words_down: Vec<String>,
    pub content_hash: String,
}
