//! Repository layer: wraps the SeaORM adapters, converting rows to
//! domain types and DbErr to DomainError.

pub mod cells;
pub mod events;
pub mod grids;
pub mod locks;
pub mod sessions;
