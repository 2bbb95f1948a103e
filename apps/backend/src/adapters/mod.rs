//! SeaORM adapters, generic over ConnectionTrait. Adapter functions
//! return DbErr; the repos layer maps to DomainError.

pub mod cell_locks_sea;
pub mod cell_states_sea;
pub mod event_logs_sea;
pub mod grids_sea;
pub mod sessions_sea;
