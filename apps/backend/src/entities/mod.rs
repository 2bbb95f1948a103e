//! SeaORM entities for the FiveBy schema.

pub mod cell_locks;
pub mod cell_states;
pub mod event_logs;
pub mod grids;
pub mod sessions;
