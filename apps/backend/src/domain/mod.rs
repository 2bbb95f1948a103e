//! Pure turn-resolution and cell-reveal logic.
//!
//! Everything in this module operates on in-memory state and returns
//! `DomainError` on rule violations. Services load rows under row locks,
//! call into here, then persist the reported effects. Nothing in this
//! module touches the database or the web layer.

pub mod board;
pub mod cells;
pub mod engine;
pub mod events;
pub mod grid;
pub mod locks;
pub mod snapshot;

#[cfg(test)]
mod tests_cascade;
#[cfg(test)]
mod tests_engine;
#[cfg(test)]
mod tests_events;
#[cfg(test)]
mod tests_grid;
#[cfg(test)]
mod tests_snapshot;
