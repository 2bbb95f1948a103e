pub mod db;
pub mod rate_limit;
pub mod state;
