pub mod fallback;
pub mod health;
pub mod trace;
pub mod users;
