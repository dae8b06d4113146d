pub mod fallback;
pub mod root;
pub mod user;
