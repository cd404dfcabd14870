pub mod discovery;
pub mod not_found;
