pub mod filters;
pub mod handlers;
pub mod repository;
