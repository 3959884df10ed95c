pub mod entity;
pub mod repository;
mod transform;
pub mod validation;
