//! Application services — one per group of pages.
//!
//! Each service struct accepts a source port implementation via a generic
//! parameter (constructor injection), keeping this layer decoupled from
//! concrete adapters.

pub mod blog_service;
pub mod pokemon_service;
pub mod time_service;
