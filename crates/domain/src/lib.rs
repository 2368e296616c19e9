//! # minisite-domain
//!
//! Pure domain model for the minisite pages.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, the fetch error taxonomy
//! - Define the remote **records** rendered by the pages: blog posts,
//!   Pokémon, the current server time
//! - Define **load strategies** and **failure policies** used to pick how a
//!   page keeps its data fresh
//! - Define the **detail view states** and their priority order
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod strategy;
pub mod view;

pub mod blog;
pub mod clock;
pub mod pokemon;
