//! # minisite-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered pages**: home (current time), blog
//!   listing and detail, Pokémon listing and detail
//! - Stream the polled clock as **Server-Sent Events** under `/api`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map view states into HTML responses and status codes
//!
//! ## No-JS pages
//! - Every page is rendered server-side as complete HTML with askama.
//! - Pages whose data is refreshed in the background carry
//!   `<meta http-equiv="refresh">` with the refresh interval of their loader,
//!   so an open page follows the data without JavaScript.
//! - A detail page still loading for the first time refreshes itself after a
//!   second.
//!
//! ## Dependency rule
//! Depends on `minisite-app` (for port traits and services) and
//! `minisite-domain` (for records and view states). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod pages;
pub mod router;
pub mod state;
