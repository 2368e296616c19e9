//! # minisite-adapter-remote-reqwest
//!
//! Remote source adapter built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `BlogSource`, `PokemonSource` and `ClockSource` ports
//!   against the remote blog API and the static asset host
//! - Accept the payload shapes those services actually send (a wrapped or a
//!   bare blog listing, `null` for a missing record)
//! - Translate transport failures, non-success statuses and undecodable
//!   payloads into [`FetchError`](minisite_domain::error::FetchError)
//!
//! ## Dependency rule
//! Depends on `minisite-app` (for port traits) and `minisite-domain`
//! (for records and errors). Never leaks reqwest types past the port boundary.

pub mod blog;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod pokemon;

pub use blog::RemoteBlogSource;
pub use client::RemoteClient;
pub use clock::RemoteClockSource;
pub use config::RemoteConfig;
pub use error::RemoteError;
pub use pokemon::RemotePokemonSource;
