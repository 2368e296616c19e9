//! # minisite-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BlogSource` — list and fetch blog posts
//!   - `PokemonSource` — list and fetch Pokémon, resolve image references
//!   - `ClockSource` — fetch the current server time
//! - Provide the generic **`Loader`**: one data-loading component parameterized
//!   by a [`LoadStrategy`](minisite_domain::strategy::LoadStrategy)
//!   (static with revalidation, on request, polling)
//! - Provide the **`Poller`** that keeps a scalar value fresh on a timer
//! - Define **page services** that turn loader outcomes into display values,
//!   degrading every failure to an empty value or a view state
//!
//! ## Dependency rule
//! Depends on `minisite-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod loader;
pub mod poller;
pub mod ports;
pub mod services;
