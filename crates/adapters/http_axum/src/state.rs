//! Shared application state for axum handlers.

use std::sync::Arc;

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};
use minisite_app::services::blog_service::BlogService;
use minisite_app::services::pokemon_service::PokemonService;
use minisite_app::services::time_service::TimeService;

/// Application state shared across all axum handlers.
///
/// Generic over the three source types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the sources themselves do not need to be `Clone`.
pub struct AppState<BS, PS, CS> {
    /// Blog listing and detail pages.
    pub blog_service: Arc<BlogService<BS>>,
    /// Pokémon listing and detail pages.
    pub pokemon_service: Arc<PokemonService<PS>>,
    /// Home page clock.
    pub time_service: Arc<TimeService<CS>>,
}

impl<BS, PS, CS> Clone for AppState<BS, PS, CS> {
    fn clone(&self) -> Self {
        Self {
            blog_service: Arc::clone(&self.blog_service),
            pokemon_service: Arc::clone(&self.pokemon_service),
            time_service: Arc::clone(&self.time_service),
        }
    }
}

impl<BS, PS, CS> AppState<BS, PS, CS>
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        blog_service: BlogService<BS>,
        pokemon_service: PokemonService<PS>,
        time_service: TimeService<CS>,
    ) -> Self {
        Self::from_arcs(
            Arc::new(blog_service),
            Arc::new(pokemon_service),
            Arc::new(time_service),
        )
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when the caller keeps a handle on the services, e.g. to
    /// shut their pollers down once the server has stopped.
    pub fn from_arcs(
        blog_service: Arc<BlogService<BS>>,
        pokemon_service: Arc<PokemonService<PS>>,
        time_service: Arc<TimeService<CS>>,
    ) -> Self {
        Self {
            blog_service,
            pokemon_service,
            time_service,
        }
    }
}
