//! Pokémon pages.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};
use minisite_domain::id::PokemonId;
use minisite_domain::pokemon::{Pokemon, Stat};
use minisite_domain::view::DetailView;

use super::{back_href, detail_refresh, detail_status};
use crate::state::AppState;

/// Display shape of one Pokémon.
pub struct PokemonCard {
    name: String,
    image_url: String,
    type_label: String,
    stats: Vec<Stat>,
}

impl PokemonCard {
    fn new(pokemon: Pokemon, image_url: String) -> Self {
        Self {
            type_label: pokemon.type_label(),
            name: pokemon.name,
            image_url,
            stats: pokemon.stats,
        }
    }
}

/// Pokémon listing template.
#[derive(Template)]
#[template(path = "pokemon_list.html")]
pub struct PokemonListTemplate {
    refresh_seconds: Option<u64>,
    pokemon: Vec<Pokemon>,
}

impl IntoResponse for PokemonListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Pokémon detail template.
#[derive(Template)]
#[template(path = "pokemon_detail.html")]
pub struct PokemonDetailTemplate {
    refresh_seconds: Option<u64>,
    view: DetailView<PokemonCard>,
    back_href: String,
}

impl IntoResponse for PokemonDetailTemplate {
    fn into_response(self) -> Response {
        let status = detail_status(&self.view);
        (status, Html(self.to_string())).into_response()
    }
}

/// `GET /pokemon` — the dataset index.
pub async fn list<BS, PS, CS>(State(state): State<AppState<BS, PS, CS>>) -> PokemonListTemplate
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    PokemonListTemplate {
        refresh_seconds: state.pokemon_service.refresh_hint(),
        pokemon: state.pokemon_service.list_pokemon().await,
    }
}

/// `GET /pokemon/{id}` — one Pokémon with image, types and stats.
pub async fn detail<BS, PS, CS>(
    State(state): State<AppState<BS, PS, CS>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> PokemonDetailTemplate
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    let view = match id.parse::<PokemonId>() {
        Ok(id) => state.pokemon_service.pokemon(id).await,
        Err(_) => {
            tracing::debug!(%id, "ignoring unparseable pokemon id");
            DetailView::NotFound
        }
    };
    let view = view.map(|pokemon| {
        let image_url = state.pokemon_service.image_url(&pokemon);
        PokemonCard::new(pokemon, image_url)
    });

    PokemonDetailTemplate {
        refresh_seconds: detail_refresh(&view, state.pokemon_service.refresh_hint()),
        view,
        back_href: back_href(&headers, "/pokemon"),
    }
}
