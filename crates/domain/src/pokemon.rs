//! Pokémon record — read-only data served by the static asset host.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::id::PokemonId;

/// Path prefix under the asset host where the Pokémon dataset lives.
pub const DATASET_PREFIX: &str = "pokemon-main";

/// A single named stat (`hp`, `attack`, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    /// Any JSON number; integers display without a fraction.
    pub value: Number,
}

/// A Pokémon as rendered by the Pokémon pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: String,
    /// Image path relative to the dataset root (e.g. `images/pikachu.jpg`).
    pub image: String,
    /// Type tags in source order.
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    /// Stats in source order.
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl Pokemon {
    /// Resolve [`image`](Self::image) against the asset host base URL.
    #[must_use]
    pub fn image_url(&self, asset_base_url: &str) -> String {
        format!(
            "{}/{DATASET_PREFIX}/{}",
            asset_base_url.trim_end_matches('/'),
            self.image.trim_start_matches('/')
        )
    }

    /// Type tags joined for display (`"Grass, Poison"`).
    #[must_use]
    pub fn type_label(&self) -> String {
        self.types.join(", ")
    }

    /// Collect the ids of an index listing, preserving source order.
    #[must_use]
    pub fn ids(index: &[Self]) -> Vec<PokemonId> {
        index.iter().map(|pokemon| pokemon.id).collect()
    }
}
