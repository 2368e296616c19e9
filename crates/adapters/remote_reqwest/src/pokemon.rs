//! Pokémon dataset source, served as static JSON from the asset host.

use minisite_app::ports::PokemonSource;
use minisite_domain::error::FetchError;
use minisite_domain::id::PokemonId;
use minisite_domain::pokemon::{DATASET_PREFIX, Pokemon};

use crate::client::RemoteClient;

/// [`PokemonSource`] backed by `{assets}/pokemon-main/`.
#[derive(Debug, Clone)]
pub struct RemotePokemonSource {
    client: RemoteClient,
}

impl RemotePokemonSource {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl PokemonSource for RemotePokemonSource {
    async fn list_pokemon(&self) -> Result<Vec<Pokemon>, FetchError> {
        let url = self.client.asset_url(&format!("{DATASET_PREFIX}/index.json"));
        Ok(self.client.get_json(&url).await?)
    }

    async fn get_pokemon(&self, id: PokemonId) -> Result<Pokemon, FetchError> {
        let url = self
            .client
            .asset_url(&format!("{DATASET_PREFIX}/pokemon/{id}.json"));
        Ok(self.client.get_json(&url).await?)
    }

    fn image_url(&self, pokemon: &Pokemon) -> String {
        pokemon.image_url(self.client.asset_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> RemotePokemonSource {
        let config = RemoteConfig {
            asset_base_url: server.uri(),
            ..RemoteConfig::default()
        };
        RemotePokemonSource::new(RemoteClient::new(&config).unwrap())
    }

    fn bulbasaur() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Bulbasaur",
            "image": "images/bulbasaur.jpg",
            "type": ["Grass", "Poison"],
            "stats": [{"name": "hp", "value": 45}, {"name": "attack", "value": 49}]
        })
    }

    #[tokio::test]
    async fn should_list_index_from_dataset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon-main/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([bulbasaur()])))
            .mount(&server)
            .await;

        let index = source_for(&server).list_pokemon().await.unwrap();

        assert_eq!(Pokemon::ids(&index), vec![PokemonId::new(1)]);
    }

    #[tokio::test]
    async fn should_fetch_record_with_types_and_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon-main/pokemon/1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur()))
            .mount(&server)
            .await;

        let pokemon = source_for(&server).get_pokemon(PokemonId::new(1)).await.unwrap();

        assert_eq!(pokemon.type_label(), "Grass, Poison");
        assert_eq!(pokemon.stats[0].value, serde_json::Number::from(45_u64));
    }

    #[tokio::test]
    async fn should_report_not_found_when_record_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon-main/pokemon/9999.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server)
            .get_pokemon(PokemonId::new(9999))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.reason(), "Not Found");
    }

    #[tokio::test]
    async fn should_resolve_image_against_asset_host() {
        let server = MockServer::start().await;
        let source = source_for(&server);
        let pokemon: Pokemon = serde_json::from_value(bulbasaur()).unwrap();

        assert_eq!(
            source.image_url(&pokemon),
            format!("{}/pokemon-main/images/bulbasaur.jpg", server.uri())
        );
    }
}
