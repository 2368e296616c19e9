//! Pokémon service — use-cases behind the Pokémon listing and detail pages.

use std::sync::Arc;

use minisite_domain::id::PokemonId;
use minisite_domain::pokemon::Pokemon;
use minisite_domain::strategy::PageSettings;
use minisite_domain::view::DetailView;

use crate::loader::{BoxFetch, Load, Loader};
use crate::ports::PokemonSource;

/// Application service for the Pokémon pages.
pub struct PokemonService<S> {
    source: Arc<S>,
    index: Loader<(), Vec<Pokemon>>,
    records: Loader<PokemonId, Pokemon>,
}

impl<S> PokemonService<S>
where
    S: PokemonSource + Send + Sync + 'static,
{
    /// Create a new service; listing and detail pages share `settings`.
    pub fn new(source: S, settings: PageSettings) -> Self {
        Self {
            source: Arc::new(source),
            index: Loader::from_settings(settings),
            records: Loader::from_settings(settings).with_fallback(true),
        }
    }

    /// The dataset index in source order; empty when it could not be fetched.
    pub async fn list_pokemon(&self) -> Vec<Pokemon> {
        let fetch = index_fetcher(Arc::clone(&self.source));
        match self.index.load((), fetch).await {
            Load::Done(Ok(index)) => index,
            Load::Done(Err(_)) | Load::Pending => Vec::new(),
        }
    }

    /// The detail view for one Pokémon.
    ///
    /// A 404 or an empty record reads as not found; any other failure is
    /// shown with its reason.
    pub async fn pokemon(&self, id: PokemonId) -> DetailView<Pokemon> {
        let fetch = record_fetcher(Arc::clone(&self.source), id);
        match self.records.load(id, fetch).await {
            Load::Pending => DetailView::Loading,
            Load::Done(outcome) => DetailView::from_outcome(outcome, |err| {
                (!err.is_not_found()).then(|| format!("Failed to fetch data: {}", err.reason()))
            }),
        }
    }

    /// Absolute URL of a record's image.
    #[must_use]
    pub fn image_url(&self, pokemon: &Pokemon) -> String {
        self.source.image_url(pokemon)
    }

    /// Fetch the index and every listed record ahead of the first request.
    ///
    /// Returns the number of detail pages generated.
    pub async fn prerender(&self) -> usize {
        if !self.index.strategy().is_static() {
            return 0;
        }

        let fetch = index_fetcher(Arc::clone(&self.source));
        let index = match self.index.prime((), fetch).await {
            Ok(index) => index,
            Err(err) => {
                tracing::error!(%err, "error fetching pokemon paths");
                return 0;
            }
        };

        let mut generated = 0;
        for id in Pokemon::ids(&index) {
            let fetch = record_fetcher(Arc::clone(&self.source), id);
            if self.records.prime(id, fetch).await.is_ok() {
                generated += 1;
            }
        }
        tracing::info!(generated, listed = index.len(), "pokemon pages generated");
        generated
    }

    /// Seconds after which the Pokémon pages should reload themselves.
    #[must_use]
    pub fn refresh_hint(&self) -> Option<u64> {
        self.index.strategy().refresh_hint()
    }

    pub fn shutdown(&self) {
        self.index.shutdown();
        self.records.shutdown();
    }
}

fn index_fetcher<S>(source: Arc<S>) -> impl Fn() -> BoxFetch<Vec<Pokemon>> + Send + Sync + 'static
where
    S: PokemonSource + Send + Sync + 'static,
{
    move || -> BoxFetch<Vec<Pokemon>> {
        let source = Arc::clone(&source);
        Box::pin(async move {
            source
                .list_pokemon()
                .await
                .inspect_err(|err| tracing::warn!(%err, "error fetching pokemon index"))
        })
    }
}

fn record_fetcher<S>(
    source: Arc<S>,
    id: PokemonId,
) -> impl Fn() -> BoxFetch<Pokemon> + Send + Sync + 'static
where
    S: PokemonSource + Send + Sync + 'static,
{
    move || -> BoxFetch<Pokemon> {
        let source = Arc::clone(&source);
        Box::pin(async move {
            source
                .get_pokemon(id)
                .await
                .inspect_err(|err| tracing::warn!(%err, %id, "error fetching pokemon"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use minisite_domain::error::FetchError;
    use minisite_domain::strategy::{FailurePolicy, LoadStrategy};

    #[derive(Default)]
    struct InMemoryPokemonSource {
        index: Option<Vec<Pokemon>>,
        records: HashMap<PokemonId, Result<Pokemon, FetchError>>,
        record_calls: AtomicUsize,
    }

    impl InMemoryPokemonSource {
        fn with_pokemon(all: Vec<Pokemon>) -> Self {
            Self {
                records: all.iter().map(|p| (p.id, Ok(p.clone()))).collect(),
                index: Some(all),
                record_calls: AtomicUsize::new(0),
            }
        }
    }

    impl PokemonSource for InMemoryPokemonSource {
        fn list_pokemon(&self) -> impl Future<Output = Result<Vec<Pokemon>, FetchError>> + Send {
            let result = self
                .index
                .clone()
                .ok_or_else(|| status(500, "Internal Server Error"));
            async { result }
        }

        fn get_pokemon(
            &self,
            id: PokemonId,
        ) -> impl Future<Output = Result<Pokemon, FetchError>> + Send {
            self.record_calls.fetch_add(1, Ordering::SeqCst);
            let result = self
                .records
                .get(&id)
                .cloned()
                .unwrap_or_else(|| Err(status(404, "Not Found")));
            async { result }
        }

        fn image_url(&self, pokemon: &Pokemon) -> String {
            pokemon.image_url("https://assets.test")
        }
    }

    fn status(status: u16, reason: &str) -> FetchError {
        FetchError::Status {
            status,
            reason: reason.to_string(),
        }
    }

    fn pikachu() -> Pokemon {
        Pokemon {
            id: PokemonId::new(25),
            name: "Pikachu".to_string(),
            image: "images/pikachu.jpg".to_string(),
            types: vec!["Electric".to_string()],
            stats: Vec::new(),
        }
    }

    fn on_request() -> PageSettings {
        PageSettings::new(LoadStrategy::OnRequest, FailurePolicy::Clear)
    }

    #[tokio::test]
    async fn should_list_index_when_fetch_succeeds() {
        let source = InMemoryPokemonSource::with_pokemon(vec![pikachu()]);
        let svc = PokemonService::new(source, on_request());

        let index = svc.list_pokemon().await;

        assert_eq!(index, vec![pikachu()]);
    }

    #[tokio::test]
    async fn should_return_empty_index_when_fetch_fails() {
        let svc = PokemonService::new(InMemoryPokemonSource::default(), on_request());
        assert!(svc.list_pokemon().await.is_empty());
    }

    #[tokio::test]
    async fn should_show_not_found_when_remote_returns_404() {
        let svc = PokemonService::new(InMemoryPokemonSource::default(), on_request());

        assert_eq!(
            svc.pokemon(PokemonId::new(9999)).await,
            DetailView::NotFound
        );
    }

    #[tokio::test]
    async fn should_show_not_found_when_record_is_empty() {
        let mut source = InMemoryPokemonSource::default();
        source
            .records
            .insert(PokemonId::new(3), Err(FetchError::NotFound));
        let svc = PokemonService::new(source, on_request());

        assert_eq!(svc.pokemon(PokemonId::new(3)).await, DetailView::NotFound);
    }

    #[tokio::test]
    async fn should_show_reason_when_fetch_fails_otherwise() {
        let mut source = InMemoryPokemonSource::default();
        source
            .records
            .insert(PokemonId::new(4), Err(status(503, "Service Unavailable")));
        let svc = PokemonService::new(source, on_request());

        assert_eq!(
            svc.pokemon(PokemonId::new(4)).await,
            DetailView::Error("Failed to fetch data: Service Unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn should_resolve_image_url_through_source() {
        let svc = PokemonService::new(InMemoryPokemonSource::default(), on_request());

        assert_eq!(
            svc.image_url(&pikachu()),
            "https://assets.test/pokemon-main/images/pikachu.jpg"
        );
    }

    #[tokio::test]
    async fn should_prerender_every_indexed_record() {
        let svc = PokemonService::new(
            InMemoryPokemonSource::with_pokemon(vec![pikachu()]),
            PageSettings::new(LoadStrategy::revalidating(30), FailurePolicy::Clear),
        );

        assert_eq!(svc.prerender().await, 1);
        assert_eq!(
            svc.pokemon(PokemonId::new(25)).await,
            DetailView::Ready(pikachu())
        );
        assert_eq!(svc.source.record_calls.load(Ordering::SeqCst), 1);
        assert_eq!(svc.refresh_hint(), Some(30));
    }

    #[tokio::test(start_paused = true)]
    async fn should_show_loading_for_record_missing_from_prerender() {
        let svc = PokemonService::new(
            InMemoryPokemonSource::with_pokemon(vec![pikachu()]),
            PageSettings::default(),
        );

        assert_eq!(svc.pokemon(PokemonId::new(25)).await, DetailView::Loading);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(
            svc.pokemon(PokemonId::new(25)).await,
            DetailView::Ready(pikachu())
        );
    }
}
