//! Source ports — read-only access to the remote services behind each page.
//!
//! Implementations report every failure as a [`FetchError`]; deciding what a
//! failure looks like on screen is the services' job, not the adapters'.

use std::future::Future;
use std::sync::Arc;

use minisite_domain::blog::BlogPost;
use minisite_domain::clock::CurrentTime;
use minisite_domain::error::FetchError;
use minisite_domain::id::{BlogPostId, PokemonId};
use minisite_domain::pokemon::Pokemon;

/// Remote blog service.
pub trait BlogSource {
    /// Fetch every post, in the order the service returns them.
    fn list_posts(&self) -> impl Future<Output = Result<Vec<BlogPost>, FetchError>> + Send;

    /// Fetch a single post.
    fn get_post(&self, id: BlogPostId)
    -> impl Future<Output = Result<BlogPost, FetchError>> + Send;
}

/// Remote Pokémon dataset.
pub trait PokemonSource {
    /// Fetch the dataset index.
    fn list_pokemon(&self) -> impl Future<Output = Result<Vec<Pokemon>, FetchError>> + Send;

    /// Fetch a single Pokémon record.
    fn get_pokemon(
        &self,
        id: PokemonId,
    ) -> impl Future<Output = Result<Pokemon, FetchError>> + Send;

    /// Resolve a record's relative image reference into an absolute URL.
    fn image_url(&self, pokemon: &Pokemon) -> String;
}

/// Remote clock.
pub trait ClockSource {
    /// Fetch the service's current time.
    fn current_time(&self) -> impl Future<Output = Result<CurrentTime, FetchError>> + Send;
}

impl<T: BlogSource + Send + Sync> BlogSource for Arc<T> {
    fn list_posts(&self) -> impl Future<Output = Result<Vec<BlogPost>, FetchError>> + Send {
        (**self).list_posts()
    }

    fn get_post(
        &self,
        id: BlogPostId,
    ) -> impl Future<Output = Result<BlogPost, FetchError>> + Send {
        (**self).get_post(id)
    }
}

impl<T: PokemonSource + Send + Sync> PokemonSource for Arc<T> {
    fn list_pokemon(&self) -> impl Future<Output = Result<Vec<Pokemon>, FetchError>> + Send {
        (**self).list_pokemon()
    }

    fn get_pokemon(
        &self,
        id: PokemonId,
    ) -> impl Future<Output = Result<Pokemon, FetchError>> + Send {
        (**self).get_pokemon(id)
    }

    fn image_url(&self, pokemon: &Pokemon) -> String {
        (**self).image_url(pokemon)
    }
}

impl<T: ClockSource + Send + Sync> ClockSource for Arc<T> {
    fn current_time(&self) -> impl Future<Output = Result<CurrentTime, FetchError>> + Send {
        (**self).current_time()
    }
}
