//! Blog service — use-cases behind the blog listing and detail pages.

use std::sync::Arc;

use minisite_domain::blog::BlogPost;
use minisite_domain::error::FetchError;
use minisite_domain::id::BlogPostId;
use minisite_domain::strategy::PageSettings;
use minisite_domain::view::DetailView;

use crate::loader::{BoxFetch, Load, Loader};
use crate::ports::BlogSource;

/// Application service for the blog pages.
pub struct BlogService<S> {
    source: Arc<S>,
    listing: Loader<(), Vec<BlogPost>>,
    posts: Loader<BlogPostId, BlogPost>,
}

impl<S> BlogService<S>
where
    S: BlogSource + Send + Sync + 'static,
{
    /// Create a new service backed by the given source.
    ///
    /// Detail pages fall back to a loading view for posts that were not
    /// pre-rendered.
    pub fn new(source: S, listing: PageSettings, detail: PageSettings) -> Self {
        Self {
            source: Arc::new(source),
            listing: Loader::from_settings(listing),
            posts: Loader::from_settings(detail).with_fallback(true),
        }
    }

    /// All posts in source order; empty when the listing could not be fetched.
    pub async fn list_posts(&self) -> Vec<BlogPost> {
        let fetch = listing_fetcher(Arc::clone(&self.source));
        match self.listing.load((), fetch).await {
            Load::Done(Ok(posts)) => posts,
            Load::Done(Err(_)) | Load::Pending => Vec::new(),
        }
    }

    /// The detail view for one post.
    pub async fn post(&self, id: BlogPostId) -> DetailView<BlogPost> {
        let fetch = post_fetcher(Arc::clone(&self.source), id);
        match self.posts.load(id, fetch).await {
            Load::Pending => DetailView::Loading,
            Load::Done(outcome) => DetailView::from_outcome(outcome, |err| {
                (!matches!(err, FetchError::NotFound))
                    .then(|| format!("Failed to fetch blog with id {id}"))
            }),
        }
    }

    /// Fetch the listing and every listed post ahead of the first request.
    ///
    /// Returns the number of detail pages generated. A failed listing is
    /// logged and generates none; detail pages then load on first visit.
    pub async fn prerender(&self) -> usize {
        if !self.listing.strategy().is_static() && !self.posts.strategy().is_static() {
            return 0;
        }

        let fetch = listing_fetcher(Arc::clone(&self.source));
        let posts = match self.listing.prime((), fetch).await {
            Ok(posts) => posts,
            Err(err) => {
                tracing::error!(%err, "error fetching blog paths");
                return 0;
            }
        };

        if !self.posts.strategy().is_static() {
            return 0;
        }

        let mut generated = 0;
        for id in BlogPost::ids(&posts) {
            let fetch = post_fetcher(Arc::clone(&self.source), id);
            if self.posts.prime(id, fetch).await.is_ok() {
                generated += 1;
            }
        }
        tracing::info!(generated, listed = posts.len(), "blog pages generated");
        generated
    }

    /// Seconds after which the listing page should reload itself.
    #[must_use]
    pub fn listing_refresh(&self) -> Option<u64> {
        self.listing.strategy().refresh_hint()
    }

    /// Seconds after which a post page should reload itself.
    #[must_use]
    pub fn detail_refresh(&self) -> Option<u64> {
        self.posts.strategy().refresh_hint()
    }

    /// Stop any background polling.
    pub fn shutdown(&self) {
        self.listing.shutdown();
        self.posts.shutdown();
    }
}

fn listing_fetcher<S>(
    source: Arc<S>,
) -> impl Fn() -> BoxFetch<Vec<BlogPost>> + Send + Sync + 'static
where
    S: BlogSource + Send + Sync + 'static,
{
    move || -> BoxFetch<Vec<BlogPost>> {
        let source = Arc::clone(&source);
        Box::pin(async move {
            source
                .list_posts()
                .await
                .inspect_err(|err| tracing::warn!(%err, "error fetching blogs"))
        })
    }
}

fn post_fetcher<S>(
    source: Arc<S>,
    id: BlogPostId,
) -> impl Fn() -> BoxFetch<BlogPost> + Send + Sync + 'static
where
    S: BlogSource + Send + Sync + 'static,
{
    move || -> BoxFetch<BlogPost> {
        let source = Arc::clone(&source);
        Box::pin(async move {
            source
                .get_post(id)
                .await
                .inspect_err(|err| tracing::warn!(%err, %id, "error fetching blog"))
        })
    }
}
