//! Blog API source.

use serde::Deserialize;

use minisite_app::ports::BlogSource;
use minisite_domain::blog::BlogPost;
use minisite_domain::error::FetchError;
use minisite_domain::id::BlogPostId;

use crate::client::RemoteClient;

/// The listing endpoint has served both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Wrapped { blog_posts: Vec<BlogPost> },
    Bare(Vec<BlogPost>),
}

impl From<Listing> for Vec<BlogPost> {
    fn from(listing: Listing) -> Self {
        match listing {
            Listing::Wrapped { blog_posts } => blog_posts,
            Listing::Bare(posts) => posts,
        }
    }
}

/// [`BlogSource`] backed by `{api}/blog-posts`.
#[derive(Debug, Clone)]
pub struct RemoteBlogSource {
    client: RemoteClient,
}

impl RemoteBlogSource {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl BlogSource for RemoteBlogSource {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, FetchError> {
        let url = self.client.api_url("blog-posts");
        let listing: Listing = self.client.get_json(&url).await?;
        Ok(listing.into())
    }

    async fn get_post(&self, id: BlogPostId) -> Result<BlogPost, FetchError> {
        let url = self.client.api_url(&format!("blog-posts/{id}"));
        Ok(self.client.get_json(&url).await?)
    }
}
