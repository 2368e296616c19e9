//! Blog post — a read-only article owned by the remote blog service.

use serde::{Deserialize, Serialize};

use crate::id::BlogPostId;

/// A blog post as rendered by the blog pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub content: String,
}

impl BlogPost {
    /// Collect the ids of a listing, preserving source order.
    ///
    /// Used to pre-render one detail page per listed post.
    #[must_use]
    pub fn ids(posts: &[Self]) -> Vec<BlogPostId> {
        posts.iter().map(|post| post.id).collect()
    }
}
