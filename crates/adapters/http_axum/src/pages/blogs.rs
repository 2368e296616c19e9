//! Blog pages.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

use minisite_app::ports::{BlogSource, ClockSource, PokemonSource};
use minisite_domain::blog::BlogPost;
use minisite_domain::id::BlogPostId;
use minisite_domain::view::DetailView;

use super::{back_href, detail_refresh, detail_status};
use crate::state::AppState;

/// Blog listing template.
#[derive(Template)]
#[template(path = "blog_list.html")]
pub struct BlogListTemplate {
    refresh_seconds: Option<u64>,
    posts: Vec<BlogPost>,
}

impl IntoResponse for BlogListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Blog detail template.
#[derive(Template)]
#[template(path = "blog_detail.html")]
pub struct BlogDetailTemplate {
    refresh_seconds: Option<u64>,
    view: DetailView<BlogPost>,
    back_href: String,
}

impl IntoResponse for BlogDetailTemplate {
    fn into_response(self) -> Response {
        let status = detail_status(&self.view);
        (status, Html(self.to_string())).into_response()
    }
}

/// `GET /blogs` — every post, linking to its detail page.
pub async fn list<BS, PS, CS>(State(state): State<AppState<BS, PS, CS>>) -> BlogListTemplate
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    BlogListTemplate {
        refresh_seconds: state.blog_service.listing_refresh(),
        posts: state.blog_service.list_posts().await,
    }
}

/// `GET /blogs/{id}` — one post.
pub async fn detail<BS, PS, CS>(
    State(state): State<AppState<BS, PS, CS>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> BlogDetailTemplate
where
    BS: BlogSource + Send + Sync + 'static,
    PS: PokemonSource + Send + Sync + 'static,
    CS: ClockSource + Send + Sync + 'static,
{
    let view = match id.parse::<BlogPostId>() {
        Ok(id) => state.blog_service.post(id).await,
        Err(_) => {
            tracing::debug!(%id, "ignoring unparseable blog id");
            DetailView::NotFound
        }
    };

    BlogDetailTemplate {
        refresh_seconds: detail_refresh(&view, state.blog_service.detail_refresh()),
        view,
        back_href: back_href(&headers, "/blogs"),
    }
}
