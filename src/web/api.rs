//! Snippet REST API and bundled UI page.
//!
//! Wire contract:
//! - `GET /` and `/index.html` serve the static UI page
//! - `GET /api/snippets?search=&tag=` lists, `GET /api/snippet/{id}` reads
//! - `GET /api/tags` enumerates distinct tags
//! - `POST /api/snippets` creates, `POST /api/snippet/{id}/update` and
//!   `/delete` mutate; both mutations answer `{"success": true}` even for
//!   missing ids (see DESIGN.md)
//! - malformed JSON bodies get a 400, unknown paths a 404

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::store::{Snippet, SnippetDraft, Store};

static INDEX_HTML: &str = include_str!("page.html");

pub struct AppState {
    pub store: Store,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    search: Option<String>,
    tag: Option<String>,
}

#[derive(Debug, Serialize)]
struct SnippetsResponse {
    snippets: Vec<Snippet>,
}

#[derive(Debug, Serialize)]
struct TagsResponse {
    tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    id: i64,
    success: bool,
}

/// Incoming snippet fields; every field is optional and defaulted.
#[derive(Debug, Default, Deserialize)]
struct SnippetPayload {
    title: Option<String>,
    content: Option<String>,
    language: Option<String>,
    tags: Option<String>,
}

impl SnippetPayload {
    fn into_draft(self) -> SnippetDraft {
        SnippetDraft {
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            content: self.content.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

/// An empty body is an empty object; anything else must parse as JSON.
fn parse_payload(body: &web::Bytes) -> Result<SnippetPayload, HttpResponse> {
    if body.is_empty() {
        return Ok(SnippetPayload::default());
    }

    serde_json::from_slice(body).map_err(|_| {
        HttpResponse::BadRequest().json(serde_json::json!({"error": "Invalid JSON"}))
    })
}

fn storage_error(e: rusqlite::Error) -> HttpResponse {
    log::error!("storage failure: {e}");
    HttpResponse::InternalServerError().json(serde_json::json!({"error": e.to_string()}))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn list_snippets(data: web::Data<AppState>, query: web::Query<ListQuery>) -> HttpResponse {
    match data.store.list(query.search.as_deref(), query.tag.as_deref()) {
        Ok(snippets) => HttpResponse::Ok().json(SnippetsResponse { snippets }),
        Err(e) => storage_error(e),
    }
}

async fn get_snippet(data: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    // a non-numeric id matches nothing, same as an unknown numeric one
    let found = match path.parse::<i64>() {
        Ok(id) => match data.store.get(id) {
            Ok(found) => found,
            Err(e) => return storage_error(e),
        },
        Err(_) => None,
    };

    match found {
        Some(snippet) => HttpResponse::Ok().json(snippet),
        None => HttpResponse::NotFound().json(serde_json::json!({"error": "Snippet not found"})),
    }
}

async fn list_tags(data: web::Data<AppState>) -> HttpResponse {
    match data.store.distinct_tags() {
        Ok(tags) => HttpResponse::Ok().json(TagsResponse { tags }),
        Err(e) => storage_error(e),
    }
}

async fn create_snippet(data: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let payload = match parse_payload(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match data.store.create(&payload.into_draft()) {
        Ok(id) => HttpResponse::Ok().json(CreatedResponse { id, success: true }),
        Err(e) => storage_error(e),
    }
}

/// Reports success even when the id does not exist; the store-level
/// not-found signal is deliberately not surfaced here.
async fn update_snippet(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let payload = match parse_payload(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if let Ok(id) = path.parse::<i64>() {
        if let Err(e) = data.store.update(id, &payload.into_draft()) {
            return storage_error(e);
        }
    }

    HttpResponse::Ok().json(serde_json::json!({"success": true}))
}

async fn delete_snippet(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    // the body is ignored, but a malformed one is still rejected
    if let Err(resp) = parse_payload(&body) {
        return resp;
    }

    if let Ok(id) = path.parse::<i64>() {
        if let Err(e) = data.store.delete(id) {
            return storage_error(e);
        }
    }

    HttpResponse::Ok().json(serde_json::json!({"success": true}))
}

/// Catch-all for unknown paths: bare 404 for reads, JSON error for writes.
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == actix_web::http::Method::POST {
        HttpResponse::NotFound().json(serde_json::json!({"error": "Not found"}))
    } else {
        HttpResponse::NotFound().finish()
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/index.html", web::get().to(index))
        .route("/api/snippets", web::get().to(list_snippets))
        .route("/api/snippets", web::post().to(create_snippet))
        .route("/api/snippet/{id}", web::get().to(get_snippet))
        .route("/api/snippet/{id}/update", web::post().to(update_snippet))
        .route("/api/snippet/{id}/delete", web::post().to(delete_snippet))
        .route("/api/tags", web::get().to(list_tags));
}
