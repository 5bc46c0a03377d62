use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use comments_api::{Comment, CommentId, Error, NewComment, PostId};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod error;
use error::ApiError;

/// Comments per post in generated data, like the public mock API
const COMMENTS_PER_POST: u64 = 5;

/// In-memory stand-in for the public mock REST API
///
/// Like the real thing, creations and deletions are answered as if they
/// worked, but the comment list never changes.
#[derive(Debug)]
pub struct MockServer {
    comments: Vec<Comment>,
    failing: bool,
    creations: Vec<NewComment>,
    deletions: Vec<CommentId>,
}

pub type SharedServer = Arc<Mutex<MockServer>>;

impl MockServer {
    pub fn new(comments: Vec<Comment>) -> MockServer {
        MockServer {
            comments,
            failing: false,
            creations: Vec::new(),
            deletions: Vec::new(),
        }
    }

    /// `count` lorem-ipsum comments with ids `1..=count`, the same for a
    /// given seed
    pub fn generate(count: usize, seed: u64) -> MockServer {
        MockServer::new(generate_comments(count, seed))
    }

    pub fn from_fixture(path: &Path) -> anyhow::Result<MockServer> {
        let data = std::fs::read(path).with_context(|| format!("reading fixture {path:?}"))?;
        let comments =
            serde_json::from_slice(&data).with_context(|| format!("parsing fixture {path:?}"))?;
        Ok(MockServer::new(comments))
    }

    /// While failing, every request is answered with an internal error
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Every creation request received so far
    pub fn test_creations(&self) -> &[NewComment] {
        &self.creations
    }

    /// Every deletion request received so far
    pub fn test_deletions(&self) -> &[CommentId] {
        &self.deletions
    }

    fn check_failing(&self) -> Result<(), Error> {
        match self.failing {
            true => Err(Error::Unknown(String::from("failure injected by test"))),
            false => Ok(()),
        }
    }

    pub fn list(&self) -> Result<Vec<Comment>, Error> {
        self.check_failing()?;
        Ok(self.comments.clone())
    }

    pub fn create(&mut self, c: NewComment) -> Result<Comment, Error> {
        self.check_failing()?;
        self.creations.push(c.clone());
        Ok(Comment {
            id: CommentId(self.comments.len() as u64 + 1),
            post_id: PostId::DEFAULT,
            name: c.name,
            email: c.email,
            body: c.body,
        })
    }

    pub fn delete(&mut self, id: CommentId) -> Result<(), Error> {
        self.check_failing()?;
        self.deletions.push(id);
        Ok(())
    }
}

pub fn generate_comments(count: usize, seed: u64) -> Vec<Comment> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count as u64)
        .map(|id| {
            let name_len = rng.gen_range(3..8);
            let body_len = rng.gen_range(15..40);
            let user = lipsum::lipsum_words_with_rng(&mut rng, 1).to_lowercase();
            let domain = lipsum::lipsum_words_with_rng(&mut rng, 1).to_lowercase();
            Comment {
                id: CommentId(id),
                post_id: PostId((id - 1) / COMMENTS_PER_POST + 1),
                name: lipsum::lipsum_words_with_rng(&mut rng, name_len).to_lowercase(),
                email: format!("{}@{}.biz", sanitize(&user), sanitize(&domain)),
                body: lipsum::lipsum_words_with_rng(&mut rng, body_len).to_lowercase(),
            }
        })
        .collect()
}

// lipsum words may carry punctuation
fn sanitize(word: &str) -> String {
    let w = word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>();
    match w.is_empty() {
        true => String::from("user"),
        false => w,
    }
}

async fn list_comments(State(server): State<SharedServer>) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(server.lock().await.list()?))
}

async fn create_comment(
    State(server): State<SharedServer>,
    Json(data): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let created = server.lock().await.create(data)?;
    tracing::debug!(id = %created.id, "answered comment creation");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_comment(
    State(server): State<SharedServer>,
    UrlPath(id): UrlPath<CommentId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    server.lock().await.delete(id)?;
    tracing::debug!(%id, "answered comment deletion");
    Ok(Json(serde_json::json!({})))
}

pub fn router(server: SharedServer) -> Router {
    Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route("/comments/:id", delete(delete_comment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Serve `server` on an ephemeral localhost port, in the background
pub async fn spawn(server: MockServer) -> anyhow::Result<(SocketAddr, SharedServer)> {
    let shared = Arc::new(Mutex::new(server));
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").context("binding mock server socket")?;
    listener
        .set_nonblocking(true)
        .context("making mock server socket non-blocking")?;
    let addr = listener
        .local_addr()
        .context("retrieving mock server address")?;
    let serve = axum::Server::from_tcp(listener)
        .context("starting mock server")?
        .serve(router(shared.clone()).into_make_service());
    tokio::spawn(async move {
        if let Err(e) = serve.await {
            tracing::error!(?e, "mock server stopped");
        }
    });
    tracing::info!("mock server listening on {}", addr);
    Ok((addr, shared))
}
