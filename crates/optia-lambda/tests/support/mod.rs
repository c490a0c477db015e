//! Shared fixtures for driving the router in-process.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use optia_completion::client::{BoxFuture, CompletionClient};
use optia_completion::error::CompletionError;
use optia_completion::params::GenerationParams;
use optia_core::keys;
use optia_core::models::message::Message;
use optia_lambda::config::Retrieval;
use optia_lambda::state::AppState;
use optia_storage::memory::MemoryBlobStore;

pub const KEYWORDS: &str = "\
=== DESCRIPCIÓN DE GUÍAS ===
G1 - Guía de estudio de mercado
G2 - Guía de costos de producción

=== PALABRAS CLAVE ===
oferta, mercado -> G1
costos -> G2
";

/// A completion client that replays scripted results and records every
/// message list it was sent.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedCompletion {
    pub fn replying(replies: &[&str]) -> Self {
        let scripted = Self::default();
        for reply in replies {
            scripted.push(Ok(reply.to_string()));
        }
        scripted
    }

    pub fn failing(status: u16, message: &str) -> Self {
        let scripted = Self::default();
        scripted.push(Err(CompletionError::Upstream {
            status,
            message: message.to_string(),
        }));
        scripted
    }

    pub fn push(&self, reply: Result<String, CompletionError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CompletionClient for ScriptedCompletion {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        _params: &'a GenerationParams,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(messages.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CompletionError::Transport("no scripted reply".to_string())))
        })
    }
}

pub struct Harness {
    pub app: Router,
    pub chat_bucket: Arc<MemoryBlobStore>,
    pub documents_bucket: Arc<MemoryBlobStore>,
    pub completion: Arc<ScriptedCompletion>,
}

impl Harness {
    pub async fn new(completion: ScriptedCompletion, retrieval: Retrieval) -> Self {
        Self::build(completion, retrieval, false).await
    }

    pub async fn build(completion: ScriptedCompletion, retrieval: Retrieval, detail: bool) -> Self {
        let chat_bucket = Arc::new(MemoryBlobStore::new("chatia"));
        let documents_bucket = Arc::new(MemoryBlobStore::new("documents"));
        chat_bucket.insert(keys::KEYWORDS, KEYWORDS).await;
        documents_bucket
            .insert("G1/Guia-estudio-de-mercado.pdf", "%PDF")
            .await;

        let completion = Arc::new(completion);
        let state = AppState::new(
            chat_bucket.clone(),
            documents_bucket.clone(),
            keys::KEYWORDS,
            completion.clone(),
            GenerationParams::default(),
            retrieval,
        )
        .with_error_detail(detail);

        Self {
            app: optia_lambda::router(state),
            chat_bucket,
            documents_bucket,
            completion,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    pub async fn post(&self, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        let (status, _, body) = self.send(request).await;
        (status, body)
    }

    pub async fn stored_transcript(&self, user: &str, chat_id: &str) -> Option<Vec<Message>> {
        self.chat_bucket
            .snapshot(&keys::transcript(user, chat_id))
            .await
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }
}
