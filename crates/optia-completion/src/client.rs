use std::future::Future;
use std::pin::Pin;

use optia_core::models::message::Message;

use crate::error::CompletionError;
use crate::params::GenerationParams;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A hosted chat completion endpoint.
///
/// Methods return boxed futures for dyn compatibility.
pub trait CompletionClient: Send + Sync {
    /// Short provider name used in logs, e.g. `"azure_openai"`.
    fn provider(&self) -> &str;

    /// Send `messages` in order and return the text of the first reply.
    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        params: &'a GenerationParams,
    ) -> BoxFuture<'a, Result<String, CompletionError>>;
}
