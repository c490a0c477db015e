use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::routes::chat::USER_ID_HEADER;

/// Access logging middleware.
///
/// Logs every request as one structured `api_request` event. With the JSON
/// subscriber installed in `main`, these land in CloudWatch.
pub async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let user = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(
        method = %method,
        path = %path,
        user = %user,
        status = status,
        "api_request"
    );

    response
}
