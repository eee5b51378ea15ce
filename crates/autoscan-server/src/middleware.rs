use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id echoed in every response envelope's `meta.request_id`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Tags every API call with a correlation id.
///
/// A caller-supplied non-blank `x-request-id` is kept; otherwise a fresh v4
/// UUID is minted. Handlers read it back through `Extension<RequestId>` and
/// the header is echoed on the reply.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    res
}
