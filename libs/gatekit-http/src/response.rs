use bytes::{Bytes, BytesMut};
use http::Response;
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// How much of a failed response body is kept for logs.
const STATUS_PREVIEW_LIMIT: usize = 512;

/// Decoded response body as produced by the client stack.
pub type ResponseBody = BoxBody<Bytes, tower::BoxError>;

/// Collect `body`, failing as soon as it grows past `limit` bytes.
pub(crate) async fn read_limited(body: ResponseBody, limit: usize) -> Result<Bytes, HttpError> {
    let mut body = std::pin::pin!(body);
    let mut collected = BytesMut::new();
    while let Some(frame) = body.frame().await {
        let Ok(chunk) = frame.map_err(HttpError::Transport)?.into_data() else {
            continue;
        };
        let size = collected.len() + chunk.len();
        if size > limit {
            return Err(HttpError::BodyTooLarge {
                limit,
                actual: size,
            });
        }
        collected.extend_from_slice(&chunk);
    }
    Ok(collected.freeze())
}

/// Decode a 2xx JSON body. Other statuses become `HttpError::HttpStatus`
/// carrying the start of whatever the registry sent back.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: Response<ResponseBody>,
    limit: usize,
) -> Result<T, HttpError> {
    let (parts, body) = response.into_parts();
    if !parts.status.is_success() {
        let body_preview = read_limited(body, limit.min(STATUS_PREVIEW_LIMIT))
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        return Err(HttpError::HttpStatus {
            status: parts.status,
            body_preview,
        });
    }

    let bytes = read_limited(body, limit).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
