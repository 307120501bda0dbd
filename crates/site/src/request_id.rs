// Request correlation ids
// Decision: Keep an incoming x-request-id, otherwise mint a UUID v7; echo it on the response

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let id = match request.headers().get(REQUEST_ID_HEADER) {
        Some(existing) => existing.clone(),
        None => {
            let minted = HeaderValue::try_from(Uuid::now_v7().to_string());
            match minted {
                Ok(value) => {
                    request
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value.clone());
                    value
                }
                Err(_) => return next.run(request).await,
            }
        }
    };

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), id);
    response
}
