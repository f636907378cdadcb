//! Request extraction with enveloped rejections

use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::ApiError, validation};

/// Like [`axum::Json`], but only JSON objects are accepted and every
/// rejection becomes a 400 `{ "errors": ... }`
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        // Derived struct impls also accept positional arrays
        if !value.is_object() {
            return Err(ApiError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
    }
}

/// The validated `:contactId` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ContactId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        Ok(Self(validation::validate_contact_id(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Pair {
        first: Option<String>,
        second: Option<String>,
    }

    fn json_request(body: Value) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_an_object() {
        let ApiJson(pair) = ApiJson::<Pair>::from_request(json_request(json!({ "first": "a" })), &())
            .await
            .unwrap();

        assert_eq!(pair.first.as_deref(), Some("a"));
        assert_eq!(pair.second, None);
    }

    #[tokio::test]
    async fn rejects_arrays_matching_the_field_count() {
        let err = ApiJson::<Pair>::from_request(json_request(json!(["a", "b"])), &())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_a_missing_content_type() {
        let request = Request::builder()
            .body(Body::from(json!({ "first": "a" }).to_string()))
            .unwrap();

        let err = ApiJson::<Pair>::from_request(request, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
