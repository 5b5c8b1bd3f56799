use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json, RequestExt,
};

use crate::error::ApiError;

/// Request body accepted as `application/json` or, as a fallback, form
/// encoding. Everything the API produces is JSON regardless.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: 'static,
    Json<T>: FromRequest<()>,
    Form<T>: FromRequest<()>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = req
                .extract::<Form<T>, _>()
                .await
                .map_err(|_| ApiError::Validation("Malformed form body".into()))?;
            return Ok(Self(value));
        }

        let Json(value) = req
            .extract::<Json<T>, _>()
            .await
            .map_err(|_| ApiError::Validation("Malformed JSON body".into()))?;
        Ok(Self(value))
    }
}
