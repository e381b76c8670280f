use super::error::ApiError;
use super::state::ApiState;
use crate::security::token::TokenService;
use axum::Json;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Query, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lobby_domain::registry::FeatureSlice;
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejections use the uniform [`ApiError`] body (400).
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// Query string extractor with the same 400 body as [`Payload`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// The authenticated admin behind a `Authorization: Bearer <token>` header.
///
/// Adding this extractor to a handler makes the route admin-only; failures answer 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Admin record key.
    pub id: String,
    pub name: String,
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer(parts).ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;
        let claims = TokenService::from_ref(state).verify(token)?;

        Ok(Self { id: claims.sub, name: claims.name })
    }
}

/// A registered feature slice, cloned out of [`ApiState`].
///
/// A missing slice is a wiring bug and answers 500.
#[derive(Debug, Clone)]
pub struct Slice<T>(pub T);

impl<T> FromRequestParts<ApiState> for Slice<T>
where
    T: FeatureSlice + Clone,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &ApiState) -> Result<Self, Self::Rejection> {
        state.try_get_slice::<T>().cloned().map(Self).map_err(|err| ApiError::from(err.to_string()))
    }
}

fn bearer(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use lobby_domain::config::JwtConfig;

    #[derive(Clone)]
    struct TestState(TokenService);

    impl FromRef<TestState> for TokenService {
        fn from_ref(state: &TestState) -> Self {
            state.0.clone()
        }
    }

    fn state() -> TestState {
        TestState(TokenService::new(&JwtConfig::default()).unwrap())
    }

    async fn extract(state: &TestState, header: Option<&str>) -> Result<AdminSession, ApiError> {
        let mut builder = HttpRequest::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        AdminSession::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn valid_bearer_yields_session() {
        let state = state();
        let token = state.0.issue("Ab3x", "Site Admin").unwrap().token;

        let session = extract(&state, Some(&format!("Bearer {token}"))).await.unwrap();
        assert_eq!(session, AdminSession { id: "Ab3x".into(), name: "Site Admin".into() });

        assert!(extract(&state, Some(&format!("bearer {token}"))).await.is_ok());
    }

    #[tokio::test]
    async fn missing_or_bad_tokens_are_401() {
        let state = state();
        for header in [None, Some("Bearer"), Some("Basic abc"), Some("Bearer nope")] {
            let err = extract(&state, header).await.unwrap_err();
            assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED, "{header:?}");
        }
    }

    #[derive(Debug, serde::Deserialize)]
    struct Filter {
        active: Option<bool>,
    }

    #[tokio::test]
    async fn query_params_reject_with_400() {
        let (mut parts, ()) = HttpRequest::builder().uri("/?active=true").body(()).unwrap().into_parts();
        let Params(filter) = Params::<Filter>::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(filter.active, Some(true));

        let (mut parts, ()) = HttpRequest::builder().uri("/?active=maybe").body(()).unwrap().into_parts();
        let err = Params::<Filter>::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
