use crate::common::error::{AppError, ServiceResult};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use tracing::warn;

pub const LOGOUT_REQUEST_PARAM: &str = "logoutRequest";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const REQUEST_LIMIT: usize = 1024 * 1024;

/// Inbound single-sign-out callback, reduced to the parts that matter for
/// locating the CAS session index.
#[derive(Debug, Clone)]
pub struct LogoutNotification {
    pub method: Method,
    pub content_type: Option<String>,
    pub logout_request: Option<String>,
}

impl LogoutNotification {
    pub fn new(method: Method, content_type: Option<&str>, logout_request: Option<&str>) -> Self {
        Self {
            method,
            content_type: content_type.map(str::to_owned),
            logout_request: logout_request.map(str::to_owned),
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| starts_with_ignore_case(content_type, "multipart/"))
    }

    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }
}

/// Bare success response returned to the CAS server for every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement;

impl IntoResponse for Acknowledgement {
    fn into_response(self) -> Response {
        StatusCode::OK.into_response()
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn find_param(encoded: &[u8], name: &str) -> Option<String> {
    url::form_urlencoded::parse(encoded)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn is_form_body(content_type: Option<&str>) -> bool {
    content_type.is_none_or(|content_type| starts_with_ignore_case(content_type, FORM_CONTENT_TYPE))
}

async fn read_logout_request(req: Request) -> ServiceResult<LogoutNotification> {
    let method = req.method().clone();
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().map(str::to_owned))
        .transpose()
        .map_err(|_| AppError::DecodingRequestFailed)?;
    let query = req.uri().query().map(str::to_owned);
    let mut notification = LogoutNotification {
        method,
        content_type,
        logout_request: None,
    };

    // multipart bodies are never inspected
    if notification.is_multipart() {
        return Ok(notification);
    }

    let body: Option<Bytes> = if is_form_body(notification.content_type.as_deref()) {
        let bytes = axum::body::to_bytes(req.into_body(), REQUEST_LIMIT)
            .await
            .map_err(|_| AppError::DecodingRequestFailed)?;
        Some(bytes)
    } else {
        None
    };

    notification.logout_request = body
        .as_deref()
        .and_then(|body| find_param(body, LOGOUT_REQUEST_PARAM))
        .or_else(|| {
            query
                .as_deref()
                .and_then(|query| find_param(query.as_bytes(), LOGOUT_REQUEST_PARAM))
        });
    Ok(notification)
}

impl<S: Send + Sync> FromRequest<S> for LogoutNotification {
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        match read_logout_request(req).await {
            Ok(notification) => Ok(notification),
            Err(e) => {
                warn!(
                    code = e.code(),
                    "Could not decode single-sign-out request: {}",
                    e.message()
                );
                Ok(LogoutNotification::new(method, None, None))
            }
        }
    }
}
