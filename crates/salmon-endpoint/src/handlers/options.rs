//! OPTIONS handler, including the CORS preflight browsers send before a
//! cross-origin POST.

use axum::{
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};

pub fn handler(headers: &HeaderMap) -> Response {
  let preflight_post = headers
    .get(header::ACCESS_CONTROL_REQUEST_METHOD)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|m| m.trim().eq_ignore_ascii_case("POST"));

  if preflight_post {
    (
      StatusCode::OK,
      [(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))],
    )
      .into_response()
  } else {
    (
      StatusCode::NO_CONTENT,
      [(header::ALLOW, HeaderValue::from_static("OPTIONS, POST"))],
    )
      .into_response()
  }
}
