use super::*;
use std::cell::Cell;

// =============================================================
// Paths and headers
// =============================================================

#[test]
fn endpoint_prefixes_api_base() {
    assert_eq!(endpoint("patient/p1"), "/api/patient/p1");
}

#[test]
fn endpoint_tolerates_leading_slash() {
    assert_eq!(endpoint("/doctor/logout"), "/api/doctor/logout");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc.def"), "Bearer abc.def");
}

// =============================================================
// ApiError
// =============================================================

#[test]
fn from_status_classifies_known_codes() {
    assert_eq!(ApiError::from_status(400, " bad "), ApiError::BadRequest("bad".to_owned()));
    assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
    assert_eq!(ApiError::from_status(403, ""), ApiError::Forbidden);
    assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
    assert_eq!(ApiError::from_status(409, "dup"), ApiError::Conflict("dup".to_owned()));
    assert_eq!(ApiError::from_status(500, ""), ApiError::Status(500));
}

#[test]
fn status_round_trips_through_classification() {
    for code in [400, 401, 403, 404, 409, 418, 503] {
        assert_eq!(ApiError::from_status(code, "").status(), Some(code));
    }
    assert_eq!(ApiError::Transport("x".to_owned()).status(), None);
    assert_eq!(ApiError::Unavailable.status(), None);
}

#[test]
fn method_names_are_http_verbs() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Post.as_str(), "POST");
    assert_eq!(Method::Put.as_str(), "PUT");
}

// =============================================================
// 401 handling
// =============================================================

#[test]
fn handle_unauthorized_clears_and_navigates_once() {
    let latch = RedirectLatch::new();
    let cleared = Cell::new(0);
    let navigated = Cell::new(0);
    let target = Cell::new("");

    for _ in 0..3 {
        handle_unauthorized(
            &latch,
            || cleared.set(cleared.get() + 1),
            |path| {
                navigated.set(navigated.get() + 1);
                target.set(if path == "/" { "/" } else { "other" });
            },
        );
    }

    assert_eq!(cleared.get(), 1);
    assert_eq!(navigated.get(), 1);
    assert_eq!(target.get(), "/");
    assert!(latch.is_tripped());
}

#[test]
fn handle_unauthorized_reports_which_call_redirected() {
    let latch = RedirectLatch::default();
    assert!(handle_unauthorized(&latch, || {}, |_| {}));
    assert!(!handle_unauthorized(&latch, || {}, |_| {}));
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn parse_created_id_accepts_bare_string() {
    assert_eq!(parse_created_id("\"3fa85f64\""), Some("3fa85f64".to_owned()));
}

#[test]
fn parse_created_id_accepts_object_with_id() {
    assert_eq!(parse_created_id(r#"{"id":"c-9"}"#), Some("c-9".to_owned()));
}

#[test]
fn parse_created_id_rejects_empty_and_garbage() {
    assert_eq!(parse_created_id("\"\""), None);
    assert_eq!(parse_created_id("not json"), None);
    assert_eq!(parse_created_id("42"), None);
}

#[test]
fn decode_maps_errors_to_decode_variant() {
    let result: Result<Vec<String>, ApiError> = decode("{");
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn calls_are_unavailable_outside_the_browser() {
    let result: Result<serde_json::Value, ApiError> = futures::executor::block_on(get_json("patient", &[]));
    assert_eq!(result, Err(ApiError::Unavailable));
}
