use roster::http::HttpError;
use roster::http::response::{Response, ResponseBuilder, StatusCode};
use roster::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::MovedPermanently.reason_phrase(), "Moved Permanently");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
    assert_eq!(response.header("content-type"), Some("application/octet-stream"));
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    assert_eq!(response.header("content-length").unwrap(), body.len().to_string());
}

#[test]
fn test_response_builder_overrides_wrong_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("content-length").unwrap(), "4");
    assert_eq!(
        response
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .count(),
        1
    );
}

#[test]
fn test_response_builder_always_closes() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "keep-alive")
        .build();

    assert_eq!(response.header("connection"), Some("Close"));
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("content-type", "text/plain")
        .header("x-first", "1")
        .header("x-second", "2")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        names,
        vec!["content-type", "x-first", "x-second", "content-length", "connection"]
    );
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert_eq!(response.body.len(), 0);
    assert_eq!(response.header("content-length").unwrap(), "0");
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok("application/json", b"[]".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.body, b"[]".to_vec());
}

#[test]
fn test_response_moved_permanently_helper() {
    let response = Response::moved_permanently("http://localhost:8080/docs/index.html");

    assert_eq!(response.status, StatusCode::MovedPermanently);
    assert_eq!(response.header("location"), Some("http://localhost:8080/docs/index.html"));
    assert_eq!(response.header("content-length"), Some("0"));
}

#[test]
fn test_canned_responses_have_exact_length() {
    for response in [Response::bad_request(), Response::not_found(), Response::method_not_allowed()] {
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert_eq!(response.header("content-length").unwrap(), response.body.len().to_string());
        assert_eq!(response.header("connection"), Some("Close"));
    }
}

#[test]
fn test_canned_response_bodies() {
    let body = String::from_utf8(Response::not_found().body).unwrap();
    assert!(body.contains("<h1>404 Page not found</h1>"));

    let body = String::from_utf8(Response::method_not_allowed().body).unwrap();
    assert!(body.contains("<h1>405 Method not allowed</h1>"));

    let body = String::from_utf8(Response::bad_request().body).unwrap();
    assert!(body.contains("<h1>400 Bad request</h1>"));
}

#[test]
fn test_response_from_error() {
    let cases = [
        (HttpError::bad_request("x"), StatusCode::BadRequest),
        (HttpError::not_found("x"), StatusCode::NotFound),
        (HttpError::method_not_allowed("x"), StatusCode::MethodNotAllowed),
    ];

    for (error, status) in cases {
        assert_eq!(Response::from_error(&error).status, status);
    }
}

#[test]
fn test_io_error_maps_to_bad_request() {
    let error = HttpError::from(std::io::Error::other("disk on fire"));

    assert_eq!(Response::from_error(&error).status, StatusCode::BadRequest);
}

#[test]
fn test_serialize_response() {
    let response = Response::ok("text/plain", b"hi".to_vec());

    let raw = String::from_utf8(serialize_response(&response)).unwrap();

    assert_eq!(
        raw,
        "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 2\r\nconnection: Close\r\n\r\nhi"
    );
}
