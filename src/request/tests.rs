use super::*;
use crate::error::DispatchError;
use crate::ids::RequestId;
use proptest::prelude::*;
use serde_json::json;

fn http(method: &str, target: &str) -> RequestContext {
    RequestContext::from_http(HttpInput::new(method, target)).unwrap()
}

#[test]
fn test_explicit_method_any_case() {
    for m in Method::ALL {
        let lower = m.as_str().to_lowercase();
        let ctx = RequestContext::new(
            RequestSource::Http(HttpInput::new("GET", "/")),
            None,
            Some(lower.as_str()),
        )
        .unwrap();
        assert_eq!(ctx.method(), m);
        assert!(ctx.is(m));
    }
}

#[test]
fn test_unsupported_method_fails_construction() {
    let err = RequestContext::new(
        RequestSource::Http(HttpInput::new("GET", "/")),
        None,
        Some("patch"),
    )
    .unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnsupportedMethod {
            method: "PATCH".into()
        }
    );
    assert!(RequestContext::from_http(HttpInput::new("TRACE", "/")).is_err());
}

#[test]
fn test_method_precedence() {
    // body field beats header beats native method
    let input = HttpInput::new("POST", "/x")
        .body_field("_method", "delete")
        .header("X-HTTP-Method-Override", "PUT");
    assert_eq!(RequestContext::from_http(input.clone()).unwrap().method(), Method::Delete);

    let mut no_field = input.clone();
    no_field.body.clear();
    assert_eq!(RequestContext::from_http(no_field).unwrap().method(), Method::Put);

    // explicit beats everything
    let ctx = RequestContext::new(RequestSource::Http(input), None, Some("head")).unwrap();
    assert_eq!(ctx.method(), Method::Head);

    assert_eq!(http("options", "/").method(), Method::Options);
}

#[test]
fn test_cli_method_defaults_to_get() {
    let ctx = RequestContext::from_cli(Vec::<String>::new()).unwrap();
    assert_eq!(ctx.method(), Method::Get);
    assert_eq!(ctx.path(), "/");
    assert_eq!(ctx.origin(), OriginKind::Cli);

    let ctx = RequestContext::from_cli(["post", "users"]).unwrap();
    assert_eq!(ctx.method(), Method::Post);
    assert_eq!(ctx.path(), "/users");
}

#[test]
fn test_path_decoded_once() {
    let ctx = http("GET", "/users/john%20doe/");
    assert_eq!(ctx.path(), "/users/john doe");
    // %2541 decodes to %41 and stays that way
    let ctx = http("GET", "/keys/%2541");
    assert_eq!(ctx.path(), "/keys/%41");
}

#[test]
fn test_normalize_path_shapes() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("users"), "/users");
    assert_eq!(normalize_path("/users/"), "/users");
    assert_eq!(normalize_path("users//"), "/users");
    assert_eq!(normalize_path("/a/b"), "/a/b");
}

proptest! {
    #[test]
    fn prop_normalize_path_idempotent(p in "[a-z/._%0-9]{0,24}") {
        let once = normalize_path(&p);
        prop_assert_eq!(normalize_path(&once), once.clone());
        prop_assert!(once.starts_with('/'));
        prop_assert!(once == "/" || !once.ends_with('/'));
    }
}

#[test]
fn test_extension_accepted_when_in_raw_query() {
    let mut ctx = http("GET", "/users.json?q=users.json");
    assert_eq!(ctx.extension(), Some("json"));
    assert_eq!(ctx.path(), "/users");
    // cached: second call does not strip again
    assert_eq!(ctx.extension(), Some("json"));
    assert_eq!(ctx.path(), "/users");
}

#[test]
fn test_extension_underscore_separator() {
    let mut ctx = http("GET", "/users_json?route=/users.json");
    assert_eq!(ctx.extension(), Some("json"));
    assert_eq!(ctx.path(), "/users");
}

#[test]
fn test_extension_rejected_when_not_in_raw_query() {
    let mut ctx = http("GET", "/foo.bar?q=something");
    assert_eq!(ctx.extension(), None);
    assert_eq!(ctx.path(), "/foo.bar");
    assert!(ctx.extension_checked());

    let mut empty_query = http("GET", "/foo.bar?");
    assert_eq!(empty_query.extension(), None);
    assert_eq!(empty_query.path(), "/foo.bar");
}

#[test]
fn test_extension_accepted_without_query_string() {
    let mut ctx = http("GET", "/users.json");
    assert_eq!(ctx.raw_query(), None);
    assert_eq!(ctx.extension(), Some("json"));
    assert_eq!(ctx.path(), "/users");
}

#[test]
fn test_request_id_taken_from_header() {
    let id = RequestId::new();
    let ctx = RequestContext::from_http(
        HttpInput::new("GET", "/users").header("X-Request-Id", &id.to_string()),
    )
    .unwrap();
    assert_eq!(ctx.request_id(), id);
}

#[test]
fn test_extension_ignores_dotted_directories() {
    let mut ctx = http("GET", "/v1.2/users?q=v1.2/users");
    assert_eq!(ctx.extension(), None);
    assert_eq!(ctx.path(), "/v1.2/users");
}

#[test]
fn test_cli_extension_uses_typed_query() {
    let mut ctx = RequestContext::from_cli(["GET", "/users.json"]).unwrap();
    assert_eq!(ctx.extension(), Some("json"));
    assert_eq!(ctx.path(), "/users");

    let mut ctx = RequestContext::from_cli(["GET", "/user_accounts"]).unwrap();
    assert_eq!(ctx.extension(), None);
    assert_eq!(ctx.path(), "/user_accounts");
}

#[test]
fn test_cli_payload_and_format() {
    let ctx = RequestContext::from_cli(["GET", "/users", "html", "page=3"]).unwrap();
    assert_eq!(ctx.payload_value("/users"), Some(&json!("")));
    assert_eq!(ctx.payload_value("page"), Some(&json!("3")));
    assert_eq!(ctx.format().as_deref(), Some("html"));
    assert_eq!(ctx.mime_type().as_deref(), Some(CLI_MIME_TYPE));
}

#[test]
fn test_format_from_payload() {
    let ctx = http("GET", "/users?format=xml");
    assert_eq!(ctx.format().as_deref(), Some("xml"));
    assert_eq!(http("GET", "/users").format(), None);
}

#[test]
fn test_explicit_payload_replaces_transport_payload() {
    let mut payload = Payload::new();
    payload.insert("name".into(), json!("explicit"));
    let ctx = RequestContext::new(
        RequestSource::Http(HttpInput::new("GET", "/x?name=query")),
        Some(payload),
        None,
    )
    .unwrap();
    assert_eq!(ctx.payload_value("name"), Some(&json!("explicit")));
    assert_eq!(ctx.payload().len(), 1);
}

#[test]
fn test_mime_type_from_accept() {
    let ctx = RequestContext::from_http(
        HttpInput::new("GET", "/").header("Accept", "text/html;q=0.9, application/json"),
    )
    .unwrap();
    assert_eq!(ctx.mime_type().as_deref(), Some("text/html"));
    assert_eq!(http("GET", "/").mime_type(), None);
}

#[test]
fn test_negotiated_format_precedence() {
    let input = HttpInput::new("GET", "/users.xml?q=users.xml&format=csv")
        .header("accept", "application/json");
    let mut ctx = RequestContext::from_http(input).unwrap();
    assert_eq!(ctx.negotiated_format().as_deref(), Some("csv"));

    let mut ctx = RequestContext::from_http(
        HttpInput::new("GET", "/users.xml?q=users.xml").header("accept", "application/json"),
    )
    .unwrap();
    assert_eq!(ctx.negotiated_format().as_deref(), Some("xml"));

    let mut ctx =
        RequestContext::from_http(HttpInput::new("GET", "/users").header("accept", "application/json"))
            .unwrap();
    assert_eq!(ctx.negotiated_format().as_deref(), Some("application/json"));
}

#[test]
fn test_site_url_and_path() {
    let input = HttpInput::new("GET", "/users")
        .header("Host", "example.com")
        .script_path("/app/index.php/users");
    let ctx = RequestContext::from_http(input).unwrap();
    assert_eq!(ctx.site_url().as_deref(), Some("http://example.com/app/index.php/"));
    assert_eq!(ctx.site_path().as_deref(), Some("http://example.com/app/"));

    let secure = RequestContext::from_http(
        HttpInput::new("GET", "/").header("host", "example.com").secure(true),
    )
    .unwrap();
    assert_eq!(secure.site_url().as_deref(), Some("https://example.com/"));
    assert_eq!(secure.site_path().as_deref(), Some("https://example.com/"));
}

#[test]
fn test_site_url_absent_without_host_or_for_cli() {
    assert_eq!(http("GET", "/").site_url(), None);
    let cli = RequestContext::from_cli(["GET", "/"]).unwrap();
    assert_eq!(cli.site_url(), None);
}
