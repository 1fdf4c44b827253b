use super::*;
use crate::request::{HttpInput, Method, RequestContext};
use crate::routes::{RouteDefinition, RouteTable};

fn ctx(method: &str, path: &str) -> RequestContext {
    RequestContext::from_http(HttpInput::new(method, path)).unwrap()
}

fn route(pattern: &str, callback: &str, method: Option<Method>) -> RouteDefinition {
    RouteDefinition::new(pattern, callback.parse().unwrap(), method, vec![]).unwrap()
}

fn resolver(table: RouteTable) -> RouteResolver {
    RouteResolver::new(table.into_shared())
}

#[test]
fn test_convention_actions() {
    let r = resolver(RouteTable::new());
    let cases = [
        ("GET", "/users", "list", vec![]),
        ("GET", "/users/5", "read", vec!["5"]),
        ("POST", "/users", "create", vec![]),
        ("PUT", "/users/5", "update", vec!["5"]),
        ("DELETE", "/users/5", "delete", vec!["5"]),
        ("HEAD", "/users", "head", vec![]),
        ("OPTIONS", "/users", "options", vec![]),
    ];
    for (method, path, action, args) in cases {
        let target = r.resolve(&ctx(method, path)).unwrap();
        assert_eq!(target.controller_name, "Users", "{method} {path}");
        assert_eq!(target.action_name, action, "{method} {path}");
        assert_eq!(target.arguments, args, "{method} {path}");
        assert_eq!(target.source_route_name, None);
    }
}

#[test]
fn test_convention_keeps_argument_order() {
    let r = resolver(RouteTable::new());
    let target = r.resolve(&ctx("GET", "/posts/2024/05/hello")).unwrap();
    assert_eq!(target.controller_name, "Posts");
    assert_eq!(target.arguments, ["2024", "05", "hello"]);
}

#[test]
fn test_alias_replaces_controller_token() {
    let r = resolver(RouteTable::new().with_alias("people", "Users"));
    let target = r.resolve(&ctx("GET", "/people")).unwrap();
    assert_eq!(target.controller_name, "Users");
}

#[test]
fn test_class_name() {
    assert_eq!(class_name("users"), "Users");
    assert_eq!(class_name("user_accounts"), "UserAccounts");
    assert_eq!(class_name("blog-posts"), "BlogPosts");
    assert_eq!(class_name(""), "");
}

#[test]
fn test_root_path_has_no_route() {
    let r = resolver(RouteTable::new());
    assert!(r.resolve(&ctx("GET", "/")).is_none());
}

#[test]
fn test_first_declared_route_wins() {
    let table = RouteTable::new()
        .with_route("specific", route("/users/me", "Profile::show", None))
        .with_route("generic", route("/users/{id}", "Users::read", None));
    let r = resolver(table);

    let target = r.resolve(&ctx("GET", "/users/me")).unwrap();
    assert_eq!(target.controller_name, "Profile");
    assert_eq!(target.source_route_name.as_deref(), Some("specific"));

    let target = r.resolve(&ctx("GET", "/users/42")).unwrap();
    assert_eq!(target.controller_name, "Users");
    assert_eq!(target.arguments, ["42"]);
    assert_eq!(target.source_route_name.as_deref(), Some("generic"));
}

#[test]
fn test_declared_method_constraint_falls_through_to_convention() {
    let table = RouteTable::new().with_route(
        "create_only",
        route("/users", "Registration::submit", Some(Method::Post)),
    );
    let r = resolver(table);

    assert_eq!(r.resolve(&ctx("POST", "/users")).unwrap().controller_name, "Registration");
    let get = r.resolve(&ctx("GET", "/users")).unwrap();
    assert_eq!(get.controller_name, "Users");
    assert_eq!(get.action_name, "list");
}

#[test]
fn test_static_arguments_precede_captures() {
    let def = RouteDefinition::new(
        "/orgs/{org}/members/{id}",
        "Members::read".parse().unwrap(),
        None,
        vec!["admin".into()],
    )
    .unwrap();
    let target = PatternMatcher.check(&def, &ctx("GET", "/orgs/acme/members/9")).unwrap();
    assert_eq!(target.arguments, ["admin", "acme", "9"]);
}

#[test]
fn test_reload_is_visible_to_existing_resolver() {
    let shared = RouteTable::new().into_shared();
    let r = RouteResolver::new(shared.clone());
    assert_eq!(r.resolve(&ctx("GET", "/x")).unwrap().controller_name, "X");

    shared.store(std::sync::Arc::new(
        RouteTable::new().with_route("x", route("/x", "Other::run", None)),
    ));
    assert_eq!(r.resolve(&ctx("GET", "/x")).unwrap().controller_name, "Other");
}

#[test]
fn test_inspector_rewrites_then_resolves() {
    let inspector = RouteInspector::new(resolver(RouteTable::new()));
    let first = ctx("GET", "/users.json?q=users.json");

    let rewritten = match inspector.inspect(&first).unwrap() {
        Inspection::Rewritten(next) => next,
        other => panic!("expected rewrite, got {other:?}"),
    };
    assert_eq!(rewritten.path(), "/users");

    match inspector.inspect(&rewritten).unwrap() {
        Inspection::Handler(h) => {
            assert_eq!(h.target_class(), "Users");
            assert_eq!(h.action(), "list");
        }
        other => panic!("expected handler, got {other:?}"),
    }
}

#[test]
fn test_inspector_reports_no_route() {
    let inspector = RouteInspector::new(resolver(RouteTable::new()));
    let mut root = ctx("GET", "/");
    root.extension();
    assert!(matches!(inspector.inspect(&root).unwrap(), Inspection::NoRoute));
}
