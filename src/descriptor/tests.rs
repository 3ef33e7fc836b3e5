use std::sync::LazyLock;

use serde_json::{Value, json};

use super::{Linkable, ParamsSource, ROUTE_DESCRIPTOR, RouteDescriptor};
use crate::core::{CapabilityId, Entity, LinkError, Params, Record, params};
use crate::url::UrlBuilder;

struct User {
    id: u64,
    name: String,
}

struct Photo {
    id: u64,
}

/// Entity without the route descriptor capability.
struct Comment {
    id: u64,
}

static USER_ROUTES: LazyLock<RouteDescriptor<User>> = LazyLock::new(|| {
    RouteDescriptor::new().with_default_params_fn(|user: &User| Ok(params([("id", json!(user.id))])))
});

static PHOTO_ROUTES: LazyLock<RouteDescriptor<Photo>> = LazyLock::new(|| {
    RouteDescriptor::new()
        .with_default_params_fn(|photo: &Photo| Ok(params([("id", json!(photo.id))])))
});

static COMMENT_ROUTES: LazyLock<RouteDescriptor<Comment>> = LazyLock::new(|| {
    RouteDescriptor::new()
        .with_default_params_fn(|comment: &Comment| Ok(params([("id", json!(comment.id))])))
});

const LINKABLE: &[CapabilityId] = &[ROUTE_DESCRIPTOR];

impl Entity for User {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            _ => None,
        }
    }

    fn capabilities(&self) -> &[CapabilityId] {
        LINKABLE
    }
}

impl Linkable for User {
    fn route_descriptor(&self) -> &RouteDescriptor<Self> {
        &USER_ROUTES
    }
}

impl Entity for Photo {
    fn attribute(&self, name: &str) -> Option<Value> {
        (name == "id").then(|| json!(self.id))
    }

    fn capabilities(&self) -> &[CapabilityId] {
        LINKABLE
    }
}

impl Linkable for Photo {
    fn route_descriptor(&self) -> &RouteDescriptor<Self> {
        &PHOTO_ROUTES
    }
}

impl Entity for Comment {
    fn attribute(&self, name: &str) -> Option<Value> {
        (name == "id").then(|| json!(self.id))
    }
}

impl Linkable for Comment {
    fn route_descriptor(&self) -> &RouteDescriptor<Self> {
        &COMMENT_ROUTES
    }
}

fn user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
    }
}

fn photo() -> Photo {
    Photo { id: 456 }
}

fn obj(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// ============================================================================
// Route segment
// ============================================================================

#[test]
fn test_route_derived_from_class_name() {
    assert_eq!(user().linked().route(), "/users");
    assert_eq!(photo().linked().route(), "/photos");
}

#[test]
fn test_route_derived_from_qualified_record_class() {
    let descriptor = RouteDescriptor::<Record>::new();
    let record = Record::new("app\\models\\BlogCategory");
    assert_eq!(descriptor.bind(&record).route(), "/blogcategories");

    let record = Record::new("app::models::Person");
    assert_eq!(descriptor.bind(&record).route(), "/people");
}

#[test]
fn test_route_lowercased_before_pluralizing() {
    let descriptor = RouteDescriptor::<Record>::new();
    let record = Record::new("app::NEWS");
    assert_eq!(descriptor.bind(&record).route(), "/news");

    let record = Record::new("app::USER");
    assert_eq!(descriptor.bind(&record).route(), "/users");
}

#[test]
fn test_empty_segment_keeps_single_separator() {
    let user = user();
    let root = RouteDescriptor::<User>::new().with_route("/");
    let linked = root.bind(&user);
    assert_eq!(linked.route(), "/");
    assert_eq!(linked.url_route(None, Params::new()).unwrap().route(), "/view");

    let record = Record::new("").with_capability(ROUTE_DESCRIPTOR);
    let anonymous = RouteDescriptor::<Record>::new();
    let route = anonymous.bind(&record).url_route(Some("index"), Params::new()).unwrap();
    assert_eq!(route.route(), "/index");

    let route = user.linked().url_route_to(&anonymous.bind(&record), None).unwrap();
    assert_eq!(route.route(), "/users/view");

    let photo = photo();
    let route = linked.url_route_to(&photo.linked(), None).unwrap();
    assert_eq!(route.route(), "/photos/view");
}

#[test]
fn test_explicit_route_is_trimmed() {
    let user = user();
    for route in ["/profile", "profile", "/profile/", "//profile//"] {
        let descriptor = RouteDescriptor::<User>::new().with_route(route);
        assert_eq!(descriptor.bind(&user).route(), "/profile", "route {route}");
    }

    let nested = RouteDescriptor::<User>::new().with_route("/product/review/");
    assert_eq!(nested.bind(&user).route(), "/product/review");
}

// ============================================================================
// Routes
// ============================================================================

#[test]
fn test_url_route_defaults() {
    let route = user().linked().url_route(None, Params::new()).unwrap();
    assert_eq!(route.route(), "/users/view");
    assert_eq!(route.params(), &obj(json!({"id": 123})));
}

#[test]
fn test_url_route_with_action() {
    let route = user().linked().url_route(Some("update"), Params::new()).unwrap();
    assert_eq!(route.route(), "/users/update");
    assert_eq!(route.params(), &obj(json!({"id": 123})));
}

#[test]
fn test_url_route_empty_action_uses_default() {
    let route = user().linked().url_route(Some(""), Params::new()).unwrap();
    assert_eq!(route.route(), "/users/view");
}

#[test]
fn test_url_route_custom_default_action() {
    let user = user();
    let descriptor = RouteDescriptor::<User>::new().with_default_action("profile");
    let route = descriptor.bind(&user).url_route(None, Params::new()).unwrap();
    assert_eq!(route.route(), "/users/profile");
    assert!(route.params().is_empty());
}

#[test]
fn test_url_route_extra_params_merge() {
    let route = user()
        .linked()
        .url_route(Some("profile"), obj(json!({"ref": "facebook"})))
        .unwrap();
    assert_eq!(route.route(), "/users/profile");
    assert_eq!(route.params(), &obj(json!({"id": 123, "ref": "facebook"})));
}

#[test]
fn test_url_route_extra_params_override() {
    let route = user()
        .linked()
        .url_route(None, obj(json!({"id": 7})))
        .unwrap();
    assert_eq!(route.params(), &obj(json!({"id": 7})));
}

#[test]
fn test_url_route_is_pure() {
    let user = user();
    let first = user.linked().url_route(Some("update"), Params::new()).unwrap();
    let second = user.linked().url_route(Some("update"), Params::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_static_default_params() {
    let user = user();
    let descriptor = RouteDescriptor::<User>::new().with_default_params(obj(json!({"tab": "all"})));
    let route = descriptor.bind(&user).url_route(None, Params::new()).unwrap();
    assert_eq!(route.params(), &obj(json!({"tab": "all"})));
}

#[test]
fn test_params_error_propagates_unchanged() {
    let user = user();
    let descriptor = RouteDescriptor::<User>::new()
        .with_default_params_fn(|_: &User| Err(anyhow::anyhow!("user is not persisted")));

    let err = descriptor.bind(&user).url_route(None, Params::new()).unwrap_err();
    assert!(matches!(err, LinkError::Params(_)));
    assert_eq!(err.to_string(), "user is not persisted");
}

// ============================================================================
// Linkable params
// ============================================================================

#[test]
fn test_linkable_params_prefixed_fallback() {
    assert_eq!(photo().linked().linkable_params().unwrap(), obj(json!({"pid": 456})));
    assert_eq!(user().linked().linkable_params().unwrap(), obj(json!({"uid": 123})));
}

#[test]
fn test_linkable_params_explicit_used_verbatim() {
    let photo = photo();
    let descriptor = RouteDescriptor::<Photo>::new()
        .with_default_params_fn(|p: &Photo| Ok(params([("id", json!(p.id))])))
        .with_linkable_params_fn(|p: &Photo| Ok(params([("photo", json!(p.id))])));

    assert_eq!(
        descriptor.bind(&photo).linkable_params().unwrap(),
        obj(json!({"photo": 456}))
    );
}

#[test]
fn test_linkable_params_empty_when_no_defaults() {
    let photo = photo();
    let descriptor = RouteDescriptor::<Photo>::new();
    assert!(descriptor.bind(&photo).linkable_params().unwrap().is_empty());
}

// ============================================================================
// Cross-links
// ============================================================================

#[test]
fn test_url_route_to_user_photo() {
    let (user, photo) = (user(), photo());
    let route = user.linked().url_route_to(&photo.linked(), None).unwrap();
    assert_eq!(route.route(), "/users/photos/view");
    assert_eq!(route.params(), &obj(json!({"id": 123, "pid": 456})));
}

#[test]
fn test_url_route_to_photo_user() {
    let (user, photo) = (user(), photo());
    let route = photo.linked().url_route_to(&user.linked(), None).unwrap();
    assert_eq!(route.route(), "/photos/users/view");
    assert_eq!(route.params(), &obj(json!({"id": 456, "uid": 123})));
}

#[test]
fn test_url_route_to_with_action() {
    let (user, photo) = (user(), photo());
    let route = user.linked().url_route_to(&photo.linked(), Some("update")).unwrap();
    assert_eq!(route.route(), "/users/photos/update");
}

#[test]
fn test_url_route_to_uses_target_default_action() {
    let (user, photo) = (user(), photo());
    let gallery = RouteDescriptor::<Photo>::new()
        .with_route("/gallery/")
        .with_default_action("show");
    let route = user.linked().url_route_to(&gallery.bind(&photo), None).unwrap();
    assert_eq!(route.route(), "/users/gallery/show");
    assert!(route.params().get("id").is_some());
}

#[test]
fn test_url_route_to_requires_capability() {
    let user = user();
    let comment = Comment { id: 9 };

    let err = user.linked().url_route_to(&comment.linked(), None).unwrap_err();
    assert!(matches!(err, LinkError::NotLinkable { .. }));
    assert!(err.to_string().contains("Comment"));

    // The source does not need the capability, only the target
    let route = comment.linked().url_route_to(&user.linked(), None).unwrap();
    assert_eq!(route.route(), "/comments/users/view");
}

// ============================================================================
// Hotlinks
// ============================================================================

#[test]
fn test_hotlink_url_text() {
    let urls = UrlBuilder::new();
    let html = user().linked().hotlink(&urls, None, Params::new(), &[]).unwrap();
    assert_eq!(html, r#"<a href="/users/view?id=123">/users/view?id=123</a>"#);
}

#[test]
fn test_hotlink_text_attribute() {
    let user = user();
    let urls = UrlBuilder::new();
    let descriptor = RouteDescriptor::<User>::new()
        .with_default_params(ParamsSource::<User>::attributes(["id"]))
        .with_hotlink_text("name");

    let html = descriptor
        .bind(&user)
        .hotlink(&urls, Some("update"), Params::new(), &[("class", "user")])
        .unwrap();
    assert_eq!(html, r#"<a href="/users/update?id=123" class="user">Alice</a>"#);
}

#[test]
fn test_hotlink_missing_text_attribute_renders_empty() {
    let user = user();
    let urls = UrlBuilder::new();
    let descriptor = RouteDescriptor::<User>::new().with_hotlink_text("email");

    let html = descriptor.bind(&user).hotlink(&urls, None, Params::new(), &[]).unwrap();
    assert_eq!(html, r#"<a href="/users/view"></a>"#);
}

#[test]
fn test_hotlink_disabled_renders_span() {
    let user = user();
    let urls = UrlBuilder::new();
    let descriptor = RouteDescriptor::<User>::new()
        .with_hotlink_text("name")
        .disable_hotlink(true);

    let html = descriptor
        .bind(&user)
        .hotlink(&urls, None, Params::new(), &[("id", "owner")])
        .unwrap();
    assert_eq!(html, r#"<span id="owner">Alice</span>"#);
}

#[test]
fn test_hotlink_absolute_url_text() {
    let user = user();
    let urls = UrlBuilder::with_base("https://example.com").unwrap();
    let descriptor = RouteDescriptor::<User>::new()
        .with_default_params(ParamsSource::<User>::attributes(["id"]))
        .use_absolute_url(true);

    let html = descriptor.bind(&user).hotlink(&urls, None, Params::new(), &[]).unwrap();
    assert_eq!(
        html,
        r#"<a href="/users/view?id=123">https://example.com/users/view?id=123</a>"#
    );
}

#[test]
fn test_hotlink_absolute_without_base_fails() {
    let user = user();
    let descriptor = RouteDescriptor::<User>::new().use_absolute_url(true);
    let err = descriptor
        .bind(&user)
        .hotlink(&UrlBuilder::new(), None, Params::new(), &[])
        .unwrap_err();
    assert!(matches!(err, LinkError::MissingBaseUrl));
}

#[test]
fn test_hotlink_to() {
    let (user, photo) = (user(), photo());
    let urls = UrlBuilder::new();
    let html = user
        .linked()
        .hotlink_to(&urls, &photo.linked(), Some("update"), obj(json!({"ref": "feed"})), &[])
        .unwrap();
    assert_eq!(
        html,
        r#"<a href="/users/photos/update?id=123&amp;pid=456&amp;ref=feed">/users/photos/update?id=123&amp;pid=456&amp;ref=feed</a>"#
    );
}

#[test]
fn test_hotlink_to_renders_with_source_settings() {
    let (user, photo) = (user(), photo());
    let urls = UrlBuilder::new();
    let source = RouteDescriptor::<User>::new()
        .with_default_params(ParamsSource::<User>::attributes(["id"]))
        .with_hotlink_text("name")
        .disable_hotlink(true);

    let html = source
        .bind(&user)
        .hotlink_to(&urls, &photo.linked(), None, Params::new(), &[])
        .unwrap();
    assert_eq!(html, "<span>Alice</span>");

    let anchor = RouteDescriptor::<User>::new()
        .with_default_params(ParamsSource::<User>::attributes(["id"]))
        .with_hotlink_text("name");
    let html = anchor
        .bind(&user)
        .hotlink_to(&urls, &photo.linked(), None, Params::new(), &[])
        .unwrap();
    assert_eq!(html, r#"<a href="/users/photos/view?id=123&amp;pid=456">Alice</a>"#);
}

#[test]
fn test_hotlink_text_dotted_path() {
    let urls = UrlBuilder::new();
    let record = Record::new("app::Post")
        .with_attribute("id", 9)
        .with_attribute("author", json!({"name": "Bob & Co"}));
    let descriptor = RouteDescriptor::<Record>::new()
        .with_default_params(ParamsSource::<Record>::attributes(["id"]))
        .with_hotlink_text("author.name");

    let html = descriptor.bind(&record).hotlink(&urls, None, Params::new(), &[]).unwrap();
    assert_eq!(html, r#"<a href="/posts/view?id=9">Bob &amp; Co</a>"#);
}

#[test]
fn test_hotlink_to_requires_capability() {
    let user = user();
    let comment = Comment { id: 1 };
    let err = user
        .linked()
        .hotlink_to(&UrlBuilder::new(), &comment.linked(), None, Params::new(), &[])
        .unwrap_err();
    assert!(matches!(err, LinkError::NotLinkable { .. }));
}

// ============================================================================
// Attribute-bound params
// ============================================================================

#[test]
fn test_attribute_params_on_record() {
    let record = Record::new("app::models::Article")
        .with_attribute("id", 5)
        .with_attribute("slug", "hello-world");
    let descriptor = RouteDescriptor::<Record>::new()
        .with_default_params(ParamsSource::<Record>::attributes(["id", "slug"]));

    let route = descriptor.bind(&record).url_route(None, Params::new()).unwrap();
    assert_eq!(route.route(), "/articles/view");
    assert_eq!(route.params(), &obj(json!({"id": 5, "slug": "hello-world"})));
}

#[test]
fn test_renamed_params_and_missing_attribute() {
    let record = Record::new("Article").with_attribute("id", 5);
    let descriptor = RouteDescriptor::<Record>::new()
        .with_linkable_params(ParamsSource::<Record>::renamed([("article", "id"), ("rev", "revision")]));

    assert_eq!(
        descriptor.bind(&record).linkable_params().unwrap(),
        obj(json!({"article": 5, "rev": null}))
    );
}
