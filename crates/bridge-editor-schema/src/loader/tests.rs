//! Tests for schema loading.

use super::*;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use bridge_editor_test_utils::{bridge_schema, write_schema};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Serve `router` on an ephemeral local port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

#[test]
fn classifies_sources() {
    assert_eq!(
        SchemaSource::parse("https://example.com/schema.json"),
        SchemaSource::Url("https://example.com/schema.json".to_string())
    );
    assert_eq!(
        SchemaSource::parse("config/schema.json"),
        SchemaSource::File(PathBuf::from("config/schema.json"))
    );
    assert_eq!(
        SchemaSource::default(),
        SchemaSource::File(PathBuf::from(DEFAULT_SCHEMA_LOCATION))
    );
}

#[test]
fn loads_schema_from_path() {
    let temp = TempDir::new().expect("tmp");
    let path = write_schema(temp.path(), &bridge_schema());
    let schema = Schema::load_from_path(&path).expect("schema");
    assert_eq!(schema.root(), &bridge_schema());
}

#[test]
fn missing_file_is_a_read_failure() {
    let temp = TempDir::new().expect("tmp");
    let err = Schema::load_from_path(temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SchemaError::ReadFailed(_)));
}

#[test]
fn rejects_malformed_json() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("schema.json");
    fs::write(&path, "{ \"type\": ").expect("write");
    let err = Schema::load_from_path(&path).unwrap_err();
    assert!(matches!(err, SchemaError::ParseFailed(_)));
}

#[test]
fn rejects_non_object_documents() {
    let err = Schema::load_from_str("[1, 2]").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("invalid schema at $"));

    let err = Schema::load_from_str(r#"{ "properties": [] }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("properties"));
}

#[test]
fn node_at_walks_properties_items_and_refs() {
    let schema = Schema::from_value(bridge_schema()).expect("schema");

    let path: FieldPath = "advertisement.interstitial.placements.0.id"
        .parse()
        .expect("path");
    let node = schema.node_at(&path).expect("walk").expect("node");
    assert_eq!(node.schema_type(), Some(crate::SchemaType::String));

    let path: FieldPath = "payments.3.playgama".parse().expect("path");
    let node = schema.node_at(&path).expect("walk").expect("node");
    assert_eq!(node.required(), vec!["amount"]);

    let path: FieldPath = "advertisement.banner.delay".parse().expect("path");
    assert!(schema.node_at(&path).expect("walk").is_none());
}

#[test]
fn property_resolves_references() {
    let schema = Schema::from_value(bridge_schema()).expect("schema");
    let payments = schema.property("payments").expect("walk").expect("payments");
    let items = payments.items().expect("items");
    assert!(items.reference().is_some());
    assert!(schema.property("missing").expect("walk").is_none());
}

#[tokio::test]
async fn fetches_schema_over_http() {
    let body = serde_json::to_string(&bridge_schema()).expect("encode");
    let router = Router::new().route(
        "/schema.json",
        get(move || {
            let body = body.clone();
            async move { body }
        }),
    );
    let base = serve(router).await;

    let source = SchemaSource::parse(&format!("{base}/schema.json"));
    let schema = Schema::load(&source).await.expect("schema");
    assert_eq!(schema.root(), &bridge_schema());
}

#[tokio::test]
async fn non_success_status_is_fatal() {
    let router = Router::new().route("/schema.json", get(|| async { StatusCode::NOT_FOUND }));
    let base = serve(router).await;

    let err = Schema::fetch(&format!("{base}/schema.json")).await.unwrap_err();
    match err {
        SchemaError::HttpStatus(status) => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}
