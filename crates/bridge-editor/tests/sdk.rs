use bridge_editor::{EditorSession, Platform, SchemaSource, init_logging, open_session};
use bridge_editor_test_utils::{bridge_schema, write_schema};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn opens_a_session_from_a_schema_file() {
    init_logging();
    let dir = tempdir().expect("tempdir");
    let path = write_schema(dir.path(), &bridge_schema());

    let mut session: EditorSession = open_session(&SchemaSource::File(path))
        .await
        .expect("session");
    session.add_platform(Platform::Playgama).expect("playgama");
    session
        .update_field(&"platforms.playgama.gameId".parse().expect("path"), json!("g-9"))
        .expect("update");

    assert_eq!(
        session.projection()["platforms"],
        json!({ "playgama": { "gameId": "g-9" } })
    );
}

#[tokio::test]
async fn missing_schema_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let result = open_session(&SchemaSource::File(dir.path().join("absent.json"))).await;
    assert!(result.is_err());
}
