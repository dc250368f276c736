use httpmock::prelude::*;
use ocs_rs::{
    users::{Field, ListOptions, Scope},
    Client, Error,
};
use serde_json::json;

fn client(server: &MockServer) -> Client {
    Client::builder()
        .no_env()
        .with_url(server.base_url())
        .with_username("alice")
        .with_token("app-password")
        .build()
        .expect("valid client options")
}

#[tokio::test]
async fn test_editable_fields() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ocs/v2.php/cloud/user/fields");
        then.status(200).json_body(json!({
            "ocs": {
                "meta": {"status": "ok", "statuscode": 200, "message": "OK"},
                "data": ["displayname", "email", "phone", "address", "website", "twitter", "fediverse"]
            }
        }));
    });

    let fields = client(&server).users().editable_fields().await?;
    assert_eq!(
        fields.data,
        vec!["displayname", "email", "phone", "address", "website", "twitter", "fediverse"]
    );
    assert_eq!(fields.meta.message.as_deref(), Some("OK"));

    let known: Vec<Field> = fields.data.iter().filter_map(|f| f.parse().ok()).collect();
    assert_eq!(known.len(), 6);

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_editable_fields_without_data() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ocs/v2.php/cloud/user/fields");
        then.status(200).json_body(json!({
            "ocs": {"meta": {"status": "ok", "statuscode": 100}}
        }));
    });

    let fields = client(&server).users().editable_fields().await?;
    assert!(fields.data.is_empty());

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_editable_fields_non_string_element() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ocs/v2.php/cloud/user/fields");
        then.status(200).json_body(json!({
            "ocs": {"meta": {"status": "ok", "statuscode": 200}, "data": ["email", 42]}
        }));
    });

    match client(&server).users().editable_fields().await {
        Err(Error::Deserialize(_)) => {}
        res => panic!("Expected deserialize error, got {:?}", res),
    };

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_current() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ocs/v2.php/cloud/user");
        then.status(200).json_body(json!({
            "ocs": {
                "meta": {"status": "ok", "statuscode": 200, "message": "OK"},
                "data": {
                    "id": "alice",
                    "display-name": "Alice",
                    "email": "alice@example.com",
                    "language": "de"
                }
            }
        }));
    });

    let me = client(&server).users().current().await?;
    assert_eq!(me.id, "alice");
    assert_eq!(me.display_name.as_deref(), Some("Alice"));
    assert_eq!(me.field(Field::Email), Some("alice@example.com"));
    assert_eq!(me.language.as_deref(), Some("de"));

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_get() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ocs/v2.php/cloud/users/bob");
        then.status(200).json_body(json!({
            "ocs": {
                "meta": {"status": "ok", "statuscode": 200},
                "data": {
                    "id": "bob",
                    "displayname": "Bob",
                    "displaynameScope": "v2-published",
                    "enabled": false,
                    "groups": []
                }
            }
        }));
    });

    let bob = client(&server).users().get("bob").await?;
    assert_eq!(bob.id, "bob");
    assert_eq!(bob.scope(Field::DisplayName), Some(Scope::Published));
    assert_eq!(bob.enabled, Some(false));

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_list() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ocs/v2.php/cloud/users")
            .query_param("search", "b")
            .query_param("limit", "2")
            .query_param("format", "json");
        then.status(200).json_body(json!({
            "ocs": {
                "meta": {"status": "ok", "statuscode": 200},
                "data": {"users": ["bob", "barbara"]}
            }
        }));
    });

    let opts = ListOptions {
        search: Some("b".to_string()),
        limit: Some(2),
        ..Default::default()
    };
    let users = client(&server).users().list(opts).await?;
    assert_eq!(users, vec!["bob", "barbara"]);

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_set_field() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/ocs/v2.php/cloud/users/alice")
            .json_body(json!({"key": "website", "value": "https://example.com"}));
        then.status(200).json_body(json!({
            "ocs": {"meta": {"status": "ok", "statuscode": 200}, "data": []}
        }));
    });

    client(&server)
        .users()
        .set_field("alice", Field::Website, "https://example.com")
        .await?;

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_set_scope() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/ocs/v2.php/cloud/users/alice")
            .json_body(json!({"key": "phoneScope", "value": "v2-private"}));
        then.status(200).json_body(json!({
            "ocs": {"meta": {"status": "ok", "statuscode": 200}, "data": []}
        }));
    });

    client(&server)
        .users()
        .set_scope("alice", Field::Phone, Scope::Private)
        .await?;

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_set_field_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/ocs/v2.php/cloud/users/alice");
        then.status(400).json_body(json!({
            "ocs": {
                "meta": {"status": "failure", "statuscode": 102, "message": "Invalid email"},
                "data": []
            }
        }));
    });

    match client(&server)
        .users()
        .set_field("alice", "email", "not-an-email")
        .await
    {
        Err(Error::Ocs(e)) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.method, http::Method::PUT);
            assert_eq!(e.ocs_status, Some(102));
            assert_eq!(e.message.as_deref(), Some("Invalid email"));
        }
        res => panic!("Expected OCS error, got {:?}", res),
    };

    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_envelope_failure_status() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ocs/v2.php/cloud/user/fields");
        then.status(200).json_body(json!({
            "ocs": {
                "meta": {"status": "failure", "statuscode": 997, "message": "Unauthorised"},
                "data": []
            }
        }));
    });

    match client(&server).users().editable_fields().await {
        Err(Error::Ocs(e)) => {
            assert_eq!(e.status, 200);
            assert_eq!(e.ocs_status, Some(997));
            assert_eq!(
                e.to_string(),
                "Received 200 on GET /ocs/v2.php/cloud/user/fields (OCS status 997): Unauthorised"
            );
        }
        res => panic!("Expected OCS error, got {:?}", res),
    };

    mock.assert_hits_async(1).await;
    Ok(())
}
