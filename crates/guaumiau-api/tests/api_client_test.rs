#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use guaumiau_api::{ApiClient, Error, Pet, User};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ana@example.com", "password": "secreto1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "555",
            "pets": [{ "id": 1, "name": "Firulais", "type": "Perro", "ownerId": 7 }]
        })))
        .mount(&server)
        .await;

    let user = client
        .login("ana@example.com", &secret("secreto1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.id, Some(7));
    assert_eq!(user.name, "Ana");
    assert_eq!(user.pets.len(), 1);
    assert_eq!(user.pets[0].owner_id, Some(7));
}

#[tokio::test]
async fn test_login_empty_body_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let user = client.login("ana@example.com", &secret("x")).await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_login_rejected_carries_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Credenciales inválidas"))
        .mount(&server)
        .await;

    let err = client.login("ana@example.com", &secret("bad")).await.unwrap_err();
    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body.as_deref(), Some("Credenciales inválidas"));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_register_posts_user_without_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secreto1",
            "phone": "",
            "pets": [{ "name": "Misha", "type": "Gato" }]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let user = User {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        password: Some("secreto1".into()),
        pets: vec![Pet::new("Misha", "Gato")],
        ..User::default()
    };
    client.register(&user).await.unwrap();
}

#[tokio::test]
async fn test_register_conflict_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let err = client.register(&User::default()).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 409, body: None }));
}

// ── Pets ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_pets_preserves_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Firulais", "type": "Perro" },
            { "id": 2, "name": "Misha", "type": "Gato" }
        ])))
        .mount(&server)
        .await;

    let pets = client.list_pets().await.unwrap();
    assert_eq!(
        pets,
        vec![
            Pet::new("Firulais", "Perro").with_id(1),
            Pet::new("Misha", "Gato").with_id(2),
        ]
    );
}

#[tokio::test]
async fn test_list_pets_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client.list_pets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_pets_malformed_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_pets().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_create_update_delete_pet() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/pets"))
        .and(body_json(json!({ "name": "Nuevito", "type": "Perro" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 100, "name": "Nuevito", "type": "Perro" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/pets/100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 100, "name": "Nuevo", "type": "Perro" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/pets/100"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_pet(&Pet::new("Nuevito", "Perro"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.id, Some(100));

    let updated = client
        .update_pet(100, &Pet::new("Nuevo", "Perro").with_id(100))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Nuevo");

    client.delete_pet(100).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_pet() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/pets/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Mascota no encontrada"))
        .mount(&server)
        .await;

    let err = client.delete_pet(9).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404: Mascota no encontrada");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 9 (discard) is effectively never listening on test hosts.
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9/").unwrap(),
    );

    let err = client.list_pets().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
