//! PokeApi against a local mock server

use pokedex::api::PokeApi;
use pokedex::error::PokedexError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bulbasaur(shiny: Option<&str>) -> serde_json::Value {
    json!({
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "types": [
            {"slot": 1, "type": {"name": "grass"}},
            {"slot": 2, "type": {"name": "poison"}}
        ],
        "sprites": {
            "front_default": "https://sprites.test/1.png",
            "front_shiny": shiny
        },
        "stats": [
            {"base_stat": 45, "stat": {"name": "hp"}},
            {"base_stat": 49, "stat": {"name": "attack"}},
            {"base_stat": 49, "stat": {"name": "defense"}},
            {"base_stat": 65, "stat": {"name": "special-attack"}},
            {"base_stat": 65, "stat": {"name": "special-defense"}},
            {"base_stat": 45, "stat": {"name": "speed"}}
        ],
        "abilities": [{"ability": {"name": "overgrow"}}]
    })
}

#[tokio::test]
async fn test_fetch_creature_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/bulbasaur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur(None)))
        .expect(1)
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    let record = api.fetch_creature("bulbasaur").await.unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.types, vec!["grass".to_string(), "poison".to_string()]);
    assert_eq!(record.height_m, 0.7);
    assert_eq!(record.weight_kg, 6.9);
    assert_eq!(record.stats.special_attack, 65);
}

#[tokio::test]
async fn test_non_success_status_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/agumon"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    let error = api.fetch_creature("agumon").await.unwrap_err();

    assert_eq!(
        error,
        PokedexError::NotFound {
            key: "agumon".into(),
            status: 404,
        }
    );
}

#[tokio::test]
async fn test_server_error_is_also_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    let error = api.fetch_creature("25").await.unwrap_err();
    assert!(matches!(error, PokedexError::NotFound { status: 503, .. }));
}

#[tokio::test]
async fn test_missing_field_is_malformed() {
    let server = MockServer::start().await;
    let mut body = bulbasaur(None);
    body.as_object_mut().unwrap().remove("stats");
    Mock::given(method("GET"))
        .and(path("/pokemon/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    let error = api.fetch_creature("1").await.unwrap_err();
    assert!(error.is_malformed());
}

#[tokio::test]
async fn test_unreachable_server_is_transient() {
    // Nothing listens on the discard port.
    let api = PokeApi::new("http://127.0.0.1:9");
    let error = api.fetch_creature("1").await.unwrap_err();
    assert!(matches!(error, PokedexError::TransientNetwork { .. }));
}

#[tokio::test]
async fn test_shiny_sprite_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(bulbasaur(Some("https://sprites.test/shiny/1.png"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    let url = api.fetch_shiny_sprite(1).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://sprites.test/shiny/1.png"));
}

#[tokio::test]
async fn test_shiny_sprite_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur(None)))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    assert_eq!(api.fetch_shiny_sprite(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_fetch_bytes_rejects_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = PokeApi::new(server.uri());
    let url = format!("{}/missing.png", server.uri());
    assert!(api.fetch_bytes(&url).await.is_err());
}
