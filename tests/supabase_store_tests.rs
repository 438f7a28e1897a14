use produtos_api::{
    app::produtos::NewProduct,
    config::{StoreBackend, StoreConfig},
    infrastructure::store::{ProductStore, StoreError, SupabaseStore},
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const KEY: &str = "anon-key";
const TABLE_PATH: &str = "/rest/v1/produtos";

fn store_for(server: &MockServer) -> SupabaseStore {
    SupabaseStore::new(&StoreConfig {
        backend: StoreBackend::Supabase,
        url: server.uri(),
        key: KEY.to_string(),
        table: "produtos".to_string(),
    })
    .unwrap()
}

fn row(id: i64, nome: &str, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nome": nome,
        "preco": 5.5,
        "descricao": null,
        "created_at": created_at,
    })
}

#[tokio::test]
async fn list_sends_credentials_and_ordering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer anon-key"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc,id.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            row(2, "Bolo", "2024-03-09T12:30:05.123456+00:00"),
            row(1, "Pão", "2024-03-09T12:00:00+00:00"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = store_for(&server).list().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 2);
    assert_eq!(products[0].name, "Bolo");
    assert_eq!(products[1].name, "Pão");
}

#[tokio::test]
async fn insert_asks_for_representation_and_returns_echoed_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .and(header("apikey", KEY))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({ "nome": "Pão", "preco": 5.5, "descricao": null })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([row(10, "Pão", "2024-03-09T12:00:00+00:00")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = store_for(&server)
        .insert(NewProduct {
            name: "Pão".to_string(),
            price: 5.5,
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 10);
    assert_eq!(created.price, 5.5);
}

#[tokio::test]
async fn insert_without_echoed_row_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = store_for(&server)
        .insert(NewProduct {
            name: "Pão".to_string(),
            price: 5.5,
            description: None,
        })
        .await;
    assert!(matches!(result, Err(StoreError::Decode(_))));
}

#[tokio::test]
async fn delete_filters_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(TABLE_PATH))
        .and(header("apikey", KEY))
        .and(header("prefer", "return=representation"))
        .and(query_param("id", "eq.7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([row(7, "Bolo", "2024-03-09T12:00:00+00:00")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let deleted = store_for(&server).delete(7).await.unwrap();
    assert_eq!(deleted.map(|p| p.name), Some("Bolo".to_string()));
}

#[tokio::test]
async fn delete_matching_no_rows_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "eq.4242"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).delete(4242).await.unwrap(), None);
}

#[tokio::test]
async fn rejection_carries_store_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "details": null,
            "hint": null,
            "message": "relation \"public.produtos\" does not exist",
        })))
        .mount(&server)
        .await;

    assert_eq!(
        store_for(&server).list().await,
        Err(StoreError::Rejected(
            "relation \"public.produtos\" does not exist".to_string()
        ))
    );
}

#[tokio::test]
async fn unexpected_row_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "x" }])))
        .mount(&server)
        .await;

    assert!(matches!(
        store_for(&server).list().await,
        Err(StoreError::Decode(_))
    ));
}

#[tokio::test]
async fn unreachable_store_is_unavailable() {
    let store = SupabaseStore::new(&StoreConfig {
        backend: StoreBackend::Supabase,
        url: "http://127.0.0.1:1".to_string(),
        key: KEY.to_string(),
        table: "produtos".to_string(),
    })
    .unwrap();

    assert!(matches!(
        store.list().await,
        Err(StoreError::Unavailable(_))
    ));
}
