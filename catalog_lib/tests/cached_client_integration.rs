use std::time::Duration;

use catalog_lib::sort::sort_products;
use catalog_lib::{AddressState, CachedClient, CatalogError, MemoryCache, PageWindow};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CachedClient {
    CachedClient::with_base_url(&server.uri(), MemoryCache::new(Duration::from_secs(60)))
}

#[tokio::test]
async fn repeated_query_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("skip", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/products.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let query = AddressState::default().to_product_query(12);
    let first = client.get_products(&query).await.unwrap();
    let second = client.get_products(&query).await.unwrap();

    assert_eq!(first.products.len(), second.products.len());
    assert_eq!(second.total, 194);
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn different_pages_are_cached_separately() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/products.json")),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let page1 = AddressState::parse("page=1").to_product_query(12);
    let page2 = AddressState::parse("page=2").to_product_query(12);
    client.get_products(&page1).await.unwrap();
    client.get_products(&page2).await.unwrap();
    client.get_products(&page2).await.unwrap();
    assert_eq!(client.cached_entries(), 2);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    for _ in 0..2 {
        let err = client.get_categories().await.unwrap_err();
        assert_eq!(err.to_string(), "API Error 500: boom");
        assert!(matches!(err, CatalogError::Api(_)));
    }
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn product_detail_is_cached_by_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/78"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/product.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let first = client.get_product(78).await.unwrap();
    let second = client.get_product(78).await.unwrap();
    assert_eq!(first.id, 78);
    assert_eq!(second.reviews.len(), first.reviews.len());
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/categories.json")),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert_eq!(client.get_categories().await.unwrap().len(), 4);
    client.clear_cache();
    assert_eq!(client.get_categories().await.unwrap().len(), 4);
}

#[tokio::test]
async fn sorted_address_flows_to_request_and_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/category/beauty"))
        .and(query_param("sortBy", "price"))
        .and(query_param("order", "desc"))
        .and(query_param("limit", "3"))
        .and(query_param("skip", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/products.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let address = AddressState::parse("category=beauty&sortBy=price&order=desc&page=2");
    let resp = client(&mock_server)
        .get_products(&address.to_product_query(3))
        .await
        .unwrap();

    let (key, order) = address.sort().unwrap();
    let sorted = sort_products(&resp.products, Some(key), Some(order));
    let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![19.99, 14.99, 9.99]);

    let window = PageWindow::new(address.page, resp.total, resp.limit);
    assert_eq!(window.pages(), 65);
    assert!(window.can_go_previous());
}
