use abi2api::catalog::EndpointCatalog;
use abi2api::executor::ExecutorClient;
use abi2api::handlers;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const ADDRESS: &str = "erd1qqqqqqqqqqqqqpgqsrpfn4rzp0me4qrhpguznvsjrugmzez0u7zs2a0cu0";

fn catalog() -> Arc<EndpointCatalog> {
    let mut catalog = EndpointCatalog::default();
    catalog
        .insert(
            "calc",
            ADDRESS,
            json!({
                "name": "Calculator",
                "endpoints": [
                    {
                        "name": "getSum",
                        "mutability": "readonly",
                        "inputs": [
                            {"name": "a", "type": "u32"},
                            {"name": "b", "type": "optional<u32>"}
                        ],
                        "outputs": [{"type": "u64"}]
                    },
                    {
                        "name": "add",
                        "mutability": "mutable",
                        "inputs": [{"name": "value", "type": "BigUint"}],
                        "outputs": []
                    }
                ],
                "types": {}
            }),
        )
        .unwrap();
    Arc::new(catalog)
}

/// Executor handle pointed at a port nothing listens on, calls fail fast.
fn unreachable_executor() -> ExecutorClient {
    ExecutorClient::new("http://127.0.0.1:1/execute", Duration::from_secs(1))
}

macro_rules! service {
    ($catalog:expr) => {{
        let catalog = $catalog;
        test::init_service(
            App::new()
                .app_data(web::Data::new(unreachable_executor()))
                .app_data(web::Data::from(catalog.clone()))
                .configure(|cfg| handlers::register_routes(cfg, &catalog)),
        )
        .await
    }};
}

#[actix_rt::test]
async fn swagger_document_is_served() {
    let app = service!(catalog());
    let req = test::TestRequest::get()
        .uri("/api/calc/swagger.json")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["swagger"], "2.0");
    assert!(body["paths"]["/calc/getSum"].is_object());
    // mutable endpoints are not documented
    assert!(body["paths"]["/calc/add"].is_null());
}

#[actix_rt::test]
async fn unknown_app_is_not_found() {
    let app = service!(catalog());
    let req = test::TestRequest::get()
        .uri("/api/nope/swagger.json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
}

#[actix_rt::test]
async fn docs_page_renders_html() {
    let app = service!(catalog());
    let req = test::TestRequest::get().uri("/calc/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body = test::read_body(res).await;
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("/api/calc/swagger.json"));
}

#[actix_rt::test]
async fn mutable_endpoints_are_not_routed() {
    let app = service!(catalog());
    let req = test::TestRequest::get().uri("/calc/add").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "App calc has no readonly endpoint add");
}

#[actix_rt::test]
async fn unknown_endpoint_gets_a_json_error() {
    let app = service!(catalog());
    let req = test::TestRequest::get()
        .uri("/calc/getProduct")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "App calc has no readonly endpoint getProduct");

    // the app segment is checked first
    let req = test::TestRequest::get().uri("/nope/getSum").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "No app registered under name nope");
}

#[actix_rt::test]
async fn unreachable_executor_maps_to_bad_gateway() {
    let app = service!(catalog());
    let req = test::TestRequest::get()
        .uri("/calc/getSum?a=3&b=4")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 502);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].is_string());
}
