use actix_web::http::{StatusCode, header};
use actix_web::{App, ResponseError, test, web};
use serde_json::{Value, json};

use squishy_shop_backend::config::{AdminConfig, DatabaseConfig};
use squishy_shop_backend::database::{create_pool, run_migrations};
use squishy_shop_backend::handlers;
use squishy_shop_backend::middlewares::{AuthMiddleware, SessionMiddleware};
use squishy_shop_backend::services::Services;
use squishy_shop_backend::utils::JwtService;

const COOKIE_NAME: &str = "squishy_session";

fn jwt() -> JwtService {
    JwtService::new("test-secret", 3600, 86400)
}

async fn setup() -> Services {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();

    let services = Services::new(pool, jwt());
    services
        .admin_auth
        .ensure_default_admin(&AdminConfig::default())
        .await
        .unwrap();
    services
}

macro_rules! test_app {
    () => {{
        let services = setup().await;
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt()))
                .wrap(SessionMiddleware::new(COOKIE_NAME, false))
                .configure(|cfg| services.configure(cfg))
                .app_data(handlers::json_config())
                .app_data(handlers::path_config())
                .app_data(handlers::query_config())
                .service(web::scope("/api").configure(handlers::api_config)),
        )
        .await
    }};
}

async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).unwrap()
}

#[actix_web::test]
async fn test_product_list_envelope() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 8);
    assert!(products[0]["tags"].is_array());
}

#[actix_web::test]
async fn test_unknown_product_is_404_and_bad_id_is_400() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/products/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"]["code"], "NOT_FOUND");

    let req = test::TestRequest::get().uri("/api/products/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_wishlist_rejects_non_positive_product_id() {
    let app = test_app!();

    for req in [
        test::TestRequest::get().uri("/api/wishlist/check/0"),
        test::TestRequest::get().uri("/api/wishlist/check/-5"),
        test::TestRequest::delete().uri("/api/wishlist/0"),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"]["code"], "VALIDATION_ERROR");
    }
}

#[actix_web::test]
async fn test_new_visitor_is_issued_a_session() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/cart").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let issued = resp
        .headers()
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap();
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}={issued}")));
    assert!(cookie.contains("HttpOnly"));

    // a presented key is reused, nothing new is issued
    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(("X-Session-Id", issued.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[actix_web::test]
async fn test_cart_merge_and_remove_by_zero_quantity() {
    let app = test_app!();
    let session = ("X-Session-Id", "cart-visitor");

    for quantity in [2, 3] {
        let req = test::TestRequest::post()
            .uri("/api/cart")
            .insert_header(session)
            .set_json(json!({ "productId": 1, "quantity": quantity }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(session)
        .to_request();
    let cart = body_json(test::call_service(&app, req).await).await;
    let items = cart["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);
    assert_eq!(items[0]["product"]["id"], 1);
    assert_eq!(cart["data"]["totalItems"], 5);
    assert_eq!(cart["data"]["totalPrice"], "64.95");
    let line_id = items[0]["id"].as_i64().unwrap();

    // other sessions cannot touch the line
    let req = test::TestRequest::patch()
        .uri(&format!("/api/cart/{line_id}"))
        .insert_header(("X-Session-Id", "someone-else"))
        .set_json(json!({ "quantity": 4 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/cart/{line_id}"))
        .insert_header(session)
        .set_json(json!({ "quantity": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/cart")
        .insert_header(session)
        .to_request();
    let cart = body_json(test::call_service(&app, req).await).await;
    assert!(cart["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(cart["data"]["totalPrice"], "0.00");
}

#[actix_web::test]
async fn test_malformed_json_gets_error_envelope() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/cart")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_redeem_refusal_reports_reason() {
    let app = test_app!();
    let session = ("X-Session-Id", "gamer");

    // no profile yet
    let req = test::TestRequest::post()
        .uri("/api/game/rewards/1/redeem")
        .insert_header(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "UNABLE_TO_REDEEM");
    assert_eq!(body["error"]["reason"], "profile_not_found");

    let req = test::TestRequest::post()
        .uri("/api/game/score")
        .insert_header(session)
        .set_json(json!({
            "gameType": "squishy-clicker",
            "score": 100,
            "pointsEarned": 10,
            "duration": 30
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["profile"]["totalPoints"], 10);

    let req = test::TestRequest::post()
        .uri("/api/game/rewards/1/redeem")
        .insert_header(session)
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["error"]["reason"], "insufficient_points");

    // balance untouched by the refusal
    let req = test::TestRequest::get()
        .uri("/api/game/profile")
        .insert_header(session)
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["totalPoints"], 10);
}

#[actix_web::test]
async fn test_admin_routes_require_token() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/admin/sales").to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admin/sales")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "username": "admin", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "username": "admin", "password": "change-me-admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["username"], "admin");

    let req = test::TestRequest::get()
        .uri("/api/admin/sales")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(!body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_inventory_display_status_follows_stock() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "username": "admin", "password": "change-me-admin" }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let bearer = format!("Bearer {}", body["data"]["accessToken"].as_str().unwrap());

    let req = test::TestRequest::post()
        .uri("/api/admin/inventory")
        .insert_header((header::AUTHORIZATION, bearer.as_str()))
        .set_json(json!({
            "type": "MAC",
            "item": "PEACH OOLONG",
            "retailPrice": "30",
            "resellPrice": "60",
            "stock": 1,
            "status": "Shipping"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["displayStatus"], "Shipping");
    assert_eq!(body["data"]["retailPrice"], "30.00");
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/inventory/{id}"))
        .insert_header((header::AUTHORIZATION, bearer.as_str()))
        .set_json(json!({ "stock": 0 }))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["displayStatus"], "Sold out");
    assert_eq!(body["data"]["status"], "Shipping");
}
