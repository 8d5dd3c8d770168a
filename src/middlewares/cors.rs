use actix_cors::Cors;

/// CORS for the storefront. An empty `allowed_origins` accepts any origin.
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allowed_origin_fn(|_, _req_head| true)
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PATCH", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec!["X-Session-Id"])
        // session cookie travels cross-origin from the storefront
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, HttpResponse, ResponseError, test, web};

    #[actix_web::test]
    async fn test_allow_list_restricts_origins() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&["https://shop.example".to_string()]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://shop.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://shop.example"
        );

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://elsewhere.example"))
            .to_request();
        let allowed = match test::try_call_service(&app, req).await {
            Ok(resp) => {
                resp.status().is_success()
                    && resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            }
            Err(e) => e.as_response_error().status_code().is_success(),
        };
        assert!(!allowed);
    }

    #[actix_web::test]
    async fn test_empty_list_accepts_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&[]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }
}
