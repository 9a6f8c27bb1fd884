//! HTTP API integration tests
//!
//! Drives the full application (middleware, routes, services and storage)
//! through the actix test harness.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::STRONG_PASSWORD;
    use crate::common::{ConfigFactory, ElementFactory, TestDatabase, UserFactory};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{test, web};
    use cese_backend::config::RateRule;
    use cese_backend::server::{AppState, create_app};
    use cese_backend::storage::StorageLayer;
    use serde_json::{Value, json};

    fn memory_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(ConfigFactory::memory(), StorageLayer::memory()))
    }

    /// Register and log in through the services, returning the bearer header value
    async fn sign_in(state: &AppState, n: u32) -> String {
        let phone = UserFactory::phone(n);
        state.users.register(&phone, STRONG_PASSWORD).await.unwrap();
        let login = state.users.login(&phone, STRONG_PASSWORD).await.unwrap();
        format!("Bearer {}", login.access_token)
    }

    #[actix_web::test]
    async fn test_element_crud_over_http() {
        let state = memory_state();
        let auth = sign_in(&state, 1).await;
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/context-elements")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(ElementFactory::content("Weekly report"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "Created");
        assert_eq!(body["data"]["subject"], "Weekly report");
        let id = body["data"]["id"].as_u64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/context-elements/{}", id))
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["ai_role"], "technical writer");

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/context-elements/{}", id))
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(json!({ "ai_role": "copy editor" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Updated");
        assert_eq!(body["data"]["ai_role"], "copy editor");
        assert_eq!(body["data"]["subject"], "Weekly report");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/context-elements/{}", id))
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 200);
        assert!(body.get("data").is_none());

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/context-elements/{}", id))
            .insert_header((AUTHORIZATION, auth))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 2001);
    }

    #[actix_web::test]
    async fn test_elements_are_private_to_their_owner() {
        let state = memory_state();
        let owner = sign_in(&state, 1).await;
        let intruder = sign_in(&state, 2).await;
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/context-elements/")
            .insert_header((AUTHORIZATION, owner))
            .set_json(ElementFactory::content("Private plan"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_u64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/context-elements/{}", id))
            .insert_header((AUTHORIZATION, intruder.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 403);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/context-elements/{}", id))
            .insert_header((AUTHORIZATION, intruder.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements")
            .insert_header((AUTHORIZATION, intruder))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn test_element_requests_need_a_token() {
        let app = test::init_service(create_app(memory_state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 3003);
    }

    #[actix_web::test]
    async fn test_bad_element_input() {
        let state = memory_state();
        let auth = sign_in(&state, 1).await;
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements/not-a-number")
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 400);

        let req = test::TestRequest::post()
            .uri("/api/v1/context-elements")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(json!({ "task_goal": "no subject" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 2003);

        let req = test::TestRequest::put()
            .uri("/api/v1/context-elements/77")
            .insert_header((AUTHORIZATION, auth))
            .set_json(json!({ "subject": "ghost" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 2001);
    }

    #[actix_web::test]
    async fn test_listing_pages_and_filters() {
        let state = memory_state();
        let auth = sign_in(&state, 1).await;
        let app = test::init_service(create_app(state)).await;

        for (subject, role) in [
            ("alpha", "editor"),
            ("bravo", "engineer"),
            ("charlie", "editor"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/v1/context-elements")
                .insert_header((AUTHORIZATION, auth.clone()))
                .set_json(ElementFactory::with_ai_role(subject, role))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements?page=2&size=2&sort_by=subject")
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["page"], 2);
        assert_eq!(body["size"], 2);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["subject"], "charlie");

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements?ai_role=edit&size=500")
            .insert_header((AUTHORIZATION, auth))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["size"], 100);
        assert_eq!(body["page"], 1);
    }

    #[actix_web::test]
    async fn test_user_gate_limits_per_account() {
        let mut config = ConfigFactory::memory();
        config.rate_limit.user = Some(RateRule::new(1, "1m"));
        let state = web::Data::new(AppState::new(config, StorageLayer::memory()));
        let first = sign_in(&state, 1).await;
        let second = sign_in(&state, 2).await;
        let app = test::init_service(create_app(state)).await;

        let list = |auth: &str| {
            test::TestRequest::get()
                .uri("/api/v1/context-elements")
                .insert_header((AUTHORIZATION, auth.to_string()))
                .to_request()
        };

        assert_eq!(test::call_service(&app, list(&first)).await.status(), StatusCode::OK);
        let res = test::call_service(&app, list(&first)).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 429);

        assert_eq!(test::call_service(&app, list(&second)).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_full_flow_on_sqlite() {
        let db = TestDatabase::new().await;
        let state = web::Data::new(AppState::new(ConfigFactory::memory(), db.storage()));
        let auth = sign_in(&state, 7).await;
        let app = test::init_service(create_app(state)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/context-elements")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(ElementFactory::content("Persisted"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 200);

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements?keyword=Persist")
            .insert_header((AUTHORIZATION, auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/context-elements?page=1000000000000000000")
            .insert_header((AUTHORIZATION, auth))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"], json!([]));

        // Duplicate phone through the HTTP surface
        let req = test::TestRequest::post()
            .uri("/api/v1/user/register")
            .set_json(json!({ "phone": UserFactory::phone(7), "password": STRONG_PASSWORD }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 1001);
    }
}
