use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    context::REQUESTER_HEADER,
    handlers::{
        health::{healthz, livez},
        templates::{
            create_template, delete_template, get_template, get_template_by_name,
            list_templates, refresh_templates, update_template,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUESTER_HEADER),
            HeaderName::from_static("x-request-id"),
        ]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/refresh", post(refresh_templates))
        .route("/templates/by-name/{name}", get(get_template_by_name))
        .route(
            "/templates/{id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use sagefemme_core::template::{Template, TemplateType};

    fn u1() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-0000000000a1").unwrap()
    }

    fn u2() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-0000000000a2").unwrap()
    }

    struct Fixture {
        system: Template,
        mine: Template,
        theirs: Template,
    }

    fn fixture() -> (Fixture, Router) {
        let fixture = Fixture {
            system: Template::system(
                "Mycose Vaginale",
                "Infections",
                TemplateType::Medication,
                "Econazole 150mg",
            ),
            mine: Template::owned_by(
                u1(),
                "Echo perso",
                "Imagerie",
                TemplateType::Imaging,
                "Echographie",
            ),
            theirs: Template::owned_by(
                u2(),
                "Bilan perso",
                "Biologie",
                TemplateType::LabBiology,
                "NFS",
            ),
        };
        let state = AppState::with_templates(vec![
            fixture.system.clone(),
            fixture.mine.clone(),
            fixture.theirs.clone(),
        ]);
        (fixture, create_app(state))
    }

    fn get_as(uri: &str, requester: Option<Uuid>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(id) = requester {
            builder = builder.header(REQUESTER_HEADER, id.to_string());
        }
        builder.body(Body::empty()).unwrap()
    }

    fn form_as(method: &str, uri: &str, requester: Option<Uuid>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded");
        if let Some(id) = requester {
            builder = builder.header(REQUESTER_HEADER, id.to_string());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_names(response: axum::response::Response) -> Vec<String> {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        json.iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_list_templates_without_requester_shows_system_only() {
        let (_, app) = fixture();

        let response = app.oneshot(get_as("/api/templates", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_names(response).await, vec!["Mycose Vaginale"]);
    }

    #[tokio::test]
    async fn test_list_templates_includes_own_templates() {
        let (_, app) = fixture();

        let response = app
            .oneshot(get_as("/api/templates", Some(u1())))
            .await
            .unwrap();

        assert_eq!(
            json_names(response).await,
            vec!["Mycose Vaginale", "Echo perso"]
        );
    }

    #[tokio::test]
    async fn test_list_templates_search_query() {
        let (_, app) = fixture();

        let response = app
            .oneshot(get_as("/api/templates?q=MYCO", Some(u1())))
            .await
            .unwrap();

        assert_eq!(json_names(response).await, vec!["Mycose Vaginale"]);
    }

    #[tokio::test]
    async fn test_list_templates_by_type_and_category() {
        let (_, app) = fixture();

        let by_type = app
            .clone()
            .oneshot(get_as("/api/templates?type=lab_biology", Some(u2())))
            .await
            .unwrap();
        assert_eq!(json_names(by_type).await, vec!["Bilan perso"]);

        let by_category = app
            .oneshot(get_as("/api/templates?category=infections", None))
            .await
            .unwrap();
        assert_eq!(json_names(by_category).await, vec!["Mycose Vaginale"]);
    }

    #[tokio::test]
    async fn test_list_templates_unknown_type_is_bad_request() {
        let (_, app) = fixture();

        let response = app
            .oneshot(get_as("/api/templates?type=xray", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_template_by_name_respects_visibility() {
        let (_, app) = fixture();

        let visible = app
            .clone()
            .oneshot(get_as("/api/templates/by-name/Echo%20perso", Some(u1())))
            .await
            .unwrap();
        assert_eq!(visible.status(), StatusCode::OK);

        let hidden = app
            .oneshot(get_as("/api/templates/by-name/Echo%20perso", Some(u2())))
            .await
            .unwrap();
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_template_by_id() {
        let (fixture, app) = fixture();

        let response = app
            .clone()
            .oneshot(get_as(
                &format!("/api/templates/{}", fixture.theirs.id),
                Some(u2()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "Bilan perso");

        let response = app
            .oneshot(get_as(
                "/api/templates/00000000-0000-0000-0000-000000000000",
                Some(u2()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_template_requires_requester() {
        let (_, app) = fixture();

        let response = app
            .oneshot(form_as(
                "POST",
                "/api/templates",
                None,
                "name=Fer&category=Supplements&template_type=medication&content=Tardyferon",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_template_is_visible_immediately() {
        let (_, app) = fixture();

        // Warm the cache first so the create has something to invalidate
        let before = app
            .clone()
            .oneshot(get_as("/api/templates", Some(u1())))
            .await
            .unwrap();
        assert_eq!(json_names(before).await.len(), 2);

        let response = app
            .clone()
            .oneshot(form_as(
                "POST",
                "/api/templates",
                Some(u1()),
                "name=Fer&category=Supplements&template_type=medication&priority=urgent&content=Tardyferon&description=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = json_body(response).await;
        assert_eq!(created["owner_id"], u1().to_string());
        assert_eq!(created["priority"], "urgent");
        assert_eq!(created["is_system"], false);
        assert!(created["description"].is_null());

        let after = app
            .oneshot(get_as("/api/templates", Some(u1())))
            .await
            .unwrap();
        assert_eq!(
            json_names(after).await,
            vec!["Mycose Vaginale", "Echo perso", "Fer"]
        );
    }

    #[tokio::test]
    async fn test_create_template_validation_error() {
        let (_, app) = fixture();

        let response = app
            .oneshot(form_as(
                "POST",
                "/api/templates",
                Some(u1()),
                "name=%20%20&category=Supplements&template_type=medication&content=x",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_template_malformed_form() {
        let (_, app) = fixture();

        let response = app
            .oneshot(form_as(
                "POST",
                "/api/templates",
                Some(u1()),
                "name=Fer&template_type=radio",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_own_template() {
        let (fixture, app) = fixture();
        let uri = format!("/api/templates/{}", fixture.mine.id);

        app.clone()
            .oneshot(get_as("/api/templates", Some(u1())))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(form_as("PUT", &uri, Some(u1()), "name=Echo%20T2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["category"], "Imagerie");

        let response = app
            .oneshot(get_as("/api/templates/by-name/Echo%20T2", Some(u1())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_blank_description_clears_it() {
        let (fixture, app) = fixture();
        let uri = format!("/api/templates/{}", fixture.mine.id);

        let response = app
            .clone()
            .oneshot(form_as("PUT", &uri, Some(u1()), "description=Second%20trimestre"))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["description"], "Second trimestre");

        let response = app
            .clone()
            .oneshot(form_as("PUT", &uri, Some(u1()), "description="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert!(updated["description"].is_null());
        assert_eq!(updated["name"], "Echo perso");

        let response = app.oneshot(get_as(&uri, Some(u1()))).await.unwrap();
        assert!(json_body(response).await["description"].is_null());
    }

    #[tokio::test]
    async fn test_update_forbidden_for_system_and_foreign_templates() {
        let (fixture, app) = fixture();

        let system = app
            .clone()
            .oneshot(form_as(
                "PUT",
                &format!("/api/templates/{}", fixture.system.id),
                Some(u1()),
                "name=Hack",
            ))
            .await
            .unwrap();
        assert_eq!(system.status(), StatusCode::FORBIDDEN);

        let foreign = app
            .oneshot(form_as(
                "PUT",
                &format!("/api/templates/{}", fixture.theirs.id),
                Some(u1()),
                "name=Hack",
            ))
            .await
            .unwrap();
        assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_update_missing_template() {
        let (_, app) = fixture();

        let response = app
            .oneshot(form_as(
                "PUT",
                &format!("/api/templates/{}", Uuid::new_v4()),
                Some(u1()),
                "name=X",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_deactivate_hides_template() {
        let (fixture, app) = fixture();

        let response = app
            .clone()
            .oneshot(form_as(
                "PUT",
                &format!("/api/templates/{}", fixture.mine.id),
                Some(u1()),
                "is_active=false",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let list = app
            .oneshot(get_as("/api/templates", Some(u1())))
            .await
            .unwrap();
        assert_eq!(json_names(list).await, vec!["Mycose Vaginale"]);
    }

    #[tokio::test]
    async fn test_delete_template() {
        let (fixture, app) = fixture();
        let uri = format!("/api/templates/{}", fixture.mine.id);

        let forbidden = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .header(REQUESTER_HEADER, u2().to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .header(REQUESTER_HEADER, u1().to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_as(&uri, Some(u1()))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_refresh_clears_cache() {
        let (_, app) = fixture();

        app.clone()
            .oneshot(get_as("/api/templates", None))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/templates/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let health = app.oneshot(get_as("/healthz", None)).await.unwrap();
        assert_eq!(json_body(health).await["populated"], false);
    }

    #[tokio::test]
    async fn test_livez() {
        let (_, app) = fixture();

        let response = app.oneshot(get_as("/livez", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_healthz_reports_cache_status() {
        let (_, app) = fixture();

        app.clone()
            .oneshot(get_as("/api/templates", None))
            .await
            .unwrap();
        let response = app.oneshot(get_as("/healthz", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let status = json_body(response).await;
        assert_eq!(status["populated"], true);
        assert_eq!(status["fresh"], true);
        assert_eq!(status["template_count"], 3);
        assert_eq!(status["ttl_seconds"], 300);
    }
}
