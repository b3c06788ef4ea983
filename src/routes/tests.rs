//! 基于 actix test 的 HTTP 层测试

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use super::configure_api_routes;
use crate::cache::ObjectCache;
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::models::AppStartTime;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

async fn app_data() -> (
    web::Data<Arc<dyn Storage>>,
    web::Data<Arc<dyn ObjectCache>>,
) {
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().unwrap());
    (web::Data::new(storage), web::Data::new(cache))
}

// 每个测试使用独立地址，避免共享限流计数
fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, last_octet], 40000))
}

// 学校名决定域名，同名学校会冲突
fn register_body(email: &str, password: &str) -> Value {
    let name = email.split(['@', '.']).nth(1).unwrap_or("school");
    json!({
        "name": format!("{name} High"),
        "email": email,
        "password": password,
        "city": "Springfield"
    })
}

macro_rules! init_app {
    () => {{
        let (storage, cache) = app_data().await;
        init_app!(storage, cache)
    }};
    ($storage:expr, $cache:expr) => {{
        let (storage, cache) = ($storage, $cache);
        test::init_service(
            App::new()
                .app_data(storage)
                .app_data(cache)
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(configure_api_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["uptimeSecs"].as_i64().unwrap() >= 0);
}

#[actix_web::test]
async fn test_protected_route_requires_token() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/classes")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/school/profile")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_rejects_weak_password() {
    let (storage, cache) = app_data().await;
    let app = init_app!(storage.clone(), cache);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/school/register")
        .peer_addr(peer(1))
        .set_json(register_body("office@weak.test", "short"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().all(|d| d["field"] == "password"));
    assert!(!details.is_empty());

    // 校验失败时不写入任何数据
    assert!(
        storage
            .get_school_by_email("office@weak.test")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_user_by_email("office@weak.test")
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_register_login_and_role_gate() {
    let app = init_app!();
    let email = "office@greenwood.test";
    let password = "Str0ng@Pass";

    // 注册学校
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/school/register")
        .peer_addr(peer(2))
        .set_json(register_body(email, password))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["role"], "admin");

    // 重复注册
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/school/register")
        .peer_addr(peer(2))
        .set_json(register_body(email, password))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 密码错误
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer(3))
        .set_json(json!({ "email": email, "password": "Wrong@Pass1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    // 正确登录，邮箱大小写不敏感
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer(3))
        .set_json(json!({ "email": "Office@Greenwood.test", "password": password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["tokens"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();
    let bearer = ("Authorization", format!("Bearer {token}"));

    let req = test::TestRequest::get()
        .uri("/api/v1/school/profile")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "greenwood High");

    // 管理员不能访问家长面板
    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/parent")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/classes/999")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 登出后令牌失效
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// 注册学校并返回管理员 access token
macro_rules! admin_token {
    ($app:expr, $octet:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/school/register")
            .peer_addr(peer($octet))
            .set_json(register_body($email, "Str0ng@Pass"))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let token = body["data"]["tokens"]["accessToken"].as_str().unwrap();
        ("Authorization", format!("Bearer {token}"))
    }};
}

#[actix_web::test]
async fn test_class_with_students_cannot_be_deleted() {
    let app = init_app!();
    let bearer = admin_token!(app, 4, "office@riverside.test");

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer.clone())
        .set_json(json!({ "name": "Grade 5", "section": "A", "academicYear": "2025-26" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let class_id = body["data"]["id"].as_i64().unwrap();

    // 同名同班同学年重复
    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer.clone())
        .set_json(json!({ "name": "Grade 5", "section": "A", "academicYear": "2025-26" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/students")
        .insert_header(bearer.clone())
        .set_json(json!({
            "email": "maya@riverside.test",
            "firstName": "Maya",
            "lastName": "Lin",
            "classId": class_id,
            "rollNumber": "01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/classes/{class_id}"))
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer.clone())
        .set_json(json!({ "name": "Grade 6", "section": "B", "academicYear": "2025-26" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let empty_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/classes/{empty_id}"))
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 另一所学校看不到这个班级
    let other = admin_token!(app, 5, "office@hilltop.test");
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/classes/{class_id}"))
        .insert_header(other)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
