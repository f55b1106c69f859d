use actix_web::{test, web, App};
use serde_json::Value;
use tempfile::TempDir;

use tv_schedule::schedule::{ProgramSlotEntry, Schedule, TimeKey, Weekday};
use tv_schedule::web::{configure, AppState, ADMIN_PASSWORD_HEADER};
use tv_schedule::{ChannelEntry, ChannelTable};

fn state(dir: &TempDir) -> web::Data<AppState> {
    state_with_password(dir, Some("secret"))
}

fn state_with_password(dir: &TempDir, password: Option<&str>) -> web::Data<AppState> {
    let channels: ChannelTable = vec![
        ChannelEntry::from_fields("台視", "https://www.youtube.com/watch?v=ttv", None).unwrap(),
        ChannelEntry::from_fields("中視", "https://www.youtube.com/live/ctv", None).unwrap(),
    ]
    .into_iter()
    .collect();

    let mut schedule = Schedule::new();
    schedule.insert(
        &[Weekday::Monday],
        TimeKey::from_hour(8).unwrap(),
        &[ProgramSlotEntry {
            program_name: "早安".to_string(),
            channel: "台視".to_string(),
            live_url: Some("https://www.youtube.com/watch?v=ttv".to_string()),
            embed_url: Some("https://www.youtube.com/embed/ttv".to_string()),
        }],
    );

    web::Data::new(AppState::new(
        schedule,
        channels,
        dir.path().join("schedule.json"),
        password.map(str::to_string),
    ))
}

#[actix_web::test]
async fn test_full_schedule_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.as_object().unwrap().len(), 7);
    assert_eq!(body["monday"]["08:00"][0]["program_name"], "早安");
    assert!(body["tuesday"]["08:00"].is_null());
}

#[actix_web::test]
async fn test_day_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/schedule/monday").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["day"], "monday");
    assert_eq!(body["slots"].as_object().unwrap().len(), 24);

    let req = test::TestRequest::get().uri("/api/schedule/someday").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_now_endpoint_shape() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/now").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["day"].is_string());
    assert!(body["time"].as_str().unwrap().ends_with(":00"));
    assert!(body.get("now_playing").is_some());
    assert!(body.get("next").is_some());
}

#[actix_web::test]
async fn test_upload_requires_password() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((ADMIN_PASSWORD_HEADER, "wrong"))
        .set_payload("時間,類別,節目,頻道\n09:00,每天,新聞,台視\n")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert!(!dir.path().join("schedule.json").exists());
}

#[actix_web::test]
async fn test_upload_replaces_schedule() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((ADMIN_PASSWORD_HEADER, "secret"))
        .set_payload("時間,類別,節目,頻道\n21:00,週末,電影,\"中視、無名台\"\nN/A,每天,壞資料,台視\n")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["rows_read"], 2);
    assert_eq!(body["rows_scheduled"], 1);
    assert_eq!(body["occupied_slots"], 2);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let schedule: Value = test::call_and_read_body_json(&app, req).await;
    assert!(schedule["monday"]["08:00"].is_null());
    assert_eq!(schedule["sunday"]["21:00"][0]["embed_url"], "https://www.youtube.com/embed/ctv");

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("schedule.json")).unwrap()).unwrap();
    assert_eq!(saved, schedule);
}

#[actix_web::test]
async fn test_index_page() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_upload_disabled_without_configured_password() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_with_password(&dir, None))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((ADMIN_PASSWORD_HEADER, ""))
        .set_payload("時間,類別,節目,頻道\n09:00,每天,新聞,台視\n")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert!(!dir.path().join("schedule.json").exists());
}

#[actix_web::test]
async fn test_upload_with_invalid_utf8_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let mut payload = "時間,類別,節目,頻道\n09:00,每天,".as_bytes().to_vec();
    payload.extend_from_slice(&[0xff, 0xfe]);
    payload.extend_from_slice(",台視\n".as_bytes());

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((ADMIN_PASSWORD_HEADER, "secret"))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert!(!dir.path().join("schedule.json").exists());

    let req = test::TestRequest::get().uri("/api/schedule").to_request();
    let schedule: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(schedule["monday"]["08:00"][0]["program_name"], "早安");
}

#[actix_web::test]
async fn test_index_page_inserts_schedule_text_as_text() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(App::new().app_data(state(&dir)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page = std::str::from_utf8(&body).unwrap();

    assert!(!page.contains("innerHTML"));
    assert!(page.contains("textContent"));
    assert!(page.contains("iframe.src = url.href"));
}
