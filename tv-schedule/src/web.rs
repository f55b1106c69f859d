use actix_files::Files;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use chrono::{Datelike, Local, Timelike};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::channels::ChannelTable;
use crate::display::write_schedule_to_file;
use crate::parser::read_schedule_records;
use crate::schedule::{build_schedule, NextProgram, ProgramSlotEntry, Schedule, Weekday};

pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// Shared state of the viewer; the schedule is swapped wholesale on upload
pub struct AppState {
    pub schedule: Mutex<Schedule>,
    pub channels: ChannelTable,
    pub output_path: PathBuf,
    pub admin_password: Option<String>,
}

impl AppState {
    pub fn new(
        schedule: Schedule,
        channels: ChannelTable,
        output_path: PathBuf,
        admin_password: Option<String>,
    ) -> Self {
        Self {
            schedule: Mutex::new(schedule),
            channels,
            output_path,
            admin_password,
        }
    }

    fn schedule(&self) -> Result<MutexGuard<'_, Schedule>> {
        self.schedule
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("schedule lock poisoned"))
    }

    /// Saves `schedule` to the output file, then makes it the served one.
    ///
    /// The lock is held across both steps so the file on disk always matches
    /// the schedule in memory. On a failed write the old schedule stays.
    pub fn replace_schedule(&self, schedule: Schedule) -> Result<()> {
        let mut current = self.schedule()?;
        if let Err(e) = write_schedule_to_file(&schedule, &self.output_path) {
            warn!("Uploaded schedule not saved: {}", e);
            return Err(actix_web::error::ErrorInternalServerError(e.to_string()));
        }
        *current = schedule;
        Ok(())
    }
}

#[derive(Serialize)]
pub struct NowResponse<'a> {
    pub day: Weekday,
    pub time: String,
    pub now_playing: Option<&'a [ProgramSlotEntry]>,
    pub next: Option<NextProgram<'a>>,
}

/// What is on at `hour` of `day`, and what follows
pub fn now_response(schedule: &Schedule, day: Weekday, hour: u8) -> NowResponse<'_> {
    NowResponse {
        day,
        time: format!("{:02}:00", hour),
        now_playing: schedule.now_playing(day, hour),
        next: schedule.find_next(day, hour),
    }
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub rows_read: usize,
    pub rows_scheduled: usize,
    pub occupied_slots: usize,
    pub warnings: Vec<String>,
}

// Full weekly schedule
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let schedule = state.schedule()?;
    Ok(HttpResponse::Ok().json(&*schedule))
}

// One day's 24 slots
async fn get_day(day: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let day = match day.parse::<Weekday>() {
        Ok(day) => day,
        Err(e) => return Ok(HttpResponse::BadRequest().json(serde_json::json!({"error": e}))),
    };

    let schedule = state.schedule()?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "day": day,
        "slots": schedule.day(day),
    })))
}

// Current slot by the server's local clock
async fn get_now(state: web::Data<AppState>) -> Result<HttpResponse> {
    let now = Local::now();
    let day = Weekday::from(now.weekday());
    let hour = now.hour() as u8;

    let schedule = state.schedule()?;
    Ok(HttpResponse::Ok().json(now_response(&schedule, day, hour)))
}

// Admin upload of a new raw schedule CSV
async fn upload_schedule(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let password = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let authorized = matches!(&state.admin_password, Some(expected) if expected == password);
    if !authorized {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let records = match read_schedule_records(&body[..]) {
        Ok(records) => records,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to process CSV: {}", e)
            })))
        }
    };

    let build = build_schedule(&state.channels, &records);
    let response = UploadResponse {
        success: true,
        rows_read: build.rows_read,
        rows_scheduled: build.rows_scheduled,
        occupied_slots: build.schedule.occupied_slots(),
        warnings: build.warnings().map(|d| d.to_string()).collect(),
    };

    state.replace_schedule(build.schedule)?;
    info!("Schedule replaced by upload ({} rows)", response.rows_read);

    Ok(HttpResponse::Ok().json(response))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html))
}

/// Routes of the viewer, shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule/{day}", web::get().to(get_day))
        .route("/api/now", web::get().to(get_now))
        .route("/api/upload", web::post().to(upload_schedule));
}

pub async fn start_server(
    state: AppState,
    port: u16,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    if state.admin_password.is_none() {
        warn!("No admin password configured, uploads are disabled");
    }

    let app_state = web::Data::new(state);

    info!("Starting web server on port {}", port);
    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default());
        if let Some(dir) = static_dir.as_ref().filter(|dir| dir.is_dir()) {
            app = app.service(Files::new("/static", dir));
        }
        app.configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
