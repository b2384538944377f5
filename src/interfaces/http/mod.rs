use crate::application::StatusComparison;
use crate::domain::error::AppError;
use crate::domain::protocol::SourceKind;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use base64::Engine as _;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub comparison: Arc<StatusComparison>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

/// One comparison request: both sheets travel in the body, either as
/// raw base64 or as browser data URLs
#[derive(Deserialize, Validate)]
pub struct CompareRequest {
    /// Display name of the carrier upload, for logging only
    #[serde(default)]
    pub carrier_name: Option<String>,

    /// Carrier sheet bytes, base64 or data-URL encoded
    #[validate(length(min = 1))]
    pub carrier_content: String,

    /// Display name of the internal upload, for logging only
    #[serde(default)]
    pub internal_name: Option<String>,

    /// Internal sheet bytes, base64 or data-URL encoded
    #[validate(length(min = 1))]
    pub internal_content: String,
}

impl CompareRequest {
    fn carrier_label(&self) -> &str {
        self.carrier_name.as_deref().unwrap_or("carrier sheet")
    }

    fn internal_label(&self) -> &str {
        self.internal_name.as_deref().unwrap_or("internal sheet")
    }
}

/// Error payload rendered by the dashboard: what went wrong in plain
/// words, plus the underlying parser message
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub detail: String,
}

impl ErrorBody {
    fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

impl From<AppError> for ErrorBody {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Load { message, detail } => Self { message, detail },
            other => Self::new("comparison failed", other.to_string()),
        }
    }
}

#[get("/")]
async fn dashboard() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("dashboard.html"))
}

#[post("/compare")]
async fn compare(data: web::Data<HttpState>, req: web::Json<CompareRequest>) -> impl Responder {
    if let Err(e) = req.validate() {
        add_log(
            &data.logs,
            "ERROR",
            "HttpApi",
            &format!("Rejected comparison request: {}", e),
        );
        return HttpResponse::BadRequest()
            .json(ErrorBody::new("both sheet uploads are required", e.to_string()));
    }

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Comparing '{}' against '{}'",
            req.carrier_label(),
            req.internal_label()
        ),
    );

    let carrier_bytes = match decode_upload(SourceKind::Carrier, &req.carrier_content) {
        Ok(bytes) => bytes,
        Err(detail) => {
            add_log(&data.logs, "ERROR", "HttpApi", &detail);
            return HttpResponse::BadRequest()
                .json(ErrorBody::new("carrier upload could not be decoded", detail));
        }
    };

    let internal_bytes = match decode_upload(SourceKind::Internal, &req.internal_content) {
        Ok(bytes) => bytes,
        Err(detail) => {
            add_log(&data.logs, "ERROR", "HttpApi", &detail);
            return HttpResponse::BadRequest()
                .json(ErrorBody::new("internal upload could not be decoded", detail));
        }
    };

    match data.comparison.run(&carrier_bytes, &internal_bytes) {
        Ok(report) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!(
                    "Comparison finished: {} equal, {} divergent",
                    report.equal_count, report.divergent_count
                ),
            );
            HttpResponse::Ok().json(report)
        }
        Err(err @ AppError::Load { .. }) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Comparison rejected: {}", err),
            );
            HttpResponse::BadRequest().json(ErrorBody::from(err))
        }
        Err(err) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Comparison failed: {}", err),
            );
            HttpResponse::InternalServerError().json(ErrorBody::from(err))
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Decode one uploaded sheet. Accepts a raw base64 string or a browser
/// data URL (`data:<mime>;base64,<payload>`).
fn decode_upload(source: SourceKind, content: &str) -> std::result::Result<Vec<u8>, String> {
    let data = match content.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => {
            if !header.contains(";base64") {
                return Err(format!("{} upload is not base64 encoded", source));
            }
            data
        }
        _ => content,
    };

    let trimmed = data.trim().trim_start_matches('\u{feff}');
    let cleaned = trimmed.replace('\n', "").replace('\r', "").replace(' ', "");

    base64::engine::general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .or_else(|_| {
            let url_safe = cleaned.replace('-', "+").replace('_', "/");
            base64::engine::general_purpose::STANDARD.decode(url_safe.as_bytes())
        })
        .map_err(|e| format!("{} upload is not valid base64: {}", source, e))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(
    comparison: Arc<StatusComparison>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    host: &str,
    port: u16,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { comparison, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(dashboard)
            .service(
                web::scope("/api")
                    .service(compare)
                    .service(get_logs)
                    .service(health),
            )
    })
    .bind((host, port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_upload_raw_base64() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"col1;col2");

        let bytes = decode_upload(SourceKind::Carrier, &payload).unwrap();

        assert_eq!(bytes, b"col1;col2".to_vec());
    }

    #[test]
    fn test_decode_upload_data_url() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"col1;col2");
        let data_url = format!("data:text/csv;base64,{}", payload);

        let bytes = decode_upload(SourceKind::Carrier, &data_url).unwrap();

        assert_eq!(bytes, b"col1;col2".to_vec());
    }

    #[test]
    fn test_decode_upload_ignores_wrapped_lines() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"col1;col2");
        let wrapped = format!("{}\r\n{}", &payload[..4], &payload[4..]);

        let bytes = decode_upload(SourceKind::Internal, &wrapped).unwrap();

        assert_eq!(bytes, b"col1;col2".to_vec());
    }

    #[test]
    fn test_decode_upload_accepts_url_safe_alphabet() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode([0xfb, 0xff]);

        let bytes = decode_upload(SourceKind::Internal, &payload).unwrap();

        assert_eq!(bytes, vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_upload_rejects_unencoded_data_url() {
        let err = decode_upload(SourceKind::Carrier, "data:text/csv;plain,a;b;c").unwrap_err();

        assert!(err.contains("not base64 encoded"));
    }

    #[test]
    fn test_decode_upload_rejects_garbage() {
        assert!(decode_upload(SourceKind::Carrier, "!!!").is_err());
    }

    #[test]
    fn test_request_requires_both_sheets() {
        let request = CompareRequest {
            carrier_name: None,
            carrier_content: "aGVsbG8=".to_string(),
            internal_name: None,
            internal_content: String::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_load_errors_keep_message_and_detail() {
        let body = ErrorBody::from(AppError::load("sheet is too narrow", "expected 20 columns"));

        assert_eq!(body.message, "sheet is too narrow");
        assert_eq!(body.detail, "expected 20 columns");
    }

    #[test]
    fn test_log_ring_is_capped() {
        let logs = Mutex::new(Vec::new());

        for i in 0..105 {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }

        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), 100);
        assert_eq!(logs[0].message, "entry 5");
        assert_eq!(logs[99].message, "entry 104");
    }
}
