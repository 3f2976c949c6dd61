//! Route table of the service.
//!
//! Handlers take the raw body so that malformed JSON reaches the library's
//! validation and comes back as the uniform error envelope. Fitting runs on
//! actix's blocking pool, never on the async workers.
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;
use serde::Serialize;

use boundary_classifiers::config::ModelType;
use boundary_classifiers::handler::{handle_gbdt_request, ErrorEnvelope};
use boundary_classifiers::BoundaryError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    let api = web::scope("/api")
        .route("/xgboost", web::post().to(gbdt))
        .route("/gbdt", web::post().to(gbdt));
    #[cfg(feature = "svm")]
    let api = api.route("/svm", web::post().to(svm));

    cfg.route("/health", web::get().to(health)).service(api);
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

fn request_line(req: &HttpRequest, body: &web::Bytes) -> String {
    format!("{} {} ({} bytes)", req.method(), req.path(), body.len())
}

async fn gbdt(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    info!("{}", request_line(&req, &body));
    let outcome = web::block(move || handle_gbdt_request(&body)).await;
    respond(ModelType::GBDT, outcome)
}

#[cfg(feature = "svm")]
async fn svm(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    use boundary_classifiers::handler::handle_svm_request;

    info!("{}", request_line(&req, &body));
    let outcome = web::block(move || handle_svm_request(&body)).await;
    respond(ModelType::SVM, outcome)
}

fn respond<T: Serialize>(
    model: ModelType,
    outcome: Result<Result<T, ErrorEnvelope>, actix_web::error::BlockingError>,
) -> HttpResponse {
    match outcome {
        Ok(Ok(payload)) => HttpResponse::Ok().json(payload),
        Ok(Err(envelope)) => failure(envelope),
        Err(e) => failure(ErrorEnvelope::new(
            model,
            &BoundaryError::Inference(format!("worker pool unavailable: {}", e)),
        )),
    }
}

fn failure(envelope: ErrorEnvelope) -> HttpResponse {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(envelope)
}
