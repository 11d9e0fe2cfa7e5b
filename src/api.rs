use crate::booking::{self, RawFormValues, ValidationError};
use crate::form::{self, FormLayout};
use crate::intake::{IntakeDesk, Notification, Outcome};
use axum::{
    extract::{rejection::JsonRejection, Json, Request, State},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use schemars::{schema::RootSchema, schema_for};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    timeout::TimeoutLayer,
};
use tracing::{debug, error, trace};

pub type AppState = Arc<IntakeDesk>;

/// Everything the page needs for its first render.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub layout: FormLayout,
    pub values: RawFormValues,
    pub submitting: bool,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub notification: Notification,
    /// Present on success: the reset form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<RawFormValues>,
}

fn field_errors(err: ValidationError) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(err)).into_response()
}

/// Bodies that are not a form object still answer with the field error envelope.
fn rejected(rejection: JsonRejection) -> Response {
    debug!("Rejected form body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(serde_json::json!({
            "errors": {},
            "message": rejection.body_text(),
        })),
    )
        .into_response()
}

async fn handle_form(State(desk): State<AppState>) -> Json<FormView> {
    Json(FormView {
        layout: form::layout(),
        values: RawFormValues::default(),
        submitting: desk.is_submitting(),
    })
}

async fn handle_schema() -> Json<RootSchema> {
    Json(schema_for!(RawFormValues))
}

async fn handle_validate(payload: Result<Json<RawFormValues>, JsonRejection>) -> Response {
    let Json(values) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    match booking::validate(&values) {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
        Err(err) => field_errors(err),
    }
}

async fn handle_book(
    State(desk): State<AppState>,
    payload: Result<Json<RawFormValues>, JsonRejection>,
) -> Response {
    let Json(values) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };

    // runs detached so a dropped request never aborts a call the webhook may already have
    let submission = tokio::spawn(async move { desk.submit(values).await });
    let outcome = match submission.await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Booking submission task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BookingResponse {
                    notification: Notification::fallback(),
                    values: None,
                }),
            )
                .into_response();
        }
    };

    match outcome {
        Outcome::Sent(notification) => (
            StatusCode::OK,
            Json(BookingResponse {
                notification,
                values: Some(RawFormValues::default()),
            }),
        )
            .into_response(),
        Outcome::Invalid(err) => field_errors(err),
        Outcome::Busy => (
            StatusCode::CONFLICT,
            Json(BookingResponse {
                notification: Notification::busy(),
                values: None,
            }),
        )
            .into_response(),
        Outcome::Failed(err, notification) => {
            debug!("Webhook submission failed: {:?}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(BookingResponse {
                    notification,
                    values: None,
                }),
            )
                .into_response()
        }
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn trace_request(request: Request, next: Next) -> Response {
    trace!("{}, {}", request.method(), request.uri().path());
    next.run(request).await
}

fn intake_api(desk: AppState) -> Router {
    let timed = Router::new()
        .route("/form", get(handle_form))
        .route("/form/schema", get(handle_schema))
        .route("/validate", post(handle_validate))
        .route("/health", get(handle_health))
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    // no inbound timeout: the webhook call always runs to its own completion
    Router::new()
        .route("/book", post(handle_book))
        .merge(timed)
        .with_state(desk)
}

/// The full application router. Static files are served by the caller.
pub fn router(desk: AppState) -> Router {
    let middleware = tower::ServiceBuilder::new()
        .layer(CompressionLayer::new().quality(tower_http::CompressionLevel::Fastest))
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(middleware::from_fn(trace_request));

    Router::new()
        .nest("/api", intake_api(desk))
        .layer(middleware)
}
