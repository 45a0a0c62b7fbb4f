use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use icucast::{Population, PopulationConfig};

#[derive(Debug, Deserialize)]
struct ForecastRequest {
    #[serde(default)]
    population: PopulationConfig,
    days: Option<usize>,
    // Optional intervention: once daily new admissions cross the threshold,
    // switch to the lockdown reproduction number and mark the event.
    lockdown_threshold: Option<f64>,
    lockdown_r0: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ForecastResponse {
    days: usize,
    peak_ic: f64,
    peak_ic_day: usize,
    ic: Vec<f64>,
    new_ic: Vec<f64>,
    lockdowns: Vec<usize>,
}

#[tokio::main]
async fn main() {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/forecast", post(forecast));

    let addr: SocketAddr = format!("{}:{}", host, port).parse().expect("invalid HOST/PORT");
    println!("[icucast-api] listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server failed");
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn forecast(Json(req): Json<ForecastRequest>) -> impl IntoResponse {
    // Long runs are CPU work; keep them off the async workers.
    let join = tokio::task::spawn_blocking(move || run_forecast(req));

    match join.await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}

fn run_forecast(req: ForecastRequest) -> Result<ForecastResponse, (StatusCode, serde_json::Value)> {
    let days = req.days.unwrap_or(365).clamp(1, 36_500);
    let lockdown_r0 = req.lockdown_r0.unwrap_or(0.9);

    let mut population = Population::new(req.population).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            json!({"error": format!("invalid population config: {e}")}),
        )
    })?;

    let mut locked_down = false;
    for _ in 0..days {
        if let Some(threshold) = req.lockdown_threshold {
            if !locked_down && population.new_ic() > threshold {
                population.set_r0(lockdown_r0);
                population.mark_lockdown();
                locked_down = true;
            }
        }
        population.step();
    }

    let history = population.history();
    let ic = history.ic().to_vec();
    let (peak_ic_day, peak_ic) = ic
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0_f64), |best, (day, v)| {
            if v > best.1 {
                (day, v)
            } else {
                best
            }
        });

    Ok(ForecastResponse {
        days,
        peak_ic,
        peak_ic_day,
        ic,
        new_ic: history.new_ic().to_vec(),
        lockdowns: population.events().lockdowns().to_vec(),
    })
}
