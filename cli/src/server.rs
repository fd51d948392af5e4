#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use chrono::NaiveDate;
    use reckon::{
        evaluate, is_complete, parse, Element, Evaluation, Limits, Puzzle, PuzzleConfig, Replay,
        ReplayStep, Session, Submission,
    };
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tracing::{error, info};

    type SharedConfig = Arc<PuzzleConfig>;

    #[derive(Debug, Deserialize)]
    struct DailyQuery {
        date: Option<NaiveDate>,
    }

    #[derive(Debug, Deserialize)]
    struct EvaluateRequest {
        expression: String,
    }

    #[derive(Debug, Serialize)]
    struct EvaluateResponse {
        expression: Vec<Element>,
        value: Evaluation,
        complete: bool,
    }

    #[derive(Debug, Deserialize)]
    struct CheckRequest {
        expression: String,
        /// Defaults to the puzzle of `date`, or of today
        puzzle: Option<Puzzle>,
        date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize)]
    struct CheckResponse {
        puzzle: Puzzle,
        steps: Vec<ReplayStep>,
        accepted: bool,
        submission: Submission,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    type ApiError = (StatusCode, Json<ErrorResponse>);

    fn bad_request(message: String) -> ApiError {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
    }

    pub fn router(config: PuzzleConfig) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/daily_puzzle", get(daily_puzzle))
            .route("/src/daily_puzzle", get(daily_puzzle))
            .route("/evaluate", post(evaluate_post))
            .route("/check", post(check_post))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(config))
    }

    pub async fn start_server(config: PuzzleConfig, host: &str, port: u16) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "reckon=info,tower_http=info".into()),
            )
            .init();

        let app = router(config);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Reckon server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "reckon",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    fn puzzle_for(config: &PuzzleConfig, date: Option<NaiveDate>) -> Result<Puzzle, ApiError> {
        let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
        Puzzle::daily(date, config).map_err(|e| {
            error!("Puzzle generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Puzzle generation failed: {}", e),
                }),
            )
        })
    }

    async fn daily_puzzle(
        State(config): State<SharedConfig>,
        Query(query): Query<DailyQuery>,
    ) -> Result<Json<Puzzle>, ApiError> {
        let puzzle = puzzle_for(&config, query.date)?;
        info!("Served puzzle {:?} target {}", puzzle.numbers, puzzle.target);
        Ok(Json(puzzle))
    }

    async fn evaluate_post(
        Json(payload): Json<EvaluateRequest>,
    ) -> Result<Json<EvaluateResponse>, ApiError> {
        let elements = parse(&payload.expression, None, &Limits::default()).map_err(|e| {
            error!("Failed to parse expression: {}", e);
            bad_request(format!("Failed to parse expression: {}", e))
        })?;

        let complete = is_complete(&elements);
        let evaluable = match elements.last() {
            Some(Element::Operator(_)) => &elements[..elements.len() - 1],
            _ => &elements[..],
        };
        let value = evaluate(evaluable)
            .map_err(|e| bad_request(format!("Evaluation failed: {}", e)))?;

        info!("Evaluated '{}' = {}", payload.expression, value);
        Ok(Json(EvaluateResponse {
            expression: elements,
            value,
            complete,
        }))
    }

    async fn check_post(
        State(config): State<SharedConfig>,
        Json(payload): Json<CheckRequest>,
    ) -> Result<Json<CheckResponse>, ApiError> {
        let puzzle = match payload.puzzle {
            Some(puzzle) => puzzle,
            None => puzzle_for(&config, payload.date)?,
        };
        let mut session =
            Session::new(puzzle).map_err(|e| bad_request(format!("Invalid puzzle: {}", e)))?;

        let elements = parse(&payload.expression, None, &Limits::default()).map_err(|e| {
            error!("Failed to parse expression: {}", e);
            bad_request(format!("Failed to parse expression: {}", e))
        })?;

        let Replay { steps } = session.replay(&elements);
        let accepted = steps.iter().all(|step| step.outcome.is_accepted());
        let submission = session.submit();

        info!(
            "Checked '{}': {} step(s), solved: {}",
            payload.expression,
            steps.len(),
            submission.is_solved()
        );

        Ok(Json(CheckResponse {
            puzzle: session.puzzle().clone(),
            steps,
            accepted,
            submission,
        }))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use axum::body::{to_bytes, Body};
        use axum::http::Request;
        use tower::ServiceExt;

        async fn call(request: Request<Body>) -> (StatusCode, serde_json::Value) {
            let response = router(PuzzleConfig::default())
                .oneshot(request)
                .await
                .unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        }

        #[tokio::test]
        async fn test_health() {
            let request = Request::get("/health").body(Body::empty()).unwrap();
            let (status, body) = call(request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "ok");
        }

        #[tokio::test]
        async fn test_daily_puzzle_for_date() {
            let request = Request::get("/src/daily_puzzle?date=2024-03-15")
                .body(Body::empty())
                .unwrap();
            let (status, body) = call(request).await;
            assert_eq!(status, StatusCode::OK);

            let expected = Puzzle::daily(
                NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                &PuzzleConfig::default(),
            )
            .unwrap();
            assert_eq!(body, serde_json::to_value(&expected).unwrap());
        }

        #[tokio::test]
        async fn test_evaluate() {
            let request = post_json("/evaluate", serde_json::json!({"expression": "2 + 3 × 4"}));
            let (status, body) = call(request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["value"]["kind"], "finite");
            assert_eq!(body["value"]["value"], "14");
            assert_eq!(body["complete"], true);
        }

        #[tokio::test]
        async fn test_evaluate_parse_error() {
            let request = post_json("/evaluate", serde_json::json!({"expression": "4 x 6"}));
            let (status, body) = call(request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].as_str().unwrap().contains("parse"));
        }

        #[tokio::test]
        async fn test_check_with_puzzle() {
            let request = post_json(
                "/check",
                serde_json::json!({
                    "expression": "(4 × 6) + 2",
                    "puzzle": {"numbers": [4, 6, 2], "target": 26}
                }),
            );
            let (status, body) = call(request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["accepted"], true);
            assert_eq!(body["submission"]["type"], "solved");
        }

        #[tokio::test]
        async fn test_check_rejected_step() {
            let request = post_json(
                "/check",
                serde_json::json!({
                    "expression": "10 ÷ 3",
                    "puzzle": {"numbers": [10, 3], "target": 3}
                }),
            );
            let (status, body) = call(request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["accepted"], false);
            assert_eq!(body["steps"][2]["outcome"]["reason"]["kind"], "unsafe");
        }

        #[tokio::test]
        async fn test_check_empty_puzzle() {
            let request = post_json(
                "/check",
                serde_json::json!({
                    "expression": "1 + 2",
                    "puzzle": {"numbers": [], "target": 3}
                }),
            );
            let (status, _) = call(request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }
}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _config: reckon::PuzzleConfig,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
