use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, TC_API_PORT, etc.
    let _ = dotenvy::dotenv();

    let config = crate::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting tc penalty API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to open database {}: {}", config.database.url, e));
    database::init_schema(&pool).await.expect("schema setup");

    let app = app(AppState::new(pool));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("tc penalty API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(public_routes())
        // Protected resources behind the api key gate
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{coaches, trains};

    Router::new()
        .route(
            "/trains",
            get(trains::trains_list).post(trains::train_create),
        )
        .route(
            "/trains/:id",
            get(trains::train_show).put(trains::train_update),
        )
        .route("/trains/:id/coaches", post(coaches::coach_create))
        .route("/:id/coaches", get(coaches::coaches_list))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::api_key_auth,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "error": false,
        "name": "tc-penalty-api",
        "version": version,
        "endpoints": {
            "register": "POST /register (public)",
            "login": "POST /login (public)",
            "trains": "GET|POST /trains, GET|PUT /trains/:id (api key)",
            "coaches": "POST /trains/:id/coaches, GET /:id/coaches (api key)",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "error": false,
                "status": "ok",
                "timestamp": now.to_rfc3339(),
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "error": true,
                    "status": "degraded",
                    "timestamp": now.to_rfc3339(),
                    "message": "database unavailable"
                })),
            )
        }
    }
}
