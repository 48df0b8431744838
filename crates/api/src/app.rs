use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::TokenVerifier;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    admin_invoices, admin_jobs, dashboard, health, invoices, jobs, notifications, profile,
    settings,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub verifier: TokenVerifier,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let verifier = TokenVerifier::new(&config.auth.public_key, config.auth.leeway_secs)
        .map_err(|e| anyhow::anyhow!("Failed to initialize token verifier: {}", e))?;
    Ok(create_app_with_verifier(config, pool, verifier))
}

/// Router assembly with an explicit verifier (tests inject an HS256 one).
pub fn create_app_with_verifier(config: Config, pool: PgPool, verifier: TokenVerifier) -> Router {
    let config = Arc::new(config);

    // Create rate limiter if rate limiting is enabled (rate_limit_per_minute > 0)
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        verifier,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authenticated routes (any valid profile)
    // Middleware order: auth runs first, then rate limiting (which needs the caller identity)
    let protected_routes = Router::new()
        // Profile routes (v1)
        .route(
            "/api/v1/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        // Job routes (v1)
        .route("/api/v1/jobs", post(jobs::create_job).get(jobs::list_jobs))
        .route(
            "/api/v1/jobs/:job_id",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        // Invoice routes (v1)
        .route(
            "/api/v1/jobs/:job_id/invoice",
            get(invoices::download_invoice),
        )
        .route("/api/v1/invoices", get(invoices::list_invoices))
        // Notification routes (v1)
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        // Rate limiting runs after auth (needs the profile ID from auth)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes (require admin role)
    let admin_routes = Router::new()
        .route("/api/v1/admin/jobs", get(admin_jobs::list_jobs))
        .route("/api/v1/admin/jobs/:job_id", get(admin_jobs::get_job))
        .route(
            "/api/v1/admin/jobs/:job_id/status",
            put(admin_jobs::set_job_status),
        )
        .route(
            "/api/v1/admin/jobs/:job_id/invoice",
            get(admin_invoices::download_invoice),
        )
        .route("/api/v1/admin/invoices", get(admin_invoices::list_invoices))
        .route(
            "/api/v1/admin/invoices/:invoice_id/status",
            put(admin_invoices::set_invoice_status),
        )
        .route("/api/v1/admin/dashboard", get(dashboard::get_dashboard))
        .route(
            "/api/v1/admin/settings/billing",
            get(settings::get_billing_settings).put(settings::update_billing_settings),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Role check runs after token validation
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
