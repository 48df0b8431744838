//! HTTP middleware components.

pub mod auth;
pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
pub mod trace_id;

pub use self::auth::{require_admin, require_auth, AuthUser};
pub use self::metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use self::rate_limit::{rate_limit_middleware, RateLimiterState};
pub use self::security_headers::security_headers_middleware;
pub use self::trace_id::trace_id;
