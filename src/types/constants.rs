use std::time::Duration;

/// Default Service Registry API endpoint.
pub const DEFAULT_API_URL: &str = "https://dfw.registry.api.rackspacecloud.com/v1.0/";

/// API resource paths
pub mod paths {
    pub const SESSIONS: &str = "/sessions";
    pub const SERVICES: &str = "/services";
    pub const EVENTS: &str = "/events";
    pub const CONFIGURATION: &str = "/configuration";
    pub const LIMITS: &str = "/limits";
}

/// Auth token header sent with every request.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Number of times a request is transparently re-issued after a 401.
pub const MAX_AUTH_RETRIES: u32 = 1;

/// Error `type` reported by the registry when a service id is taken.
pub const SERVICE_CONFLICT_TYPE: &str = "serviceWithThisIdExists";

/// Total wall-clock budget for registration retries.
pub const REGISTRATION_RETRY_BUDGET: Duration = Duration::from_secs(30);

/// Default delay between registration attempts.
pub const DEFAULT_REGISTRATION_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Heartbeat timeouts below this many seconds use the short interval factor.
pub const HEARTBEAT_INTERVAL_THRESHOLD_SECS: u64 = 15;

/// Interval factor for short heartbeat timeouts.
pub const HEARTBEAT_SHORT_FACTOR: f64 = 0.6;

/// Interval factor for long heartbeat timeouts.
pub const HEARTBEAT_LONG_FACTOR: f64 = 0.8;

/// Intervals at or below this duration are never jittered.
pub const HEARTBEAT_JITTER_FLOOR: Duration = Duration::from_secs(5);

/// Lowest per-tick jitter offset, in whole seconds (inclusive).
pub const HEARTBEAT_JITTER_MIN_OFFSET: i64 = -3;
