use crate::infrastructure::{Method, RequestExecutor};
use crate::types::constants::{
    HEARTBEAT_INTERVAL_THRESHOLD_SECS, HEARTBEAT_JITTER_FLOOR, HEARTBEAT_JITTER_MIN_OFFSET,
    HEARTBEAT_LONG_FACTOR, HEARTBEAT_SHORT_FACTOR, paths,
};
use crate::types::{Decoded, RegistryError, Result};
use rand::Rng;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

/// Keeps one session's lease alive by renewing it at a fixed interval
/// until [`stop`](HeartBeater::stop) is called.
///
/// A HeartBeater is created alongside a session-create request with the
/// session id unknown; the response decoder back-fills the id and seeds
/// the initial heartbeat token. [`start`](HeartBeater::start) sends the
/// first renewal immediately and then spawns a loop that sleeps for the
/// (per-tick jittered) interval between sends. Each successful renewal
/// rotates the token; a failed send is logged and the loop carries on at
/// the same interval.
///
/// Ticks for one session are strictly sequential: the loop never schedules
/// the next tick until the in-flight request has settled and the stop flag
/// has been checked.
pub struct HeartBeater {
    executor: RequestExecutor,
    session_id: Option<String>,
    heartbeat_timeout: u64,
    interval: Duration,
    next_token: Arc<RwLock<Option<String>>>,
    stop_tx: Option<watch::Sender<bool>>,
    stopped: bool,
}

impl HeartBeater {
    pub(crate) fn new(
        executor: RequestExecutor,
        session_id: Option<String>,
        heartbeat_timeout: u64,
    ) -> Self {
        Self {
            executor,
            session_id,
            heartbeat_timeout,
            interval: calculate_interval(heartbeat_timeout),
            next_token: Arc::new(RwLock::new(None)),
            stop_tx: None,
            stopped: false,
        }
    }

    /// The renewal interval, computed once from the heartbeat timeout.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The heartbeat timeout this session was created with, in seconds.
    pub fn heartbeat_timeout(&self) -> u64 {
        self.heartbeat_timeout
    }

    /// The session this HeartBeater renews, once known.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The most recent token acknowledged by the server; the next
    /// heartbeat always sends this one.
    pub fn next_token(&self) -> Option<String> {
        self.next_token.read().unwrap().clone()
    }

    /// Back-fill the session id once the create response names it.
    pub(crate) fn bind_session(&mut self, session_id: &str) {
        if self.session_id.is_none() {
            self.session_id = Some(session_id.to_string());
        }
    }

    pub(crate) fn seed_token(&mut self, token: &str) {
        *self.next_token.write().unwrap() = Some(token.to_string());
    }

    /// Start heartbeating the session. The first renewal is sent
    /// immediately; further renewals follow after the interval until
    /// [`stop`](HeartBeater::stop) is called.
    ///
    /// # Errors
    ///
    /// Fails if the HeartBeater was already stopped or started, or if no
    /// session id / initial token has been seeded yet.
    pub fn start(&mut self) -> Result<()> {
        if self.stopped {
            return Err(RegistryError::Heartbeat(
                "heartbeater is stopped".to_string(),
            ));
        }
        if self.stop_tx.is_some() {
            return Err(RegistryError::Heartbeat(
                "heartbeater already started".to_string(),
            ));
        }
        let session_id = self.session_id.clone().ok_or_else(|| {
            RegistryError::Heartbeat("no session bound to this heartbeater".to_string())
        })?;
        if self.next_token.read().unwrap().is_none() {
            return Err(RegistryError::Heartbeat(
                "no heartbeat token seeded".to_string(),
            ));
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        self.stop_tx = Some(stop_tx);

        let executor = self.executor.clone();
        let interval = self.interval;
        let token_slot = Arc::clone(&self.next_token);

        tokio::spawn(async move {
            let path = format!("{}/{}/heartbeat", paths::SESSIONS, session_id);
            loop {
                let token = token_slot.read().unwrap().clone().unwrap_or_default();
                let payload = serde_json::json!({ "token": token });

                // Not retried within the tick; the next tick still runs.
                match executor
                    .request(Method::POST, &path, &[], Some(&payload), None)
                    .await
                {
                    Ok(Decoded::Resource(body)) => {
                        if let Some(next) = body.get("token").and_then(Value::as_str) {
                            *token_slot.write().unwrap() = Some(next.to_string());
                        }
                    }
                    Ok(other) => {
                        tracing::warn!(
                            session = %session_id,
                            "unexpected heartbeat response shape: {other:?}"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(session = %session_id, "heartbeat send failed: {e}");
                    }
                }

                // The stop check must happen after the in-flight request
                // settles and before the next tick is scheduled.
                if *stop_rx.borrow() {
                    break;
                }

                let delay = jittered_delay(interval);
                tokio::select! {
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = time::sleep(delay) => {}
                }
            }
            tracing::debug!(session = %session_id, "heartbeat loop finished");
        });

        Ok(())
    }

    /// Stop heartbeating the session. A pending tick is cancelled
    /// synchronously; a request already in flight still completes but no
    /// further tick is scheduled. Idempotent, and also valid before
    /// `start()` (the heartbeater then never starts). Dropping the
    /// HeartBeater without calling `stop()` ends the loop at its next
    /// stop check.
    pub fn stop(&mut self) {
        self.stopped = true;
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl std::fmt::Debug for HeartBeater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeartBeater")
            .field("session_id", &self.session_id)
            .field("interval", &self.interval)
            .field("stopped", &self.stopped)
            .finish()
    }
}

fn calculate_interval(heartbeat_timeout: u64) -> Duration {
    let factor = if heartbeat_timeout < HEARTBEAT_INTERVAL_THRESHOLD_SECS {
        HEARTBEAT_SHORT_FACTOR
    } else {
        HEARTBEAT_LONG_FACTOR
    };
    Duration::from_secs_f64(heartbeat_timeout as f64 * factor)
}

/// Per-tick delay: the base interval plus, for intervals over the jitter
/// floor, a uniform integer offset in [-3, 0] seconds. The stored interval
/// is never mutated.
fn jittered_delay(interval: Duration) -> Duration {
    if interval <= HEARTBEAT_JITTER_FLOOR {
        return interval;
    }
    let offset = rand::thread_rng().gen_range(HEARTBEAT_JITTER_MIN_OFFSET..=0);
    Duration::from_secs_f64((interval.as_secs_f64() + offset as f64).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTransport, executor_with, json_response};
    use std::sync::Arc;

    fn heartbeater_for(transport: Arc<MockTransport>, timeout: u64) -> HeartBeater {
        let mut heartbeater = HeartBeater::new(executor_with(transport), None, timeout);
        heartbeater.bind_session("sessionId");
        heartbeater.seed_token("T1");
        heartbeater
    }

    #[test]
    fn test_interval_calculation() {
        assert_eq!(calculate_interval(15), Duration::from_secs_f64(12.0));
        assert_eq!(calculate_interval(30), Duration::from_secs_f64(24.0));
        assert_eq!(calculate_interval(14), Duration::from_secs_f64(8.4));
        assert_eq!(calculate_interval(10), Duration::from_secs_f64(6.0));
    }

    #[test]
    fn test_jitter_only_above_floor() {
        let short = Duration::from_secs_f64(4.8);
        for _ in 0..50 {
            assert_eq!(jittered_delay(short), short);
        }

        let long = Duration::from_secs(12);
        for _ in 0..200 {
            let delay = jittered_delay(long);
            assert!(delay >= Duration::from_secs(9), "delay too short: {delay:?}");
            assert!(delay <= long, "delay too long: {delay:?}");
        }
    }

    #[test]
    fn test_start_requires_session_and_token() {
        let transport = Arc::new(MockTransport::new(Vec::new()));

        let mut unbound = HeartBeater::new(executor_with(Arc::clone(&transport)), None, 30);
        unbound.seed_token("T1");
        assert!(matches!(
            unbound.start(),
            Err(RegistryError::Heartbeat(_))
        ));

        let mut unseeded = HeartBeater::new(
            executor_with(Arc::clone(&transport)),
            Some("sessionId".to_string()),
            30,
        );
        assert!(matches!(
            unseeded.start(),
            Err(RegistryError::Heartbeat(_))
        ));

        let mut stopped = heartbeater_for(transport, 30);
        stopped.stop();
        assert!(matches!(stopped.start(), Err(RegistryError::Heartbeat(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate_and_rotates_token() {
        let transport = Arc::new(
            MockTransport::new(Vec::new()).with_repeat(json_response(200, r#"{"token":"T2"}"#)),
        );
        // timeout 8 -> interval 4.8s, below the jitter floor
        let mut heartbeater = heartbeater_for(Arc::clone(&transport), 8);
        heartbeater.start().unwrap();

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(transport.request_count(), 1);

        let requests = transport.requests();
        assert!(requests[0].url.ends_with("/sessions/sessionId/heartbeat"));
        let body: Value = serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body["token"], "T1");

        assert_eq!(heartbeater.next_token().as_deref(), Some("T2"));
        heartbeater.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_are_spaced_by_the_interval() {
        let transport = Arc::new(
            MockTransport::new(Vec::new()).with_repeat(json_response(200, r#"{"token":"T2"}"#)),
        );
        let mut heartbeater = heartbeater_for(Arc::clone(&transport), 8);
        heartbeater.start().unwrap();

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(transport.request_count(), 1);

        // one full interval later the second tick has fired, and only it
        time::sleep(Duration::from_secs_f64(4.8)).await;
        assert_eq!(transport.request_count(), 2);

        time::sleep(Duration::from_secs_f64(4.8)).await;
        assert_eq!(transport.request_count(), 3);
        heartbeater.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_the_pending_tick() {
        let transport = Arc::new(
            MockTransport::new(Vec::new()).with_repeat(json_response(200, r#"{"token":"T2"}"#)),
        );
        let mut heartbeater = heartbeater_for(Arc::clone(&transport), 8);
        heartbeater.start().unwrap();

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(transport.request_count(), 1);

        heartbeater.stop();
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_in_flight_request_lets_it_complete() {
        let transport = Arc::new(
            MockTransport::new(Vec::new())
                .with_repeat(json_response(200, r#"{"token":"T2"}"#))
                .with_latency(Duration::from_secs(1)),
        );
        let mut heartbeater = heartbeater_for(Arc::clone(&transport), 8);
        heartbeater.start().unwrap();

        // first request is in flight for 1s; stop before it settles
        time::sleep(Duration::from_millis(500)).await;
        heartbeater.stop();

        time::sleep(Duration::from_secs(60)).await;
        // the in-flight request completed and its token was recorded,
        // but no further tick was scheduled
        assert_eq!(transport.request_count(), 1);
        assert_eq!(heartbeater.next_token().as_deref(), Some("T2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_send_does_not_stop_the_loop() {
        let transport = Arc::new(
            MockTransport::new(vec![json_response(
                500,
                r#"{"type":"serverFault","message":"boom"}"#,
            )])
            .with_repeat(json_response(200, r#"{"token":"T2"}"#)),
        );
        let mut heartbeater = heartbeater_for(Arc::clone(&transport), 8);
        heartbeater.start().unwrap();

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(transport.request_count(), 1);
        // token unchanged after the failure
        assert_eq!(heartbeater.next_token().as_deref(), Some("T1"));

        time::sleep(Duration::from_secs_f64(4.8)).await;
        assert_eq!(transport.request_count(), 2);
        assert_eq!(heartbeater.next_token().as_deref(), Some("T2"));
        heartbeater.stop();
    }
}
