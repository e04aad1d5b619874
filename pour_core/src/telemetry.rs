//! Remote telemetry intake.
//!
//! The remote feed carries camera frames, orientation data, and a radar
//! payload whose JSON field names vary in casing between firmware
//! builds. A background thread drains the feed and keeps the latest
//! values in a shared snapshot; the estimation loop reads the snapshot
//! without ever blocking on the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use pour_traits::{Clock, TelemetryMessage, TelemetrySource};

use crate::error::{PourError, Result};

/// Remote radar values. Every field is optional: firmware omits fields
/// it cannot measure, and a malformed field drops only itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadarPayload {
    pub material_height_m: Option<f32>,
    pub material_pct: Option<f32>,
    pub current_ma: Option<f32>,
    pub temp_c: Option<f32>,
}

fn numeric(value: &serde_json::Value) -> Option<f32> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map(|v| v as f32),
        // Some firmware builds quote their numbers.
        serde_json::Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}

/// Parse a radar payload. Field names match case-insensitively;
/// unknown fields are ignored. Only a body that is not a JSON object
/// at all is an error.
pub fn parse_radar(body: &str) -> Result<RadarPayload> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| PourError::Parse(format!("radar payload: {e}")))?;
    let Some(map) = value.as_object() else {
        return Err(PourError::Parse("radar payload is not a JSON object".into()).into());
    };
    let mut payload = RadarPayload::default();
    for (key, field) in map {
        match key.to_ascii_lowercase().as_str() {
            "material_height_m" => payload.material_height_m = numeric(field),
            "material_pct" | "material_percent" => payload.material_pct = numeric(field),
            "current_ma" => payload.current_ma = numeric(field),
            "temp_c" | "temperature_c" => payload.temp_c = numeric(field),
            _ => {}
        }
    }
    Ok(payload)
}

/// Latest values seen on the telemetry feed.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub radar: Option<RadarPayload>,
    /// Raw orientation JSON; rendering is a display concern.
    pub orientation_json: Option<String>,
    pub frame_count: u64,
    pub parse_failures: u64,
    /// Milliseconds since subscriber start at the last update.
    pub updated_at_ms: Option<u64>,
}

/// Background drain of a [`TelemetrySource`] into a shared snapshot.
///
/// The worker thread stops and is joined when the subscriber drops.
pub struct TelemetrySubscriber {
    snapshot: Arc<Mutex<TelemetrySnapshot>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TelemetrySubscriber {
    pub fn spawn<S, C>(mut source: S, clock: C, recv_timeout: Duration) -> Self
    where
        S: TelemetrySource + Send + 'static,
        C: Clock + Send + 'static,
    {
        let snapshot = Arc::new(Mutex::new(TelemetrySnapshot::default()));
        let stop = Arc::new(AtomicBool::new(false));
        let shared = Arc::clone(&snapshot);
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let epoch = clock.now();
            while !stop_flag.load(Ordering::Relaxed) {
                match source.recv(recv_timeout) {
                    Ok(Some(message)) => {
                        apply(&shared, message, clock.ms_since(epoch));
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "telemetry receive failed");
                    }
                }
            }
        });
        Self {
            snapshot,
            stop,
            handle: Some(handle),
        }
    }

    /// Clone of the current snapshot. The lock is held only for the copy.
    #[must_use]
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for TelemetrySubscriber {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn apply(shared: &Arc<Mutex<TelemetrySnapshot>>, message: TelemetryMessage, at_ms: u64) {
    // Parse before taking the lock so it is held only for the store.
    let parsed = match message {
        TelemetryMessage::Radar(body) => match parse_radar(&body) {
            Ok(payload) => Parsed::Radar(payload),
            Err(e) => {
                debug!(error = %e, "dropping malformed radar payload");
                Parsed::Failure
            }
        },
        TelemetryMessage::Orientation(body) => Parsed::Orientation(body),
        TelemetryMessage::Frame(_) => Parsed::Frame,
    };
    let Ok(mut guard) = shared.lock() else {
        return;
    };
    match parsed {
        Parsed::Radar(payload) => guard.radar = Some(payload),
        Parsed::Orientation(body) => guard.orientation_json = Some(body),
        Parsed::Frame => guard.frame_count += 1,
        Parsed::Failure => {
            guard.parse_failures += 1;
            return;
        }
    }
    guard.updated_at_ms = Some(at_ms);
}

enum Parsed {
    Radar(RadarPayload),
    Orientation(String),
    Frame,
    Failure,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pour_traits::MonotonicClock;

    #[test]
    fn parses_mixed_case_and_quoted_numbers() {
        let body = r#"{"Material_Height_M": "2.5", "MATERIAL_PCT": 62.5, "current_ma": 12.4, "Temp_C": 48.5}"#;
        let p = parse_radar(body).unwrap();
        assert_eq!(p.material_height_m, Some(2.5));
        assert_eq!(p.material_pct, Some(62.5));
        assert_eq!(p.current_ma, Some(12.4));
        assert_eq!(p.temp_c, Some(48.5));
    }

    #[test]
    fn malformed_field_drops_only_itself() {
        let body = r#"{"material_height_m": "not-a-number", "temp_c": 40.0}"#;
        let p = parse_radar(body).unwrap();
        assert_eq!(p.material_height_m, None);
        assert_eq!(p.temp_c, Some(40.0));
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(parse_radar("[1, 2, 3]").is_err());
        assert!(parse_radar("not json").is_err());
    }

    struct ScriptedFeed {
        messages: Vec<TelemetryMessage>,
    }

    impl TelemetrySource for ScriptedFeed {
        fn recv(
            &mut self,
            timeout: Duration,
        ) -> std::result::Result<Option<TelemetryMessage>, Box<dyn std::error::Error + Send + Sync>>
        {
            match self.messages.pop() {
                Some(m) => Ok(Some(m)),
                None => {
                    std::thread::sleep(timeout);
                    Ok(None)
                }
            }
        }
    }

    #[test]
    fn subscriber_exposes_latest_radar_payload() {
        let feed = ScriptedFeed {
            messages: vec![
                TelemetryMessage::Radar(r#"{"material_height_m": 1.2}"#.into()),
                TelemetryMessage::Frame(vec![0xff, 0xd8]),
            ],
        };
        let sub = TelemetrySubscriber::spawn(feed, MonotonicClock::new(), Duration::from_millis(5));
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        loop {
            let snap = sub.snapshot();
            if snap.radar.is_some() && snap.frame_count == 1 {
                assert_eq!(snap.radar.unwrap().material_height_m, Some(1.2));
                break;
            }
            assert!(std::time::Instant::now() < deadline, "snapshot never updated");
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}
