//! Minimal metrics registry for the gateway.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Histogram buckets are fixed in microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn series(name: &str, labels: &str) -> String {
    if labels.is_empty() {
        name.to_string()
    } else {
        format!("{name}{{{labels}}}")
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(name, &label_str(r.key())), val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    /// Add an arbitrary signed delta.
    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self.map.entry(label_key(labels)).or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(name, &label_str(r.key())), val);
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s
const BUCKETS_MICROS: [u64; 9] = [100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(&format!("{name}_sum"), &labels), sum);
            let _ = writeln!(out, "{} {}", series(&format!("{name}_count"), &labels), count);
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub streams_opened: CounterVec,
    pub streams_active: GaugeVec,
    /// `outcome` = "clean" | "partial"
    pub broadcasts: CounterVec,
    pub delivery_failures: CounterVec,
    pub broadcast_duration: HistogramVec, // In Microseconds
}

impl GatewayMetrics {
    /// Render all registered metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.streams_opened.render("chatcast_streams_opened_total", &mut out);
        self.streams_active.render("chatcast_streams_active", &mut out);
        self.broadcasts.render("chatcast_broadcasts_total", &mut out);
        self.delivery_failures.render("chatcast_delivery_failures_total", &mut out);
        self.broadcast_duration.render("chatcast_broadcast_duration_micros", &mut out);
        for (k, v) in extra { let _ = writeln!(out, "{} {}", k, v); }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_labels_and_buckets() {
        let m = GatewayMetrics::default();
        m.broadcasts.inc(&[("outcome", "partial")]);
        m.streams_active.inc(&[]);
        m.streams_active.inc(&[]);
        m.streams_active.dec(&[]);
        m.broadcast_duration.observe(&[], Duration::from_micros(700));

        let out = m.render(&[("chatcast_registry_size", 3)]);
        assert!(out.contains("chatcast_broadcasts_total{outcome=\"partial\"} 1"));
        assert!(out.contains("chatcast_streams_active 1"));
        assert!(out.contains("chatcast_broadcast_duration_micros_bucket{le=\"500\"} 0"));
        assert!(out.contains("chatcast_broadcast_duration_micros_bucket{le=\"1000\"} 1"));
        assert!(out.contains("chatcast_broadcast_duration_micros_count 1"));
        assert!(out.contains("chatcast_registry_size 3"));
    }
}
