//! Metrics collection.
//!
//! # Metrics
//! - `numdb_loads_total` (counter): database loads by result (`ok`, `error`)
//! - `numdb_load_duration_seconds` (histogram): time to read and freeze a database
//! - `numdb_cache_hits_total` (counter): registry lookups served from cache
//! - `numdb_cached_databases` (gauge): databases held by the registry
//! - `numdb_lookups_total` (counter): `info`/`split` calls

use std::time::Duration;

use metrics::{counter, gauge, histogram};

pub fn record_load(result: &'static str) {
    counter!("numdb_loads_total", "result" => result).increment(1);
}

pub fn record_load_duration(elapsed: Duration) {
    histogram!("numdb_load_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_cache_hit() {
    counter!("numdb_cache_hits_total").increment(1);
}

pub fn record_cached_databases(count: usize) {
    gauge!("numdb_cached_databases").set(count as f64);
}

pub fn record_lookup() {
    counter!("numdb_lookups_total").increment(1);
}
