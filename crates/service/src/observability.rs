use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge_vec, Encoder, IntCounterVec, IntGaugeVec, TextEncoder};

// Prometheus metrics (default registry)
pub static STORE_MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_store_mutations_total",
        "Persisted mutations per record store and operation",
        &["store", "op"]
    )
    .expect("register store_mutations_total")
});

pub static STORE_WRITE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "shop_store_write_errors_total",
        "Failed whole-file rewrites per record store",
        &["store"]
    )
    .expect("register store_write_errors_total")
});

pub static STORE_RECORDS: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "shop_store_records",
        "Records currently held by each store",
        &["store"]
    )
    .expect("register store_records")
});

pub fn record_mutation(store: &str, op: &str) {
    STORE_MUTATIONS_TOTAL.with_label_values(&[store, op]).inc();
}

pub fn record_write_error(store: &str) {
    STORE_WRITE_ERRORS_TOTAL.with_label_values(&[store]).inc();
}

pub fn set_record_count(store: &str, count: usize) {
    STORE_RECORDS
        .with_label_values(&[store])
        .set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (u16, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (500, format!("metrics encode error: {e}"));
    }
    (200, String::from_utf8(buffer).unwrap_or_default())
}
