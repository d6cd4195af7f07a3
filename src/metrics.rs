use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("race_submissions_accepted").absolute(0);
    counter!("race_submissions_rejected").absolute(0);
    counter!("pages_rendered_total").absolute(0);
    counter!("revalidation_failures").absolute(0);

    gauge!("pages_cached").set(0.0);

    handle
}
