use std::path::Path;

use anyhow::Context;

use crate::benchmark::Benchmark;

/// Default benchmark table. This is configuration, not engine behavior:
/// the classifier only ever sees whatever table it is handed.
pub fn default_benchmarks() -> Vec<Benchmark> {
    let higher = |metric: &str, threshold: f64| Benchmark {
        metric: metric.to_string(),
        threshold,
        lower_is_better: false,
    };
    let lower = |metric: &str, threshold: f64| Benchmark {
        metric: metric.to_string(),
        threshold,
        lower_is_better: true,
    };

    vec![
        higher("view_to_app", 0.03),
        higher("qualified_to_booking", 0.5),
        higher("booking_to_show", 0.65),
        higher("show_to_close", 0.25),
        higher("show_rate", 0.7),
        higher("close_rate", 0.25),
        lower("no_show_rate", 0.3),
        higher("response_rate", 0.2),
        higher("convo_rate", 0.4),
        higher("booking_rate", 0.1),
        higher("cash_roas", 3.0),
        lower("cost_per_booking", 250.0),
        lower("cost_per_close", 1500.0),
    ]
}

/// Load a replacement benchmark table from a JSON array.
pub fn load_benchmarks(path: &Path) -> anyhow::Result<Vec<Benchmark>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read benchmark file {}", path.display()))?;
    let benchmarks: Vec<Benchmark> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid benchmark file {}", path.display()))?;
    Ok(benchmarks)
}

pub fn benchmark_for<'a>(benchmarks: &'a [Benchmark], metric: &str) -> Option<&'a Benchmark> {
    benchmarks.iter().find(|b| b.metric == metric)
}
