use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Green,
    Red,
    Neutral,
}

impl Health {
    pub fn label(&self) -> &'static str {
        match self {
            Health::Green => "on track",
            Health::Red => "needs attention",
            Health::Neutral => "no data",
        }
    }
}

/// Threshold for one metric. Loaded from config, never baked in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub metric: String,
    pub threshold: f64,
    #[serde(default)]
    pub lower_is_better: bool,
}

/// A zero value always reads as "no data" and classifies Neutral, even
/// when the threshold would otherwise mark it unhealthy. Kept intentionally:
/// dashboards treat an empty window as not-yet-reported, not as failing.
pub fn classify(value: f64, benchmark: &Benchmark) -> Health {
    if value == 0.0 {
        return Health::Neutral;
    }

    let healthy = if benchmark.lower_is_better {
        value <= benchmark.threshold
    } else {
        value >= benchmark.threshold
    };

    if healthy {
        Health::Green
    } else {
        Health::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_rate_benchmark() -> Benchmark {
        Benchmark {
            metric: "booking_to_show".to_string(),
            threshold: 0.24,
            lower_is_better: false,
        }
    }

    #[test]
    fn zero_is_neutral_regardless_of_threshold() {
        assert_eq!(classify(0.0, &show_rate_benchmark()), Health::Neutral);

        let negative_threshold = Benchmark {
            metric: "anything".to_string(),
            threshold: -1.0,
            lower_is_better: false,
        };
        assert_eq!(classify(0.0, &negative_threshold), Health::Neutral);
    }

    #[test]
    fn threshold_boundary_is_green() {
        assert_eq!(classify(0.24, &show_rate_benchmark()), Health::Green);
        assert_eq!(classify(0.2399, &show_rate_benchmark()), Health::Red);
    }

    #[test]
    fn lower_is_better_inverts_the_comparison() {
        let cost = Benchmark {
            metric: "cost_per_close".to_string(),
            threshold: 1000.0,
            lower_is_better: true,
        };
        assert_eq!(classify(800.0, &cost), Health::Green);
        assert_eq!(classify(1000.0, &cost), Health::Green);
        assert_eq!(classify(1200.0, &cost), Health::Red);
    }
}
