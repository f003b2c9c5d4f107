use std::collections::BTreeMap;

use crate::totals::Totals;

pub type Rates = BTreeMap<&'static str, f64>;

/// One derived rate: numerator field over denominator field.
pub struct RateSpec {
    pub name: &'static str,
    pub numerator: &'static str,
    pub denominator: &'static str,
}

pub const FUNNEL_RATES: &[RateSpec] = &[
    RateSpec {
        name: "view_to_app",
        numerator: "applications",
        denominator: "page_views",
    },
    RateSpec {
        name: "app_to_qualified",
        numerator: "qualified",
        denominator: "applications",
    },
    RateSpec {
        name: "qualified_to_booking",
        numerator: "bookings",
        denominator: "qualified",
    },
    RateSpec {
        name: "booking_to_show",
        numerator: "shows",
        denominator: "bookings",
    },
    RateSpec {
        name: "show_to_close",
        numerator: "closes",
        denominator: "shows",
    },
    RateSpec {
        name: "aov",
        numerator: "cash_collected",
        denominator: "closes",
    },
];

pub const CLOSER_RATES: &[RateSpec] = &[
    RateSpec {
        name: "show_rate",
        numerator: "shows",
        denominator: "calls_on_calendar",
    },
    RateSpec {
        name: "close_rate",
        numerator: "deals_closed",
        denominator: "shows",
    },
    RateSpec {
        name: "no_show_rate",
        numerator: "no_shows",
        denominator: "calls_on_calendar",
    },
    RateSpec {
        name: "aov",
        numerator: "cash_collected",
        denominator: "deals_closed",
    },
];

pub const SETTER_RATES: &[RateSpec] = &[
    RateSpec {
        name: "response_rate",
        numerator: "responses",
        denominator: "dms_sent",
    },
    RateSpec {
        name: "convo_rate",
        numerator: "conversations",
        denominator: "responses",
    },
    RateSpec {
        name: "booking_rate",
        numerator: "bookings",
        denominator: "conversations",
    },
];

pub const AD_RATES: &[RateSpec] = &[
    RateSpec {
        name: "click_through",
        numerator: "clicks",
        denominator: "impressions",
    },
    RateSpec {
        name: "cost_per_click",
        numerator: "spend",
        denominator: "clicks",
    },
    RateSpec {
        name: "cost_per_lead",
        numerator: "spend",
        denominator: "leads",
    },
];

pub const CONTENT_RATES: &[RateSpec] = &[
    RateSpec {
        name: "view_to_app",
        numerator: "applications",
        denominator: "views",
    },
    RateSpec {
        name: "app_to_booking",
        numerator: "bookings",
        denominator: "applications",
    },
];

/// Cost-per-stage rates, only meaningful when the window carried ad spend.
const COST_STAGES: &[(&str, &str)] = &[
    ("cost_per_view", "page_views"),
    ("cost_per_app", "applications"),
    ("cost_per_qualified", "qualified"),
    ("cost_per_booking", "bookings"),
    ("cost_per_show", "shows"),
    ("cost_per_close", "closes"),
];

/// Zero denominator reads as "no data yet" and yields exactly 0, never an
/// error and never NaN or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn derive_rates(totals: &Totals, specs: &[RateSpec]) -> Rates {
    specs
        .iter()
        .map(|spec| {
            (
                spec.name,
                ratio(totals.get(spec.numerator), totals.get(spec.denominator)),
            )
        })
        .collect()
}

/// Funnel rates plus the variant-specific set: ROAS and cost-per-stage for
/// paid windows, overall conversion for organic ones.
pub fn funnel_rates(totals: &Totals) -> Rates {
    let mut rates = derive_rates(totals, FUNNEL_RATES);

    match totals.ad_spend() {
        Some(spend) => {
            rates.insert("cash_roas", ratio(totals.get("cash_collected"), spend));
            rates.insert("revenue_roas", ratio(totals.get("revenue"), spend));
            for &(name, stage) in COST_STAGES {
                rates.insert(name, ratio(spend, totals.get(stage)));
            }
        }
        None => {
            rates.insert(
                "overall_conversion",
                ratio(totals.get("closes"), totals.get("page_views")),
            );
        }
    }

    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FunnelCounts, FunnelRow};
    use crate::totals::reduce;
    use chrono::NaiveDate;

    fn paid_day(
        day: u32,
        applications: i64,
        bookings: i64,
        shows: i64,
        closes: i64,
        cash: f64,
        spend: f64,
    ) -> FunnelRow {
        FunnelRow::Paid {
            counts: FunnelCounts {
                report_date: NaiveDate::from_ymd_opt(2026, 7, day).unwrap(),
                page_views: 1000,
                applications,
                qualified: 0,
                bookings,
                shows,
                no_shows: 0,
                closes,
                deals_lost: 0,
                follow_ups: 0,
                cash_collected: cash,
                revenue: 0.0,
            },
            ad_spend: spend,
        }
    }

    #[test]
    fn zero_denominator_yields_zero() {
        let totals = Totals::from_pairs(&[("bookings", 0.0), ("shows", 5.0)]);
        let rates = derive_rates(&totals, FUNNEL_RATES);
        assert_eq!(rates["booking_to_show"], 0.0);
    }

    #[test]
    fn derivation_is_idempotent() {
        let totals = Totals::from_pairs(&[("bookings", 20.0), ("shows", 14.0)]);
        assert_eq!(
            derive_rates(&totals, FUNNEL_RATES),
            derive_rates(&totals, FUNNEL_RATES)
        );
    }

    #[test]
    fn organic_windows_get_overall_conversion_and_no_cost_metrics() {
        let totals = Totals::from_pairs(&[("page_views", 1000.0), ("closes", 5.0)]);
        let rates = funnel_rates(&totals);
        assert_eq!(rates["overall_conversion"], 0.005);
        assert!(!rates.contains_key("cash_roas"));
        assert!(!rates.contains_key("cost_per_close"));
    }

    #[test]
    fn closer_rates_follow_the_declared_pairs() {
        let totals = Totals::from_pairs(&[
            ("calls_on_calendar", 40.0),
            ("shows", 28.0),
            ("no_shows", 8.0),
            ("deals_closed", 7.0),
            ("cash_collected", 21000.0),
        ]);
        let rates = derive_rates(&totals, CLOSER_RATES);
        assert_eq!(rates["show_rate"], 0.7);
        assert_eq!(rates["close_rate"], 0.25);
        assert_eq!(rates["no_show_rate"], 0.2);
        assert_eq!(rates["aov"], 3000.0);
    }

    // Three paid days, checked end to end through reduce and funnel_rates.
    #[test]
    fn three_day_paid_window_end_to_end() {
        let rows = vec![
            paid_day(1, 40, 20, 14, 5, 20000.0, 4000.0),
            paid_day(2, 45, 22, 15, 6, 22000.0, 4200.0),
            paid_day(3, 38, 18, 13, 4, 18000.0, 3800.0),
        ];
        let totals = reduce(&rows);

        assert_eq!(totals.get("page_views"), 3000.0);
        assert_eq!(totals.get("applications"), 123.0);
        assert_eq!(totals.get("bookings"), 60.0);
        assert_eq!(totals.get("shows"), 42.0);
        assert_eq!(totals.get("closes"), 15.0);
        assert_eq!(totals.get("cash_collected"), 60000.0);
        assert_eq!(totals.ad_spend(), Some(12000.0));

        let rates = funnel_rates(&totals);
        assert_eq!(rates["cash_roas"], 5.0);
        assert_eq!(rates["cost_per_close"], 800.0);
        assert_eq!(rates["booking_to_show"], 0.7);
        assert!(!rates.contains_key("overall_conversion"));
    }
}
