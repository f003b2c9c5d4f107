use std::collections::BTreeMap;

use crate::models::{AdRow, CloserReport, ContentRow, FunnelRow, SetterReport};

/// A report kind that can be folded into [`Totals`]. Each kind declares
/// its field names once; the reducer and the rate tables are generic over
/// that declaration instead of hardcoding the setter/closer/funnel shapes.
pub trait MetricRow {
    /// Every numeric field this kind carries. The reducer seeds all of
    /// them at zero, so an empty window still produces a full Totals.
    fn fields() -> &'static [&'static str];

    fn metrics(&self) -> Vec<(&'static str, f64)>;

    /// Ad spend is the one field where absent and zero differ: `None`
    /// means the row has no cost dimension at all.
    fn ad_spend(&self) -> Option<f64> {
        None
    }
}

/// Summed metrics for one query window. `ad_spend` stays `None` unless at
/// least one row carried spend, which is what downstream code uses to
/// decide whether cost metrics exist for the window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    values: BTreeMap<&'static str, f64>,
    ad_spend: Option<f64>,
}

impl Totals {
    /// Missing fields read as zero; absent and zero are equivalent
    /// everywhere except `ad_spend`.
    pub fn get(&self, field: &str) -> f64 {
        self.values.get(field).copied().unwrap_or(0.0)
    }

    pub fn ad_spend(&self) -> Option<f64> {
        self.ad_spend
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&'static str, f64)]) -> Totals {
        Totals {
            values: pairs.iter().copied().collect(),
            ad_spend: None,
        }
    }
}

/// Fold a window of same-shaped rows into their sums. Rows arrive already
/// filtered by client, date range, and member; this does no filtering.
pub fn reduce<R: MetricRow>(rows: &[R]) -> Totals {
    let mut values: BTreeMap<&'static str, f64> =
        R::fields().iter().map(|field| (*field, 0.0)).collect();
    let mut ad_spend = None;

    for row in rows {
        for (field, value) in row.metrics() {
            *values.entry(field).or_insert(0.0) += value;
        }
        if let Some(spend) = row.ad_spend() {
            *ad_spend.get_or_insert(0.0) += spend;
        }
    }

    Totals { values, ad_spend }
}

impl MetricRow for FunnelRow {
    fn fields() -> &'static [&'static str] {
        &[
            "page_views",
            "applications",
            "qualified",
            "bookings",
            "shows",
            "no_shows",
            "closes",
            "deals_lost",
            "follow_ups",
            "cash_collected",
            "revenue",
        ]
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        let c = self.counts();
        vec![
            ("page_views", c.page_views as f64),
            ("applications", c.applications as f64),
            ("qualified", c.qualified as f64),
            ("bookings", c.bookings as f64),
            ("shows", c.shows as f64),
            ("no_shows", c.no_shows as f64),
            ("closes", c.closes as f64),
            ("deals_lost", c.deals_lost as f64),
            ("follow_ups", c.follow_ups as f64),
            ("cash_collected", c.cash_collected),
            ("revenue", c.revenue),
        ]
    }

    fn ad_spend(&self) -> Option<f64> {
        match self {
            FunnelRow::Paid { ad_spend, .. } => Some(*ad_spend),
            FunnelRow::Organic { .. } => None,
        }
    }
}

impl MetricRow for SetterReport {
    fn fields() -> &'static [&'static str] {
        &[
            "dials",
            "dms_sent",
            "responses",
            "conversations",
            "bookings",
            "shows",
            "cash_collected",
        ]
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("dials", self.dials as f64),
            ("dms_sent", self.dms_sent as f64),
            ("responses", self.responses as f64),
            ("conversations", self.conversations as f64),
            ("bookings", self.bookings as f64),
            ("shows", self.shows as f64),
            ("cash_collected", self.cash_collected),
        ]
    }
}

impl MetricRow for CloserReport {
    fn fields() -> &'static [&'static str] {
        &[
            "calls_on_calendar",
            "shows",
            "no_shows",
            "deals_closed",
            "deals_lost",
            "follow_ups",
            "cash_collected",
            "revenue_generated",
        ]
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("calls_on_calendar", self.calls_on_calendar as f64),
            ("shows", self.shows as f64),
            ("no_shows", self.no_shows as f64),
            ("deals_closed", self.deals_closed as f64),
            ("deals_lost", self.deals_lost as f64),
            ("follow_ups", self.follow_ups as f64),
            ("cash_collected", self.cash_collected),
            ("revenue_generated", self.revenue_generated),
        ]
    }
}

impl MetricRow for AdRow {
    fn fields() -> &'static [&'static str] {
        &["spend", "impressions", "clicks", "leads"]
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("spend", self.spend),
            ("impressions", self.impressions as f64),
            ("clicks", self.clicks as f64),
            ("leads", self.leads as f64),
        ]
    }
}

impl MetricRow for ContentRow {
    fn fields() -> &'static [&'static str] {
        &["views", "clicks", "applications", "bookings"]
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("views", self.views as f64),
            ("clicks", self.clicks as f64),
            ("applications", self.applications as f64),
            ("bookings", self.bookings as f64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FunnelCounts;
    use chrono::NaiveDate;

    fn funnel_day(day: u32, closes: i64, cash: f64, ad_spend: Option<f64>) -> FunnelRow {
        let counts = FunnelCounts {
            report_date: NaiveDate::from_ymd_opt(2026, 7, day).unwrap(),
            page_views: 0,
            applications: 0,
            qualified: 0,
            bookings: 0,
            shows: 0,
            no_shows: 0,
            closes,
            deals_lost: 0,
            follow_ups: 0,
            cash_collected: cash,
            revenue: 0.0,
        };
        FunnelRow::from_parts(counts, ad_spend)
    }

    #[test]
    fn sums_are_order_independent() {
        let a = funnel_day(1, 2, 1000.0, None);
        let b = funnel_day(2, 3, 1500.0, None);

        let forward = reduce(&[a.clone(), b.clone()]);
        let backward = reduce(&[b, a]);

        assert_eq!(forward, backward);
        assert_eq!(forward.get("closes"), 5.0);
        assert_eq!(forward.get("cash_collected"), 2500.0);
    }

    #[test]
    fn empty_window_is_all_zeroes() {
        let totals = reduce::<FunnelRow>(&[]);
        for field in FunnelRow::fields() {
            assert_eq!(totals.get(field), 0.0, "{field} should start at zero");
        }
        assert_eq!(totals.ad_spend(), None);
    }

    #[test]
    fn ad_spend_absent_everywhere_stays_absent() {
        let rows = vec![funnel_day(1, 1, 100.0, None), funnel_day(2, 1, 100.0, None)];
        assert_eq!(reduce(&rows).ad_spend(), None);
    }

    #[test]
    fn ad_spend_sums_over_present_rows() {
        let rows = vec![
            funnel_day(1, 1, 100.0, Some(400.0)),
            funnel_day(2, 1, 100.0, None),
            funnel_day(3, 1, 100.0, Some(350.0)),
        ];
        assert_eq!(reduce(&rows).ad_spend(), Some(750.0));
    }

    #[test]
    fn setter_rows_reduce_through_the_same_engine() {
        let day = |dms, responses| crate::models::SetterReport {
            report_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            dials: 0,
            dms_sent: dms,
            responses,
            conversations: 0,
            bookings: 0,
            shows: 0,
            cash_collected: 0.0,
        };
        let totals = reduce(&[day(50, 10), day(70, 14)]);
        assert_eq!(totals.get("dms_sent"), 120.0);
        assert_eq!(totals.get("responses"), 24.0);
        assert_eq!(totals.ad_spend(), None);
    }
}
