use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Setter,
    Closer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Setter => "setter",
            Role::Closer => "closer",
        }
    }

    pub fn parse(value: &str) -> anyhow::Result<Role> {
        match value {
            "setter" => Ok(Role::Setter),
            "closer" => Ok(Role::Closer),
            other => anyhow::bail!("unknown role '{other}'"),
        }
    }
}

/// Daily funnel counters shared by the paid and organic variants.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelCounts {
    pub report_date: NaiveDate,
    pub page_views: i64,
    pub applications: i64,
    pub qualified: i64,
    pub bookings: i64,
    pub shows: i64,
    pub no_shows: i64,
    pub closes: i64,
    pub deals_lost: i64,
    pub follow_ups: i64,
    pub cash_collected: f64,
    pub revenue: f64,
}

/// One day of funnel traffic. Paid rows carry ad spend; organic rows have
/// no cost dimension at all, so cost metrics are suppressed downstream
/// rather than computed against a zero.
#[derive(Debug, Clone, PartialEq)]
pub enum FunnelRow {
    Paid { counts: FunnelCounts, ad_spend: f64 },
    Organic { counts: FunnelCounts },
}

impl FunnelRow {
    pub fn from_parts(counts: FunnelCounts, ad_spend: Option<f64>) -> FunnelRow {
        match ad_spend {
            Some(spend) => FunnelRow::Paid {
                counts,
                ad_spend: spend,
            },
            None => FunnelRow::Organic { counts },
        }
    }

    pub fn counts(&self) -> &FunnelCounts {
        match self {
            FunnelRow::Paid { counts, .. } | FunnelRow::Organic { counts } => counts,
        }
    }

    pub fn ad_spend(&self) -> Option<f64> {
        match self {
            FunnelRow::Paid { ad_spend, .. } => Some(*ad_spend),
            FunnelRow::Organic { .. } => None,
        }
    }

    pub fn funnel_type(&self) -> &'static str {
        match self {
            FunnelRow::Paid { .. } => "paid",
            FunnelRow::Organic { .. } => "organic",
        }
    }
}

/// Daily outbound activity submitted by a setter.
#[derive(Debug, Clone, PartialEq)]
pub struct SetterReport {
    pub report_date: NaiveDate,
    pub dials: i64,
    pub dms_sent: i64,
    pub responses: i64,
    pub conversations: i64,
    pub bookings: i64,
    pub shows: i64,
    pub cash_collected: f64,
}

/// Daily call outcomes submitted by a closer.
#[derive(Debug, Clone, PartialEq)]
pub struct CloserReport {
    pub report_date: NaiveDate,
    pub calls_on_calendar: i64,
    pub shows: i64,
    pub no_shows: i64,
    pub deals_closed: i64,
    pub deals_lost: i64,
    pub follow_ups: i64,
    pub cash_collected: f64,
    pub revenue_generated: f64,
}

/// Daily performance for one ad creative.
#[derive(Debug, Clone, PartialEq)]
pub struct AdRow {
    pub report_date: NaiveDate,
    pub campaign_name: String,
    pub adset_name: String,
    pub ad_name: String,
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub leads: i64,
}

/// Daily performance for one piece of organic content.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRow {
    pub report_date: NaiveDate,
    pub source: String,
    pub medium: String,
    pub content_name: String,
    pub views: i64,
    pub clicks: i64,
    pub applications: i64,
    pub bookings: i64,
}

/// One activity row as stored, with the member it belongs to. Setter and
/// closer rows share the table; counters the role does not use stay zero.
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    pub member_id: Uuid,
    pub member_name: String,
    pub member_email: String,
    pub role: Role,
    pub report_date: NaiveDate,
    pub dials: i64,
    pub dms_sent: i64,
    pub responses: i64,
    pub conversations: i64,
    pub calls_on_calendar: i64,
    pub bookings: i64,
    pub shows: i64,
    pub no_shows: i64,
    pub deals_closed: i64,
    pub deals_lost: i64,
    pub follow_ups: i64,
    pub cash_collected: f64,
    pub revenue_generated: f64,
}

impl ActivityRecord {
    pub fn as_setter(&self) -> SetterReport {
        SetterReport {
            report_date: self.report_date,
            dials: self.dials,
            dms_sent: self.dms_sent,
            responses: self.responses,
            conversations: self.conversations,
            bookings: self.bookings,
            shows: self.shows,
            cash_collected: self.cash_collected,
        }
    }

    pub fn as_closer(&self) -> CloserReport {
        CloserReport {
            report_date: self.report_date,
            calls_on_calendar: self.calls_on_calendar,
            shows: self.shows,
            no_shows: self.no_shows,
            deals_closed: self.deals_closed,
            deals_lost: self.deals_lost,
            follow_ups: self.follow_ups,
            cash_collected: self.cash_collected,
            revenue_generated: self.revenue_generated,
        }
    }
}

/// Stored goal with the target assumptions a member has configured.
/// Targets are optional at rest; the pacing layer validates the subset it
/// needs for the member's role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAssumptions {
    pub goal_amount: f64,
    pub target_aov: Option<f64>,
    pub target_show_rate: Option<f64>,
    pub target_close_rate: Option<f64>,
    pub target_cash_per_booking: Option<f64>,
    pub target_booking_rate: Option<f64>,
    pub target_convo_rate: Option<f64>,
    pub target_response_rate: Option<f64>,
}

/// Per-member rollup for the leaderboard section of the report.
#[derive(Debug, Clone)]
pub struct MemberSummary {
    pub member_name: String,
    pub member_email: String,
    pub role: Role,
    pub cash_collected: f64,
    pub deals_closed: i64,
    pub bookings: i64,
    pub report_count: usize,
}

/// One metric compared across two equal-length windows. `percent_change`
/// is `None` when both sides are zero, which tells the renderer to skip
/// the change indicator entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub metric: &'static str,
    pub current: f64,
    pub previous: f64,
    pub percent_change: Option<f64>,
}
