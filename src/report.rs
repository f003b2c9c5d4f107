use std::fmt::Write;

use chrono::NaiveDate;

use crate::benchmark::{classify, Benchmark};
use crate::config;
use crate::models::{ActivityRecord, MemberSummary, PeriodComparison};
use crate::rates::{self, Rates};
use crate::totals::Totals;

/// Everything the markdown report needs, already reduced upstream.
pub struct ReportInputs {
    pub funnel: Totals,
    pub comparisons: Vec<PeriodComparison>,
    pub setters: Totals,
    pub closers: Totals,
    pub ads: Totals,
    pub content: Totals,
    pub activity: Vec<ActivityRecord>,
}

pub fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Conversion rates render as percentages; money-denominated ones (AOV,
/// ROAS, cost-per-stage) render as plain amounts.
pub fn fmt_rate(name: &str, value: f64) -> String {
    if name.starts_with("cost_per") || name.ends_with("_roas") || name == "aov" {
        format!("{value:.2}")
    } else {
        format!("{:.1}%", value * 100.0)
    }
}

pub fn summarize_members(activity: &[ActivityRecord]) -> Vec<MemberSummary> {
    let mut map: std::collections::HashMap<uuid::Uuid, MemberSummary> =
        std::collections::HashMap::new();

    for record in activity {
        let entry = map
            .entry(record.member_id)
            .or_insert_with(|| MemberSummary {
                member_name: record.member_name.clone(),
                member_email: record.member_email.clone(),
                role: record.role,
                cash_collected: 0.0,
                deals_closed: 0,
                bookings: 0,
                report_count: 0,
            });
        entry.cash_collected += record.cash_collected;
        entry.deals_closed += record.deals_closed;
        entry.bookings += record.bookings;
        entry.report_count += 1;
    }

    let mut summaries: Vec<MemberSummary> = map.into_values().collect();
    summaries.sort_by(|a, b| {
        b.cash_collected
            .partial_cmp(&a.cash_collected)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}

fn write_rates(output: &mut String, rates: &Rates, benchmarks: &[Benchmark]) {
    for (&name, &value) in rates {
        match config::benchmark_for(benchmarks, name) {
            Some(benchmark) => {
                let health = classify(value, benchmark);
                let _ = writeln!(
                    output,
                    "- {}: {} ({})",
                    name,
                    fmt_rate(name, value),
                    health.label()
                );
            }
            None => {
                let _ = writeln!(output, "- {}: {}", name, fmt_rate(name, value));
            }
        }
    }
}

fn write_totals(output: &mut String, totals: &Totals) {
    for (field, value) in totals.iter() {
        let _ = writeln!(output, "- {}: {}", field, fmt_value(value));
    }
}

pub fn build_report(
    client_name: &str,
    since_days: i64,
    cutoff: NaiveDate,
    inputs: &ReportInputs,
    benchmarks: &[Benchmark],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Sales Ops Report");
    let _ = writeln!(
        output,
        "Generated for {} (last {} days, reports since {})",
        client_name, since_days, cutoff
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Funnel");
    let funnel = &inputs.funnel;
    let had_traffic = funnel.get("page_views") > 0.0 || funnel.get("bookings") > 0.0;
    if !had_traffic {
        let _ = writeln!(output, "No funnel reports for this window.");
    } else {
        write_totals(&mut output, funnel);
        // Derived at render time; clamped here, unlike the submission path.
        let deals_lost =
            (funnel.get("shows") - funnel.get("closes") - funnel.get("follow_ups")).max(0.0);
        let _ = writeln!(output, "- deals_lost (derived): {}", fmt_value(deals_lost));
        if let Some(spend) = funnel.ad_spend() {
            let _ = writeln!(output, "- ad_spend: {}", fmt_value(spend));
        }

        let _ = writeln!(output);
        let _ = writeln!(output, "## Conversion Health");
        write_rates(&mut output, &rates::funnel_rates(funnel), benchmarks);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Period Comparison");
    if inputs.comparisons.is_empty() {
        let _ = writeln!(output, "No prior window to compare against.");
    } else {
        for comparison in &inputs.comparisons {
            match comparison.percent_change {
                Some(change) => {
                    let _ = writeln!(
                        output,
                        "- {}: {} vs {} ({:+.1}%)",
                        comparison.metric,
                        fmt_value(comparison.current),
                        fmt_value(comparison.previous),
                        change
                    );
                }
                None => {
                    let _ = writeln!(
                        output,
                        "- {}: {} vs {}",
                        comparison.metric,
                        fmt_value(comparison.current),
                        fmt_value(comparison.previous)
                    );
                }
            }
        }
    }

    if inputs.ads.get("impressions") > 0.0 || inputs.ads.get("spend") > 0.0 {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Paid Media");
        write_totals(&mut output, &inputs.ads);
        write_rates(
            &mut output,
            &rates::derive_rates(&inputs.ads, rates::AD_RATES),
            benchmarks,
        );
    }

    if inputs.content.get("views") > 0.0 {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Content");
        write_totals(&mut output, &inputs.content);
        write_rates(
            &mut output,
            &rates::derive_rates(&inputs.content, rates::CONTENT_RATES),
            benchmarks,
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Team Activity");
    let _ = writeln!(output);
    let _ = writeln!(output, "### Setters");
    write_totals(&mut output, &inputs.setters);
    write_rates(
        &mut output,
        &rates::derive_rates(&inputs.setters, rates::SETTER_RATES),
        benchmarks,
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "### Closers");
    write_totals(&mut output, &inputs.closers);
    write_rates(
        &mut output,
        &rates::derive_rates(&inputs.closers, rates::CLOSER_RATES),
        benchmarks,
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Leaderboard");
    let summaries = summarize_members(&inputs.activity);
    if summaries.is_empty() {
        let _ = writeln!(output, "No activity reports for this window.");
    } else {
        for summary in summaries.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}, {}) collected {} across {} reports, {} deals, {} bookings",
                summary.member_name,
                summary.member_email,
                summary.role.as_str(),
                fmt_value(summary.cash_collected),
                summary.report_count,
                summary.deals_closed,
                summary.bookings
            );
        }
    }

    output
}
