use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

mod benchmark;
mod compare;
mod config;
mod db;
mod models;
mod notify;
mod pacing;
mod rates;
mod report;
mod totals;

use models::Role;

#[derive(Parser)]
#[command(name = "revops-pulse")]
#[command(about = "Sales operations funnel tracker and reporting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImportKind {
    Funnel,
    Setter,
    Closer,
    Ads,
    Content,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import report rows from a CSV file
    Import {
        #[arg(long)]
        client: String,
        #[arg(long, value_enum)]
        kind: ImportKind,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Record one end-of-day activity report
    Submit {
        #[arg(long)]
        member: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value_t = 0)]
        dials: i64,
        #[arg(long, default_value_t = 0)]
        dms_sent: i64,
        #[arg(long, default_value_t = 0)]
        responses: i64,
        #[arg(long, default_value_t = 0)]
        conversations: i64,
        #[arg(long, default_value_t = 0)]
        calls_on_calendar: i64,
        #[arg(long, default_value_t = 0)]
        bookings: i64,
        #[arg(long, default_value_t = 0)]
        shows: i64,
        #[arg(long, default_value_t = 0)]
        no_shows: i64,
        #[arg(long, default_value_t = 0)]
        deals_closed: i64,
        #[arg(long, default_value_t = 0)]
        follow_ups: i64,
        #[arg(long, default_value_t = 0.0)]
        cash_collected: f64,
        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
    },
    /// Reduce a window to totals and derived rates
    #[command(group(
        ArgGroup::new("scope")
            .args(["member", "role"])
            .multiple(false)
    ))]
    Metrics {
        #[arg(long)]
        client: String,
        #[arg(long)]
        member: Option<String>,
        #[arg(long, value_enum)]
        role: Option<Role>,
        #[arg(long, default_value_t = 30)]
        since_days: i64,
        #[arg(long)]
        benchmarks: Option<PathBuf>,
    },
    /// Compare the current window against the previous one
    Compare {
        #[arg(long)]
        client: String,
        #[arg(long, default_value_t = 30)]
        since_days: i64,
    },
    /// Pace a member's stored goal over the current month
    Pace {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "monthly_cash")]
        goal_type: String,
    },
    /// Manage stored goals and target assumptions
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        client: String,
        #[arg(long, default_value_t = 30)]
        since_days: i64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long)]
        benchmarks: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    /// Create or update a goal
    Set {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "monthly_cash")]
        goal_type: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        target_aov: Option<f64>,
        #[arg(long)]
        target_show_rate: Option<f64>,
        #[arg(long)]
        target_close_rate: Option<f64>,
        #[arg(long)]
        target_cash_per_booking: Option<f64>,
        #[arg(long)]
        target_booking_rate: Option<f64>,
        #[arg(long)]
        target_convo_rate: Option<f64>,
        #[arg(long)]
        target_response_rate: Option<f64>,
    },
    /// Show a stored goal
    Show {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "monthly_cash")]
        goal_type: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { client, kind, csv } => {
            let client_id = db::ensure_client(&pool, &client).await?;
            let imported = match kind {
                ImportKind::Funnel => db::import_funnel_csv(&pool, client_id, &csv).await?,
                ImportKind::Setter => db::import_activity_csv(&pool, Role::Setter, &csv).await?,
                ImportKind::Closer => db::import_activity_csv(&pool, Role::Closer, &csv).await?,
                ImportKind::Ads => db::import_ads_csv(&pool, client_id, &csv).await?,
                ImportKind::Content => db::import_content_csv(&pool, client_id, &csv).await?,
            };
            println!("Imported {imported} rows from {}.", csv.display());
        }
        Commands::Submit {
            member,
            date,
            dials,
            dms_sent,
            responses,
            conversations,
            calls_on_calendar,
            bookings,
            shows,
            no_shows,
            deals_closed,
            follow_ups,
            cash_collected,
            revenue,
        } => {
            let member = db::member_by_email(&pool, &member).await?;
            let report_date = date.unwrap_or_else(|| Utc::now().date_naive());
            let input = db::EodInput {
                dials,
                dms_sent,
                responses,
                conversations,
                calls_on_calendar,
                bookings,
                shows,
                no_shows,
                deals_closed,
                follow_ups,
                cash_collected,
                revenue_generated: revenue,
            };
            db::submit_activity(&pool, &member, member.role, report_date, &input).await?;

            let (key_metric_label, key_metric_value) = match member.role {
                Role::Setter => ("Conversations", conversations as f64),
                Role::Closer => ("Deals closed", deals_closed as f64),
            };
            notify::send_eod(&notify::EodNotification {
                role: member.role.as_str(),
                member_name: &member.full_name,
                report_date,
                cash_collected,
                key_metric_label,
                key_metric_value,
            })
            .await;

            println!(
                "Recorded {} report for {} on {report_date}.",
                member.role.as_str(),
                member.full_name
            );
        }
        Commands::Metrics {
            client,
            member,
            role,
            since_days,
            benchmarks,
        } => {
            let benchmarks = load_benchmarks(benchmarks.as_deref())?;
            let client_id = db::client_id(&pool, &client).await?;
            let today = Utc::now().date_naive();
            let (from, to) = (today - Duration::days(since_days.max(1)), today + Duration::days(1));

            if member.is_some() || role.is_some() {
                let records = db::fetch_activity_window(
                    &pool,
                    client_id,
                    from,
                    to,
                    role,
                    member.as_deref(),
                )
                .await?;
                if records.is_empty() {
                    println!("No activity reports for this window.");
                    return Ok(());
                }

                let scope_role = match role {
                    Some(role) => role,
                    None => records[0].role,
                };
                let (totals, rate_specs) = match scope_role {
                    Role::Setter => {
                        let rows: Vec<_> = records.iter().map(|r| r.as_setter()).collect();
                        (totals::reduce(&rows), rates::SETTER_RATES)
                    }
                    Role::Closer => {
                        let rows: Vec<_> = records.iter().map(|r| r.as_closer()).collect();
                        (totals::reduce(&rows), rates::CLOSER_RATES)
                    }
                };

                println!("{} totals since {from}:", scope_role.as_str());
                print_totals(&totals);
                println!("Rates:");
                print_rates(&rates::derive_rates(&totals, rate_specs), &benchmarks);
            } else {
                let rows = db::fetch_funnel_window(&pool, client_id, from, to).await?;
                if rows.is_empty() {
                    println!("No funnel reports for this window.");
                    return Ok(());
                }

                let totals = totals::reduce(&rows);
                println!("Funnel totals since {from}:");
                print_totals(&totals);
                if let Some(spend) = totals.ad_spend() {
                    println!("- ad_spend: {}", report::fmt_value(spend));
                }
                println!("Rates:");
                print_rates(&rates::funnel_rates(&totals), &benchmarks);
            }
        }
        Commands::Compare { client, since_days } => {
            let client_id = db::client_id(&pool, &client).await?;
            let today = Utc::now().date_naive();
            let ((cur_from, cur_to), (prev_from, prev_to)) =
                compare::compare_windows(today, since_days);

            let current =
                totals::reduce(&db::fetch_funnel_window(&pool, client_id, cur_from, cur_to).await?);
            let previous = totals::reduce(
                &db::fetch_funnel_window(&pool, client_id, prev_from, prev_to).await?,
            );

            println!("Current window {cur_from}..{cur_to} vs previous {prev_from}..{prev_to}:");
            for comparison in compare::compare_totals(&current, &previous) {
                match comparison.percent_change {
                    Some(change) => println!(
                        "- {}: {} vs {} ({change:+.1}%)",
                        comparison.metric,
                        report::fmt_value(comparison.current),
                        report::fmt_value(comparison.previous)
                    ),
                    None => println!(
                        "- {}: {} vs {}",
                        comparison.metric,
                        report::fmt_value(comparison.current),
                        report::fmt_value(comparison.previous)
                    ),
                }
            }
        }
        Commands::Pace { user, goal_type } => {
            let member = db::member_by_email(&pool, &user).await?;
            let goal = db::goal_get(&pool, member.id, &goal_type)
                .await?
                .with_context(|| format!("no '{goal_type}' goal stored for {user}"))?;

            let today = Utc::now().date_naive();
            let (month_start, days_in_period, days_elapsed) = month_progress(today)?;
            let records = db::fetch_activity_window(
                &pool,
                member.client_id,
                month_start,
                today + Duration::days(1),
                None,
                Some(&member.email),
            )
            .await?;
            let current: f64 = records.iter().map(|r| r.cash_collected).sum();

            let result = pacing::pace(current, goal.goal_amount, days_in_period, days_elapsed);
            println!(
                "{} — {} goal {}",
                member.full_name,
                goal_type,
                report::fmt_value(goal.goal_amount)
            );
            println!(
                "Collected {} ({:.1}% of goal), expected {} by day {days_elapsed} — {} by {:.1}%",
                report::fmt_value(current),
                result.progress_percent,
                report::fmt_value(result.expected_at_this_point),
                result.status.as_str(),
                result.pace_diff_percent
            );
            println!(
                "{} days remaining, {} per day needed",
                result.days_remaining,
                report::fmt_value(result.daily_amount_needed)
            );

            match member.role {
                Role::Closer => {
                    let targets = pacing::CloserTargets::from_goal(&goal)?;
                    let plan = pacing::closer_plan(result.remaining, &targets);
                    println!(
                        "To close the gap: {} deals, {} shows, {} calls booked",
                        plan.deals_needed, plan.shows_needed, plan.bookings_needed
                    );
                }
                Role::Setter => {
                    let targets = pacing::SetterTargets::from_goal(&goal)?;
                    let plan = pacing::setter_plan(result.remaining, &targets);
                    println!(
                        "To close the gap: {} bookings, {} conversations, {} responses, {} DMs",
                        plan.bookings_needed,
                        plan.conversations_needed,
                        plan.responses_needed,
                        plan.dms_needed
                    );
                }
            }
        }
        Commands::Goal { action } => match action {
            GoalAction::Set {
                user,
                goal_type,
                amount,
                target_aov,
                target_show_rate,
                target_close_rate,
                target_cash_per_booking,
                target_booking_rate,
                target_convo_rate,
                target_response_rate,
            } => {
                let member = db::member_by_email(&pool, &user).await?;
                let goal = models::GoalAssumptions {
                    goal_amount: amount,
                    target_aov,
                    target_show_rate,
                    target_close_rate,
                    target_cash_per_booking,
                    target_booking_rate,
                    target_convo_rate,
                    target_response_rate,
                };
                db::goal_upsert(&pool, member.id, &goal_type, &goal).await?;
                println!("Goal '{goal_type}' saved for {}.", member.full_name);
            }
            GoalAction::Show { user, goal_type } => {
                let member = db::member_by_email(&pool, &user).await?;
                match db::goal_get(&pool, member.id, &goal_type).await? {
                    Some(goal) => println!("{}", serde_json::to_string_pretty(&goal)?),
                    None => println!("No '{goal_type}' goal stored for {user}."),
                }
            }
        },
        Commands::Report {
            client,
            since_days,
            out,
            benchmarks,
        } => {
            let benchmark_table = load_benchmarks(benchmarks.as_deref())?;
            let client_id = db::client_id(&pool, &client).await?;
            let today = Utc::now().date_naive();
            let ((cur_from, cur_to), (prev_from, prev_to)) =
                compare::compare_windows(today, since_days);

            let funnel_rows = db::fetch_funnel_window(&pool, client_id, cur_from, cur_to).await?;
            let previous_rows =
                db::fetch_funnel_window(&pool, client_id, prev_from, prev_to).await?;
            let activity =
                db::fetch_activity_window(&pool, client_id, cur_from, cur_to, None, None).await?;
            let ad_rows = db::fetch_ad_window(&pool, client_id, cur_from, cur_to).await?;
            let content_rows = db::fetch_content_window(&pool, client_id, cur_from, cur_to).await?;

            let funnel = totals::reduce(&funnel_rows);
            let previous = totals::reduce(&previous_rows);
            let setter_rows: Vec<_> = activity
                .iter()
                .filter(|r| r.role == Role::Setter)
                .map(|r| r.as_setter())
                .collect();
            let closer_rows: Vec<_> = activity
                .iter()
                .filter(|r| r.role == Role::Closer)
                .map(|r| r.as_closer())
                .collect();

            let inputs = report::ReportInputs {
                comparisons: compare::compare_totals(&funnel, &previous),
                funnel,
                setters: totals::reduce(&setter_rows),
                closers: totals::reduce(&closer_rows),
                ads: totals::reduce(&ad_rows),
                content: totals::reduce(&content_rows),
                activity,
            };

            let report =
                report::build_report(&client, since_days, cur_from, &inputs, &benchmark_table);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_benchmarks(path: Option<&std::path::Path>) -> anyhow::Result<Vec<benchmark::Benchmark>> {
    match path {
        Some(path) => config::load_benchmarks(path),
        None => Ok(config::default_benchmarks()),
    }
}

fn print_totals(totals: &totals::Totals) {
    for (field, value) in totals.iter() {
        println!("- {}: {}", field, report::fmt_value(value));
    }
}

fn print_rates(rates: &rates::Rates, benchmarks: &[benchmark::Benchmark]) {
    for (&name, &value) in rates {
        match config::benchmark_for(benchmarks, name) {
            Some(benchmark) => println!(
                "- {}: {} ({})",
                name,
                report::fmt_rate(name, value),
                benchmark::classify(value, benchmark).label()
            ),
            None => println!("- {}: {}", name, report::fmt_rate(name, value)),
        }
    }
}

fn month_progress(today: NaiveDate) -> anyhow::Result<(NaiveDate, i64, i64)> {
    let month_start =
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).context("invalid date")?;
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .context("invalid date")?;

    let days_in_period = (next_month - month_start).num_days();
    let days_elapsed = today.day() as i64;
    Ok((month_start, days_in_period, days_elapsed))
}
