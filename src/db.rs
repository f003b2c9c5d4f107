use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    ActivityRecord, AdRow, ContentRow, FunnelCounts, FunnelRow, GoalAssumptions, Role,
};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: Uuid,
    pub client_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

/// Counters for one end-of-day submission. Fields the role does not use
/// are simply left at zero.
#[derive(Debug, Clone, Default)]
pub struct EodInput {
    pub dials: i64,
    pub dms_sent: i64,
    pub responses: i64,
    pub conversations: i64,
    pub calls_on_calendar: i64,
    pub bookings: i64,
    pub shows: i64,
    pub no_shows: i64,
    pub deals_closed: i64,
    pub follow_ups: i64,
    pub cash_collected: f64,
    pub revenue_generated: f64,
}

pub async fn ensure_client(pool: &PgPool, name: &str) -> anyhow::Result<Uuid> {
    let row = sqlx::query(
        r#"
        INSERT INTO revops_pulse.clients (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

pub async fn client_id(pool: &PgPool, name: &str) -> anyhow::Result<Uuid> {
    let row = sqlx::query("SELECT id FROM revops_pulse.clients WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("no client named '{name}'"))?;
    Ok(row.get("id"))
}

pub async fn member_by_email(pool: &PgPool, email: &str) -> anyhow::Result<Member> {
    let row = sqlx::query(
        "SELECT id, client_id, full_name, email, role FROM revops_pulse.team_members WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?
    .with_context(|| format!("no team member with email '{email}'"))?;

    Ok(Member {
        id: row.get("id"),
        client_id: row.get("client_id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        role: Role::parse(row.get::<String, _>("role").as_str())?,
    })
}

async fn upsert_member(
    pool: &PgPool,
    client_id: Uuid,
    full_name: &str,
    email: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let row = sqlx::query(
        r#"
        INSERT INTO revops_pulse.team_members (id, client_id, full_name, email, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE
        SET full_name = EXCLUDED.full_name, role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(client_id)
    .bind(full_name)
    .bind(email)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

async fn upsert_funnel_row(pool: &PgPool, client_id: Uuid, row: &FunnelRow) -> anyhow::Result<()> {
    let c = row.counts();
    sqlx::query(
        r#"
        INSERT INTO revops_pulse.funnel_reports
        (id, client_id, report_date, funnel_type, page_views, applications, qualified,
         bookings, shows, no_shows, closes, deals_lost, follow_ups, cash_collected,
         revenue, ad_spend)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        ON CONFLICT (client_id, report_date, funnel_type) DO UPDATE SET
            page_views = EXCLUDED.page_views,
            applications = EXCLUDED.applications,
            qualified = EXCLUDED.qualified,
            bookings = EXCLUDED.bookings,
            shows = EXCLUDED.shows,
            no_shows = EXCLUDED.no_shows,
            closes = EXCLUDED.closes,
            deals_lost = EXCLUDED.deals_lost,
            follow_ups = EXCLUDED.follow_ups,
            cash_collected = EXCLUDED.cash_collected,
            revenue = EXCLUDED.revenue,
            ad_spend = EXCLUDED.ad_spend
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(client_id)
    .bind(c.report_date)
    .bind(row.funnel_type())
    .bind(c.page_views)
    .bind(c.applications)
    .bind(c.qualified)
    .bind(c.bookings)
    .bind(c.shows)
    .bind(c.no_shows)
    .bind(c.closes)
    .bind(c.deals_lost)
    .bind(c.follow_ups)
    .bind(c.cash_collected)
    .bind(c.revenue)
    .bind(row.ad_spend())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn import_funnel_csv(
    pool: &PgPool,
    client_id: Uuid,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    // Missing counters deserialize as zero; only ad_spend keeps its
    // absence, which is what marks the row organic.
    #[derive(serde::Deserialize)]
    struct CsvRow {
        report_date: NaiveDate,
        #[serde(default)]
        page_views: i64,
        #[serde(default)]
        applications: i64,
        #[serde(default)]
        qualified: i64,
        #[serde(default)]
        bookings: i64,
        #[serde(default)]
        shows: i64,
        #[serde(default)]
        no_shows: i64,
        #[serde(default)]
        closes: i64,
        #[serde(default)]
        deals_lost: i64,
        #[serde(default)]
        follow_ups: i64,
        #[serde(default)]
        cash_collected: f64,
        #[serde(default)]
        revenue: f64,
        #[serde(default)]
        ad_spend: Option<f64>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut imported = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let counts = FunnelCounts {
            report_date: row.report_date,
            page_views: row.page_views,
            applications: row.applications,
            qualified: row.qualified,
            bookings: row.bookings,
            shows: row.shows,
            no_shows: row.no_shows,
            closes: row.closes,
            deals_lost: row.deals_lost,
            follow_ups: row.follow_ups,
            cash_collected: row.cash_collected,
            revenue: row.revenue,
        };
        upsert_funnel_row(pool, client_id, &FunnelRow::from_parts(counts, row.ad_spend)).await?;
        imported += 1;
    }

    info!(imported, "funnel rows imported");
    Ok(imported)
}

pub async fn import_ads_csv(
    pool: &PgPool,
    client_id: Uuid,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        report_date: NaiveDate,
        campaign_name: String,
        adset_name: String,
        ad_name: String,
        #[serde(default)]
        spend: f64,
        #[serde(default)]
        impressions: i64,
        #[serde(default)]
        clicks: i64,
        #[serde(default)]
        leads: i64,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut imported = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        sqlx::query(
            r#"
            INSERT INTO revops_pulse.ad_reports
            (id, client_id, report_date, campaign_name, adset_name, ad_name,
             spend, impressions, clicks, leads)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (client_id, report_date, campaign_name, adset_name, ad_name)
            DO UPDATE SET
                spend = EXCLUDED.spend,
                impressions = EXCLUDED.impressions,
                clicks = EXCLUDED.clicks,
                leads = EXCLUDED.leads
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(row.report_date)
        .bind(&row.campaign_name)
        .bind(&row.adset_name)
        .bind(&row.ad_name)
        .bind(row.spend)
        .bind(row.impressions)
        .bind(row.clicks)
        .bind(row.leads)
        .execute(pool)
        .await?;
        imported += 1;
    }

    info!(imported, "ad rows imported");
    Ok(imported)
}

pub async fn import_content_csv(
    pool: &PgPool,
    client_id: Uuid,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        report_date: NaiveDate,
        source: String,
        medium: String,
        content_name: String,
        #[serde(default)]
        views: i64,
        #[serde(default)]
        clicks: i64,
        #[serde(default)]
        applications: i64,
        #[serde(default)]
        bookings: i64,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut imported = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        sqlx::query(
            r#"
            INSERT INTO revops_pulse.content_reports
            (id, client_id, report_date, source, medium, content_name,
             views, clicks, applications, bookings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (client_id, report_date, source, medium, content_name)
            DO UPDATE SET
                views = EXCLUDED.views,
                clicks = EXCLUDED.clicks,
                applications = EXCLUDED.applications,
                bookings = EXCLUDED.bookings
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(row.report_date)
        .bind(&row.source)
        .bind(&row.medium)
        .bind(&row.content_name)
        .bind(row.views)
        .bind(row.clicks)
        .bind(row.applications)
        .bind(row.bookings)
        .execute(pool)
        .await?;
        imported += 1;
    }

    info!(imported, "content rows imported");
    Ok(imported)
}

pub async fn import_activity_csv(
    pool: &PgPool,
    role: Role,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        member_email: String,
        report_date: NaiveDate,
        #[serde(default)]
        dials: i64,
        #[serde(default)]
        dms_sent: i64,
        #[serde(default)]
        responses: i64,
        #[serde(default)]
        conversations: i64,
        #[serde(default)]
        calls_on_calendar: i64,
        #[serde(default)]
        bookings: i64,
        #[serde(default)]
        shows: i64,
        #[serde(default)]
        no_shows: i64,
        #[serde(default)]
        deals_closed: i64,
        #[serde(default)]
        follow_ups: i64,
        #[serde(default)]
        cash_collected: f64,
        #[serde(default)]
        revenue_generated: f64,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut imported = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let member = member_by_email(pool, &row.member_email).await?;
        let input = EodInput {
            dials: row.dials,
            dms_sent: row.dms_sent,
            responses: row.responses,
            conversations: row.conversations,
            calls_on_calendar: row.calls_on_calendar,
            bookings: row.bookings,
            shows: row.shows,
            no_shows: row.no_shows,
            deals_closed: row.deals_closed,
            follow_ups: row.follow_ups,
            cash_collected: row.cash_collected,
            revenue_generated: row.revenue_generated,
        };
        submit_activity(pool, &member, role, row.report_date, &input).await?;
        imported += 1;
    }

    info!(imported, role = role.as_str(), "activity rows imported");
    Ok(imported)
}

/// Record one end-of-day report. Two submissions for the same day are two
/// rows; the reducer sums them.
pub async fn submit_activity(
    pool: &PgPool,
    member: &Member,
    role: Role,
    report_date: NaiveDate,
    input: &EodInput,
) -> anyhow::Result<()> {
    // TODO: confirm with product whether deals_lost should clamp at zero.
    // This path stores the raw difference (negative when follow_ups +
    // deals_closed exceed shows) while the report renderer clamps it.
    let deals_lost = match role {
        Role::Closer => input.shows - input.deals_closed - input.follow_ups,
        Role::Setter => 0,
    };

    sqlx::query(
        r#"
        INSERT INTO revops_pulse.activity_reports
        (id, client_id, member_id, role, report_date, dials, dms_sent, responses,
         conversations, calls_on_calendar, bookings, shows, no_shows, deals_closed,
         deals_lost, follow_ups, cash_collected, revenue_generated)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(member.client_id)
    .bind(member.id)
    .bind(role.as_str())
    .bind(report_date)
    .bind(input.dials)
    .bind(input.dms_sent)
    .bind(input.responses)
    .bind(input.conversations)
    .bind(input.calls_on_calendar)
    .bind(input.bookings)
    .bind(input.shows)
    .bind(input.no_shows)
    .bind(input.deals_closed)
    .bind(deals_lost)
    .bind(input.follow_ups)
    .bind(input.cash_collected)
    .bind(input.revenue_generated)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_funnel_window(
    pool: &PgPool,
    client_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<FunnelRow>> {
    let records = sqlx::query(
        "SELECT report_date, page_views, applications, qualified, bookings, shows, \
         no_shows, closes, deals_lost, follow_ups, cash_collected, revenue, ad_spend \
         FROM revops_pulse.funnel_reports \
         WHERE client_id = $1 AND report_date >= $2 AND report_date < $3 \
         ORDER BY report_date",
    )
    .bind(client_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    let mut rows = Vec::new();
    for record in records {
        let counts = FunnelCounts {
            report_date: record.get("report_date"),
            page_views: record.get("page_views"),
            applications: record.get("applications"),
            qualified: record.get("qualified"),
            bookings: record.get("bookings"),
            shows: record.get("shows"),
            no_shows: record.get("no_shows"),
            closes: record.get("closes"),
            deals_lost: record.get("deals_lost"),
            follow_ups: record.get("follow_ups"),
            cash_collected: record.get("cash_collected"),
            revenue: record.get("revenue"),
        };
        rows.push(FunnelRow::from_parts(counts, record.get("ad_spend")));
    }

    Ok(rows)
}

pub async fn fetch_activity_window(
    pool: &PgPool,
    client_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
    role: Option<Role>,
    member_email: Option<&str>,
) -> anyhow::Result<Vec<ActivityRecord>> {
    let mut query = String::from(
        "SELECT a.member_id, m.full_name, m.email, a.role, a.report_date, a.dials, \
         a.dms_sent, a.responses, a.conversations, a.calls_on_calendar, a.bookings, \
         a.shows, a.no_shows, a.deals_closed, a.deals_lost, a.follow_ups, \
         a.cash_collected, a.revenue_generated \
         FROM revops_pulse.activity_reports a \
         JOIN revops_pulse.team_members m ON m.id = a.member_id \
         WHERE a.client_id = $1 AND a.report_date >= $2 AND a.report_date < $3",
    );

    if role.is_some() {
        query.push_str(" AND a.role = $4");
    } else if member_email.is_some() {
        query.push_str(" AND m.email = $4");
    }

    let mut rows = sqlx::query(&query).bind(client_id).bind(from).bind(to);

    if let Some(value) = role {
        rows = rows.bind(value.as_str());
    } else if let Some(value) = member_email {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    let mut activity = Vec::new();

    for record in records {
        activity.push(ActivityRecord {
            member_id: record.get("member_id"),
            member_name: record.get("full_name"),
            member_email: record.get("email"),
            role: Role::parse(record.get::<String, _>("role").as_str())?,
            report_date: record.get("report_date"),
            dials: record.get("dials"),
            dms_sent: record.get("dms_sent"),
            responses: record.get("responses"),
            conversations: record.get("conversations"),
            calls_on_calendar: record.get("calls_on_calendar"),
            bookings: record.get("bookings"),
            shows: record.get("shows"),
            no_shows: record.get("no_shows"),
            deals_closed: record.get("deals_closed"),
            deals_lost: record.get("deals_lost"),
            follow_ups: record.get("follow_ups"),
            cash_collected: record.get("cash_collected"),
            revenue_generated: record.get("revenue_generated"),
        });
    }

    Ok(activity)
}

pub async fn fetch_ad_window(
    pool: &PgPool,
    client_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<AdRow>> {
    let records = sqlx::query(
        "SELECT report_date, campaign_name, adset_name, ad_name, spend, impressions, \
         clicks, leads FROM revops_pulse.ad_reports \
         WHERE client_id = $1 AND report_date >= $2 AND report_date < $3",
    )
    .bind(client_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(records
        .into_iter()
        .map(|record| AdRow {
            report_date: record.get("report_date"),
            campaign_name: record.get("campaign_name"),
            adset_name: record.get("adset_name"),
            ad_name: record.get("ad_name"),
            spend: record.get("spend"),
            impressions: record.get("impressions"),
            clicks: record.get("clicks"),
            leads: record.get("leads"),
        })
        .collect())
}

pub async fn fetch_content_window(
    pool: &PgPool,
    client_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<ContentRow>> {
    let records = sqlx::query(
        "SELECT report_date, source, medium, content_name, views, clicks, applications, \
         bookings FROM revops_pulse.content_reports \
         WHERE client_id = $1 AND report_date >= $2 AND report_date < $3",
    )
    .bind(client_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(records
        .into_iter()
        .map(|record| ContentRow {
            report_date: record.get("report_date"),
            source: record.get("source"),
            medium: record.get("medium"),
            content_name: record.get("content_name"),
            views: record.get("views"),
            clicks: record.get("clicks"),
            applications: record.get("applications"),
            bookings: record.get("bookings"),
        })
        .collect())
}

pub async fn goal_get(
    pool: &PgPool,
    user_id: Uuid,
    goal_type: &str,
) -> anyhow::Result<Option<GoalAssumptions>> {
    let row = sqlx::query(
        "SELECT goal_amount, target_aov, target_show_rate, target_close_rate, \
         target_cash_per_booking, target_booking_rate, target_convo_rate, \
         target_response_rate \
         FROM revops_pulse.goals WHERE user_id = $1 AND goal_type = $2",
    )
    .bind(user_id)
    .bind(goal_type)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| GoalAssumptions {
        goal_amount: row.get("goal_amount"),
        target_aov: row.get("target_aov"),
        target_show_rate: row.get("target_show_rate"),
        target_close_rate: row.get("target_close_rate"),
        target_cash_per_booking: row.get("target_cash_per_booking"),
        target_booking_rate: row.get("target_booking_rate"),
        target_convo_rate: row.get("target_convo_rate"),
        target_response_rate: row.get("target_response_rate"),
    }))
}

pub async fn goal_upsert(
    pool: &PgPool,
    user_id: Uuid,
    goal_type: &str,
    goal: &GoalAssumptions,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO revops_pulse.goals
        (user_id, goal_type, goal_amount, target_aov, target_show_rate,
         target_close_rate, target_cash_per_booking, target_booking_rate,
         target_convo_rate, target_response_rate, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
        ON CONFLICT (user_id, goal_type) DO UPDATE SET
            goal_amount = EXCLUDED.goal_amount,
            target_aov = EXCLUDED.target_aov,
            target_show_rate = EXCLUDED.target_show_rate,
            target_close_rate = EXCLUDED.target_close_rate,
            target_cash_per_booking = EXCLUDED.target_cash_per_booking,
            target_booking_rate = EXCLUDED.target_booking_rate,
            target_convo_rate = EXCLUDED.target_convo_rate,
            target_response_rate = EXCLUDED.target_response_rate,
            updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(goal_type)
    .bind(goal.goal_amount)
    .bind(goal.target_aov)
    .bind(goal.target_show_rate)
    .bind(goal.target_close_rate)
    .bind(goal.target_cash_per_booking)
    .bind(goal.target_booking_rate)
    .bind(goal.target_convo_rate)
    .bind(goal.target_response_rate)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let client = ensure_client(pool, "Peak Performance Coaching").await?;

    let maya = upsert_member(
        pool,
        client,
        "Maya Torres",
        "maya.torres@peakperformance.co",
        Role::Setter,
    )
    .await?;
    let derek = upsert_member(
        pool,
        client,
        "Derek Okafor",
        "derek.okafor@peakperformance.co",
        Role::Closer,
    )
    .await?;

    let paid_days: Vec<(u32, i64, i64, i64, i64, i64, f64, f64)> = vec![
        // (day, page_views, applications, bookings, shows, closes, cash, spend)
        (1, 1000, 40, 20, 14, 5, 20000.0, 4000.0),
        (2, 1000, 45, 22, 15, 6, 22000.0, 4200.0),
        (3, 1000, 38, 18, 13, 4, 18000.0, 3800.0),
    ];
    for (day, page_views, applications, bookings, shows, closes, cash, spend) in paid_days {
        let counts = FunnelCounts {
            report_date: NaiveDate::from_ymd_opt(2026, 7, day).context("invalid date")?,
            page_views,
            applications,
            qualified: applications / 2,
            bookings,
            shows,
            no_shows: bookings - shows,
            closes,
            deals_lost: 1,
            follow_ups: 2,
            cash_collected: cash,
            revenue: cash * 1.4,
        };
        upsert_funnel_row(pool, client, &FunnelRow::from_parts(counts, Some(spend))).await?;
    }

    let organic_days: Vec<(u32, i64, i64, i64, i64, i64, f64)> = vec![
        (1, 600, 12, 6, 4, 1, 4000.0),
        (2, 540, 10, 5, 4, 2, 7500.0),
    ];
    for (day, page_views, applications, bookings, shows, closes, cash) in organic_days {
        let counts = FunnelCounts {
            report_date: NaiveDate::from_ymd_opt(2026, 7, day).context("invalid date")?,
            page_views,
            applications,
            qualified: applications / 2,
            bookings,
            shows,
            no_shows: bookings - shows,
            closes,
            deals_lost: 0,
            follow_ups: 1,
            cash_collected: cash,
            revenue: cash,
        };
        upsert_funnel_row(pool, client, &FunnelRow::from_parts(counts, None)).await?;
    }

    let setter_member = member_by_email(pool, "maya.torres@peakperformance.co").await?;
    for (day, dials, dms, responses, convos, bookings) in
        [(1, 60, 80, 18, 9, 3), (2, 55, 75, 15, 8, 2)]
    {
        let input = EodInput {
            dials,
            dms_sent: dms,
            responses,
            conversations: convos,
            bookings,
            shows: bookings - 1,
            cash_collected: 0.0,
            ..EodInput::default()
        };
        submit_activity(
            pool,
            &setter_member,
            Role::Setter,
            NaiveDate::from_ymd_opt(2026, 7, day).context("invalid date")?,
            &input,
        )
        .await?;
    }

    let closer_member = member_by_email(pool, "derek.okafor@peakperformance.co").await?;
    for (day, calendar, shows, no_shows, closed, follow_ups, cash) in
        [(1, 8, 6, 2, 2, 1, 8000.0), (2, 9, 7, 2, 2, 2, 9500.0)]
    {
        let input = EodInput {
            calls_on_calendar: calendar,
            shows,
            no_shows,
            deals_closed: closed,
            follow_ups,
            cash_collected: cash,
            revenue_generated: cash * 1.4,
            ..EodInput::default()
        };
        submit_activity(
            pool,
            &closer_member,
            Role::Closer,
            NaiveDate::from_ymd_opt(2026, 7, day).context("invalid date")?,
            &input,
        )
        .await?;
    }

    goal_upsert(
        pool,
        derek,
        "monthly_cash",
        &GoalAssumptions {
            goal_amount: 100000.0,
            target_aov: Some(4000.0),
            target_show_rate: Some(0.7),
            target_close_rate: Some(0.25),
            target_cash_per_booking: None,
            target_booking_rate: None,
            target_convo_rate: None,
            target_response_rate: None,
        },
    )
    .await?;

    goal_upsert(
        pool,
        maya,
        "monthly_cash",
        &GoalAssumptions {
            goal_amount: 40000.0,
            target_aov: None,
            target_show_rate: None,
            target_close_rate: None,
            target_cash_per_booking: Some(1500.0),
            target_booking_rate: Some(0.12),
            target_convo_rate: Some(0.45),
            target_response_rate: Some(0.25),
        },
    )
    .await?;

    Ok(())
}
