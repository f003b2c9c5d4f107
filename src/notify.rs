use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

/// Payload posted to the team chat webhook after an EOD submission.
#[derive(Debug, Serialize)]
pub struct EodNotification<'a> {
    pub role: &'a str,
    pub member_name: &'a str,
    pub report_date: NaiveDate,
    pub cash_collected: f64,
    pub key_metric_label: &'a str,
    pub key_metric_value: f64,
}

/// Best-effort delivery. No webhook configured means no-op; a failed post
/// is logged and swallowed so the submission itself never fails on it.
pub async fn send_eod(notification: &EodNotification<'_>) {
    let url = match std::env::var("REVOPS_WEBHOOK_URL") {
        Ok(url) => url,
        Err(_) => return,
    };

    let result = reqwest::Client::new()
        .post(&url)
        .json(notification)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => {
            info!(member = notification.member_name, "eod webhook delivered");
        }
        Ok(response) => {
            warn!(status = %response.status(), "eod webhook rejected");
        }
        Err(err) => {
            warn!(error = %err, "eod webhook delivery failed");
        }
    }
}
