//! Pretty output formatting.

use bookclub_core::signup::SignupRequest;

use crate::client::health::HealthReport;

/// Format an accepted signup for display.
pub fn format_signup(request: &SignupRequest) -> String {
    format!(
        "Signed up {} <{}> for {}",
        request.name, request.email, request.genre
    )
}

/// Format a health report for display.
pub fn format_health(report: &HealthReport) -> String {
    let queue_length = report
        .queue_length
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut output = format!(
        "Storage: {}\nQueue: {} ({})\n  Pending: {}",
        report.storage, report.queue, report.queue_name, queue_length
    );
    if let Some(error) = &report.error {
        output.push_str(&format!("\n  Error: {}", error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_health_unknown_length() {
        let report = HealthReport {
            storage: "dynamodb".to_string(),
            queue: "redis".to_string(),
            queue_name: "bookclubsignups".to_string(),
            queue_length: None,
            error: Some("Connection failed".to_string()),
        };

        let output = format_health(&report);

        assert!(output.contains("Pending: unknown"));
        assert!(output.contains("Error: Connection failed"));
    }

    #[test]
    fn test_format_signup() {
        let request = SignupRequest::new("A", "a@x.com", "SciFi");

        assert_eq!(format_signup(&request), "Signed up A <a@x.com> for SciFi");
    }
}
