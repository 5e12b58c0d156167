//! Prometheus metrics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::{MetricsFormat, ServiceConfig};
use crate::error::ApiError;
use crate::state::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const JSON_WRAPPED_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// GET /metrics — uptime and build-info gauges in exposition format.
///
/// With [`MetricsFormat::Json`] the body is the text encoded as a JSON
/// string, still labelled `text/plain`; existing clients of this service
/// decode it that way.
pub async fn get(State(state): State<Arc<AppState>>) -> Response {
    let text = render(&state.service);
    let (content_type, body) = match state.metrics_format {
        MetricsFormat::Json => match serde_json::to_string(&text) {
            Ok(encoded) => (JSON_WRAPPED_CONTENT_TYPE, encoded),
            Err(err) => return ApiError::Internal(err.to_string()).into_response(),
        },
        MetricsFormat::Text => (PROMETHEUS_CONTENT_TYPE, text),
    };
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response()
}

/// Renders the exposition text for the given service.
pub fn render(service: &ServiceConfig) -> String {
    format!(
        "# HELP app_uptime_seconds Application uptime in seconds\n\
         # TYPE app_uptime_seconds gauge\n\
         app_uptime_seconds {uptime}\n\
         \n\
         # HELP app_info Application information\n\
         # TYPE app_info gauge\n\
         app_info{{version=\"{version}\",environment=\"{environment}\"}} 1\n",
        uptime = service.uptime_seconds(),
        version = escape_label(service.version()),
        environment = escape_label(service.environment()),
    )
}

fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_matches_exposition_layout() {
        let service = ServiceConfig::new("1.2.3", "staging");
        let text = render(&service);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "# HELP app_uptime_seconds Application uptime in seconds"
        );
        assert_eq!(lines[1], "# TYPE app_uptime_seconds gauge");
        assert!(lines[2].starts_with("app_uptime_seconds "));
        assert!(lines[2]["app_uptime_seconds ".len()..].parse::<f64>().is_ok());
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "# HELP app_info Application information");
        assert_eq!(lines[5], "# TYPE app_info gauge");
        assert_eq!(
            lines[6],
            r#"app_info{version="1.2.3",environment="staging"} 1"#
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn label_values_are_escaped() {
        let service = ServiceConfig::new(r#"1.0"beta"#, "a\\b\nc");
        let text = render(&service);
        assert!(text.contains(r#"app_info{version="1.0\"beta",environment="a\\b\nc"} 1"#));
    }
}
