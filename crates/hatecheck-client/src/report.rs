//! Plain-text rendering of results and failures for terminal hosts.

use crate::error::ClientError;
use crate::types::{AnalysisResult, HealthStatus};

pub fn render_result(result: &AnalysisResult) -> String {
    let verdict = result.verdict();
    let mut out = format!(
        "{} {}\n{}",
        verdict.marker(),
        result.prediction,
        result.summary_line()
    );

    if let Some(meta) = &result.analysis {
        for (label, value) in meta.entries() {
            out.push_str(&format!("\n  {}: {}", label, value));
        }
    }
    out
}

pub fn render_error(err: &ClientError) -> String {
    let mut out = format!("❌ Error: {}", err.user_message());
    if let Some(hint) = err.hint() {
        out.push_str(&format!("\n💡 {}", hint));
    }
    out
}

pub fn render_health(health: &HealthStatus) -> String {
    if health.is_ready() {
        format!("✅ {}", health.summary())
    } else {
        format!("⚠️ {}", health.summary())
    }
}

pub fn render_health_error(err: &ClientError) -> String {
    format!("❌ API Server Not Available ({})", err.user_message())
}
