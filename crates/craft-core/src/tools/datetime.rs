//! Current date/time tool

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::Tool;

/// Report the current date and time (UTC).
#[derive(Default)]
pub struct DateTimeTool;

#[async_trait]
impl Tool for DateTimeTool {
    fn name(&self) -> &str {
        "date_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time in UTC."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
        })
    }

    async fn execute(&self, _args: Value) -> Value {
        let now = Utc::now();
        json!({
            "success": true,
            "datetime": now.to_rfc2822(),
            "timestamp": now.to_rfc3339(),
            "timezone": "UTC",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_utc_now() {
        let tool = DateTimeTool;
        let result = tool.execute(json!({})).await;

        assert_eq!(result["success"], true);
        assert_eq!(result["timezone"], "UTC");
        assert!(result["timestamp"].as_str().unwrap().contains('T'));
    }
}
