use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsageStats {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub total_tokens: u64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub today_tokens: u64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub monthly_tokens: u64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub total_operations: u64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub tokens_by_operation_type: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub daily_usage: Vec<DailyUsage>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub recent_usage: Vec<UsageRecord>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    pub date: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub tokens: u64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub operation_type: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub total_tokens: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub document_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_nulls_read_as_zero() {
        let stats: TokenUsageStats = serde_json::from_str(
            r#"{
                "totalTokens": null,
                "todayTokens": 12,
                "monthlyTokens": null,
                "totalOperations": null,
                "tokensByOperationType": null,
                "dailyUsage": [{ "date": "2024-05-01", "tokens": null }],
                "recentUsage": [{ "operationType": null, "totalTokens": null }]
            }"#,
        )
        .unwrap();

        assert_eq!(stats.total_tokens, 0);
        assert_eq!(stats.today_tokens, 12);
        assert_eq!(stats.monthly_tokens, 0);
        assert!(stats.tokens_by_operation_type.is_empty());
        assert_eq!(stats.daily_usage[0].tokens, 0);
        assert_eq!(stats.recent_usage[0].total_tokens, 0);
        assert_eq!(stats.recent_usage[0].operation_type, "");
    }

    #[test]
    fn null_collections_read_as_empty() {
        let stats: TokenUsageStats =
            serde_json::from_str(r#"{ "dailyUsage": null, "recentUsage": null }"#).unwrap();
        assert!(stats.daily_usage.is_empty());
        assert!(stats.recent_usage.is_empty());
    }
}
