use serde::{Deserialize, Serialize};

/// Risk classification assigned by the analytics API.
///
/// Values the dashboard doesn't know are kept verbatim instead of failing
/// the whole payload; they count toward the total but land in no bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Healthy,
    AtRisk,
    Critical,
    Unknown(String),
}

impl RiskLevel {
    /// Wire representation, e.g. `AT_RISK`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::AtRisk => "AT_RISK",
            Self::Critical => "CRITICAL",
            Self::Unknown(s) => s,
        }
    }

    /// Badge text: the wire value with underscores shown as spaces.
    pub fn display_label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// CSS class for the table badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Critical => "badge badge-critical",
            Self::AtRisk => "badge badge-at-risk",
            _ => "badge badge-neutral",
        }
    }
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "HEALTHY" => Self::Healthy,
            "AT_RISK" => Self::AtRisk,
            "CRITICAL" => Self::Critical,
            _ => Self::Unknown(s),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// One analyzed user row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: u64,
    /// Estimated likelihood of disengagement, in [0, 1].
    pub churn_probability: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub recommended_action: String,
    #[serde(default)]
    pub is_anomaly: bool,
    /// Feature with the largest SHAP contribution, when the API sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_reason: Option<String>,
    /// Isolation-forest decision score (lower is more anomalous).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_score: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_processed: Option<usize>,
}

/// Full payload returned by `POST /upload-data`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub meta: ResponseMeta,
    pub data: Vec<UserRecord>,
}

impl AnalysisResult {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_api_row() {
        let json = r#"{
            "meta": {"rows_processed": 1},
            "data": [{
                "user_id": 17,
                "churn_probability": 0.91,
                "risk_level": "CRITICAL",
                "recommended_action": "Send re-engagement email + push notification",
                "primary_reason": "days_since_last_active",
                "is_anomaly": true,
                "anomaly_score": -0.12
            }]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.meta.rows_processed, Some(1));
        let row = &result.data[0];
        assert_eq!(row.user_id, 17);
        assert_eq!(row.risk_level, RiskLevel::Critical);
        assert_eq!(row.primary_reason.as_deref(), Some("days_since_last_active"));
        assert_eq!(row.anomaly_score, Some(-0.12));
    }

    #[test]
    fn test_minimal_row_without_optional_fields() {
        let json = r#"{"data":[{"user_id":2,"churn_probability":0.1,"risk_level":"HEALTHY","recommended_action":"None","is_anomaly":false}]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.meta, ResponseMeta::default());
        assert!(result.data[0].primary_reason.is_none());
        assert!(result.data[0].anomaly_score.is_none());
    }

    #[test]
    fn test_unknown_risk_level_is_preserved() {
        let json = r#"{"data":[{"user_id":3,"churn_probability":0.5,"risk_level":"WATCH_LIST_X","recommended_action":"","is_anomaly":false}]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.data[0].risk_level, RiskLevel::Unknown("WATCH_LIST_X".into()));
        assert_eq!(result.data[0].risk_level.display_label(), "WATCH LIST X");
        assert_eq!(result.data[0].risk_level.badge_class(), "badge badge-neutral");
    }

    #[test]
    fn test_missing_data_field_is_an_error() {
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"meta":{}}"#).is_err());
    }

    #[test]
    fn test_risk_level_labels() {
        assert_eq!(RiskLevel::AtRisk.display_label(), "AT RISK");
        assert_eq!(RiskLevel::Critical.badge_class(), "badge badge-critical");
        assert_eq!(String::from(RiskLevel::AtRisk), "AT_RISK");
    }
}
