use crate::metrics::format_percent;
use crate::types::UserRecord;

pub const ANOMALY_TITLE: &str = "Anomalous behavior detected";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Descending => "\u{2193}",
            Self::Ascending => "\u{2191}",
        }
    }
}

/// Rows ordered by churn probability. The sort is stable, so equal
/// probabilities keep the order the API returned them in.
pub fn sort_by_churn(records: &[UserRecord], direction: SortDirection) -> Vec<&UserRecord> {
    let mut rows: Vec<&UserRecord> = records.iter().collect();
    match direction {
        SortDirection::Descending => {
            rows.sort_by(|a, b| b.churn_probability.total_cmp(&a.churn_probability))
        }
        SortDirection::Ascending => {
            rows.sort_by(|a, b| a.churn_probability.total_cmp(&b.churn_probability))
        }
    }
    rows
}

pub fn user_label(user_id: u64) -> String {
    format!("USR-{user_id}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnomalyMarker {
    Flagged,
    Clear,
}

impl AnomalyMarker {
    pub fn for_record(record: &UserRecord) -> Self {
        if record.is_anomaly {
            Self::Flagged
        } else {
            Self::Clear
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Flagged => "\u{26A0}",
            Self::Clear => "\u{2014}",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Flagged => "anomaly-flag",
            Self::Clear => "anomaly-clear",
        }
    }

    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::Flagged => Some(ANOMALY_TITLE),
            Self::Clear => None,
        }
    }
}

/// Display strings for one table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsightRow {
    pub user: String,
    pub churn: String,
    pub risk_label: String,
    pub risk_class: &'static str,
    pub action: String,
    pub reason: Option<String>,
    pub anomaly: AnomalyMarker,
}

impl InsightRow {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            user: user_label(record.user_id),
            churn: format_percent(record.churn_probability),
            risk_label: record.risk_level.display_label(),
            risk_class: record.risk_level.badge_class(),
            action: record.recommended_action.clone(),
            reason: record.primary_reason.clone(),
            anomaly: AnomalyMarker::for_record(record),
        }
    }
}

pub fn insight_rows(records: &[UserRecord], direction: SortDirection) -> Vec<InsightRow> {
    sort_by_churn(records, direction)
        .into_iter()
        .map(InsightRow::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    fn record(id: u64, p: f64) -> UserRecord {
        UserRecord {
            user_id: id,
            churn_probability: p,
            risk_level: RiskLevel::Healthy,
            recommended_action: "No action required".into(),
            is_anomaly: false,
            primary_reason: None,
            anomaly_score: None,
        }
    }

    #[test]
    fn test_descending_order_is_non_increasing() {
        let rows: Vec<_> = [0.3, 0.9, 0.1, 0.9, 0.55, 0.0, 1.0]
            .iter()
            .enumerate()
            .map(|(i, &p)| record(i as u64, p))
            .collect();
        let sorted = sort_by_churn(&rows, SortDirection::Descending);
        assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            assert!(
                pair[0].churn_probability >= pair[1].churn_probability,
                "{} before {}",
                pair[0].churn_probability,
                pair[1].churn_probability
            );
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let rows = vec![record(5, 0.4), record(3, 0.4), record(9, 0.4)];
        let ids: Vec<_> = sort_by_churn(&rows, SortDirection::Descending)
            .iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_ascending_toggle() {
        let rows = vec![record(1, 0.82), record(2, 0.10)];
        let dir = SortDirection::default().toggled();
        let ids: Vec<_> = sort_by_churn(&rows, dir).iter().map(|r| r.user_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(dir.toggled(), SortDirection::Descending);
    }

    #[test]
    fn test_row_formatting() {
        let mut flagged = record(1, 0.82);
        flagged.risk_level = RiskLevel::Critical;
        flagged.is_anomaly = true;
        flagged.recommended_action = "Offer discount".into();
        flagged.primary_reason = Some("session_trend_ratio".into());

        let rows = insight_rows(&[record(2, 0.10), flagged], SortDirection::Descending);
        assert_eq!(rows[0].user, "USR-1");
        assert_eq!(rows[0].churn, "82.0%");
        assert_eq!(rows[0].risk_label, "CRITICAL");
        assert_eq!(rows[0].risk_class, "badge badge-critical");
        assert_eq!(rows[0].action, "Offer discount");
        assert_eq!(rows[0].reason.as_deref(), Some("session_trend_ratio"));
        assert_eq!(rows[0].anomaly.glyph(), "\u{26A0}");
        assert_eq!(rows[0].anomaly.title(), Some(ANOMALY_TITLE));

        assert_eq!(rows[1].user, "USR-2");
        assert_eq!(rows[1].churn, "10.0%");
        assert_eq!(rows[1].anomaly.glyph(), "\u{2014}");
        assert_eq!(rows[1].anomaly.title(), None);
    }
}
