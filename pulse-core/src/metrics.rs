use crate::types::{RiskLevel, UserRecord};

/// Format a probability in [0, 1] as a percentage with one decimal place.
///
/// Halves round away from zero, so 0.1225 renders as "12.3%".
pub fn format_percent(probability: f64) -> String {
    let tenths = (probability * 1000.0).round() / 10.0;
    format!("{:.1}%", tenths)
}

/// Aggregate numbers shown on the dashboard cards.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardStats {
    pub total_users: usize,
    /// `None` when there are no rows.
    pub mean_churn: Option<f64>,
    pub critical_users: usize,
    pub anomalies: usize,
}

impl DashboardStats {
    pub fn from_records(records: &[UserRecord]) -> Self {
        let total_users = records.len();
        let mean_churn = if total_users == 0 {
            None
        } else {
            let sum: f64 = records.iter().map(|r| r.churn_probability).sum();
            Some(sum / total_users as f64)
        };
        Self {
            total_users,
            mean_churn,
            critical_users: count_level(records, &RiskLevel::Critical),
            anomalies: records.iter().filter(|r| r.is_anomaly).count(),
        }
    }

    /// "0%" for an empty result, otherwise the mean with one decimal.
    pub fn average_churn_label(&self) -> String {
        match self.mean_churn {
            Some(mean) => format_percent(mean),
            None => "0%".to_string(),
        }
    }

    pub fn cards(&self) -> [StatCard; 4] {
        [
            StatCard {
                label: "Total Users Analyzed",
                value: self.total_users.to_string(),
                icon: StatIcon::Users,
            },
            StatCard {
                label: "Average Churn Probability",
                value: self.average_churn_label(),
                icon: StatIcon::Percent,
            },
            StatCard {
                label: "Critical Risk Users",
                value: self.critical_users.to_string(),
                icon: StatIcon::Alert,
            },
            StatCard {
                label: "Anomalies Detected",
                value: self.anomalies.to_string(),
                icon: StatIcon::Activity,
            },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatIcon {
    Users,
    Percent,
    Alert,
    Activity,
}

impl StatIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Users => "\u{25CE}",
            Self::Percent => "%",
            Self::Alert => "\u{26A0}",
            Self::Activity => "\u{223F}",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub icon: StatIcon,
}

/// One bar of the risk histogram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskBucket {
    pub label: &'static str,
    pub level: RiskLevel,
    pub count: usize,
}

impl RiskBucket {
    /// Fill color for the bar.
    pub fn color(&self) -> &'static str {
        match self.level {
            RiskLevel::AtRisk => "#3b82f6",
            RiskLevel::Critical => "#ef4444",
            _ => "#71717a",
        }
    }
}

/// Healthy, At Risk, Critical, always in that order.
pub fn risk_distribution(records: &[UserRecord]) -> [RiskBucket; 3] {
    [
        ("Healthy", RiskLevel::Healthy),
        ("At Risk", RiskLevel::AtRisk),
        ("Critical", RiskLevel::Critical),
    ]
    .map(|(label, level)| RiskBucket {
        label,
        count: count_level(records, &level),
        level,
    })
}

fn count_level(records: &[UserRecord], level: &RiskLevel) -> usize {
    records.iter().filter(|r| &r.risk_level == level).count()
}
