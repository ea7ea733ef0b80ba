use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, Table};
use pulse_core::insights::{insight_rows, AnomalyMarker, SortDirection};
use pulse_core::metrics::{risk_distribution, DashboardStats};
use pulse_core::AnalysisResult;

const HISTOGRAM_WIDTH: usize = 30;

/// Stat cards followed by a text histogram of the risk buckets.
pub fn render_summary(result: &AnalysisResult) -> String {
    let stats = DashboardStats::from_records(&result.data);
    let mut out = String::new();
    for card in stats.cards() {
        out.push_str(&format!("{:<28}{}\n", card.label, card.value));
    }

    out.push_str("\nRisk Distribution\n");
    let buckets = risk_distribution(&result.data);
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &buckets {
        out.push_str(&format!(
            "  {:<10}{:<width$} {}\n",
            bucket.label,
            histogram_bar(bucket.count, max, HISTOGRAM_WIDTH),
            bucket.count,
            width = HISTOGRAM_WIDTH,
        ));
    }
    out
}

fn histogram_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let len = (count * width).div_ceil(max).min(width);
    "\u{2588}".repeat(len)
}

pub fn render_table(result: &AnalysisResult, direction: SortDirection) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "User ID",
        "Churn Probability",
        "Risk Level",
        "Recommended Action",
        "Anomaly",
    ]);
    for row in insight_rows(&result.data, direction) {
        let risk_color = match row.risk_label.as_str() {
            "CRITICAL" => Color::Red,
            "AT RISK" => Color::Blue,
            _ => Color::Grey,
        };
        let anomaly = Cell::new(row.anomaly.glyph());
        let anomaly = if row.anomaly == AnomalyMarker::Flagged {
            anomaly.fg(Color::Red)
        } else {
            anomaly
        };
        table.add_row(vec![
            Cell::new(&row.user),
            Cell::new(&row.churn),
            Cell::new(&row.risk_label).fg(risk_color),
            Cell::new(&row.action),
            anomaly,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> AnalysisResult {
        serde_json::from_str(
            r#"{"data":[
                {"user_id":2,"churn_probability":0.10,"risk_level":"HEALTHY","is_anomaly":false,"recommended_action":"None"},
                {"user_id":1,"churn_probability":0.82,"risk_level":"CRITICAL","is_anomaly":true,"recommended_action":"Offer discount"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_lists_cards_and_buckets() {
        let text = render_summary(&example());
        assert!(text.contains("Total Users Analyzed        2"));
        assert!(text.contains("Average Churn Probability   46.0%"));
        assert!(text.contains("Critical Risk Users         1"));
        assert!(text.contains("Anomalies Detected          1"));
        let at_risk = text.lines().find(|l| l.trim_start().starts_with("At Risk")).unwrap();
        assert!(at_risk.trim_end().ends_with('0'));
        assert!(!at_risk.contains('\u{2588}'));
    }

    #[test]
    fn test_empty_summary() {
        let text = render_summary(&AnalysisResult::default());
        assert!(text.contains("Average Churn Probability   0%"));
    }

    #[test]
    fn test_histogram_bar_scaling() {
        assert_eq!(histogram_bar(0, 10, 30), "");
        assert_eq!(histogram_bar(10, 10, 30).chars().count(), 30);
        assert_eq!(histogram_bar(1, 10, 30).chars().count(), 3);
        assert_eq!(histogram_bar(1, 1000, 30).chars().count(), 1);
    }

    #[test]
    fn test_table_orders_highest_risk_first() {
        let rendered = render_table(&example(), SortDirection::Descending).to_string();
        let first = rendered.find("USR-1").unwrap();
        let second = rendered.find("USR-2").unwrap();
        assert!(first < second);
        assert!(rendered.contains("82.0%"));
        assert!(rendered.contains("Offer discount"));
    }
}
