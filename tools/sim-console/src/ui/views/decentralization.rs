//! Decentralization: inequality metrics, miner distribution, and the
//! combined score.

use ratatui::{style::Color, text::Line};
use sim_analytics::{
    concentration_level, concentration_score, decentralization_interpretation,
    decentralization_risk, decentralization_score, gini_score, health_band, score_level,
    AnalyticsSnapshot,
};

use crate::ui::fragment::{
    band_color, concentration_color, gauge, headline, kv, muted, sim, status, Panel,
    ViewFragment,
};

const NO_MINERS: &str = "No mining activity yet.";

pub fn build(analytics: &AnalyticsSnapshot) -> ViewFragment {
    let d = &analytics.decentralization_metrics;
    let gini = d.gini_coefficient;
    let top = d.top_miners_concentration;

    let metrics = Panel::new("Decentralization Metrics", Color::Cyan)
        .line(kv("Gini Coefficient", format!("{:.2}%", gini * 100.0)))
        .line(kv("Herfindahl Index", format!("{:.4}", d.herfindahl_index)))
        .line(kv("Top Miners Concentration", format!("{top:.1}%")))
        .line(kv("Interpretation", decentralization_interpretation(gini)));

    let level = concentration_level(top);
    let concentration = Panel::new("Network Concentration", Color::Magenta)
        .line(kv("Top 3 Miners Control", format!("{top:.1}%")))
        .line(gauge(top, 30, concentration_color(level)))
        .line(kv("Market Concentration", level.label()))
        .line(kv("Decentralization Risk", decentralization_risk(gini, top)));

    let overall = decentralization_score(d);
    let color = band_color(health_band(overall));
    let score = Panel::new("Decentralization Score", color)
        .lines(headline(format!("{overall:.1}%"), "Decentralization Score", color))
        .line(status(score_level(overall), color))
        .line(gauge(overall, 30, color))
        .line(kv("Gini Score", format!("{:.1}%", gini_score(gini) * 100.0)))
        .line(kv(
            "Concentration Score",
            format!("{:.1}%", concentration_score(top) * 100.0),
        ));

    ViewFragment::grid(2, vec![metrics, concentration, score, distribution(analytics)])
}

fn distribution(analytics: &AnalyticsSnapshot) -> Panel {
    let panel = Panel::new("Miner Distribution", Color::Yellow);
    if analytics.miner_distribution.is_empty() {
        return panel.line(muted(NO_MINERS));
    }

    let lines = analytics
        .miner_distribution
        .iter()
        .flat_map(|(miner, stats)| {
            [
                Line::from(format!("  {miner}:")),
                kv("  Blocks Mined", stats.blocks_mined.to_string()),
                kv("  Total Rewards", sim(stats.total_rewards)),
                kv("  Hashrate", format!("{} H/s", stats.hashrate)),
            ]
        });
    panel.lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_analytics::{DecentralizationMetrics, MinerStats};

    fn snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            decentralization_metrics: DecentralizationMetrics {
                gini_coefficient: 0.6,
                herfindahl_index: 0.3,
                top_miners_concentration: 70.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_distribution_placeholder() {
        let text = build(&snapshot()).plain_text();
        assert!(text.contains(NO_MINERS));
    }

    #[test]
    fn test_labels() {
        let text = build(&snapshot()).plain_text();
        assert!(text.contains("Interpretation: Somewhat centralized"));
        assert!(text.contains("Market Concentration: High"));
        assert!(text.contains("Decentralization Risk: Medium"));
        assert!(text.contains("Gini Score: 40.0%"));
        assert!(text.contains("Concentration Score: 30.0%"));
        // (40 + 30) / 2
        assert!(text.contains("35.0%"));
        assert!(text.contains("Poor"));
    }

    fn concentration_gauge(top: f64) -> Color {
        let mut analytics = snapshot();
        analytics.decentralization_metrics.top_miners_concentration = top;
        let fragment = build(&analytics);
        let panel = &fragment.panels[1];
        panel.lines[1].spans[1].style.fg.unwrap()
    }

    #[test]
    fn test_concentration_gauge_colour_follows_level() {
        assert_eq!(concentration_gauge(10.0), Color::Green);
        assert_eq!(concentration_gauge(45.0), Color::Yellow);
        assert_eq!(concentration_gauge(70.0), Color::Red);
        assert_eq!(concentration_gauge(95.0), Color::Red);
    }

    #[test]
    fn test_distribution_lists_each_miner() {
        let mut analytics = snapshot();
        analytics.miner_distribution.insert(
            "miner-a".to_string(),
            MinerStats {
                blocks_mined: 3,
                total_rewards: 150.0,
                hashrate: 1200.0,
            },
        );

        let text = build(&analytics).plain_text();
        assert!(!text.contains(NO_MINERS));
        assert!(text.contains("miner-a:"));
        assert!(text.contains("Total Rewards: 150.00 SIM"));
        assert!(text.contains("Hashrate: 1200 H/s"));
    }
}
