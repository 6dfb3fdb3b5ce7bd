use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dx_mechanics::{CheckOutcome, EngineConfig, perform_check};

/// Running totals over many checks of the same request.
#[derive(Debug, Default)]
struct SimStats {
    trials: u32,
    automatic_failures: u32,
    fumbles: u32,
    judged: u32,
    successes: u32,
    resolved: u32,
    sum: i64,
    min: Option<i64>,
    max: Option<i64>,
    longest_cascade: u32,
    truncated: u32,
}

impl SimStats {
    fn record(&mut self, outcome: &CheckOutcome) {
        self.trials += 1;
        let result = match outcome {
            CheckOutcome::Resolved(result) => result,
            CheckOutcome::AutomaticFailure => {
                self.automatic_failures += 1;
                return;
            }
            CheckOutcome::Rejected(_) => return,
        };

        self.resolved += 1;
        self.sum += result.achieved_value;
        self.min = Some(self.min.map_or(result.achieved_value, |m| m.min(result.achieved_value)));
        self.max = Some(self.max.map_or(result.achieved_value, |m| m.max(result.achieved_value)));
        self.longest_cascade = self.longest_cascade.max(result.cascade.rounds());
        if result.fumble {
            self.fumbles += 1;
        }
        if result.cascade.truncated() {
            self.truncated += 1;
        }
        if let Some(comparison) = result.comparison {
            self.judged += 1;
            if comparison.is_success() {
                self.successes += 1;
            }
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.resolved > 0).then(|| self.sum as f64 / f64::from(self.resolved))
    }

    fn rate(&self, count: u32) -> String {
        if self.trials == 0 {
            return "--".to_string();
        }
        format!("{:.1}%", 100.0 * f64::from(count) / f64::from(self.trials))
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let opt = |v: Option<i64>| v.map_or_else(|| "--".to_string(), |v| v.to_string());
        let mut rows = vec![
            ("Trials", self.trials.to_string()),
            (
                "Mean achieved",
                self.mean().map_or_else(|| "--".to_string(), |m| format!("{m:.2}")),
            ),
            ("Min achieved", opt(self.min)),
            ("Max achieved", opt(self.max)),
            ("Fumble rate", self.rate(self.fumbles)),
            ("Automatic failure rate", self.rate(self.automatic_failures)),
            ("Longest cascade", format!("{} rounds", self.longest_cascade)),
        ];
        if self.judged > 0 {
            rows.push(("Success rate", self.rate(self.successes)));
        }
        if self.truncated > 0 {
            rows.push(("Cut off by round cap", self.truncated.to_string()));
        }
        rows
    }
}

pub fn run(command: &str, trials: u32, config: &EngineConfig) -> Result<(), String> {
    let request = super::parse(command)?;
    tracing::debug!(%request, trials, die = %config.die, seed = ?config.seed, "parsed check");
    let mut rng = super::rng_for(config.seed);

    let mut stats = SimStats::default();
    for _ in 0..trials {
        let outcome = perform_check(&request, config, &mut rng);
        if let CheckOutcome::Rejected(err) = &outcome {
            return Err(err.to_string());
        }
        stats.record(&outcome);
    }
    tracing::debug!(
        resolved = stats.resolved,
        truncated = stats.truncated,
        "simulation finished"
    );

    let seed = config
        .seed
        .map_or_else(|| "random".to_string(), |s| s.to_string());
    println!(
        "  {} {} {}",
        "Simulation".bold(),
        request,
        format!("({trials} trials, seed={seed}, {})", config.die).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    for (metric, value) in stats.rows() {
        table.add_row(vec![metric.to_string(), value]);
    }
    println!("{table}");

    if stats.truncated > 0 {
        println!();
        println!(
            "  {} {} cascades hit the round cap of {}",
            "WARN".yellow().bold(),
            stats.truncated,
            config.round_cap
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_mechanics::{CheckRequest, ScriptedDice};

    fn record(stats: &mut SimStats, request: &CheckRequest, faces: &[u32]) {
        let mut dice = ScriptedDice::new(faces.iter().copied());
        let outcome = perform_check(request, &EngineConfig::default(), &mut dice);
        stats.record(&outcome);
    }

    #[test]
    fn empty_stats() {
        let stats = SimStats::default();
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.rate(0), "--");
    }

    #[test]
    fn records_resolved_checks() {
        let request = CheckRequest::new(2, 10).with_target(10);
        let mut stats = SimStats::default();
        record(&mut stats, &request, &[10, 4, 6]);
        record(&mut stats, &request, &[3, 5]);
        record(&mut stats, &request, &[1, 1]);

        assert_eq!(stats.trials, 3);
        assert_eq!(stats.resolved, 3);
        assert_eq!(stats.min, Some(0));
        assert_eq!(stats.max, Some(16));
        assert_eq!(stats.fumbles, 1);
        assert_eq!(stats.judged, 3);
        assert_eq!(stats.successes, 1);
        assert_eq!(stats.longest_cascade, 2);
        assert_eq!(stats.mean(), Some(7.0));
        assert_eq!(stats.rate(stats.successes), "33.3%");
    }

    #[test]
    fn records_automatic_failures() {
        let request = CheckRequest::new(0, 10);
        let mut stats = SimStats::default();
        record(&mut stats, &request, &[]);
        assert_eq!(stats.automatic_failures, 1);
        assert_eq!(stats.resolved, 0);
        assert_eq!(stats.rate(stats.automatic_failures), "100.0%");
    }

    #[test]
    fn success_rate_only_with_target() {
        let request = CheckRequest::new(1, 10);
        let mut stats = SimStats::default();
        record(&mut stats, &request, &[5]);
        assert!(stats.rows().iter().all(|(metric, _)| *metric != "Success rate"));
    }
}
