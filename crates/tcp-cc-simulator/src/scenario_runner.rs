use anyhow::{Context, anyhow, bail};
use std::fs;
use std::path::Path;
use tcp_cc_abstract::{ReportingConfig, Scenario, ScenarioAssertion, SimConfig};
use tracing::info;

use crate::engine::Simulator;
use crate::trace::SimulationReport;

pub fn load_scenario(path: impl AsRef<Path>) -> anyhow::Result<Scenario> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    parse_scenario(&content)
}

pub fn parse_scenario(content: &str) -> anyhow::Result<Scenario> {
    toml::from_str(content).context("Failed to parse scenario")
}

/// Load a scenario file, run it and check its assertions.
pub fn run_scenario(
    scenario_path: impl AsRef<Path>,
    reporting: ReportingConfig,
) -> anyhow::Result<SimulationReport> {
    let scenario = load_scenario(scenario_path)?;
    run(&scenario, reporting)
}

pub fn run(scenario: &Scenario, reporting: ReportingConfig) -> anyhow::Result<SimulationReport> {
    info!("Running Scenario: {}", scenario.name);
    if !scenario.description.is_empty() {
        info!("Description: {}", scenario.description);
    }

    let mut config = SimConfig::default();
    scenario.config.apply_to(&mut config);

    let mut sim = Simulator::new(config, reporting)
        .with_context(|| format!("Scenario '{}' has an invalid configuration", scenario.name))?;
    sim.run_rounds(scenario.rounds)?;

    let report = sim.export_report();
    check_assertions(scenario, &report)?;
    info!("Scenario '{}' passed", scenario.name);
    Ok(report)
}

pub fn check_assertions(scenario: &Scenario, report: &SimulationReport) -> anyhow::Result<()> {
    for assertion in &scenario.assertions {
        match assertion {
            ScenarioAssertion::UtilizationAtLeast { min } => {
                if report.utilization < *min {
                    bail!(
                        "Assertion Failed: utilization {:.3} is below {:.3}",
                        report.utilization,
                        min
                    );
                }
            }
            ScenarioAssertion::UtilizationAtMost { max } => {
                if report.utilization > *max {
                    bail!(
                        "Assertion Failed: utilization {:.3} is above {:.3}",
                        report.utilization,
                        max
                    );
                }
            }
            ScenarioAssertion::OutcomeCount { outcome, min, max } => {
                let count = report.count_outcome(*outcome) as u32;
                if count < *min {
                    bail!(
                        "Assertion Failed: {} reported in {} rounds, expected min {}",
                        outcome,
                        count,
                        min
                    );
                }
                if let Some(max) = max
                    && count > *max
                {
                    bail!(
                        "Assertion Failed: {} reported in {} rounds, expected max {}",
                        outcome,
                        count,
                        max
                    );
                }
            }
            ScenarioAssertion::CongestionWindowMax { min, max } => {
                let observed = report
                    .max_congestion_window()
                    .ok_or_else(|| anyhow!("Assertion Failed: no rounds were run"))?;
                if observed < *min {
                    bail!(
                        "Assertion Failed: largest congestion window {} is below {}",
                        observed,
                        min
                    );
                }
                if let Some(max) = max
                    && observed > *max
                {
                    bail!(
                        "Assertion Failed: largest congestion window {} is above {}",
                        observed,
                        max
                    );
                }
            }
            ScenarioAssertion::ModeReached { mode } => {
                if !report.rounds.iter().any(|r| r.mode == *mode) {
                    bail!("Assertion Failed: sender never entered {}", mode);
                }
            }
        }
    }
    Ok(())
}
