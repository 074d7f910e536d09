//! AI Security Monitor - Main Entry Point
//!
//! Usage: `ai-security-monitor [rules|anomaly]` (default: rules)

use std::process::ExitCode;

use ai_security_monitor::constants::{APP_NAME, APP_VERSION};
use ai_security_monitor::logic::alert::advice_for;
use ai_security_monitor::logic::config::MonitorConfig;
use ai_security_monitor::logic::events::RandomEventSource;
use ai_security_monitor::logic::monitor::Monitor;
use ai_security_monitor::logic::scoring::{
    AnomalyScorer, GaussianOutlierScorer, TrafficSimulator,
};
use ai_security_monitor::MonitorResult;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let mode = std::env::args().nth(1).unwrap_or_else(|| "rules".to_string());
    let config = MonitorConfig::from_env();

    let result = match mode.as_str() {
        "rules" => run_rules(config),
        "anomaly" => {
            run_anomaly(&config);
            Ok(())
        }
        other => {
            eprintln!("Unknown mode '{}'. Usage: ai-security-monitor [rules|anomaly]", other);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sliding-window rules over simulated events
fn run_rules(config: MonitorConfig) -> MonitorResult<()> {
    let mut source = RandomEventSource::new(config.seed);
    let mut monitor = Monitor::from_config(config)?;

    let report = monitor.run(&mut source, |outcome| {
        println!("{}", outcome.status_line());
    });

    println!();
    println!("Status: {} (severity {}%)", report.final_result.attack_type, report.final_result.severity);
    println!("{}", advice_for(report.final_result.attack_type));
    println!();
    println!("Classifications this run:");
    for (kind, count) in report.kind_counts.iter().filter(|(_, n)| *n > 0) {
        println!("  {:<26} {}", kind.display_name(), count);
    }

    let stats = monitor.finish();
    println!(
        "Alerts: {} fired, {} dropped, {} delivered, {} failed deliveries",
        report.alerts_fired, stats.dropped, stats.delivered, stats.failed
    );
    Ok(())
}

/// Outlier scorer over simulated traffic readings
fn run_anomaly(config: &MonitorConfig) {
    let scorer = GaussianOutlierScorer::pretrained();
    let mut simulator = TrafficSimulator::new(config.seed);
    log::info!("Anomaly scorer ready (threshold {:.2})", scorer.threshold());

    for i in 0..config.tick_count {
        let sample = simulator.next_sample();
        let verdict = scorer.score(&sample);

        println!(
            "#{:<3} traffic {:>3}  failed logins {:>2}  cpu {:>2}%  -> {} (risk {})",
            i + 1,
            sample.traffic,
            sample.failed_logins,
            sample.cpu,
            verdict.kind,
            verdict.risk
        );
        println!("     {}", advice_for(verdict.kind));

        if config.tick_interval_ms > 0 && i + 1 < config.tick_count {
            std::thread::sleep(std::time::Duration::from_millis(config.tick_interval_ms));
        }
    }
}
