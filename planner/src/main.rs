use anyhow::Context;
use clap::Parser;
use generator::profile::{build_plan_payload, default_scenario_table};
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::DashboardModel;
use mixcore::math::StatsHelper;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Media-mix planning workflow driver")]
struct Args {
    /// Run the seed plan once and emit a baseline summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 36)]
    weeks: usize,
    #[arg(long, default_value_t = 2)]
    shift_weeks: usize,
    #[arg(long, default_value_t = 0.05)]
    scale_span: f64,
    #[arg(long, default_value_t = 0.65)]
    baseline: f64,
    /// Keep the GUI bridge alive for dashboard polling and plan edits
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.weeks, args.shift_weeks, args.scale_span, args.baseline)
    };
    log::info!(
        "planning horizon {} weeks, lag {} weeks, band [{}, {}]",
        workflow_config.weeks,
        workflow_config.shift_weeks,
        workflow_config.baseline,
        workflow_config.baseline + workflow_config.scale_span
    );

    let runner = Runner::new(workflow_config.clone());
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));
    let payload = build_plan_payload(workflow_config.weeks);

    let result = runner.execute(&payload)?;
    let forecasts = runner.forecast(&default_scenario_table());

    let model = DashboardModel {
        weekly_totals: result.weekly_totals.clone(),
        spend_rows: result.spend_rows.clone(),
        contribution: result.contribution.clone(),
        budget_shares: result.budget_shares.clone(),
        forecasts: forecasts.clone(),
        notes: result.notes.clone(),
        metadata: payload.metadata.clone(),
        recomputes: 0,
    };
    gui_bridge.publish(&model)?;

    if args.offline {
        gui_bridge.publish_status("Offline plan results ready.");

        let (low, high) = StatsHelper::min_max(&result.contribution)
            .unwrap_or((workflow_config.baseline, workflow_config.baseline));
        println!(
            "Offline run -> channels {}, weeks {}, contribution band [{:.3}, {:.3}]",
            result.spend_rows.len(),
            result.weekly_totals.len(),
            low,
            high
        );
        let forecast_summary = forecasts
            .iter()
            .map(|forecast| format!("{}={:.0}", forecast.scenario, forecast.outcome))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Scenario forecasts -> {}", forecast_summary);

        let report = format!(
            "channels={} weeks={} band=[{:.3}, {:.3}] forecasts=[{}]\n",
            result.spend_rows.len(),
            result.weekly_totals.len(),
            low,
            high,
            forecast_summary
        );
        let report_path = PathBuf::from("tools/data/offline_plan.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
