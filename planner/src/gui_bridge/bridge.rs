use crate::gui_bridge::model::DashboardModel;
use crate::workflow::runner::Runner;
use anyhow::Result;
use mixcore::plan::{PlanPayload, ScenarioTable};
use mixcore::telemetry::MetricsRecorder;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Applies an edited plan to the dashboard state. A successful run bumps the
/// recompute count; a structurally invalid payload bumps the rejected count
/// and leaves the dashboard untouched.
fn apply_plan(
    state: &RwLock<DashboardModel>,
    runner: &Runner,
    metrics: &MetricsRecorder,
    payload: &PlanPayload,
) -> Result<usize> {
    match runner.execute(payload) {
        Ok(result) => {
            metrics.record_recompute();
            let (recomputes, _) = metrics.snapshot();
            let mut guard = state.write().unwrap();
            guard.weekly_totals = result.weekly_totals;
            guard.spend_rows = result.spend_rows;
            guard.contribution = result.contribution;
            guard.budget_shares = result.budget_shares;
            guard.notes = result.notes;
            guard.metadata = payload.metadata.clone();
            guard.recomputes = recomputes;
            Ok(recomputes)
        }
        Err(err) => {
            metrics.record_rejected();
            Err(err)
        }
    }
}

/// Bridge that hosts the dashboard HTTP endpoint and recomputes plans as
/// edits arrive.
pub struct GuiBridge {
    state: Arc<RwLock<DashboardModel>>,
    metrics: Arc<MetricsRecorder>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(DashboardModel::default()));
        let metrics = Arc::new(MetricsRecorder::new());
        let state_for_filter = state.clone();
        let metrics_for_filter = metrics.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());
        let metrics_filter = warp::any().map(move || metrics_for_filter.clone());

        let get_route = warp::path("dashboard")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<DashboardModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let plan_route = warp::path("plan")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and(metrics_filter.clone())
            .and_then(
                |payload: PlanPayload,
                 state: Arc<RwLock<DashboardModel>>,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>| async move {
                    match apply_plan(&state, &runner, &metrics, &payload) {
                        Ok(recomputes) => Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "ok",
                                "recomputes": recomputes
                            })),
                            StatusCode::OK,
                        )),
                        Err(err) => {
                            eprintln!("plan error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let scenario_route = warp::path("scenarios")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and(metrics_filter)
            .and_then(
                |table: ScenarioTable,
                 state: Arc<RwLock<DashboardModel>>,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>| async move {
                    let forecasts = runner.forecast(&table);
                    metrics.record_recompute();
                    let (recomputes, _) = metrics.snapshot();
                    let mut guard = state.write().unwrap();
                    guard.forecasts = forecasts;
                    guard.recomputes = recomputes;
                    Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({
                            "status": "ok",
                            "scenarios": guard.forecasts.len()
                        })),
                        StatusCode::OK,
                    ))
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(plan_route).or(scenario_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state, metrics }
    }

    pub fn publish(&self, model: &DashboardModel) -> Result<()> {
        self.metrics.record_recompute();
        let (recomputes, _) = self.metrics.snapshot();
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        guard.recomputes = recomputes;
        println!(
            "[GUI] spend weeks: {}, contribution points: {}, recompute #{}",
            guard.weekly_totals.len(),
            guard.contribution.len(),
            guard.recomputes
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> DashboardModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_plan_payload, default_scenario_table};
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use std::sync::Arc;

    #[test]
    fn gui_bridge_updates_state() {
        let cfg = WorkflowConfig::default();
        let runner = Arc::new(Runner::new(cfg.clone()));
        let gui = GuiBridge::new(runner.clone());
        let payload = build_plan_payload(cfg.weeks);
        let result = runner.execute(&payload).unwrap();
        let model = DashboardModel {
            weekly_totals: result.weekly_totals.clone(),
            spend_rows: result.spend_rows.clone(),
            contribution: result.contribution.clone(),
            budget_shares: result.budget_shares.clone(),
            forecasts: runner.forecast(&default_scenario_table()),
            notes: result.notes.clone(),
            metadata: payload.metadata.clone(),
            recomputes: 0,
        };
        gui.publish(&model).unwrap();
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.weekly_totals.len(), 36);
        assert_eq!(snapshot.forecasts.len(), 3);
        assert_eq!(snapshot.recomputes, 1);
    }

    #[test]
    fn applied_plan_updates_dashboard() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg.clone());
        let metrics = MetricsRecorder::new();
        let state = Arc::new(RwLock::new(DashboardModel::default()));
        let payload = build_plan_payload(cfg.weeks);

        let recomputes = apply_plan(&state, &runner, &metrics, &payload).unwrap();
        assert_eq!(recomputes, 1);
        let guard = state.read().unwrap();
        assert_eq!(guard.weekly_totals.len(), 36);
        assert_eq!(guard.recomputes, 1);
    }

    #[test]
    fn rejected_plan_bumps_rejected_count() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg.clone());
        let metrics = MetricsRecorder::new();
        let state = Arc::new(RwLock::new(DashboardModel::default()));
        let mut payload = build_plan_payload(cfg.weeks);
        payload.flighting.rows.pop();

        assert!(apply_plan(&state, &runner, &metrics, &payload).is_err());
        assert_eq!(metrics.snapshot(), (0, 1));
        assert_eq!(state.read().unwrap().recomputes, 0);
    }
}
