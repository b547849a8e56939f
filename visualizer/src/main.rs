use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        checkbox, column, row, scrollable, text, text_input, Column, Container, Row,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task, Theme,
};
use mixcore::plan::{
    BudgetShare, ChannelParams, ChannelSpend, FlightingMatrix, MediaAllocation, MediaType,
    PlanMetadata, PlanPayload, ScenarioAllocation, ScenarioForecast, ScenarioTable,
};
use serde::Deserialize;
use std::{f32::consts::PI, time::Duration};

const WEEKS: usize = 36;

fn main() -> iced::Result {
    iced::application(Dashboard::boot, Dashboard::update, Dashboard::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Dashboard) -> String {
    "Media Mix Planner".into()
}

fn application_subscription(_: &Dashboard) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Dashboard) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Dashboard {
    channels: Vec<ChannelRow>,
    flighting: Vec<Vec<bool>>,
    scenarios: Vec<ScenarioColumn>,
    payload: Option<DashboardPayload>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<DashboardPayload, String>),
    ChannelFieldChanged(usize, ChannelField, String),
    FlightToggled {
        channel: usize,
        week: usize,
        active: bool,
    },
    SubmitPlan,
    PlanSubmitted(Result<String, String>),
    ScenarioSpendChanged {
        scenario: usize,
        media: usize,
        value: String,
    },
    SubmitScenarios,
    ScenariosSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum ChannelField {
    Budget,
    Effectiveness,
    AwarenessWeight,
}

impl Dashboard {
    fn boot() -> (Self, Task<Message>) {
        let channels = ChannelParams::default_set()
            .iter()
            .map(ChannelRow::from_params)
            .collect();
        let flighting = FlightingMatrix::baseline(WEEKS)
            .rows
            .iter()
            .map(|cells| cells.iter().map(|&flag| flag > 0).collect())
            .collect();
        let scenarios = ScenarioTable::default_set()
            .scenarios
            .iter()
            .map(ScenarioColumn::from_allocation)
            .collect();

        (
            Dashboard {
                channels,
                flighting,
                scenarios,
                payload: None,
                status: "Waiting for plan results...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_dashboard(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_dashboard(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                let previous = state
                    .payload
                    .as_ref()
                    .map(|p| p.recomputes)
                    .unwrap_or_default();
                if payload.recomputes != previous {
                    state.push_history(format!("Plan recompute #{} received", payload.recomputes));
                }
                state.status = format!(
                    "Plan results: {} weeks / recompute #{}",
                    payload.contribution.len(),
                    payload.recomputes
                );
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Dashboard error: {err}");
                Task::none()
            }
            Message::ChannelFieldChanged(idx, field, value) => {
                if let Some(channel) = state.channels.get_mut(idx) {
                    channel.update_field(field, value);
                }
                Task::none()
            }
            Message::FlightToggled {
                channel,
                week,
                active,
            } => {
                if let Some(cell) = state
                    .flighting
                    .get_mut(channel)
                    .and_then(|cells| cells.get_mut(week))
                {
                    *cell = active;
                }
                state.submit_plan()
            }
            Message::SubmitPlan => state.submit_plan(),
            Message::PlanSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Plan submitted".into());
                Task::none()
            }
            Message::PlanSubmitted(Err(err)) => {
                state.status = format!("Plan error: {err}");
                Task::none()
            }
            Message::ScenarioSpendChanged {
                scenario,
                media,
                value,
            } => {
                if let Some(cell) = state
                    .scenarios
                    .get_mut(scenario)
                    .and_then(|column| column.spends.get_mut(media))
                {
                    *cell = value;
                }
                Task::none()
            }
            Message::SubmitScenarios => match state.build_scenario_table() {
                Ok(table) => Task::perform(post_scenarios(table), Message::ScenariosSubmitted),
                Err(err) => {
                    state.status = format!("Scenario error: {err}");
                    Task::none()
                }
            },
            Message::ScenariosSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Scenarios submitted".into());
                Task::none()
            }
            Message::ScenariosSubmitted(Err(err)) => {
                state.status = format!("Scenario error: {err}");
                Task::none()
            }
        }
    }

    fn submit_plan(&mut self) -> Task<Message> {
        match self.build_payload() {
            Ok(payload) => Task::perform(post_plan(payload), Message::PlanSubmitted),
            Err(err) => {
                self.status = format!("Plan error: {err}");
                Task::none()
            }
        }
    }

    fn build_payload(&self) -> Result<PlanPayload, String> {
        let channels = self
            .channels
            .iter()
            .map(ChannelRow::to_params)
            .collect::<Result<Vec<_>, _>>()?;
        let rows = self
            .flighting
            .iter()
            .map(|cells| cells.iter().map(|&active| u8::from(active)).collect())
            .collect();
        Ok(PlanPayload::with_metadata(
            channels,
            FlightingMatrix::new(WEEKS, rows),
            PlanMetadata {
                name: "Interactive session".into(),
                currency: "USD".into(),
                description: None,
                owner: None,
            },
        ))
    }

    fn build_scenario_table(&self) -> Result<ScenarioTable, String> {
        let scenarios = self
            .scenarios
            .iter()
            .map(ScenarioColumn::to_allocation)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScenarioTable { scenarios })
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let spend_rows = state
            .payload
            .as_ref()
            .map(|payload| payload.spend_rows.clone())
            .unwrap_or_default();
        let contribution = state
            .payload
            .as_ref()
            .map(|payload| payload.contribution.clone())
            .unwrap_or_default();
        let budget_shares = state
            .payload
            .as_ref()
            .map(|payload| payload.budget_shares.clone())
            .unwrap_or_default();
        let forecasts = state
            .payload
            .as_ref()
            .map(|payload| payload.forecasts.clone())
            .unwrap_or_default();
        let notes = state
            .payload
            .as_ref()
            .map(|payload| payload.notes.clone())
            .unwrap_or_default();

        let param_header = row![
            text("Channel").size(14).width(Length::Fixed(110.0)),
            text("Budget").size(14).width(Length::Fixed(120.0)),
            text("Eff.").size(14).width(Length::Fixed(80.0)),
            text("Weight").size(14).width(Length::Fixed(80.0)),
        ]
        .spacing(6);

        let param_grid = state.channels.iter().enumerate().fold(
            Column::new().spacing(6).push(param_header),
            |col, (idx, channel)| {
                col.push(
                    row![
                        text(channel.name.clone())
                            .size(14)
                            .width(Length::Fixed(110.0)),
                        text_input("Budget", &channel.budget)
                            .on_input(move |value| {
                                Message::ChannelFieldChanged(idx, ChannelField::Budget, value)
                            })
                            .padding(4)
                            .width(Length::Fixed(120.0)),
                        text_input("Effectiveness", &channel.effectiveness)
                            .on_input(move |value| {
                                Message::ChannelFieldChanged(
                                    idx,
                                    ChannelField::Effectiveness,
                                    value,
                                )
                            })
                            .padding(4)
                            .width(Length::Fixed(80.0)),
                        text_input("Weight", &channel.awareness_weight)
                            .on_input(move |value| {
                                Message::ChannelFieldChanged(
                                    idx,
                                    ChannelField::AwarenessWeight,
                                    value,
                                )
                            })
                            .padding(4)
                            .width(Length::Fixed(80.0)),
                    ]
                    .spacing(6)
                    .align_y(Alignment::Center),
                )
            },
        );

        let budget_pie = Canvas::new(SharePie::from_shares(&budget_shares))
            .width(Length::Fixed(220.0))
            .height(Length::Fixed(200.0));

        let pie_legend = budget_shares.iter().enumerate().fold(
            Column::new().spacing(2),
            |col, (idx, share)| {
                col.push(
                    text(format!("■ {} {:.0}%", share.channel, share.share * 100.0))
                        .size(12)
                        .color(series_color(idx)),
                )
            },
        );

        let flighting_grid = state.flighting.iter().enumerate().fold(
            Column::new().spacing(2),
            |col, (channel_idx, cells)| {
                let label = state
                    .channels
                    .get(channel_idx)
                    .map(|channel| channel.name.clone())
                    .unwrap_or_default();
                let boxes = cells.iter().enumerate().fold(
                    Row::new().spacing(1),
                    |checks, (week, &active)| {
                        checks.push(checkbox(active).size(12).spacing(0).on_toggle(
                            move |toggled| Message::FlightToggled {
                                channel: channel_idx,
                                week,
                                active: toggled,
                            },
                        ))
                    },
                );
                col.push(
                    row![
                        text(label).size(12).width(Length::Fixed(90.0)),
                        boxes
                    ]
                    .spacing(4)
                    .align_y(Alignment::Center),
                )
            },
        );

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let plan_column = column![
            text("Scenario Modeling: Awareness").size(26),
            param_grid,
            button("Apply parameters")
                .on_press(Message::SubmitPlan)
                .padding(10),
            text("Budget mix").size(16),
            row![budget_pie, pie_legend].spacing(10).align_y(Alignment::Center),
            text("Flighting (checked weeks are active)").size(16),
            flighting_grid,
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Budget: planned spend for the channel across the horizon.").size(12),
                text("Effectiveness: relative impact per dollar, 0 to 1.").size(12),
                text("Awareness Weight: share of impact that builds awareness, 0 to 1.").size(12),
                text("Flighting: dark weeks spend nothing and add no awareness.").size(12),
            ]
            .spacing(4)
            .padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(620.0));

        let plan_info = if let Some(payload) = &state.payload {
            let name = payload
                .metadata
                .as_ref()
                .map(|meta| meta.name.clone())
                .unwrap_or_else(|| "unnamed plan".into());
            let total_spend: f64 = payload.weekly_totals.iter().sum();
            text(format!(
                "Plan: {} / {} weeks / total spend {:.0} / recompute #{}",
                name,
                payload.weekly_totals.len(),
                total_spend,
                payload.recomputes
            ))
            .size(18)
        } else {
            text("Plan results: n/a").size(18)
        };

        let spend_chart = Canvas::new(SpendChart {
            rows: spend_rows.iter().map(|r| r.weekly.clone()).collect(),
            contribution: contribution.clone(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(300.0));

        let chart_legend = spend_rows
            .iter()
            .enumerate()
            .fold(Row::new().spacing(12), |legend, (idx, spend)| {
                legend.push(
                    text(format!("■ {}", spend.channel))
                        .size(12)
                        .color(series_color(idx)),
                )
            })
            .push(text("— Awareness").size(12).color(CONTRIBUTION_COLOR));

        let scenario_header = state.scenarios.iter().fold(
            Row::new()
                .spacing(6)
                .push(text("Media").size(14).width(Length::Fixed(140.0))),
            |header, scenario| {
                header.push(text(scenario.name.clone()).size(14).width(Length::Fixed(90.0)))
            },
        );

        let scenario_grid = MediaType::ALL.iter().enumerate().fold(
            Column::new().spacing(6).push(scenario_header),
            |col, (media_idx, media)| {
                let cells = state.scenarios.iter().enumerate().fold(
                    Row::new().spacing(6).push(
                        text(media.label()).size(14).width(Length::Fixed(140.0)),
                    ),
                    |cells, (scenario_idx, scenario)| {
                        let value = scenario
                            .spends
                            .get(media_idx)
                            .map(String::as_str)
                            .unwrap_or("");
                        cells.push(
                            text_input("Spend", value)
                                .on_input(move |value| Message::ScenarioSpendChanged {
                                    scenario: scenario_idx,
                                    media: media_idx,
                                    value,
                                })
                                .padding(4)
                                .width(Length::Fixed(90.0)),
                        )
                    },
                );
                col.push(cells.align_y(Alignment::Center))
            },
        );

        let forecast_table = if forecasts.is_empty() {
            Column::new().push(text("No forecasts yet").size(14))
        } else {
            forecasts
                .iter()
                .fold(Column::new().spacing(4), |col, forecast| {
                    col.push(
                        text(format!(
                            "{}: spend {:.0} -> outcome {:.0}",
                            forecast.scenario,
                            forecast
                                .allocations
                                .iter()
                                .map(|a| a.spend)
                                .sum::<f64>(),
                            forecast.outcome
                        ))
                        .size(14),
                    )
                })
        };

        let scenario_pies = forecasts
            .iter()
            .fold(Row::new().spacing(12), |pies, forecast| {
                pies.push(
                    column![
                        text(forecast.scenario.clone()).size(14),
                        Canvas::new(SharePie::from_allocations(&forecast.allocations))
                            .width(Length::Fixed(160.0))
                            .height(Length::Fixed(160.0)),
                    ]
                    .spacing(4)
                    .align_x(Alignment::Center),
                )
            });

        let forecast_bars = Canvas::new(ForecastBars {
            outcomes: forecasts.iter().map(|f| f.outcome).collect(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(180.0));

        let bars_legend = forecasts
            .iter()
            .enumerate()
            .fold(Row::new().spacing(12), |legend, (idx, forecast)| {
                legend.push(
                    text(format!("■ {} {:.0}", forecast.scenario, forecast.outcome))
                        .size(12)
                        .color(series_color(idx)),
                )
            });

        let notes_list = if notes.is_empty() {
            Column::new().push(text("No notes yet").size(12))
        } else {
            notes
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, note| {
                    col.push(text(note.clone()).size(12))
                })
        };

        let forecast_column = column![
            text("Awareness Forecast").size(26),
            plan_info,
            text("Weekly spend with awareness overlay").size(16),
            spend_chart,
            chart_legend,
            text("Model notes").size(16),
            Container::new(notes_list).padding(6),
            text("Spend Scenarios").size(20),
            scenario_grid,
            button("Apply scenarios")
                .on_press(Message::SubmitScenarios)
                .padding(10),
            text("Forecasted outcomes").size(16),
            Container::new(forecast_table).padding(6),
            text("Scenario spend mix").size(16),
            scenario_pies,
            text("Scenario comparison").size(16),
            forecast_bars,
            bars_legend,
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![plan_column, forecast_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(scrollable(layout))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_dashboard() -> Result<DashboardPayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/dashboard")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<DashboardPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_plan(payload: PlanPayload) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/plan")
        .json(&payload)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Plan submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

async fn post_scenarios(table: ScenarioTable) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/scenarios")
        .json(&table)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Scenarios submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct ChannelRow {
    name: String,
    budget: String,
    effectiveness: String,
    awareness_weight: String,
}

impl ChannelRow {
    fn from_params(params: &ChannelParams) -> Self {
        Self {
            name: params.name.clone(),
            budget: format!("{}", params.budget),
            effectiveness: format!("{}", params.effectiveness),
            awareness_weight: format!("{}", params.awareness_weight),
        }
    }

    fn update_field(&mut self, field: ChannelField, value: String) {
        match field {
            ChannelField::Budget => self.budget = value,
            ChannelField::Effectiveness => self.effectiveness = value,
            ChannelField::AwarenessWeight => self.awareness_weight = value,
        }
    }

    fn to_params(&self) -> Result<ChannelParams, String> {
        let budget = self
            .budget
            .trim()
            .parse()
            .map_err(|_| format!("{} budget is not a number", self.name))?;
        let effectiveness = self
            .effectiveness
            .trim()
            .parse()
            .map_err(|_| format!("{} effectiveness is not a number", self.name))?;
        let awareness_weight = self
            .awareness_weight
            .trim()
            .parse()
            .map_err(|_| format!("{} awareness weight is not a number", self.name))?;
        Ok(ChannelParams::new(
            &self.name,
            budget,
            effectiveness,
            awareness_weight,
        ))
    }
}

#[derive(Debug, Clone)]
struct ScenarioColumn {
    name: String,
    spends: Vec<String>,
}

impl ScenarioColumn {
    fn from_allocation(scenario: &ScenarioAllocation) -> Self {
        Self {
            name: scenario.name.clone(),
            spends: scenario
                .allocations
                .iter()
                .map(|allocation| format!("{}", allocation.spend))
                .collect(),
        }
    }

    fn to_allocation(&self) -> Result<ScenarioAllocation, String> {
        let allocations = MediaType::ALL
            .iter()
            .zip(&self.spends)
            .map(|(media, value)| {
                value
                    .trim()
                    .parse()
                    .map(|spend| MediaAllocation {
                        media: *media,
                        spend,
                    })
                    .map_err(|_| format!("{} {} spend is not a number", self.name, media.label()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScenarioAllocation {
            name: self.name.clone(),
            allocations,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DashboardPayload {
    #[serde(default)]
    weekly_totals: Vec<f64>,
    #[serde(default)]
    spend_rows: Vec<ChannelSpend>,
    #[serde(default)]
    contribution: Vec<f64>,
    #[serde(default)]
    budget_shares: Vec<BudgetShare>,
    #[serde(default)]
    forecasts: Vec<ScenarioForecast>,
    #[serde(default)]
    notes: Vec<String>,
    #[serde(default)]
    metadata: Option<PlanMetadata>,
    #[serde(default)]
    recomputes: usize,
}

const CONTRIBUTION_COLOR: Color = Color {
    r: 0.9,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

fn series_color(idx: usize) -> Color {
    const PALETTE: [(f32, f32, f32); 6] = [
        (0.86, 0.37, 0.34),
        (0.73, 0.86, 0.34),
        (0.35, 0.86, 0.56),
        (0.34, 0.64, 0.86),
        (0.62, 0.34, 0.86),
        (0.86, 0.34, 0.74),
    ];
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    Color::from_rgb(r, g, b)
}

/// Stacked weekly spend bars with the awareness series overlaid on a
/// secondary 0.5..0.9 axis.
#[derive(Clone)]
struct SpendChart {
    rows: Vec<Vec<f64>>,
    contribution: Vec<f64>,
}

impl canvas::Program<Message> for SpendChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let weeks = self
            .rows
            .first()
            .map(Vec::len)
            .unwrap_or(self.contribution.len());
        if weeks == 0 {
            return vec![frame.into_geometry()];
        }

        let slot = bounds.width / weeks as f32;
        let bar_width = slot * 0.8;

        let mut week_totals = vec![0.0_f64; weeks];
        for row in &self.rows {
            for (week, &value) in row.iter().enumerate().take(weeks) {
                week_totals[week] += value;
            }
        }
        let max_total = week_totals.iter().cloned().fold(0.0_f64, f64::max).max(1.0);

        for week in 0..weeks {
            let x = week as f32 * slot + (slot - bar_width) / 2.0;
            let mut stacked = 0.0_f32;
            for (channel_idx, row) in self.rows.iter().enumerate() {
                let value = row.get(week).copied().unwrap_or_default();
                if value <= 0.0 {
                    continue;
                }
                let height = ((value / max_total) as f32) * bounds.height * 0.95;
                stacked += height;
                frame.fill_rectangle(
                    Point::new(x, bounds.height - stacked),
                    Size::new(bar_width, height),
                    series_color(channel_idx),
                );
            }
        }

        if self.contribution.len() > 1 {
            let step = bounds.width / self.contribution.len() as f32;
            let project = |value: f64| -> f32 {
                let normalized = ((value - 0.5) / 0.4).clamp(0.0, 1.0) as f32;
                bounds.height - normalized * bounds.height
            };
            let path = Path::new(|builder| {
                for (i, &value) in self.contribution.iter().enumerate() {
                    let point = Point::new(i as f32 * step + step / 2.0, project(value));
                    if i == 0 {
                        builder.move_to(point);
                    } else {
                        builder.line_to(point);
                    }
                }
            });
            frame.stroke(
                &path,
                Stroke::default().with_width(4.0).with_color(CONTRIBUTION_COLOR),
            );
            for (i, &value) in self.contribution.iter().enumerate() {
                let marker = Path::new(|builder| {
                    builder.circle(
                        Point::new(i as f32 * step + step / 2.0, project(value)),
                        2.5,
                    )
                });
                frame.fill(&marker, CONTRIBUTION_COLOR);
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Donut chart of spend fractions; slices are drawn as segment fans.
#[derive(Clone)]
struct SharePie {
    slices: Vec<(f64, usize)>,
}

impl SharePie {
    fn from_shares(shares: &[BudgetShare]) -> Self {
        Self {
            slices: shares
                .iter()
                .enumerate()
                .filter(|(_, share)| share.share > 0.0)
                .map(|(idx, share)| (share.share, idx))
                .collect(),
        }
    }

    fn from_allocations(allocations: &[MediaAllocation]) -> Self {
        let total: f64 = allocations.iter().map(|a| a.spend).sum();
        if total <= 0.0 {
            return Self { slices: Vec::new() };
        }
        Self {
            slices: allocations
                .iter()
                .enumerate()
                .filter(|(_, allocation)| allocation.spend > 0.0)
                .map(|(idx, allocation)| (allocation.spend / total, idx))
                .collect(),
        }
    }
}

impl canvas::Program<Message> for SharePie {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = bounds.width.min(bounds.height) / 2.0 - 8.0;

        let mut start_angle = -PI / 2.0;
        for &(fraction, color_idx) in &self.slices {
            let sweep = fraction as f32 * 2.0 * PI;
            let steps = ((sweep / 0.1).ceil() as usize).max(2);
            let slice = Path::new(|builder| {
                builder.move_to(center);
                for step in 0..=steps {
                    let angle = start_angle + sweep * (step as f32 / steps as f32);
                    builder.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }
                builder.close();
            });
            frame.fill(&slice, series_color(color_idx));
            start_angle += sweep;
        }

        let hole = Path::new(|builder| builder.circle(center, radius * 0.3));
        frame.fill(&hole, Color::from_rgb(0.05, 0.05, 0.05));

        vec![frame.into_geometry()]
    }
}

/// Grouped outcome bars for the scenario comparison.
#[derive(Clone)]
struct ForecastBars {
    outcomes: Vec<f64>,
}

impl canvas::Program<Message> for ForecastBars {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.outcomes.is_empty() {
            return vec![frame.into_geometry()];
        }

        let max = self.outcomes.iter().cloned().fold(0.0_f64, f64::max).max(1.0);
        let slot = bounds.width / self.outcomes.len() as f32;
        let bar_width = slot * 0.6;

        for (idx, &outcome) in self.outcomes.iter().enumerate() {
            let height = ((outcome / max) as f32) * bounds.height * 0.9;
            let x = idx as f32 * slot + (slot - bar_width) / 2.0;
            frame.fill_rectangle(
                Point::new(x, bounds.height - height),
                Size::new(bar_width, height),
                series_color(idx),
            );
        }

        vec![frame.into_geometry()]
    }
}
