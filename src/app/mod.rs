use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use bubble_timeline::chart::{ChartConfig, QuadtreeCell, Simulation, TimeScale};
use bubble_timeline::data::{Record, Source};

mod canvas;
mod render_utils;
mod subjects;
mod ui;

use subjects::SubjectLog;

pub struct BubbleChartApp {
    source: Source,
    config: ChartConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<Vec<Record>, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<Record>, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    records: Vec<Record>,
    config: ChartConfig,
    live_simulation: bool,
    show_quadtree_overlay: bool,
    search: String,
    layout_dirty: bool,
    layout_revision: u64,
    canvas: Option<ChartCanvas>,
    search_match_cache: Option<SearchMatchCache>,
    pressed: Option<usize>,
    subjects: SubjectLog,
}

/// Laid-out chart for one canvas size and config.
struct ChartCanvas {
    simulation: Simulation,
    time_scale: Option<TimeScale>,
    size: Vec2,
    labels: Option<Vec<String>>,
    quadtree_cells: Vec<QuadtreeCell>,
}

struct SearchMatchCache {
    query: String,
    layout_revision: u64,
    matches: Arc<HashSet<usize>>,
}

impl BubbleChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: Source, config: ChartConfig) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: Source) -> Receiver<Result<Vec<Record>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = source.load().map_err(|error| {
                tracing::error!("{error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: Source) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for BubbleChartApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(records) => {
                            AppState::Ready(Box::new(ViewModel::new(records, self.config)))
                        }
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading records...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load chart records");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(records) => {
                                    AppState::Ready(Box::new(ViewModel::new(records, model.config)))
                                }
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
