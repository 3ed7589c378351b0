//! Interactive 2-D orbit viewer
//!
//! Plays a scenario step by step and draws the x-y projection of every
//! body with its recent trail. Scenario files are watched and reloaded
//! when they change on disk.

use crate::scenario::{Preset, ScenarioConfig};
use eframe::egui;
use log::{info, warn};
use notify::{Event, RecommendedWatcher, Watcher};
use orbitsim_core::constants::{AU, SECONDS_PER_DAY};
use orbitsim_core::Simulation;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

const PALETTE: [egui::Color32; 8] = [
    egui::Color32::from_rgb(255, 215, 0),
    egui::Color32::from_rgb(65, 105, 225),
    egui::Color32::from_rgb(192, 192, 192),
    egui::Color32::from_rgb(205, 92, 92),
    egui::Color32::from_rgb(210, 105, 30),
    egui::Color32::from_rgb(244, 164, 96),
    egui::Color32::from_rgb(79, 208, 231),
    egui::Color32::from_rgb(135, 206, 235),
];

/// Where the viewer gets its initial conditions from
#[derive(Debug, Clone)]
pub enum ScenarioSource {
    File(PathBuf),
    Preset(Preset),
}

impl ScenarioSource {
    fn load(&self) -> anyhow::Result<ScenarioConfig> {
        match self {
            Self::File(path) => ScenarioConfig::load(path),
            Self::Preset(preset) => Ok(preset.scenario()),
        }
    }
}

pub struct ViewerApp {
    source: ScenarioSource,
    scenario_name: String,
    sim: Option<Simulation>,
    last_error: Option<String>,
    playing: bool,
    steps_per_frame: usize,
    trail_length: usize,
    /// World extent (m) mapped onto the shorter side of the canvas
    view_extent: f64,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: Option<mpsc::Receiver<notify::Result<Event>>>,
}

impl ViewerApp {
    pub fn new(source: ScenarioSource, _cc: &eframe::CreationContext<'_>) -> Self {
        let (file_watcher, file_receiver) = match &source {
            ScenarioSource::File(path) => watch(path),
            ScenarioSource::Preset(_) => (None, None),
        };

        let mut app = Self {
            source,
            scenario_name: String::new(),
            sim: None,
            last_error: None,
            playing: false,
            steps_per_frame: 24,
            trail_length: 2000,
            view_extent: 2.0 * AU,
            file_watcher,
            file_receiver,
        };

        app.reload();
        app
    }

    fn reload(&mut self) {
        let built = self.source.load().and_then(|scenario| {
            let sim = scenario.build_simulation()?;
            Ok((scenario.name, sim))
        });

        match built {
            Ok((name, sim)) => {
                self.view_extent = initial_extent(&sim);
                info!("Loaded '{}' with {} bodies", name, sim.body_count());
                self.scenario_name = name;
                self.sim = Some(sim);
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(format!("{:#}", e));
                self.sim = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        if let (Some(receiver), ScenarioSource::File(path)) = (&self.file_receiver, &self.source) {
            while let Ok(event) = receiver.try_recv() {
                match event {
                    Ok(Event {
                        kind: notify::EventKind::Modify(_),
                        paths,
                        ..
                    }) => {
                        if paths.iter().any(|p| p.ends_with(path)) {
                            needs_reload = true;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("File watcher error: {}", e),
                }
            }
        }

        if needs_reload {
            self.reload();
            self.playing = false;
        }
    }

    fn advance(&mut self) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        for _ in 0..self.steps_per_frame {
            if let Err(e) = sim.step() {
                // The simulation keeps its last good state; stop and report
                self.last_error = Some(e.to_string());
                self.playing = false;
                break;
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                .clicked()
            {
                self.playing = !self.playing;
            }

            if ui.button("⏮ Reset").clicked() {
                self.reload();
                self.playing = false;
            }

            if ui.button("⏭ Step").clicked() {
                if let Some(sim) = self.sim.as_mut() {
                    if let Err(e) = sim.step() {
                        self.last_error = Some(e.to_string());
                    }
                }
            }

            ui.separator();
            ui.label("Steps/frame:");
            ui.add(egui::Slider::new(&mut self.steps_per_frame, 1..=500).logarithmic(true));

            ui.label("Trail:");
            ui.add(egui::Slider::new(&mut self.trail_length, 10..=20_000).logarithmic(true));

            ui.separator();
            if ui.button("Zoom In").clicked() {
                self.view_extent *= 0.8;
            }
            if ui.button("Zoom Out").clicked() {
                self.view_extent *= 1.25;
            }
        });

        if let Some(sim) = &self.sim {
            let d = &sim.latest().diagnostics;
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{}  t = {:.1} days  step {}",
                    self.scenario_name,
                    sim.time() / SECONDS_PER_DAY,
                    sim.step_count()
                ));
                ui.separator();
                ui.label(format!("E = {:.4e} J", d.total));
                ui.label(format!("drift = {:.2e}", sim.energy_drift()));
                ui.label(format!("|L| = {:.4e}", d.angular_momentum_magnitude()));
            });
        }
    }

    fn draw(&self, ui: &mut egui::Ui) {
        let Some(sim) = &self.sim else {
            return;
        };
        let rect = ui.max_rect();
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

        let center = rect.center();
        let scale = (rect.width().min(rect.height()) as f64 / (2.0 * self.view_extent)) * 0.9;
        let to_screen = |x: f64, y: f64| {
            center + egui::vec2((x * scale) as f32, (-y * scale) as f32)
        };

        let history = sim.history();
        let start = history.len().saturating_sub(self.trail_length);
        // Thin the trail so long histories stay cheap to draw
        let stride = ((history.len() - start) / 1000).max(1);

        for (i, body) in sim.bodies().iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];

            let trail: Vec<egui::Pos2> = history[start..]
                .iter()
                .step_by(stride)
                .map(|s| {
                    let p = s.bodies[i].position;
                    to_screen(p.x, p.y)
                })
                .collect();
            if trail.len() > 1 {
                painter.add(egui::Shape::line(
                    trail,
                    egui::Stroke::new(1.0, color.gamma_multiply(0.5)),
                ));
            }

            let p = body.position();
            let screen_pos = to_screen(p.x, p.y);
            // Radius grows with the logarithm of mass, within reasonable bounds
            let radius = (body.mass().log10() as f32 - 20.0).clamp(3.0, 12.0);
            painter.circle_filled(screen_pos, radius, color);

            painter.text(
                screen_pos + egui::vec2(0.0, radius + 4.0),
                egui::Align2::CENTER_TOP,
                body.name(),
                egui::FontId::default(),
                egui::Color32::WHITE,
            );
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        if let Some(error) = &self.last_error {
            let error = error.clone();
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(
                    egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                );
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw(ui);
        });

        if self.playing {
            self.advance();
            ctx.request_repaint();
        }
    }
}

/// Open the viewer window and block until it is closed
pub fn run_viewer(source: ScenarioSource) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 850.0]),
        ..Default::default()
    };

    eframe::run_native(
        "orbitsim",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(source, cc)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}

fn watch(
    path: &Path,
) -> (
    Option<RecommendedWatcher>,
    Option<mpsc::Receiver<notify::Result<Event>>>,
) {
    let (tx, rx) = mpsc::channel();
    let watcher = notify::recommended_watcher(move |res| {
        // The receiver is gone once the window closes
        let _ = tx.send(res);
    });

    match watcher {
        Ok(mut w) => match w.watch(path, notify::RecursiveMode::NonRecursive) {
            Ok(()) => (Some(w), Some(rx)),
            Err(e) => {
                warn!("Not watching {}: {}", path.display(), e);
                (None, None)
            }
        },
        Err(e) => {
            warn!("File watching unavailable: {}", e);
            (None, None)
        }
    }
}

/// 1.2 times the largest planar coordinate of the starting positions
fn initial_extent(sim: &Simulation) -> f64 {
    let max_coord = sim
        .bodies()
        .iter()
        .map(|b| b.position().x.abs().max(b.position().y.abs()))
        .fold(0.0, f64::max);
    if max_coord > 0.0 {
        max_coord * 1.2
    } else {
        AU
    }
}
