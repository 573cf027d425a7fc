//! `timer` — on-screen countdown with a background table query
//!
//! Opens one native window showing the remaining time. SPACE pauses and
//! resumes, R resets, Q or Escape leaves the countdown. While the countdown
//! runs, a background task snapshots the demo table once; when the countdown
//! view ends the same window switches to a results view showing the table
//! (or the error, or that the query has not finished). The task is abandoned,
//! not cancelled, if the user quits early.

use std::io::Write;
use std::time::{Duration, Instant};

use egui::{Color32, Key, RichText};
use log::info;
use tokio::sync::oneshot;

use crate::config::ConnectionConfig;
use crate::db::{self, ID_COLUMN, TABLE};
use crate::error::{Result, TableroError};
use crate::timer::{Countdown, FetchOutcome, Phase};

const WINDOW_TITLE: &str = "tablero countdown";
const CONTROLS: &str = "Controls: SPACE=pause/resume  |  R=reset  |  Q/ESC=quit";

pub async fn run(config: &ConnectionConfig, total_seconds: u64) -> Result<()> {
    let (tx, rx) = oneshot::channel();
    let worker_config = config.clone();
    tokio::spawn(async move {
        let outcome = match db::fetch_table(&worker_config, TABLE, ID_COLUMN).await {
            Ok(dump) => FetchOutcome::Table(dump),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        };
        // The receiver may be gone if the window closed first; the outcome
        // is simply discarded then.
        let _ = tx.send(outcome);
    });

    info!("starting countdown of {total_seconds}s; control it in the window");

    let app = TimerApp::new(Duration::from_secs(total_seconds), rx);
    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(960.0, 420.0)),
        ..Default::default()
    };
    eframe::run_native(WINDOW_TITLE, options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| TableroError::Gui(e.to_string()))?;

    info!("countdown window closed");
    Ok(())
}

/// Exit codes: 0 clean, 2 configuration, 3 anything else
#[must_use]
pub fn exit_code(err: &TableroError) -> i32 {
    match err {
        TableroError::Config(_) => 2,
        _ => 3,
    }
}

enum View {
    Countdown,
    Results(Vec<String>),
}

struct TimerApp {
    countdown: Countdown,
    view: View,
    slot: Option<oneshot::Receiver<FetchOutcome>>,
    bell_rung: bool,
}

impl TimerApp {
    fn new(total: Duration, slot: oneshot::Receiver<FetchOutcome>) -> Self {
        Self {
            countdown: Countdown::new(total, Instant::now()),
            view: View::Countdown,
            slot: Some(slot),
            bell_rung: false,
        }
    }

    /// Poll the hand-off once and render whatever is (or is not) there
    fn take_result_lines(&mut self) -> Vec<String> {
        let Some(mut slot) = self.slot.take() else {
            return vec!["result already consumed".to_string()];
        };
        match slot.try_recv() {
            Ok(FetchOutcome::Table(dump)) => {
                let header = dump.columns.join(" | ");
                let mut lines = vec![header.clone(), "-".repeat(header.len())];
                lines.extend(dump.rows.iter().map(|row| row.join(" | ")));
                lines
            }
            Ok(FetchOutcome::Failed(message)) => {
                vec![format!("error fetching data: {message}")]
            }
            Err(_) => vec!["the background query has not produced a result yet".to_string()],
        }
    }

    fn countdown_view(&mut self, ctx: &egui::Context) {
        let now = Instant::now();

        if ctx.input(|i| i.key_pressed(Key::Space)) {
            self.countdown.toggle_pause(now);
        }
        if ctx.input(|i| i.key_pressed(Key::R)) {
            self.countdown.reset(now);
            self.bell_rung = false;
        }
        let quit = ctx.input(|i| i.key_pressed(Key::Q) || i.key_pressed(Key::Escape));

        if self.countdown.tick(now) && !self.bell_rung {
            bell();
            self.bell_rung = true;
        }

        if quit {
            self.view = View::Results(self.take_result_lines());
            return;
        }

        let status = match self.countdown.phase() {
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Finished => "time is up",
        };
        let digits = self.countdown.display();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(RichText::new("Time remaining (MM:SS)").size(22.0));
                ui.add_space(40.0);
                ui.label(
                    RichText::new(digits)
                        .size(140.0)
                        .monospace()
                        .color(Color32::WHITE),
                );
                ui.add_space(40.0);
                ui.label(RichText::new(format!("Status -> {status}")).size(20.0));
                ui.add_space(20.0);
                ui.label(RichText::new(CONTROLS).size(16.0));
            });
        });
    }

    fn results_view(&self, ctx: &egui::Context, frame: &mut eframe::Frame, lines: &[String]) {
        if ctx.input(|i| i.key_pressed(Key::Q) || i.key_pressed(Key::Escape)) {
            frame.close();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(RichText::new("Query executed in parallel with the countdown").size(18.0));
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for line in lines {
                    ui.monospace(line.as_str());
                }
            });
        });
    }
}

impl eframe::App for TimerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if matches!(self.view, View::Countdown) {
            self.countdown_view(ctx);
        } else if let View::Results(lines) = &self.view {
            self.results_view(ctx, frame, lines);
        }
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// One-shot terminal bell; failures are deliberately ignored
fn bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&TableroError::config("no password")), 2);
        assert_eq!(exit_code(&TableroError::Gui("no display".into())), 3);
    }
}
