#[cfg(feature = "gui")]
use eframe::egui;

#[cfg(feature = "gui")]
use stepgrid::{
    layout::{self, GridLayout},
    pitch, AudioOutput, Color, Sequencer, SessionConfig,
};

#[cfg(feature = "gui")]
fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sequencer = match Sequencer::new(SessionConfig::default()) {
        Ok(sequencer) => sequencer,
        Err(err) => {
            log::error!("invalid session configuration: {}", err);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("STEPGRID - Step Sequencer"),
        ..Default::default()
    };

    eframe::run_native(
        "STEPGRID",
        options,
        Box::new(|_cc| Ok(Box::new(SequencerApp::new(sequencer)))),
    )
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("This binary requires the 'gui' feature to be enabled");
    std::process::exit(1);
}

#[cfg(feature = "gui")]
struct SequencerApp {
    sequencer: Sequencer,
    audio_output: AudioOutput,
    lowest_note: usize,
}

#[cfg(feature = "gui")]
impl SequencerApp {
    fn new(sequencer: Sequencer) -> Self {
        let (letter, octave) = &sequencer.config().start_note;
        let lowest_note = pitch::position(letter, *octave).unwrap_or(0);

        Self {
            sequencer,
            audio_output: AudioOutput::default(),
            lowest_note,
        }
    }

    fn play(&mut self) {
        match self.sequencer.play(&mut self.audio_output) {
            Ok(n) => log::info!("playing {} note(s)", n),
            Err(err) => log::error!("playback failed: {}", err),
        }
    }

    fn reset(&mut self) {
        self.sequencer.reset();
        log::info!("grid cleared");
    }

    fn draw_grid(&self, painter: &egui::Painter, origin: egui::Pos2, area: &GridLayout) {
        let grid = self.sequencer.grid();
        let colors = &self.sequencer.config().colors;

        for (stripe, primary) in area.stripes(grid, colors.stripe) {
            let fill = if primary { colors.bg1 } else { colors.bg2 };
            painter.rect_filled(to_rect(origin, stripe), 0.0, to_color(fill));
        }

        let stroke = egui::Stroke::new(1.0, to_color(colors.grid));
        for line in area.gridlines(grid) {
            painter.line_segment(
                [
                    origin + egui::vec2(line.from.0, line.from.1),
                    origin + egui::vec2(line.to.0, line.to.1),
                ],
                stroke,
            );
        }

        for cell in area.active_cells(grid) {
            painter.rect_filled(to_rect(origin, cell), 0.0, to_color(colors.fg));
        }
    }

    fn draw_piano_roll(&self, painter: &egui::Painter, origin: egui::Pos2, area: &GridLayout) {
        let rows = self.sequencer.grid().height();
        let roll = area.piano_roll();
        painter.rect_filled(to_rect(origin, roll), 0.0, egui::Color32::WHITE);

        let key_height = roll.h / rows as f32;
        let stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
        for row in 0..rows {
            let key = layout::Rect::new(roll.x, roll.y + row as f32 * key_height, roll.w, key_height);
            let position = layout::row_position(row, rows, self.lowest_note);
            if layout::is_black_key(position) {
                painter.rect_filled(to_rect(origin, key), 0.0, egui::Color32::BLACK);
            }
            painter.line_segment(
                [
                    origin + egui::vec2(key.x, key.y),
                    origin + egui::vec2(key.x + key.w, key.y),
                ],
                stroke,
            );
            if position % pitch::SEMITONES == 0 {
                painter.text(
                    origin + egui::vec2(key.x + 2.0, key.y + key_height / 2.0),
                    egui::Align2::LEFT_CENTER,
                    pitch::note_name(position),
                    egui::FontId::monospace(9.0),
                    egui::Color32::DARK_GRAY,
                );
            }
        }
    }
}

#[cfg(feature = "gui")]
fn to_color(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

#[cfg(feature = "gui")]
fn to_rect(origin: egui::Pos2, rect: layout::Rect) -> egui::Rect {
    egui::Rect::from_min_size(origin + egui::vec2(rect.x, rect.y), egui::vec2(rect.w, rect.h))
}

#[cfg(feature = "gui")]
impl eframe::App for SequencerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        let (play_key, reset_key) =
            ctx.input(|i| (i.key_pressed(egui::Key::Space), i.key_pressed(egui::Key::R)));
        if play_key {
            self.play();
        }
        if reset_key {
            self.reset();
        }

        egui::TopBottomPanel::top("transport").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("STEPGRID");
                ui.add_space(20.0);
                if ui.button("▶ Play").clicked() {
                    self.play();
                }
                if ui.button("Clear").clicked() {
                    self.reset();
                }
                ui.add_space(20.0);
                ui.label("Click cells to toggle them, Space to play, R to clear");
            });
            if self.audio_output.is_silent() {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    "⚠ No audio output device - playback is silent",
                );
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let origin = response.rect.min;
                let area = GridLayout::for_window(response.rect.width(), response.rect.height());

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let local = pos - origin;
                        let cell = area.pointer_to_cell(local.x, local.y, self.sequencer.grid());
                        if let Some((x, y)) = cell {
                            if let Err(err) = self.sequencer.toggle(x, y) {
                                log::error!("{}", err);
                            }
                        }
                    }
                }

                self.draw_grid(&painter, origin, &area);
                self.draw_piano_roll(&painter, origin, &area);
            });
    }
}
