//! Main application for the Hex GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use tracing::error;

use super::board_view::BoardView;
use super::game_state::GameState;
use super::theme::*;
use crate::board::{UI_MAX_SIZE, UI_MIN_SIZE};
use crate::config::{AppConfig, PlayMode};
use crate::eval::min_moves_to_win;
use crate::{Cost, GameMode, GameOutcome, SearchType, Side, StrategyKind};

/// Main Hex application
pub struct HexApp {
    state: GameState,
    board_view: BoardView,
    /// Settings for the next "New Game"
    pending: AppConfig,
    show_debug: bool,
    show_route: bool,
}

impl HexApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, state: GameState) -> Self {
        let pending = state.config.clone();
        Self {
            state,
            board_view: BoardView::default(),
            pending,
            show_debug: true,
            show_route: false,
        }
    }

    fn new_game(&mut self) {
        let mut config = self.pending.clone();
        config.game.board_size = config.game.board_size.clamp(UI_MIN_SIZE, UI_MAX_SIZE);
        if let Err(e) = self.state.restart(config) {
            error!(error = %e, "could not start a new game");
            self.state.message = Some(e.to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    ui.add(
                        egui::Slider::new(&mut self.pending.game.board_size, UI_MIN_SIZE..=UI_MAX_SIZE)
                            .text("Board size"),
                    );
                    ui.separator();
                    ui.radio_value(&mut self.pending.game.mode, PlayMode::VsAi, "Versus engine");
                    ui.radio_value(&mut self.pending.game.mode, PlayMode::TwoPlayer, "Two players");
                    if self.pending.game.mode == PlayMode::VsAi {
                        ui.horizontal(|ui| {
                            ui.label("Play as");
                            ui.radio_value(&mut self.pending.game.human_side, Side::Red, "Red");
                            ui.radio_value(&mut self.pending.game.human_side, Side::Blue, "Blue");
                        });
                    }
                    ui.separator();
                    egui::ComboBox::from_label("Strategy")
                        .selected_text(self.pending.engine.strategy.name())
                        .show_ui(ui, |ui| {
                            for kind in StrategyKind::ALL {
                                ui.selectable_value(&mut self.pending.engine.strategy, kind, kind.name());
                            }
                        });
                    ui.separator();
                    if ui.button("New Game (N)").clicked() {
                        self.new_game();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    ui.checkbox(&mut self.show_route, "Opponent Route (R)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode() {
                        GameMode::VsAi { human } => {
                            format!("vs {} - You: {human}", self.state.strategy())
                        }
                        GameMode::TwoPlayer => "Two players".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_threat_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let GameOutcome::Win(winner) = self.state.game.outcome() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, Some(winner));
                } else if self.state.game.outcome() == GameOutcome::Draw {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, None);
                }

                if let Some(msg) = self.state.message.clone() {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, &msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●").size(20.0).color(RED_STONE));
            ui.label(RichText::new("●").size(20.0).color(BLUE_STONE));
            ui.add_space(4.0);
            ui.label(RichText::new("HEX").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            let size = self.state.game.board().size();
            ui.label(RichText::new(format!("{size}×{size}")).size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let side = self.state.game.to_move();
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 20.0, stone_color(side));
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(side.name().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));
                    let goal = match side {
                        Side::Red => "connect left and right",
                        Side::Blue => "connect top and bottom",
                    };
                    ui.label(RichText::new(goal).size(10.0).color(TEXT_MUTED));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.game.is_over() {
                        ("Game over", TEXT_SECONDARY)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.game.moves_played()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.label(
                    RichText::new(format!("{:.2}s", elapsed.as_secs_f32()))
                        .size(28.0)
                        .strong()
                        .color(TIMER_WARNING),
                );
            } else if let Some(left) = self.state.move_timer.remaining() {
                let secs = left.as_secs_f32();
                let color = if secs > 3.0 {
                    TIMER_NORMAL
                } else if secs > 1.5 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.1}s left")).size(24.0).color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Stones the opponent of the side to move still needs
    fn render_threat_card(&self, ui: &mut egui::Ui) {
        let Some((side, cost)) = self.state.threat() else {
            return;
        };
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("THREAT").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            let (text, color) = match cost {
                Cost::Finite(0) => (format!("{side} is connected"), TIMER_CRITICAL),
                Cost::Finite(1) => (format!("{side} wins with 1 more stone"), TIMER_CRITICAL),
                Cost::Finite(n) if n <= 3 => (format!("{side} needs {n} stones"), TIMER_WARNING),
                Cost::Finite(n) => (format!("{side} needs {n} stones"), TEXT_SECONDARY),
                Cost::Unreachable => (format!("{side} is cut off"), TIMER_NORMAL),
            };
            ui.label(RichText::new(text).size(14.0).strong().color(color));
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };
                let label = match result.search_type {
                    SearchType::Cascade(rule) => format!("cascade: {rule}"),
                    SearchType::Minimax => "minimax".to_string(),
                    SearchType::MonteCarlo => "monte carlo".to_string(),
                    SearchType::NoMove => "no move".to_string(),
                };
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(label).size(11.0).strong().color(TIMER_NORMAL));
                        ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });
                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("→ {pos}")).size(12.0).strong().color(TEXT_PRIMARY));
                }
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, winner: Option<Side>) {
        let mut restart = false;
        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    match winner {
                        Some(side) => {
                            ui.label(
                                RichText::new(format!("{} WINS!", side.name().to_uppercase()))
                                    .size(18.0)
                                    .strong()
                                    .color(stone_color(side)),
                            );
                        }
                        None => {
                            ui.label(RichText::new("DRAW").size(18.0).strong().color(TEXT_PRIMARY));
                        }
                    }
                    ui.add_space(12.0);
                    if ui.button(RichText::new("New Game").size(14.0).strong()).clicked() {
                        restart = true;
                    }
                });
            });
        if restart {
            self.new_game();
        }
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let board = self.state.game.board();
            let route = match self.state.threat() {
                Some((opponent, _)) if self.show_route => min_moves_to_win(board, opponent).path,
                _ => Vec::new(),
            };
            let accepts_input = self.state.is_human_turn() && !self.state.is_ai_thinking();

            let clicked = self.board_view.show(
                ui,
                board,
                self.state.game.to_move(),
                self.state.last_move,
                &route,
                accepts_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        let (debug, route, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::N),
            )
        });
        if debug {
            self.show_debug = !self.show_debug;
        }
        if route {
            self.show_route = !self.show_route;
        }
        if new_game {
            self.new_game();
        }
    }
}

impl eframe::App for HexApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        self.state.check_turn_timer();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep the clock and the worker poll ticking
        if self.state.is_ai_thinking() || self.state.move_timer.remaining().is_some() {
            ctx.request_repaint();
        }
    }
}
