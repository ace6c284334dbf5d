use eframe::egui;

use bcviz::config::Config;
use bcviz::remote::{HttpTransport, Transport};
use bcviz::Session;

use crate::state::{AppState, Command};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BcvizApp<T: Transport> {
    pub state: AppState,
    pub session: Session<T>,
}

impl BcvizApp<HttpTransport> {
    /// Connect to the configured server and load the inventory and listing.
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            state: AppState::new(config.dashboard.clone()),
            session: Session::connect(config),
        };
        app.state.apply(Command::Connect, &mut app.session);
        app
    }
}

impl<T: Transport> eframe::App for BcvizApp<T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut commands);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut commands);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.state, &mut commands);
        });

        for command in commands {
            self.state.apply(command, &mut self.session);
        }
    }
}
