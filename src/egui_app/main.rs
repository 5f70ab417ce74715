/**
 * egui Native Desktop App - Main Entry Point
 *
 * Loads configuration, connects the gateway and runs the eframe loop.
 */
use std::process::ExitCode;

use eframe::egui;
use gazi_admin::egui_app::{gateway, theme, views, AppState, Config};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gazi_admin=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let gateway = match gateway::connect(config.app()) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("Failed to start gateway: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    let state = AppState::new(config, gateway);
    let result = eframe::run_native(
        "Gazi Admin",
        options,
        Box::new(|cc| {
            theme::styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(AdminApp { state }))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("eframe exited with error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application state
struct AdminApp {
    state: AppState,
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_pending();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_toasts(ctx, &self.state);

        ctx.request_repaint();
    }
}
