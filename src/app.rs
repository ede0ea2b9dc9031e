use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::model::Field;
use crate::report::DashboardReport;
use crate::state::AppState;
use crate::theme::ThemeStore;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TomatoDashboardApp {
    pub state: AppState,
    theme_store: ThemeStore,
}

impl TomatoDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let theme_store = ThemeStore::new(config.theme_key.clone());
        let theme = theme_store.load(cc.storage, cc.egui_ctx.system_theme());
        theme.apply(&cc.egui_ctx);
        log::debug!("Starting with {} theme", theme.as_str());

        Self {
            state: AppState::new(config, theme),
            theme_store,
        }
    }
}

impl eframe::App for TomatoDashboardApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.state.poll_loader();

        // ---- Top panel: menu bar ----
        let mut theme_toggled = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            theme_toggled = panels::top_bar(ui, &mut self.state);
        });
        if theme_toggled {
            self.state.theme.apply(ctx);
            if let Some(storage) = frame.storage_mut() {
                self.theme_store.save(storage, self.state.theme);
            }
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: cards, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.report() {
            Some(report) => dashboard(ui, &report),
            None => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a CSV file to start  (File → Open…)");
                });
            }
        });
    }
}

fn dashboard(ui: &mut Ui, report: &DashboardReport<'_>) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            panels::summary_cards(ui, &report.summary);
            ui.add_space(8.0);

            if report.is_empty() {
                ui.label("No tomatoes match the current filters.");
                return;
            }

            ui.columns(2, |cols: &mut [Ui]| {
                plot::bar_chart(&mut cols[0], "chart_shift", "Shift", report.counts(Field::Shift));
                plot::bar_chart(
                    &mut cols[1],
                    "chart_supplier",
                    "Supplier lot",
                    report.counts(Field::SupplierLot),
                );
            });
            ui.columns(2, |cols: &mut [Ui]| {
                plot::bar_chart(
                    &mut cols[0],
                    "chart_defect",
                    "Defect",
                    report.counts(Field::Defect),
                );
                plot::pie_chart(
                    &mut cols[1],
                    "Quality category",
                    report.counts(Field::QualityCategory),
                );
            });
            ui.columns(2, |cols: &mut [Ui]| {
                plot::histogram_chart(
                    &mut cols[0],
                    "hist_diameter",
                    "Diameter (mm)",
                    &report.diameter_histogram,
                );
                plot::histogram_chart(
                    &mut cols[1],
                    "hist_weight",
                    "Weight (g)",
                    &report.weight_histogram,
                );
            });

            if let Some(scatter) = &report.scatter {
                plot::scatter_chart(ui, "scatter_weight_diameter", scatter);
            }

            ui.add_space(8.0);
            ui.strong("Shape");
            panels::shape_line(ui, "Diameter", report.diameter_shape.as_ref());
            panels::shape_line(ui, "Weight", report.weight_shape.as_ref());

            ui.add_space(8.0);
            table::smallest_section(ui, &report.smallest);

            ui.add_space(8.0);
            ui.strong(format!("Records ({})", report.rows.len()));
            table::records_table(ui, "records_table", &report.rows, 400.0);
        });
}
