use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{filter_records, Selection};
use crate::data::model::Field;
use crate::report::Summary;
use crate::state::AppState;
use crate::stats::ShapeStats;

// ---------------------------------------------------------------------------
// Left side panel – filter pickers
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Collect options up front so the pickers can mutate state.
    let options: Vec<(Field, Vec<String>)> = Field::CATEGORICAL
        .into_iter()
        .map(|f| (f, dataset.options(f).map(str::to_string).collect()))
        .collect();

    for (field, values) in options {
        let current = state
            .filters
            .selection(field)
            .cloned()
            .unwrap_or_default();

        ui.strong(field.label());
        egui::ComboBox::from_id_salt(field.header())
            .width(ui.available_width())
            .selected_text(current.label())
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(current == Selection::All, "All")
                    .clicked()
                {
                    state.set_filter(field, Selection::All);
                }
                for value in values {
                    let selected = matches!(&current, Selection::Exact(v) if *v == value);
                    if ui.selectable_label(selected, &value).clicked() {
                        state.set_filter(field, Selection::Exact(value));
                    }
                }
            });
        ui.add_space(6.0);
    }

    ui.separator();
    if ui
        .add_enabled(!state.filters.is_unconstrained(), egui::Button::new("Reset filters"))
        .clicked()
    {
        state.clear_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns `true` when the theme was toggled.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut theme_toggled = false;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            let can_reload = state.source_path.is_some();
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                if let Some(path) = state.source_path.clone() {
                    let ctx = ui.ctx().clone();
                    state.request_load(path, move || ctx.request_repaint());
                }
                ui.close_menu();
            }
            ui.separator();
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = filter_records(&ds.records, &state.filters).len();
            ui.label(format!("{} tomatoes loaded, {visible} visible", ds.len()));
        }

        if state.is_loading() {
            ui.spinner();
        }

        ui.separator();

        let mut dark = state.theme.is_dark();
        if ui.checkbox(&mut dark, "Dark mode").changed() {
            state.theme = state.theme.toggled();
            theme_toggled = true;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    theme_toggled
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

/// Row of headline numbers above the charts.
pub fn summary_cards(ui: &mut Ui, summary: &Summary) {
    let (dia_mean, dia_var) = summary.diameter_labels();
    let (weight_mean, weight_var) = summary.weight_labels();
    let cards = [
        ("Tomatoes", summary.count.to_string()),
        ("Defective", summary.defect_pct_label()),
        ("Mean weight (g)", weight_mean),
        ("Weight variance", weight_var),
        ("Mean diameter (mm)", dia_mean),
        ("Diameter variance", dia_var),
    ];

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (title, value) in cards {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(120.0);
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(title).small());
                    ui.label(RichText::new(value).heading().strong());
                });
            });
        }
    });
}

/// One line per series with skewness and kurtosis.
pub fn shape_line(ui: &mut Ui, name: &str, shape: Option<&ShapeStats>) {
    match shape {
        Some(s) => {
            ui.label(format!(
                "{name}: g1 = {:.3} ({}), g2 = {:.3} ({}); adjusted G1 = {:.3}, G2 = {:.3}",
                s.skewness,
                s.symmetry_label(),
                s.excess_kurtosis,
                s.tail_label(),
                s.adjusted_skewness,
                s.adjusted_excess_kurtosis,
            ));
        }
        None => {
            ui.label(format!("{name}: {}", crate::report::UNAVAILABLE));
        }
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tomato inspection data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    // Cancelling the dialog leaves the current dataset alone.
    if let Some(path) = file {
        let ctx = ctx.clone();
        state.request_load(path, move || ctx.request_repaint());
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered tomatoes")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_filtered(&path);
    }
}
