//! Export callback: writes the measurement log next to the dataset.

use slint::ComponentHandle;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use rowgrade::config::AppConfig;
use rowgrade::export::{self, ExportFormat};
use tracing::{info, warn};

use crate::AppWindow;
use crate::ui::UiPanel;

pub fn setup_export_callbacks(
    ui: &AppWindow,
    panel: Rc<RefCell<Option<UiPanel>>>,
    config: Rc<AppConfig>,
    dataset_path: Rc<RefCell<Option<PathBuf>>>,
) {
    let ui_weak = ui.as_weak();
    ui.on_export_clicked(move || {
        let status = run_export(&panel, &config, &dataset_path);
        if let Some(ui) = ui_weak.upgrade() {
            ui.set_status_text(status.into());
        }
    });
}

fn run_export(
    panel: &Rc<RefCell<Option<UiPanel>>>,
    config: &AppConfig,
    dataset_path: &Rc<RefCell<Option<PathBuf>>>,
) -> String {
    let panel_ref = panel.borrow();
    let Some(panel) = panel_ref.as_ref() else {
        return "No dataset loaded".to_string();
    };
    let Some(path) = dataset_path.borrow().clone() else {
        return "No dataset loaded".to_string();
    };

    let format = ExportFormat::from_config(&config.export.default_format).unwrap_or_else(|| {
        warn!(
            "Unknown export format '{}'; falling back to CSV.",
            config.export.default_format
        );
        ExportFormat::Csv
    });

    let out = export::export_path(&path, format);
    let measurements = panel.session().measurements();
    match export::write_measurements(&out, format, measurements) {
        Ok(()) => {
            info!(
                "Exported {} measurements as {} to {}",
                measurements.len(),
                format.name(),
                out.display()
            );
            format!(
                "Exported {} measurements to {}",
                measurements.len(),
                out.display()
            )
        }
        Err(e) => format!("Export failed: {e}"),
    }
}
