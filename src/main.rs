slint::include_modules!();

mod callbacks;
mod ui;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rowgrade::config;
use rowgrade::dataset::RecordTable;
use rowgrade::logging;
use rowgrade::measures;
use rowgrade::panel::Panel;
use rowgrade::session::Session;
use tracing::{info, warn};

use crate::ui::{SlintSurface, UiPanel};

/// Load the dataset and session spec and assemble the panel behind the
/// window. Errors are flattened to strings for the status line.
fn build_panel(
    ui: &AppWindow,
    dataset_path: &Path,
    spec_path: Option<&str>,
) -> Result<UiPanel, String> {
    let table = RecordTable::load(dataset_path).map_err(|e| e.to_string())?;
    let spec = measures::load_session_spec(spec_path);
    let columns = spec.resolve_columns(&table);
    let pagination = spec.resolve_pagination(&table).map_err(|e| e.to_string())?;
    let session = Session::new(&table, columns, spec.measures.clone(), pagination)
        .map_err(|e| e.to_string())?;

    info!(
        "Loaded {} rows from {}",
        table.row_count(),
        dataset_path.display()
    );
    Ok(Panel::new(table, session, SlintSurface::new(ui)))
}

fn main() -> Result<(), slint::PlatformError> {
    logging::init();

    let ui = AppWindow::new()?;
    let mut app_config = config::load_config();
    ui.set_dark_theme(app_config.appearance.dark_theme);

    // Populated only after a dataset is successfully loaded from disk.
    let panel: Rc<RefCell<Option<UiPanel>>> = Rc::new(RefCell::new(None));
    let dataset_path: Rc<RefCell<Option<PathBuf>>> = Rc::new(RefCell::new(None));

    // Attempt to load dataset from CLI args if provided.
    let args: Vec<String> = std::env::args().collect();
    if let Some(ds_path) = args.get(1) {
        match build_panel(&ui, Path::new(ds_path), args.get(2).map(String::as_str)) {
            Ok(built) => {
                *panel.borrow_mut() = Some(built);
                *dataset_path.borrow_mut() = Some(PathBuf::from(ds_path));
                app_config.remember_dataset(ds_path);
                if let Err(e) = config::save_config(&app_config) {
                    warn!("Failed to save config: {e}");
                }
            }
            Err(e) => ui.set_status_text(format!("Dataset load error: {e}").into()),
        }
    } else {
        ui.set_status_text("No dataset provided (pass path as first arg)".into());
    }

    callbacks::setup_callbacks(&ui, panel.clone(), Rc::new(app_config), dataset_path);

    if let Some(panel) = panel.borrow_mut().as_mut() {
        panel.render();
    }

    ui.run()
}
