//! Callback handlers for the labeling panel.
//!
//! This module contains all UI callback implementations organized by
//! functionality:
//! - `navigation` - Previous / Submit / Submit & Next
//! - `picks` - radio control selection
//! - `export` - measurement export

pub mod export;
pub mod navigation;
pub mod picks;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use rowgrade::config::AppConfig;

use crate::AppWindow;
use crate::ui::UiPanel;

/// Sets up all callbacks on the UI.
pub fn setup_callbacks(
    ui: &AppWindow,
    panel: Rc<RefCell<Option<UiPanel>>>,
    config: Rc<AppConfig>,
    dataset_path: Rc<RefCell<Option<PathBuf>>>,
) {
    navigation::setup_navigation_callbacks(ui, panel.clone());
    picks::setup_pick_callbacks(ui, panel.clone());
    export::setup_export_callbacks(ui, panel, config, dataset_path);
}
