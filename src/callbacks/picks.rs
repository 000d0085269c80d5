//! Radio control callbacks for per-column and overall measures.
//!
//! Picks only mutate the surface's control state; nothing is recorded
//! until the annotator submits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::AppWindow;
use crate::ui::UiPanel;

pub fn setup_pick_callbacks(ui: &AppWindow, panel: Rc<RefCell<Option<UiPanel>>>) {
    let panel_each = panel.clone();
    ui.on_each_picked(move |column, option| {
        if column < 0 || option < 0 {
            return;
        }
        if let Some(panel) = panel_each.borrow_mut().as_mut() {
            panel
                .surface_mut()
                .toggle_each_pick(column as usize, option as usize);
        }
    });

    ui.on_overall_picked(move |option| {
        if option < 0 {
            return;
        }
        if let Some(panel) = panel.borrow_mut().as_mut() {
            panel.surface_mut().toggle_overall_pick(option as usize);
        }
    });
}
