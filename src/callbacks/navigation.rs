//! Navigation callbacks: Previous, Submit, Submit & Next.

use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

use rowgrade::surface::PanelAction;

use crate::AppWindow;
use crate::ui::UiPanel;

/// Sets up all navigation-related callbacks on the UI.
pub fn setup_navigation_callbacks(ui: &AppWindow, panel: Rc<RefCell<Option<UiPanel>>>) {
    setup_previous(ui, panel.clone());
    setup_submit(ui, panel.clone());
    setup_submit_next(ui, panel);
}

/// Apply one panel action and report the outcome in the status line.
fn apply(
    ui_weak: &slint::Weak<AppWindow>,
    panel: &Rc<RefCell<Option<UiPanel>>>,
    action: PanelAction,
    done: &str,
) {
    let mut panel_ref = panel.borrow_mut();
    let Some(panel) = panel_ref.as_mut() else {
        return;
    };
    let status = match panel.handle(action) {
        Ok(()) => done.to_string(),
        Err(e) => format!("Recording failed: {e}"),
    };
    if let Some(ui) = ui_weak.upgrade() {
        ui.set_status_text(status.into());
    }
}

fn setup_previous(ui: &AppWindow, panel: Rc<RefCell<Option<UiPanel>>>) {
    let ui_weak = ui.as_weak();
    ui.on_previous_clicked(move || {
        apply(&ui_weak, &panel, PanelAction::Previous, "");
    });
}

fn setup_submit(ui: &AppWindow, panel: Rc<RefCell<Option<UiPanel>>>) {
    let ui_weak = ui.as_weak();
    ui.on_submit_clicked(move || {
        apply(&ui_weak, &panel, PanelAction::Submit, "Measurements recorded");
    });
}

fn setup_submit_next(ui: &AppWindow, panel: Rc<RefCell<Option<UiPanel>>>) {
    let ui_weak = ui.as_weak();
    ui.on_submit_next_clicked(move || {
        apply(
            &ui_weak,
            &panel,
            PanelAction::SubmitAndNext,
            "Measurements recorded",
        );
    });
}
