//! Slint binding for the presentation surface.

use slint::{ComponentHandle, Model, SharedString, VecModel};
use std::rc::Rc;

use rowgrade::panel::Panel;
use rowgrade::surface::{PickSet, PresentationSurface, RowView};

use crate::AppWindow;

/// The panel type the window callbacks drive.
pub type UiPanel = Panel<SlintSurface>;

/// Pushes row views into the Slint window and keeps the pending radio
/// picks. Pick state is presentation-only: it is rebuilt from the
/// session's saved measures on every render, so un-submitted selections
/// do not survive navigation.
pub struct SlintSurface {
    ui: slint::Weak<AppWindow>,
    column_names: Rc<VecModel<SharedString>>,
    cell_values: Rc<VecModel<SharedString>>,
    each_options: Rc<VecModel<SharedString>>,
    overall_options: Rc<VecModel<SharedString>>,
    each_selected: Rc<VecModel<i32>>,
    columns: Vec<String>,
    each_labels: Vec<String>,
    overall_labels: Vec<String>,
    each_picked: Vec<Option<usize>>,
    overall_picked: Option<usize>,
}

impl SlintSurface {
    pub fn new(ui: &AppWindow) -> Self {
        let column_names = Rc::new(VecModel::from(Vec::<SharedString>::new()));
        let cell_values = Rc::new(VecModel::from(Vec::<SharedString>::new()));
        let each_options = Rc::new(VecModel::from(Vec::<SharedString>::new()));
        let overall_options = Rc::new(VecModel::from(Vec::<SharedString>::new()));
        let each_selected = Rc::new(VecModel::from(Vec::<i32>::new()));

        ui.set_column_names(column_names.clone().into());
        ui.set_cell_values(cell_values.clone().into());
        ui.set_each_options(each_options.clone().into());
        ui.set_overall_options(overall_options.clone().into());
        ui.set_each_selected(each_selected.clone().into());

        Self {
            ui: ui.as_weak(),
            column_names,
            cell_values,
            each_options,
            overall_options,
            each_selected,
            columns: Vec::new(),
            each_labels: Vec::new(),
            overall_labels: Vec::new(),
            each_picked: Vec::new(),
            overall_picked: None,
        }
    }

    /// Toggle a per-column pick; clicking the lit option clears it.
    pub fn toggle_each_pick(&mut self, column: usize, option: usize) {
        if column >= self.each_picked.len() || option >= self.each_labels.len() {
            return;
        }
        let next = if self.each_picked[column] == Some(option) {
            None
        } else {
            Some(option)
        };
        self.each_picked[column] = next;
        self.each_selected.set_row_data(column, selected_index(next));
    }

    /// Toggle the overall pick; clicking the lit option clears it.
    pub fn toggle_overall_pick(&mut self, option: usize) {
        if option >= self.overall_labels.len() {
            return;
        }
        self.overall_picked = if self.overall_picked == Some(option) {
            None
        } else {
            Some(option)
        };
        if let Some(ui) = self.ui.upgrade() {
            ui.set_overall_selected(selected_index(self.overall_picked));
        }
    }
}

fn selected_index(pick: Option<usize>) -> i32 {
    pick.map(|index| index as i32).unwrap_or(-1)
}

fn shared_strings(items: &[String]) -> Vec<SharedString> {
    items
        .iter()
        .map(|item| SharedString::from(item.as_str()))
        .collect()
}

fn label_index(labels: &[String], saved: Option<&String>) -> Option<usize> {
    saved.and_then(|measure| labels.iter().position(|label| label == measure))
}

impl PresentationSurface for SlintSurface {
    fn show_row(&mut self, view: &RowView) {
        self.columns = view.columns.clone();
        self.each_labels = view.each_options.clone();
        self.overall_labels = view.overall_options.clone();
        self.each_picked = view
            .saved_each
            .iter()
            .map(|saved| label_index(&self.each_labels, saved.as_ref()))
            .collect();
        self.overall_picked = label_index(&self.overall_labels, view.saved_overall.as_ref());

        // Column names go last so the cards only instantiate once their
        // values and selection state are in place.
        self.cell_values.set_vec(shared_strings(&view.values));
        self.each_options.set_vec(shared_strings(&view.each_options));
        self.overall_options
            .set_vec(shared_strings(&view.overall_options));
        self.each_selected.set_vec(
            self.each_picked
                .iter()
                .copied()
                .map(selected_index)
                .collect::<Vec<_>>(),
        );
        self.column_names.set_vec(shared_strings(&view.columns));

        if let Some(ui) = self.ui.upgrade() {
            ui.set_overall_selected(selected_index(self.overall_picked));
            ui.set_position_text(format!("{} / {}", view.position, view.total).into());
            ui.set_exhausted(false);
        }
    }

    fn show_exhausted(&mut self) {
        self.columns.clear();
        self.each_picked.clear();
        self.overall_picked = None;
        if let Some(ui) = self.ui.upgrade() {
            ui.set_exhausted(true);
        }
    }

    fn picks(&self) -> PickSet {
        PickSet {
            overall: self
                .overall_picked
                .map(|index| self.overall_labels[index].clone()),
            each: self
                .columns
                .iter()
                .zip(&self.each_picked)
                .map(|(column, pick)| {
                    (
                        column.clone(),
                        pick.map(|index| self.each_labels[index].clone()),
                    )
                })
                .collect(),
        }
    }
}
