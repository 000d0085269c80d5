//! The seam between the annotation session and a concrete UI toolkit.
//!
//! A presentation surface draws whatever `RowView` describes, keeps its
//! own control state (which radio is lit), and reports that state back
//! as a `PickSet` when the panel submits. The session itself never holds
//! live controls; it reconstructs them from `saved_measure` on every
//! render.

use crate::session::RowId;

/// Everything an adapter needs to draw one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub row: RowId,
    /// 1-based position in the pagination sequence.
    pub position: usize,
    pub total: usize,
    pub columns: Vec<String>,
    pub values: Vec<String>,
    /// Per-column vocabulary; empty when the affordance is not offered.
    pub each_options: Vec<String>,
    /// Overall vocabulary; empty when the affordance is not offered.
    pub overall_options: Vec<String>,
    /// Previously recorded measure per column, for pre-populating controls.
    pub saved_each: Vec<Option<String>>,
    pub saved_overall: Option<String>,
}

/// The control selections a surface is currently showing. Unset slots
/// are `None` and are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickSet {
    pub overall: Option<String>,
    /// One entry per presented column: `(column, picked measure)`.
    pub each: Vec<(String, Option<String>)>,
}

/// User actions a surface can feed into the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Previous,
    Submit,
    SubmitAndNext,
}

/// Rendering capability the panel drives. Implementations push state to
/// their toolkit; they must not call back into the panel re-entrantly.
pub trait PresentationSurface {
    fn show_row(&mut self, view: &RowView);
    fn show_exhausted(&mut self);
    /// The current control selections for the row being shown.
    fn picks(&self) -> PickSet;
}
