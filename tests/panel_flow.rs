// End-to-end flow: a panel over a real table, driven through the
// presentation-surface seam by a recording fake.

use rowgrade::dataset::RecordTable;
use rowgrade::export::{self, ExportFormat};
use rowgrade::measures::MeasureSet;
use rowgrade::panel::Panel;
use rowgrade::session::Session;
use rowgrade::surface::{PanelAction, PickSet, PresentationSurface, RowView};

/// Remembers every render and returns whatever picks the test scripts.
#[derive(Default)]
struct RecordingSurface {
    shown: Vec<RowView>,
    terminal_renders: usize,
    picks: PickSet,
}

impl RecordingSurface {
    fn last(&self) -> &RowView {
        self.shown.last().expect("no row rendered")
    }
}

impl PresentationSurface for RecordingSurface {
    fn show_row(&mut self, view: &RowView) {
        self.shown.push(view.clone());
    }

    fn show_exhausted(&mut self) {
        self.terminal_renders += 1;
    }

    fn picks(&self) -> PickSet {
        self.picks.clone()
    }
}

fn pick_c1(measure: Option<&str>) -> PickSet {
    PickSet {
        overall: None,
        each: vec![("c1".to_string(), measure.map(str::to_string))],
    }
}

fn fixture(measures: MeasureSet) -> Panel<RecordingSurface> {
    let table = RecordTable::new(
        vec!["c1".to_string()],
        vec![
            vec!["v0".to_string()],
            vec!["v1".to_string()],
            vec!["v2".to_string()],
        ],
    )
    .unwrap();
    let session = Session::new(&table, vec!["c1".to_string()], measures, None).unwrap();
    let mut panel = Panel::new(table, session, RecordingSurface::default());
    panel.render();
    panel
}

fn each_yes_no() -> MeasureSet {
    MeasureSet {
        overall: None,
        each: Some(vec!["Yes".to_string(), "No".to_string()]),
    }
}

#[test]
fn walkthrough_submit_navigate_and_exhaust() {
    let mut panel = fixture(each_yes_no());

    let first = panel.surface().last().clone();
    assert_eq!(first.row, 0);
    assert_eq!((first.position, first.total), (1, 3));
    assert_eq!(first.values, vec!["v0".to_string()]);
    assert_eq!(first.each_options, vec!["Yes".to_string(), "No".to_string()]);
    assert_eq!(first.saved_each, vec![None]);

    // Record Yes for c1 on row 0, stay put.
    panel.surface_mut().picks = pick_c1(Some("Yes"));
    panel.handle(PanelAction::Submit).unwrap();
    assert_eq!(panel.surface().last().saved_each, vec![Some("Yes".to_string())]);

    // Move forward with nothing selected, then come back: the earlier
    // measurement is still there to pre-populate the controls.
    panel.surface_mut().picks = pick_c1(None);
    panel.handle(PanelAction::SubmitAndNext).unwrap();
    assert_eq!(panel.surface().last().row, 1);
    panel.handle(PanelAction::Previous).unwrap();
    let revisited = panel.surface().last().clone();
    assert_eq!(revisited.row, 0);
    assert_eq!(revisited.saved_each, vec![Some("Yes".to_string())]);

    // Walk off the end; the terminal state renders and stays terminal.
    panel.handle(PanelAction::SubmitAndNext).unwrap();
    panel.handle(PanelAction::SubmitAndNext).unwrap();
    panel.handle(PanelAction::SubmitAndNext).unwrap();
    assert_eq!(panel.surface().terminal_renders, 1);
    panel.handle(PanelAction::SubmitAndNext).unwrap();
    assert_eq!(panel.surface().terminal_renders, 2);
    assert_eq!(panel.session().current(), None);

    // Only the one real measurement was ever written.
    assert_eq!(panel.session().measurements().len(), 1);
}

#[test]
fn resubmitting_overwrites_instead_of_duplicating() {
    let mut panel = fixture(each_yes_no());

    panel.surface_mut().picks = pick_c1(Some("Yes"));
    panel.handle(PanelAction::Submit).unwrap();
    panel.handle(PanelAction::Submit).unwrap();
    panel.surface_mut().picks = pick_c1(Some("No"));
    panel.handle(PanelAction::Submit).unwrap();

    let log = panel.session().measurements();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].measure, "No");
    assert_eq!(log[0].value.as_deref(), Some("v0"));
}

#[test]
fn overall_and_column_picks_export_together() {
    let measures = MeasureSet {
        overall: Some(vec!["Keep".to_string(), "Drop".to_string()]),
        each: Some(vec!["Yes".to_string(), "No".to_string()]),
    };
    let mut panel = fixture(measures);

    panel.surface_mut().picks = PickSet {
        overall: Some("Keep".to_string()),
        each: vec![("c1".to_string(), Some("Yes".to_string()))],
    };
    panel.handle(PanelAction::Submit).unwrap();
    assert_eq!(panel.session().measurements().len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let out = export::export_path(&dir.path().join("eval.csv"), ExportFormat::Csv);
    export::write_measurements(&out, ExportFormat::Csv, panel.session().measurements()).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "row_identifier,column,value,measure,kind");
    assert!(lines.iter().any(|l| *l == "0,,,Keep,overall"));
    assert!(lines.iter().any(|l| *l == "0,c1,v0,Yes,column"));
}
