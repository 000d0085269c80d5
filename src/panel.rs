//! Binds one record table, one session, and one presentation surface.
//!
//! The panel is the only writer of the session: surfaces translate
//! clicks into `PanelAction`s, the panel applies them and re-renders.

use crate::dataset::RecordTable;
use crate::session::{MeasureSlot, RowId, Session, SessionError};
use crate::surface::{PanelAction, PickSet, PresentationSurface, RowView};

pub struct Panel<S> {
    table: RecordTable,
    session: Session,
    surface: S,
}

impl<S: PresentationSurface> Panel<S> {
    pub fn new(table: RecordTable, session: Session, surface: S) -> Self {
        Self {
            table,
            session,
            surface,
        }
    }

    /// Apply one user action and re-render. The cursor does not move
    /// when recording fails.
    pub fn handle(&mut self, action: PanelAction) -> Result<(), SessionError> {
        match action {
            PanelAction::Previous => self.session.retreat(),
            PanelAction::Submit => self.submit()?,
            PanelAction::SubmitAndNext => {
                self.submit()?;
                self.session.advance();
            }
        }
        self.render();
        Ok(())
    }

    /// Record every set pick for the current row; unset picks write
    /// nothing. A no-op once the session is exhausted.
    fn submit(&mut self) -> Result<(), SessionError> {
        let Some(row) = self.session.current() else {
            return Ok(());
        };
        let PickSet { overall, each } = self.surface.picks();

        self.session
            .record(row, &MeasureSlot::Overall, None, overall.as_deref())?;
        for (column, pick) in each {
            let value = self.table.value(row, &column).map(str::to_string);
            self.session
                .record(row, &MeasureSlot::Column(column), value, pick.as_deref())?;
        }
        Ok(())
    }

    /// Push the current row (or the terminal state) to the surface.
    pub fn render(&mut self) {
        match (self.session.current(), self.session.position()) {
            (Some(row), Some((position, total))) => {
                let view = self.row_view(row, position, total);
                self.surface.show_row(&view);
            }
            _ => self.surface.show_exhausted(),
        }
    }

    fn row_view(&self, row: RowId, position: usize, total: usize) -> RowView {
        let columns = self.session.columns().to_vec();
        let values = columns
            .iter()
            .map(|column| {
                self.table
                    .value(row, column)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        let saved_each = columns
            .iter()
            .map(|column| {
                self.session
                    .saved_measure(row, &MeasureSlot::Column(column.clone()))
                    .map(str::to_string)
            })
            .collect();
        let measures = self.session.measures();

        RowView {
            row,
            position,
            total,
            columns,
            values,
            each_options: measures.each.clone().unwrap_or_default(),
            overall_options: measures.overall.clone().unwrap_or_default(),
            saved_each,
            saved_overall: self
                .session
                .saved_measure(row, &MeasureSlot::Overall)
                .map(str::to_string),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
