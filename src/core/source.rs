use serde::{Deserialize, Serialize};

use crate::core::table::Table;
use crate::core::types::{EntityName, Time};

/// Supplies the entities the chart should show, in display-tiebreak order.
pub trait SelectionProvider {
    fn selected_entity_names(&self) -> &[EntityName];

    fn has_selection(&self) -> bool {
        !self.selected_entity_names().is_empty()
    }
}

/// Supplies the table and the column settings the chart is derived from.
pub trait SeriesSource {
    fn table(&self) -> &Table;

    /// An already transformed table; when present the pipeline is skipped.
    fn transformed_table(&self) -> Option<&Table> {
        None
    }

    /// Explicit value columns in stacking order; `None` means auto-detect.
    fn y_column_slugs(&self) -> Option<&[String]>;

    fn is_relative_mode(&self) -> bool {
        false
    }

    fn end_time(&self) -> Option<Time> {
        None
    }
}

/// Ordered, duplicate-free set of selected entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionArray {
    selected: Vec<EntityName>,
}

impl SelectionArray {
    #[must_use]
    pub fn new<I, S>(entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntityName>,
    {
        let mut selection = Self::default();
        for entity in entities {
            selection.select(entity);
        }
        selection
    }

    /// Appends an entity; already selected entities keep their position.
    pub fn select(&mut self, entity: impl Into<EntityName>) {
        let entity = entity.into();
        if !self.selected.contains(&entity) {
            self.selected.push(entity);
        }
    }

    pub fn deselect(&mut self, entity: &str) {
        self.selected.retain(|selected| selected != entity);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl SelectionProvider for SelectionArray {
    fn selected_entity_names(&self) -> &[EntityName] {
        &self.selected
    }
}

impl SelectionProvider for Vec<EntityName> {
    fn selected_entity_names(&self) -> &[EntityName] {
        self
    }
}
