//! Reveal affordances for hidden columns.
//!
//! When a column is hidden, an affordance decorator is anchored to the
//! first visible column after it (cell units, virtual space) so a host
//! can surface a "show hidden columns" control there; showing the column
//! removes the affordance again. Range positions are visible-sequence
//! indices, so affordances are re-anchored whenever the hidden set
//! changes.

use std::collections::HashMap;

use crate::model::SizeModel;
use crate::types::{Extent, Space, Units};
use crate::view::decorators::{Decorator, DecoratorId, DecoratorRegistry};

/// Class carried by affordance content nodes.
pub const SHOW_HIDDEN_CLASS: &str = "show-hidden-cols";

/// Tracks one affordance decorator per hidden column.
#[derive(Default)]
pub struct HiddenColToggles {
    by_col: HashMap<usize, DecoratorId>,
}

impl HiddenColToggles {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a column's hidden flag changing.
    pub fn sync(
        &mut self,
        col: usize,
        hidden: bool,
        cols: &SizeModel,
        decorators: &mut DecoratorRegistry,
    ) {
        if hidden {
            if self.by_col.contains_key(&col) {
                return;
            }
            let mut decorator = Decorator::new(
                0.0,
                anchor_position(cols, col),
                Extent::Len(1.0),
                Extent::Len(1.0),
                Units::Cell,
                Space::Virtual,
            );
            decorator.set_render(|dom| {
                let node = dom.create_element("div");
                dom.add_class(node, SHOW_HIDDEN_CLASS);
                node
            });
            let id = decorators.add(decorator);
            self.by_col.insert(col, id);
        } else if let Some(id) = self.by_col.remove(&col) {
            decorators.remove(id);
        }
        self.reanchor(cols, decorators);
    }

    /// Recompute every affordance's anchor against the current hidden
    /// set.
    pub fn reanchor(&self, cols: &SizeModel, decorators: &mut DecoratorRegistry) {
        for (col, id) in &self.by_col {
            let position = anchor_position(cols, *col);
            decorators.update(*id, |decorator| {
                decorator.set_range(0.0, position, Extent::Len(1.0), Extent::Len(1.0));
            });
        }
    }

    /// The affordance decorator for a hidden column, if any.
    #[must_use]
    pub fn decorator_for(&self, col: usize) -> Option<DecoratorId> {
        self.by_col.get(&col).copied()
    }

    /// Number of live affordances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_col.len()
    }

    /// Whether no affordances are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_col.is_empty()
    }
}

/// Visible-sequence position of the first non-hidden column after the
/// hidden one.
fn anchor_position(cols: &SizeModel, col: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let position = cols.visible_before(col + 1) as f32;
    position
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn cols_with_hidden(hidden: &[usize]) -> SizeModel {
        let mut cols = SizeModel::with_count(10, 100.0);
        for index in hidden {
            cols.set_hidden(*index, true);
        }
        cols
    }

    #[test]
    fn test_hide_anchors_to_next_visible_column() {
        let mut toggles = HiddenColToggles::new();
        let mut decorators = DecoratorRegistry::new();
        let cols = cols_with_hidden(&[3]);
        toggles.sync(3, true, &cols, &mut decorators);
        let id = toggles.decorator_for(3).unwrap();
        // Descriptor 4 is the third visible column (0, 1, 2 precede it).
        assert_eq!(decorators.get(id).unwrap().col(), 3.0);
        assert_eq!(decorators.alive_count(), 1);
    }

    #[test]
    fn test_show_removes_affordance() {
        let mut toggles = HiddenColToggles::new();
        let mut decorators = DecoratorRegistry::new();
        let cols = cols_with_hidden(&[3]);
        toggles.sync(3, true, &cols, &mut decorators);
        toggles.sync(3, false, &cols, &mut decorators);
        assert!(toggles.is_empty());
        assert_eq!(decorators.alive_count(), 0);
    }

    #[test]
    fn test_hiding_an_earlier_column_reanchors() {
        let mut toggles = HiddenColToggles::new();
        let mut decorators = DecoratorRegistry::new();
        let cols = cols_with_hidden(&[3]);
        toggles.sync(3, true, &cols, &mut decorators);
        // Hiding column 1 shifts every later visible sequence index.
        let cols = cols_with_hidden(&[1, 3]);
        toggles.sync(1, true, &cols, &mut decorators);
        let id = toggles.decorator_for(3).unwrap();
        assert_eq!(decorators.get(id).unwrap().col(), 2.0);
    }

    #[test]
    fn test_double_hide_is_idempotent() {
        let mut toggles = HiddenColToggles::new();
        let mut decorators = DecoratorRegistry::new();
        let cols = cols_with_hidden(&[3]);
        toggles.sync(3, true, &cols, &mut decorators);
        toggles.sync(3, true, &cols, &mut decorators);
        assert_eq!(toggles.len(), 1);
        assert_eq!(decorators.alive_count(), 1);
    }
}
