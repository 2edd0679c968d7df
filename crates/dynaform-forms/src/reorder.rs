//! Reordering of sibling fields.
//!
//! A drag ends with the id of the dragged field and the id of the field it
//! was dropped onto. Both must live in the same sibling list; the dragged
//! field is removed and reinserted at the destination's index (array-move
//! semantics). Everything that cannot be honored is a silent no-op reported
//! through [`ReorderOutcome`]: dropping a field onto itself or outside every
//! zone, an unknown container, or an id that is not a sibling in that container.

use std::fmt;

use crate::schema::{ContainerPath, FieldDescriptor, Schema};

/// The result of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The field moved from one index to another.
    Moved {
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// Source and destination were the same field.
    SameItem,
    /// The drag ended outside every drop zone.
    NoTarget,
    /// The container path does not address a sibling list.
    UnknownContainer,
    /// An id is not present in the addressed sibling list.
    UnknownItem(String),
    /// A keyboard nudge would move past the start or end of the list.
    AtBoundary,
}

impl ReorderOutcome {
    /// Returns `true` if the order changed.
    pub const fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

impl fmt::Display for ReorderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { from, to } => write!(f, "moved from {from} to {to}"),
            Self::SameItem => write!(f, "dropped onto itself"),
            Self::NoTarget => write!(f, "dropped outside any drop zone"),
            Self::UnknownContainer => write!(f, "unknown container"),
            Self::UnknownItem(id) => write!(f, "'{id}' is not a sibling in this container"),
            Self::AtBoundary => write!(f, "already at the edge of the list"),
        }
    }
}

/// Direction of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Moves the element at `from` to `to`, shifting the elements in between.
///
/// Out-of-range indices leave the list unchanged.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Moves `source_id` to the index of `destination_id` within one sibling list.
pub fn reorder_siblings(
    siblings: &mut Vec<FieldDescriptor>,
    source_id: &str,
    destination_id: &str,
) -> ReorderOutcome {
    if source_id == destination_id {
        return ReorderOutcome::SameItem;
    }
    let Some(from) = siblings.iter().position(|f| f.id == source_id) else {
        return ReorderOutcome::UnknownItem(source_id.to_string());
    };
    let Some(to) = siblings.iter().position(|f| f.id == destination_id) else {
        return ReorderOutcome::UnknownItem(destination_id.to_string());
    };
    array_move(siblings, from, to);
    ReorderOutcome::Moved { from, to }
}

/// Reorders within the container addressed by `path`.
pub fn reorder(
    schema: &mut Schema,
    path: &ContainerPath,
    source_id: &str,
    destination_id: &str,
) -> ReorderOutcome {
    match schema.siblings_mut(path) {
        Some(siblings) => reorder_siblings(siblings, source_id, destination_id),
        None => ReorderOutcome::UnknownContainer,
    }
}

/// Moves `id` one slot up or down within the container addressed by `path`.
pub fn nudge(
    schema: &mut Schema,
    path: &ContainerPath,
    id: &str,
    direction: Direction,
) -> ReorderOutcome {
    let Some(siblings) = schema.siblings_mut(path) else {
        return ReorderOutcome::UnknownContainer;
    };
    let Some(from) = siblings.iter().position(|f| f.id == id) else {
        return ReorderOutcome::UnknownItem(id.to_string());
    };
    let to = match direction {
        Direction::Up if from > 0 => from - 1,
        Direction::Down if from + 1 < siblings.len() => from + 1,
        _ => return ReorderOutcome::AtBoundary,
    };
    array_move(siblings, from, to);
    ReorderOutcome::Moved { from, to }
}
