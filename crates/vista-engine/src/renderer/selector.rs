//! Decides what happens to the attached renderer on initialization.

use crate::engine::RendererKind;

/// Outcome of a renderer selection.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Selection {
    /// The attached renderer already has the requested capability.
    Reuse,
    /// Drop the current renderer, if any, and create a plain one.
    CreatePlain,
    /// Drop the current renderer, if any, and create a coloring-capable one.
    CreateColoring,
}

impl Selection {
    /// Variant to create, `None` when reusing.
    pub fn created_kind(self) -> Option<RendererKind> {
        match self {
            Selection::Reuse => None,
            Selection::CreatePlain => Some(RendererKind::Plain),
            Selection::CreateColoring => Some(RendererKind::Coloring),
        }
    }
}

/// Reuse iff the current variant matches the requested capability exactly.
/// A live renderer is never upgraded or downgraded in place.
pub fn select(current: Option<RendererKind>, with_coloring: bool) -> Selection {
    match current {
        Some(kind) if kind.has_coloring() == with_coloring => Selection::Reuse,
        _ if with_coloring => Selection::CreateColoring,
        _ => Selection::CreatePlain,
    }
}
