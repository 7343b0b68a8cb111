//! Ephemeral state of one pointer interaction.

use std::collections::HashMap;

use docket_core::{Point, Rect};

use super::types::{DrawKind, Handle, InteractionMode};
use crate::model::{ComponentId, Geometry};

#[derive(Debug, Clone)]
pub(crate) enum Session {
    Drawing {
        id: ComponentId,
        kind: DrawKind,
    },
    Marquee {
        origin: Point,
        /// Selection kept when the modifier was held at marquee start.
        base: Vec<ComponentId>,
    },
    Dragging {
        origin: Point,
        /// Component under the pointer at drag start.
        reference: ComponentId,
        reference_start: Rect,
        /// Start geometry of every selected component.
        snapshots: HashMap<ComponentId, Geometry>,
        single_line: bool,
    },
    Resizing {
        origin: Point,
        id: ComponentId,
        handle: Handle,
        start: Geometry,
    },
}

impl Session {
    pub(crate) fn mode(&self) -> InteractionMode {
        match self {
            Session::Drawing { .. } => InteractionMode::Drawing,
            Session::Marquee { .. } => InteractionMode::Marquee,
            Session::Dragging { .. } => InteractionMode::Dragging,
            Session::Resizing { .. } => InteractionMode::Resizing,
        }
    }
}
