//! Layout model types.

mod component;
mod path;
mod style;

pub use component::{
    new_id, Component, ComponentId, ComponentKind, Content, Framed, Geometry, LineShape,
    Orientation, Shape, SummaryConfig, TableProps, DRAWING_Z_INDEX,
};
pub use path::{PathCommand, PathData, PathParseError, PathSegment};
pub use style::{LineStyle, LockDirection, Style, TextAlign};
