//! The rounded "zelos" style: grid-aligned sizes, dynamic value connectors
//! and rounded statement mouths.

mod constants;
mod drawer;
mod info;
mod marker_svg;
mod path_object;
mod renderer;

pub use constants::{GRID_UNIT, constants};
pub use drawer::ZelosDrawer;
pub use info::ZelosLayout;
pub use marker_svg::ZelosMarkerSvg;
pub use path_object::{InputOutline, SelectedPath, ZelosPathObject};
pub use renderer::ZelosRenderer;
