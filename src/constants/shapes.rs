//! Connection and corner shapes derived from a [`ConstantProvider`].
//!
//! [`ConstantProvider`]: super::ConstantProvider

use serde::{Deserialize, Serialize};

use crate::paths::{arc, line_on_axis, line_to, point};

/// Family a connection shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Hexagonal,
    Round,
    Square,
    Puzzle,
    Notch,
}

/// Shape whose size follows the height of the block or input it is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicShape {
    pub kind: ShapeKind,
    pub max_width: f64,
    pub corner_radius: f64,
}

impl DynamicShape {
    pub fn width(&self, height: f64) -> f64 {
        match self.kind {
            ShapeKind::Square => self.corner_radius,
            _ => (height / 2.0).min(self.max_width),
        }
    }

    pub fn height(&self, height: f64) -> f64 {
        height
    }

    pub fn connection_offset_y(&self, connection_height: f64) -> f64 {
        connection_height / 2.0
    }

    pub fn connection_offset_x(&self, connection_width: f64) -> f64 {
        -connection_width
    }

    pub fn path_down(&self, height: f64) -> String {
        self.main_path(height, false, false)
    }

    pub fn path_up(&self, height: f64) -> String {
        self.main_path(height, true, false)
    }

    pub fn path_right_down(&self, height: f64) -> String {
        self.main_path(height, false, true)
    }

    pub fn path_right_up(&self, height: f64) -> String {
        self.main_path(height, true, true)
    }

    fn main_path(&self, height: f64, up: bool, right: bool) -> String {
        match self.kind {
            ShapeKind::Hexagonal => {
                let width = self.width(height);
                let forward = if up { -1.0 } else { 1.0 };
                let direction = if right { -1.0 } else { 1.0 };
                let dy = forward * height / 2.0;
                line_to(-direction * width, dy) + &line_to(direction * width, dy)
            }
            ShapeKind::Square => {
                let radius = self.corner_radius;
                let inner_height = height - radius * 2.0;
                rounded_sides(radius, inner_height, up, right)
            }
            _ => {
                let max_height = self.max_width * 2.0;
                let remaining = if height > max_height {
                    height - max_height
                } else {
                    0.0
                };
                let radius = height.min(max_height) / 2.0;
                rounded_sides(radius, remaining, up, right)
            }
        }
    }
}

fn rounded_sides(radius: f64, straight: f64, up: bool, right: bool) -> String {
    let sign = if up { -1.0 } else { 1.0 };
    let side = if right { 1.0 } else { -1.0 };
    arc("a", "0 0,1", radius, &point(sign * radius, sign * radius))
        + &line_on_axis("v", side * straight)
        + &arc("a", "0 0,1", radius, &point(-sign * radius, sign * radius))
}

/// Shape of one connection point as seen by measurement and drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionShape {
    /// Statement connector cut into a horizontal edge.
    Notch {
        width: f64,
        height: f64,
        path_left: String,
        path_right: String,
    },
    /// Value connector cut into a vertical edge.
    PuzzleTab {
        width: f64,
        height: f64,
        path_down: String,
        path_up: String,
    },
    Dynamic(DynamicShape),
}

impl ConnectionShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Notch { .. } => ShapeKind::Notch,
            Self::PuzzleTab { .. } => ShapeKind::Puzzle,
            Self::Dynamic(shape) => shape.kind,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Width of the shape when drawn against an edge of `height`.
    pub fn width_for(&self, height: f64) -> f64 {
        match self {
            Self::Notch { width, .. } | Self::PuzzleTab { width, .. } => *width,
            Self::Dynamic(shape) => shape.width(height),
        }
    }

    pub fn height_for(&self, height: f64) -> f64 {
        match self {
            Self::Notch { height: own, .. } | Self::PuzzleTab { height: own, .. } => *own,
            Self::Dynamic(shape) => shape.height(height),
        }
    }

    /// Fixed width, or zero for dynamic shapes that are sized later.
    pub fn static_width(&self) -> f64 {
        match self {
            Self::Dynamic(_) => 0.0,
            other => other.width_for(0.0),
        }
    }

    pub fn static_height(&self) -> f64 {
        match self {
            Self::Dynamic(_) => 0.0,
            other => other.height_for(0.0),
        }
    }

    pub fn path_down(&self, height: f64) -> String {
        match self {
            Self::PuzzleTab { path_down, .. } => path_down.clone(),
            Self::Dynamic(shape) => shape.path_down(height),
            Self::Notch { .. } => String::new(),
        }
    }

    pub fn path_up(&self, height: f64) -> String {
        match self {
            Self::PuzzleTab { path_up, .. } => path_up.clone(),
            Self::Dynamic(shape) => shape.path_up(height),
            Self::Notch { .. } => String::new(),
        }
    }

    pub fn path_right_down(&self, height: f64) -> String {
        match self {
            Self::Dynamic(shape) => shape.path_right_down(height),
            other => other.path_down(height),
        }
    }

    pub fn path_left(&self) -> &str {
        match self {
            Self::Notch { path_left, .. } => path_left,
            _ => "",
        }
    }

    pub fn path_right(&self) -> &str {
        match self {
            Self::Notch { path_right, .. } => path_right,
            _ => "",
        }
    }
}

/// Arcs for the four outer corners of a block.
#[derive(Debug, Clone, PartialEq)]
pub struct OutsideCorners {
    pub top_left: String,
    pub top_right: String,
    pub bottom_right: String,
    pub bottom_left: String,
    pub right_height: f64,
}

/// Arcs where a statement input cuts into the block body.
#[derive(Debug, Clone, PartialEq)]
pub struct InsideCorners {
    pub width: f64,
    pub height: f64,
    pub path_top: String,
    pub path_bottom: String,
    pub right_width: f64,
    pub right_height: f64,
    pub path_top_right: String,
    pub path_bottom_right: String,
}

/// Fixed-size decoration: start hat or jagged collapse edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub width: f64,
    pub height: f64,
    pub path: String,
}
