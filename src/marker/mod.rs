//! Cursor and marker geometry for keyboard navigation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ConnectionShape, ConstantProvider};
use crate::geometry::Size;
use crate::model::{BlockModel, ConnectionModel, ConnectionType};
use crate::paths::{line_on_axis, move_by, move_to};

/// Fraction of the block height covered by the block outline marker.
const HEIGHT_MULTIPLIER: f64 = 3.0 / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// The user's own navigation cursor. Blinks.
    Cursor,
    /// A static marker, e.g. another user's position.
    Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Overrides the style's cursor or marker colour.
    #[serde(default)]
    pub colour: Option<String>,
}

impl Marker {
    pub fn cursor() -> Self {
        Self {
            kind: MarkerKind::Cursor,
            colour: None,
        }
    }

    pub fn marker() -> Self {
        Self {
            kind: MarkerKind::Marker,
            colour: None,
        }
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn is_cursor(&self) -> bool {
        self.kind == MarkerKind::Cursor
    }
}

/// What the marker currently points at.
pub enum MarkerNode<'a> {
    /// Empty workspace position.
    Workspace { x: f64, y: f64 },
    Block(&'a dyn BlockModel),
    /// Whole stack starting at the given top block.
    Stack(&'a dyn BlockModel),
    Field { size: Size },
    /// Connection point at offset `(x, y)` inside `block`.
    Connection {
        connection: &'a dyn ConnectionModel,
        block: &'a dyn BlockModel,
        x: f64,
        y: f64,
    },
}

impl fmt::Debug for MarkerNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace { x, y } => f
                .debug_struct("Workspace")
                .field("x", x)
                .field("y", y)
                .finish(),
            Self::Block(block) => f.debug_tuple("Block").field(&block.id()).finish(),
            Self::Stack(block) => f.debug_tuple("Stack").field(&block.id()).finish(),
            Self::Field { size } => f.debug_struct("Field").field("size", size).finish(),
            Self::Connection {
                connection, x, y, ..
            } => f
                .debug_struct("Connection")
                .field("type", &connection.connection_type())
                .field("x", x)
                .field("y", y)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MarkerGeometry {
    Line {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Path data translated to `(x, y)`.
    Path { d: String, x: f64, y: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDrawing {
    pub geometry: MarkerGeometry,
    pub colour: String,
    pub stroke_width: f64,
    pub blinks: bool,
    /// Mirror the geometry with `scale(-1 1)`.
    pub flip_rtl: bool,
}

pub trait MarkerDrawer {
    fn draw(&self, node: &MarkerNode<'_>) -> MarkerDrawing;
}

/// Marker drawer of the common style.
#[derive(Debug, Clone)]
pub struct MarkerSvg<'c> {
    constants: &'c ConstantProvider,
    marker: Marker,
    rtl: bool,
}

impl<'c> MarkerSvg<'c> {
    pub fn new(constants: &'c ConstantProvider, marker: Marker, rtl: bool) -> Self {
        Self {
            constants,
            marker,
            rtl,
        }
    }

    pub fn constants(&self) -> &'c ConstantProvider {
        self.constants
    }

    pub fn colour(&self) -> String {
        match &self.marker.colour {
            Some(colour) => colour.clone(),
            None if self.marker.is_cursor() => self.constants.cursor_colour.clone(),
            None => self.constants.marker_colour.clone(),
        }
    }

    /// Wrap geometry with this marker's paint.
    pub fn paint(&self, geometry: MarkerGeometry, flip_rtl: bool) -> MarkerDrawing {
        MarkerDrawing {
            geometry,
            colour: self.colour(),
            stroke_width: self.constants.cursor_stroke_width,
            blinks: self.marker.is_cursor(),
            flip_rtl,
        }
    }

    fn workspace(&self, x: f64, y: f64) -> MarkerDrawing {
        let width = self.constants.cursor_ws_width;
        let x = if self.rtl { x - width } else { x };
        self.paint(self.line(x, y, width), false)
    }

    fn block(&self, block: &dyn BlockModel) -> MarkerDrawing {
        let size = block.size();
        let offset = self.constants.cursor_block_padding;
        let marker_height = size.height * HEIGHT_MULTIPLIER;
        let d = if let Some(previous) = block.previous_connection() {
            let shape = self.constants.shape_for(previous, block);
            self.previous_path(size.width, offset, marker_height, &shape)
        } else if let Some(output) = block.output_connection() {
            let shape = self.constants.shape_for(output, block);
            self.output_path(size, &shape)
        } else {
            move_by(-offset, marker_height)
                + &line_on_axis("V", -offset)
                + &line_on_axis("H", size.width + offset * 2.0)
                + &line_on_axis("V", marker_height)
        };
        self.paint(MarkerGeometry::Path { d, x: 0.0, y: 0.0 }, self.rtl)
    }

    fn stack(&self, block: &dyn BlockModel) -> MarkerDrawing {
        let size = block.size();
        let padding = self.constants.cursor_stack_padding;
        let width = size.width + padding;
        let height = size.height + padding;
        let x = -padding / 2.0;
        let y = -padding / 2.0;
        let x = if self.rtl { -(width + x) } else { x };
        self.paint(
            MarkerGeometry::Rect {
                x,
                y,
                width,
                height,
            },
            false,
        )
    }

    pub fn rect(&self, width: f64, height: f64) -> MarkerDrawing {
        self.paint(
            MarkerGeometry::Rect {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            false,
        )
    }

    fn line(&self, x: f64, y: f64, width: f64) -> MarkerGeometry {
        MarkerGeometry::Line {
            x,
            y,
            width,
            height: self.constants.ws_cursor_height,
        }
    }

    fn connection(
        &self,
        connection: &dyn ConnectionModel,
        block: &dyn BlockModel,
        x: f64,
        y: f64,
    ) -> MarkerDrawing {
        let size = block.size();
        let shape = self.constants.shape_for(connection, block);
        match connection.connection_type() {
            ConnectionType::InputValue => {
                let d = move_to(0.0, 0.0) + &shape.path_down(shape.height_for(size.height));
                self.paint(MarkerGeometry::Path { d, x, y }, false)
            }
            ConnectionType::OutputValue => {
                let d = self.output_path(size, &shape);
                self.paint(MarkerGeometry::Path { d, x: 0.0, y: 0.0 }, self.rtl)
            }
            ConnectionType::PreviousStatement => {
                let offset = self.constants.cursor_block_padding;
                let d = self.previous_path(
                    size.width,
                    offset,
                    size.height * HEIGHT_MULTIPLIER,
                    &shape,
                );
                self.paint(MarkerGeometry::Path { d, x: 0.0, y: 0.0 }, self.rtl)
            }
            ConnectionType::NextStatement => {
                let line_x = if self.rtl { -size.width } else { 0.0 };
                let geometry = MarkerGeometry::Line {
                    x: line_x,
                    y,
                    width: size.width,
                    height: self.constants.ws_cursor_height,
                };
                self.paint(geometry, false)
            }
        }
    }

    fn previous_path(
        &self,
        width: f64,
        offset: f64,
        marker_height: f64,
        shape: &ConnectionShape,
    ) -> String {
        move_by(-offset, marker_height)
            + &line_on_axis("V", -offset)
            + &line_on_axis("H", self.constants.notch_offset_left)
            + shape.path_left()
            + &line_on_axis("H", width + offset * 2.0)
            + &line_on_axis("V", marker_height)
    }

    fn output_path(&self, size: Size, shape: &ConnectionShape) -> String {
        move_by(size.width, 0.0)
            + &line_on_axis("h", -(size.width - shape.width_for(size.height)))
            + &line_on_axis("v", self.constants.tab_offset_from_top)
            + &shape.path_down(size.height)
            + &line_on_axis("V", size.height)
            + &line_on_axis("H", size.width)
    }
}

impl MarkerDrawer for MarkerSvg<'_> {
    fn draw(&self, node: &MarkerNode<'_>) -> MarkerDrawing {
        match node {
            MarkerNode::Workspace { x, y } => self.workspace(*x, *y),
            MarkerNode::Block(block) => self.block(*block),
            MarkerNode::Stack(block) => self.stack(*block),
            MarkerNode::Field { size } => self.rect(size.width, size.height),
            MarkerNode::Connection {
                connection,
                block,
                x,
                y,
            } => self.connection(*connection, *block, *x, *y),
        }
    }
}
