use serde::Serialize;

use crate::constants::ShapeKind;
use crate::model::ConnectionType;

/// Everything one draw produces for a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawOutput {
    pub outline_path: String,
    pub inline_path: String,
    /// Outline of each empty inline input, keyed by input name.
    pub input_outlines: Vec<(String, String)>,
    pub fields: Vec<FieldPlacement>,
    pub connections: Vec<ConnectionPlacement>,
    pub width: f64,
    pub height: f64,
    pub width_with_children: f64,
    pub rtl: bool,
    pub output_shape: Option<ShapeKind>,
}

impl DrawOutput {
    /// Path data for the block body: outline followed by inline holes.
    pub fn path(&self) -> String {
        format!("{}\n{}", self.outline_path, self.inline_path)
    }

    pub fn connection(&self, kind: ConnectionType) -> Option<&ConnectionPlacement> {
        self.connections.iter().find(|placement| placement.kind == kind)
    }

    pub fn input_connection(&self, input: &str) -> Option<&ConnectionPlacement> {
        self.connections
            .iter()
            .find(|placement| placement.input.as_deref() == Some(input))
    }
}

/// Where a field's top-left corner goes, in block coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPlacement {
    pub input: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Drawn with `scale(-1 1)` in right-to-left blocks.
    pub mirrored: bool,
}

/// Offset of a connection point from the block origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionPlacement {
    pub kind: ConnectionType,
    pub input: Option<String>,
    pub x: f64,
    pub y: f64,
}
