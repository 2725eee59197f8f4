//! Read-only contracts for the block data model owned by the host.
//!
//! The renderer never mutates anything behind these traits. Hosts with their
//! own block graph implement them directly; [`desc`] provides plain
//! serde-backed implementations for everything else.

pub mod desc;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

pub use desc::{BlockDesc, ConnectionDesc, FieldDesc, InputDesc, WorkspaceDesc};

/// Directional type of a connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    InputValue,
    OutputValue,
    NextStatement,
    PreviousStatement,
}

impl ConnectionType {
    pub fn is_value(self) -> bool {
        matches!(self, Self::InputValue | Self::OutputValue)
    }

    pub fn is_statement(self) -> bool {
        !self.is_value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Value,
    Statement,
    Dummy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Centre,
    Right,
}

/// Shape a value block asks its output connector to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    Hexagonal,
    Round,
    Square,
}

/// Decoration drawn above a block without a previous connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatStyle {
    Cap,
    None,
}

pub trait ConnectionModel {
    fn connection_type(&self) -> ConnectionType;

    fn is_connected(&self) -> bool;

    /// Type checks declared on the connection, e.g. `"Boolean"`.
    fn checks(&self) -> &[String] {
        &[]
    }

    /// Block on the far side of the connection, if any.
    fn target_block(&self) -> Option<&dyn BlockModel> {
        None
    }
}

pub trait FieldModel {
    fn is_editable(&self) -> bool;

    fn flip_rtl(&self) -> bool;

    /// Size the field currently renders at.
    fn size(&self) -> Size;

    fn is_visible(&self) -> bool {
        true
    }
}

pub trait InputModel {
    fn name(&self) -> &str;

    fn kind(&self) -> InputKind;

    fn align(&self) -> Align {
        Align::Left
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn fields(&self) -> Vec<&dyn FieldModel>;

    fn connection(&self) -> Option<&dyn ConnectionModel>;
}

pub trait BlockModel {
    fn id(&self) -> &str;

    fn inputs(&self) -> Vec<&dyn InputModel>;

    fn previous_connection(&self) -> Option<&dyn ConnectionModel>;

    fn next_connection(&self) -> Option<&dyn ConnectionModel>;

    fn output_connection(&self) -> Option<&dyn ConnectionModel>;

    fn inputs_inline(&self) -> bool;

    /// Rendered size of the block together with everything attached below
    /// it. Used when this block is the child of another block's input.
    fn size(&self) -> Size;

    fn is_collapsed(&self) -> bool {
        false
    }

    fn is_shadow(&self) -> bool {
        false
    }

    fn is_insertion_marker(&self) -> bool {
        false
    }

    fn is_rtl(&self) -> bool {
        false
    }

    fn hat(&self) -> Option<HatStyle> {
        None
    }

    fn output_shape(&self) -> Option<OutputShape> {
        None
    }

    /// True when the block hangs off the next connection of the block above
    /// it, as opposed to sitting inside a statement input or standing alone.
    fn is_stacked_below(&self) -> bool {
        false
    }

    /// Whether `orphan` could reattach at the end of this block's stack via
    /// a connection of `kind`.
    fn accepts_orphan_at_end(&self, _orphan: &dyn BlockModel, _kind: ConnectionType) -> bool {
        false
    }
}

impl fmt::Debug for dyn BlockModel + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}

pub trait WorkspaceModel {
    fn is_rtl(&self) -> bool;
}
