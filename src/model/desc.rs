//! Plain block descriptions implementing the model contracts.
//!
//! Useful for hosts that keep their blocks as data (they deserialize straight
//! from JSON) and for building fixtures.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use super::{
    Align, BlockModel, ConnectionModel, ConnectionType, FieldModel, HatStyle, InputKind,
    InputModel, OutputShape, WorkspaceModel,
};
use crate::geometry::Size;

/// Average advance of one display column of field text.
pub const GLYPH_WIDTH: f64 = 7.0;
/// Line height of field text.
pub const TEXT_HEIGHT: f64 = 16.0;
/// Horizontal padding on each side of an editable field's border.
pub const EDITABLE_PADDING_X: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDesc {
    pub text: String,
    pub editable: bool,
    pub flip_rtl: bool,
    pub visible: bool,
    /// Explicit rendered size. When absent the size follows the text.
    pub size: Option<Size>,
}

impl Default for FieldDesc {
    fn default() -> Self {
        Self {
            text: String::new(),
            editable: false,
            flip_rtl: false,
            visible: true,
            size: None,
        }
    }
}

impl FieldDesc {
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn editable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            editable: true,
            ..Self::default()
        }
    }

    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            size: Some(Size::new(width, height)),
            ..Self::default()
        }
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_flip_rtl(mut self, flip: bool) -> Self {
        self.flip_rtl = flip;
        self
    }

    fn text_size(&self) -> Size {
        let columns = UnicodeWidthStr::width(self.text.as_str()) as f64;
        let padding = if self.editable {
            EDITABLE_PADDING_X * 2.0
        } else {
            0.0
        };
        Size::new(columns * GLYPH_WIDTH + padding, TEXT_HEIGHT)
    }
}

impl FieldModel for FieldDesc {
    fn is_editable(&self) -> bool {
        self.editable
    }

    fn flip_rtl(&self) -> bool {
        self.flip_rtl
    }

    fn size(&self) -> Size {
        self.size.unwrap_or_else(|| self.text_size())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDesc {
    pub kind: ConnectionType,
    #[serde(default)]
    pub checks: Vec<String>,
    #[serde(default)]
    pub target: Option<Box<BlockDesc>>,
}

impl ConnectionDesc {
    pub fn new(kind: ConnectionType) -> Self {
        Self {
            kind,
            checks: Vec::new(),
            target: None,
        }
    }

    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.checks.push(check.into());
        self
    }

    pub fn connected_to(mut self, block: BlockDesc) -> Self {
        self.target = Some(Box::new(block));
        self
    }
}

impl ConnectionModel for ConnectionDesc {
    fn connection_type(&self) -> ConnectionType {
        self.kind
    }

    fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    fn checks(&self) -> &[String] {
        &self.checks
    }

    fn target_block(&self) -> Option<&dyn BlockModel> {
        self.target.as_deref().map(|block| block as &dyn BlockModel)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDesc {
    pub name: String,
    pub kind: InputKind,
    #[serde(default)]
    pub align: Align,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub fields: Vec<FieldDesc>,
    #[serde(default)]
    pub connection: Option<ConnectionDesc>,
}

fn visible_by_default() -> bool {
    true
}

impl InputDesc {
    fn new(name: impl Into<String>, kind: InputKind, connection: Option<ConnectionDesc>) -> Self {
        Self {
            name: name.into(),
            kind,
            align: Align::Left,
            visible: true,
            fields: Vec::new(),
            connection,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self::new(
            name,
            InputKind::Value,
            Some(ConnectionDesc::new(ConnectionType::InputValue)),
        )
    }

    pub fn statement(name: impl Into<String>) -> Self {
        Self::new(
            name,
            InputKind::Statement,
            Some(ConnectionDesc::new(ConnectionType::NextStatement)),
        )
    }

    pub fn dummy(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Dummy, None)
    }

    pub fn with_field(mut self, field: FieldDesc) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        if let Some(connection) = self.connection.take() {
            self.connection = Some(connection.with_check(check));
        }
        self
    }

    /// Attach a child block to this input's connection.
    pub fn connected_to(mut self, block: BlockDesc) -> Self {
        if let Some(connection) = self.connection.take() {
            self.connection = Some(connection.connected_to(block));
        }
        self
    }
}

impl InputModel for InputDesc {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> InputKind {
        self.kind
    }

    fn align(&self) -> Align {
        self.align
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn fields(&self) -> Vec<&dyn FieldModel> {
        self.fields
            .iter()
            .map(|field| field as &dyn FieldModel)
            .collect()
    }

    fn connection(&self) -> Option<&dyn ConnectionModel> {
        self.connection
            .as_ref()
            .map(|connection| connection as &dyn ConnectionModel)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDesc {
    pub id: String,
    pub inputs: Vec<InputDesc>,
    pub previous: Option<ConnectionDesc>,
    pub next: Option<ConnectionDesc>,
    pub output: Option<ConnectionDesc>,
    pub inputs_inline: bool,
    pub collapsed: bool,
    pub shadow: bool,
    pub insertion_marker: bool,
    pub rtl: bool,
    pub hat: Option<HatStyle>,
    pub output_shape: Option<OutputShape>,
    pub size: Size,
    pub stacked_below: bool,
    pub accepts_orphans: bool,
}

impl BlockDesc {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_previous(mut self) -> Self {
        self.previous = Some(ConnectionDesc::new(ConnectionType::PreviousStatement));
        self
    }

    pub fn with_next(mut self) -> Self {
        self.next = Some(ConnectionDesc::new(ConnectionType::NextStatement));
        self
    }

    pub fn with_output(mut self) -> Self {
        self.output = Some(ConnectionDesc::new(ConnectionType::OutputValue));
        self
    }

    pub fn with_output_check(mut self, check: impl Into<String>) -> Self {
        let connection = self
            .output
            .take()
            .unwrap_or_else(|| ConnectionDesc::new(ConnectionType::OutputValue));
        self.output = Some(connection.with_check(check));
        self
    }

    pub fn with_input(mut self, input: InputDesc) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.inputs_inline = inline;
        self
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_output_shape(mut self, shape: OutputShape) -> Self {
        self.output_shape = Some(shape);
        self
    }

    pub fn with_hat(mut self, hat: HatStyle) -> Self {
        self.hat = Some(hat);
        self
    }
}

impl BlockModel for BlockDesc {
    fn id(&self) -> &str {
        &self.id
    }

    fn inputs(&self) -> Vec<&dyn InputModel> {
        self.inputs
            .iter()
            .map(|input| input as &dyn InputModel)
            .collect()
    }

    fn previous_connection(&self) -> Option<&dyn ConnectionModel> {
        self.previous
            .as_ref()
            .map(|connection| connection as &dyn ConnectionModel)
    }

    fn next_connection(&self) -> Option<&dyn ConnectionModel> {
        self.next
            .as_ref()
            .map(|connection| connection as &dyn ConnectionModel)
    }

    fn output_connection(&self) -> Option<&dyn ConnectionModel> {
        self.output
            .as_ref()
            .map(|connection| connection as &dyn ConnectionModel)
    }

    fn inputs_inline(&self) -> bool {
        self.inputs_inline
    }

    fn size(&self) -> Size {
        self.size
    }

    fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    fn is_shadow(&self) -> bool {
        self.shadow
    }

    fn is_insertion_marker(&self) -> bool {
        self.insertion_marker
    }

    fn is_rtl(&self) -> bool {
        self.rtl
    }

    fn hat(&self) -> Option<HatStyle> {
        self.hat
    }

    fn output_shape(&self) -> Option<OutputShape> {
        self.output_shape
    }

    fn is_stacked_below(&self) -> bool {
        self.stacked_below
    }

    fn accepts_orphan_at_end(&self, _orphan: &dyn BlockModel, _kind: ConnectionType) -> bool {
        self.accepts_orphans
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceDesc {
    pub rtl: bool,
}

impl WorkspaceModel for WorkspaceDesc {
    fn is_rtl(&self) -> bool {
        self.rtl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_size_follows_display_width() {
        let label = FieldDesc::label("abc");
        assert_eq!(label.size(), Size::new(3.0 * GLYPH_WIDTH, TEXT_HEIGHT));

        let wide = FieldDesc::label("日本");
        assert_eq!(wide.size().width, 4.0 * GLYPH_WIDTH);

        let editable = FieldDesc::editable("ab");
        assert_eq!(
            editable.size().width,
            2.0 * GLYPH_WIDTH + EDITABLE_PADDING_X * 2.0
        );
    }

    #[test]
    fn explicit_size_wins() {
        let field = FieldDesc {
            text: "ignored".into(),
            ..FieldDesc::sized(40.0, 20.0)
        };
        assert_eq!(field.size(), Size::new(40.0, 20.0));
    }

    #[test]
    fn block_deserializes_from_json() {
        let raw = r#"{
            "id": "controls_if",
            "previous": { "kind": "previous_statement" },
            "inputs": [
                { "name": "IF0", "kind": "value",
                  "connection": { "kind": "input_value", "checks": ["Boolean"] },
                  "fields": [{ "text": "if" }] },
                { "name": "DO0", "kind": "statement",
                  "connection": { "kind": "next_statement" } }
            ]
        }"#;
        let block: BlockDesc = serde_json::from_str(raw).unwrap();
        assert_eq!(block.id(), "controls_if");
        assert_eq!(block.inputs().len(), 2);
        assert!(block.previous_connection().is_some());
        assert!(block.output_connection().is_none());
        let input = block.inputs()[0];
        assert_eq!(input.kind(), InputKind::Value);
        assert_eq!(input.connection().unwrap().checks(), ["Boolean".to_string()]);
        assert!(input.is_visible());
        assert!(!input.connection().unwrap().is_connected());
    }

    #[test]
    fn connecting_an_input_exposes_the_child() {
        let child = BlockDesc::new("child").with_output().with_size(50.0, 30.0);
        let input = InputDesc::value("VALUE").connected_to(child);
        let connection = input.connection().unwrap();
        assert!(connection.is_connected());
        assert_eq!(
            connection.target_block().unwrap().size(),
            Size::new(50.0, 30.0)
        );
    }
}
