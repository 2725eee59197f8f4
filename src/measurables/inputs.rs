use std::fmt;

use crate::constants::{ConnectionShape, ConstantProvider};
use crate::model::{Align, BlockModel, ConnectionModel, ConnectionType, InputModel};

use super::{Measurable, Types};

/// Value or statement input together with the child block plugged into it.
pub struct InputConnection<'a> {
    pub base: Measurable,
    pub input: &'a dyn InputModel,
    pub align: Align,
    pub connection: Option<&'a dyn ConnectionModel>,
    pub connected_block: Option<&'a dyn BlockModel>,
    pub connected_block_width: f64,
    pub connected_block_height: f64,
    pub shape: ConnectionShape,
    pub connection_width: f64,
    pub connection_height: f64,
    pub connection_offset_x: f64,
    pub connection_offset_y: f64,
}

impl<'a> InputConnection<'a> {
    fn new(
        constants: &ConstantProvider,
        input: &'a dyn InputModel,
        source: &dyn BlockModel,
        types: Types,
        fallback: ConnectionType,
    ) -> Self {
        let connection = input.connection();
        let connected_block = connection.and_then(|connection| connection.target_block());
        let child_size = connected_block.map(|block| block.size()).unwrap_or_default();
        let shape = match connection {
            Some(connection) => constants.shape_for(connection, source),
            None => constants.shape_for_type(fallback, &[], source.output_shape()),
        };
        Self {
            base: Measurable::new(constants, Types::INPUT | types),
            input,
            align: input.align(),
            connection,
            connected_block,
            connected_block_width: child_size.width,
            connected_block_height: child_size.height,
            shape,
            connection_width: 0.0,
            connection_height: 0.0,
            connection_offset_x: 0.0,
            connection_offset_y: 0.0,
        }
    }

    /// Value input drawn inside the row, as a hole or around the child.
    pub fn inline(
        constants: &ConstantProvider,
        input: &'a dyn InputModel,
        source: &dyn BlockModel,
    ) -> Self {
        let mut this = Self::new(
            constants,
            input,
            source,
            Types::INLINE_INPUT,
            ConnectionType::InputValue,
        );
        if this.connected_block.is_some() {
            this.base.width = this.connected_block_width;
            this.base.height = this.connected_block_height;
        } else {
            this.base.height = constants.empty_inline_input_height;
            this.base.width = constants.empty_inline_input_padding;
        }

        let height = this.base.height;
        this.connection_height = this.shape.height_for(height);
        this.connection_width = this.shape.width_for(height);
        if this.connected_block.is_none() {
            let sides = if this.shape.is_dynamic() { 2.0 } else { 1.0 };
            this.base.width += this.connection_width * sides;
        }

        match &this.shape {
            ConnectionShape::Dynamic(shape) => {
                this.connection_offset_y = shape.connection_offset_y(this.connection_height);
                this.connection_offset_x = shape.connection_offset_x(this.connection_width);
            }
            _ => {
                this.connection_offset_y = constants.tab_offset_from_top;
                this.connection_offset_x = 0.0;
            }
        }
        this
    }

    /// Statement input: the C-shaped mouth holding a stack of child blocks.
    pub fn statement(
        constants: &ConstantProvider,
        input: &'a dyn InputModel,
        source: &dyn BlockModel,
    ) -> Self {
        let mut this = Self::new(
            constants,
            input,
            source,
            Types::STATEMENT_INPUT,
            ConnectionType::NextStatement,
        );
        this.base.height = if this.connected_block.is_some() {
            this.connected_block_height + constants.statement_bottom_spacer
        } else {
            constants.empty_statement_input_height
        };
        this.base.width = constants.statement_input_notch_offset + this.shape.static_width();
        this
    }

    /// Value input attached to the right edge of the block.
    pub fn external(
        constants: &ConstantProvider,
        input: &'a dyn InputModel,
        source: &dyn BlockModel,
    ) -> Self {
        let mut this = Self::new(
            constants,
            input,
            source,
            Types::EXTERNAL_VALUE_INPUT,
            ConnectionType::InputValue,
        );
        let empty_height = this.shape.height_for(constants.tab_height);
        this.base.height = if this.connected_block.is_some() {
            this.connected_block_height - constants.tab_offset_from_top - constants.medium_padding
        } else {
            empty_height
        };
        this.connection_height = this.shape.height_for(this.base.height);
        this.connection_width = this.shape.width_for(this.base.height);
        this.base.width = this.connection_width + constants.external_value_input_padding;
        this.connection_offset_y = constants.tab_offset_from_top;
        this
    }

    pub fn is_dynamic_shape(&self) -> bool {
        self.shape.is_dynamic()
    }

    pub fn name(&self) -> &str {
        self.input.name()
    }
}

impl fmt::Debug for InputConnection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputConnection")
            .field("base", &self.base)
            .field("input", &self.input.name())
            .field("connected", &self.connected_block.is_some())
            .field("shape", &self.shape.kind())
            .field("connection_width", &self.connection_width)
            .field("connection_height", &self.connection_height)
            .finish_non_exhaustive()
    }
}
