use std::fmt;

use crate::constants::{ConnectionShape, ConstantProvider};
use crate::model::{BlockModel, ConnectionModel};

use super::{Measurable, Types};

/// Previous, next or output connection of the block being measured.
pub struct ConnectionMeasurable<'a> {
    pub base: Measurable,
    pub connection: &'a dyn ConnectionModel,
    pub shape: ConnectionShape,
    pub start_x: f64,
    pub connection_offset_x: f64,
    pub connection_offset_y: f64,
}

impl<'a> ConnectionMeasurable<'a> {
    fn new(
        constants: &ConstantProvider,
        connection: &'a dyn ConnectionModel,
        source: &dyn BlockModel,
        types: Types,
    ) -> Self {
        let shape = constants.shape_for(connection, source);
        Self {
            base: Measurable::sized(
                constants,
                Types::CONNECTION | types,
                shape.static_width(),
                shape.static_height(),
            ),
            connection,
            shape,
            start_x: 0.0,
            connection_offset_x: 0.0,
            connection_offset_y: 0.0,
        }
    }

    pub fn previous(
        constants: &ConstantProvider,
        connection: &'a dyn ConnectionModel,
        source: &dyn BlockModel,
    ) -> Self {
        Self::new(constants, connection, source, Types::PREVIOUS_CONNECTION)
    }

    pub fn next(
        constants: &ConstantProvider,
        connection: &'a dyn ConnectionModel,
        source: &dyn BlockModel,
    ) -> Self {
        Self::new(constants, connection, source, Types::NEXT_CONNECTION)
    }

    /// Output tab on the left edge. Dynamic shapes start at zero size and
    /// are sized once the block height is known.
    pub fn output(
        constants: &ConstantProvider,
        connection: &'a dyn ConnectionModel,
        source: &dyn BlockModel,
    ) -> Self {
        let mut this = Self::new(constants, connection, source, Types::OUTPUT_CONNECTION);
        this.start_x = this.base.width;
        this.connection_offset_y = constants.tab_offset_from_top;
        this
    }

    pub fn is_dynamic_shape(&self) -> bool {
        self.shape.is_dynamic()
    }

    /// Fit a dynamic output shape to a block of the given height.
    pub fn fit_to_height(&mut self, block_height: f64) {
        let ConnectionShape::Dynamic(shape) = &self.shape else {
            return;
        };
        let height = shape.height(block_height);
        let width = shape.width(block_height);
        self.base.height = height;
        self.base.width = width;
        self.start_x = width;
        self.connection_offset_y = shape.connection_offset_y(height);
        self.connection_offset_x = shape.connection_offset_x(width);
    }
}

impl fmt::Debug for ConnectionMeasurable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionMeasurable")
            .field("base", &self.base)
            .field("type", &self.connection.connection_type())
            .field("shape", &self.shape.kind())
            .field("start_x", &self.start_x)
            .finish_non_exhaustive()
    }
}
