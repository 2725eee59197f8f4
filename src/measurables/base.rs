use crate::constants::ConstantProvider;

use super::Types;

/// Size, position and roles shared by every element of a measured block.
///
/// Positions are filled in when the layout pass finalizes; until then only
/// the size and the role tags are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurable {
    pub width: f64,
    pub height: f64,
    pub x_pos: f64,
    pub centerline: f64,
    pub notch_offset: f64,
    pub types: Types,
}

impl Measurable {
    pub fn new(constants: &ConstantProvider, types: Types) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            x_pos: 0.0,
            centerline: 0.0,
            notch_offset: constants.notch_offset_left,
            types,
        }
    }

    pub fn sized(constants: &ConstantProvider, types: Types, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::new(constants, types)
        }
    }

    pub fn square_corner(constants: &ConstantProvider, right: bool) -> Self {
        let side = if right {
            Types::RIGHT_SQUARE_CORNER
        } else {
            Types::LEFT_SQUARE_CORNER
        };
        Self::sized(
            constants,
            Types::CORNER | side,
            constants.no_padding,
            constants.no_padding,
        )
    }

    pub fn round_corner(constants: &ConstantProvider, right: bool) -> Self {
        let side = if right {
            Types::RIGHT_ROUND_CORNER
        } else {
            Types::LEFT_ROUND_CORNER
        };
        // Top and bottom rows grow to fit half the radius; the arc spills
        // into the neighbouring spacer row.
        Self::sized(
            constants,
            Types::CORNER | side,
            constants.corner_radius,
            constants.corner_radius / 2.0,
        )
    }

    /// Start hat. Its whole height sits above the block's capline.
    pub fn hat(constants: &ConstantProvider) -> Self {
        Self::sized(
            constants,
            Types::HAT,
            constants.start_hat_width,
            constants.start_hat_height,
        )
    }

    pub fn jagged_edge(constants: &ConstantProvider) -> Self {
        Self::sized(
            constants,
            Types::JAGGED_EDGE,
            constants.jagged_teeth_width,
            constants.jagged_teeth_height,
        )
    }

    /// Height the element claims above the capline. Non-zero only for hats.
    pub fn ascender_height(&self) -> f64 {
        if self.types.is_hat() {
            self.height
        } else {
            0.0
        }
    }
}

/// Horizontal gap between two elements of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InRowSpacer {
    pub base: Measurable,
}

impl InRowSpacer {
    pub fn new(constants: &ConstantProvider, width: f64) -> Self {
        Self {
            base: Measurable::sized(
                constants,
                Types::SPACER | Types::IN_ROW_SPACER,
                width,
                constants.spacer_default_height,
            ),
        }
    }
}
