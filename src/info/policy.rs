use crate::constants::ConstantProvider;
use crate::measurables::{Element, Row};
use crate::model::{BlockModel, HatStyle, InputKind, InputModel};

use super::RenderInfo;

/// Style hooks consulted while a block is measured.
///
/// The pass itself is fixed in [`RenderInfo::measure`]; a style changes the
/// outcome only through these methods. Every hook has the common style's
/// behaviour as its default.
pub trait LayoutPolicy {
    fn is_inline(&self, block: &dyn BlockModel) -> bool {
        block.inputs_inline() && !block.is_collapsed()
    }

    /// Forces value and dummy inputs onto their own rows even when the
    /// block renders inline.
    fn is_multi_row(&self, _block: &dyn BlockModel) -> bool {
        false
    }

    fn should_start_new_row(
        &self,
        info: &RenderInfo<'_>,
        current: &dyn InputModel,
        previous: Option<&dyn InputModel>,
    ) -> bool {
        let Some(previous) = previous else {
            return false;
        };
        if current.kind() == InputKind::Statement || previous.kind() == InputKind::Statement {
            return true;
        }
        !info.is_inline || info.is_multi_row
    }

    fn in_row_spacing(
        &self,
        info: &RenderInfo<'_>,
        prev: Option<&Element<'_>>,
        next: Option<&Element<'_>>,
    ) -> f64 {
        common_in_row_spacing(info.constants, prev, next)
    }

    fn spacer_row_height(&self, info: &RenderInfo<'_>, _prev: &Row<'_>, _next: &Row<'_>) -> f64 {
        info.constants.medium_padding
    }

    fn spacer_row_width(&self, info: &RenderInfo<'_>, _prev: &Row<'_>, _next: &Row<'_>) -> f64 {
        info.width - info.start_x
    }

    fn desired_row_width(&self, info: &RenderInfo<'_>, _row: &Row<'_>) -> f64 {
        info.width - info.start_x
    }

    fn top_left_square(&self, block: &dyn BlockModel, constants: &ConstantProvider) -> bool {
        block.output_connection().is_some()
            || has_start_hat(block, constants)
            || block.is_stacked_below()
    }

    fn top_right_square(&self, _block: &dyn BlockModel) -> bool {
        true
    }

    fn bottom_left_square(&self, block: &dyn BlockModel) -> bool {
        block.output_connection().is_some()
            || block
                .next_connection()
                .is_some_and(|next| next.is_connected())
    }

    fn bottom_right_square(&self, _block: &dyn BlockModel) -> bool {
        true
    }

    fn elem_centerline(
        &self,
        _constants: &ConstantProvider,
        row: &Row<'_>,
        element: &Element<'_>,
    ) -> f64 {
        common_elem_centerline(row, element)
    }

    /// Last step of the pass: positions, total size and baseline.
    fn finalize(&self, info: &mut RenderInfo<'_>) {
        info.finalize_common(self);
    }
}

/// Layout of the common style.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonLayout;

impl LayoutPolicy for CommonLayout {}

/// Whether the block gets a start hat instead of a flat top.
pub fn has_start_hat(block: &dyn BlockModel, constants: &ConstantProvider) -> bool {
    let wants_hat = match block.hat() {
        Some(HatStyle::Cap) => true,
        Some(HatStyle::None) => false,
        None => constants.add_start_hats,
    };
    wants_hat && block.output_connection().is_none() && block.previous_connection().is_none()
}

pub fn common_in_row_spacing(
    constants: &ConstantProvider,
    prev: Option<&Element<'_>>,
    next: Option<&Element<'_>>,
) -> f64 {
    let prev_types = prev.map(Element::types);
    let next_types = next.map(Element::types);

    if prev.is_none() && next_types.is_some_and(|types| types.is_statement_input()) {
        return constants.statement_input_padding_left;
    }

    if let (Some(prev_types), None) = (prev_types, next_types) {
        if prev_types.is_external_input() || prev_types.is_statement_input() {
            return constants.no_padding;
        }
        if prev_types.is_inline_input() {
            return constants.large_padding;
        }
    }

    if let (Some(prev_types), Some(next)) = (prev_types, next) {
        if next.types().is_previous_or_next_connection() {
            if prev_types.is_left_square_corner() {
                return next.base().notch_offset;
            }
            if prev_types.is_left_round_corner() {
                return next.base().notch_offset - constants.corner_radius;
            }
        }
    }

    constants.medium_padding
}

pub fn common_elem_centerline(row: &Row<'_>, element: &Element<'_>) -> f64 {
    let base = element.base();
    if row.is_spacer() {
        return row.y_pos + base.height / 2.0;
    }
    if row.types.is_bottom_row() {
        let baseline = row.y_pos + row.height - row.descender_height;
        return if base.types.is_next_connection() {
            baseline + base.height / 2.0
        } else {
            baseline - base.height / 2.0
        };
    }
    if row.types.is_top_row() {
        return if base.types.is_hat() {
            row.capline - base.height / 2.0
        } else {
            row.capline + base.height / 2.0
        };
    }
    row.y_pos + row.height / 2.0
}
