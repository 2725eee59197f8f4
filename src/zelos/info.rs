use crate::constants::ConstantProvider;
use crate::info::{LayoutPolicy, RenderInfo, common_elem_centerline, has_start_hat};
use crate::measurables::{Element, Measurable, Row, Types};
use crate::model::{BlockModel, InputKind};

/// Layout hooks of the rounded style.
///
/// Value inputs always render inline; blocks without inline inputs put each
/// input on its own row instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZelosLayout;

fn has_statement_input(block: &dyn BlockModel) -> bool {
    block
        .inputs()
        .iter()
        .any(|input| input.kind() == InputKind::Statement)
}

/// Value block with round ends on both sides.
fn has_right_connection(block: &dyn BlockModel) -> bool {
    block.output_connection().is_some()
        && !has_statement_input(block)
        && block.next_connection().is_none()
}

impl LayoutPolicy for ZelosLayout {
    fn is_inline(&self, _block: &dyn BlockModel) -> bool {
        true
    }

    fn is_multi_row(&self, block: &dyn BlockModel) -> bool {
        !block.inputs_inline() || block.is_collapsed()
    }

    fn in_row_spacing(
        &self,
        info: &RenderInfo<'_>,
        prev: Option<&Element<'_>>,
        next: Option<&Element<'_>>,
    ) -> f64 {
        let constants = info.constants;
        let dynamic_ends = info.output_connection.as_ref().is_some_and(|output| {
            output.is_dynamic_shape() && !info.has_statement_input && !info.has_next_connection
        });
        if (prev.is_none() || next.is_none()) && dynamic_ends {
            return constants.no_padding;
        }
        let Some(next) = next else {
            return constants.medium_padding;
        };
        let Some(prev) = prev else {
            if next.types().is_statement_input() {
                return constants.statement_input_padding_left;
            }
            return constants.medium_padding;
        };
        let prev_types = prev.types();
        if prev_types.is_left_round_corner() && next.types().is_previous_or_next_connection() {
            return next.base().notch_offset - constants.corner_radius;
        }
        if prev_types.is_left_square_corner() && next.types().is_hat() {
            return constants.no_padding;
        }
        constants.medium_padding
    }

    fn spacer_row_height(&self, info: &RenderInfo<'_>, prev: &Row<'_>, next: &Row<'_>) -> f64 {
        let constants = info.constants;
        if prev.types.is_top_row() && next.types.is_bottom_row() {
            return constants.empty_block_spacer_height;
        }

        let follows_statement = prev.types.is_input_row() && prev.has_statement;
        let precedes_statement = next.types.is_input_row() && next.has_statement;
        if follows_statement || precedes_statement {
            let corner_height = constants.inside_corners().right_height;
            let height = constants.notch_height.max(corner_height);
            if follows_statement && precedes_statement {
                return height.max(constants.dummy_input_min_height);
            }
            return height;
        }

        if prev.types.is_top_row() {
            if !prev.has_previous_connection
                && (info.output_connection.is_none() || info.has_statement_input)
            {
                return (constants.notch_height - constants.corner_radius).abs();
            }
            return constants.no_padding;
        }

        if next.types.is_bottom_row() {
            if info.output_connection.is_none() {
                let top_height = info
                    .top_row()
                    .min_height
                    .max(constants.notch_height.max(constants.corner_radius));
                return top_height - constants.corner_radius;
            }
            if !next.has_next_connection && info.has_statement_input {
                return (constants.notch_height - constants.corner_radius).abs();
            }
            return constants.no_padding;
        }

        constants.medium_padding
    }

    fn desired_row_width(&self, info: &RenderInfo<'_>, row: &Row<'_>) -> f64 {
        let width = info.width - info.start_x;
        if row.has_statement {
            return width - info.constants.inside_corners().right_width;
        }
        width
    }

    fn top_left_square(&self, block: &dyn BlockModel, constants: &ConstantProvider) -> bool {
        block.output_connection().is_some() || has_start_hat(block, constants)
    }

    fn top_right_square(&self, block: &dyn BlockModel) -> bool {
        has_right_connection(block)
    }

    fn bottom_left_square(&self, block: &dyn BlockModel) -> bool {
        block.output_connection().is_some()
    }

    fn bottom_right_square(&self, block: &dyn BlockModel) -> bool {
        has_right_connection(block)
    }

    fn elem_centerline(
        &self,
        constants: &ConstantProvider,
        row: &Row<'_>,
        element: &Element<'_>,
    ) -> f64 {
        let types = element.types();
        if row.has_statement && !types.is_spacer() && !types.is_statement_input() {
            return row.y_pos + constants.empty_statement_input_height / 2.0;
        }
        if types.is_inline_input() {
            let stacked_value = element
                .as_input()
                .and_then(|input| input.connected_block)
                .filter(|child| {
                    child.output_connection().is_some() && child.next_connection().is_some()
                });
            if let Some(child) = stacked_value {
                return row.y_pos + child.size().height / 2.0;
            }
        }
        common_elem_centerline(row, element)
    }

    fn finalize(&self, info: &mut RenderInfo<'_>) {
        let dynamic = info
            .output_connection
            .as_ref()
            .is_some_and(|output| output.is_dynamic_shape());
        if dynamic {
            fit_dynamic_output(info);
        }
        info.finalize_common(self);
        if let Some(right) = &info.right_side {
            info.width_with_children += right.width;
        }
    }
}

/// Size the output shape from the block height and add the matching
/// right-hand shape when the block has round ends on both sides.
fn fit_dynamic_output(info: &mut RenderInfo<'_>) {
    let mut y_cursor = 0.0;
    for row in &mut info.rows {
        row.y_pos = y_cursor;
        y_cursor += row.height;
    }
    info.height = y_cursor;

    let bottom = info.bottom_row();
    let block_height = if bottom.has_next_connection {
        info.height - bottom.descender_height
    } else {
        info.height
    };
    let Some(output) = info.output_connection.as_mut() else {
        return;
    };
    output.fit_to_height(block_height);
    let connection_width = output.base.width;
    let connection_height = output.base.height;

    let mut right_width = 0.0;
    if !info.has_statement_input && !info.has_next_connection {
        right_width = connection_width;
        let mut right = Measurable::sized(
            info.constants,
            Types::CONNECTION,
            right_width,
            connection_height,
        );
        right.centerline = connection_height / 2.0;
        right.x_pos = info.width + right_width;
        info.right_side = Some(right);
    }
    info.start_x = connection_width;
    info.width += connection_width + right_width;
    info.width_with_children += connection_width + right_width;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockDesc, ConnectionDesc, ConnectionType, FieldDesc, InputDesc};
    use crate::zelos::constants;

    fn measure<'a>(block: &'a BlockDesc, c: &'a ConstantProvider) -> RenderInfo<'a> {
        RenderInfo::measure(block, c, &ZelosLayout)
    }

    #[test]
    fn value_inputs_stay_inline_but_split_rows() {
        let c = constants();
        let block = BlockDesc::new("b")
            .with_previous()
            .with_input(InputDesc::value("A").with_field(FieldDesc::label("a")))
            .with_input(InputDesc::value("B").with_field(FieldDesc::label("b")));
        let info = measure(&block, &c);
        assert!(info.is_inline);
        assert!(info.is_multi_row);

        let input_rows: Vec<_> = info
            .rows
            .iter()
            .filter(|row| row.types.is_input_row())
            .collect();
        assert_eq!(input_rows.len(), 2);
        assert!(input_rows.iter().all(|row| row.has_inline_input));

        let inline = block.clone().inline(true);
        let info = measure(&inline, &c);
        assert!(!info.is_multi_row);
        assert_eq!(info.rows.iter().filter(|row| row.types.is_input_row()).count(), 1);
    }

    #[test]
    fn reporter_blocks_get_round_ends() {
        let c = constants();
        let block = BlockDesc::new("r")
            .with_output()
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::sized(40.0, 16.0)))
            .inline(true);
        let info = measure(&block, &c);

        let output = info.output_connection.as_ref().unwrap();
        assert_eq!(info.height, c.dummy_input_min_height + 2.0 * c.bottom_row_min_height);
        assert_eq!(output.base.height, info.height);
        assert_eq!(output.base.width, info.height / 2.0);
        assert_eq!(info.start_x, output.base.width);

        let right = info.right_side.as_ref().unwrap();
        assert_eq!(right.width, output.base.width);
        assert_eq!(right.centerline, info.height / 2.0);
        assert_eq!(info.width, 40.0 + 2.0 * output.base.width);
        assert_eq!(info.width_with_children, info.width);
    }

    #[test]
    fn blocks_with_statements_have_no_right_shape() {
        let c = constants();
        let block = BlockDesc::new("r")
            .with_output()
            .with_input(InputDesc::statement("DO"));
        let info = measure(&block, &c);
        assert!(info.right_side.is_none());
        assert!(info.top_row().elements.last().unwrap().types().is_right_round_corner());
    }

    #[test]
    fn spacers_around_statements_fit_the_inside_corner() {
        let c = constants();
        let block = BlockDesc::new("loop")
            .with_previous()
            .with_next()
            .with_input(InputDesc::dummy("HEAD").with_field(FieldDesc::label("repeat")))
            .with_input(InputDesc::statement("DO"))
            .with_input(InputDesc::dummy("TAIL").with_field(FieldDesc::label("end")));
        let info = measure(&block, &c);

        let statement = info
            .rows
            .iter()
            .position(|row| row.has_statement)
            .unwrap();
        let expected = c.notch_height.max(c.inside_corners().right_height);
        assert_eq!(info.rows[statement - 1].height, expected);
        assert_eq!(info.rows[statement + 1].height, expected);

        let row = &info.rows[statement];
        let header = info.rows[statement - 2].width;
        assert_eq!(row.width, header - c.inside_corners().right_width);
    }

    #[test]
    fn fields_beside_statements_centre_on_the_mouth() {
        let c = constants();
        let block = BlockDesc::new("if").with_input(
            InputDesc::statement("DO").with_field(FieldDesc::label("do")),
        );
        let info = measure(&block, &c);
        let row = info.rows.iter().find(|row| row.has_statement).unwrap();
        let field = row.elements.iter().find(|e| e.types().is_field()).unwrap();
        assert_eq!(
            field.base().centerline,
            row.y_pos + c.empty_statement_input_height / 2.0
        );
    }

    #[test]
    fn empty_blocks_use_the_empty_spacer() {
        let c = constants();
        let block = BlockDesc::new("empty").with_previous().with_next();
        let info = measure(&block, &c);
        assert_eq!(info.rows.len(), 3);
        assert_eq!(info.rows[1].height, c.empty_block_spacer_height);
    }

    #[test]
    fn square_corners_follow_the_output() {
        let c = constants();
        let statement = BlockDesc::new("s").with_previous();
        assert!(!ZelosLayout.top_left_square(&statement, &c));
        assert!(!ZelosLayout.bottom_left_square(&statement));

        let value = BlockDesc::new("v").with_output();
        assert!(ZelosLayout.top_left_square(&value, &c));
        assert!(ZelosLayout.top_right_square(&value));

        let mut stacked_value = value.clone();
        stacked_value.next = Some(ConnectionDesc::new(ConnectionType::NextStatement));
        assert!(!ZelosLayout.top_right_square(&stacked_value));
    }
}
