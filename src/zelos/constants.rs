use crate::constants::{ConstantProvider, ShapeStyle};

/// Every rounded-style size is a multiple of this.
pub const GRID_UNIT: f64 = 4.0;

/// Geometry of the rounded style.
pub fn constants() -> ConstantProvider {
    let base = ConstantProvider::common();
    let medium_padding = 2.0 * GRID_UNIT;
    let notch_offset_left = 3.0 * GRID_UNIT;
    let large_padding = 4.0 * GRID_UNIT;
    ConstantProvider {
        shape_style: ShapeStyle::Rounded,

        small_padding: GRID_UNIT,
        medium_padding,
        medium_large_padding: 3.0 * GRID_UNIT,
        large_padding,
        tall_input_field_offset_y: medium_padding,

        tab_offset_from_top: 0.0,
        notch_width: 9.0 * GRID_UNIT,
        notch_height: 2.0 * GRID_UNIT,
        notch_offset_left,
        statement_input_notch_offset: notch_offset_left,
        max_dynamic_connection_shape_width: 12.0 * GRID_UNIT,

        corner_radius: GRID_UNIT,
        min_block_width: 2.0 * GRID_UNIT,
        min_block_height: 12.0 * GRID_UNIT,
        dummy_input_min_height: 8.0 * GRID_UNIT,
        dummy_input_shadow_min_height: 6.0 * GRID_UNIT,

        statement_bottom_spacer: -2.0 * GRID_UNIT,
        statement_input_padding_left: 4.0 * GRID_UNIT,
        empty_statement_input_height: 6.0 * GRID_UNIT,
        empty_inline_input_padding: 4.0 * GRID_UNIT,
        empty_inline_input_height: 8.0 * GRID_UNIT,

        top_row_min_height: GRID_UNIT,
        top_row_precedes_statement_min_height: large_padding,
        bottom_row_min_height: GRID_UNIT,
        bottom_row_after_statement_min_height: 6.0 * GRID_UNIT,

        start_hat_height: 22.0,
        start_hat_width: 96.0,
        jagged_teeth_height: 0.0,
        jagged_teeth_width: 0.0,

        cursor_ws_width: 20.0 * GRID_UNIT,
        cursor_colour: "#ffa200".to_string(),
        cursor_radius: 5.0,

        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ShapeKind;
    use crate::model::{ConnectionType, OutputShape};

    #[test]
    fn sizes_sit_on_the_grid() {
        let c = constants();
        for value in [
            c.medium_padding,
            c.notch_width,
            c.notch_height,
            c.corner_radius,
            c.min_block_height,
            c.empty_inline_input_height,
            c.max_dynamic_connection_shape_width,
        ] {
            assert_eq!(value % GRID_UNIT, 0.0, "{value} is off grid");
        }
    }

    #[test]
    fn value_connectors_are_dynamic() {
        let c = constants();
        let boolean = vec!["Boolean".to_string()];
        let shape = c.shape_for_type(ConnectionType::InputValue, &boolean, None);
        assert_eq!(shape.kind(), ShapeKind::Hexagonal);
        assert!(shape.is_dynamic());

        let square =
            c.shape_for_type(ConnectionType::OutputValue, &[], Some(OutputShape::Square));
        assert_eq!(square.kind(), ShapeKind::Square);
        assert_eq!(square.width_for(40.0), c.corner_radius);

        let round = c.shape_for_type(ConnectionType::OutputValue, &[], None);
        assert_eq!(round.width_for(40.0), 20.0);
        assert_eq!(round.width_for(400.0), c.max_dynamic_connection_shape_width);
    }

    #[test]
    fn inside_corners_have_a_right_side() {
        let corners = constants().inside_corners();
        assert_eq!(corners.right_width, GRID_UNIT);
        assert_eq!(corners.right_height, GRID_UNIT);
    }
}
