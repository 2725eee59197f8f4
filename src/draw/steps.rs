use crate::constants::ConstantProvider;
use crate::info::RenderInfo;
use crate::measurables::{Field, InputConnection, Row};
use crate::model::ConnectionType;
use crate::paths::{line_on_axis, move_by, move_to};

use super::{ConnectionPlacement, DrawOutput, FieldPlacement};

/// Steps of a block draw. Styles override individual steps; the defaults
/// draw the common style.
///
/// Steps only read the measured geometry. Anything they produce goes into
/// [`DrawSteps::output`].
pub trait DrawSteps<'i> {
    fn info(&self) -> &'i RenderInfo<'i>;

    fn output(&mut self) -> &mut DrawOutput;

    fn constants(&self) -> &'i ConstantProvider {
        self.info().constants
    }

    fn draw_outline(&mut self) {
        draw_common_outline(self);
    }

    fn draw_top(&mut self) {
        let info = self.info();
        let constants = info.constants;
        let corners = constants.outside_corners();
        let top = info.top_row();
        self.position_previous_connection();

        let mut path = move_by(top.x_pos, info.start_y);
        for element in &top.elements {
            let types = element.types();
            if types.is_left_round_corner() {
                path += &corners.top_left;
            } else if types.is_right_round_corner() {
                path += &corners.top_right;
            } else if types.is_previous_connection() {
                if let Some(connection) = element.as_connection() {
                    path += connection.shape.path_left();
                }
            } else if types.is_hat() {
                path += &constants.start_hat().path;
            } else if types.is_spacer() {
                path += &line_on_axis("h", element.width());
            }
        }
        path += &line_on_axis("v", top.height);
        self.output().outline_path += &path;
    }

    fn draw_jagged_edge(&mut self, row: &'i Row<'i>) {
        let teeth = self.constants().jagged_teeth();
        let remainder = row.height - teeth.height;
        self.output().outline_path += &(teeth.path + &line_on_axis("v", remainder));
    }

    fn draw_value_input(&mut self, row: &'i Row<'i>) {
        let Some(input) = row.last_input() else {
            return;
        };
        self.position_external_value_connection(row);
        let path_down = input.shape.path_down(input.base.height);
        let path = line_on_axis("H", input.base.x_pos + input.base.width)
            + &path_down
            + &line_on_axis("v", row.height - input.connection_height);
        self.output().outline_path += &path;
    }

    fn draw_statement_input(&mut self, row: &'i Row<'i>) {
        let Some(input) = row.last_input() else {
            return;
        };
        let inside = self.constants().inside_corners();
        let x = input.base.x_pos + input.base.notch_offset + input.shape.static_width();
        let inner_top_left = input.shape.path_right().to_string()
            + &line_on_axis("h", -(input.base.notch_offset - inside.width))
            + &inside.path_top;
        let inner_height = row.height - 2.0 * inside.height;
        let path = line_on_axis("H", x)
            + &inner_top_left
            + &line_on_axis("v", inner_height)
            + &inside.path_bottom
            + &line_on_axis("H", row.x_pos + row.width);
        self.output().outline_path += &path;
        self.position_statement_input_connection(row);
    }

    /// Plain right edge of the row at `index`.
    fn draw_right_side_row(&mut self, index: usize) {
        let row = &self.info().rows[index];
        self.output().outline_path += &line_on_axis("V", row.y_pos + row.height);
    }

    fn draw_bottom(&mut self) {
        let info = self.info();
        let corners = info.constants.outside_corners();
        let bottom = info.bottom_row();
        self.position_next_connection();

        let mut right_corner_y_offset = 0.0;
        let mut path = String::new();
        for element in bottom.elements.iter().rev() {
            let types = element.types();
            if types.is_next_connection() {
                if let Some(connection) = element.as_connection() {
                    path += connection.shape.path_right();
                }
            } else if types.is_left_square_corner() {
                path += &line_on_axis("H", bottom.x_pos);
            } else if types.is_left_round_corner() {
                path += &corners.bottom_left;
            } else if types.is_right_round_corner() {
                path += &corners.bottom_right;
                right_corner_y_offset = corners.right_height;
            } else if types.is_spacer() {
                path += &line_on_axis("h", -element.width());
            }
        }
        let output = self.output();
        output.outline_path += &line_on_axis("V", bottom.baseline - right_corner_y_offset);
        output.outline_path += &path;
    }

    fn draw_left(&mut self) {
        draw_common_left(self);
    }

    fn draw_internals(&mut self) {
        let info = self.info();
        for row in &info.rows {
            for element in &row.elements {
                if let Some(input) = element.as_input() {
                    if element.types().is_inline_input() {
                        self.draw_inline_input(input);
                    }
                } else if let Some(field) = element.as_field() {
                    self.layout_field(field);
                }
            }
        }
    }

    /// Hole for an inline value input.
    fn draw_inline_input(&mut self, input: &'i InputConnection<'i>) {
        let width = input.base.width;
        let height = input.base.height;
        let y_pos = input.base.centerline - height / 2.0;
        let connection_top = input.connection_offset_y;
        let connection_bottom = input.connection_height + connection_top;
        let connection_right = input.base.x_pos + input.connection_width;

        let path = move_to(connection_right, y_pos)
            + &line_on_axis("v", connection_top)
            + &input.shape.path_down(height)
            + &line_on_axis("v", height - connection_bottom)
            + &line_on_axis("h", width - input.connection_width)
            + &line_on_axis("v", -height)
            + "z";
        self.output().inline_path += &path;
        self.position_inline_input_connection(input);
    }

    fn layout_field(&mut self, field: &'i Field<'i>) {
        let info = self.info();
        let base = &field.base;
        let y = base.centerline - base.height / 2.0;
        let mut x = base.x_pos;
        let mut mirrored = false;
        if info.rtl {
            x = -(x + base.width);
            if field.flip_rtl {
                x += base.width;
                mirrored = true;
            }
        }
        self.output().fields.push(FieldPlacement {
            input: field.parent_input.name().to_string(),
            x,
            y,
            width: base.width,
            height: base.height,
            mirrored,
        });
    }

    fn position_inline_input_connection(&mut self, input: &'i InputConnection<'i>) {
        if input.connection.is_none() {
            return;
        }
        let y = input.base.centerline - input.base.height / 2.0;
        let x = input.base.x_pos + input.connection_width + input.connection_offset_x;
        self.place_connection(
            ConnectionType::InputValue,
            Some(input.name()),
            x,
            y + input.connection_offset_y,
        );
    }

    fn position_statement_input_connection(&mut self, row: &'i Row<'i>) {
        let Some(input) = row.last_input().filter(|input| input.connection.is_some()) else {
            return;
        };
        let x = row.x_pos + row.statement_edge + input.base.notch_offset;
        self.place_connection(ConnectionType::NextStatement, Some(input.name()), x, row.y_pos);
    }

    fn position_external_value_connection(&mut self, row: &'i Row<'i>) {
        let Some(input) = row.last_input().filter(|input| input.connection.is_some()) else {
            return;
        };
        let x = row.x_pos + row.width;
        self.place_connection(ConnectionType::InputValue, Some(input.name()), x, row.y_pos);
    }

    fn position_previous_connection(&mut self) {
        let top = self.info().top_row();
        if top.connection().is_some() {
            let x = top.x_pos + top.notch_offset;
            self.place_connection(ConnectionType::PreviousStatement, None, x, 0.0);
        }
    }

    fn position_next_connection(&mut self) {
        let bottom = self.info().bottom_row();
        if let Some(connection) = bottom.connection() {
            let x = connection.base.x_pos;
            self.place_connection(ConnectionType::NextStatement, None, x, bottom.baseline);
        }
    }

    fn position_output_connection(&mut self) {
        let info = self.info();
        if let Some(output) = &info.output_connection {
            let x = info.start_x + output.connection_offset_x;
            self.place_connection(
                ConnectionType::OutputValue,
                None,
                x,
                output.connection_offset_y,
            );
        }
    }

    /// Record a connection offset, mirrored for right-to-left blocks.
    fn place_connection(&mut self, kind: ConnectionType, input: Option<&str>, x: f64, y: f64) {
        let x = if self.info().rtl { -x } else { x };
        self.output().connections.push(ConnectionPlacement {
            kind,
            input: input.map(str::to_string),
            x,
            y,
        });
    }

    /// Copy the block's outer size into the output and hand it over.
    fn finish(&mut self) -> DrawOutput {
        let info = self.info();
        let output = self.output();
        output.width = info.width;
        output.height = info.height;
        output.width_with_children = info.width_with_children;
        output.rtl = info.rtl;
        output.output_shape = info
            .output_connection
            .as_ref()
            .map(|connection| connection.shape.kind());
        std::mem::take(output)
    }
}

/// Common outline: top, one right-side step per inner row, bottom, left.
pub fn draw_common_outline<'i, S>(steps: &mut S)
where
    S: DrawSteps<'i> + ?Sized,
{
    let info = steps.info();
    steps.draw_top();
    let last = info.rows.len().saturating_sub(1);
    for index in 1..last {
        let row = &info.rows[index];
        if row.has_jagged_edge {
            steps.draw_jagged_edge(row);
        } else if row.has_statement {
            steps.draw_statement_input(row);
        } else if row.has_external_input {
            steps.draw_value_input(row);
        } else {
            steps.draw_right_side_row(index);
        }
    }
    steps.draw_bottom();
    steps.draw_left();
}

/// Common left edge: up to the output tab, the tab, then close the path.
pub fn draw_common_left<'i, S>(steps: &mut S)
where
    S: DrawSteps<'i> + ?Sized,
{
    let info = steps.info();
    steps.position_output_connection();
    let mut path = String::new();
    if let Some(output) = &info.output_connection {
        let tab_bottom = output.connection_offset_y + output.base.height;
        path += &line_on_axis("V", tab_bottom);
        path += &output.shape.path_up(info.height);
    }
    path.push('z');
    steps.output().outline_path += &path;
}
