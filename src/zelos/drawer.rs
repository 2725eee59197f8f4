use crate::draw::{DrawOutput, DrawSteps, Drawer, draw_common_left, draw_common_outline};
use crate::info::RenderInfo;
use crate::measurables::{InputConnection, Row};
use crate::paths::{line_on_axis, move_by, move_to};

/// Drawer of the rounded style.
pub struct ZelosDrawer<'i> {
    info: &'i RenderInfo<'i>,
    output: DrawOutput,
}

impl<'i> ZelosDrawer<'i> {
    pub fn new(info: &'i RenderInfo<'i>) -> Self {
        Self {
            info,
            output: DrawOutput::default(),
        }
    }

    /// Value blocks without statements or a next connection are drawn as a
    /// flat bar between two shaped ends.
    fn has_dynamic_ends(&self) -> bool {
        let info = self.info;
        info.output_connection
            .as_ref()
            .is_some_and(|output| output.is_dynamic_shape())
            && !info.has_statement_input
            && !info.bottom_row().has_next_connection
    }

    fn draw_flat_top(&mut self) {
        let info = self.info;
        let top = info.top_row();
        self.position_previous_connection();
        self.output.outline_path +=
            &(move_by(top.x_pos, info.start_y) + &line_on_axis("h", top.width));
    }

    fn draw_right_dynamic_connection(&mut self) {
        if let Some(output) = &self.info.output_connection {
            self.output.outline_path += &output.shape.path_right_down(output.base.height);
        }
    }

    fn draw_flat_bottom(&mut self) {
        let bottom = self.info.bottom_row();
        self.position_next_connection();
        self.output.outline_path +=
            &(line_on_axis("V", bottom.baseline) + &line_on_axis("h", -bottom.width));
    }

    fn draw_left_dynamic_connection(&mut self) {
        self.position_output_connection();
        if let Some(output) = &self.info.output_connection {
            self.output.outline_path += &output.shape.path_up(output.base.height);
        }
        self.output.outline_path.push('z');
    }
}

impl<'i> DrawSteps<'i> for ZelosDrawer<'i> {
    fn info(&self) -> &'i RenderInfo<'i> {
        self.info
    }

    fn output(&mut self) -> &mut DrawOutput {
        &mut self.output
    }

    fn draw_outline(&mut self) {
        if self.has_dynamic_ends() {
            self.draw_flat_top();
            self.draw_right_dynamic_connection();
            self.draw_flat_bottom();
            self.draw_left_dynamic_connection();
        } else {
            draw_common_outline(self);
        }
    }

    fn draw_left(&mut self) {
        let dynamic = self
            .info
            .output_connection
            .as_ref()
            .is_some_and(|output| output.is_dynamic_shape());
        if dynamic {
            self.draw_left_dynamic_connection();
        } else {
            draw_common_left(self);
        }
    }

    /// Spacer rows next to a statement input round off the inner right
    /// corners of its mouth.
    fn draw_right_side_row(&mut self, index: usize) {
        let rows = &self.info.rows;
        let row = &rows[index];
        if row.height <= 0.0 {
            return;
        }
        if row.is_spacer() {
            let follows_statement = index > 0 && rows[index - 1].has_statement;
            let precedes_statement = rows.get(index + 1).is_some_and(|next| next.has_statement);
            if follows_statement || precedes_statement {
                let corners = self.info.constants.inside_corners();
                let corner_height = if precedes_statement {
                    corners.right_height
                } else {
                    0.0
                };
                let remaining = row.height - corner_height;
                let mut path = String::new();
                if follows_statement {
                    path += &corners.path_bottom_right;
                }
                if remaining > 0.0 {
                    path += &line_on_axis("V", row.y_pos + remaining);
                }
                if precedes_statement {
                    path += &corners.path_top_right;
                }
                self.output.outline_path += &path;
                return;
            }
        }
        self.output.outline_path += &line_on_axis("V", row.y_pos + row.height);
    }

    fn draw_statement_input(&mut self, row: &'i Row<'i>) {
        let Some(input) = row.last_input() else {
            return;
        };
        let inside = self.info.constants.inside_corners();
        let x = input.base.x_pos + input.base.notch_offset + input.shape.static_width();
        let inner_top_left = input.shape.path_right().to_string()
            + &line_on_axis("h", -(input.base.notch_offset - inside.width))
            + &inside.path_top;
        let inner_height = row.height - 2.0 * inside.height;
        let inner_bottom_left = inside.path_bottom.clone()
            + &line_on_axis("h", input.base.notch_offset - inside.width)
            + input.shape.path_left();
        self.output.outline_path += &(line_on_axis("H", x)
            + &inner_top_left
            + &line_on_axis("v", inner_height)
            + &inner_bottom_left
            + &line_on_axis("H", row.x_pos + row.width));
        self.position_statement_input_connection(row);
    }

    /// Empty inline inputs get their own outline instead of a hole.
    fn draw_inline_input(&mut self, input: &'i InputConnection<'i>) {
        self.position_inline_input_connection(input);
        if input.connected_block.is_some() || self.info.is_insertion_marker {
            return;
        }
        let width = input.base.width - input.connection_width * 2.0;
        let height = input.base.height;
        let y_pos = input.base.centerline - height / 2.0;
        let connection_right = input.base.x_pos + input.connection_width;
        let path = move_to(connection_right, y_pos)
            + &line_on_axis("h", width)
            + &input.shape.path_right_down(height)
            + &line_on_axis("h", -width)
            + &input.shape.path_up(height)
            + "z";
        self.output
            .input_outlines
            .push((input.name().to_string(), path));
    }
}

impl Drawer for ZelosDrawer<'_> {
    fn draw(&mut self) -> DrawOutput {
        self.draw_outline();
        self.draw_internals();
        self.finish()
    }
}
