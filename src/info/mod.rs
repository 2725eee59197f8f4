//! Measurement pass: turns one block into a finished tree of rows.
//!
//! The pass runs once per render request. Its result is read-only input to
//! the drawer; nothing is measured again after [`RenderInfo::measure`]
//! returns.

pub mod policy;

use crate::constants::ConstantProvider;
use crate::measurables::{
    ConnectionMeasurable, Element, Field, InRowSpacer, InputConnection, Measurable, Row,
};
use crate::model::{BlockModel, InputKind, InputModel};

pub use policy::{
    CommonLayout, LayoutPolicy, common_elem_centerline, common_in_row_spacing, has_start_hat,
};

/// Measured geometry of one block.
///
/// `rows` always starts with the top row and ends with the bottom row, with
/// a spacer row between every pair of content rows.
#[derive(Debug)]
pub struct RenderInfo<'a> {
    pub block: &'a dyn BlockModel,
    pub constants: &'a ConstantProvider,
    pub rows: Vec<Row<'a>>,
    pub output_connection: Option<ConnectionMeasurable<'a>>,
    /// Right-hand output shape of rounded value blocks.
    pub right_side: Option<Measurable>,
    pub is_inline: bool,
    pub is_multi_row: bool,
    pub is_collapsed: bool,
    pub is_insertion_marker: bool,
    pub rtl: bool,
    pub has_statement_input: bool,
    pub has_next_connection: bool,
    pub width: f64,
    pub height: f64,
    pub width_with_children: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub statement_edge: f64,
}

impl<'a> RenderInfo<'a> {
    /// Measure `block` with the given constants and style hooks.
    pub fn measure<P>(
        block: &'a dyn BlockModel,
        constants: &'a ConstantProvider,
        policy: &P,
    ) -> Self
    where
        P: LayoutPolicy + ?Sized,
    {
        let inputs = block.inputs();
        let mut info = Self {
            block,
            constants,
            rows: Vec::new(),
            output_connection: block
                .output_connection()
                .map(|output| ConnectionMeasurable::output(constants, output, block)),
            right_side: None,
            is_inline: policy.is_inline(block),
            is_multi_row: policy.is_multi_row(block),
            is_collapsed: block.is_collapsed(),
            is_insertion_marker: block.is_insertion_marker(),
            rtl: block.is_rtl(),
            has_statement_input: inputs
                .iter()
                .any(|input| input.kind() == InputKind::Statement),
            has_next_connection: block.next_connection().is_some(),
            width: 0.0,
            height: 0.0,
            width_with_children: 0.0,
            start_x: 0.0,
            start_y: 0.0,
            statement_edge: 0.0,
        };
        info.create_rows(policy);
        info.add_elem_spacing(policy);
        info.compute_bounds();
        info.align_row_elements(policy);
        info.add_row_spacing(policy);
        policy.finalize(&mut info);
        info
    }

    pub fn top_row(&self) -> &Row<'a> {
        &self.rows[0]
    }

    pub fn bottom_row(&self) -> &Row<'a> {
        &self.rows[self.rows.len() - 1]
    }

    pub fn spacer_row_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_spacer()).count()
    }

    pub fn element_count(&self) -> usize {
        self.rows.iter().map(|row| row.elements.len()).sum()
    }

    pub fn field_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.elements)
            .filter(|element| element.types().is_field())
            .count()
    }

    fn create_rows<P: LayoutPolicy + ?Sized>(&mut self, policy: &P) {
        let block = self.block;
        let constants = self.constants;
        let mut rows = vec![self.top_row_for(policy)];

        let mut active = Row::input(constants);
        let mut last_input: Option<&'a dyn InputModel> = None;
        for input in block.inputs() {
            if !input.is_visible() {
                continue;
            }
            if policy.should_start_new_row(self, input, last_input) {
                rows.push(std::mem::replace(&mut active, Row::input(constants)));
            }
            for field in input.fields() {
                if field.is_visible() {
                    active.push(Field::new(constants, field, input));
                }
            }
            self.add_input(input, &mut active);
            last_input = Some(input);
        }

        if self.is_collapsed {
            active.has_jagged_edge = true;
            active.push(Measurable::jagged_edge(constants));
        }
        if !active.elements.is_empty() || active.has_dummy_input {
            rows.push(active);
        }
        rows.push(self.bottom_row_for(policy));
        self.rows = rows;
    }

    fn top_row_for<P: LayoutPolicy + ?Sized>(&self, policy: &P) -> Row<'a> {
        let block = self.block;
        let constants = self.constants;
        let mut row = Row::top(constants);

        row.push(corner(constants, policy.top_left_square(block, constants), false));
        if has_start_hat(block, constants) {
            let hat = Measurable::hat(constants);
            row.capline = hat.ascender_height();
            row.push(hat);
        } else if let Some(previous) = block.previous_connection() {
            row.has_previous_connection = true;
            row.push(ConnectionMeasurable::previous(constants, previous, block));
        }

        let precedes_statement = block
            .inputs()
            .first()
            .is_some_and(|input| input.kind() == InputKind::Statement);
        row.min_height = if precedes_statement && !self.is_collapsed {
            constants.top_row_precedes_statement_min_height
        } else {
            constants.top_row_min_height
        };
        row.push(corner(constants, policy.top_right_square(block), true));
        row
    }

    fn bottom_row_for<P: LayoutPolicy + ?Sized>(&self, policy: &P) -> Row<'a> {
        let block = self.block;
        let constants = self.constants;
        let mut row = Row::bottom(constants);
        row.has_next_connection = self.has_next_connection;

        let follows_statement = block
            .inputs()
            .last()
            .is_some_and(|input| input.kind() == InputKind::Statement);
        row.min_height = if follows_statement {
            constants.bottom_row_after_statement_min_height
        } else {
            constants.bottom_row_min_height
        };

        row.push(corner(constants, policy.bottom_left_square(block), false));
        if let Some(next) = block.next_connection() {
            row.push(ConnectionMeasurable::next(constants, next, block));
        }
        row.push(corner(constants, policy.bottom_right_square(block), true));
        row
    }

    fn add_input(&self, input: &'a dyn InputModel, row: &mut Row<'a>) {
        let constants = self.constants;
        let block = self.block;
        match input.kind() {
            InputKind::Value if self.is_inline => {
                row.push(InputConnection::inline(constants, input, block));
                row.has_inline_input = true;
            }
            InputKind::Statement => {
                row.push(InputConnection::statement(constants, input, block));
                row.has_statement = true;
            }
            InputKind::Value => {
                row.push(InputConnection::external(constants, input, block));
                row.has_external_input = true;
            }
            InputKind::Dummy => {
                let min_height = if block.is_shadow() {
                    constants.dummy_input_shadow_min_height
                } else {
                    constants.dummy_input_min_height
                };
                row.min_height = row.min_height.max(min_height);
                row.has_dummy_input = true;
            }
        }
        if row.align.is_none() {
            row.align = Some(input.align());
        }
    }

    fn add_elem_spacing<P: LayoutPolicy + ?Sized>(&mut self, policy: &P) {
        for index in 0..self.rows.len() {
            let row = &self.rows[index];
            let elements = &row.elements;
            let leading = row
                .starts_with_elem_spacer()
                .then(|| policy.in_row_spacing(self, None, elements.first()));
            let between: Vec<f64> = elements
                .windows(2)
                .map(|pair| policy.in_row_spacing(self, Some(&pair[0]), Some(&pair[1])))
                .collect();
            let trailing = (!elements.is_empty() && row.ends_with_elem_spacer())
                .then(|| policy.in_row_spacing(self, elements.last(), None));

            let constants = self.constants;
            let row = &mut self.rows[index];
            let old = std::mem::take(&mut row.elements);
            let mut spaced: Vec<Element<'a>> = Vec::with_capacity(old.len() * 2 + 1);
            if let Some(width) = leading {
                spaced.push(InRowSpacer::new(constants, width).into());
            }
            for (position, element) in old.into_iter().enumerate() {
                if position > 0 {
                    spaced.push(InRowSpacer::new(constants, between[position - 1]).into());
                }
                spaced.push(element);
            }
            if let Some(width) = trailing {
                spaced.push(InRowSpacer::new(constants, width).into());
            }
            row.elements = spaced;
        }
    }

    fn compute_bounds(&mut self) {
        let mut widest_statement_row_fields: f64 = 0.0;
        let mut block_width: f64 = 0.0;
        let mut widest_row_with_connected_blocks: f64 = 0.0;
        for row in &mut self.rows {
            row.measure();
            block_width = block_width.max(row.width);
            if row.has_statement {
                let input_width = row.last_input().map_or(0.0, |input| input.base.width);
                widest_statement_row_fields = widest_statement_row_fields.max(row.width - input_width);
            }
            widest_row_with_connected_blocks =
                widest_row_with_connected_blocks.max(row.width_with_connected_blocks);
        }

        self.statement_edge = widest_statement_row_fields;
        self.width = block_width.max(self.constants.min_block_width);
        for row in self.rows.iter_mut().filter(|row| row.has_statement) {
            row.statement_edge = widest_statement_row_fields;
        }
        self.width_with_children = self.width.max(widest_row_with_connected_blocks);

        if let Some(output) = &self.output_connection {
            self.start_x = output.base.width;
            self.width += output.base.width;
            self.width_with_children += output.base.width;
        }
    }

    fn align_row_elements<P: LayoutPolicy + ?Sized>(&mut self, policy: &P) {
        for index in 0..self.rows.len() {
            let desired_width = policy.desired_row_width(self, &self.rows[index]);
            if self.rows[index].has_statement {
                self.align_statement_row(index, desired_width);
                continue;
            }
            let row = &mut self.rows[index];
            let missing = desired_width - row.width;
            if missing > 0.0 {
                row.add_alignment_padding(missing);
            }
            if row.types.is_top_or_bottom_row() {
                row.width_with_connected_blocks = row.width;
            }
        }
    }

    fn align_statement_row(&mut self, index: usize, desired_width: f64) {
        let statement_edge = self.statement_edge;
        let row = &mut self.rows[index];

        let input_width = row.last_input().map_or(0.0, |input| input.base.width);
        let missing = statement_edge - (row.width - input_width);
        if missing > 0.0 {
            row.add_alignment_padding(missing);
        }

        let stretch = desired_width - row.width;
        let row_height = row.height;
        if let Some(input) = row.last_input_mut() {
            input.base.width += stretch;
            input.base.height = input.base.height.max(row_height);
        }
        row.width += stretch;
        row.width_with_connected_blocks = row
            .width
            .max(statement_edge + row.connected_block_widths);
    }

    fn add_row_spacing<P: LayoutPolicy + ?Sized>(&mut self, policy: &P) {
        let gaps: Vec<(f64, f64)> = self
            .rows
            .windows(2)
            .map(|pair| {
                (
                    policy.spacer_row_height(self, &pair[0], &pair[1]),
                    policy.spacer_row_width(self, &pair[0], &pair[1]),
                )
            })
            .collect();

        let constants = self.constants;
        let old = std::mem::take(&mut self.rows);
        let mut rows = Vec::with_capacity(old.len() + gaps.len());
        let mut gaps = gaps.into_iter();
        for row in old {
            if !rows.is_empty() {
                if let Some((height, width)) = gaps.next() {
                    rows.push(Row::spacer(constants, height, width));
                }
            }
            rows.push(row);
        }
        self.rows = rows;
    }

    /// Positions every row and element and settles the block's outer size.
    pub fn finalize_common<P: LayoutPolicy + ?Sized>(&mut self, policy: &P) {
        let constants = self.constants;
        let start_x = self.start_x;
        let mut widest_row_with_connected_blocks: f64 = 0.0;
        let mut y_cursor = 0.0;
        for row in &mut self.rows {
            row.y_pos = y_cursor;
            row.x_pos = start_x;
            y_cursor += row.height;
            widest_row_with_connected_blocks =
                widest_row_with_connected_blocks.max(row.width_with_connected_blocks);
            record_elem_positions(policy, constants, row);
        }

        if self.output_connection.is_some() {
            let next_child = self
                .block
                .next_connection()
                .and_then(|next| next.target_block());
            if let Some(child) = next_child {
                widest_row_with_connected_blocks =
                    widest_row_with_connected_blocks.max(child.size().width);
            }
        }

        self.width_with_children = widest_row_with_connected_blocks + self.start_x;
        self.height = y_cursor;
        self.start_y = self.rows[0].capline;
        let last = self.rows.len() - 1;
        let bottom = &mut self.rows[last];
        bottom.baseline = y_cursor - bottom.descender_height;
    }
}

fn corner(constants: &ConstantProvider, square: bool, right: bool) -> Measurable {
    if square {
        Measurable::square_corner(constants, right)
    } else {
        Measurable::round_corner(constants, right)
    }
}

fn record_elem_positions<P: LayoutPolicy + ?Sized>(
    policy: &P,
    constants: &ConstantProvider,
    row: &mut Row<'_>,
) {
    let row_height = row.height;
    for element in &mut row.elements {
        if element.types().is_spacer() {
            element.base_mut().height = row_height;
        }
    }

    let mut x_cursor = row.x_pos;
    let positions: Vec<(f64, f64)> = row
        .elements
        .iter()
        .map(|element| {
            let x = x_cursor;
            x_cursor += element.width();
            (x, policy.elem_centerline(constants, row, element))
        })
        .collect();
    for (element, (x, centerline)) in row.elements.iter_mut().zip(positions) {
        let base = element.base_mut();
        base.x_pos = x;
        base.centerline = centerline;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Align, BlockDesc, FieldDesc, InputDesc};

    fn measure(block: &BlockDesc, constants: &ConstantProvider) -> (f64, f64, usize) {
        let info = RenderInfo::measure(block, constants, &CommonLayout);
        (info.width, info.height, info.rows.len())
    }

    #[test]
    fn rows_alternate_with_spacers() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_previous()
            .with_next()
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::sized(40.0, 16.0)))
            .with_input(InputDesc::dummy("B").with_field(FieldDesc::sized(20.0, 16.0)));
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);

        assert_eq!(info.rows.len(), 7);
        assert!(info.top_row().types.is_top_row());
        assert!(info.bottom_row().types.is_bottom_row());
        for (index, row) in info.rows.iter().enumerate() {
            assert_eq!(row.is_spacer(), index % 2 == 1, "row {index}");
        }
        assert_eq!(info.spacer_row_count(), 3);
        assert_eq!(info.field_count(), 2);
    }

    #[test]
    fn every_content_row_spans_the_block() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_previous()
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::sized(80.0, 16.0)))
            .with_input(InputDesc::dummy("B").with_field(FieldDesc::sized(20.0, 16.0)));
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);

        for row in &info.rows {
            assert_eq!(row.width, info.width - info.start_x, "{:?}", row.types);
            let summed: f64 = row.elements.iter().map(|e| e.width()).sum();
            assert_eq!(summed, row.width, "{:?}", row.types);
        }
    }

    #[test]
    fn heights_stack_without_gaps() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_previous()
            .with_next()
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::sized(30.0, 20.0)));
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);

        let total: f64 = info.rows.iter().map(|row| row.height).sum();
        assert_eq!(info.height, total);
        let mut y = 0.0;
        for row in &info.rows {
            assert_eq!(row.y_pos, y);
            y += row.height;
        }
        let bottom = info.bottom_row();
        assert_eq!(bottom.baseline, info.height - constants.notch_height);
    }

    #[test]
    fn measuring_twice_gives_the_same_tree() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_output()
            .with_input(InputDesc::value("X").with_field(FieldDesc::label("x")))
            .with_input(InputDesc::value("Y").with_field(FieldDesc::label("y")))
            .inline(true);
        assert_eq!(measure(&block, &constants), measure(&block, &constants));
    }

    #[test]
    fn output_tab_shifts_the_body_right() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_output()
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::sized(30.0, 16.0)));
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);

        assert_eq!(info.start_x, constants.tab_width);
        assert!(info.rows.iter().all(|row| row.x_pos == constants.tab_width));
        assert!(info.width >= constants.min_block_width + constants.tab_width);
    }

    #[test]
    fn statement_rows_share_one_edge() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("if")
            .with_previous()
            .with_next()
            .with_input(InputDesc::value("IF").with_field(FieldDesc::sized(12.0, 16.0)))
            .with_input(InputDesc::statement("DO").with_field(FieldDesc::sized(40.0, 16.0)))
            .with_input(InputDesc::statement("ELSE").with_field(FieldDesc::sized(24.0, 16.0)));
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);

        let edges: Vec<f64> = info
            .rows
            .iter()
            .filter(|row| row.has_statement)
            .map(|row| {
                let input = row.last_input().unwrap();
                input.base.x_pos - row.x_pos
            })
            .collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], edges[1]);
        assert_eq!(edges[0], info.statement_edge);
        assert!(info.has_statement_input);
    }

    #[test]
    fn inline_inputs_share_a_row() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_output()
            .with_input(InputDesc::value("A"))
            .with_input(InputDesc::value("B"))
            .inline(true);
        let inline = RenderInfo::measure(&block, &constants, &CommonLayout);
        assert_eq!(inline.rows.len(), 5);
        assert!(inline.rows[2].has_inline_input);

        let external_block = block.clone().inline(false);
        let external = RenderInfo::measure(&external_block, &constants, &CommonLayout);
        assert_eq!(external.rows.len(), 7);
        assert!(external.rows[2].has_external_input);
    }

    #[test]
    fn right_aligned_rows_pad_on_the_left() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b")
            .with_input(InputDesc::dummy("WIDE").with_field(FieldDesc::sized(100.0, 16.0)))
            .with_input(
                InputDesc::dummy("NARROW")
                    .with_field(FieldDesc::sized(10.0, 16.0))
                    .with_align(Align::Right),
            );
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);
        let narrow = &info.rows[4];
        let field = narrow.elements.iter().find_map(|e| e.as_field()).unwrap();
        let right_gap = narrow.x_pos + narrow.width - (field.base.x_pos + field.base.width);
        assert_eq!(right_gap, constants.medium_padding);
    }

    #[test]
    fn collapsed_blocks_end_in_a_jagged_edge() {
        let constants = ConstantProvider::common();
        let mut block = BlockDesc::new("b")
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::label("collapsed")));
        block.collapsed = true;
        let info = RenderInfo::measure(&block, &constants, &CommonLayout);
        let row = &info.rows[2];
        assert!(row.has_jagged_edge);
        assert!(row.elements.iter().any(|e| e.types().is_jagged_edge()));
        assert!(!info.is_inline);
    }
}
