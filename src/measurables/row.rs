use crate::constants::ConstantProvider;
use crate::model::Align;

use super::{ConnectionMeasurable, Element, InRowSpacer, InputConnection, Types};

/// Horizontal band of a measured block.
///
/// Content rows (top, input, bottom) derive their size from their elements
/// in [`Row::measure`]. Spacer rows are built with a fixed size and never
/// change it.
#[derive(Debug)]
pub struct Row<'a> {
    pub types: Types,
    pub elements: Vec<Element<'a>>,
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub width_with_connected_blocks: f64,
    pub x_pos: f64,
    pub y_pos: f64,
    pub notch_offset: f64,
    pub align: Option<Align>,

    pub follows_statement: bool,
    pub precedes_statement: bool,
    pub has_statement: bool,
    pub has_external_input: bool,
    pub has_inline_input: bool,
    pub has_dummy_input: bool,
    pub has_jagged_edge: bool,
    pub statement_edge: f64,
    pub connected_block_widths: f64,

    pub has_previous_connection: bool,
    pub capline: f64,
    pub ascender_height: f64,

    pub has_next_connection: bool,
    pub baseline: f64,
    pub descender_height: f64,
}

impl<'a> Row<'a> {
    fn with_types(constants: &ConstantProvider, types: Types) -> Self {
        Self {
            types: Types::ROW | types,
            elements: Vec::new(),
            width: 0.0,
            height: 0.0,
            min_width: 0.0,
            min_height: 0.0,
            width_with_connected_blocks: 0.0,
            x_pos: 0.0,
            y_pos: 0.0,
            notch_offset: constants.notch_offset_left,
            align: None,
            follows_statement: false,
            precedes_statement: false,
            has_statement: false,
            has_external_input: false,
            has_inline_input: false,
            has_dummy_input: false,
            has_jagged_edge: false,
            statement_edge: 0.0,
            connected_block_widths: 0.0,
            has_previous_connection: false,
            capline: 0.0,
            ascender_height: 0.0,
            has_next_connection: false,
            baseline: 0.0,
            descender_height: 0.0,
        }
    }

    pub fn top(constants: &ConstantProvider) -> Self {
        Self::with_types(constants, Types::TOP_ROW)
    }

    pub fn bottom(constants: &ConstantProvider) -> Self {
        Self::with_types(constants, Types::BOTTOM_ROW)
    }

    pub fn input(constants: &ConstantProvider) -> Self {
        Self::with_types(constants, Types::INPUT_ROW)
    }

    /// Fixed vertical gap between two content rows, holding a single
    /// in-row spacer of the same width.
    pub fn spacer(constants: &ConstantProvider, height: f64, width: f64) -> Self {
        let mut row = Self::with_types(constants, Types::SPACER | Types::BETWEEN_ROW_SPACER);
        row.width = width;
        row.height = height;
        row.elements.push(InRowSpacer::new(constants, width).into());
        row
    }

    pub fn is_spacer(&self) -> bool {
        self.types.is_between_row_spacer()
    }

    pub fn push(&mut self, element: impl Into<Element<'a>>) {
        self.elements.push(element.into());
    }

    /// Recompute the row size from its elements. Spacer rows keep the size
    /// they were built with.
    pub fn measure(&mut self) {
        if self.is_spacer() {
            return;
        }
        if self.types.is_top_row() {
            self.measure_top();
        } else if self.types.is_bottom_row() {
            self.measure_bottom();
        } else {
            self.measure_input();
        }
    }

    fn measure_top(&mut self) {
        let mut width = 0.0;
        let mut height: f64 = 0.0;
        let mut ascender: f64 = 0.0;
        for element in &self.elements {
            let base = element.base();
            width += base.width;
            if base.types.is_spacer() {
                continue;
            }
            if base.types.is_hat() {
                ascender = ascender.max(base.ascender_height());
            } else {
                height = height.max(base.height);
            }
        }
        self.width = self.min_width.max(width);
        self.height = self.min_height.max(height) + ascender;
        self.ascender_height = ascender;
        self.capline = ascender;
        self.width_with_connected_blocks = self.width;
    }

    fn measure_bottom(&mut self) {
        let mut width = 0.0;
        let mut height: f64 = 0.0;
        let mut descender: f64 = 0.0;
        for element in &self.elements {
            let base = element.base();
            width += base.width;
            if base.types.is_spacer() {
                continue;
            }
            if base.types.is_next_connection() {
                descender = descender.max(base.height);
            } else {
                height = height.max(base.height);
            }
        }
        self.width = self.min_width.max(width);
        self.height = self.min_height.max(height) + descender;
        self.descender_height = descender;
        self.width_with_connected_blocks = self.width;
    }

    fn measure_input(&mut self) {
        self.width = self.min_width;
        self.height = self.min_height;
        let mut connected_block_widths = 0.0;
        for element in &self.elements {
            let base = element.base();
            self.width += base.width;
            if let Some(input) = element.as_input() {
                if base.types.is_statement_input() {
                    connected_block_widths += input.connected_block_width;
                } else if base.types.is_external_input() && input.connected_block_width != 0.0 {
                    connected_block_widths += input.connected_block_width - input.connection_width;
                }
            }
            if !base.types.is_spacer() {
                self.height = self.height.max(base.height);
            }
        }
        self.connected_block_widths = connected_block_widths;
        self.width_with_connected_blocks = self.width + connected_block_widths;
    }

    pub fn starts_with_elem_spacer(&self) -> bool {
        !self.types.is_top_or_bottom_row()
    }

    pub fn ends_with_elem_spacer(&self) -> bool {
        if self.types.is_top_or_bottom_row() {
            return false;
        }
        !self.has_external_input && !self.has_statement
    }

    pub fn last_input(&self) -> Option<&InputConnection<'a>> {
        self.elements.iter().rev().find_map(Element::as_input)
    }

    pub fn last_input_mut(&mut self) -> Option<&mut InputConnection<'a>> {
        self.elements.iter_mut().rev().find_map(Element::as_input_mut)
    }

    /// Widen the row by `missing`, putting the space into the spacer the
    /// row's alignment calls for. Rows without spacers stay as they are.
    pub fn add_alignment_padding(&mut self, missing: f64) {
        let first = self.elements.iter().position(|e| e.types().is_spacer());
        let last = self.elements.iter().rposition(|e| e.types().is_spacer());
        if self.has_external_input || self.has_statement {
            self.width_with_connected_blocks += missing;
        }
        match (self.align, first, last) {
            (Some(Align::Centre), Some(first), Some(last)) => {
                self.elements[first].base_mut().width += missing / 2.0;
                self.elements[last].base_mut().width += missing / 2.0;
            }
            (Some(Align::Right), Some(first), _) => {
                self.elements[first].base_mut().width += missing;
            }
            (_, _, Some(last)) => {
                self.elements[last].base_mut().width += missing;
            }
            _ => return,
        }
        self.width += missing;
    }

    /// Previous connection of a top row or next connection of a bottom row.
    pub fn connection(&self) -> Option<&ConnectionMeasurable<'a>> {
        self.elements.iter().find_map(Element::as_connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurables::{Field, InputConnection, Measurable};
    use crate::model::{BlockDesc, FieldDesc, InputDesc};

    #[test]
    fn spacer_row_ignores_measure() {
        let constants = ConstantProvider::common();
        let mut row = Row::spacer(&constants, 8.0, 0.0);
        for _ in 0..3 {
            row.measure();
            assert_eq!(row.width, 0.0);
            assert_eq!(row.height, 8.0);
        }
        assert_eq!(row.elements.len(), 1);
        assert!(row.elements[0].types().is_in_row_spacer());
        assert_eq!(row.elements[0].width(), 0.0);
        assert!(!row.follows_statement);
        assert!(!row.precedes_statement);
        assert!(row.types.contains(Types::SPACER | Types::BETWEEN_ROW_SPACER));
    }

    #[test]
    fn input_row_measure_is_idempotent() {
        let constants = ConstantProvider::common();
        let label = FieldDesc::sized(30.0, 16.0);
        let input = InputDesc::dummy("ROW");
        let mut row = Row::input(&constants);
        row.push(InRowSpacer::new(&constants, 10.0));
        row.push(Field::new(&constants, &label, &input));
        row.push(InRowSpacer::new(&constants, 10.0));
        row.min_height = 12.0;

        row.measure();
        let first = (row.width, row.height);
        row.measure();
        assert_eq!((row.width, row.height), first);
        assert_eq!(first, (50.0, 16.0));
    }

    #[test]
    fn input_row_counts_connected_block_widths() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b");
        let child = BlockDesc::new("c").with_output().with_size(60.0, 30.0);
        let input = InputDesc::value("V").connected_to(child);
        let mut row = Row::input(&constants);
        row.push(InputConnection::external(&constants, &input, &block));
        row.has_external_input = true;
        row.measure();

        assert_eq!(row.connected_block_widths, 60.0 - constants.tab_width);
        assert_eq!(
            row.width_with_connected_blocks,
            row.width + row.connected_block_widths
        );
        assert!(!row.ends_with_elem_spacer());
        assert!(row.last_input().is_some());
    }

    #[test]
    fn alignment_padding_goes_where_the_row_points() {
        let constants = ConstantProvider::common();
        let label = FieldDesc::sized(20.0, 16.0);
        let input = InputDesc::dummy("ROW");
        let build = |align| {
            let mut row = Row::input(&constants);
            row.align = Some(align);
            row.push(InRowSpacer::new(&constants, 4.0));
            row.push(Field::new(&constants, &label, &input));
            row.push(InRowSpacer::new(&constants, 4.0));
            row.measure();
            row
        };

        let mut left = build(Align::Left);
        left.add_alignment_padding(10.0);
        assert_eq!(left.elements[2].width(), 14.0);
        assert_eq!(left.width, 38.0);

        let mut right = build(Align::Right);
        right.add_alignment_padding(10.0);
        assert_eq!(right.elements[0].width(), 14.0);

        let mut centre = build(Align::Centre);
        centre.add_alignment_padding(10.0);
        assert_eq!(centre.elements[0].width(), 9.0);
        assert_eq!(centre.elements[2].width(), 9.0);
        assert_eq!(centre.width, 38.0);
    }

    #[test]
    fn top_row_lifts_the_capline_over_a_hat() {
        let constants = ConstantProvider::common();
        let mut row = Row::top(&constants);
        row.min_height = constants.top_row_min_height;
        row.push(Measurable::round_corner(&constants, false));
        row.push(Measurable::hat(&constants));
        row.push(Measurable::round_corner(&constants, true));
        row.measure();

        assert_eq!(row.capline, constants.start_hat_height);
        assert_eq!(row.height, constants.top_row_min_height + constants.start_hat_height);
        assert_eq!(row.width, 8.0 + 100.0 + 8.0);
        assert!(!row.starts_with_elem_spacer());
    }

    #[test]
    fn bottom_row_hangs_the_next_notch_below_the_baseline() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b").with_next();
        let mut row = Row::bottom(&constants);
        row.push(Measurable::round_corner(&constants, false));
        row.push(ConnectionMeasurable::next(
            &constants,
            block.next.as_ref().unwrap(),
            &block,
        ));
        row.measure();

        assert_eq!(row.descender_height, constants.notch_height);
        assert_eq!(row.height, 4.0 + constants.notch_height);
        assert!(row.connection().is_some());
    }
}
