use bitflags::bitflags;

bitflags! {
    /// Roles a measurable plays. Roles overlap: an element can be both a
    /// spacer and a between-row spacer, so consumers test membership
    /// instead of matching on a single kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Types: u32 {
        const FIELD = 1 << 0;
        const HAT = 1 << 1;
        const ICON = 1 << 2;
        const SPACER = 1 << 3;
        const BETWEEN_ROW_SPACER = 1 << 4;
        const IN_ROW_SPACER = 1 << 5;
        const EXTERNAL_VALUE_INPUT = 1 << 6;
        const INPUT = 1 << 7;
        const INLINE_INPUT = 1 << 8;
        const STATEMENT_INPUT = 1 << 9;
        const CONNECTION = 1 << 10;
        const PREVIOUS_CONNECTION = 1 << 11;
        const NEXT_CONNECTION = 1 << 12;
        const OUTPUT_CONNECTION = 1 << 13;
        const CORNER = 1 << 14;
        const LEFT_SQUARE_CORNER = 1 << 15;
        const LEFT_ROUND_CORNER = 1 << 16;
        const RIGHT_SQUARE_CORNER = 1 << 17;
        const RIGHT_ROUND_CORNER = 1 << 18;
        const JAGGED_EDGE = 1 << 19;
        const ROW = 1 << 20;
        const TOP_ROW = 1 << 21;
        const BOTTOM_ROW = 1 << 22;
        const INPUT_ROW = 1 << 23;

        const LEFT_CORNER = Self::LEFT_SQUARE_CORNER.bits() | Self::LEFT_ROUND_CORNER.bits();
        const RIGHT_CORNER = Self::RIGHT_SQUARE_CORNER.bits() | Self::RIGHT_ROUND_CORNER.bits();
    }
}

impl Types {
    pub fn is_field(self) -> bool {
        self.intersects(Self::FIELD)
    }

    pub fn is_hat(self) -> bool {
        self.intersects(Self::HAT)
    }

    pub fn is_icon(self) -> bool {
        self.intersects(Self::ICON)
    }

    pub fn is_spacer(self) -> bool {
        self.intersects(Self::SPACER)
    }

    pub fn is_in_row_spacer(self) -> bool {
        self.intersects(Self::IN_ROW_SPACER)
    }

    pub fn is_input(self) -> bool {
        self.intersects(Self::INPUT)
    }

    pub fn is_external_input(self) -> bool {
        self.intersects(Self::EXTERNAL_VALUE_INPUT)
    }

    pub fn is_inline_input(self) -> bool {
        self.intersects(Self::INLINE_INPUT)
    }

    pub fn is_statement_input(self) -> bool {
        self.intersects(Self::STATEMENT_INPUT)
    }

    pub fn is_previous_connection(self) -> bool {
        self.intersects(Self::PREVIOUS_CONNECTION)
    }

    pub fn is_next_connection(self) -> bool {
        self.intersects(Self::NEXT_CONNECTION)
    }

    /// Previous or next connection, the ones cut into horizontal edges.
    pub fn is_previous_or_next_connection(self) -> bool {
        self.intersects(Self::PREVIOUS_CONNECTION | Self::NEXT_CONNECTION)
    }

    pub fn is_left_round_corner(self) -> bool {
        self.intersects(Self::LEFT_ROUND_CORNER)
    }

    pub fn is_right_round_corner(self) -> bool {
        self.intersects(Self::RIGHT_ROUND_CORNER)
    }

    pub fn is_left_square_corner(self) -> bool {
        self.intersects(Self::LEFT_SQUARE_CORNER)
    }

    pub fn is_right_square_corner(self) -> bool {
        self.intersects(Self::RIGHT_SQUARE_CORNER)
    }

    pub fn is_corner(self) -> bool {
        self.intersects(Self::CORNER)
    }

    pub fn is_jagged_edge(self) -> bool {
        self.intersects(Self::JAGGED_EDGE)
    }

    pub fn is_row(self) -> bool {
        self.intersects(Self::ROW)
    }

    pub fn is_between_row_spacer(self) -> bool {
        self.intersects(Self::BETWEEN_ROW_SPACER)
    }

    pub fn is_top_row(self) -> bool {
        self.intersects(Self::TOP_ROW)
    }

    pub fn is_bottom_row(self) -> bool {
        self.intersects(Self::BOTTOM_ROW)
    }

    pub fn is_top_or_bottom_row(self) -> bool {
        self.intersects(Self::TOP_ROW | Self::BOTTOM_ROW)
    }

    pub fn is_input_row(self) -> bool {
        self.intersects(Self::INPUT_ROW)
    }
}
