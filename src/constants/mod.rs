//! Sizing and spacing table shared by every measurement pass of a renderer.
//!
//! One provider is built per renderer at init time and read thereafter.
//! Styles differ only in the values they put here and in [`ShapeStyle`].

pub mod shapes;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{BlockModel, ConnectionModel, ConnectionType, OutputShape};
use crate::paths::{arc, curve, line, line_on_axis, line_to, move_by, point};

pub use shapes::{
    ConnectionShape, Decoration, DynamicShape, InsideCorners, OutsideCorners, ShapeKind,
};

/// How connectors are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeStyle {
    /// Puzzle tabs on value connectors, straight-sided notches.
    Classic,
    /// Height-following value connectors, curved notches.
    Rounded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantProvider {
    pub shape_style: ShapeStyle,

    pub no_padding: f64,
    pub small_padding: f64,
    pub medium_padding: f64,
    pub medium_large_padding: f64,
    pub large_padding: f64,
    pub tall_input_field_offset_y: f64,

    pub tab_height: f64,
    pub tab_offset_from_top: f64,
    pub tab_vertical_overlap: f64,
    pub tab_width: f64,
    pub notch_width: f64,
    pub notch_height: f64,
    pub notch_offset_left: f64,
    pub statement_input_notch_offset: f64,
    pub max_dynamic_connection_shape_width: f64,

    pub corner_radius: f64,
    pub min_block_width: f64,
    pub min_block_height: f64,
    pub empty_block_spacer_height: f64,
    pub spacer_default_height: f64,
    pub dummy_input_min_height: f64,
    pub dummy_input_shadow_min_height: f64,

    pub statement_bottom_spacer: f64,
    pub statement_input_padding_left: f64,
    pub between_statement_padding_y: f64,
    pub empty_statement_input_height: f64,
    pub empty_inline_input_padding: f64,
    pub empty_inline_input_height: f64,
    pub external_value_input_padding: f64,

    pub top_row_min_height: f64,
    pub top_row_precedes_statement_min_height: f64,
    pub bottom_row_min_height: f64,
    pub bottom_row_after_statement_min_height: f64,

    pub add_start_hats: bool,
    pub start_hat_height: f64,
    pub start_hat_width: f64,
    pub jagged_teeth_height: f64,
    pub jagged_teeth_width: f64,

    pub cursor_ws_width: f64,
    pub ws_cursor_height: f64,
    pub cursor_stack_padding: f64,
    pub cursor_block_padding: f64,
    pub cursor_stroke_width: f64,
    pub cursor_radius: f64,
    pub cursor_colour: String,
    pub marker_colour: String,

    pub selected_glow_colour: String,
    pub selected_glow_size: f64,
    pub replacement_glow_colour: String,
    pub replacement_glow_size: f64,
}

impl Default for ConstantProvider {
    fn default() -> Self {
        Self::common()
    }
}

impl ConstantProvider {
    /// Geometry of the common style every other style starts from.
    pub fn common() -> Self {
        let medium_padding = 5.0;
        let tab_height = 15.0;
        let notch_offset_left = 15.0;
        let min_block_height = 24.0;
        Self {
            shape_style: ShapeStyle::Classic,

            no_padding: 0.0,
            small_padding: 3.0,
            medium_padding,
            medium_large_padding: 8.0,
            large_padding: 10.0,
            tall_input_field_offset_y: medium_padding,

            tab_height,
            tab_offset_from_top: 5.0,
            tab_vertical_overlap: 2.5,
            tab_width: 8.0,
            notch_width: 15.0,
            notch_height: 4.0,
            notch_offset_left,
            statement_input_notch_offset: notch_offset_left,
            max_dynamic_connection_shape_width: 0.0,

            corner_radius: 8.0,
            min_block_width: 12.0,
            min_block_height,
            empty_block_spacer_height: 16.0,
            spacer_default_height: 15.0,
            dummy_input_min_height: tab_height,
            dummy_input_shadow_min_height: tab_height,

            statement_bottom_spacer: 0.0,
            statement_input_padding_left: 20.0,
            between_statement_padding_y: 4.0,
            empty_statement_input_height: min_block_height,
            empty_inline_input_padding: 14.5,
            empty_inline_input_height: tab_height + 11.0,
            external_value_input_padding: 2.0,

            top_row_min_height: medium_padding,
            top_row_precedes_statement_min_height: 10.0,
            bottom_row_min_height: medium_padding,
            bottom_row_after_statement_min_height: 10.0,

            add_start_hats: false,
            start_hat_height: 15.0,
            start_hat_width: 100.0,
            jagged_teeth_height: 12.0,
            jagged_teeth_width: 6.0,

            cursor_ws_width: 100.0,
            ws_cursor_height: 5.0,
            cursor_stack_padding: 10.0,
            cursor_block_padding: 2.0,
            cursor_stroke_width: 4.0,
            cursor_radius: 5.0,
            cursor_colour: "#cc0a0a".to_string(),
            marker_colour: "#4286f4".to_string(),

            selected_glow_colour: "#fff200".to_string(),
            selected_glow_size: 0.5,
            replacement_glow_colour: "#fff200".to_string(),
            replacement_glow_size: 2.0,
        }
    }

    /// Copy of `self` with the named fields replaced.
    ///
    /// Keys are field names; unknown keys and mistyped values are rejected.
    pub fn with_overrides(&self, overrides: &Map<String, Value>) -> Result<Self> {
        if overrides.is_empty() {
            return Ok(self.clone());
        }
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut value {
            for (key, override_value) in overrides {
                fields.insert(key.clone(), override_value.clone());
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Shape for a connection owned by `source`.
    pub fn shape_for(
        &self,
        connection: &dyn ConnectionModel,
        source: &dyn BlockModel,
    ) -> ConnectionShape {
        let mut checks = connection.checks();
        let target_output = connection
            .target_block()
            .and_then(|target| target.output_connection());
        if checks.is_empty() {
            if let Some(target) = target_output {
                checks = target.checks();
            }
        }
        self.shape_for_type(connection.connection_type(), checks, source.output_shape())
    }

    pub fn shape_for_type(
        &self,
        kind: ConnectionType,
        checks: &[String],
        output_shape: Option<OutputShape>,
    ) -> ConnectionShape {
        if kind.is_statement() {
            return self.notch();
        }
        match self.shape_style {
            ShapeStyle::Classic => self.puzzle_tab(),
            ShapeStyle::Rounded => {
                let kind = match output_shape {
                    Some(OutputShape::Hexagonal) => ShapeKind::Hexagonal,
                    Some(OutputShape::Round) => ShapeKind::Round,
                    Some(OutputShape::Square) => ShapeKind::Square,
                    None if checks.iter().any(|check| check == "Boolean") => {
                        ShapeKind::Hexagonal
                    }
                    None => ShapeKind::Round,
                };
                ConnectionShape::Dynamic(DynamicShape {
                    kind,
                    max_width: self.max_dynamic_connection_shape_width,
                    corner_radius: self.corner_radius,
                })
            }
        }
    }

    pub fn notch(&self) -> ConnectionShape {
        let width = self.notch_width;
        let height = self.notch_height;
        let main_path = |dir: f64| match self.shape_style {
            ShapeStyle::Classic => {
                let inner_width = 3.0;
                let outer_width = (width - inner_width) / 2.0;
                line_to(dir * outer_width, height)
                    + &line_to(dir * inner_width, 0.0)
                    + &line_to(dir * outer_width, -height)
            }
            ShapeStyle::Rounded => {
                let inner_width = width / 3.0;
                let curve_width = inner_width / 3.0;
                let half_height = height / 2.0;
                let quarter_height = half_height / 2.0;
                curve(
                    "c",
                    &[
                        point(dir * curve_width / 2.0, 0.0),
                        point(dir * curve_width * 3.0 / 4.0, quarter_height / 2.0),
                        point(dir * curve_width, quarter_height),
                    ],
                ) + &line(&[point(dir * curve_width, half_height)])
                    + &curve(
                        "c",
                        &[
                            point(dir * curve_width / 4.0, quarter_height / 2.0),
                            point(dir * curve_width / 2.0, quarter_height),
                            point(dir * curve_width, quarter_height),
                        ],
                    )
                    + &line_on_axis("h", dir * inner_width)
                    + &curve(
                        "c",
                        &[
                            point(dir * curve_width / 2.0, 0.0),
                            point(dir * curve_width * 3.0 / 4.0, -(quarter_height / 2.0)),
                            point(dir * curve_width, -quarter_height),
                        ],
                    )
                    + &line(&[point(dir * curve_width, -half_height)])
                    + &curve(
                        "c",
                        &[
                            point(dir * curve_width / 4.0, -(quarter_height / 2.0)),
                            point(dir * curve_width / 2.0, -quarter_height),
                            point(dir * curve_width, -quarter_height),
                        ],
                    )
            }
        };
        ConnectionShape::Notch {
            width,
            height,
            path_left: main_path(1.0),
            path_right: main_path(-1.0),
        }
    }

    pub fn puzzle_tab(&self) -> ConnectionShape {
        let width = self.tab_width;
        let height = self.tab_height;
        let main_path = |up: bool| {
            let forward = if up { -1.0 } else { 1.0 };
            let back = -forward;
            let overlap = self.tab_vertical_overlap;
            let half_height = height / 2.0;
            let control1_y = half_height + overlap;
            let control2_y = half_height + 0.5;
            let control3_y = overlap;
            curve(
                "c",
                &[
                    point(0.0, forward * control1_y),
                    point(-width, back * control2_y),
                    point(-width, forward * half_height),
                ],
            ) + &curve(
                "s",
                &[
                    point(width, back * control3_y),
                    point(width, forward * half_height),
                ],
            )
        };
        ConnectionShape::PuzzleTab {
            width,
            height,
            path_down: main_path(false),
            path_up: main_path(true),
        }
    }

    pub fn outside_corners(&self) -> OutsideCorners {
        let radius = self.corner_radius;
        OutsideCorners {
            top_left: move_by(0.0, radius) + &arc("a", "0 0,1", radius, &point(radius, -radius)),
            top_right: arc("a", "0 0,1", radius, &point(radius, radius)),
            bottom_right: arc("a", "0 0,1", radius, &point(-radius, radius)),
            bottom_left: arc("a", "0 0,1", radius, &point(-radius, -radius)),
            right_height: radius,
        }
    }

    pub fn inside_corners(&self) -> InsideCorners {
        let radius = self.corner_radius;
        let (right_width, right_height) = match self.shape_style {
            ShapeStyle::Classic => (0.0, 0.0),
            ShapeStyle::Rounded => (radius, radius),
        };
        InsideCorners {
            width: radius,
            height: radius,
            path_top: arc("a", "0 0,0", radius, &point(-radius, radius)),
            path_bottom: arc("a", "0 0,0", radius, &point(radius, radius)),
            right_width,
            right_height,
            path_top_right: arc("a", "0 0,1", radius, &point(-radius, radius)),
            path_bottom_right: arc("a", "0 0,1", radius, &point(radius, radius)),
        }
    }

    pub fn start_hat(&self) -> Decoration {
        let height = self.start_hat_height;
        let width = self.start_hat_width;
        Decoration {
            width,
            height,
            path: curve(
                "c",
                &[point(30.0, -height), point(70.0, -height), point(width, 0.0)],
            ),
        }
    }

    pub fn jagged_teeth(&self) -> Decoration {
        let height = self.jagged_teeth_height;
        let width = self.jagged_teeth_width;
        Decoration {
            width,
            height,
            path: line(&[
                point(width, height / 4.0),
                point(-width * 2.0, height / 2.0),
                point(width, height / 4.0),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockDesc, ConnectionDesc, InputDesc, InputModel};
    use serde_json::json;

    #[test]
    fn overrides_replace_named_fields_only() {
        let base = ConstantProvider::common();
        let mut overrides = Map::new();
        overrides.insert("corner_radius".into(), json!(2.0));
        overrides.insert("cursor_colour".into(), json!("#000000"));

        let tuned = base.with_overrides(&overrides).unwrap();
        assert_eq!(tuned.corner_radius, 2.0);
        assert_eq!(tuned.cursor_colour, "#000000");
        assert_eq!(tuned.notch_width, base.notch_width);
    }

    #[test]
    fn unknown_override_keys_are_rejected() {
        let mut overrides = Map::new();
        overrides.insert("corner_radios".into(), json!(2.0));
        let err = ConstantProvider::common().with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, crate::RenderError::InvalidOverrides(_)));
    }

    #[test]
    fn mistyped_override_values_are_rejected() {
        let mut overrides = Map::new();
        overrides.insert("notch_width".into(), json!("wide"));
        assert!(ConstantProvider::common().with_overrides(&overrides).is_err());
    }

    #[test]
    fn classic_style_uses_tabs_and_notches() {
        let constants = ConstantProvider::common();
        let block = BlockDesc::new("b").with_previous().with_output();
        let output = block.output.as_ref().unwrap();
        let previous = block.previous.as_ref().unwrap();
        assert_eq!(constants.shape_for(output, &block).kind(), ShapeKind::Puzzle);
        assert_eq!(constants.shape_for(previous, &block).kind(), ShapeKind::Notch);
    }

    #[test]
    fn rounded_style_follows_output_shape_then_checks() {
        let constants = ConstantProvider {
            shape_style: ShapeStyle::Rounded,
            max_dynamic_connection_shape_width: 48.0,
            ..ConstantProvider::common()
        };
        let boolean = BlockDesc::new("b").with_output_check("Boolean");
        let output = boolean.output.as_ref().unwrap();
        assert_eq!(constants.shape_for(output, &boolean).kind(), ShapeKind::Hexagonal);

        let squared = boolean.clone().with_output_shape(OutputShape::Square);
        let output = squared.output.as_ref().unwrap();
        assert_eq!(constants.shape_for(output, &squared).kind(), ShapeKind::Square);

        let plain = BlockDesc::new("n").with_output_check("Number");
        let output = plain.output.as_ref().unwrap();
        assert_eq!(constants.shape_for(output, &plain).kind(), ShapeKind::Round);
    }

    #[test]
    fn unchecked_inputs_borrow_the_child_checks() {
        let constants = ConstantProvider {
            shape_style: ShapeStyle::Rounded,
            ..ConstantProvider::common()
        };
        let child = BlockDesc::new("child").with_output_check("Boolean");
        let parent = BlockDesc::new("parent")
            .with_input(InputDesc::value("COND").connected_to(child));
        let input = &parent.inputs[0];
        let connection = input.connection().unwrap();
        assert_eq!(
            constants.shape_for(connection, &parent).kind(),
            ShapeKind::Hexagonal
        );

        let loose = ConnectionDesc::new(ConnectionType::NextStatement);
        assert_eq!(constants.shape_for(&loose, &parent).kind(), ShapeKind::Notch);
    }

    #[test]
    fn classic_notch_is_symmetric() {
        let notch = ConstantProvider::common().notch();
        assert_eq!(notch.path_left(), " l 6,4  l 3,0  l 6,-4 ");
        assert_eq!(notch.path_right(), " l -6,4  l -3,0  l -6,-4 ");
    }
}
