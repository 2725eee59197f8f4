use crate::constants::ConstantProvider;
use crate::marker::{Marker, MarkerDrawer, MarkerDrawing, MarkerGeometry, MarkerNode, MarkerSvg};

/// Rounded-style markers: value connections are circles, blocks are
/// outlined whole.
#[derive(Debug, Clone)]
pub struct ZelosMarkerSvg<'c> {
    base: MarkerSvg<'c>,
}

impl<'c> ZelosMarkerSvg<'c> {
    pub fn new(constants: &'c ConstantProvider, marker: Marker, rtl: bool) -> Self {
        Self {
            base: MarkerSvg::new(constants, marker, rtl),
        }
    }
}

impl MarkerDrawer for ZelosMarkerSvg<'_> {
    fn draw(&self, node: &MarkerNode<'_>) -> MarkerDrawing {
        match node {
            MarkerNode::Connection {
                connection, x, y, ..
            } if connection.connection_type().is_value() => {
                let geometry = MarkerGeometry::Circle {
                    cx: *x,
                    cy: *y,
                    r: self.base.constants().cursor_radius,
                };
                self.base.paint(geometry, false)
            }
            MarkerNode::Block(block) => {
                let size = block.size();
                self.base.rect(size.width, size.height)
            }
            other => self.base.draw(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockDesc, ConnectionDesc, ConnectionType};
    use crate::zelos::constants;

    #[test]
    fn value_connections_are_circles() {
        let c = constants();
        let drawer = ZelosMarkerSvg::new(&c, Marker::cursor(), false);
        let block = BlockDesc::new("b").with_size(60.0, 32.0);
        let connection = ConnectionDesc::new(ConnectionType::InputValue);
        let drawing = drawer.draw(&MarkerNode::Connection {
            connection: &connection,
            block: &block,
            x: 44.0,
            y: 16.0,
        });
        assert_eq!(
            drawing.geometry,
            MarkerGeometry::Circle {
                cx: 44.0,
                cy: 16.0,
                r: 5.0,
            }
        );
        assert_eq!(drawing.colour, "#ffa200");
    }

    #[test]
    fn statement_connections_fall_back_to_lines() {
        let c = constants();
        let drawer = ZelosMarkerSvg::new(&c, Marker::marker(), false);
        let block = BlockDesc::new("b").with_size(60.0, 32.0);
        let connection = ConnectionDesc::new(ConnectionType::NextStatement);
        let drawing = drawer.draw(&MarkerNode::Connection {
            connection: &connection,
            block: &block,
            x: 0.0,
            y: 32.0,
        });
        assert!(matches!(drawing.geometry, MarkerGeometry::Line { y, .. } if y == 32.0));
    }

    #[test]
    fn blocks_are_outlined_whole() {
        let c = constants();
        let drawer = ZelosMarkerSvg::new(&c, Marker::cursor(), false);
        let block = BlockDesc::new("b").with_previous().with_size(60.0, 32.0);
        let drawing = drawer.draw(&MarkerNode::Block(&block));
        assert_eq!(
            drawing.geometry,
            MarkerGeometry::Rect {
                x: 0.0,
                y: 0.0,
                width: 60.0,
                height: 32.0,
            }
        );
    }
}
