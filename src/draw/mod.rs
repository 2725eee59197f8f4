//! Turns finished [`RenderInfo`] geometry into path data and placements.

mod output;
mod steps;

use crate::info::RenderInfo;

pub use output::{ConnectionPlacement, DrawOutput, FieldPlacement};
pub use steps::{DrawSteps, draw_common_left, draw_common_outline};

/// Draws one measured block.
pub trait Drawer {
    fn draw(&mut self) -> DrawOutput;
}

/// Drawer of the common style.
pub struct BaseDrawer<'i> {
    info: &'i RenderInfo<'i>,
    output: DrawOutput,
}

impl<'i> BaseDrawer<'i> {
    pub fn new(info: &'i RenderInfo<'i>) -> Self {
        Self {
            info,
            output: DrawOutput::default(),
        }
    }
}

impl<'i> DrawSteps<'i> for BaseDrawer<'i> {
    fn info(&self) -> &'i RenderInfo<'i> {
        self.info
    }

    fn output(&mut self) -> &mut DrawOutput {
        &mut self.output
    }
}

impl Drawer for BaseDrawer<'_> {
    fn draw(&mut self) -> DrawOutput {
        self.draw_outline();
        self.draw_internals();
        self.finish()
    }
}
