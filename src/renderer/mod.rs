//! Renderer strategy: one object per visual style that wires constants,
//! measurement, drawing and markers together and answers interaction
//! policy questions.

mod common;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::ConstantProvider;
use crate::draw::{DrawOutput, Drawer};
use crate::error::Result;
use crate::info::RenderInfo;
use crate::marker::{Marker, MarkerDrawer};
use crate::model::{BlockModel, ConnectionModel, ConnectionType, WorkspaceModel};
use crate::path_object::{BlockStyle, PathObject, SurfaceHandle};

pub use common::CommonRenderer;

/// How a pending connection is previewed while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewType {
    InsertionMarker,
    InputOutline,
    ReplacementFade,
}

/// Name and cached constants every renderer carries.
#[derive(Debug, Clone)]
pub struct RendererCore {
    name: String,
    constants: Option<ConstantProvider>,
}

impl RendererCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constants: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_initialized(&self) -> bool {
        self.constants.is_some()
    }

    /// # Panics
    ///
    /// When the renderer has not been initialized.
    pub fn constants(&self) -> &ConstantProvider {
        match &self.constants {
            Some(constants) => constants,
            None => panic!("renderer `{}` used before init", self.name),
        }
    }

    pub fn set_constants(&mut self, constants: ConstantProvider) {
        self.constants = Some(constants);
    }
}

/// A named visual style.
///
/// Factories build fresh per-pass objects and never touch shared state.
/// Constants are built once by [`Renderer::init`] and reused by every pass.
pub trait Renderer {
    fn core(&self) -> &RendererCore;

    fn core_mut(&mut self) -> &mut RendererCore;

    fn name(&self) -> &str {
        self.core().name()
    }

    /// Style defaults, before any overrides.
    fn make_constants(&self) -> ConstantProvider;

    fn init(&mut self, overrides: &Map<String, Value>) -> Result<()> {
        let constants = self.make_constants().with_overrides(overrides)?;
        self.core_mut().set_constants(constants);
        Ok(())
    }

    /// # Panics
    ///
    /// When called before [`Renderer::init`].
    fn constants(&self) -> &ConstantProvider {
        self.core().constants()
    }

    fn make_render_info<'a>(&'a self, block: &'a dyn BlockModel) -> RenderInfo<'a>;

    /// Drawer over a finished measurement. The block being drawn is
    /// `info.block`, the one [`Renderer::make_render_info`] measured.
    fn make_drawer<'i>(&self, info: &'i RenderInfo<'i>) -> Box<dyn Drawer + 'i>;

    fn make_marker_drawer<'c>(
        &'c self,
        workspace: &dyn WorkspaceModel,
        marker: Marker,
    ) -> Box<dyn MarkerDrawer + 'c>;

    fn make_path_object(&self, root: SurfaceHandle, style: BlockStyle) -> Box<dyn PathObject>;

    fn should_highlight_connection(&self, _connection: &dyn ConnectionModel) -> bool {
        true
    }

    fn connection_preview_method(
        &self,
        closest: &dyn ConnectionModel,
        local: &dyn ConnectionModel,
        top_block: &dyn BlockModel,
    ) -> PreviewType {
        default_connection_preview_method(closest, local, top_block)
    }

    /// Measure and draw `block`, then paint the result onto `path_object`.
    fn render(&self, block: &dyn BlockModel, path_object: &mut dyn PathObject) -> DrawOutput {
        let info = self.make_render_info(block);
        let output = self.make_drawer(&info).draw();
        path_object.apply_draw(&output);
        output
    }
}

/// Common preview policy.
///
/// Dropping a block with an output or previous connection onto an occupied
/// connection replaces the current occupant, unless the occupant can be
/// reattached at the end of the dragged stack.
pub fn default_connection_preview_method(
    closest: &dyn ConnectionModel,
    local: &dyn ConnectionModel,
    top_block: &dyn BlockModel,
) -> PreviewType {
    let kind = local.connection_type();
    if matches!(
        kind,
        ConnectionType::OutputValue | ConnectionType::PreviousStatement
    ) {
        let orphan_fits = closest
            .target_block()
            .is_some_and(|orphan| top_block.accepts_orphan_at_end(orphan, kind));
        if !closest.is_connected() || orphan_fits {
            return PreviewType::InsertionMarker;
        }
        return PreviewType::ReplacementFade;
    }
    PreviewType::InsertionMarker
}
