use crate::constants::ConstantProvider;
use crate::draw::Drawer;
use crate::info::RenderInfo;
use crate::marker::{Marker, MarkerDrawer};
use crate::model::{BlockModel, ConnectionModel, ConnectionType, WorkspaceModel};
use crate::path_object::{BlockStyle, PathObject, SurfaceHandle};
use crate::renderer::{PreviewType, Renderer, RendererCore, default_connection_preview_method};

use super::{ZelosDrawer, ZelosLayout, ZelosMarkerSvg, ZelosPathObject};

/// The rounded style.
#[derive(Debug, Clone)]
pub struct ZelosRenderer {
    core: RendererCore,
}

impl ZelosRenderer {
    pub const NAME: &'static str = "zelos";

    pub fn new(name: &str) -> Self {
        Self {
            core: RendererCore::new(name),
        }
    }
}

impl Default for ZelosRenderer {
    fn default() -> Self {
        Self::new(Self::NAME)
    }
}

impl Renderer for ZelosRenderer {
    fn core(&self) -> &RendererCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut RendererCore {
        &mut self.core
    }

    fn make_constants(&self) -> ConstantProvider {
        super::constants()
    }

    fn make_render_info<'a>(&'a self, block: &'a dyn BlockModel) -> RenderInfo<'a> {
        RenderInfo::measure(block, self.constants(), &ZelosLayout)
    }

    fn make_drawer<'i>(&self, info: &'i RenderInfo<'i>) -> Box<dyn Drawer + 'i> {
        Box::new(ZelosDrawer::new(info))
    }

    fn make_marker_drawer<'c>(
        &'c self,
        workspace: &dyn WorkspaceModel,
        marker: Marker,
    ) -> Box<dyn MarkerDrawer + 'c> {
        Box::new(ZelosMarkerSvg::new(
            self.constants(),
            marker,
            workspace.is_rtl(),
        ))
    }

    fn make_path_object(&self, root: SurfaceHandle, style: BlockStyle) -> Box<dyn PathObject> {
        Box::new(ZelosPathObject::new(
            root,
            style,
            &self.constants().selected_glow_colour,
        ))
    }

    /// Value connectors already show the junction through their shape.
    fn should_highlight_connection(&self, connection: &dyn ConnectionModel) -> bool {
        !connection.connection_type().is_value()
    }

    /// Dragged value blocks preview as an input outline over free inputs.
    /// Over an occupied input the occupant fades, whether or not it could be
    /// reattached.
    fn connection_preview_method(
        &self,
        closest: &dyn ConnectionModel,
        local: &dyn ConnectionModel,
        top_block: &dyn BlockModel,
    ) -> PreviewType {
        if local.connection_type() == ConnectionType::OutputValue {
            if !closest.is_connected() {
                return PreviewType::InputOutline;
            }
            return PreviewType::ReplacementFade;
        }
        default_connection_preview_method(closest, local, top_block)
    }
}
