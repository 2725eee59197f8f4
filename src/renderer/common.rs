use crate::constants::ConstantProvider;
use crate::draw::{BaseDrawer, Drawer};
use crate::info::{CommonLayout, RenderInfo};
use crate::marker::{Marker, MarkerDrawer, MarkerSvg};
use crate::model::{BlockModel, WorkspaceModel};
use crate::path_object::{BasePathObject, BlockStyle, PathObject, SurfaceHandle};

use super::{Renderer, RendererCore};

/// The common style: puzzle tabs, square-cornered value blocks.
#[derive(Debug, Clone)]
pub struct CommonRenderer {
    core: RendererCore,
}

impl CommonRenderer {
    pub const NAME: &'static str = "common";

    pub fn new(name: &str) -> Self {
        Self {
            core: RendererCore::new(name),
        }
    }
}

impl Default for CommonRenderer {
    fn default() -> Self {
        Self::new(Self::NAME)
    }
}

impl Renderer for CommonRenderer {
    fn core(&self) -> &RendererCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut RendererCore {
        &mut self.core
    }

    fn make_constants(&self) -> ConstantProvider {
        ConstantProvider::common()
    }

    fn make_render_info<'a>(&'a self, block: &'a dyn BlockModel) -> RenderInfo<'a> {
        RenderInfo::measure(block, self.constants(), &CommonLayout)
    }

    fn make_drawer<'i>(&self, info: &'i RenderInfo<'i>) -> Box<dyn Drawer + 'i> {
        Box::new(BaseDrawer::new(info))
    }

    fn make_marker_drawer<'c>(
        &'c self,
        workspace: &dyn WorkspaceModel,
        marker: Marker,
    ) -> Box<dyn MarkerDrawer + 'c> {
        Box::new(MarkerSvg::new(self.constants(), marker, workspace.is_rtl()))
    }

    fn make_path_object(&self, root: SurfaceHandle, style: BlockStyle) -> Box<dyn PathObject> {
        Box::new(BasePathObject::new(root, style))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;
    use crate::model::{BlockDesc, ConnectionDesc, ConnectionType, FieldDesc, InputDesc};

    fn renderer() -> CommonRenderer {
        let mut renderer = CommonRenderer::default();
        renderer.init(&Map::new()).unwrap();
        renderer
    }

    #[test]
    fn every_connection_is_highlighted() {
        let renderer = renderer();
        for kind in [
            ConnectionType::InputValue,
            ConnectionType::OutputValue,
            ConnectionType::NextStatement,
            ConnectionType::PreviousStatement,
        ] {
            assert!(renderer.should_highlight_connection(&ConnectionDesc::new(kind)));
        }
    }

    #[test]
    fn overrides_reach_measurement() {
        let mut renderer = CommonRenderer::default();
        let overrides = json!({ "min_block_width": 200.0 });
        renderer.init(overrides.as_object().unwrap()).unwrap();

        let block = BlockDesc::new("b").with_input(InputDesc::dummy("A"));
        let info = renderer.make_render_info(&block);
        assert_eq!(info.width, 200.0);
    }

    #[test]
    fn render_paints_the_path_object() {
        let renderer = renderer();
        let block = BlockDesc::new("b")
            .with_previous()
            .with_input(InputDesc::dummy("A").with_field(FieldDesc::label("go")));
        let mut path_object =
            renderer.make_path_object(SurfaceHandle::new("b"), BlockStyle::default());
        let output = renderer.render(&block, path_object.as_mut());

        assert_eq!(path_object.state().path, output.path());
        assert!(path_object.state().is_dirty);
    }
}
