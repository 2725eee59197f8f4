//! Geometry engine for graphical block editors.
//!
//! A [`Renderer`] measures one block into rows of typed measurables
//! ([`RenderInfo`]), then a drawer turns that finished geometry into path
//! data and placements ([`DrawOutput`]). Styles plug in through the
//! [`Renderer`] trait and are looked up by name in a [`RendererRegistry`].

pub mod config;
pub mod constants;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod info;
pub mod logging;
pub mod marker;
pub mod measurables;
pub mod metrics;
pub mod model;
pub mod path_object;
pub mod paths;
pub mod pipeline;
pub mod registry;
pub mod renderer;
pub mod zelos;

pub use config::{RenderConfig, RendererOptions};
pub use constants::{ConnectionShape, ConstantProvider, ShapeKind, ShapeStyle};
pub use draw::{BaseDrawer, ConnectionPlacement, DrawOutput, DrawSteps, Drawer, FieldPlacement};
pub use error::{RenderError, Result};
pub use geometry::{Rect, Size};
pub use info::{CommonLayout, LayoutPolicy, RenderInfo};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use marker::{Marker, MarkerDrawer, MarkerDrawing, MarkerGeometry, MarkerKind, MarkerNode, MarkerSvg};
pub use measurables::{
    ConnectionMeasurable, Element, Field, InRowSpacer, InputConnection, Measurable, Row, Types,
};
pub use metrics::{MetricSnapshot, RenderMetrics};
pub use model::{
    Align, BlockDesc, BlockModel, ConnectionDesc, ConnectionModel, ConnectionType, FieldDesc,
    FieldModel, HatStyle, InputDesc, InputKind, InputModel, OutputShape, WorkspaceDesc,
    WorkspaceModel,
};
pub use path_object::{BasePathObject, BlockStyle, PathObject, PathState, SurfaceHandle};
pub use pipeline::RenderSession;
pub use registry::{RendererConstructor, RendererRegistry};
pub use renderer::{
    CommonRenderer, PreviewType, Renderer, RendererCore, default_connection_preview_method,
};
pub use zelos::{ZelosDrawer, ZelosLayout, ZelosMarkerSvg, ZelosPathObject, ZelosRenderer};
