mod core;

pub use self::core::{RendererConstructor, RendererRegistry};
