mod types;

pub use types::{RenderError, Result};
