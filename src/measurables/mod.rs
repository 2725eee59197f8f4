//! Layout participants produced by one measurement pass.
//!
//! Everything here borrows from the block being measured and lives exactly
//! as long as the pass that built it.

mod base;
mod connections;
mod element;
mod field;
mod inputs;
mod row;
mod types;

pub use base::{InRowSpacer, Measurable};
pub use connections::ConnectionMeasurable;
pub use element::Element;
pub use field::Field;
pub use inputs::InputConnection;
pub use row::Row;
pub use types::Types;
