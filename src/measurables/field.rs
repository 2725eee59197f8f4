use std::fmt;

use crate::constants::ConstantProvider;
use crate::model::{FieldModel, InputModel};

use super::{Measurable, Types};

/// Snapshot of one host field for a single layout pass.
///
/// Size and flags are copied at construction. A changed field gets a new
/// `Field` on the next pass; there is no in-place update.
pub struct Field<'a> {
    pub base: Measurable,
    pub is_editable: bool,
    pub flip_rtl: bool,
    pub field: &'a dyn FieldModel,
    pub parent_input: &'a dyn InputModel,
}

impl<'a> Field<'a> {
    pub fn new(
        constants: &ConstantProvider,
        field: &'a dyn FieldModel,
        parent_input: &'a dyn InputModel,
    ) -> Self {
        let size = field.size();
        Self {
            base: Measurable::sized(constants, Types::FIELD, size.width, size.height),
            is_editable: field.is_editable(),
            flip_rtl: field.flip_rtl(),
            field,
            parent_input,
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("base", &self.base)
            .field("is_editable", &self.is_editable)
            .field("flip_rtl", &self.flip_rtl)
            .field("input", &self.parent_input.name())
            .finish()
    }
}
