use std::collections::BTreeMap;

use crate::model::BlockModel;
use crate::path_object::{
    BlockStyle, CLASS_REPLACEABLE, CLASS_SELECTED, PathObject, PathState, REPLACEMENT_GLOW_FILTER,
    SELECTED_GLOW_FILTER, SurfaceHandle,
};

/// Outline drawn over an empty inline input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOutline {
    pub path: String,
    pub fill: String,
    used: bool,
}

/// Copy of the block path drawn on top with a glow while selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPath {
    pub path: String,
    pub stroke: String,
    pub filter: &'static str,
}

/// Path object of the rounded style.
#[derive(Debug, Clone)]
pub struct ZelosPathObject {
    state: PathState,
    outlines: BTreeMap<String, InputOutline>,
    selected: Option<SelectedPath>,
    selected_glow_colour: String,
}

impl ZelosPathObject {
    pub fn new(root: SurfaceHandle, style: BlockStyle, selected_glow_colour: &str) -> Self {
        Self {
            state: PathState::new(root, style),
            outlines: BTreeMap::new(),
            selected: None,
            selected_glow_colour: selected_glow_colour.to_string(),
        }
    }

    pub fn outline(&self, input: &str) -> Option<&InputOutline> {
        self.outlines.get(input)
    }

    pub fn outline_count(&self) -> usize {
        self.outlines.len()
    }

    pub fn selected_path(&self) -> Option<&SelectedPath> {
        self.selected.as_ref()
    }
}

impl PathObject for ZelosPathObject {
    fn state(&self) -> &PathState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PathState {
        &mut self.state
    }

    fn apply_colour(&mut self, block: &dyn BlockModel) {
        self.state.stroke = self.state.style.colour_tertiary.clone();
        self.state.fill = self.state.style.colour_primary.clone();
        self.update_shadow(block.is_shadow());
        let fill = &self.state.style.colour_tertiary;
        for outline in self.outlines.values_mut() {
            outline.fill = fill.clone();
        }
    }

    fn update_selected(&mut self, enabled: bool) {
        self.state.set_class(CLASS_SELECTED, enabled);
        self.selected = enabled.then(|| SelectedPath {
            path: self.state.path.clone(),
            stroke: self.selected_glow_colour.clone(),
            filter: SELECTED_GLOW_FILTER,
        });
    }

    fn update_replacement_fade(&mut self, enabled: bool) {
        self.state.set_class(CLASS_REPLACEABLE, enabled);
        self.state.filter = enabled.then_some(REPLACEMENT_GLOW_FILTER);
    }

    fn begin_drawing(&mut self) {
        for outline in self.outlines.values_mut() {
            outline.used = false;
        }
    }

    fn end_drawing(&mut self) {
        self.outlines.retain(|_, outline| outline.used);
        if let Some(selected) = &mut self.selected {
            selected.path.clone_from(&self.state.path);
        }
    }

    fn set_outline_path(&mut self, input: &str, path: &str) {
        let fill = self.state.style.colour_tertiary.clone();
        let outline = self
            .outlines
            .entry(input.to_string())
            .or_insert_with(|| InputOutline {
                path: String::new(),
                fill: fill.clone(),
                used: false,
            });
        outline.path = path.to_string();
        outline.fill = fill;
        outline.used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawOutput;

    fn path_object() -> ZelosPathObject {
        ZelosPathObject::new(SurfaceHandle::new("root"), BlockStyle::default(), "#fff200")
    }

    fn draw_with(outlines: &[&str]) -> DrawOutput {
        DrawOutput {
            outline_path: " m 0,0 z".to_string(),
            input_outlines: outlines
                .iter()
                .map(|name| (name.to_string(), format!(" M 0,0 {name} z")))
                .collect(),
            ..DrawOutput::default()
        }
    }

    #[test]
    fn outlines_not_redrawn_are_pruned() {
        let mut object = path_object();
        object.apply_draw(&draw_with(&["A", "B"]));
        assert_eq!(object.outline_count(), 2);
        assert_eq!(object.outline("A").unwrap().fill, "#4c4c4c");

        object.apply_draw(&draw_with(&["B"]));
        assert_eq!(object.outline_count(), 1);
        assert!(object.outline("A").is_none());
        assert!(object.outline("B").is_some());
    }

    #[test]
    fn selection_glows_a_copy_of_the_path() {
        let mut object = path_object();
        object.apply_draw(&draw_with(&[]));
        object.update_selected(true);

        let selected = object.selected_path().unwrap();
        assert_eq!(selected.path, object.state().path);
        assert_eq!(selected.stroke, "#fff200");
        assert!(object.state().has_class(CLASS_SELECTED));

        object.update_selected(false);
        assert!(object.selected_path().is_none());
    }

    #[test]
    fn replacement_fade_glows() {
        let mut object = path_object();
        object.update_replacement_fade(true);
        assert_eq!(object.state().filter, Some(REPLACEMENT_GLOW_FILTER));
        assert!(object.state().has_class(CLASS_REPLACEABLE));
        object.update_replacement_fade(false);
        assert_eq!(object.state().filter, None);
    }
}
