//! Painted state of one block: path data, colours and display classes.

use std::collections::BTreeSet;

use blake3::Hash;
use serde::{Deserialize, Serialize};

use crate::draw::DrawOutput;
use crate::model::BlockModel;

pub const CLASS_SELECTED: &str = "blocklySelected";
pub const CLASS_DISABLED: &str = "blocklyDisabled";
pub const CLASS_REPLACEABLE: &str = "blocklyReplaceable";
pub const CLASS_INSERTION_MARKER: &str = "blocklyInsertionMarker";

pub const HIGHLIGHT_FILTER: &str = "url(#blocklyHighlightFilter)";
pub const SELECTED_GLOW_FILTER: &str = "url(#blocklySelectedGlowFilter)";
pub const REPLACEMENT_GLOW_FILTER: &str = "url(#blocklyReplacementGlowFilter)";

/// Transform applied to right-to-left blocks.
pub const RTL_TRANSFORM: &str = "scale(-1 1)";

/// Colours a block is painted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    pub colour_primary: String,
    pub colour_secondary: String,
    pub colour_tertiary: String,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            colour_primary: "#000000".to_string(),
            colour_secondary: "#999999".to_string(),
            colour_tertiary: "#4c4c4c".to_string(),
        }
    }
}

/// Host handle of the group a block is drawn into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(pub String);

impl SurfaceHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// State shared by every path object.
#[derive(Debug, Clone)]
pub struct PathState {
    pub root: SurfaceHandle,
    pub style: BlockStyle,
    pub path: String,
    hash: Option<Hash>,
    pub is_dirty: bool,
    pub transform: Option<&'static str>,
    pub fill: String,
    pub stroke: String,
    pub filter: Option<&'static str>,
    pub classes: BTreeSet<&'static str>,
}

impl PathState {
    pub fn new(root: SurfaceHandle, style: BlockStyle) -> Self {
        Self {
            root,
            fill: style.colour_primary.clone(),
            stroke: style.colour_tertiary.clone(),
            style,
            path: String::new(),
            hash: None,
            is_dirty: true,
            transform: None,
            filter: None,
            classes: BTreeSet::new(),
        }
    }

    /// Store `path` if it differs from the current one. Returns whether it
    /// changed.
    pub fn update_path(&mut self, path: &str) -> bool {
        let new_hash = blake3::hash(path.as_bytes());
        if self.hash.map(|h| h != new_hash).unwrap_or(true) {
            self.path = path.to_string();
            self.hash = Some(new_hash);
            self.is_dirty = true;
            return true;
        }
        false
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn set_class(&mut self, class: &'static str, enabled: bool) {
        if enabled {
            self.classes.insert(class);
        } else {
            self.classes.remove(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Paintable wrapper around a block's drawing surface.
///
/// The defaults paint the common style; styles with extra paths keep them
/// next to their [`PathState`] and override the relevant steps.
pub trait PathObject {
    fn state(&self) -> &PathState;

    fn state_mut(&mut self) -> &mut PathState;

    fn set_path(&mut self, path: &str) -> bool {
        self.state_mut().update_path(path)
    }

    fn flip_rtl(&mut self, rtl: bool) {
        self.state_mut().transform = rtl.then_some(RTL_TRANSFORM);
    }

    fn set_style(&mut self, style: BlockStyle) {
        self.state_mut().style = style;
    }

    fn apply_colour(&mut self, block: &dyn BlockModel) {
        let state = self.state_mut();
        state.stroke = state.style.colour_tertiary.clone();
        state.fill = state.style.colour_primary.clone();
        self.update_shadow(block.is_shadow());
    }

    fn update_shadow(&mut self, shadow: bool) {
        if shadow {
            let state = self.state_mut();
            state.stroke = "none".to_string();
            state.fill = state.style.colour_secondary.clone();
        }
    }

    fn update_selected(&mut self, enabled: bool) {
        self.state_mut().set_class(CLASS_SELECTED, enabled);
    }

    fn update_highlighted(&mut self, enabled: bool) {
        self.state_mut().filter = enabled.then_some(HIGHLIGHT_FILTER);
    }

    fn update_disabled(&mut self, disabled: bool) {
        self.state_mut().set_class(CLASS_DISABLED, disabled);
    }

    fn update_replacement_fade(&mut self, enabled: bool) {
        self.state_mut().set_class(CLASS_REPLACEABLE, enabled);
    }

    fn update_insertion_marker(&mut self, enabled: bool) {
        self.state_mut().set_class(CLASS_INSERTION_MARKER, enabled);
    }

    /// Called before a draw is applied.
    fn begin_drawing(&mut self) {}

    /// Called after a draw is applied.
    fn end_drawing(&mut self) {}

    /// Outline path of an empty inline input. Ignored by styles without
    /// per-input outlines.
    fn set_outline_path(&mut self, _input: &str, _path: &str) {}

    /// Copy one draw into this object.
    fn apply_draw(&mut self, output: &DrawOutput) {
        self.begin_drawing();
        self.set_path(&output.path());
        self.flip_rtl(output.rtl);
        for (input, path) in &output.input_outlines {
            self.set_outline_path(input, path);
        }
        self.end_drawing();
    }
}

/// Path object of the common style.
#[derive(Debug, Clone)]
pub struct BasePathObject {
    state: PathState,
}

impl BasePathObject {
    pub fn new(root: SurfaceHandle, style: BlockStyle) -> Self {
        Self {
            state: PathState::new(root, style),
        }
    }
}

impl PathObject for BasePathObject {
    fn state(&self) -> &PathState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PathState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockDesc;

    fn path_object() -> BasePathObject {
        BasePathObject::new(SurfaceHandle::new("root"), BlockStyle::default())
    }

    #[test]
    fn unchanged_paths_do_not_mark_dirty() {
        let mut object = path_object();
        assert!(object.set_path(" m 0,0 z"));
        object.state_mut().mark_clean();

        assert!(!object.set_path(" m 0,0 z"));
        assert!(!object.state().is_dirty);

        assert!(object.set_path(" m 0,8 z"));
        assert!(object.state().is_dirty);
        assert_eq!(object.state().path, " m 0,8 z");
    }

    #[test]
    fn shadows_paint_with_the_secondary_colour() {
        let mut object = path_object();
        let mut block = BlockDesc::new("shadow");
        block.shadow = true;
        object.apply_colour(&block);
        assert_eq!(object.state().fill, "#999999");
        assert_eq!(object.state().stroke, "none");

        object.apply_colour(&BlockDesc::new("plain"));
        assert_eq!(object.state().fill, "#000000");
        assert_eq!(object.state().stroke, "#4c4c4c");
    }

    #[test]
    fn state_toggles_classes_and_filters() {
        let mut object = path_object();
        object.update_selected(true);
        object.update_disabled(true);
        object.update_highlighted(true);
        assert!(object.state().has_class(CLASS_SELECTED));
        assert!(object.state().has_class(CLASS_DISABLED));
        assert_eq!(object.state().filter, Some(HIGHLIGHT_FILTER));

        object.update_selected(false);
        object.update_highlighted(false);
        assert!(!object.state().has_class(CLASS_SELECTED));
        assert_eq!(object.state().filter, None);
    }

    #[test]
    fn applying_a_draw_sets_path_and_flip() {
        let mut object = path_object();
        let output = DrawOutput {
            outline_path: " m 0,0 z".to_string(),
            rtl: true,
            ..DrawOutput::default()
        };
        object.apply_draw(&output);
        assert_eq!(object.state().path, " m 0,0 z\n");
        assert_eq!(object.state().transform, Some(RTL_TRANSFORM));
    }
}
