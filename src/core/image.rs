//! Image group block: image list tracking, completion detection, and the
//! layout-dependent width policy

use serde::{Deserialize, Serialize};

use crate::core::transient::{FlagToken, TransientFlag};

pub const MIN_IMAGE_COUNT: u32 = 1;
pub const MAX_IMAGE_COUNT: u32 = 6;

/// Display mode of an image group, governing its width bounds:
/// `[40, 60]` when wrapped, `[40, 100]` when standalone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Standalone,
    Wrapped,
}

impl Layout {
    /// Width percentage bounds enforced by the input control
    pub fn width_bounds(&self) -> (u32, u32) {
        match self {
            Layout::Wrapped => (40, 60),
            Layout::Standalone => (40, 100),
        }
    }
}

/// One uploaded image and its caption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// Image group block. `image_count` is a soft target: the list may sit
/// below it, reach it, or exceed it during edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub image_count: u32,
    pub images: Vec<ImageEntry>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub group_width: Option<u32>,
    /// Render hint: the group just reached its target count. Never persisted.
    #[serde(skip)]
    pub completion: TransientFlag,
}

impl Default for ImageBlock {
    fn default() -> Self {
        Self {
            image_count: 1,
            images: Vec::new(),
            layout: Layout::Standalone,
            group_width: None,
            completion: TransientFlag::default(),
        }
    }
}

// Transient render state is immaterial to document equality
impl PartialEq for ImageBlock {
    fn eq(&self, other: &Self) -> bool {
        self.image_count == other.image_count
            && self.images == other.images
            && self.layout == other.layout
            && self.group_width == other.group_width
    }
}

impl ImageBlock {
    fn at_target(&self) -> bool {
        self.images.len() as u32 >= self.image_count
    }

    /// Append an image. Fires the completion event exactly when the list
    /// crosses the target upward, returning the token for its timed clear.
    pub fn push_image(&mut self, entry: ImageEntry) -> Option<FlagToken> {
        let was_below = !self.at_target();
        self.images.push(entry);
        if was_below && self.at_target() {
            Some(self.completion.arm())
        } else {
            None
        }
    }

    /// Remove by index, preserving the order of the rest. Dropping back
    /// below the target re-arms a later completion crossing.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn set_caption(&mut self, index: usize, caption: String) {
        if let Some(entry) = self.images.get_mut(index) {
            entry.caption = caption;
        }
    }

    /// Change the target count. Lowering the target to or below the current
    /// list length is itself an upward crossing and fires completion.
    pub fn set_image_count(&mut self, count: u32) -> Option<FlagToken> {
        let was_below = !self.at_target();
        self.image_count = count.clamp(MIN_IMAGE_COUNT, MAX_IMAGE_COUNT);
        if was_below && self.at_target() {
            Some(self.completion.arm())
        } else {
            None
        }
    }

    /// Switch layout, adjusting the width to the new mode's policy:
    /// wrapped resets out-of-range widths to 50 and otherwise clamps to
    /// `[40, 60]`; standalone bumps unset or too-small widths to 70 and
    /// deliberately applies no upper clamp (the input control owns the
    /// 100% ceiling).
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        match layout {
            Layout::Wrapped => {
                self.group_width = Some(match self.group_width {
                    Some(width) if (40..=60).contains(&width) => width,
                    _ => 50,
                });
            }
            Layout::Standalone => {
                if self.group_width.is_none_or(|width| width < 40) {
                    self.group_width = Some(70);
                }
            }
        }
    }

    /// Store the slider value as-is; range enforcement is the control's.
    pub fn set_group_width(&mut self, width: u32) {
        self.group_width = Some(width);
    }
}
