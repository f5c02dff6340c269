//! Document tree store: the owned section forest and all mutation entry
//! points
//!
//! Operations addressing an unknown section id or an out-of-range block
//! index are silent no-ops: they come from stale UI references, not user
//! faults, and must leave the tree untouched.

use crate::core::image::{ImageEntry, Layout};
use crate::core::section::{
    Align, Block, BlockKind, BlockType, ListStyle, Section, SectionId, SectionKind,
};
use crate::core::table::TableDimension;
use crate::core::transient::FlagToken;

/// Direction for [`DocumentStore::move_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The single mutable document tree, owned by the application shell.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    sections: Vec<Section>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root section list, in render order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Depth-first search across the whole forest.
    pub fn find(&self, id: &SectionId) -> Option<&Section> {
        find_in(&self.sections, id)
    }

    pub fn find_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        find_in_mut(&mut self.sections, id)
    }

    /// Add a section under `parent` (or at the root), seeded with one empty
    /// text block. Returns `None` when the parent already sits at the depth
    /// ceiling; an unknown parent id falls back to a new root section.
    pub fn add_section(&mut self, parent: Option<&SectionId>) -> Option<SectionId> {
        if let Some(parent_id) = parent {
            if let Some(parent_section) = self.find_mut(parent_id) {
                if !parent_section.can_add_subsection() {
                    tracing::warn!(%parent_id, "refusing subsection below depth ceiling");
                    return None;
                }
                let mut section = Section::new(parent_section.level + 1);
                section.blocks.push(Block::new(BlockType::Text));
                let id = section.id;
                parent_section.subsections.push(section);
                tracing::debug!(%id, level = parent_section.level + 1, "added subsection");
                return Some(id);
            }
        }

        let mut section = Section::new(1);
        section.blocks.push(Block::new(BlockType::Text));
        let id = section.id;
        self.sections.push(section);
        tracing::debug!(%id, "added root section");
        Some(id)
    }

    /// Remove the first section matching `id` anywhere in the forest,
    /// discarding its descendants.
    pub fn remove_section(&mut self, id: &SectionId) {
        remove_in(&mut self.sections, id);
    }

    /// Set the free-text title. Only displayed for `Other` sections.
    pub fn set_section_title(&mut self, id: &SectionId, title: String) {
        if let Some(section) = self.find_mut(id) {
            section.title = title;
        }
    }

    /// Change a section's kind. For non-`Other` kinds the title resets to
    /// the kind's fixed title and any custom color is dropped; the three
    /// fields are coupled, not independent.
    pub fn set_section_kind(&mut self, id: &SectionId, kind: SectionKind) {
        if let Some(section) = self.find_mut(id) {
            section.kind = kind;
            if kind != SectionKind::Other {
                section.title = kind.default_title().to_string();
                section.custom_color = None;
            }
        }
    }

    pub fn set_section_color(&mut self, id: &SectionId, color: String) {
        if let Some(section) = self.find_mut(id) {
            section.custom_color = Some(color);
        }
    }

    /// Replace the whole forest with an imported snapshot.
    pub fn replace(&mut self, sections: Vec<Section>) {
        tracing::info!(count = sections.len(), "replacing document tree");
        self.sections = sections;
    }

    // --- block operations ---

    fn block_mut(&mut self, section: &SectionId, index: usize) -> Option<&mut Block> {
        self.find_mut(section)
            .and_then(|sec| sec.blocks.get_mut(index))
    }

    /// Append a block with type-specific defaults to a section.
    pub fn add_block(&mut self, section: &SectionId, ty: BlockType) {
        if let Some(sec) = self.find_mut(section) {
            sec.blocks.push(Block::new(ty));
        }
    }

    /// Overwrite the body of a text or list block atomically.
    pub fn set_block_content(&mut self, section: &SectionId, index: usize, content: String) {
        if let Some(block) = self.block_mut(section, index) {
            match &mut block.kind {
                BlockKind::Text(text) => text.content = content,
                BlockKind::List(list) => list.content = content,
                _ => {}
            }
        }
    }

    /// The content of a text or list block, if the reference is live.
    pub fn block_content(&self, section: &SectionId, index: usize) -> Option<&str> {
        let block = self.find(section)?.blocks.get(index)?;
        match &block.kind {
            BlockKind::Text(text) => Some(&text.content),
            BlockKind::List(list) => Some(&list.content),
            _ => None,
        }
    }

    pub fn set_block_align(&mut self, section: &SectionId, index: usize, align: Align) {
        if let Some(block) = self.block_mut(section, index) {
            match &mut block.kind {
                BlockKind::Text(text) => text.align = align,
                BlockKind::List(list) => list.align = align,
                _ => {}
            }
        }
    }

    pub fn set_list_style(&mut self, section: &SectionId, index: usize, style: ListStyle) {
        if let Some(BlockKind::List(list)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            list.list_style = style;
        }
    }

    /// Swap a block with its neighbor; no-op at either edge.
    pub fn move_block(&mut self, section: &SectionId, index: usize, direction: MoveDirection) {
        if let Some(sec) = self.find_mut(section) {
            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => Some(index + 1),
            };
            if let Some(target) = target {
                if index < sec.blocks.len() && target < sec.blocks.len() {
                    sec.blocks.swap(index, target);
                }
            }
        }
    }

    pub fn remove_block(&mut self, section: &SectionId, index: usize) {
        if let Some(sec) = self.find_mut(section) {
            if index < sec.blocks.len() {
                sec.blocks.remove(index);
            }
        }
    }

    /// Mark a text block's content as being revealed, returning the token
    /// for the timed clear.
    pub fn arm_reveal(&mut self, section: &SectionId, index: usize) -> Option<FlagToken> {
        if let Some(BlockKind::Text(text)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            Some(text.updating.arm())
        } else {
            None
        }
    }

    pub fn expire_reveal(&mut self, section: &SectionId, index: usize, token: FlagToken) -> bool {
        if let Some(BlockKind::Text(text)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            text.updating.expire(token)
        } else {
            false
        }
    }

    // --- table operations ---

    pub fn init_table(&mut self, section: &SectionId, index: usize) {
        if let Some(BlockKind::Table(table)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            table.init();
        }
    }

    pub fn set_table_dimension(
        &mut self,
        section: &SectionId,
        index: usize,
        dimension: TableDimension,
        value: u32,
    ) {
        if let Some(BlockKind::Table(table)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            table.set_dimension(dimension, value);
        }
    }

    pub fn set_table_cell(
        &mut self,
        section: &SectionId,
        index: usize,
        row: usize,
        col: usize,
        value: String,
    ) {
        if let Some(BlockKind::Table(table)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            table.set_cell(row, col, value);
        }
    }

    // --- image operations ---

    /// Append an uploaded image to a block. Returns the completion token
    /// when the append crossed the block's target count.
    pub fn push_image(
        &mut self,
        section: &SectionId,
        index: usize,
        entry: ImageEntry,
    ) -> Option<FlagToken> {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.push_image(entry)
        } else {
            None
        }
    }

    pub fn remove_image(&mut self, section: &SectionId, index: usize, image_index: usize) {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.remove_image(image_index);
        }
    }

    pub fn set_image_caption(
        &mut self,
        section: &SectionId,
        index: usize,
        image_index: usize,
        caption: String,
    ) {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.set_caption(image_index, caption);
        }
    }

    pub fn set_image_count(
        &mut self,
        section: &SectionId,
        index: usize,
        count: u32,
    ) -> Option<FlagToken> {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.set_image_count(count)
        } else {
            None
        }
    }

    pub fn set_image_layout(&mut self, section: &SectionId, index: usize, layout: Layout) {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.set_layout(layout);
        }
    }

    pub fn set_group_width(&mut self, section: &SectionId, index: usize, width: u32) {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.set_group_width(width);
        }
    }

    pub fn expire_completion(
        &mut self,
        section: &SectionId,
        index: usize,
        token: FlagToken,
    ) -> bool {
        if let Some(BlockKind::Image(image)) = self.block_mut(section, index).map(|b| &mut b.kind) {
            image.completion.expire(token)
        } else {
            false
        }
    }
}

fn find_in<'a>(list: &'a [Section], id: &SectionId) -> Option<&'a Section> {
    for section in list {
        if section.id == *id {
            return Some(section);
        }
        if let Some(found) = find_in(&section.subsections, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(list: &'a mut [Section], id: &SectionId) -> Option<&'a mut Section> {
    for section in list {
        if section.id == *id {
            return Some(section);
        }
        if let Some(found) = find_in_mut(&mut section.subsections, id) {
            return Some(found);
        }
    }
    None
}

fn remove_in(list: &mut Vec<Section>, id: &SectionId) -> bool {
    for i in 0..list.len() {
        if list[i].id == *id {
            list.remove(i);
            return true;
        }
        if remove_in(&mut list[i].subsections, id) {
            return true;
        }
    }
    false
}
