//! Section tree and content block types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::image::ImageBlock;
use crate::core::table::TableBlock;
use crate::core::transient::TransientFlag;

/// Maximum nesting depth for sections. A section at this level
/// cannot gain subsections.
pub const MAX_DEPTH: u8 = 3;

/// Opaque identifier for a section, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(Uuid);

impl SectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier for a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The kind of a section, determining its label, color, and default title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Autobiography,
    StudyPlan,
    Resume,
    #[default]
    Other,
}

impl SectionKind {
    /// Display label shown in kind selectors
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Autobiography => "自傳",
            SectionKind::StudyPlan => "讀書計畫",
            SectionKind::Resume => "簡歷",
            SectionKind::Other => "其他",
        }
    }

    /// Accent color used when no custom color is set
    pub fn default_color(&self) -> &'static str {
        match self {
            SectionKind::Autobiography => "#3498db",
            SectionKind::StudyPlan => "#2ecc71",
            SectionKind::Resume => "#7f8c8d",
            SectionKind::Other => "#95a5a6",
        }
    }

    /// Fixed title for non-`Other` kinds; `Other` sections carry free text
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::Other => "",
            kind => kind.label(),
        }
    }
}

/// A node in the document outline. Owns its blocks and subsections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    /// Free text; ignored unless `kind == Other`
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Color override, only meaningful for `Other` sections
    #[serde(default)]
    pub custom_color: Option<String>,
    /// Depth in the tree: 1 at root, parent + 1 below, capped at [`MAX_DEPTH`]
    pub level: u8,
    /// Render/print order is the order of this list
    pub blocks: Vec<Block>,
    /// Order drives numbering
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create an empty section at the given level
    pub fn new(level: u8) -> Self {
        Self {
            id: SectionId::new(),
            title: String::new(),
            kind: SectionKind::Other,
            custom_color: None,
            level,
            blocks: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Whether this section may gain another nesting level
    pub fn can_add_subsection(&self) -> bool {
        self.level < MAX_DEPTH
    }

    /// Title to display: the kind's fixed title, or the free-text title
    /// for `Other` sections
    pub fn display_title(&self) -> &str {
        match self.kind {
            SectionKind::Other => &self.title,
            kind => kind.default_title(),
        }
    }

    /// Accent color: a custom override only applies to `Other` sections
    pub fn color(&self) -> &str {
        match self.kind {
            SectionKind::Other => self
                .custom_color
                .as_deref()
                .unwrap_or_else(|| self.kind.default_color()),
            kind => kind.default_color(),
        }
    }
}

/// Requested block kind for [`Block::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Text,
    List,
    Table,
    Image,
}

/// Horizontal alignment of text and list blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Marker style for list blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListStyle {
    #[default]
    #[serde(rename = "1")]
    Numbered,
    #[serde(rename = "arrow")]
    Arrow,
    #[serde(rename = "dot")]
    Dot,
}

/// A typed content unit belonging to exactly one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Create a block with the type-specific defaults
    pub fn new(ty: BlockType) -> Self {
        let kind = match ty {
            BlockType::Text => BlockKind::Text(TextBlock::default()),
            BlockType::List => BlockKind::List(ListBlock::default()),
            BlockType::Table => BlockKind::Table(TableBlock::default()),
            BlockType::Image => BlockKind::Image(ImageBlock::default()),
        };
        Self {
            id: BlockId::new(),
            kind,
        }
    }
}

/// Type-specific block payload, tagged as `"type"` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Text(TextBlock),
    List(ListBlock),
    Table(TableBlock),
    Image(ImageBlock),
}

/// Free-text paragraph block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub content: String,
    #[serde(default)]
    pub align: Align,
    /// Render hint: content is currently being revealed (e.g. after an
    /// accepted rephrase). Never persisted.
    #[serde(skip)]
    pub updating: TransientFlag,
}

// Transient render state is immaterial to document equality
impl PartialEq for TextBlock {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.align == other.align
    }
}

/// List block; one item per line of `content`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    pub content: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub list_style: ListStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_change_semantics_live_on_kind() {
        assert_eq!(SectionKind::Resume.default_title(), "簡歷");
        assert_eq!(SectionKind::Other.default_title(), "");
        assert_eq!(SectionKind::StudyPlan.default_color(), "#2ecc71");
    }

    #[test]
    fn custom_color_only_applies_to_other() {
        let mut sec = Section::new(1);
        sec.custom_color = Some("#112233".to_string());
        assert_eq!(sec.color(), "#112233");

        sec.kind = SectionKind::Autobiography;
        assert_eq!(sec.color(), "#3498db");
    }

    #[test]
    fn block_serializes_with_flat_type_tag() {
        let block = Block::new(BlockType::List);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "list");
        assert_eq!(value["listStyle"], "1");
        assert_eq!(value["align"], "left");
    }

    #[test]
    fn equality_ignores_transient_flags() {
        let mut text = Block::new(BlockType::Text);
        let text_twin = text.clone();
        if let BlockKind::Text(block) = &mut text.kind {
            block.updating.arm();
        }
        assert_eq!(text, text_twin);

        let mut image = Block::new(BlockType::Image);
        let image_twin = image.clone();
        if let BlockKind::Image(block) = &mut image.kind {
            block.completion.arm();
        }
        assert_eq!(image, image_twin);
    }

    #[test]
    fn transient_flags_are_not_serialized() {
        let mut block = Block::new(BlockType::Text);
        if let BlockKind::Text(text) = &mut block.kind {
            text.updating.arm();
        }
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("updating").is_none());

        let back: Block = serde_json::from_value(value).unwrap();
        if let BlockKind::Text(text) = &back.kind {
            assert!(!text.updating.is_set());
        } else {
            panic!("expected text block");
        }
    }
}
