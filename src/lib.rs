//! Folio - academic portfolio document builder core
//!
//! The document tree model (nested sections of typed content blocks), its
//! mutation and numbering algorithms, snapshot export/import, and the
//! client contracts for the external document renderer and AI assist
//! services.
//!
//! The tree is plain owned data behind [`core::store::DocumentStore`];
//! mutations are synchronous and total over a well-formed tree. The only
//! suspension points are the network flows in [`client`].

pub mod client;
pub mod core;

pub use crate::client::{AssistClient, ClientError, RenderClient, RephraseSession};
pub use crate::core::config::AppConfig;
pub use crate::core::section::{Block, BlockType, Section, SectionId, SectionKind};
pub use crate::core::snapshot::Snapshot;
pub use crate::core::store::DocumentStore;
