//! Core functionality: the document tree, its mutation algorithms, and
//! snapshot/config persistence

pub mod config;
pub mod image;
pub mod numbering;
pub mod section;
pub mod snapshot;
pub mod store;
pub mod table;
pub mod transient;
