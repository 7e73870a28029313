//! # changediff-dom
//!
//! A small structured-document layer shared by the changelog tooling:
//!
//! - [`Element`]: an owned tree of tags, attributes, and character data
//! - [`Reader`]: a hand-written reader for the XML subset changelogs use
//! - [`XmlWriter`]: a pretty-printing serializer for generated documents
//!
//! The tree keeps attribute and child order exactly as read, and cloning an
//! element clones its whole subtree, so nodes can be lifted verbatim from one
//! document into another.
//!
//! # Example
//!
//! ```rust
//! use changediff_dom::Reader;
//!
//! let doc = Reader::new(r#"<changelog><createTable tableName="users"/></changelog>"#)
//!     .read_document()
//!     .unwrap();
//!
//! let tables = doc.descendants("createTable");
//! assert_eq!(tables[0].attribute("tableName"), Some("users"));
//! ```

pub mod error;
pub mod node;
pub mod reader;
pub mod writer;

pub use error::ParseError;
pub use node::{Attribute, Content, Element};
pub use reader::Reader;
pub use writer::XmlWriter;
