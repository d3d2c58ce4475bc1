pub mod catalog;
pub mod resolve;
pub mod selection;
pub mod tags;
pub mod version;

pub use catalog::{CatalogDocument, CatalogError, CatalogShape, PageEntry};
pub use resolve::{Catalog, ResolvedPage};
pub use selection::{Selection, SelectionChange};
pub use tags::{Tag, TagOptions, generate_tags};
