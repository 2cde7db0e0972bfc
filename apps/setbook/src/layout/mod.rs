// Page-fitting engine: height estimation, page-fill analysis, set partitioning
// and layout classification. Pure and synchronous; no I/O.

pub mod classifier;
pub mod estimator;
pub mod geometry;
pub mod page_fill;
pub mod partition;

// Re-export the public API consumed by other modules (render, book, routes).
pub use classifier::{classify_layout, LayoutType, ShowLayout};
pub use geometry::{default_layout_config, LayoutConfig};
pub use partition::PageGroup;
