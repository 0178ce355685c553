//! # Weave Core
//!
//! Conversion engine for figweave: turns a Figma design document into a
//! structural HTML markup tree and a deduplicated CSS style sheet that
//! together visually reproduce the design.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                   weave-core                     │
//! ├──────────────────────────────────────────────────┤
//! │  Document Model   │  Style Interning             │
//! │  - Tagged nodes   │  - Category buckets          │
//! │  - Paint/strokes  │  - Canonical keys            │
//! │  - Type styles    │  - Class dedup               │
//! ├──────────────────────────────────────────────────┤
//! │  Tree Renderer    │  Serializers                 │
//! │  - Kind dispatch  │  - Style sheet + fonts       │
//! │  - Class lists    │  - HTML page skeleton        │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! One [`CssGenerator`] is created per conversion, mutated while the tree
//! is walked, read during serialization, and then discarded. It is a
//! single-owner value, never shared between conversions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod error;
pub mod generator;
pub mod ident;
pub mod markup;
pub mod render;
pub mod resolver;
pub mod stylesheet;

pub use document::{
    BoundingBox, Canvas, Color, CounterAxisAlign, DocumentNode, FileResponse, FrameNode,
    GradientStop, LayoutMode, LayoutSizing, LayoutWrap, LineHeightUnit, Node, NodeCommon, Paint,
    PaintKind, PrimaryAxisAlign, RectangleNode, TextNode, TypeStyle,
};
pub use error::{ConvertError, ConvertResult};
pub use generator::{Bucket, CssGenerator, Declaration, Position, Styles};
pub use markup::{render_page, MarkupNode};
pub use render::render_document;
pub use resolver::ParentContext;
pub use stylesheet::render_stylesheet;

/// Weave core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
