//! Per-node class resolution shared by every rendered node kind.
//!
//! Derives the base class list of a node in a fixed order: the normalized
//! name class first, then opacity, size constraints, and strokes where the
//! node carries them, then layout sizing (horizontal before vertical), and
//! finally absolute positioning when the parent does not flow-position its
//! children.

use crate::document::{LayoutMode, LayoutSizing, NodeCommon};
use crate::generator::CssGenerator;
use crate::{document::BoundingBox, ident};

/// Layout context a node inherits from its parent.
///
/// Top-level nodes have no parent geometry and therefore never receive
/// absolute offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentContext<'a> {
    /// Parent's absolute bounding box, when it has one.
    pub bounding_box: Option<&'a BoundingBox>,
    /// Parent's auto-layout mode, when it is a frame.
    pub layout_mode: Option<LayoutMode>,
}

impl ParentContext<'_> {
    /// Whether the parent flow-positions its children. An auto-layout
    /// parent suppresses absolute positioning on every child.
    #[must_use]
    pub fn has_auto_layout(&self) -> bool {
        matches!(self.layout_mode, Some(mode) if mode != LayoutMode::None)
    }
}

/// Append a class token, dropping the empty "no override" token.
pub(crate) fn push_token(classes: &mut Vec<String>, token: String) {
    if !token.is_empty() {
        classes.push(token);
    }
}

/// Resolve the classes every node kind shares.
pub fn resolve_common(
    generator: &mut CssGenerator,
    common: &NodeCommon,
    parent: &ParentContext<'_>,
) -> Vec<String> {
    let mut classes = vec![ident::normalize_name(&common.name)];

    if common.opacity.is_some() {
        push_token(&mut classes, generator.add_opacity(common.opacity));
    }

    if common.min_width.is_some()
        || common.max_width.is_some()
        || common.min_height.is_some()
        || common.max_height.is_some()
    {
        push_token(
            &mut classes,
            generator.add_min_max(
                common.min_width,
                common.max_width,
                common.min_height,
                common.max_height,
            ),
        );
    }

    if !common.strokes.is_empty() {
        push_token(
            &mut classes,
            generator.add_strokes(&common.strokes, common.stroke_weight),
        );
    }

    resolve_layout_sizing(generator, common, &mut classes);
    resolve_absolute_position(generator, common, parent, &mut classes);

    classes
}

/// Sizing classes, horizontal axis before vertical. A `FILL`/`HUG` sizing
/// attribute wins; fixed or absent sizing falls back to the bounding-box
/// dimension of that axis.
fn resolve_layout_sizing(
    generator: &mut CssGenerator,
    common: &NodeCommon,
    classes: &mut Vec<String>,
) {
    match common.layout_sizing_horizontal {
        Some(sizing) if sizing != LayoutSizing::Fixed => {
            push_token(classes, generator.add_sizing_horizontal(sizing));
        }
        _ => {
            if let Some(bounds) = &common.absolute_bounding_box {
                push_token(classes, generator.add_dimensions(Some(bounds.width), None));
            }
        }
    }

    match common.layout_sizing_vertical {
        Some(sizing) if sizing != LayoutSizing::Fixed => {
            push_token(classes, generator.add_sizing_vertical(sizing));
        }
        _ => {
            if let Some(bounds) = &common.absolute_bounding_box {
                push_token(classes, generator.add_dimensions(None, Some(bounds.height)));
            }
        }
    }
}

/// Absolute offsets relative to the parent's origin — only when both boxes
/// are known and the parent does not auto-layout its children.
fn resolve_absolute_position(
    generator: &mut CssGenerator,
    common: &NodeCommon,
    parent: &ParentContext<'_>,
    classes: &mut Vec<String>,
) {
    let (Some(bounds), Some(parent_bounds)) = (&common.absolute_bounding_box, parent.bounding_box)
    else {
        return;
    };

    if parent.has_auto_layout() {
        return;
    }

    push_token(
        classes,
        generator.add_absolute_position(bounds.x - parent_bounds.x, bounds.y - parent_bounds.y),
    );
}
