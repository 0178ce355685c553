//! Recursive design-tree rendering.
//!
//! Walks the document in document order, dispatches each node by its kind,
//! resolves its classes against the shared [`CssGenerator`], and emits the
//! markup tree. Unknown node kinds render as nothing so that
//! forward-incompatible documents still convert.

use crate::document::{Canvas, DocumentNode, FrameNode, LayoutMode, Node, RectangleNode, TextNode};
use crate::error::{ConvertError, ConvertResult};
use crate::generator::{CssGenerator, Position};
use crate::ident;
use crate::markup::MarkupNode;
use crate::resolver::{self, push_token, ParentContext};

/// Render a document's first canvas into a markup tree, interning every
/// style into `generator` along the way.
///
/// Installs the fixed page-level container style, then renders the frame
/// children of the first canvas. Non-frame canvas children are skipped.
///
/// # Errors
///
/// Returns [`ConvertError::MissingCanvas`] when the document has no
/// canvas.
pub fn render_document(
    document: &DocumentNode,
    generator: &mut CssGenerator,
) -> ConvertResult<MarkupNode> {
    let canvas = document
        .children
        .first()
        .ok_or(ConvertError::MissingCanvas)?;

    tracing::debug!("Rendering canvas {:?}", canvas.name);
    Ok(render_canvas(canvas, generator))
}

fn render_canvas(canvas: &Canvas, generator: &mut CssGenerator) -> MarkupNode {
    generator.add_document_container();

    let mut classes = vec![ident::normalize_name(&canvas.name)];
    if let Some(background) = &canvas.background_color {
        push_token(&mut classes, generator.add_background_color(background));
    }

    let children = canvas
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Frame(frame) => {
                Some(render_frame(frame, generator, &ParentContext::default()))
            }
            _ => None,
        })
        .collect();

    MarkupNode::element("div", "figma-document", classes, children)
}

/// Render one node, dispatching on its kind. Unknown kinds yield `None`.
fn render_node(
    node: &Node,
    generator: &mut CssGenerator,
    parent: &ParentContext<'_>,
) -> Option<MarkupNode> {
    match node {
        Node::Frame(frame) => Some(render_frame(frame, generator, parent)),
        Node::Rectangle(rectangle) => Some(render_rectangle(rectangle, generator, parent)),
        Node::Text(text) => Some(render_text(text, generator, parent)),
        Node::Unsupported => None,
    }
}

fn render_frame(
    frame: &FrameNode,
    generator: &mut CssGenerator,
    parent: &ParentContext<'_>,
) -> MarkupNode {
    let mut classes = resolver::resolve_common(generator, &frame.common, parent);

    if !frame.fills.is_empty() {
        push_token(&mut classes, generator.add_color_from_fill(&frame.fills));
    }
    if frame.corner_radius.is_some_and(|radius| radius != 0.0)
        || frame.rectangle_corner_radii.is_some()
    {
        push_token(
            &mut classes,
            generator.add_corner_radius(
                frame.corner_radius,
                frame.rectangle_corner_radii.as_deref(),
            ),
        );
    }
    if frame.clips_content {
        push_token(&mut classes, generator.add_clips_content(true));
    }

    let auto_mode = frame.layout_mode.filter(|mode| *mode != LayoutMode::None);

    if let Some(mode) = auto_mode {
        let has_padding = [
            frame.padding_left,
            frame.padding_top,
            frame.padding_right,
            frame.padding_bottom,
        ]
        .iter()
        .any(|edge| edge.is_some_and(|value| value != 0.0));

        if has_padding {
            push_token(
                &mut classes,
                generator.add_padding(
                    frame.padding_left.unwrap_or(0.0),
                    frame.padding_top.unwrap_or(0.0),
                    frame.padding_right.unwrap_or(0.0),
                    frame.padding_bottom.unwrap_or(0.0),
                ),
            );
        }

        push_token(&mut classes, generator.add_flex(mode));

        if let Some(wrap) = frame.layout_wrap {
            push_token(&mut classes, generator.add_wrap(wrap));
        }
        if frame.item_spacing.is_some_and(|spacing| spacing != 0.0) {
            push_token(
                &mut classes,
                generator.add_item_spacing(frame.item_spacing.unwrap_or(0.0)),
            );
        }
        if frame.primary_axis_align_items.is_some() || frame.counter_axis_align_items.is_some() {
            push_token(
                &mut classes,
                generator.add_alignment(
                    frame.primary_axis_align_items,
                    frame.counter_axis_align_items,
                ),
            );
        }
    } else if !frame.children.is_empty() {
        // Anchor for descendants that position themselves absolutely.
        push_token(&mut classes, generator.add_position(Position::Relative));
    }

    let child_context = ParentContext {
        bounding_box: frame.common.absolute_bounding_box.as_ref(),
        layout_mode: frame.layout_mode,
    };
    let children = frame
        .children
        .iter()
        .filter_map(|child| render_node(child, generator, &child_context))
        .collect();

    MarkupNode::element("div", "figma-frame", classes, children)
}

fn render_rectangle(
    rectangle: &RectangleNode,
    generator: &mut CssGenerator,
    parent: &ParentContext<'_>,
) -> MarkupNode {
    let mut classes = resolver::resolve_common(generator, &rectangle.common, parent);

    if !rectangle.fills.is_empty() {
        push_token(
            &mut classes,
            generator.add_color_from_fill(&rectangle.fills),
        );
    }
    if rectangle.corner_radius.is_some_and(|radius| radius != 0.0) {
        push_token(
            &mut classes,
            generator.add_corner_radius(rectangle.corner_radius, None),
        );
    }
    if let Some(bounds) = &rectangle.common.absolute_bounding_box {
        push_token(
            &mut classes,
            generator.add_dimensions(Some(bounds.width), Some(bounds.height)),
        );
    }

    MarkupNode::element("div", "figma-rectangle", classes, Vec::new())
}

fn render_text(
    text: &TextNode,
    generator: &mut CssGenerator,
    parent: &ParentContext<'_>,
) -> MarkupNode {
    let mut classes = resolver::resolve_common(generator, &text.common, parent);

    if let Some(style) = &text.style {
        push_token(&mut classes, generator.add_font_style(style));
    }
    if !text.fills.is_empty() {
        push_token(&mut classes, generator.add_text_color_from_fill(&text.fills));
    }

    MarkupNode::text_element("p", "figma-text", classes, text.characters.clone())
}
