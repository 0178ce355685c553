//! Figma document data model.
//!
//! Deserializes the subset of the Figma REST file payload that the
//! converter understands. The tree is externally owned and read-only to
//! the conversion: nothing here is mutated while rendering.
//!
//! Node kinds the converter does not understand deserialize to
//! [`Node::Unsupported`] and render as nothing, so newer Figma node types
//! never break a conversion.
//!
//! | Figma type  | Variant             | Rendered as        |
//! |-------------|---------------------|--------------------|
//! | `FRAME`     | [`Node::Frame`]     | `<div>` container  |
//! | `RECTANGLE` | [`Node::Rectangle`] | empty `<div>`      |
//! | `TEXT`      | [`Node::Text`]      | `<p>` with content |
//! | anything    | [`Node::Unsupported`] | nothing          |

use serde::{Deserialize, Serialize};

use crate::error::ConvertResult;

/// Top-level payload returned by the Figma file endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FileResponse {
    /// Human-readable file name.
    #[serde(default)]
    pub name: String,
    /// Root document node holding the canvases (pages).
    pub document: DocumentNode,
}

impl FileResponse {
    /// Parse a file payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or doesn't match the file
    /// schema.
    pub fn from_json(json: &str) -> ConvertResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Root of the design tree; children are canvases.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentNode {
    /// Ordered canvases of the file.
    #[serde(default)]
    pub children: Vec<Canvas>,
}

/// A canvas (page) holding top-level design nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    /// Canvas name as shown in the editor.
    #[serde(default)]
    pub name: String,
    /// Canvas background color.
    #[serde(default)]
    pub background_color: Option<Color>,
    /// Top-level nodes in document order.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// One element of the design tree, discriminated by the Figma `type` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// A container, optionally auto-laid-out.
    #[serde(rename = "FRAME")]
    Frame(FrameNode),
    /// A plain rectangle shape.
    #[serde(rename = "RECTANGLE")]
    Rectangle(RectangleNode),
    /// A text run with a type style.
    #[serde(rename = "TEXT")]
    Text(TextNode),
    /// Any node kind this converter does not understand.
    #[serde(other)]
    Unsupported,
}

/// Attributes shared by every concrete node kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCommon {
    /// Layer name as shown in the editor.
    #[serde(default)]
    pub name: String,
    /// Node opacity, 0-1. Absent means fully opaque.
    #[serde(default)]
    pub opacity: Option<f64>,
    /// Absolute bounding box in device-independent pixels.
    #[serde(default)]
    pub absolute_bounding_box: Option<BoundingBox>,
    /// Stroke paints.
    #[serde(default)]
    pub strokes: Vec<Paint>,
    /// Stroke weight in pixels. Defaults to 1 when absent.
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    /// Minimum width constraint.
    #[serde(default)]
    pub min_width: Option<f64>,
    /// Maximum width constraint.
    #[serde(default)]
    pub max_width: Option<f64>,
    /// Minimum height constraint.
    #[serde(default)]
    pub min_height: Option<f64>,
    /// Maximum height constraint.
    #[serde(default)]
    pub max_height: Option<f64>,
    /// Horizontal sizing behavior inside an auto-layout parent.
    #[serde(default)]
    pub layout_sizing_horizontal: Option<LayoutSizing>,
    /// Vertical sizing behavior inside an auto-layout parent.
    #[serde(default)]
    pub layout_sizing_vertical: Option<LayoutSizing>,
}

/// Axis-aligned bounding box in device-independent pixels.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Left edge in absolute coordinates.
    #[serde(default)]
    pub x: f64,
    /// Top edge in absolute coordinates.
    #[serde(default)]
    pub y: f64,
    /// Box width.
    #[serde(default)]
    pub width: f64,
    /// Box height.
    #[serde(default)]
    pub height: f64,
}

/// A container node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    /// Shared node attributes.
    #[serde(flatten)]
    pub common: NodeCommon,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Auto-layout mode.
    #[serde(default)]
    pub layout_mode: Option<LayoutMode>,
    /// Left padding in pixels.
    #[serde(default)]
    pub padding_left: Option<f64>,
    /// Top padding in pixels.
    #[serde(default)]
    pub padding_top: Option<f64>,
    /// Right padding in pixels.
    #[serde(default)]
    pub padding_right: Option<f64>,
    /// Bottom padding in pixels.
    #[serde(default)]
    pub padding_bottom: Option<f64>,
    /// Gap between auto-layout children in pixels.
    #[serde(default)]
    pub item_spacing: Option<f64>,
    /// Whether auto-layout children wrap.
    #[serde(default)]
    pub layout_wrap: Option<LayoutWrap>,
    /// Main-axis alignment of auto-layout children.
    #[serde(default)]
    pub primary_axis_align_items: Option<PrimaryAxisAlign>,
    /// Cross-axis alignment of auto-layout children.
    #[serde(default)]
    pub counter_axis_align_items: Option<CounterAxisAlign>,
    /// Uniform corner radius. Wins over [`Self::rectangle_corner_radii`].
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Per-corner radii in the order given by the document.
    #[serde(default)]
    pub rectangle_corner_radii: Option<Vec<f64>>,
    /// Whether content outside the frame bounds is clipped.
    #[serde(default)]
    pub clips_content: bool,
    /// Fill paints, bottom to top.
    #[serde(default)]
    pub fills: Vec<Paint>,
}

impl FrameNode {
    /// Whether this frame flow-positions its children (auto-layout).
    #[must_use]
    pub fn has_auto_layout(&self) -> bool {
        matches!(self.layout_mode, Some(mode) if mode != LayoutMode::None)
    }
}

/// A rectangle shape node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleNode {
    /// Shared node attributes.
    #[serde(flatten)]
    pub common: NodeCommon,
    /// Fill paints, bottom to top.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Uniform corner radius.
    #[serde(default)]
    pub corner_radius: Option<f64>,
}

/// A text node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    /// Shared node attributes.
    #[serde(flatten)]
    pub common: NodeCommon,
    /// Literal text content.
    #[serde(default)]
    pub characters: String,
    /// Typography descriptor.
    #[serde(default)]
    pub style: Option<TypeStyle>,
    /// Text fill paints.
    #[serde(default)]
    pub fills: Vec<Paint>,
}

/// An RGB(A) color with 0-1 channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel, 0-1.
    pub r: f64,
    /// Green channel, 0-1.
    pub g: f64,
    /// Blue channel, 0-1.
    pub b: f64,
    /// Alpha channel, 0-1. Absent means opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

/// A single fill or stroke paint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    /// Paint kind.
    #[serde(rename = "type")]
    pub kind: PaintKind,
    /// Paint color, for solid paints.
    #[serde(default)]
    pub color: Option<Color>,
    /// Paint opacity, 0-1.
    #[serde(default)]
    pub opacity: Option<f64>,
    /// Gradient stops, for gradient paints.
    #[serde(default)]
    pub gradient_stops: Vec<GradientStop>,
}

/// Paint kinds the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PaintKind {
    /// A solid color.
    #[serde(rename = "SOLID")]
    Solid,
    /// A linear gradient.
    #[serde(rename = "GRADIENT_LINEAR")]
    GradientLinear,
    /// Any other paint kind; contributes nothing.
    #[serde(other)]
    Other,
}

/// One stop of a gradient paint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GradientStop {
    /// Stop color.
    pub color: Color,
    /// Stop position along the gradient axis, 0-1.
    pub position: f64,
}

/// Auto-layout flow mode of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    /// Children are absolutely positioned.
    None,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
    /// Any other mode; treated as flex with no explicit direction.
    #[serde(other)]
    Other,
}

/// Sizing behavior of a node along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutSizing {
    /// Fixed pixel size; expressed through bounding-box dimensions instead.
    Fixed,
    /// Fill the parent along this axis.
    Fill,
    /// Hug content along this axis.
    Hug,
    /// Any other sizing; contributes no class.
    #[serde(other)]
    Other,
}

/// Wrapping behavior of auto-layout children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    /// Children wrap onto new lines.
    Wrap,
    /// Children stay on one line.
    NoWrap,
}

/// Main-axis alignment of auto-layout children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAxisAlign {
    /// Pack children at the start.
    Min,
    /// Center children.
    Center,
    /// Pack children at the end.
    Max,
    /// Distribute children with space between.
    SpaceBetween,
}

impl PrimaryAxisAlign {
    /// Lower-cased document token, used in class names.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Center => "center",
            Self::Max => "max",
            Self::SpaceBetween => "space_between",
        }
    }

    /// The `justify-content` value this alignment maps to.
    #[must_use]
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Min => "flex-start",
            Self::Center => "center",
            Self::Max => "flex-end",
            Self::SpaceBetween => "space-between",
        }
    }
}

/// Cross-axis alignment of auto-layout children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAxisAlign {
    /// Align children to the start.
    Min,
    /// Center children.
    Center,
    /// Align children to the end.
    Max,
}

impl CounterAxisAlign {
    /// Lower-cased document token, used in class names.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Center => "center",
            Self::Max => "max",
        }
    }

    /// The `align-items` value this alignment maps to.
    #[must_use]
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Min => "flex-start",
            Self::Center => "center",
            Self::Max => "flex-end",
        }
    }
}

/// Unit of a type style's line height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineHeightUnit {
    /// Absolute pixels.
    #[serde(rename = "PIXELS")]
    Pixels,
    /// Percentage of the font size.
    #[serde(rename = "FONT_SIZE_%")]
    FontSizePercent,
    /// Percentage of the intrinsic line height.
    #[serde(rename = "INTRINSIC_%")]
    IntrinsicPercent,
    /// Any other unit; emits no line-height declaration.
    #[serde(other)]
    Other,
}

/// Typography descriptor of a text node.
///
/// The full serialized descriptor is the canonical interning key: two
/// descriptors differing in any field, including fields that emit no
/// declaration, intern as distinct styles. Unknown descriptor fields are
/// retained in [`Self::extra`] so they participate in that equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Numeric font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Horizontal alignment token (`LEFT`, `CENTER`, `RIGHT`, `JUSTIFIED`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    /// Letter spacing in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Which line-height field applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_unit: Option<LineHeightUnit>,
    /// Line height in pixels, for [`LineHeightUnit::Pixels`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    /// Line height as a percentage of the intrinsic line height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_percent: Option<f64>,
    /// Line height as a percentage of the font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_percent_font_size: Option<f64>,
    /// Descriptor fields with no declaration mapping.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_node() {
        let json = r#"{
            "type": "FRAME",
            "name": "Hero Section",
            "layoutMode": "HORIZONTAL",
            "itemSpacing": 16,
            "clipsContent": true,
            "children": []
        }"#;

        let node: Node = serde_json::from_str(json).expect("should parse");
        match node {
            Node::Frame(frame) => {
                assert_eq!(frame.common.name, "Hero Section");
                assert_eq!(frame.layout_mode, Some(LayoutMode::Horizontal));
                assert_eq!(frame.item_spacing, Some(16.0));
                assert!(frame.clips_content);
                assert!(frame.has_auto_layout());
            }
            _ => panic!("Expected Frame node"),
        }
    }

    #[test]
    fn test_parse_text_node() {
        let json = r#"{
            "type": "TEXT",
            "name": "Label",
            "characters": "Hello",
            "style": {
                "fontFamily": "Inter",
                "fontWeight": 600,
                "fontSize": 14,
                "lineHeightUnit": "PIXELS",
                "lineHeightPx": 20
            }
        }"#;

        let node: Node = serde_json::from_str(json).expect("should parse");
        match node {
            Node::Text(text) => {
                assert_eq!(text.characters, "Hello");
                let style = text.style.expect("should have style");
                assert_eq!(style.font_family.as_deref(), Some("Inter"));
                assert_eq!(style.line_height_unit, Some(LineHeightUnit::Pixels));
                assert_eq!(style.line_height_px, Some(20.0));
            }
            _ => panic!("Expected Text node"),
        }
    }

    #[test]
    fn test_unknown_node_type_is_unsupported() {
        let json = r#"{ "type": "VECTOR", "name": "Arrow" }"#;
        let node: Node = serde_json::from_str(json).expect("should parse");
        assert!(matches!(node, Node::Unsupported));
    }

    #[test]
    fn test_unknown_paint_kind_is_other() {
        let json = r#"{ "type": "IMAGE" }"#;
        let paint: Paint = serde_json::from_str(json).expect("should parse");
        assert_eq!(paint.kind, PaintKind::Other);
    }

    #[test]
    fn test_frame_without_layout_mode_is_not_auto_layout() {
        let frame = FrameNode::default();
        assert!(!frame.has_auto_layout());

        let frame = FrameNode {
            layout_mode: Some(LayoutMode::None),
            ..FrameNode::default()
        };
        assert!(!frame.has_auto_layout());
    }

    #[test]
    fn test_type_style_extra_fields_survive_roundtrip() {
        let json = r#"{
            "fontFamily": "Inter",
            "fontSize": 14,
            "italic": true
        }"#;

        let style: TypeStyle = serde_json::from_str(json).expect("should parse");
        assert_eq!(style.extra.get("italic"), Some(&serde_json::json!(true)));

        let reserialized = serde_json::to_string(&style).expect("should serialize");
        assert!(reserialized.contains("italic"));
    }

    #[test]
    fn test_parse_file_response() {
        let json = r#"{
            "name": "Test File",
            "document": {
                "children": [
                    {
                        "name": "Page 1",
                        "backgroundColor": { "r": 1, "g": 1, "b": 1, "a": 1 },
                        "children": []
                    }
                ]
            }
        }"#;

        let file = FileResponse::from_json(json).expect("should parse");
        assert_eq!(file.name, "Test File");
        assert_eq!(file.document.children.len(), 1);
        assert_eq!(file.document.children[0].name, "Page 1");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = FileResponse::from_json("{ invalid json }");
        assert!(result.is_err());
    }
}
