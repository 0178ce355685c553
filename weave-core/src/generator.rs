//! Style interning store.
//!
//! [`CssGenerator`] owns every category bucket and canonicalization map
//! used by one conversion. Each `add_*` operation derives a canonical key
//! from its inputs, looks up or creates a class name for that key, records
//! the class's declaration in the category bucket, and returns the class
//! name — or an empty token when the input needs no override. Operations
//! are idempotent: equal canonical keys always yield the same class name,
//! and equal inserts never duplicate a bucket entry.
//!
//! A generator is scoped to exactly one conversion. It is mutated in place
//! while the tree is walked and is not safe for concurrent writers;
//! concurrent conversions must each own their own instance.

use std::collections::HashMap;

use crate::document::{
    Color, CounterAxisAlign, LayoutMode, LayoutSizing, LayoutWrap, LineHeightUnit, Paint,
    PaintKind, PrimaryAxisAlign, TypeStyle,
};
use crate::ident;

/// The declaration payload recorded for a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A single value; the owning bucket's category name is the property.
    Value(String),
    /// An ordered property block.
    Block(Vec<(&'static str, String)>),
}

impl Declaration {
    /// The single value, if this is a [`Declaration::Value`].
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Block(_) => None,
        }
    }

    /// The property block, if this is a [`Declaration::Block`].
    #[must_use]
    pub fn as_block(&self) -> Option<&[(&'static str, String)]> {
        match self {
            Self::Value(_) => None,
            Self::Block(block) => Some(block),
        }
    }

    /// Look up a property inside a [`Declaration::Block`].
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.as_block()?
            .iter()
            .find(|(prop, _)| *prop == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An insertion-ordered class-name to declaration mapping.
///
/// Re-inserting an existing class updates its declaration in place without
/// changing its position; serialization walks entries in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    entries: Vec<(String, Declaration)>,
}

impl Bucket {
    /// Insert or update a class declaration.
    fn set(&mut self, class: &str, declaration: Declaration) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == class) {
            entry.1 = declaration;
        } else {
            self.entries.push((class.to_string(), declaration));
        }
    }

    /// Whether a class is already recorded.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == class)
    }

    /// Declaration recorded for a class, if any.
    #[must_use]
    pub fn get(&self, class: &str) -> Option<&Declaration> {
        self.entries
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, declaration)| declaration)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.entries
            .iter()
            .map(|(name, declaration)| (name.as_str(), declaration))
    }

    /// Number of recorded classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All category buckets of one conversion.
///
/// Field order is the fixed serialization order of the style sheet.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    /// `background` declarations (solid colors and gradients).
    pub background: Bucket,
    /// `border` declarations from strokes.
    pub border: Bucket,
    /// `border-radius` declarations.
    pub border_radius: Bucket,
    /// `opacity` declarations.
    pub opacity: Bucket,
    /// `overflow` declarations.
    pub overflow: Bucket,
    /// `min-width` declarations.
    pub min_width: Bucket,
    /// `max-width` declarations.
    pub max_width: Bucket,
    /// `min-height` declarations.
    pub min_height: Bucket,
    /// `max-height` declarations.
    pub max_height: Bucket,
    /// Flex container declarations: flow direction and axis alignment
    /// share this bucket on purpose, so the two concerns can never hold
    /// diverging entries for one class name.
    pub flex: Bucket,
    /// `flex-wrap` declarations.
    pub flex_wrap: Bucket,
    /// `padding` declarations.
    pub padding: Bucket,
    /// `width` declarations.
    pub width: Bucket,
    /// `height` declarations.
    pub height: Bucket,
    /// `gap` declarations.
    pub gap: Bucket,
    /// Typography declaration blocks.
    pub text_style: Bucket,
    /// Foreground `color` declarations.
    pub color: Bucket,
    /// `position` declarations.
    pub position: Bucket,
    /// `left` offsets.
    pub left: Bucket,
    /// `top` offsets.
    pub top: Bucket,
}

impl Styles {
    /// Buckets paired with their category name, in serialization order.
    ///
    /// The category name doubles as the CSS property for
    /// [`Declaration::Value`] entries.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Bucket)> {
        [
            ("background", &self.background),
            ("border", &self.border),
            ("border-radius", &self.border_radius),
            ("opacity", &self.opacity),
            ("overflow", &self.overflow),
            ("min-width", &self.min_width),
            ("max-width", &self.max_width),
            ("min-height", &self.min_height),
            ("max-height", &self.max_height),
            ("flex", &self.flex),
            ("flex-wrap", &self.flex_wrap),
            ("padding", &self.padding),
            ("width", &self.width),
            ("height", &self.height),
            ("gap", &self.gap),
            ("textStyle", &self.text_style),
            ("color", &self.color),
            ("position", &self.position),
            ("left", &self.left),
            ("top", &self.top),
        ]
        .into_iter()
    }
}

/// CSS position keyword for generated position classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// `position: relative`, for containers anchoring absolute children.
    Relative,
    /// `position: absolute`.
    Absolute,
}

impl Position {
    fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

/// The style interning store for one conversion.
#[derive(Debug, Default)]
pub struct CssGenerator {
    styles: Styles,
    color_classes: HashMap<String, String>,
    text_style_classes: HashMap<String, String>,
    gradient_classes: HashMap<String, String>,
    border_classes: HashMap<String, String>,
    radius_classes: HashMap<String, String>,
}

impl CssGenerator {
    /// Create an empty generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All buckets, for serialization. Reflects exactly what was inserted,
    /// in insertion order per bucket.
    #[must_use]
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    fn get_or_create_class(
        map: &mut HashMap<String, String>,
        key: &str,
        prefix: &str,
    ) -> String {
        if let Some(class) = map.get(key) {
            return class.clone();
        }
        let class = format!("{prefix}-{}", ident::new_suffix());
        map.insert(key.to_string(), class.clone());
        class
    }

    fn color_as_string(color: &Color) -> String {
        let r = channel(color.r);
        let g = channel(color.g);
        let b = channel(color.b);
        match color.a {
            Some(alpha) if !is_opaque(alpha) => {
                format!("rgba({r}, {g}, {b}, {})", fmt_num(alpha))
            }
            _ => format!("rgb({r}, {g}, {b})"),
        }
    }

    /// Canonical key of a color: 0-255 rounded channels plus alpha, which
    /// defaults to 1 when absent. Colors differing only beyond integer
    /// channel resolution canonicalize identically.
    fn color_key(color: &Color) -> String {
        let alpha = color.a.unwrap_or(1.0);
        format!(
            "{}-{}-{}-{}",
            channel(color.r),
            channel(color.g),
            channel(color.b),
            fmt_num(alpha)
        )
    }

    /// Intern a background color; returns its `bg-color-*` class.
    pub fn add_background_color(&mut self, color: &Color) -> String {
        let key = Self::color_key(color);
        let class = Self::get_or_create_class(&mut self.color_classes, &key, "bg-color");
        self.styles
            .background
            .set(&class, Declaration::Value(Self::color_as_string(color)));
        class
    }

    /// Resolve a fill list into a background class.
    ///
    /// Fills are visited in order; solid fills contribute a color class and
    /// linear gradients a gradient class. When several fills contribute,
    /// the last one's class is returned — earlier fills keep their bucket
    /// entries but lose the slot on the node.
    pub fn add_color_from_fill(&mut self, fills: &[Paint]) -> String {
        let mut class = String::new();
        for fill in fills {
            match fill.kind {
                PaintKind::Solid => {
                    if let Some(color) = &fill.color {
                        class = self.add_background_color(color);
                    }
                }
                PaintKind::GradientLinear => {
                    class = self.add_gradient(fill);
                }
                PaintKind::Other => {}
            }
        }
        class
    }

    /// Intern a linear gradient paint at the fixed 135 degree angle.
    pub fn add_gradient(&mut self, paint: &Paint) -> String {
        let stops = paint
            .gradient_stops
            .iter()
            .map(|stop| {
                format!(
                    "{} {}%",
                    Self::color_as_string(&stop.color),
                    fmt_num(stop.position * 100.0)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let gradient = format!("linear-gradient(135deg, {stops})");
        let class = Self::get_or_create_class(&mut self.gradient_classes, &gradient, "gradient");
        self.styles
            .background
            .set(&class, Declaration::Value(gradient));
        class
    }

    /// Resolve text fills into foreground color classes.
    ///
    /// Every solid fill appends a `color-*` class; a fill with opacity
    /// below 1 additionally appends an opacity class.
    pub fn add_text_color_from_fill(&mut self, fills: &[Paint]) -> String {
        let mut classes = Vec::new();
        for fill in fills {
            if fill.kind != PaintKind::Solid {
                continue;
            }
            let Some(color) = &fill.color else { continue };

            let key = Self::color_key(color);
            let class = Self::get_or_create_class(&mut self.color_classes, &key, "color");
            self.styles
                .color
                .set(&class, Declaration::Value(Self::color_as_string(color)));
            classes.push(class);

            if let Some(opacity) = fill.opacity {
                if opacity < 1.0 {
                    let opacity_class = self.add_opacity(Some(opacity));
                    if !opacity_class.is_empty() {
                        classes.push(opacity_class);
                    }
                }
            }
        }
        classes.join(" ")
    }

    /// Intern solid strokes as border classes.
    ///
    /// The border key combines the stroke weight (1 when unspecified) with
    /// the canonical color key.
    pub fn add_strokes(&mut self, strokes: &[Paint], stroke_weight: Option<f64>) -> String {
        let weight = stroke_weight.unwrap_or(1.0);
        let mut classes = Vec::new();
        for stroke in strokes {
            if stroke.kind != PaintKind::Solid {
                continue;
            }
            let Some(stroke_color) = &stroke.color else { continue };

            let color_key = Self::color_key(stroke_color);
            let color = Self::color_as_string(stroke_color);
            let border_key = format!("{}-{color_key}", fmt_num(weight));

            let class = if let Some(existing) = self.border_classes.get(&border_key) {
                existing.clone()
            } else {
                let color_class =
                    Self::get_or_create_class(&mut self.color_classes, &color_key, "color");
                let color_id = color_class.replacen("color-", "", 1);
                let class = format!("border-w-{}px-c-{color_id}", fmt_num(weight));
                self.border_classes.insert(border_key, class.clone());
                self.styles.border.set(
                    &class,
                    Declaration::Value(format!("{}px solid {color}", fmt_num(weight))),
                );
                class
            };
            classes.push(class);
        }
        classes.join(" ")
    }

    /// Intern a corner radius. A uniform radius wins even when per-corner
    /// radii are also present; per-corner values keep the array's order.
    pub fn add_corner_radius(
        &mut self,
        corner_radius: Option<f64>,
        rectangle_corner_radii: Option<&[f64]>,
    ) -> String {
        let (class, value) = if let Some(radius) = corner_radius {
            let key = fmt_num(radius);
            let class = format!("border-radius-{key}px");
            self.radius_classes.insert(key.clone(), class.clone());
            (class, format!("{key}px"))
        } else if let Some(radii) = rectangle_corner_radii {
            let key = radii
                .iter()
                .map(|radius| fmt_num(*radius))
                .collect::<Vec<_>>()
                .join("-");
            let value = radii
                .iter()
                .map(|radius| format!("{}px", fmt_num(*radius)))
                .collect::<Vec<_>>()
                .join(" ");
            let class =
                Self::get_or_create_class(&mut self.radius_classes, &key, "border-radius");
            (class, value)
        } else {
            return String::new();
        };

        self.styles
            .border_radius
            .set(&class, Declaration::Value(value));
        class
    }

    /// Intern an opacity override. Returns the empty token when the value
    /// is absent or exactly 1 — fully opaque needs no class.
    pub fn add_opacity(&mut self, opacity: Option<f64>) -> String {
        let Some(value) = opacity else {
            return String::new();
        };
        if is_opaque(value) {
            return String::new();
        }

        let rounded = (value * 100.0).round() / 100.0;
        let class = format!("opacity-{}", fmt_num(rounded).replace('.', "-"));
        self.styles
            .opacity
            .set(&class, Declaration::Value(fmt_num(rounded)));
        class
    }

    /// Intern min/max size constraints, one class per present nonzero
    /// value.
    pub fn add_min_max(
        &mut self,
        min_width: Option<f64>,
        max_width: Option<f64>,
        min_height: Option<f64>,
        max_height: Option<f64>,
    ) -> String {
        let mut classes = Vec::new();

        if let Some(value) = nonzero(min_width) {
            let class = format!("min-w-{}px", fmt_num(value));
            self.styles
                .min_width
                .set(&class, Declaration::Value(format!("{}px", fmt_num(value))));
            classes.push(class);
        }
        if let Some(value) = nonzero(max_width) {
            let class = format!("max-w-{}px", fmt_num(value));
            self.styles
                .max_width
                .set(&class, Declaration::Value(format!("{}px", fmt_num(value))));
            classes.push(class);
        }
        if let Some(value) = nonzero(min_height) {
            let class = format!("min-h-{}px", fmt_num(value));
            self.styles
                .min_height
                .set(&class, Declaration::Value(format!("{}px", fmt_num(value))));
            classes.push(class);
        }
        if let Some(value) = nonzero(max_height) {
            let class = format!("max-h-{}px", fmt_num(value));
            self.styles
                .max_height
                .set(&class, Declaration::Value(format!("{}px", fmt_num(value))));
            classes.push(class);
        }

        classes.join(" ")
    }

    /// `overflow: hidden` for clipping containers.
    pub fn add_clips_content(&mut self, clips_content: bool) -> String {
        if clips_content {
            let class = "overflow-hidden";
            self.styles
                .overflow
                .set(class, Declaration::Value("hidden".to_string()));
            class.to_string()
        } else {
            String::new()
        }
    }

    /// Intern padding. Always emits a class, even all-zero.
    ///
    /// Arguments arrive left-top-right-bottom; both the class name and the
    /// declaration use CSS shorthand order (top right bottom left).
    pub fn add_padding(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> String {
        let paddings = [top, right, bottom, left]
            .iter()
            .map(|edge| format!("{}px", fmt_num(*edge)))
            .collect::<Vec<_>>();

        let class = format!("padding-{}", paddings.join("-"));
        self.styles
            .padding
            .set(&class, Declaration::Value(paddings.join(" ")));
        class
    }

    /// Intern a flex container class for a layout mode.
    pub fn add_flex(&mut self, layout_mode: LayoutMode) -> String {
        let mut class = String::from("flex-");
        let mut block = vec![("display", "flex".to_string())];

        match layout_mode {
            LayoutMode::Horizontal => {
                class.push_str("horizontal");
                block.push(("flex-direction", "row".to_string()));
            }
            LayoutMode::Vertical => {
                class.push_str("vertical");
                block.push(("flex-direction", "column".to_string()));
            }
            LayoutMode::None | LayoutMode::Other => {}
        }

        self.styles.flex.set(&class, Declaration::Block(block));
        class
    }

    /// Intern a flex wrap class.
    pub fn add_wrap(&mut self, layout_wrap: LayoutWrap) -> String {
        let (class, value) = match layout_wrap {
            LayoutWrap::Wrap => ("flex-wrap-wrap", "wrap"),
            LayoutWrap::NoWrap => ("flex-wrap-nowrap", "nowrap"),
        };
        self.styles
            .flex_wrap
            .set(class, Declaration::Value(value.to_string()));
        class.to_string()
    }

    /// Horizontal sizing class: `FILL` maps to 100%, `HUG` to fit-content.
    /// Fixed sizing gets no class here; it is expressed through pixel
    /// dimensions instead.
    pub fn add_sizing_horizontal(&mut self, sizing: LayoutSizing) -> String {
        let mut class = String::from("width-");
        match sizing {
            LayoutSizing::Fill => {
                class.push_str("full");
                self.styles
                    .width
                    .set(&class, Declaration::Value("100%".to_string()));
            }
            LayoutSizing::Hug => {
                class.push_str("fit-content");
                self.styles
                    .width
                    .set(&class, Declaration::Value("fit-content".to_string()));
            }
            LayoutSizing::Fixed | LayoutSizing::Other => {}
        }
        class
    }

    /// Vertical counterpart of [`Self::add_sizing_horizontal`].
    pub fn add_sizing_vertical(&mut self, sizing: LayoutSizing) -> String {
        let mut class = String::from("height-");
        match sizing {
            LayoutSizing::Fill => {
                class.push_str("full");
                self.styles
                    .height
                    .set(&class, Declaration::Value("100%".to_string()));
            }
            LayoutSizing::Hug => {
                class.push_str("fit-content");
                self.styles
                    .height
                    .set(&class, Declaration::Value("fit-content".to_string()));
            }
            LayoutSizing::Fixed | LayoutSizing::Other => {}
        }
        class
    }

    /// Gap class for auto-layout item spacing.
    pub fn add_item_spacing(&mut self, item_spacing: f64) -> String {
        let mut class = String::from("spacing-");
        if item_spacing != 0.0 {
            class.push_str(&format!("{}px", fmt_num(item_spacing)));
            self.styles
                .gap
                .set(&class, Declaration::Value(format!("{}px", fmt_num(item_spacing))));
        }
        class
    }

    /// Intern a typography descriptor.
    ///
    /// The canonical key is the full serialized descriptor: descriptors
    /// differing in any field intern separately, even when the difference
    /// produces no declaration.
    pub fn add_font_style(&mut self, style: &TypeStyle) -> String {
        let key = serde_json::to_string(style).unwrap_or_default();
        let class = Self::get_or_create_class(&mut self.text_style_classes, &key, "text");

        if !self.styles.text_style.contains(&class) {
            let mut block: Vec<(&'static str, String)> = Vec::new();

            if let Some(family) = &style.font_family {
                if !family.is_empty() {
                    block.push(("font-family", family.clone()));
                }
            }
            if let Some(weight) = nonzero(style.font_weight) {
                block.push(("font-weight", fmt_num(weight)));
            }
            if let Some(size) = nonzero(style.font_size) {
                block.push(("font-size", format!("{}px", fmt_num(size))));
            }
            if let Some(align) = &style.text_align_horizontal {
                if !align.is_empty() {
                    let mut value = align.to_lowercase();
                    if value == "justified" {
                        value = "justify".to_string();
                    }
                    block.push(("text-align", value));
                }
            }
            if let Some(spacing) = nonzero(style.letter_spacing) {
                block.push(("letter-spacing", format!("{}px", fmt_num(spacing))));
            }
            match style.line_height_unit {
                Some(LineHeightUnit::FontSizePercent) => {
                    if let Some(value) = style.line_height_percent_font_size {
                        block.push(("line-height", format!("{}%", fmt_num(value))));
                    }
                }
                Some(LineHeightUnit::IntrinsicPercent) => {
                    if let Some(value) = style.line_height_percent {
                        block.push(("line-height", format!("{}%", fmt_num(value))));
                    }
                }
                Some(LineHeightUnit::Pixels) => {
                    if let Some(value) = style.line_height_px {
                        block.push(("line-height", format!("{}px", fmt_num(value))));
                    }
                }
                Some(LineHeightUnit::Other) | None => {}
            }

            self.styles.text_style.set(&class, Declaration::Block(block));
        }

        class
    }

    /// Pixel dimension classes from bounding-box geometry, rounded to
    /// whole pixels.
    pub fn add_dimensions(&mut self, width: Option<f64>, height: Option<f64>) -> String {
        let mut classes = Vec::new();

        if let Some(value) = nonzero(width) {
            let rounded = fmt_num(value.round());
            let class = format!("width-{rounded}px");
            self.styles
                .width
                .set(&class, Declaration::Value(format!("{rounded}px")));
            classes.push(class);
        }
        if let Some(value) = nonzero(height) {
            let rounded = fmt_num(value.round());
            let class = format!("height-{rounded}px");
            self.styles
                .height
                .set(&class, Declaration::Value(format!("{rounded}px")));
            classes.push(class);
        }

        classes.join(" ")
    }

    /// Axis alignment classes for auto-layout containers.
    ///
    /// These live in the shared flex bucket next to the flow-direction
    /// classes; inserts are presence-checked so repeats cannot disturb
    /// existing entries.
    pub fn add_alignment(
        &mut self,
        primary_axis: Option<PrimaryAxisAlign>,
        counter_axis: Option<CounterAxisAlign>,
    ) -> String {
        let mut classes = Vec::new();

        if let Some(primary) = primary_axis {
            let class = format!("justify-{}", primary.token());
            if !self.styles.flex.contains(&class) {
                self.styles.flex.set(
                    &class,
                    Declaration::Block(vec![("justify-content", primary.css_value().to_string())]),
                );
            }
            classes.push(class);
        }

        if let Some(counter) = counter_axis {
            let class = format!("align-{}", counter.token());
            if !self.styles.flex.contains(&class) {
                self.styles.flex.set(
                    &class,
                    Declaration::Block(vec![("align-items", counter.css_value().to_string())]),
                );
            }
            classes.push(class);
        }

        classes.join(" ")
    }

    /// A bare `position` class.
    pub fn add_position(&mut self, position: Position) -> String {
        let class = format!("pos-{}", position.as_str());
        self.styles
            .position
            .set(&class, Declaration::Value(position.as_str().to_string()));
        class
    }

    /// Absolute position classes from parent-relative offsets, rounded to
    /// two decimals. Always returns all three tokens.
    pub fn add_absolute_position(&mut self, left: f64, top: f64) -> String {
        let left = (left * 100.0).round() / 100.0;
        let top = (top * 100.0).round() / 100.0;

        let position_class = "pos-absolute";
        self.styles
            .position
            .set(position_class, Declaration::Value("absolute".to_string()));

        let left_class = format!("left-{}px", fmt_num(left));
        self.styles
            .left
            .set(&left_class, Declaration::Value(format!("{}px", fmt_num(left))));

        let top_class = format!("top-{}px", fmt_num(top));
        self.styles
            .top
            .set(&top_class, Declaration::Value(format!("{}px", fmt_num(top))));

        format!("{position_class} {left_class} {top_class}")
    }

    /// The fixed page-level container: a centered flex wrapper sized to
    /// the full viewport.
    pub fn add_document_container(&mut self) -> String {
        let class = "figma-document";

        self.styles.flex.set(
            class,
            Declaration::Block(vec![
                ("display", "flex".to_string()),
                ("justify-content", "center".to_string()),
            ]),
        );
        self.styles
            .width
            .set(class, Declaration::Value("100vw".to_string()));
        self.styles
            .height
            .set(class, Declaration::Value("100vh".to_string()));

        class.to_string()
    }
}

/// One color channel scaled to 0-255 and rounded.
fn channel(value: f64) -> i64 {
    (value * 255.0).round() as i64
}

fn is_opaque(alpha: f64) -> bool {
    (alpha - 1.0).abs() < f64::EPSILON
}

/// Present, nonzero numeric attribute.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Format a number the way the document's own values read: integral
/// values bare, fractional values in their shortest decimal form.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
