use rand::Rng;
use yew::prelude::*;

pub const BASE_COLOR: &str = "#0891b2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl ShapeKind {
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Line,
            ShapeKind::Circle,
            ShapeKind::Square,
            ShapeKind::Triangle,
            ShapeKind::Diamond,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    pub min_size: u32,
    pub max_size: u32,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub color: String,
    pub kinds: Vec<ShapeKind>,
    /// Share of shapes forced to be slanted lines.
    pub slanted_ratio: f64,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            min_size: 10,
            max_size: 80,
            min_opacity: 0.05,
            max_opacity: 0.3,
            color: BASE_COLOR.to_string(),
            kinds: ShapeKind::all().to_vec(),
            slanted_ratio: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: usize,
    pub kind: ShapeKind,
    pub size: u32,
    pub rotation: i32,
    pub opacity: f64,
    /// Base colour with an alpha byte appended, e.g. `#0891b21f`.
    pub color: String,
    /// Percent offsets within the parent.
    pub top: u32,
    pub left: u32,
    pub animated: bool,
    pub delay_ms: u32,
    pub slanted: bool,
}

/// Rounds to two decimals, like the opacities in the stylesheet.
fn two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn alpha_color(base: &str, opacity: f64) -> String {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8;
    format!("{}{:02x}", base, alpha)
}

/// Cosmetic only. Same rng state and options give the same shapes.
pub fn generate_shapes<R: Rng>(rng: &mut R, count: usize, options: &ShapeOptions) -> Vec<Shape> {
    let (min_size, max_size) = if options.min_size <= options.max_size {
        (options.min_size, options.max_size)
    } else {
        (options.max_size, options.min_size)
    };
    let (min_opacity, max_opacity) = if options.min_opacity <= options.max_opacity {
        (options.min_opacity, options.max_opacity)
    } else {
        (options.max_opacity, options.min_opacity)
    };

    (0..count)
        .map(|id| {
            let slanted = rng.gen_bool(options.slanted_ratio.clamp(0.0, 1.0));
            let kind = if slanted || options.kinds.is_empty() {
                ShapeKind::Line
            } else {
                options.kinds[rng.gen_range(0..options.kinds.len())]
            };
            let rotation = if slanted { rng.gen_range(-60..=60) } else { rng.gen_range(-45..=45) };
            let opacity = two_decimals(rng.gen_range(min_opacity..=max_opacity));
            let color_opacity = two_decimals(rng.gen_range(0.05..=0.3));
            Shape {
                id,
                kind,
                size: rng.gen_range(min_size..=max_size),
                rotation,
                opacity,
                color: alpha_color(&options.color, color_opacity),
                top: rng.gen_range(0..=95),
                left: rng.gen_range(0..=95),
                animated: rng.gen_bool(0.7),
                delay_ms: rng.gen_range(0..=500),
                slanted,
            }
        })
        .collect()
}

impl Shape {
    fn outer_style(&self) -> String {
        let height = if self.kind == ShapeKind::Line { "1px".to_string() } else { format!("{}px", self.size) };
        format!(
            "top: {}%; inset-inline-start: {}%; width: {}px; height: {}; opacity: {}; transform: rotate({}deg); transition-delay: {}ms;",
            self.top, self.left, self.size, height, self.opacity, self.rotation, self.delay_ms
        )
    }

    fn inner_style(&self) -> String {
        match self.kind {
            ShapeKind::Circle => format!("border: 1px solid {}; border-radius: 50%;", self.color),
            ShapeKind::Square => format!("border: 1px solid {};", self.color),
            ShapeKind::Diamond => format!("border: 1px solid {}; transform: rotate(45deg);", self.color),
            ShapeKind::Triangle => format!(
                "width: 0; height: 0; border-bottom: {}px solid {}; border-left: {}px solid transparent; border-right: {}px solid transparent;",
                self.size,
                self.color,
                self.size / 2,
                self.size / 2
            ),
            ShapeKind::Line => {
                let (angle, width) = if self.slanted {
                    (self.rotation, self.size * 3 / 2)
                } else {
                    (90, self.size)
                };
                format!(
                    "background: linear-gradient({}deg, transparent, {}, transparent); width: {}px;",
                    angle, self.color, width
                )
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DecorativeShapeProps {
    pub shape: Shape,
    #[prop_or(true)]
    pub animated: bool,
}

#[function_component(DecorativeShape)]
pub fn decorative_shape(props: &DecorativeShapeProps) -> Html {
    let shape = &props.shape;
    let class = classes!(
        "decor-shape",
        (props.animated && shape.animated).then(|| "decor-animated"),
        shape.slanted.then(|| "decor-slanted"),
    );
    html! {
        <div {class} style={shape.outer_style()} aria-hidden="true">
            <div class="decor-inner" style={shape.inner_style()}></div>
        </div>
    }
}
