use std::f32::consts::{FRAC_PI_2, PI};

use egui::epaint::TextShape;
use egui::text::{LayoutJob, TextFormat};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape as PaintShape, Stroke, Vec2};

use crate::config::CanvasSize;
use crate::element::{rotate_about, Element, ElementType, Geometry, Shape, ShapeKind, Text, TextAlign};
use crate::state::EditorModel;
use crate::tools::{resize_handle_position, rotate_handle_position, TransformController};

const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 144, 255);
const HANDLE_FILL: Color32 = Color32::from_rgb(135, 206, 250);
const IMAGE_PLACEHOLDER: Color32 = Color32::from_rgb(210, 214, 220);
const FALLBACK_COLOR: Color32 = Color32::GRAY;
const ELLIPSE_SEGMENTS: usize = 48;
const CORNER_SEGMENTS: usize = 6;

/// Draws the document with the egui painter. Images are drawn as labelled placeholders.
///
/// Keeps the mapping between canvas units and screen points for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    canvas_rect: Rect,
    zoom: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            canvas_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(1280.0, 720.0)),
            zoom: 1.0,
        }
    }
}

impl Renderer {
    /// Creates a renderer mapping a default canvas at 1:1
    pub fn new() -> Self {
        Self::default()
    }

    /// Scales the canvas uniformly to fit `available` and centers it
    pub fn fit(&mut self, available: Rect, canvas: CanvasSize) {
        let zoom = (available.width() / canvas.width)
            .min(available.height() / canvas.height)
            .max(0.01);
        let size = Vec2::new(canvas.width, canvas.height) * zoom;
        self.canvas_rect = Rect::from_center_size(available.center(), size);
        self.zoom = zoom;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Converts canvas units to screen points
    pub fn to_screen(&self, canvas_pos: Pos2) -> Pos2 {
        self.canvas_rect.min + canvas_pos.to_vec2() * self.zoom
    }

    /// Converts screen points to canvas units
    pub fn to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        ((screen_pos - self.canvas_rect.min) / self.zoom).to_pos2()
    }

    /// Paints the canvas, live gesture geometry included, and the selection overlay
    pub fn render(&self, painter: &Painter, model: &EditorModel, controller: &TransformController) {
        painter.rect_filled(self.canvas_rect, 0.0, Color32::WHITE);
        if let Some(background) = model.background_image() {
            if !background.starts_with("data:") {
                painter.text(
                    self.canvas_rect.left_bottom() + Vec2::new(6.0, -6.0),
                    Align2::LEFT_BOTTOM,
                    background,
                    FontId::monospace(10.0),
                    Color32::DARK_GRAY,
                );
            }
        }

        for element in model.document().paint_order() {
            let geometry = controller
                .live_geometry_for(&element.id)
                .unwrap_or(element.geometry);
            self.render_element(painter, element, &geometry);
        }

        if let Some(selected) = model.selected_element() {
            let geometry = controller
                .live_geometry_for(&selected.id)
                .unwrap_or(selected.geometry);
            self.render_selection(painter, &geometry, controller);
        }
    }

    fn screen_corners(&self, geometry: &Geometry) -> Vec<Pos2> {
        geometry.corners().iter().map(|p| self.to_screen(*p)).collect()
    }

    fn render_element(&self, painter: &Painter, element: &Element, geometry: &Geometry) {
        let opacity = element.opacity;
        match &element.kind {
            ElementType::Text(text) => self.render_text(painter, text, geometry, opacity),
            ElementType::Image(_) => {
                let corners = self.screen_corners(geometry);
                painter.add(PaintShape::convex_polygon(
                    corners,
                    IMAGE_PLACEHOLDER.gamma_multiply(opacity),
                    Stroke::new(1.0, Color32::DARK_GRAY),
                ));
                painter.text(
                    self.to_screen(geometry.center()),
                    Align2::CENTER_CENTER,
                    "image",
                    FontId::proportional(12.0),
                    Color32::DARK_GRAY,
                );
            }
            ElementType::Shape(shape) => self.render_shape(painter, shape, geometry, opacity),
        }
    }

    fn shape_outline(&self, shape: &Shape, geometry: &Geometry) -> Vec<Pos2> {
        let rect = geometry.scaled_rect();
        let center = rect.center();
        let local: Vec<Pos2> = match shape.shape_kind {
            ShapeKind::Rectangle => {
                rounded_rect_points(rect, shape.effective_corner_radius() * geometry.scale)
            }
            ShapeKind::Triangle => vec![rect.center_top(), rect.right_bottom(), rect.left_bottom()],
            ShapeKind::Circle => {
                let radius = rect.size() / 2.0;
                (0..ELLIPSE_SEGMENTS)
                    .map(|i| {
                        let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                        center + Vec2::new(radius.x * t.cos(), radius.y * t.sin())
                    })
                    .collect()
            }
        };
        let radians = geometry.rotation_degrees.to_radians();
        local
            .into_iter()
            .map(|p| self.to_screen(rotate_about(p, center, radians)))
            .collect()
    }

    fn render_shape(&self, painter: &Painter, shape: &Shape, geometry: &Geometry, opacity: f32) {
        let outline = self.shape_outline(shape, geometry);

        if let Some(shadow) = &shape.shadow {
            let offset = Vec2::new(shadow.dx, shadow.dy) * self.zoom;
            let shadow_outline = outline.iter().map(|p| *p + offset).collect();
            painter.add(PaintShape::convex_polygon(
                shadow_outline,
                parse_color(&shadow.color_hex).gamma_multiply(opacity),
                Stroke::NONE,
            ));
        }

        let border = if shape.border_width > 0.0 {
            Stroke::new(
                shape.border_width * self.zoom,
                parse_color(&shape.border_color_hex).gamma_multiply(opacity),
            )
        } else {
            Stroke::NONE
        };
        painter.add(PaintShape::convex_polygon(
            outline,
            parse_color(&shape.fill_color_hex).gamma_multiply(opacity),
            border,
        ));
    }

    fn render_text(&self, painter: &Painter, text: &Text, geometry: &Geometry, opacity: f32) {
        let color = parse_color(&text.color_hex).gamma_multiply(opacity);
        let font_px = text.font_size_pt * geometry.scale * self.zoom;
        let rect = geometry.scaled_rect();
        let decoration = Stroke::new((font_px / 16.0).max(1.0), color);
        let mut job = LayoutJob::single_section(
            text.content.clone(),
            TextFormat {
                font_id: FontId::proportional(font_px),
                color,
                italics: text.is_italic(),
                underline: if text.text_decoration.has_underline() {
                    decoration
                } else {
                    Stroke::NONE
                },
                strikethrough: if text.text_decoration.has_line_through() {
                    decoration
                } else {
                    Stroke::NONE
                },
                ..Default::default()
            },
        );
        job.wrap.max_width = rect.width() * self.zoom;
        let galley = painter.layout_job(job);

        let slack = rect.width() - galley.size().x / self.zoom;
        let inset = match text.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => slack / 2.0,
            TextAlign::Right => slack,
        };
        let radians = geometry.rotation_degrees.to_radians();
        let anchor = rotate_about(rect.left_top() + Vec2::new(inset.max(0.0), 0.0), rect.center(), radians);
        let origin = self.to_screen(anchor);
        // The default fonts have no bold face, so bold is drawn twice with a small offset
        if text.is_bold() {
            let offset = Vec2::angled(radians) * (font_px / 24.0).max(0.5);
            painter.add(TextShape::new(origin + offset, galley.clone(), color).with_angle(radians));
        }
        painter.add(TextShape::new(origin, galley, color).with_angle(radians));
    }

    fn render_selection(&self, painter: &Painter, geometry: &Geometry, controller: &TransformController) {
        let outline = self.screen_corners(geometry);
        painter.add(PaintShape::closed_line(outline, Stroke::new(1.5, SELECTION_COLOR)));

        let handle_radius = controller.handle_radius() * self.zoom.min(1.0) / 2.0;
        let resize = self.to_screen(resize_handle_position(geometry));
        painter.circle(resize, handle_radius, HANDLE_FILL, Stroke::new(1.0, SELECTION_COLOR));

        let top_mid = self.to_screen(rotate_about(
            geometry.scaled_rect().center_top(),
            geometry.center(),
            geometry.rotation_degrees.to_radians(),
        ));
        let rotate = self.to_screen(rotate_handle_position(geometry, controller.rotate_handle_offset()));
        painter.line_segment([top_mid, rotate], Stroke::new(1.0, SELECTION_COLOR));
        painter.circle_stroke(rotate, handle_radius, Stroke::new(2.0, SELECTION_COLOR));
    }
}

/// Outline of `rect` with each corner replaced by a quarter circle of `radius`, clockwise
/// from the top edge. The radius is clamped to half the shorter side.
fn rounded_rect_points(rect: Rect, radius: f32) -> Vec<Pos2> {
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if radius.is_nan() || radius <= 0.0 {
        return vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
    }
    let arcs = [
        (Pos2::new(rect.max.x - radius, rect.min.y + radius), -FRAC_PI_2),
        (Pos2::new(rect.max.x - radius, rect.max.y - radius), 0.0),
        (Pos2::new(rect.min.x + radius, rect.max.y - radius), FRAC_PI_2),
        (Pos2::new(rect.min.x + radius, rect.min.y + radius), PI),
    ];
    arcs.into_iter()
        .flat_map(|(center, start)| {
            (0..=CORNER_SEGMENTS).map(move |i| {
                let t = start + FRAC_PI_2 * i as f32 / CORNER_SEGMENTS as f32;
                center + Vec2::new(radius * t.cos(), radius * t.sin())
            })
        })
        .collect()
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)`, `rgba(...)` and `transparent`.
/// Anything else draws gray.
pub fn parse_color(value: &str) -> Color32 {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Color32::TRANSPARENT;
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(FALLBACK_COLOR);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args).unwrap_or(FALLBACK_COLOR);
    }
    FALLBACK_COLOR
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color32::from_rgb(digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)?,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color32> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0) as u8);
    let (r, g, b) = (
        channel(parts.first().copied()?)?,
        channel(parts.get(1).copied()?)?,
        channel(parts.get(2).copied()?)?,
    );
    let alpha = match parts.get(3) {
        Some(a) => (a.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Some(Color32::from_rgba_unmultiplied(r, g, b, alpha))
}
