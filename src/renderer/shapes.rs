//! Shape generation for 2D primitives
//!
//! All shapes are emitted in scene coordinates (origin top-left, y down) as
//! triangle lists. The render state maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Palette, Vertex};
use crate::settings::Settings;
use crate::sim::{PhysicsConfig, SimulationState};

/// Ground line thickness (scene units)
pub const GROUND_THICKNESS: f32 = 2.0;
/// Segments used to tessellate the ball
pub const BALL_SEGMENTS: u32 = 48;

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick line segment (one quad)
pub fn line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Build the full frame: ground line, then the ball on top
pub fn scene(state: &SimulationState, config: &PhysicsConfig, settings: &Settings) -> Vec<Vertex> {
    let palette = Palette::for_theme(settings.theme);
    let width = state.width as f32;
    let ground_y = state.h as f32;

    let ground_color = if state.dragging() {
        palette.ground_active
    } else {
        palette.ground
    };
    let mut vertices = line(
        Vec2::new(0.0, ground_y),
        Vec2::new(width, ground_y),
        GROUND_THICKNESS,
        ground_color,
    );

    let (center, radii) = if settings.squash {
        let e = state.ball_ellipse(config);
        (
            Vec2::new(e.cx as f32, e.cy as f32),
            Vec2::new(e.rx as f32, e.ry as f32),
        )
    } else {
        let r = config.radius as f32;
        (Vec2::new(width / 2.0, state.y as f32), Vec2::splat(r))
    };
    let ball_color = if state.in_contact(config) {
        palette.ball_contact
    } else {
        palette.ball
    };
    vertices.extend(ellipse(center, radii, ball_color, BALL_SEGMENTS));

    vertices
}
