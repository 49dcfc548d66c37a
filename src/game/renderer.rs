//! Walkthrough Renderer
//!
//! Turns the static scene tree into macroquad meshes once, then draws them
//! every frame from the first-person camera, followed by the HUD.
//!
//! macroquad's default 3D pipeline is unlit, so faces are shaded on the CPU
//! when the meshes are built: ambient term plus one directional light.

use macroquad::models::{Mesh, Vertex};
use macroquad::prelude::*;
use crate::input::Action;
use crate::world::{LightingSettings, Material, Palette, Primitive, SceneNode, Shape, WalkthroughConfig};
use super::camera::FirstPersonCamera;
use super::runtime::{TickReport, Walkthrough};

/// Convert 0xRRGGBB to an opaque colour
pub fn rgb(hex: u32) -> Color {
    Color::from_rgba(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
        255,
    )
}

/// Ambient + single directional light
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    /// Unit vector pointing from the surface towards the light
    pub to_light: Vec3,
}

impl Lighting {
    pub fn from_settings(settings: &LightingSettings) -> Self {
        Self {
            ambient: settings.ambient,
            directional: settings.directional,
            to_light: Vec3::from(settings.direction).normalize_or_zero(),
        }
    }

    /// Lit colour of a face with the given world-space normal
    pub fn shade(&self, base: Color, normal: Vec3) -> Color {
        let diffuse = normal.normalize_or_zero().dot(self.to_light).max(0.0);
        let k = (self.ambient + self.directional * diffuse).clamp(0.0, 1.0);
        Color::new(base.r * k, base.g * k, base.b * k, base.a)
    }
}

/// Box faces as (local normal, corner indices counter-clockwise from outside).
/// Corner `i` has x = bit 0, y = bit 1, z = bit 2 (0 = negative side).
const BOX_FACES: [([f32; 3], [usize; 4]); 6] = [
    ([1.0, 0.0, 0.0], [1, 3, 7, 5]),
    ([-1.0, 0.0, 0.0], [0, 4, 6, 2]),
    ([0.0, 1.0, 0.0], [2, 6, 7, 3]),
    ([0.0, -1.0, 0.0], [0, 1, 5, 4]),
    ([0.0, 0.0, 1.0], [4, 5, 7, 6]),
    ([0.0, 0.0, -1.0], [0, 2, 3, 1]),
];

/// Box edges as corner index pairs
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7),
    (0, 2), (1, 3), (4, 6), (5, 7),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

fn box_corners(size: Vec3) -> [Vec3; 8] {
    let half = size / 2.0;
    std::array::from_fn(|i| {
        Vec3::new(
            if i & 1 == 0 { -half.x } else { half.x },
            if i & 2 == 0 { -half.y } else { half.y },
            if i & 4 == 0 { -half.z } else { half.z },
        )
    })
}

/// Quad from four world-space corners (counter-clockwise) and their UVs
fn quad_mesh(corners: [Vec3; 4], uvs: [Vec2; 4], color: Color, texture: Option<Texture2D>) -> Mesh {
    let vertices = corners
        .iter()
        .zip(uvs)
        .map(|(p, uv)| Vertex::new(p.x, p.y, p.z, uv.x, uv.y, color))
        .collect();
    Mesh {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
        texture,
    }
}

const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 0.0),
];

/// Render target rows are stored bottom-up
const RENDER_TARGET_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// GPU-ready scene: shaded meshes plus outline segments
pub struct SceneMeshes {
    pub meshes: Vec<Mesh>,
    /// Translucent meshes, drawn after the opaque ones
    pub overlays: Vec<Mesh>,
    pub edges: Vec<(Vec3, Vec3)>,
    pub edge_color: Color,
    pub clear_color: Color,
}

struct MeshBuilder<'a, F> {
    palette: &'a Palette,
    lighting: Lighting,
    text_texture: F,
    out: SceneMeshes,
}

impl<'a, F: FnMut(&str) -> Option<Texture2D>> MeshBuilder<'a, F> {
    fn visit(&mut self, node: &SceneNode, parent: Mat4) {
        let transform = parent
            * Mat4::from_translation(node.position)
            * Mat4::from_rotation_y(node.rotation_y);

        for primitive in &node.primitives {
            let local = transform
                * Mat4::from_translation(primitive.position)
                * Mat4::from_rotation_y(primitive.rotation_y);
            self.add_primitive(primitive, local);
        }
        for child in &node.children {
            self.visit(child, transform);
        }
    }

    fn base_color(&self, material: Material) -> Color {
        match material {
            Material::Wall => rgb(self.palette.wall),
            Material::Floor => rgb(self.palette.floor),
            Material::Note => rgb(self.palette.note),
            Material::Edge => rgb(self.palette.edge),
            Material::Text => WHITE,
        }
    }

    fn add_primitive(&mut self, primitive: &Primitive, transform: Mat4) {
        let base = self.base_color(primitive.material);

        match &primitive.shape {
            Shape::Box { size } => {
                let corners = box_corners(*size).map(|c| transform.transform_point3(c));
                for (normal, idx) in BOX_FACES {
                    let normal = transform.transform_vector3(Vec3::from(normal));
                    let color = self.lighting.shade(base, normal);
                    let quad = idx.map(|i| corners[i]);
                    self.out.meshes.push(quad_mesh(quad, QUAD_UVS, color, None));
                }
            }
            Shape::Edges { size } => {
                let corners = box_corners(*size).map(|c| transform.transform_point3(c));
                self.out
                    .edges
                    .extend(BOX_EDGES.iter().map(|&(a, b)| (corners[a], corners[b])));
            }
            Shape::Plane { width, height } => {
                let quad = plane_corners(*width, *height).map(|c| transform.transform_point3(c));
                let color = self.lighting.shade(base, transform.transform_vector3(Vec3::Z));
                self.out.meshes.push(quad_mesh(quad, QUAD_UVS, color, None));
            }
            Shape::TextPanel { width, height, text } => {
                let quad = plane_corners(*width, *height).map(|c| transform.transform_point3(c));
                let texture = (self.text_texture)(text);
                self.out.overlays.push(quad_mesh(quad, RENDER_TARGET_UVS, base, texture));
            }
        }
    }
}

/// Quad in the local XY plane, counter-clockwise seen from +Z
fn plane_corners(width: f32, height: f32) -> [Vec3; 4] {
    let (w, h) = (width / 2.0, height / 2.0);
    [
        Vec3::new(-w, -h, 0.0),
        Vec3::new(w, -h, 0.0),
        Vec3::new(w, h, 0.0),
        Vec3::new(-w, h, 0.0),
    ]
}

impl SceneMeshes {
    /// Build meshes for the whole tree. `text_texture` supplies the texture
    /// for each text panel (None draws the panel untextured).
    pub fn build(
        scene: &SceneNode,
        config: &WalkthroughConfig,
        text_texture: impl FnMut(&str) -> Option<Texture2D>,
    ) -> Self {
        let mut builder = MeshBuilder {
            palette: &config.palette,
            lighting: Lighting::from_settings(&config.lighting),
            text_texture,
            out: SceneMeshes {
                meshes: Vec::new(),
                overlays: Vec::new(),
                edges: Vec::new(),
                edge_color: rgb(config.palette.edge),
                clear_color: rgb(config.lighting.clear_color),
            },
        };
        builder.visit(scene, Mat4::IDENTITY);
        builder.out
    }

    pub fn draw(&self, camera: &FirstPersonCamera) {
        clear_background(self.clear_color);
        set_camera(&camera.to_camera3d());

        for mesh in &self.meshes {
            draw_mesh(mesh);
        }
        for &(a, b) in &self.edges {
            draw_line_3d(a, b, self.edge_color);
        }
        for mesh in &self.overlays {
            draw_mesh(mesh);
        }

        set_default_camera();
    }
}

/// Centred `+` crosshair
pub fn draw_crosshair() {
    let size = 20.0;
    let dims = measure_text("+", None, size as u16, 1.0);
    draw_text(
        "+",
        (screen_width() - dims.width) / 2.0,
        (screen_height() + dims.offset_y) / 2.0,
        size,
        WHITE,
    );
}

/// Controls hint, shown while the pointer is free
pub fn draw_controls_hint() {
    let hint = format!(
        "Click to look around | Arrows: Move | {}: {} | Wheel: Zoom | Esc: {} | F3: {}",
        "Space",
        Action::Jump.label(),
        Action::ReleaseCapture.label(),
        Action::ToggleDebug.label(),
    );
    let dims = measure_text(&hint, None, 16, 1.0);
    draw_text(
        &hint,
        (screen_width() - dims.width) / 2.0,
        screen_height() - 24.0,
        16.0,
        Color::from_rgba(150, 150, 160, 220),
    );
}

/// Top-left player stats
pub fn draw_debug_overlay(walkthrough: &Walkthrough, report: &TickReport) {
    let player = &walkthrough.player.state;
    let look = &walkthrough.look;
    let lines = [
        format!(
            "pos  {:>7.2} {:>6.2} {:>7.2}",
            player.position.x, player.position.y, player.position.z
        ),
        format!("yaw  {:>7.3}  pitch {:>6.3}", look.yaw, look.pitch),
        {
            let dir = look.forward();
            format!("dir  {:>7.2} {:>6.2} {:>7.2}", dir.x, dir.y, dir.z)
        },
        format!(
            "vert {}  v {:.3}",
            if player.is_airborne() { "airborne" } else { "grounded" },
            player.vertical_velocity
        ),
        format!("fov  {:.0}", walkthrough.camera.fov),
        format!("blocked {}", walkthrough.player.blocked_steps),
        format!(
            "tick {:?} {:?}{}",
            report.step,
            report.vertical,
            if report.resized { " resized" } else { "" }
        ),
        format!("fps  {}", get_fps()),
    ];

    draw_rectangle(8.0, 8.0, 300.0, 14.0 + lines.len() as f32 * 18.0, Color::new(0.0, 0.0, 0.0, 0.6));
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 16.0, 26.0 + i as f32 * 18.0, 16.0, Color::from_rgba(80, 255, 80, 255));
    }
}
