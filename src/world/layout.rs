//! Procedural layout generator
//!
//! Builds the static scene as a tree of positioned primitives. Nothing here
//! touches the GPU; the renderer turns the tree into meshes once at startup.
//!
//! Every space (room, corridor, living room) is the same shape: a floor
//! slab and four walls around a `width × depth` footprint, optionally with
//! wall outlines and corner notes.

use std::f32::consts::{FRAC_PI_2, PI};
use macroquad::math::Vec3;
use super::config::{LayoutConfig, TextPanelConfig, WalkthroughConfig};
use super::floor_plan::{FloorPlan, Placement};

/// Surface a primitive is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Wall,
    Floor,
    Note,
    Edge,
    Text,
}

/// Geometry of a primitive, in its local frame
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Solid box centred on the origin
    Box { size: Vec3 },
    /// Outline of a box (its 12 edges)
    Edges { size: Vec3 },
    /// Quad in the local XY plane, facing +Z
    Plane { width: f32, height: f32 },
    /// Quad showing word-wrapped text
    TextPanel { width: f32, height: f32, text: String },
}

/// A shape placed relative to its parent node
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
    pub position: Vec3,
    pub rotation_y: f32,
}

/// Positioned group of primitives and child groups
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub position: Vec3,
    pub rotation_y: f32,
    pub primitives: Vec<Primitive>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: &str, origin_x: f32, origin_z: f32, rotation_y: f32) -> Self {
        Self {
            name: name.to_string(),
            position: Vec3::new(origin_x, 0.0, origin_z),
            rotation_y,
            primitives: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Primitives of this node and all descendants
    pub fn primitive_count(&self) -> usize {
        self.primitives.len() + self.children.iter().map(|c| c.primitive_count()).sum::<usize>()
    }

    /// Primitives of this node with the given material
    #[cfg(test)]
    pub fn primitives_with(&self, material: Material) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.material == material)
    }

    #[cfg(test)]
    pub fn child(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Wall placement inside a footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPlacement {
    pub position: Vec3,
    pub rotation_y: f32,
    /// Length of the wall along its local X axis
    pub length: f32,
}

/// Walls of a `width × depth` footprint: front, back, left, right
pub fn wall_layout(width: f32, depth: f32) -> [WallPlacement; 4] {
    [
        WallPlacement { position: Vec3::new(0.0, 0.0, -depth / 2.0), rotation_y: 0.0, length: width },
        WallPlacement { position: Vec3::new(0.0, 0.0, depth / 2.0), rotation_y: PI, length: width },
        WallPlacement { position: Vec3::new(-width / 2.0, 0.0, 0.0), rotation_y: FRAC_PI_2, length: depth },
        WallPlacement { position: Vec3::new(width / 2.0, 0.0, 0.0), rotation_y: -FRAC_PI_2, length: depth },
    ]
}

/// Which optional decorations a space carries
#[derive(Debug, Clone, Copy)]
struct Decor {
    outlines: bool,
    notes: bool,
}

fn build_space(
    name: &str,
    layout: &LayoutConfig,
    width: f32,
    depth: f32,
    placement: Placement,
    decor: Decor,
) -> SceneNode {
    let mut node = SceneNode::new(name, placement.x, placement.z, placement.rotation_y);

    node.primitives.push(Primitive {
        shape: Shape::Box { size: Vec3::new(width, layout.floor_thickness, depth) },
        material: Material::Floor,
        position: Vec3::new(0.0, -layout.wall_height / 2.0, 0.0),
        rotation_y: 0.0,
    });

    for wall in wall_layout(width, depth) {
        let size = Vec3::new(wall.length, layout.wall_height, layout.wall_thickness);
        node.primitives.push(Primitive {
            shape: Shape::Box { size },
            material: Material::Wall,
            position: wall.position,
            rotation_y: wall.rotation_y,
        });
        if decor.outlines {
            node.primitives.push(Primitive {
                shape: Shape::Edges { size },
                material: Material::Edge,
                position: wall.position,
                rotation_y: wall.rotation_y,
            });
        }
    }

    if decor.notes {
        let inset_x = width / 2.0 - layout.note_inset;
        let inset_z = depth / 2.0 - layout.note_inset;
        let corners = [
            (-inset_x, -inset_z, FRAC_PI_2),
            (inset_x, -inset_z, -FRAC_PI_2),
            (-inset_x, inset_z, FRAC_PI_2),
            (inset_x, inset_z, -FRAC_PI_2),
        ];
        for (x, z, rotation_y) in corners {
            node.primitives.push(Primitive {
                shape: Shape::Plane { width: layout.note_size, height: layout.note_size },
                material: Material::Note,
                position: Vec3::new(x, 0.0, z),
                rotation_y,
            });
        }
    }

    node
}

/// Square room with outlined walls and four corner notes
pub fn build_room(layout: &LayoutConfig, origin_x: f32, origin_z: f32, rotation_y: f32) -> SceneNode {
    let size = layout.room_size;
    build_space(
        "room",
        layout,
        size,
        size,
        Placement::new(origin_x, origin_z, rotation_y),
        Decor { outlines: true, notes: true },
    )
}

/// Corridor footprint: `corridor_width` wide, `room_size` long, bare walls
pub fn build_corridor(layout: &LayoutConfig, origin_x: f32, origin_z: f32, rotation_y: f32) -> SceneNode {
    build_space(
        "corridor",
        layout,
        layout.corridor_width,
        layout.room_size,
        Placement::new(origin_x, origin_z, rotation_y),
        Decor { outlines: false, notes: false },
    )
}

/// Large square room with corner notes
pub fn build_living_room(layout: &LayoutConfig, origin_x: f32, origin_z: f32, rotation_y: f32) -> SceneNode {
    let size = layout.living_room_size();
    build_space(
        "living_room",
        layout,
        size,
        size,
        Placement::new(origin_x, origin_z, rotation_y),
        Decor { outlines: false, notes: true },
    )
}

fn build_text_panel(panel: &TextPanelConfig) -> SceneNode {
    let [x, y, z] = panel.position;
    let mut node = SceneNode::new("text_panel", x, z, panel.rotation_y);
    node.primitives.push(Primitive {
        shape: Shape::TextPanel {
            width: panel.width,
            height: panel.height,
            text: panel.text.clone(),
        },
        material: Material::Text,
        position: Vec3::new(0.0, y, 0.0),
        rotation_y: 0.0,
    });
    node
}

/// Build the whole walkthrough scene from a floor plan
pub fn build_scene(config: &WalkthroughConfig, plan: &FloorPlan) -> SceneNode {
    let layout = &config.layout;
    let mut scene = SceneNode::new("scene", 0.0, 0.0, 0.0);

    let mut room_a = build_room(layout, plan.room_a.x, plan.room_a.z, plan.room_a.rotation_y);
    room_a.name = "room_a".to_string();
    let mut room_b = build_room(layout, plan.room_b.x, plan.room_b.z, plan.room_b.rotation_y);
    room_b.name = "room_b".to_string();

    scene.children.push(room_a);
    scene.children.push(room_b);
    scene.children.push(build_corridor(layout, plan.corridor.x, plan.corridor.z, plan.corridor.rotation_y));
    scene.children.push(build_living_room(
        layout,
        plan.living_room.x,
        plan.living_room.z,
        plan.living_room.rotation_y,
    ));
    scene.children.extend(config.panels.iter().map(build_text_panel));

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_room_wall_placements() {
        let room = build_room(&LayoutConfig::default(), 0.0, 0.0, 0.0);
        let walls: Vec<_> = room.primitives_with(Material::Wall).collect();
        assert_eq!(walls.len(), 4);

        let expected = [
            (Vec3::new(0.0, 0.0, -5.0), 0.0),
            (Vec3::new(0.0, 0.0, 5.0), PI),
            (Vec3::new(-5.0, 0.0, 0.0), FRAC_PI_2),
            (Vec3::new(5.0, 0.0, 0.0), -FRAC_PI_2),
        ];
        for (wall, (position, rotation)) in walls.iter().zip(expected) {
            assert_eq!(wall.position, position);
            assert_eq!(wall.rotation_y, rotation);
        }
    }

    #[test]
    fn test_room_has_outlines_and_notes() {
        let room = build_room(&LayoutConfig::default(), 3.0, -2.0, 0.0);
        assert_eq!(room.position, Vec3::new(3.0, 0.0, -2.0));
        assert_eq!(room.primitives_with(Material::Edge).count(), 4);

        let notes: Vec<_> = room.primitives_with(Material::Note).collect();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[0].position, Vec3::new(-4.0, 0.0, -4.0));
        assert_eq!(notes[0].rotation_y, FRAC_PI_2);
        assert_eq!(notes[3].position, Vec3::new(4.0, 0.0, 4.0));
        assert_eq!(notes[3].rotation_y, -FRAC_PI_2);
    }

    #[test]
    fn test_floor_sits_below_walls() {
        let room = build_room(&LayoutConfig::default(), 0.0, 0.0, 0.0);
        let floor = room.primitives_with(Material::Floor).next().unwrap();
        assert_eq!(floor.position.y, -2.0);
        assert_eq!(floor.shape, Shape::Box { size: Vec3::new(10.0, 0.1, 10.0) });
    }

    #[test]
    fn test_corridor_is_bare() {
        let corridor = build_corridor(&LayoutConfig::default(), 0.0, 0.0, 0.0);
        assert_eq!(corridor.primitives_with(Material::Note).count(), 0);
        assert_eq!(corridor.primitives_with(Material::Edge).count(), 0);

        let walls: Vec<_> = corridor.primitives_with(Material::Wall).collect();
        assert_eq!(walls[0].position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(walls[2].position, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(walls[0].shape, Shape::Box { size: Vec3::new(4.0, 4.0, 0.2) });
    }

    #[test]
    fn test_living_room_is_double_size() {
        let living = build_living_room(&LayoutConfig::default(), 0.0, -12.0, FRAC_PI_2);
        assert_eq!(living.rotation_y, FRAC_PI_2);
        let walls: Vec<_> = living.primitives_with(Material::Wall).collect();
        assert_eq!(walls[1].position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(walls[3].position, Vec3::new(10.0, 0.0, 0.0));

        let notes: Vec<_> = living.primitives_with(Material::Note).collect();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[1].position, Vec3::new(9.0, 0.0, -9.0));
    }

    #[test]
    fn test_wall_layout_uses_footprint() {
        let walls = wall_layout(6.0, 2.0);
        assert_relative_eq!(walls[0].position.z, -1.0);
        assert_relative_eq!(walls[0].length, 6.0);
        assert_relative_eq!(walls[3].position.x, 3.0);
        assert_relative_eq!(walls[3].length, 2.0);
    }

    #[test]
    fn test_scene_matches_floor_plan() {
        let config = WalkthroughConfig::default();
        let plan = FloorPlan::new(&config.layout, config.player.wall_margin);
        let scene = build_scene(&config, &plan);

        assert_eq!(scene.children.len(), 5);
        let room_b = scene.child("room_b").unwrap();
        assert_eq!(room_b.position, Vec3::new(12.0, 0.0, 0.0));
        assert_eq!(room_b.rotation_y, PI);
        let living = scene.child("living_room").unwrap();
        assert_eq!(living.position, Vec3::new(0.0, 0.0, -12.0));

        let panel = scene.child("text_panel").unwrap();
        assert_eq!(panel.position, Vec3::new(0.0, 0.0, -4.9));
        assert!(matches!(panel.primitives[0].shape, Shape::TextPanel { .. }));
    }

    #[test]
    fn test_scene_primitive_count() {
        let config = WalkthroughConfig::default();
        let plan = FloorPlan::new(&config.layout, config.player.wall_margin);
        let scene = build_scene(&config, &plan);
        // rooms: 1 floor + 4 walls + 4 edges + 4 notes, corridor: 5, living room: 9, panel: 1
        assert_eq!(scene.primitive_count(), 13 + 13 + 5 + 9 + 1);
    }
}
