use cat_sketch::eye::{ConstraintRing, ControlHandle, Corner, EyeModel, EyeShape, HandleLinkage, ScaleParams};
use egui::{Pos2, pos2};

fn model_at(iris: Pos2, scale: ScaleParams) -> EyeModel {
    let mut shape = EyeShape::default();
    shape.iris.x = iris.x;
    shape.iris.y = iris.y;
    EyeModel::new(shape, scale, HandleLinkage::default())
}

#[test]
fn test_corner_drag_projects_onto_anchor_circle() {
    let scale = ScaleParams {
        eyeball_radius: 130.0,
        anchor_ratio: 0.9,
        ..ScaleParams::default()
    };
    let center = pos2(0.0, 250.0);
    let mut model = model_at(center, scale);

    model.drag_corner(Corner::Inner, pos2(1000.0, 1000.0));

    let corner = model.shape().inner_corner;
    assert!((corner.distance(center) - 117.0).abs() < 1e-3);
    let expected = (pos2(1000.0, 1000.0) - center).normalized();
    let actual = (corner - center).normalized();
    assert!((expected - actual).length() < 1e-4);
}

#[test]
fn test_corners_stay_on_circle_for_every_anchor_ratio() {
    for radius in [50.0, 130.0, 250.0] {
        for step in 0..=9 {
            let anchor_ratio = 0.1 + step as f32 * 0.1;
            let mut model = EyeModel::default();
            model.set_scale(ScaleParams {
                eyeball_radius: radius,
                anchor_ratio,
                ..*model.scale()
            });
            let c = model.shape().center();
            let expected = model.scale().eyeball_radius * model.scale().anchor_ratio;
            for corner in Corner::ALL {
                let d = model.shape().corner(corner).distance(c);
                assert!((d - expected).abs() < 1e-3, "r={radius} a={anchor_ratio} d={d}");
            }
        }
    }
}

#[test]
fn test_resize_moves_lids_rigidly_with_corners() {
    let mut model = EyeModel::default();
    let before = model.shape().clone();
    model.set_scale(ScaleParams {
        anchor_ratio: 0.5,
        ..*model.scale()
    });
    let after = model.shape();
    for corner in Corner::ALL {
        for handle in corner.handles() {
            let old_offset = before.handle(handle) - before.corner(corner);
            let new_offset = after.handle(handle) - after.corner(corner);
            assert!((old_offset - new_offset).length() < 1e-3);
        }
    }
}

#[test]
fn test_linked_handle_mirrors_with_preserved_radius() {
    let mut model = EyeModel::default();
    model.toggle_linkage(Corner::Inner);
    let corner = model.shape().inner_corner;
    let preserved = model.shape().lower_lid.cp1.distance(corner);

    let target = corner + egui::vec2(-40.0, -70.0);
    model.drag_control_handle(ControlHandle::UpperInner, target);

    let shape = model.shape();
    assert_eq!(shape.upper_lid.cp1, target);
    assert!((shape.lower_lid.cp1.distance(corner) - preserved).abs() < 1e-3);
    let up = (shape.upper_lid.cp1 - corner).normalized();
    let down = (shape.lower_lid.cp1 - corner).normalized();
    assert!((up + down).length() < 1e-4);
}

#[test]
fn test_linked_drag_onto_corner_leaves_opposite() {
    let mut model = EyeModel::default();
    model.toggle_linkage(Corner::Outer);
    let opposite = model.shape().lower_lid.cp2;
    let corner = model.shape().outer_corner;
    model.drag_control_handle(ControlHandle::UpperOuter, corner);
    assert_eq!(model.shape().lower_lid.cp2, opposite);
    assert!(model.shape().lower_lid.cp2.x.is_finite());
}

#[test]
fn test_anchor_ring_drag_clamps_and_reprojects() {
    let mut model = EyeModel::default();
    model.drag_constraint_ring(ConstraintRing::Anchor, 0.0);
    assert_eq!(model.scale().anchor_ratio, 0.1);
    let c = model.shape().center();
    let d = model.shape().inner_corner.distance(c);
    assert!((d - model.scale().eyeball_radius * 0.1).abs() < 1e-3);
}

#[test]
fn test_iris_color_setter_leaves_geometry() {
    let mut model = EyeModel::default();
    let before = model.shape().clone();
    model.set_iris_color(egui::Color32::GREEN);
    assert_eq!(model.shape().iris.color, egui::Color32::GREEN);
    assert_eq!(model.shape().inner_corner, before.inner_corner);
    assert_eq!(model.shape().upper_lid, before.upper_lid);
}
