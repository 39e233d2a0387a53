use egui::{Pos2, Vec2};

use crate::eye::EyeShape;
use crate::face::{EyeSide, FaceLayout};
use crate::util::color::to_hex;

fn pt(p: Pos2) -> String {
    format!("{:.2},{:.2}", p.x, p.y)
}

/// Closed lid outline as an SVG path in the eye's local frame.
pub fn lid_path(shape: &EyeShape) -> String {
    let [start, u1, u2, outer] = shape.upper_curve();
    let [_, l2, l1, inner] = shape.lower_curve();
    format!(
        "M {} C {} {} {} C {} {} {} Z",
        pt(start),
        pt(u1),
        pt(u2),
        pt(outer),
        pt(l2),
        pt(l1),
        pt(inner)
    )
}

/// Vector rendering of both eyes: lids, iris and pupil. The right eye is the
/// same group mirrored with a transform.
pub fn eyes_svg(shape: &EyeShape, eyeball_color: egui::Color32, layout: &FaceLayout, canvas: Vec2) -> String {
    let path = lid_path(shape);
    let (iris, pupil) = (shape.iris, shape.pupil);

    let mut lines = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
            w = canvas.x,
            h = canvas.y
        ),
        format!(r#"  <defs><clipPath id="lid"><path d="{path}"/></clipPath></defs>"#),
    ];
    for side in EyeSide::BOTH {
        let origin = layout.eye_origin(side);
        lines.extend([
            format!(
                r#"  <g transform="translate({:.2} {:.2}) scale({} 1)">"#,
                origin.x,
                origin.y,
                side.mirror()
            ),
            format!(r#"    <path d="{path}" fill="{}"/>"#, to_hex(eyeball_color)),
            r#"    <g clip-path="url(#lid)">"#.to_string(),
            format!(
                r#"      <ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}"/>"#,
                iris.x,
                iris.y,
                iris.w / 2.0,
                iris.h / 2.0,
                to_hex(iris.color)
            ),
            format!(
                r##"      <ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="#000000"/>"##,
                pupil.x,
                pupil.y,
                pupil.w / 2.0,
                pupil.h / 2.0
            ),
            "    </g>".to_string(),
            format!(r##"    <path d="{path}" fill="none" stroke="#000000" stroke-width="3"/>"##),
            "  </g>".to_string(),
        ]);
    }
    lines.push("</svg>".to_string());

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eye::EyeModel;
    use crate::face::NoseSettings;
    use egui::{Color32, vec2};

    #[test]
    fn test_svg_has_both_eyes() {
        let model = EyeModel::default();
        let layout = FaceLayout::new(vec2(800.0, 600.0), 300.0, NoseSettings::default());
        let svg = eyes_svg(model.shape(), Color32::WHITE, &layout, vec2(800.0, 600.0));
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<ellipse").count(), 4);
        assert!(svg.contains("scale(-1 1)"));
        assert!(svg.contains("scale(1 1)"));
    }

    #[test]
    fn test_lid_path_is_closed() {
        let path = lid_path(EyeModel::default().shape());
        assert!(path.starts_with("M "));
        assert_eq!(path.matches(" C ").count(), 2);
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn test_svg_groups_are_balanced() {
        let model = EyeModel::default();
        let layout = FaceLayout::new(vec2(640.0, 480.0), 280.0, NoseSettings::default());
        let svg = eyes_svg(model.shape(), Color32::WHITE, &layout, vec2(640.0, 480.0));
        let lines: Vec<&str> = svg.lines().collect();
        assert_eq!(lines.len(), 2 + 2 * 8 + 1);
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(lines[0].contains(r#"viewBox="0 0 640 480""#));
        assert!(svg.ends_with("</svg>\n"));
    }
}
