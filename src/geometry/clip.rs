use egui::Pos2;

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Twice the signed area of a polygon; positive for counter-clockwise
/// winding in a y-up frame.
pub fn signed_area2(polygon: &[Pos2]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

fn intersect(a: Pos2, b: Pos2, edge_start: Pos2, edge_end: Pos2) -> Pos2 {
    let d1 = cross(edge_start, edge_end, a);
    let d2 = cross(edge_start, edge_end, b);
    let denom = d1 - d2;
    if denom.abs() < f32::EPSILON {
        return a;
    }
    let t = d1 / denom;
    a + (b - a) * t
}

/// Clips `subject` against the convex polygon `clip` (Sutherland-Hodgman).
///
/// Either winding is accepted for `clip`. A degenerate clip polygon (a fully
/// closed eye) yields an empty result.
pub fn clip_convex(subject: &[Pos2], clip: &[Pos2]) -> Vec<Pos2> {
    let area = signed_area2(clip);
    if area.abs() < 1e-3 {
        return Vec::new();
    }
    let orientation = area.signum();

    let mut output: Vec<Pos2> = subject.to_vec();
    for i in 0..clip.len() {
        if output.is_empty() {
            break;
        }
        let edge_start = clip[i];
        let edge_end = clip[(i + 1) % clip.len()];
        let inside = |p: Pos2| cross(edge_start, edge_end, p) * orientation >= 0.0;

        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &current in &input {
            match (inside(current), inside(prev)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(intersect(prev, current, edge_start, edge_end));
                    output.push(current);
                }
                (false, true) => output.push(intersect(prev, current, edge_start, edge_end)),
                (false, false) => {}
            }
            prev = current;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn square(min: f32, max: f32) -> Vec<Pos2> {
        vec![pos2(min, min), pos2(max, min), pos2(max, max), pos2(min, max)]
    }

    #[test]
    fn test_clip_overlapping_squares() {
        let clipped = clip_convex(&square(0.0, 10.0), &square(5.0, 15.0));
        assert!((signed_area2(&clipped).abs() / 2.0 - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_clip_winding_independent() {
        let mut reversed = square(5.0, 15.0);
        reversed.reverse();
        let clipped = clip_convex(&square(0.0, 10.0), &reversed);
        assert!((signed_area2(&clipped).abs() / 2.0 - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_clip_against_flat_polygon_is_empty() {
        let line = vec![pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(5.0, 0.0)];
        assert!(clip_convex(&square(0.0, 10.0), &line).is_empty());
    }
}
