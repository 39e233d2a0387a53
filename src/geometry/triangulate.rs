//! Ear-clipping triangulation for simple polygons of either winding.
//!
//! The lid outline stops being convex as soon as a control handle is pulled
//! inward, so filling and clipping go through triangles instead.

use egui::{Color32, Mesh, Pos2};

use super::clip::{clip_convex, signed_area2};

/// Consecutive points closer than this are merged before triangulating.
const MERGE_DISTANCE: f32 = 1e-4;

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn in_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2, orientation: f32) -> bool {
    cross(a, b, p) * orientation >= 0.0
        && cross(b, c, p) * orientation >= 0.0
        && cross(c, a, p) * orientation >= 0.0
}

fn dedup(polygon: &[Pos2]) -> Vec<Pos2> {
    let mut points: Vec<Pos2> = Vec::with_capacity(polygon.len());
    for &p in polygon {
        if points.last().map_or(true, |last| last.distance(p) > MERGE_DISTANCE) {
            points.push(p);
        }
    }
    while points.len() > 1
        && points
            .first()
            .zip(points.last())
            .is_some_and(|(first, last)| first.distance(*last) <= MERGE_DISTANCE)
    {
        points.pop();
    }
    points
}

/// Splits `polygon` into triangles. Returns an empty list when the polygon
/// has no area.
pub fn triangulate(polygon: &[Pos2]) -> Vec<[Pos2; 3]> {
    let points = dedup(polygon);
    let area = signed_area2(&points);
    if points.len() < 3 || area.abs() < f32::EPSILON {
        return Vec::new();
    }
    let orientation = area.signum();

    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let (a, b, c) = (
                points[remaining[(i + n - 1) % n]],
                points[remaining[i]],
                points[remaining[(i + 1) % n]],
            );
            if cross(a, b, c) * orientation <= 0.0 {
                return false;
            }
            remaining
                .iter()
                .map(|&k| points[k])
                .filter(|&p| p != a && p != b && p != c)
                .all(|p| !in_triangle(p, a, b, c, orientation))
        });

        // A self-touching outline can leave no strict ear; cutting the
        // flattest corner still terminates and loses at most a sliver.
        let i = match ear {
            Some(i) => i,
            None => (0..n)
                .min_by(|&x, &y| {
                    let turn = |i: usize| {
                        cross(
                            points[remaining[(i + n - 1) % n]],
                            points[remaining[i]],
                            points[remaining[(i + 1) % n]],
                        )
                        .abs()
                    };
                    turn(x).total_cmp(&turn(y))
                })
                .unwrap_or(0),
        };

        let (a, b, c) = (
            points[remaining[(i + n - 1) % n]],
            points[remaining[i]],
            points[remaining[(i + 1) % n]],
        );
        if cross(a, b, c).abs() > f32::EPSILON {
            triangles.push([a, b, c]);
        }
        remaining.remove(i);
    }

    let [a, b, c] = [remaining[0], remaining[1], remaining[2]].map(|k| points[k]);
    if cross(a, b, c).abs() > f32::EPSILON {
        triangles.push([a, b, c]);
    }
    triangles
}

/// Clips the convex `subject` against a triangulated region. The pieces
/// together cover exactly the part of `subject` inside the region.
pub fn clip_to_triangles(subject: &[Pos2], triangles: &[[Pos2; 3]]) -> Vec<Vec<Pos2>> {
    triangles
        .iter()
        .map(|triangle| clip_convex(subject, triangle))
        .filter(|piece| piece.len() >= 3)
        .collect()
}

/// Fills convex `pieces` (triangles included) into one mesh.
pub fn fill_mesh<'a>(pieces: impl IntoIterator<Item = &'a [Pos2]>, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for piece in pieces {
        let base = mesh.vertices.len() as u32;
        for &p in piece {
            mesh.colored_vertex(p, color);
        }
        for k in 1..piece.len().saturating_sub(1) as u32 {
            mesh.add_triangle(base, base + k, base + k + 1);
        }
    }
    mesh
}
