//! Facial landmark input
//!
//! The capture collaborator delivers zero or one face per frame as an ordered
//! list of normalized 3D points (x, y in [0,1] relative to the frame, z as
//! relative depth). Indices follow the 468/478 point face-mesh topology.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Landmarks produced by the face-mesh model
pub const FACE_MESH_POINTS: usize = 478;

/// Point between the eyes, stable under mouth movement
pub const AIM_REFERENCE: usize = 168;

/// Inner lip pairs (upper, lower): center first, then left/right
pub const MOUTH_CENTER: (usize, usize) = (13, 14);
pub const MOUTH_LEFT: (usize, usize) = (82, 87);
pub const MOUTH_RIGHT: (usize, usize) = (312, 317);

/// One detected face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: Vec<Vec3>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Neutral face with the aim reference at `reference` and every lip pair
    /// `mouth_gap` apart (synthetic input for demos and tests)
    pub fn synthetic(reference: Vec2, mouth_gap: f32) -> Self {
        let mut points = vec![Vec3::new(0.5, 0.6, 0.0); FACE_MESH_POINTS];
        points[AIM_REFERENCE] = reference.extend(0.0);
        for (upper, lower) in [MOUTH_CENTER, MOUTH_LEFT, MOUTH_RIGHT] {
            points[lower] = points[upper] + Vec3::new(0.0, mouth_gap, 0.0);
        }
        Self { points }
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` buffer; a trailing partial point is ignored
    pub fn from_flat(coords: &[f32]) -> Self {
        let points = coords
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    /// 2D aim reference (x, y of the between-eyes point)
    pub fn aim_reference(&self) -> Option<Vec2> {
        self.point(AIM_REFERENCE).map(|p| p.truncate())
    }

    /// Mean upper/lower lip distance over the pairs present.
    ///
    /// The center pair is required; side pairs are averaged in when the face
    /// carries them.
    pub fn mouth_opening(&self) -> Option<f32> {
        let center = self.pair_distance(MOUTH_CENTER)?;
        let (sum, count) = [MOUTH_LEFT, MOUTH_RIGHT]
            .into_iter()
            .filter_map(|pair| self.pair_distance(pair))
            .fold((center, 1u32), |(sum, n), d| (sum + d, n + 1));
        Some(sum / count as f32)
    }

    fn pair_distance(&self, (upper, lower): (usize, usize)) -> Option<f32> {
        Some(self.point(upper)?.distance(self.point(lower)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Neutral face with all points at the frame center
    fn face(len: usize) -> FaceLandmarks {
        FaceLandmarks::new(vec![Vec3::new(0.5, 0.5, 0.0); len])
    }

    #[test]
    fn test_from_flat() {
        let face = FaceLandmarks::from_flat(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        assert_eq!(face.len(), 2);
        assert_eq!(face.point(1), Some(Vec3::new(0.4, 0.5, 0.6)));
    }

    #[test]
    fn test_aim_reference_requires_index() {
        assert_eq!(face(100).aim_reference(), None);
        assert_eq!(face(478).aim_reference(), Some(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_mouth_opening_center_only() {
        let mut f = face(20);
        f.points_mut()[MOUTH_CENTER.1] = Vec3::new(0.5, 0.53, 0.04);
        // distance = sqrt(0.03² + 0.04²) = 0.05
        let d = f.mouth_opening().unwrap();
        assert!((d - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_mouth_opening_averages_pairs() {
        let mut f = face(478);
        f.points_mut()[MOUTH_CENTER.1].y += 0.06;
        f.points_mut()[MOUTH_LEFT.1].y += 0.03;
        f.points_mut()[MOUTH_RIGHT.1].y += 0.03;
        let d = f.mouth_opening().unwrap();
        assert!((d - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_synthetic_face() {
        let f = FaceLandmarks::synthetic(Vec2::new(0.3, 0.4), 0.02);
        assert_eq!(f.len(), FACE_MESH_POINTS);
        assert_eq!(f.aim_reference(), Some(Vec2::new(0.3, 0.4)));
        assert!((f.mouth_opening().unwrap() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_mouth_opening_missing_center() {
        assert_eq!(face(10).mouth_opening(), None);
    }
}
