//! Classic 2D Perlin gradient noise over Ken Perlin's permutation table.
//!
//! Deterministic for a given input, so stroke angles sampled from it stay
//! put from frame to frame.

const P: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

#[derive(Clone, PartialEq)]
pub struct PerlinNoise {
    perm: [u8; 512],
}

impl std::fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinNoise").finish_non_exhaustive()
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        let mut perm = [0u8; 512];
        for i in 0..256 {
            perm[i] = P[i];
            perm[i + 256] = P[i];
        }
        Self { perm }
    }
}

impl PerlinNoise {
    /// Raw noise, roughly in `[-1, 1]`.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        let perm = &self.perm;
        let aa = perm[perm[xi] as usize + yi];
        let ab = perm[perm[xi] as usize + yi + 1];
        let ba = perm[perm[xi + 1] as usize + yi];
        let bb = perm[perm[xi + 1] as usize + yi + 1];

        let x1 = lerp(grad2d(aa, xf, yf), grad2d(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad2d(ab, xf, yf - 1.0), grad2d(bb, xf - 1.0, yf - 1.0), u);
        lerp(x1, x2, v)
    }

    /// Noise remapped to `[0, 1]`.
    pub fn unit(&self, x: f32, y: f32) -> f32 {
        ((self.sample(x, y) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad2d(hash: u8, x: f32, y: f32) -> f32 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic() {
        let a = PerlinNoise::default();
        let b = PerlinNoise::default();
        for i in 0..50 {
            let x = i as f32 * 0.37;
            let y = i as f32 * 0.11 + 3.0;
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn test_noise_varies_and_stays_in_range() {
        let noise = PerlinNoise::default();
        let values: Vec<f32> = (0..200).map(|i| noise.unit(i as f32 * 0.173, i as f32 * 0.091)).collect();
        let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(max > min);
        assert!(min >= 0.0 && max <= 1.0);
    }

    #[test]
    fn test_noise_is_zero_on_lattice() {
        let noise = PerlinNoise::default();
        assert_eq!(noise.sample(3.0, 7.0), 0.0);
    }

    #[test]
    fn test_negative_coordinates_do_not_panic() {
        let noise = PerlinNoise::default();
        let v = noise.sample(-12.7, -0.2);
        assert!(v.is_finite());
    }
}
