// SPDX-License-Identifier: MIT
//
// Oklab transform matrices.
//
// The Oklab ↔ linear sRGB conversion goes through an intermediate LMS
// (Long, Medium, Short cone response) space. The coefficients are from
// Björn Ottosson's published reference:
// https://bottosson.github.io/posts/oklab/
//
// Each forward matrix sits next to its inverse so the pairing is visible,
// and the tests below check that forward · inverse ≈ identity.

/// A row-major 3×3 matrix.
pub type Matrix3 = [[f64; 3]; 3];

/// Linear sRGB → LMS cone response.
pub const RGB_TO_LMS: Matrix3 = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];

/// LMS cone response → linear sRGB. Inverse of [`RGB_TO_LMS`].
pub const LMS_TO_RGB: Matrix3 = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

/// Cube-rooted LMS → Oklab (L, a, b).
pub const LMS_TO_OKLAB: Matrix3 = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];

/// Oklab (L, a, b) → cube-rooted LMS. Inverse of [`LMS_TO_OKLAB`].
pub const OKLAB_TO_LMS: Matrix3 = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548_0],
];

/// Apply `m` to the column vector `v`.
#[inline]
#[must_use]
pub fn transform(m: &Matrix3, v: [f64; 3]) -> [f64; 3] {
    let row = |r: &[f64; 3]| r[2].mul_add(v[2], r[0].mul_add(v[0], r[1] * v[1]));
    [row(&m[0]), row(&m[1]), row(&m[2])]
}

/// Matrix product `a · b`.
#[must_use]
pub fn multiply(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    fn max_deviation(m: &Matrix3, expected: &Matrix3) -> f64 {
        m.iter()
            .flatten()
            .zip(expected.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn rgb_lms_pair_is_inverse() {
        let forward = multiply(&RGB_TO_LMS, &LMS_TO_RGB);
        let backward = multiply(&LMS_TO_RGB, &RGB_TO_LMS);
        assert!(max_deviation(&forward, &IDENTITY) < 1e-6, "{forward:?}");
        assert!(max_deviation(&backward, &IDENTITY) < 1e-6, "{backward:?}");
    }

    #[test]
    fn lms_oklab_pair_is_inverse() {
        let forward = multiply(&LMS_TO_OKLAB, &OKLAB_TO_LMS);
        let backward = multiply(&OKLAB_TO_LMS, &LMS_TO_OKLAB);
        assert!(max_deviation(&forward, &IDENTITY) < 1e-6, "{forward:?}");
        assert!(max_deviation(&backward, &IDENTITY) < 1e-6, "{backward:?}");
    }

    #[test]
    fn white_maps_to_unit_lms() {
        // Rows of RGB_TO_LMS sum to one, so white stays white in LMS.
        let lms = transform(&RGB_TO_LMS, [1.0, 1.0, 1.0]);
        for channel in lms {
            assert!((channel - 1.0).abs() < 1e-9, "{lms:?}");
        }
    }

    #[test]
    fn transform_by_identity_is_noop() {
        let v = [0.25, -0.5, 0.75];
        assert_eq!(transform(&IDENTITY, v), v);
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        assert_eq!(multiply(&RGB_TO_LMS, &IDENTITY), RGB_TO_LMS);
    }
}
