use nalgebra::{Matrix3, Vector3};

/// Pivots at or below this fraction of the largest matrix entry are treated
/// as zero.
const SINGULAR_REL_EPS: f64 = 1e-10;

/// Solve `a * x = b` for a 3×3 system with Gauss-Jordan elimination.
///
/// Uses partial (row) pivoting. Returns `None` when a pivot vanishes relative
/// to the scale of `a`, i.e. the system is singular or numerically so, instead
/// of dividing by (near) zero.
pub fn solve_3x3_gauss_jordan(a: &Matrix3<f64>, b: &Vector3<f64>) -> Option<Vector3<f64>> {
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return None;
    }
    let scale = a.amax();
    if scale == 0.0 {
        return None;
    }
    let tol = SINGULAR_REL_EPS * scale;

    // Augmented rows [a | b].
    let mut m = [[0.0f64; 4]; 3];
    for (r, row) in m.iter_mut().enumerate() {
        for c in 0..3 {
            row[c] = a[(r, c)];
        }
        row[3] = b[r];
    }

    for col in 0..3 {
        let pivot_row = (col..3)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))
            .unwrap_or(col);
        m.swap(col, pivot_row);

        let pivot = m[col][col];
        if pivot.abs() <= tol {
            return None;
        }
        for v in m[col].iter_mut() {
            *v /= pivot;
        }

        let pivot_vals = m[col];
        for (r, row) in m.iter_mut().enumerate() {
            if r == col {
                continue;
            }
            let factor = row[col];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in row.iter_mut().zip(pivot_vals.iter()) {
                *v -= factor * p;
            }
        }
    }

    Some(Vector3::new(m[0][3], m[1][3], m[2][3]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solves_well_conditioned_system() {
        let a = Matrix3::new(
            2.0, 1.0, -1.0, //
            -3.0, -1.0, 2.0, //
            -2.0, 1.0, 2.0,
        );
        let b = Vector3::new(8.0, -11.0, -3.0);
        let x = solve_3x3_gauss_jordan(&a, &b).expect("solvable");
        assert_relative_eq!(x, Vector3::new(2.0, 3.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn needs_row_swap_for_zero_leading_entry() {
        let a = Matrix3::new(
            0.0, 1.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 4.0,
        );
        let b = Vector3::new(5.0, 7.0, 8.0);
        let x = solve_3x3_gauss_jordan(&a, &b).expect("solvable");
        assert_relative_eq!(x, Vector3::new(7.0, 5.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn singular_system_is_rejected() {
        // Third row is the sum of the first two.
        let a = Matrix3::new(
            1.0, 2.0, 3.0, //
            4.0, 5.0, 6.0, //
            5.0, 7.0, 9.0,
        );
        let b = Vector3::new(1.0, 2.0, 3.0);
        assert!(solve_3x3_gauss_jordan(&a, &b).is_none());
    }

    #[test]
    fn zero_and_non_finite_inputs_are_rejected() {
        let b = Vector3::new(1.0, 1.0, 1.0);
        assert!(solve_3x3_gauss_jordan(&Matrix3::zeros(), &b).is_none());
        let mut a = Matrix3::identity();
        a[(1, 1)] = f64::NAN;
        assert!(solve_3x3_gauss_jordan(&a, &b).is_none());
    }
}
