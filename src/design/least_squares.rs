//! Weighted least-squares lowpass design.
//!
//! Minimises `∫pass |H - 1|² + W ∫stop |H|²` over the cosine-series
//! amplitude of a linear-phase filter. The normal equations form a
//! Toeplitz-plus-Hankel system solved directly.

use crate::error::{FirError, Result};

/// Normalised sinc, `sin(pi x) / (pi x)`
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = std::f64::consts::PI * x;
        px.sin() / px
    }
}

/// Least-squares lowpass with `num_taps` coefficients
///
/// `cutoff` and `transition_width` are normalised to the sample rate; the
/// passband ends at `cutoff - tw/2` and the stopband starts at `cutoff + tw/2`.
/// `stopband_weight` scales the stopband error relative to the passband.
///
/// # Errors
/// Returns `FirError::FilterDesign` if the normal equations are singular.
pub fn lowpass(
    num_taps: usize,
    cutoff: f64,
    transition_width: f64,
    stopband_weight: f64,
) -> Result<Vec<f64>> {
    // Band edges as fractions of pi
    let fp = 2.0 * (cutoff - transition_width / 2.0);
    let fs = 2.0 * (cutoff + transition_width / 2.0);

    let q = |k: usize| {
        let k = k as f64;
        let stop = if k == 0.0 { 1.0 - fs } else { -fs * sinc(fs * k) };
        fp * sinc(fp * k) + stopband_weight * stop
    };

    let mut taps = vec![0.0; num_taps];

    if num_taps % 2 == 1 {
        // Type I: H(w) = a0 + sum a_k cos(k w)
        let m = num_taps / 2;
        let size = m + 1;
        let mut matrix = vec![0.0; size * size];
        for i in 0..size {
            for j in 0..size {
                matrix[i * size + j] = 0.5 * (q(i.abs_diff(j)) + q(i + j));
            }
        }
        let rhs: Vec<f64> = (0..size).map(|i| fp * sinc(fp * i as f64)).collect();
        let a = solve(matrix, rhs)?;

        taps[m] = a[0];
        for k in 1..size {
            taps[m - k] = a[k] / 2.0;
            taps[m + k] = a[k] / 2.0;
        }
    } else {
        // Type II: H(w) = sum b_k cos((k + 1/2) w)
        let size = num_taps / 2;
        let mut matrix = vec![0.0; size * size];
        for i in 0..size {
            for j in 0..size {
                matrix[i * size + j] = 0.5 * (q(i.abs_diff(j)) + q(i + j + 1));
            }
        }
        let rhs: Vec<f64> = (0..size)
            .map(|i| fp * sinc(fp * (i as f64 + 0.5)))
            .collect();
        let b = solve(matrix, rhs)?;

        for k in 0..size {
            taps[size - 1 - k] = b[k] / 2.0;
            taps[size + k] = b[k] / 2.0;
        }
    }

    Ok(taps)
}

/// Solve the dense row-major system `matrix * x = rhs`
///
/// Gaussian elimination with partial pivoting.
fn solve(mut matrix: Vec<f64>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| {
                matrix[a * n + col]
                    .abs()
                    .total_cmp(&matrix[b * n + col].abs())
            })
            .unwrap_or(col);

        let pivot = matrix[pivot_row * n + col];
        if !pivot.is_finite() || pivot.abs() < 1e-300 {
            return Err(FirError::FilterDesign(format!(
                "least-squares system is singular at column {}",
                col
            )));
        }

        if pivot_row != col {
            for k in 0..n {
                matrix.swap(col * n + k, pivot_row * n + k);
            }
            rhs.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = matrix[row * n + col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row * n + k] -= factor * matrix[col * n + k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| matrix[row * n + k] * x[k]).sum();
        x[row] = (rhs[row] - tail) / matrix[row * n + row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::diagnostics::{is_symmetric, magnitude_db};

    #[test]
    fn test_solve_small_system() {
        // 2x + y = 5, x + 3y = 10  ->  x = 1, y = 3
        let x = solve(vec![2.0, 1.0, 1.0, 3.0], vec![5.0, 10.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        let x = solve(vec![0.0, 1.0, 1.0, 0.0], vec![2.0, 3.0]).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_singular() {
        let result = solve(vec![1.0, 2.0, 2.0, 4.0], vec![1.0, 2.0]);
        assert!(matches!(result, Err(FirError::FilterDesign(_))));
    }

    #[test]
    fn test_type_one_lowpass() {
        let taps = lowpass(61, 0.1, 0.05, 1.0).unwrap();
        assert_eq!(taps.len(), 61);
        assert!(is_symmetric(&taps));
        assert!(magnitude_db(&taps, 0.0, 1.0).abs() < 0.1);
        assert!(magnitude_db(&taps, 0.05, 1.0).abs() < 0.5);
        assert!(magnitude_db(&taps, 0.2, 1.0) < -35.0);
    }

    #[test]
    fn test_type_two_lowpass() {
        let taps = lowpass(60, 0.1, 0.05, 1.0).unwrap();
        assert_eq!(taps.len(), 60);
        for i in 0..30 {
            assert_eq!(taps[i], taps[59 - i]);
        }
        assert!(magnitude_db(&taps, 0.0, 1.0).abs() < 0.1);
        assert!(magnitude_db(&taps, 0.2, 1.0) < -35.0);
    }

    #[test]
    fn test_stopband_weight_trades_passband() {
        let stop_energy = |taps: &[f64]| -> f64 {
            (0..200)
                .map(|i| 0.18 + 0.32 * i as f64 / 199.0)
                .map(|f| 10f64.powf(magnitude_db(taps, f, 1.0) / 10.0))
                .sum()
        };
        let light = lowpass(41, 0.15, 0.06, 1.0).unwrap();
        let heavy = lowpass(41, 0.15, 0.06, 100.0).unwrap();
        assert!(stop_energy(&heavy) < stop_energy(&light));
    }
}
