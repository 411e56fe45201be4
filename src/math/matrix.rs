use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // (0, 1] so the log never sees zero.
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / rows)).
    ///
    /// Shape: (rows, cols) with `rows` the fan-in, matching the
    /// input-by-output layout of `Layer::weights`. Keeps the pre-activations
    /// of a freshly initialised layer near unit scale even for the very wide
    /// image inputs.
    pub fn xavier<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let std_dev = (1.0 / rows.max(1) as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, Vec::len),
            data
        }
    }

    /// True when `data` really is `rows × cols`.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    /// Row vector times matrix: `out[j] = Σ_i v[i] · self[i][j]`.
    ///
    /// `v` must have `rows` entries; callers check this once at load time
    /// rather than on every product.
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut out = vec![0.0; self.cols];
        for (x, row) in v.iter().zip(&self.data) {
            if *x == 0.0 {
                continue;
            }
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        out
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn left_mul_is_a_row_vector_product() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(m.left_mul(&[1.0, 0.0, -1.0]), vec![-4.0, -4.0]);
    }

    #[test]
    fn from_data_tolerates_empty() {
        let m = Matrix::from_data(vec![]);
        assert_eq!((m.rows, m.cols), (0, 0));
        assert!(m.is_well_formed());
    }

    #[test]
    fn ragged_data_is_not_well_formed() {
        let mut m = Matrix::zeros(2, 3);
        m.data[1].pop();
        assert!(!m.is_well_formed());
    }

    #[test]
    fn seeded_init_is_reproducible() {
        let a = Matrix::xavier(16, 3, &mut StdRng::seed_from_u64(7));
        let b = Matrix::xavier(16, 3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
