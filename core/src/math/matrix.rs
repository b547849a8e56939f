use ndarray::{Array2, ArrayView2, Axis};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Builds a dense 2D array from row vectors. Ragged input yields `None`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Array2<f64>> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Array2::from_shape_vec((height, width), flat).ok()
    }

    /// Sums each column, collapsing the channel axis into a weekly total.
    pub fn column_sums(table: ArrayView2<f64>) -> Vec<f64> {
        table.sum_axis(Axis(0)).to_vec()
    }
}
