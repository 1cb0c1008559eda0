use proptest::prelude::*;
use tilegemm::{
    multiply_blocked, multiply_reference, multiply_vectorized, par_multiply_blocked, Matrix,
};

/// Matrix with integer entries in `[0, 10)`, so products stay exact in f32.
fn small_matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(0u8..10, rows * cols).prop_map(move |values| {
        Matrix::from_vec(rows, cols, values.into_iter().map(f32::from).collect()).unwrap()
    })
}

/// `(A, B)` with `A: m × k`, `B: k × n`, each dimension `unit * 1..=max_units`.
fn operand_pair(unit: usize, max_units: usize) -> impl Strategy<Value = (Matrix, Matrix)> {
    (1..=max_units, 1..=max_units, 1..=max_units).prop_flat_map(move |(m, k, n)| {
        (small_matrix(m * unit, k * unit), small_matrix(k * unit, n * unit))
    })
}

fn reference_product(a: &Matrix, b: &Matrix) -> Matrix {
    let mut c = Matrix::new(a.rows(), b.cols()).unwrap();
    multiply_reference(&mut c, a, b).unwrap();
    c
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_transpose_twice_is_identity(m in (0usize..20, 0usize..20).prop_flat_map(|(r, c)| small_matrix(r, c))) {
        let mut t = m.clone();
        t.transpose().unwrap();
        prop_assert_eq!(t.shape(), (m.cols(), m.rows()));
        t.transpose().unwrap();
        prop_assert_eq!(t, m);
    }

    #[test]
    fn prop_vectorized_matches_reference((a, b) in operand_pair(4, 6)) {
        let expected = reference_product(&a, &b);

        let mut bt = b.clone();
        bt.transpose().unwrap();
        let mut c = Matrix::new(a.rows(), b.cols()).unwrap();
        multiply_vectorized(&mut c, &a, &bt).unwrap();

        prop_assert!(c.approx_eq(&expected, 1e-3), "max diff {}", c.max_abs_diff(&expected));
    }

    #[test]
    fn prop_blocked_matches_reference((a, b) in operand_pair(4, 6)) {
        let expected = reference_product(&a, &b);

        let mut c = Matrix::new(a.rows(), b.cols()).unwrap();
        multiply_blocked(&mut c, &a, &b).unwrap();
        prop_assert!(c.approx_eq(&expected, 1e-3), "max diff {}", c.max_abs_diff(&expected));

        let mut p = Matrix::new(a.rows(), b.cols()).unwrap();
        par_multiply_blocked(&mut p, &a, &b).unwrap();
        prop_assert_eq!(p, c);
    }

    #[test]
    fn prop_identity_is_neutral(a in (1usize..8).prop_flat_map(|n| small_matrix(4 * n, 4 * n))) {
        let identity = Matrix::identity(a.rows()).unwrap();

        prop_assert_eq!(&reference_product(&a, &identity), &a);

        let mut c = Matrix::new(a.rows(), a.cols()).unwrap();
        multiply_blocked(&mut c, &a, &identity).unwrap();
        prop_assert_eq!(&c, &a);

        let mut c = Matrix::new(a.rows(), a.cols()).unwrap();
        multiply_vectorized(&mut c, &a, &identity).unwrap();
        prop_assert_eq!(&c, &a);
    }

    #[test]
    fn prop_zero_operand_gives_zero((a, b) in operand_pair(4, 4)) {
        let zeros = Matrix::new(a.rows(), a.cols()).unwrap();

        let mut c = Matrix::new(a.rows(), b.cols()).unwrap();
        multiply_blocked(&mut c, &zeros, &b).unwrap();
        prop_assert!(c.as_slice().iter().all(|&v| v == 0.0));

        prop_assert!(reference_product(&zeros, &b).as_slice().iter().all(|&v| v == 0.0));
    }
}
