//! Property tests across every operator and dimension.

use proptest::prelude::*;
use zeno_core::Complex64;
use zeno_operators::{
    curvature, entropy, laplacian, nonlinear, partition_count, torsion, OperatorError,
    PartitionMemo, PartitionTable,
};
use zeno_test_utils::{checkerboard, random_real, to_complex};

fn dimension_and_extent() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![
        (Just(1usize), 1usize..40),
        (Just(2usize), 1usize..10),
        (Just(3usize), 1usize..5),
    ]
}

proptest! {
    #[test]
    fn uniform_fields_have_flat_partition_terms(
        (dimension, extent) in dimension_and_extent(),
        value in -12.0f64..12.0,
    ) {
        let len = extent.pow(dimension as u32);
        let table = PartitionTable::reference();
        let real = vec![value; len];
        prop_assert!(curvature(&real, dimension, table).unwrap().iter().all(|&v| v == 0.0));
        prop_assert!(torsion(&real, dimension, table).unwrap().iter().all(|&v| v == 0.0));

        let complex = to_complex(&real);
        let zero = Complex64::new(0.0, 0.0);
        prop_assert!(curvature(&complex, dimension, table).unwrap().iter().all(|&z| z == zero));
        prop_assert!(torsion(&complex, dimension, table).unwrap().iter().all(|&z| z == zero));
    }

    #[test]
    fn nonlinear_is_elementwise_cube(values in prop::collection::vec(-50.0f64..50.0, 1..64)) {
        let n = nonlinear(&values, 1).unwrap();
        for (x, y) in values.iter().zip(&n) {
            prop_assert_eq!(*y, x * x * x);
        }
    }

    #[test]
    fn laplacian_sums_to_zero_on_a_torus(
        (dimension, extent) in dimension_and_extent(),
        seed in any::<u64>(),
    ) {
        let len = extent.pow(dimension as u32);
        let values = random_real(len, 1.0, seed);
        let sum: f64 = laplacian(&values, dimension).unwrap().iter().sum();
        prop_assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn torsion_sums_to_zero_on_a_torus(
        (dimension, extent) in dimension_and_extent(),
        seed in any::<u64>(),
    ) {
        let len = extent.pow(dimension as u32);
        let values = random_real(len, 3.0, seed);
        let t = torsion(&values, dimension, PartitionTable::reference()).unwrap();
        let scale: f64 = t.iter().map(|v| v.abs()).sum::<f64>().max(1.0);
        prop_assert!((t.iter().sum::<f64>() / scale).abs() < 1e-9);
    }

    #[test]
    fn operators_preserve_length((dimension, extent) in dimension_and_extent(), seed in any::<u64>()) {
        let len = extent.pow(dimension as u32);
        let values = to_complex(&random_real(len, 2.0, seed));
        let table = PartitionTable::reference();
        prop_assert_eq!(curvature(&values, dimension, table).unwrap().len(), len);
        prop_assert_eq!(torsion(&values, dimension, table).unwrap().len(), len);
        prop_assert_eq!(nonlinear(&values, dimension).unwrap().len(), len);
        prop_assert_eq!(entropy(&values, dimension).unwrap().len(), len);
        prop_assert_eq!(laplacian(&values, dimension).unwrap().len(), len);
    }
}

#[test]
fn every_operator_rejects_unsupported_dimensions() {
    let table = PartitionTable::reference();
    let values = vec![0.25f64; 16];
    for dimension in [0usize, 4, 5] {
        let expected = Err(OperatorError::UnsupportedDimension { dimension });
        assert_eq!(curvature(&values, dimension, table), expected);
        assert_eq!(torsion(&values, dimension, table), expected);
        assert_eq!(nonlinear(&values, dimension), expected);
        assert_eq!(entropy(&values, dimension), expected);
        assert_eq!(laplacian(&values, dimension), expected);
    }
}

#[test]
fn non_hypercube_length_is_a_shape_mismatch() {
    let err = curvature(&[0.0f64; 10], 2, PartitionTable::reference()).unwrap_err();
    assert_eq!(
        err,
        OperatorError::ShapeMismatch {
            expected: 9,
            actual: 10
        }
    );
    let err = laplacian(&[0.0f64; 30], 3).unwrap_err();
    assert!(matches!(err, OperatorError::ShapeMismatch { actual: 30, .. }));
}

#[test]
fn checkerboard_curvature_is_identical_in_every_dimension() {
    let table = PartitionTable::reference();
    for (dimension, extent) in [(1, 6), (2, 4), (3, 4)] {
        let values = to_complex(&checkerboard(extent, dimension));
        let r = curvature(&values, dimension, table).unwrap();
        assert!(r.iter().all(|&z| z == r[0]), "dim {dimension}");
    }
}

#[test]
fn table_and_recursive_function_agree() {
    let table = PartitionTable::build(200).unwrap();
    let mut memo = PartitionMemo::default();
    for n in 0..=200usize {
        assert_eq!(Some(memo.get(n as i64).unwrap()), table.count(n), "p({n})");
    }
    for n in 0..=50i64 {
        assert_eq!(Some(partition_count(n).unwrap()), table.count(n as usize));
    }
    assert_eq!(table.count(0), Some(1));
    assert_eq!(partition_count(-3), Ok(0));
}
