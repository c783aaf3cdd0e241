#![allow(missing_docs)]

use ndarray::{Array2, array};
use timeseries_support_core::{
    GroupKey, IntervalSet, SeriesConfig, SeriesError, SeriesGroup, ThresholdMethod,
    TimeIndexedSeries, TimeUnit,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn overlapping_pairs_normalize() -> TestResult {
    let set = IntervalSet::from_pairs([(0.0, 5.0), (3.0, 8.0), (10.0, 12.0)])?;
    assert_eq!(set.to_pairs(), vec![(0.0, 8.0), (10.0, 12.0)]);
    Ok(())
}

#[test]
fn restrict_drops_samples_in_gaps() -> TestResult {
    let s = TimeIndexedSeries::from_timestamps(vec![1.0, 4.0, 9.0, 11.0], None)?;
    let support = IntervalSet::from_pairs([(0.0, 8.0), (10.0, 12.0)])?;
    assert_eq!(s.restrict(&support).timestamps(), &[1.0, 4.0, 11.0]);
    Ok(())
}

#[test]
fn value_from_takes_nearest_preceding_sample() -> TestResult {
    let s = TimeIndexedSeries::from_scalars(vec![2.0, 6.0], vec![10.0, 20.0], None)?;
    let aligned = s.value_from(&[5.0], None)?;
    assert_eq!(aligned.scalar(0), Some(10.0));
    Ok(())
}

#[test]
fn count_in_touching_bins() -> TestResult {
    let s = TimeIndexedSeries::from_timestamps(vec![1.0, 2.0, 2.5, 7.0], None)?;
    let bins = IntervalSet::from_pairs([(0.0, 3.0), (3.0, 8.0)])?;
    assert_eq!(s.count(&bins).values(), &array![3.0, 1.0].into_dyn());
    Ok(())
}

#[test]
fn sample_on_a_shared_boundary_belongs_to_the_later_interval() -> TestResult {
    let s = TimeIndexedSeries::from_timestamps(vec![3.0], Some(IntervalSet::single(0.0, 8.0)?))?;

    let first = IntervalSet::single(0.0, 3.0)?;
    assert!(s.restrict(&first).is_empty());

    let bins = IntervalSet::from_pairs([(0.0, 3.0), (3.0, 8.0)])?;
    assert_eq!(s.count(&bins).values(), &array![0.0, 1.0].into_dyn());
    Ok(())
}

#[test]
fn no_data_is_distinct_from_zero() -> TestResult {
    let s = TimeIndexedSeries::from_scalars(
        vec![0.0, 1.0, 10.0],
        vec![0.0, 0.0, 5.0],
        Some(IntervalSet::from_pairs([(0.0, 2.0), (10.0, 11.0)])?),
    )?;

    let aligned = s.value_from(&[1.5, 5.0, 10.5], None)?;
    assert_eq!(aligned.to_scalar_options(), vec![Some(0.0), None, Some(5.0)]);
    assert_eq!(aligned.present_count(), 2);

    let interp = s.interpolate(&[0.5, 5.0])?;
    assert_eq!(interp.to_scalar_options(), vec![Some(0.0), None]);
    Ok(())
}

#[test]
fn millisecond_input_is_converted_to_seconds() -> TestResult {
    let config = SeriesConfig::with_unit(TimeUnit::Milliseconds);
    let s = TimeIndexedSeries::from_arrays_with(
        &config,
        vec![250.0, 500.0, 1250.0],
        Array2::<f64>::zeros((3, 2)).into_dyn(),
        None,
    )?;
    assert_eq!(s.timestamps(), &[0.25, 0.5, 1.25]);
    // Bins of 0.5 s from 0.25; the last one is clipped right after 1.25.
    assert_eq!(s.count_per("500ms")?.values(), &array![2.0, 0.0, 1.0].into_dyn());
    Ok(())
}

#[test]
fn threshold_then_restrict_other_series() -> TestResult {
    let speed = TimeIndexedSeries::from_scalars(
        (0..10).map(f64::from).collect(),
        vec![0.0, 0.0, 3.0, 4.0, 5.0, 0.0, 0.0, 6.0, 7.0, 0.0],
        None,
    )?;
    let moving = speed.threshold_by("above".parse::<ThresholdMethod>()?, 1.0);
    assert_eq!(moving.time_support().len(), 2);

    let spikes = TimeIndexedSeries::from_timestamps(vec![0.5, 2.5, 4.0, 6.5, 7.5, 8.9], None)?;
    let during_motion = spikes.restrict(moving.time_support());
    assert_eq!(during_motion.timestamps(), &[2.5, 4.0, 7.5]);
    Ok(())
}

#[test]
fn group_pipeline() -> TestResult {
    let group = SeriesGroup::from_mapping([
        (
            GroupKey::Index(1),
            TimeIndexedSeries::from_timestamps(vec![0.5, 1.5, 2.5], None)?,
        ),
        (
            GroupKey::Index(2),
            TimeIndexedSeries::from_timestamps(vec![0.25, 2.75], None)?,
        ),
    ])
    .set_info("region", [(1i64, "CA1"), (2, "CA3")])?;

    let epoch = IntervalSet::single(0.0, 2.0)?;
    let restricted = group.restrict_all(&epoch);
    let counts = restricted.count_matrix(&epoch.split(1.0)?);
    assert_eq!(counts, array![[1u64, 1], [1, 0]]);
    assert_eq!(restricted.info("region").len(), 2);

    assert!(matches!(
        group.drop_key(&GroupKey::from("missing")),
        Err(SeriesError::UnknownKey { .. })
    ));
    Ok(())
}
