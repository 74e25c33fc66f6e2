//! Elevation reductions over a set of records.

use crate::types::VolcanoRecord;

/// Built-in reductions over `Elevation (m)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all records.
    Count,
    Sum,
    Min,
    Max,
    /// Arithmetic mean truncated toward zero.
    Mean,
}

/// Reduce the elevations of `records` using a built-in [`ReduceOp`].
///
/// - `Count` always returns `Some(n)`.
/// - Every other op returns `None` when there are no records.
/// - Sums are accumulated in `i128`; `Sum` returns `None` when the total does not fit in `i64`.
///   `Mean` always fits.
pub fn reduce<'a, I>(records: I, op: ReduceOp) -> Option<i64>
where
    I: IntoIterator<Item = &'a VolcanoRecord>,
{
    let mut count: i64 = 0;
    let mut sum: i128 = 0;
    let mut min: Option<i64> = None;
    let mut max: Option<i64> = None;

    for record in records {
        let v = record.elevation_m;
        count += 1;
        sum += i128::from(v);
        min = Some(min.map_or(v, |m| m.min(v)));
        max = Some(max.map_or(v, |m| m.max(v)));
    }

    if op == ReduceOp::Count {
        return Some(count);
    }
    if count == 0 {
        return None;
    }
    match op {
        ReduceOp::Count => Some(count),
        ReduceOp::Sum => i64::try_from(sum).ok(),
        // Integer division truncates toward zero.
        ReduceOp::Mean => i64::try_from(sum / i128::from(count)).ok(),
        ReduceOp::Min => min,
        ReduceOp::Max => max,
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, ReduceOp};
    use crate::types::VolcanoRecord;

    fn records(elevations: &[i64]) -> Vec<VolcanoRecord> {
        elevations
            .iter()
            .map(|&e| VolcanoRecord::new("v", "Chile", e))
            .collect()
    }

    #[test]
    fn reduce_count_counts_records() {
        assert_eq!(reduce(&records(&[1, 2, 3]), ReduceOp::Count), Some(3));
        assert_eq!(reduce(&records(&[]), ReduceOp::Count), Some(0));
    }

    #[test]
    fn reduce_sum_min_max() {
        let rs = records(&[100, 300, 200]);
        assert_eq!(reduce(&rs, ReduceOp::Sum), Some(600));
        assert_eq!(reduce(&rs, ReduceOp::Min), Some(100));
        assert_eq!(reduce(&rs, ReduceOp::Max), Some(300));
    }

    #[test]
    fn reduce_mean_truncates_toward_zero() {
        assert_eq!(reduce(&records(&[1, 2]), ReduceOp::Mean), Some(1));
        assert_eq!(reduce(&records(&[-1, -2]), ReduceOp::Mean), Some(-1));
        assert_eq!(reduce(&records(&[-5000, 10]), ReduceOp::Mean), Some(-2495));
    }

    #[test]
    fn reduce_returns_none_without_records() {
        let empty: Vec<VolcanoRecord> = Vec::new();
        assert_eq!(reduce(&empty, ReduceOp::Sum), None);
        assert_eq!(reduce(&empty, ReduceOp::Min), None);
        assert_eq!(reduce(&empty, ReduceOp::Mean), None);
    }

    #[test]
    fn reduce_mean_of_huge_elevations_does_not_overflow() {
        let half = i64::MAX / 2 + 1;
        let rs = records(&[half, half]);
        assert_eq!(reduce(&rs, ReduceOp::Mean), Some(half));
        assert_eq!(reduce(&rs, ReduceOp::Max), Some(half));
        assert_eq!(reduce(&rs, ReduceOp::Sum), None);

        let rs = records(&[i64::MIN, i64::MIN, i64::MAX]);
        assert_eq!(reduce(&rs, ReduceOp::Min), Some(i64::MIN));
        assert_eq!(reduce(&rs, ReduceOp::Mean), Some(-3_074_457_345_618_258_603));
    }
}
