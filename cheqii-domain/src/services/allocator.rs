//! Largest-remainder apportionment of an integer amount over integer weights.
//!
//! The parts always sum to the allocated total, so no minor unit is lost or
//! invented no matter how many items are split.

use crate::model::Money;

pub struct ProportionalAllocator;

impl ProportionalAllocator {
    /// Splits `total` proportionally to `weights`.
    ///
    /// Every part is `floor(total * w_i / W)` plus at most one extra unit. The
    /// units left over after flooring go to the largest fractional
    /// remainders; equal remainders are served in weight order. Zero weights
    /// always receive zero. With no positive weight the result is zero-filled.
    pub fn allocate(total: Money, weights: &[u64]) -> Vec<Money> {
        let weight_sum: u128 = weights.iter().map(|w| u128::from(*w)).sum();
        if weight_sum == 0 {
            tracing::debug!(
                part_count = weights.len(),
                total = total.amount(),
                "Allocation requested without positive weights; returning zero parts"
            );
            return vec![Money::ZERO; weights.len()];
        }

        let magnitude = u128::from(total.amount().unsigned_abs());
        let mut parts: Vec<u128> = Vec::with_capacity(weights.len());
        let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(weights.len());
        for (idx, weight) in weights.iter().enumerate() {
            let scaled = magnitude * u128::from(*weight);
            parts.push(scaled / weight_sum);
            let remainder = scaled % weight_sum;
            if remainder > 0 {
                remainders.push((idx, remainder));
            }
        }

        let floored: u128 = parts.iter().sum();
        let leftover = (magnitude - floored) as usize;
        debug_assert!(leftover <= remainders.len());

        // stable: ties keep weight order
        remainders.sort_by(|(_, a), (_, b)| b.cmp(a));
        for (idx, _) in remainders.iter().take(leftover) {
            parts[*idx] += 1;
        }

        // every part is at most |total|, so it fits back into an i64
        parts
            .into_iter()
            .map(|part| {
                let part = part as i64;
                Money::from_i64(if total.is_negative() {
                    part.wrapping_neg()
                } else {
                    part
                })
            })
            .collect()
    }

    /// Same as [`allocate`](Self::allocate), optionally walking the weights
    /// back to front so tie-broken extra units land at the other end.
    pub fn allocate_alternating(total: Money, weights: &[u64], reverse: bool) -> Vec<Money> {
        if !reverse {
            return Self::allocate(total, weights);
        }

        let reversed: Vec<u64> = weights.iter().rev().copied().collect();
        let mut parts = Self::allocate(total, &reversed);
        parts.reverse();
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn amounts(parts: &[Money]) -> Vec<i64> {
        parts.iter().map(|part| part.amount()).collect()
    }

    #[rstest]
    #[case::even_split(1000, &[1, 1], &[500, 500])]
    #[case::odd_cent_goes_first(1001, &[1, 1], &[501, 500])]
    #[case::three_way(100, &[1, 1, 1], &[34, 33, 33])]
    #[case::weighted(1000, &[1, 3], &[250, 750])]
    #[case::largest_remainder_wins(10, &[1, 2, 4], &[1, 3, 6])]
    #[case::zero_weight_gets_nothing(1001, &[1, 0, 1], &[501, 0, 500])]
    #[case::zero_total(0, &[2, 5], &[0, 0])]
    #[case::all_zero_weights(1234, &[0, 0], &[0, 0])]
    #[case::negative_total(-1001, &[1, 1], &[-501, -500])]
    #[case::single(999, &[7], &[999])]
    fn allocate_cases(#[case] total: i64, #[case] weights: &[u64], #[case] expected: &[i64]) {
        let parts = ProportionalAllocator::allocate(Money::from_i64(total), weights);
        assert_eq!(amounts(&parts), expected);
    }

    #[rstest]
    #[case::forward(false, &[501, 500])]
    #[case::reversed(true, &[500, 501])]
    fn alternating_moves_the_extra_unit(#[case] reverse: bool, #[case] expected: &[i64]) {
        let parts =
            ProportionalAllocator::allocate_alternating(Money::from_i64(1001), &[1, 1], reverse);
        assert_eq!(amounts(&parts), expected);
    }

    #[test]
    fn alternating_keeps_parts_aligned_with_weights() {
        let parts =
            ProportionalAllocator::allocate_alternating(Money::from_i64(700), &[0, 1, 6], true);
        assert_eq!(amounts(&parts), vec![0, 100, 600]);
    }

    #[test]
    fn large_amounts_do_not_overflow() {
        let total = Money::from_i64(i64::MAX);
        let parts = ProportionalAllocator::allocate(total, &[u64::MAX, u64::MAX, 1]);
        let sum: i128 = parts.iter().map(|part| i128::from(part.amount())).sum();
        assert_eq!(sum, i128::from(i64::MAX));
    }
}
