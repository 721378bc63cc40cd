//! Heat exchange between neighboring thermal tiles

/// Heat a tile gains from one neighbor in a single exchange step
///
/// `floor((neighbor_heat - heat) * (coefficient + neighbor_coefficient)) >> 2`.
/// The shift rounds toward negative infinity, so exchanges are not exactly
/// symmetric and total heat drifts slightly. The caller adds the result to
/// the tile and subtracts it from the neighbor.
#[inline]
pub fn exchanged_heat(
    heat: i32,
    coefficient: f64,
    neighbor_heat: i32,
    neighbor_coefficient: f64,
) -> i32 {
    let difference = i64::from(neighbor_heat) - i64::from(heat);
    let scaled = (difference as f64 * (coefficient + neighbor_coefficient)).floor();
    (scaled as i32) >> 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_coefficients_meet_in_the_middle() {
        let exchanged = exchanged_heat(100, 1.0, 0, 1.0);
        assert_eq!(exchanged, -50);
        assert_eq!(100 + exchanged, 50);
        assert_eq!(0 - exchanged, 50);
    }

    #[test]
    fn test_colder_tile_gains_heat() {
        assert_eq!(exchanged_heat(0, 1.0, 100, 1.0), 50);
    }

    #[test]
    fn test_equal_heat_exchanges_nothing() {
        assert_eq!(exchanged_heat(42, 0.3, 42, 0.9), 0);
    }

    #[test]
    fn test_negative_values_round_down() {
        // -3 * 1.5 = -4.5 -> floor -5 -> >> 2 = -2 (division would give -1)
        assert_eq!(exchanged_heat(3, 1.0, 0, 0.5), -2);
        // Mirror case: 4.5 -> floor 4 -> >> 2 = 1
        assert_eq!(exchanged_heat(0, 1.0, 3, 0.5), 1);
    }

    #[test]
    fn test_small_negative_difference_still_moves_heat() {
        // -1 * 2 = -2 -> >> 2 = -1, while +2 >> 2 = 0
        assert_eq!(exchanged_heat(1, 1.0, 0, 1.0), -1);
        assert_eq!(exchanged_heat(0, 1.0, 1, 1.0), 0);
    }

    #[test]
    fn test_low_conductivity_slows_exchange() {
        // Wood (0.01) next to burning wood (1.0)
        let exchanged = exchanged_heat(25, 0.01, 500, 1.0);
        assert_eq!(exchanged, ((475.0_f64 * 1.01).floor() as i32) >> 2);
        assert_eq!(exchanged, 119);
    }

    #[test]
    fn test_extreme_difference_does_not_overflow() {
        let exchanged = exchanged_heat(-10_000, 1.0, 10_000, 1.0);
        assert_eq!(exchanged, 10_000);
    }
}
