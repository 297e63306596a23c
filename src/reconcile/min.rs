//! Small numeric minimum helpers over `f64` costs.
//!
//! Costs are finite and non-negative or `+∞`, never NaN, so plain
//! `f64::min` folding is a total order here.

use crate::reconcile::event::Event;

/// Minimum of a fixed number of costs; `+∞` for an empty array.
#[inline]
pub(crate) fn min_of<const N: usize>(values: [f64; N]) -> f64 {
    values.into_iter().fold(f64::INFINITY, f64::min)
}

/// Minimum of a slice of costs; `+∞` if empty.
#[inline]
pub(crate) fn min_row(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Picks the cheapest of speciation, duplication and transfer.
///
/// Speciation and duplication are compared first (`<=` keeps speciation),
/// then the tentative winner is replaced by transfer only if transfer is
/// strictly cheaper. An infinite winner records no event.
#[inline]
pub(crate) fn select_event(speciation: f64, duplication: f64, transfer: f64) -> (f64, Option<Event>) {
    let (mut cost, mut event) = if speciation <= duplication {
        (speciation, Event::Speciation)
    } else {
        (duplication, Event::Duplication)
    };
    if cost > transfer {
        cost = transfer;
        event = Event::Transfer;
    }
    (cost, cost.is_finite().then_some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn test_min_of() {
        assert_eq!(min_of([3.0, 1.0, 2.0]), 1.0);
        assert_eq!(min_of([INF, 7.5]), 7.5);
        assert_eq!(min_of([INF, INF]), INF);
        assert_eq!(min_of([9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]), 1.0);
        assert_eq!(min_row(&[]), INF);
        assert_eq!(min_row(&[INF, 0.5, 2.0]), 0.5);
    }

    #[test]
    fn test_speciation_wins_tie_with_duplication() {
        assert_eq!(select_event(2.0, 2.0, 5.0), (2.0, Some(Event::Speciation)));
    }

    #[test]
    fn test_duplication_wins_tie_with_transfer() {
        assert_eq!(select_event(4.0, 1.0, 1.0), (1.0, Some(Event::Duplication)));
    }

    #[test]
    fn test_speciation_wins_three_way_tie() {
        assert_eq!(select_event(0.0, 0.0, 0.0), (0.0, Some(Event::Speciation)));
    }

    #[test]
    fn test_transfer_must_be_strictly_cheaper() {
        assert_eq!(select_event(3.0, 4.0, 2.5), (2.5, Some(Event::Transfer)));
        assert_eq!(select_event(INF, INF, 1.0), (1.0, Some(Event::Transfer)));
    }

    #[test]
    fn test_infinite_records_no_event() {
        assert_eq!(select_event(INF, INF, INF), (INF, None));
    }
}
