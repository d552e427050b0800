//! Cascade module - the shared fixpoint loop
//!
//! Every game resolves a move the same way: find all loci satisfying its local
//! rule, resolve them simultaneously, and repeat until a pass finds nothing.
//! The per-game part is a single `pass` closure that scans the board, applies
//! the rule to everything it found, and reports how many units it resolved.
//!
//! The loop carries no iteration cap. Each rule must strictly reduce a finite
//! potential on every productive pass (cells on the board for removal rules,
//! total ink plus distance-to-edge for chip firing), so termination is a
//! property of the rule rather than a guard here.

use crate::types::Cascade;

/// Run `pass` until it reports zero units.
///
/// `pass` must return `0` exactly when it found no locus; a pass that found
/// loci must return a positive unit count. A board that is already stable
/// comes back untouched with [`Cascade::QUIET`].
pub fn resolve_to_fixpoint<B: ?Sized>(
    board: &mut B,
    mut pass: impl FnMut(&mut B) -> u32,
) -> Cascade {
    let mut cascade = Cascade::QUIET;
    loop {
        let units = pass(board);
        if units == 0 {
            break;
        }
        cascade.waves += 1;
        cascade.units += units;
    }
    cascade
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removes one adjacent equal pair per pass (naive reference rule).
    fn cancel_first_pair(seq: &mut Vec<u8>) -> u32 {
        let Some(i) = seq.windows(2).position(|w| w[0] == w[1]) else {
            return 0;
        };
        seq.drain(i..i + 2);
        2
    }

    #[test]
    fn test_stable_board_is_quiet() {
        let mut seq = vec![1u8, 2, 3];
        let cascade = resolve_to_fixpoint(&mut seq, cancel_first_pair);
        assert_eq!(cascade, Cascade::QUIET);
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn test_counts_waves_and_units() {
        let mut seq = vec![1u8, 2, 2, 1, 3];
        let cascade = resolve_to_fixpoint(&mut seq, cancel_first_pair);
        assert_eq!(cascade.waves, 2);
        assert_eq!(cascade.units, 4);
        assert_eq!(seq, vec![3]);
    }

    #[test]
    fn test_result_is_a_fixpoint() {
        let mut seq = vec![4u8, 1, 1, 4, 4, 2];
        resolve_to_fixpoint(&mut seq, cancel_first_pair);
        assert_eq!(cancel_first_pair(&mut seq), 0);
    }
}
