use rayon::prelude::*;
use thiserror::Error;

use crate::machine::{self, ExecError};

/// Cells 1 and 2 of a loaded program are its two input parameters, the
/// "noun" and "verb".
pub const NOUN_CELL: usize = 1;
pub const VERB_CELL: usize = 2;

/// Exclusive upper bound of the searched range for both parameters.
pub const PARAM_LIMIT: i64 = 100;

/// A failed search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// One trial execution failed; the whole search aborts rather than
    /// guessing which later pairs are still meaningful.
    #[error("trial noun={noun} verb={verb} failed: {source}")]
    Trial {
        noun: i64,
        verb: i64,
        source: ExecError,
    },

    #[error("no noun/verb pair in [0, 100) x [0, 100) produces {target}")]
    NoSolution { target: i64 },
}

/// Run one trial: copy the baseline, overwrite the noun and verb cells,
/// execute to completion, and return cell 0.
///
/// The baseline itself is never mutated, so trials are isolated from each
/// other whether they run in sequence or on different threads.
pub fn run_trial(baseline: &[i64], noun: i64, verb: i64) -> Result<i64, ExecError> {
    let mut mem = baseline.to_vec();
    if mem.len() <= VERB_CELL {
        return Err(ExecError::OutOfBounds {
            addr: VERB_CELL as i64,
            ip: 0,
            len: mem.len(),
        });
    }
    mem[NOUN_CELL] = noun;
    mem[VERB_CELL] = verb;
    machine::execute(&mut mem)?;
    Ok(mem[0])
}

/// Try every verb for one noun, in order. Returns the first matching verb,
/// `None` if the row is exhausted, or the row's first trial error.
fn search_row(baseline: &[i64], noun: i64, target: i64) -> Result<Option<i64>, SearchError> {
    for verb in 0..PARAM_LIMIT {
        let cell0 = run_trial(baseline, noun, verb)
            .map_err(|source| SearchError::Trial { noun, verb, source })?;
        if cell0 == target {
            return Ok(Some(verb));
        }
    }
    Ok(None)
}

/// Brute-force `(noun, verb)` over [0, 100) x [0, 100) in row-major order
/// (noun outer, verb inner) until a trial leaves `target` in cell 0.
///
/// Returns the first matching pair by that fixed order. Exhausting the
/// range is reported as `NoSolution`, never as silent completion.
pub fn find_noun_verb(baseline: &[i64], target: i64) -> Result<(i64, i64), SearchError> {
    for noun in 0..PARAM_LIMIT {
        if let Some(verb) = search_row(baseline, noun, target)? {
            return Ok((noun, verb));
        }
    }
    Err(SearchError::NoSolution { target })
}

/// Same contract and same result as [`find_noun_verb`], with noun rows
/// spread across the rayon pool.
///
/// Each row stops at its own first match or error, and the row outcomes
/// are then scanned in noun order, so the reported pair (or error) is
/// exactly the one the sequential search would find.
pub fn find_noun_verb_parallel(baseline: &[i64], target: i64) -> Result<(i64, i64), SearchError> {
    let rows: Vec<Result<Option<i64>, SearchError>> = (0..PARAM_LIMIT)
        .into_par_iter()
        .map(|noun| search_row(baseline, noun, target))
        .collect();

    for (noun, row) in (0..PARAM_LIMIT).zip(rows) {
        if let Some(verb) = row? {
            return Ok((noun, verb));
        }
    }
    Err(SearchError::NoSolution { target })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn trials_never_mutate_the_baseline(
            baseline in prop::collection::vec(any::<i64>(), 3..64),
            noun in 0i64..PARAM_LIMIT,
            verb in 0i64..PARAM_LIMIT,
        ) {
            let snapshot = baseline.clone();
            let _ = run_trial(&baseline, noun, verb);
            prop_assert_eq!(baseline, snapshot);
        }

        #[test]
        fn trials_are_deterministic(
            baseline in prop::collection::vec(any::<i64>(), 3..64),
            noun in 0i64..PARAM_LIMIT,
            verb in 0i64..PARAM_LIMIT,
        ) {
            let first = run_trial(&baseline, noun, verb);
            let second = run_trial(&baseline, noun, verb);
            prop_assert_eq!(first, second);
        }
    }
}
