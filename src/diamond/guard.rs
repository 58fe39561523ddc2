//! Scoped re-entrancy locks.

use crate::error::{DexError, Result};

/// Runs `body` with an in-progress flag held.
///
/// `flag` locates the flag inside `state` (it may fail, for example when
/// the pool it lives in is unknown).  The flag is set before `body` runs
/// and cleared on every exit path, including failures.  A flag that is
/// already set means the caller re-entered: the body is skipped and
/// [`DexError::Reentrancy`] returned.
///
/// # Errors
///
/// - [`DexError::Reentrancy`] if the flag is already held.
/// - Whatever `flag` or `body` return.
pub fn with_lock<S: ?Sized, T>(
    state: &mut S,
    flag: impl Fn(&mut S) -> Result<&mut bool>,
    body: impl FnOnce(&mut S) -> Result<T>,
) -> Result<T> {
    {
        let held = flag(state)?;
        if *held {
            return Err(DexError::Reentrancy);
        }
        *held = true;
    }
    let outcome = body(state);
    let released = flag(state).map(|held| *held = false);
    match (outcome, released) {
        (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        (Ok(value), Ok(())) => Ok(value),
    }
}
