//! Wrap-around stepping through a fixed list of variants.

use std::fmt::Debug;

use crate::error::{ToggleError, ToggleResult};

/// Return the element following `current` in `values`, wrapping to the front.
///
/// `current` must be one of `values`; callers always derive it from the same list, so a miss
/// is reported as [`ToggleError::Unexpected`].
pub fn next_element<T>(values: &[T], current: &T) -> ToggleResult<T>
where
    T: PartialEq + Clone + Debug,
{
    let index = values
        .iter()
        .position(|value| value == current)
        .ok_or_else(|| {
            ToggleError::unexpected(format!("{current:?} is not one of {values:?}"))
        })?;
    Ok(values[(index + 1) % values.len()].clone())
}
