//! Pure helpers used by the engine: permutation checks and ETA accumulation.

use chrono::NaiveDateTime;

use crate::DelayPerStop;

use super::error::SequencingError;

/// Check that `permutation` contains every index in `0..len` exactly once.
///
/// # Errors
///
/// Returns a description of the first defect found.
///
/// # Examples
/// ```
/// use stopline_core::sequencing::validate_permutation;
///
/// assert!(validate_permutation(&[2, 0, 1], 3).is_ok());
/// assert!(validate_permutation(&[0, 0, 1], 3).is_err());
/// assert!(validate_permutation(&[0, 1], 3).is_err());
/// ```
pub fn validate_permutation(permutation: &[usize], len: usize) -> Result<(), String> {
    if permutation.len() != len {
        return Err(format!(
            "expected {len} indices, got {}",
            permutation.len()
        ));
    }
    let mut seen = vec![false; len];
    for &index in permutation {
        match seen.get_mut(index) {
            None => return Err(format!("index {index} is out of range for {len} stops")),
            Some(true) => return Err(format!("index {index} appears more than once")),
            Some(slot) => *slot = true,
        }
    }
    Ok(())
}

/// ETAs for `count` consecutive stops starting at `start`.
///
/// The first stop arrives at `start`; each later stop arrives `delay` after
/// the one before it.
///
/// # Errors
///
/// Returns [`SequencingError::EtaOverflow`] if a timestamp leaves the
/// representable range.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use stopline_core::DelayPerStop;
/// use stopline_core::sequencing::eta_schedule;
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1)
///     .and_then(|day| day.and_hms_opt(9, 0, 0))
///     .expect("valid time");
/// let etas = eta_schedule(start, DelayPerStop::new(15)?, 3)?;
/// assert_eq!(etas[2].format("%H:%M").to_string(), "09:30");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn eta_schedule(
    start: NaiveDateTime,
    delay: DelayPerStop,
    count: usize,
) -> Result<Vec<NaiveDateTime>, SequencingError> {
    let step = delay.as_time_delta();
    let mut etas = Vec::with_capacity(count);
    let mut next = Some(start);
    for position in 0..count {
        let at = next.ok_or(SequencingError::EtaOverflow { position })?;
        etas.push(at);
        next = at.checked_add_signed(step);
    }
    Ok(etas)
}
