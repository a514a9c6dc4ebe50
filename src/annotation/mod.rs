//! Interval tiers read from Praat TextGrid files.
//!
//! Files are parsed with the `textgrid` crate first. When it rejects a file,
//! a line-oriented reader over the long and short text layouts gets a second
//! try before the file counts as malformed.

mod fallback;

use std::path::Path;

use textgrid::{Interval, TextGrid, TierType};

use crate::error::DurationError;

/// Intervals of the interval tier called `tier_name`, or `None` when the file
/// parses but has no such tier.
pub fn read_interval_tier(
    path: &Path,
    tier_name: &str,
) -> Result<Option<Vec<Interval>>, DurationError> {
    match read_with_textgrid_crate(path, tier_name) {
        Ok(intervals) => Ok(intervals),
        Err(crate_err) => {
            tracing::debug!(
                file = %path.display(),
                error = %crate_err,
                "textgrid crate rejected file, trying fallback reader"
            );
            fallback::read_interval_tier(path, tier_name).map_err(|fallback_err| {
                DurationError::parse(
                    path,
                    format!("textgrid crate ({crate_err}) and fallback reader ({fallback_err})"),
                )
            })
        }
    }
}

pub fn interval_duration(interval: &Interval) -> f64 {
    interval.xmax - interval.xmin
}

fn read_with_textgrid_crate(path: &Path, tier_name: &str) -> Result<Option<Vec<Interval>>, String> {
    let textgrid =
        TextGrid::from_file(path).map_err(|err| format!("textgrid crate parse failed: {err}"))?;
    Ok(textgrid
        .tiers
        .into_iter()
        .find(|tier| tier.tier_type == TierType::IntervalTier && tier.name == tier_name)
        .map(|tier| tier.intervals))
}
