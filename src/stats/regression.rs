use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DurationError;
use crate::stats::descriptive::mean;
use crate::types::WordUnit;

/// Mean word duration for one word length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthGroup {
    pub char_count: usize,
    pub words: usize,
    pub mean_duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub r_squared: f64,
    /// Standard error of the slope; absent with fewer than 3 points.
    pub std_err: Option<f64>,
    pub points: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Groups words by character count, keeping lengths seen more than
/// `min_group_size` times, ordered by length.
pub fn group_mean_by_length(words: &[WordUnit], min_group_size: usize) -> Vec<LengthGroup> {
    let mut durations: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for word in words {
        durations
            .entry(word.char_count)
            .or_default()
            .push(word.duration);
    }
    durations
        .into_iter()
        .filter(|(_, values)| values.len() > min_group_size)
        .map(|(char_count, values)| LengthGroup {
            char_count,
            words: values.len(),
            mean_duration: mean(&values),
        })
        .collect()
}

/// Ordinary least squares of `ys` on `xs`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<LinearFit, DurationError> {
    if xs.len() != ys.len() {
        return Err(DurationError::invalid_input(format!(
            "regression inputs differ in length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    let n = xs.len();
    if n < 2 {
        return Err(DurationError::invalid_input(format!(
            "regression needs at least 2 points, got {n}"
        )));
    }

    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let mut ssxm = 0.0;
    let mut ssym = 0.0;
    let mut ssxym = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    if ssxm == 0.0 {
        return Err(DurationError::invalid_input(
            "regression needs at least two distinct x values",
        ));
    }

    let slope = ssxym / ssxm;
    let intercept = y_mean - slope * x_mean;
    let r_value = if ssym == 0.0 {
        0.0
    } else {
        (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0)
    };
    let r_squared = r_value * r_value;
    let std_err = (n > 2).then(|| {
        let dof = (n - 2) as f64;
        ((1.0 - r_squared).max(0.0) * ssym / ssxm / dof).sqrt()
    });

    Ok(LinearFit {
        slope,
        intercept,
        r_value,
        r_squared,
        std_err,
        points: n,
    })
}

/// Regression of mean word duration on word length over the kept groups.
pub fn regress_duration_on_length(groups: &[LengthGroup]) -> Result<LinearFit, DurationError> {
    let xs: Vec<f64> = groups.iter().map(|group| group.char_count as f64).collect();
    let ys: Vec<f64> = groups.iter().map(|group| group.mean_duration).collect();
    linear_regression(&xs, &ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, duration: f64) -> WordUnit {
        WordUnit {
            file_id: "utt".to_string(),
            word: text.to_string(),
            char_count: text.chars().count(),
            duration,
        }
    }

    #[test]
    fn exact_line_has_unit_r_squared() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [0.15, 0.2, 0.25, 0.3];
        let fit = linear_regression(&xs, &ys).expect("fit");
        assert!((fit.slope - 0.05).abs() < 1e-12);
        assert!((fit.intercept - 0.1).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!(fit.std_err.expect("std err") < 1e-6);
        assert!((fit.predict(10.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn noisy_fit_matches_hand_computation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 2.0];
        let fit = linear_regression(&xs, &ys).expect("fit");
        assert!((fit.slope - 0.5).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_value - 0.5).abs() < 1e-12);
        // sqrt((1 - 0.25) * 2 / 2 / 1)
        assert!((fit.std_err.expect("std err") - 0.75f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn two_points_have_no_std_err() {
        let fit = linear_regression(&[1.0, 2.0], &[3.0, 5.0]).expect("fit");
        assert_eq!(fit.std_err, None);
        assert!((fit.slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(linear_regression(&[1.0], &[1.0]).is_err());
        assert!(linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
        assert!(linear_regression(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn groups_need_more_than_min_size() {
        let mut words = Vec::new();
        for _ in 0..6 {
            words.push(word("chat", 0.2));
            words.push(word("maison", 0.4));
        }
        for _ in 0..5 {
            words.push(word("le", 0.1));
        }
        words.push(word("chien", 0.3));

        let groups = group_mean_by_length(&words, 5);
        let lengths: Vec<usize> = groups.iter().map(|group| group.char_count).collect();
        assert_eq!(lengths, vec![4, 6]);
        assert_eq!(groups[0].words, 6);
        assert!((groups[0].mean_duration - 0.2).abs() < 1e-12);

        let fit = regress_duration_on_length(&groups).expect("fit");
        assert!((fit.slope - 0.1).abs() < 1e-9);
    }
}
