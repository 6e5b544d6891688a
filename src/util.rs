// Numerical helpers for turning policy logits into moves

use ndarray::{Array1, ArrayView1};
use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::game::Player;

/// Network input for a view: the view followed by the mover's sign
pub fn view_to_obs(view: &[i8], player: Player) -> Array1<f64> {
    view.iter()
        .copied()
        .chain(std::iter::once(player.sign()))
        .map(f64::from)
        .collect()
}

/// Masked softmax: `exp(x - max(x)) * mask`, normalised to sum to one.
///
/// With no mask every entry is kept. A mask that removes every entry has no
/// distribution and is an error.
pub fn softmax(logits: ArrayView1<f64>, mask: Option<&[bool]>) -> Result<Array1<f64>> {
    if logits.is_empty() {
        return Err(Error::InvalidDistribution("no logits".to_string()));
    }
    if let Some(mask) = mask {
        if mask.len() != logits.len() {
            return Err(Error::InvalidDistribution(format!(
                "mask has {} entries for {} logits",
                mask.len(),
                logits.len()
            )));
        }
    }

    let keep = |i: usize| mask.map_or(true, |mask| mask[i]);
    // Only kept entries set the shift, so a large masked logit cannot
    // underflow the rest
    let max = logits
        .iter()
        .enumerate()
        .filter(|(i, _)| keep(*i))
        .fold(f64::NEG_INFINITY, |acc, (_, x)| acc.max(*x));
    if max == f64::NEG_INFINITY {
        return Err(Error::InvalidDistribution(
            "every action is masked out".to_string(),
        ));
    }

    let exp: Array1<f64> = logits
        .iter()
        .enumerate()
        .map(|(i, x)| if keep(i) { (x - max).exp() } else { 0.0 })
        .collect();

    let sum = exp.sum();
    if !(sum > 0.0) || !sum.is_finite() {
        return Err(Error::InvalidDistribution(format!(
            "logits do not normalise (sum {})",
            sum
        )));
    }
    Ok(exp / sum)
}

/// Draw an action index from the masked softmax of `logits`
pub fn sample(logits: ArrayView1<f64>, valid: Option<&[bool]>, rng: &mut dyn RngCore) -> Result<usize> {
    let probs = softmax(logits, valid)?;
    let dist = WeightedIndex::new(probs.iter())
        .map_err(|e| Error::InvalidDistribution(e.to_string()))?;
    Ok(dist.sample(rng))
}

/// Indices of the valid actions
pub fn valid_indices(valid: &[bool]) -> Vec<usize> {
    valid
        .iter()
        .enumerate()
        .filter_map(|(i, v)| if *v { Some(i) } else { None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_view_to_obs_appends_player() {
        let obs = view_to_obs(&[1, 0, -1], Player::Second);
        assert_eq!(obs, array![1.0, 0.0, -1.0, -1.0]);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let logits = array![1.0, 2.0, 3.0];
        let probs = softmax(logits.view(), None).unwrap();
        assert!((probs.sum() - 1.0).abs() < 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_softmax_is_stable_for_large_logits() {
        let logits = array![1000.0, 1000.0];
        let probs = softmax(logits.view(), None).unwrap();
        assert!((probs[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_mask_zeroes_entries() {
        let logits = array![0.0, 0.0, 0.0, 0.0];
        let probs = softmax(logits.view(), Some(&[true, false, true, false][..])).unwrap();
        assert_eq!(probs, array![0.5, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_softmax_ignores_large_masked_logits() {
        let logits = array![1000.0, 0.0];
        let probs = softmax(logits.view(), Some(&[false, true][..])).unwrap();
        assert_eq!(probs, array![0.0, 1.0]);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample(logits.view(), Some(&[false, true][..]), &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_softmax_rejects_bad_masks() {
        let logits = array![0.0, 1.0];
        assert!(softmax(logits.view(), Some(&[false, false][..])).is_err());
        assert!(softmax(logits.view(), Some(&[true][..])).is_err());
    }

    #[test]
    fn test_sample_never_returns_masked_actions() {
        let mut rng = StdRng::seed_from_u64(42);
        let logits = array![5.0, 0.0, 5.0];
        let valid = [false, true, false];
        for _ in 0..100 {
            assert_eq!(sample(logits.view(), Some(&valid[..]), &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_valid_indices() {
        assert_eq!(valid_indices(&[true, false, true]), vec![0, 2]);
    }
}
