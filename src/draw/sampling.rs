//! Random feature selection

use log::debug;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;

use crate::haar::errors::{HaarError, HaarResult};

/// Pick `amount` distinct indices out of `0..length`
///
/// With a seed the selection is reproducible; without one it is drawn from
/// the operating system's entropy source. Returned indices keep the random
/// draw order.
///
/// # Errors
/// `GenericError` when `amount` exceeds `length`.
pub fn sample_feature_indices(length: usize, amount: usize, seed: Option<u64>) -> HaarResult<Vec<usize>> {
    if amount > length {
        return Err(HaarError::GenericError(format!(
            "Cannot sample {} features out of {}", amount, length
        )));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let indices = sample(&mut rng, length, amount).into_vec();
    debug!("Sampled {} of {} features (seed: {:?})", amount, length, seed);
    Ok(indices)
}
