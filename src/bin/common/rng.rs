use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded when `--seed` is given so a run can be reproduced.
pub fn simulation_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
