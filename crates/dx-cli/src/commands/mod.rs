pub mod roll;
pub mod simulate;

use rand::SeedableRng;
use rand::rngs::StdRng;

use dx_mechanics::CheckRequest;

use crate::parse::parse_check;

/// Parse a check command, turning the error into a printable message.
fn parse(command: &str) -> Result<CheckRequest, String> {
    parse_check(command).map_err(|e| e.to_string())
}

/// Seeded RNG if a seed was given, otherwise one drawn from OS entropy.
fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
