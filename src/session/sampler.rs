use rand::{
    seq::SliceRandom,
    Rng,
};
use tracing::debug;

use crate::core::{
    Difficulty,
    KanjiRecord,
    SessionConfig,
    StudyMode,
};

/// Produce the ordered working set for a session: mode-dependent filter,
/// uniform shuffle, truncate to the requested count. A pool smaller than the
/// request comes back whole (shuffled) - no padding, no repetition.
pub fn sample<R: Rng + ?Sized>(
    candidates: Vec<KanjiRecord>,
    config: &SessionConfig,
    rng: &mut R,
) -> Vec<KanjiRecord> {
    let mut pool = match (config.mode, config.difficulty) {
        (StudyMode::Frequency, Difficulty::Top(band)) => {
            frequency_band(candidates, band as usize)
        }
        // Jouyou and JLPT lists are already difficulty-scoped by the fetch.
        _ => candidates,
    };

    pool.shuffle(rng);
    pool.truncate(config.requested_count);

    debug!(
        selected = pool.len(),
        requested = config.requested_count,
        difficulty = %config.difficulty,
        "sampled session cards"
    );
    pool
}

/// The `band` most frequent kanji, most frequent first before shuffling.
/// Records without a rank never enter a band.
fn frequency_band(candidates: Vec<KanjiRecord>, band: usize) -> Vec<KanjiRecord> {
    let mut ranked: Vec<KanjiRecord> =
        candidates.into_iter().filter(|record| record.frequency_rank.is_some()).collect();
    ranked.sort_by_key(|record| record.frequency_rank.unwrap_or(u32::MAX));
    ranked.truncate(band);
    ranked
}
