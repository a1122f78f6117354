//! Archive classification

use tracing::debug;

use super::instruction::ClassificationResult;
use super::predicate::ContentPredicate;
use crate::game::GameDescriptor;

/// Decides whether an archive is installable content for one game
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    game: GameDescriptor,
    predicate: ContentPredicate,
}

impl ContentClassifier {
    pub fn new(game: GameDescriptor, predicate: ContentPredicate) -> Self {
        Self { game, predicate }
    }

    /// Classify an archive listing for the requested game
    ///
    /// Supported only when the game id matches and at least one entry is
    /// content; under `AcceptAll` that is any non-empty listing. No
    /// companion files are ever required.
    pub fn classify(&self, entries: &[String], requested_game_id: &str) -> ClassificationResult {
        if !self.game.matches(requested_game_id) {
            debug!("Rejecting archive for foreign game '{}'", requested_game_id);
            return ClassificationResult::unsupported();
        }

        if entries.iter().any(|e| self.predicate.matches(e)) {
            ClassificationResult::supported()
        } else {
            debug!("No content entries among {} archive entries", entries.len());
            ClassificationResult::unsupported()
        }
    }
}
