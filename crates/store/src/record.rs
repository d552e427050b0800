//! Best-score records and the monotonic write contract.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::GameResult;
use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValue;
use crate::types::{GameId, Mode, Outcome};

/// Persisted per-game record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BestRecord {
    pub best_score: u32,
    pub last_daily_seed: String,
    pub last_daily_score: u32,
    /// Win or lose of the last daily session; only games with those endings set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_daily_outcome: Option<Outcome>,
}

impl BestRecord {
    /// Fold `result` into the record.
    ///
    /// `best_score` only rises, and only on a strictly greater score. Daily
    /// results always overwrite the last-daily fields. Returns whether a new
    /// best was set.
    pub fn absorb(&mut self, result: &GameResult) -> bool {
        let new_best = result.score > self.best_score;
        if new_best {
            self.best_score = result.score;
        }
        if result.mode == Mode::Daily {
            self.last_daily_seed = result.seed.clone();
            self.last_daily_score = result.score;
            self.last_daily_outcome = result.phase.outcome();
        }
        new_best
    }
}

/// Best-score book over any key-value backend.
#[derive(Debug, Clone)]
pub struct ScoreBook<K: KeyValue> {
    kv: K,
}

impl<K: KeyValue> ScoreBook<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    /// Load the record for `game`. Missing, unreadable, or malformed data
    /// yields the default record.
    pub fn load(&self, game: GameId) -> BestRecord {
        let key = game.storage_key();
        match self.kv.get(&key) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(key = key.as_str(), error = %e, "malformed best-score record, using default");
                BestRecord::default()
            }),
            Ok(None) => BestRecord::default(),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "unreadable best-score record, using default");
                BestRecord::default()
            }
        }
    }

    pub fn save(&mut self, game: GameId, record: &BestRecord) -> StoreResult<()> {
        let key = game.storage_key();
        let text = serde_json::to_string(record).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.kv.set(&key, &text)
    }

    /// Apply a terminal result. Returns whether it set a new best score.
    pub fn commit(&mut self, result: &GameResult) -> StoreResult<bool> {
        let before = self.load(result.game);
        let mut record = before.clone();
        let new_best = record.absorb(result);

        if record != before {
            self.save(result.game, &record)?;
        }
        if new_best {
            info!(
                game = result.game.as_str(),
                score = result.score,
                previous = before.best_score,
                "new best score"
            );
        }
        Ok(new_best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use crate::types::Phase;

    fn result(game: GameId, mode: Mode, score: u32, phase: Phase) -> GameResult {
        GameResult {
            game,
            seed: match mode {
                Mode::Daily => "2024-03-09".to_string(),
                Mode::Practice => "practice-1".to_string(),
            },
            mode,
            phase,
            score,
            turn: 10,
            best_chain: 1,
            share: String::new(),
        }
    }

    #[test]
    fn test_best_only_rises_strictly() {
        let mut book = ScoreBook::new(MemoryKv::new());
        assert!(book.commit(&result(GameId::Tiles, Mode::Practice, 50, Phase::GameOver)).unwrap());
        assert!(!book.commit(&result(GameId::Tiles, Mode::Practice, 50, Phase::GameOver)).unwrap());
        assert!(!book.commit(&result(GameId::Tiles, Mode::Practice, 20, Phase::GameOver)).unwrap());
        assert_eq!(book.load(GameId::Tiles).best_score, 50);
    }

    #[test]
    fn test_daily_fields_always_overwrite() {
        let mut book = ScoreBook::new(MemoryKv::new());
        book.commit(&result(GameId::Stacker, Mode::Daily, 90, Phase::GameOver)).unwrap();
        book.commit(&result(GameId::Stacker, Mode::Daily, 30, Phase::GameOver)).unwrap();

        let record = book.load(GameId::Stacker);
        assert_eq!(record.best_score, 90);
        assert_eq!(record.last_daily_score, 30);
        assert_eq!(record.last_daily_seed, "2024-03-09");
        assert_eq!(record.last_daily_outcome, None);
    }

    #[test]
    fn test_practice_leaves_daily_fields() {
        let mut book = ScoreBook::new(MemoryKv::new());
        book.commit(&result(GameId::Ribbon, Mode::Practice, 70, Phase::GameOver)).unwrap();
        let record = book.load(GameId::Ribbon);
        assert_eq!(record.best_score, 70);
        assert_eq!(record.last_daily_seed, "");
        assert_eq!(record.last_daily_score, 0);
    }

    #[test]
    fn test_fold_records_outcome() {
        let mut book = ScoreBook::new(MemoryKv::new());
        book.commit(&result(GameId::Fold, Mode::Daily, 0, Phase::Lose)).unwrap();
        assert_eq!(book.load(GameId::Fold).last_daily_outcome, Some(Outcome::Lose));
        book.commit(&result(GameId::Fold, Mode::Daily, 260, Phase::Win)).unwrap();
        assert_eq!(book.load(GameId::Fold).last_daily_outcome, Some(Outcome::Win));
    }

    #[test]
    fn test_malformed_record_falls_back_to_default() {
        let mut kv = MemoryKv::new();
        kv.set(&GameId::Sandpile.storage_key(), "{not json").unwrap();
        let mut book = ScoreBook::new(kv);
        assert_eq!(book.load(GameId::Sandpile), BestRecord::default());

        assert!(book.commit(&result(GameId::Sandpile, Mode::Practice, 5, Phase::GameOver)).unwrap());
        assert_eq!(book.load(GameId::Sandpile).best_score, 5);
    }

    #[test]
    fn test_record_wire_shape() {
        let record = BestRecord {
            best_score: 120,
            last_daily_seed: "2024-03-09".to_string(),
            last_daily_score: 80,
            last_daily_outcome: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"bestScore":120,"lastDailySeed":"2024-03-09","lastDailyScore":80}"#
        );
        let partial: BestRecord = serde_json::from_str(r#"{"bestScore":7}"#).unwrap();
        assert_eq!(partial.best_score, 7);
        assert_eq!(partial.last_daily_seed, "");
    }
}
