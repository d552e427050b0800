//! Best-score persistence through the JSON file backend.

use std::fs;

use cascade_arcade::core::GameResult;
use cascade_arcade::store::{BestRecord, FileKv, KeyValue, ScoreBook};
use cascade_arcade::types::{GameId, Mode, Outcome, Phase};

fn result(game: GameId, mode: Mode, seed: &str, score: u32, phase: Phase) -> GameResult {
    GameResult {
        game,
        seed: seed.to_string(),
        mode,
        phase,
        score,
        turn: 12,
        best_chain: 2,
        share: String::new(),
    }
}

#[test]
fn test_records_survive_a_new_book() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut book = ScoreBook::new(FileKv::new(tmp.path()));
        let new_best = book
            .commit(&result(GameId::Stacker, Mode::Daily, "2024-03-09", 140, Phase::GameOver))
            .unwrap();
        assert!(new_best);
    }

    let book = ScoreBook::new(FileKv::new(tmp.path()));
    let record = book.load(GameId::Stacker);
    assert_eq!(record.best_score, 140);
    assert_eq!(record.last_daily_seed, "2024-03-09");
    assert_eq!(record.last_daily_score, 140);
    assert_eq!(book.load(GameId::Tiles), BestRecord::default());
}

#[test]
fn test_record_file_is_keyed_per_game() {
    let tmp = tempfile::tempdir().unwrap();
    let mut book = ScoreBook::new(FileKv::new(tmp.path()));
    book.commit(&result(GameId::Ribbon, Mode::Practice, "practice-1", 45, Phase::GameOver))
        .unwrap();

    let kv = book.into_inner();
    assert_eq!(kv.dir(), tmp.path());
    let path = kv.dir().join("cascade-arcade.ribbon.best.json");
    let text = fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["bestScore"], 45);
    assert_eq!(json["lastDailySeed"], "");
}

#[test]
fn test_lower_daily_score_keeps_best_but_updates_daily() {
    let tmp = tempfile::tempdir().unwrap();
    let mut book = ScoreBook::new(FileKv::new(tmp.path()));
    book.commit(&result(GameId::Sandpile, Mode::Daily, "2024-03-09", 300, Phase::GameOver))
        .unwrap();
    let new_best = book
        .commit(&result(GameId::Sandpile, Mode::Daily, "2024-03-10", 120, Phase::GameOver))
        .unwrap();
    assert!(!new_best);

    let record = book.load(GameId::Sandpile);
    assert_eq!(record.best_score, 300);
    assert_eq!(record.last_daily_seed, "2024-03-10");
    assert_eq!(record.last_daily_score, 120);
}

#[test]
fn test_repeated_commit_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let mut book = ScoreBook::new(FileKv::new(tmp.path()));
    let won = result(GameId::Fold, Mode::Daily, "2024-03-09", 260, Phase::Win);

    assert!(book.commit(&won).unwrap());
    let first = book.load(GameId::Fold);
    assert!(!book.commit(&won).unwrap());
    assert_eq!(book.load(GameId::Fold), first);
    assert_eq!(first.last_daily_outcome, Some(Outcome::Win));
}

#[test]
fn test_corrupt_file_reads_as_default() {
    let tmp = tempfile::tempdir().unwrap();
    let mut kv = FileKv::new(tmp.path());
    kv.set(&GameId::Collider.storage_key(), "[1, 2").unwrap();

    let mut book = ScoreBook::new(kv);
    assert_eq!(book.load(GameId::Collider), BestRecord::default());

    book.commit(&result(GameId::Collider, Mode::Practice, "practice-2", 30, Phase::GameOver))
        .unwrap();
    assert_eq!(book.load(GameId::Collider).best_score, 30);
}
