//! Synchronous line driver.
//!
//! Reads one request per line, feeds it through a single [`Session`], and
//! writes the responses. Terminal results are committed to the score book
//! before the `result` line goes out.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{GameResult, Rules, Seed, Session, Turn, TurnReport};
use crate::protocol::{parse_request, ErrorCode, Observation, Request, Response};
use crate::store::{KeyValue, ScoreBook};
use crate::types::Mode;

pub struct Driver<R: Rules, K: KeyValue> {
    session: Session<R>,
    book: ScoreBook<K>,
    default_mode: Mode,
    seq: u64,
}

impl<R, K> Driver<R, K>
where
    R: Rules,
    R::State: Serialize,
    R::Move: DeserializeOwned,
    K: KeyValue,
{
    pub fn new(rules: R, book: ScoreBook<K>, default_mode: Mode) -> Self {
        Self {
            session: Session::new(rules),
            book,
            default_mode,
            seq: 0,
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn book(&self) -> &ScoreBook<K> {
        &self.book
    }

    /// Start a session and return the opening observation line.
    pub fn start(&mut self, seed: Seed) -> Result<Vec<String>> {
        self.session.start(seed);
        Ok(vec![self.observation(None)?])
    }

    /// Handle one request line; returns the response lines in order.
    pub fn handle_line(&mut self, line: &str) -> Result<Vec<String>> {
        let request = match parse_request::<R::Move>(line) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "malformed request");
                return Ok(vec![self.error(ErrorCode::MalformedRequest, e.to_string())?]);
            }
        };

        match request {
            Request::Start { seed, mode } => {
                let mode = mode.unwrap_or(self.default_mode);
                let seed = match seed {
                    Some(value) => Seed::custom(value, mode),
                    None => Seed::for_mode(mode),
                };
                self.start(seed)
            }
            Request::Move { mv } => match self.session.play(mv) {
                Turn::Rejected(reason) => {
                    let seq = self.next_seq();
                    Ok(vec![encode::<R::State>(&Response::Rejected { seq, reason })?])
                }
                Turn::Committed(report) => Ok(vec![self.observation(Some(report))?]),
                Turn::Ended { report, result } => {
                    let mut lines = vec![self.observation(Some(report))?];
                    lines.extend(self.finish(&result)?);
                    Ok(lines)
                }
            },
            Request::Undo => {
                if self.session.undo() {
                    Ok(vec![self.observation(None)?])
                } else {
                    Ok(vec![self.error(ErrorCode::NothingToUndo, "nothing to undo".to_string())?])
                }
            }
            Request::Share => match self.session.share() {
                Some(text) => {
                    let seq = self.next_seq();
                    Ok(vec![encode::<R::State>(&Response::Share { seq, text })?])
                }
                None => Ok(vec![self.error(ErrorCode::NotStarted, "no session started".to_string())?]),
            },
            Request::Observe => Ok(vec![self.observation(None)?]),
        }
    }

    /// Pump requests from `input` until end of stream.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read request line")?;
            if line.trim().is_empty() {
                continue;
            }
            let responses = self.handle_line(&line)?;
            write_lines(&responses, &mut output)?;
        }
        Ok(())
    }

    fn finish(&mut self, result: &GameResult) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(2);
        let new_best = match self.book.commit(result) {
            Ok(new_best) => new_best,
            Err(e) => {
                warn!(game = result.game.as_str(), error = %e, "failed to save best score");
                lines.push(self.error(ErrorCode::StoreFailed, e.to_string())?);
                false
            }
        };
        let seq = self.next_seq();
        lines.push(encode::<R::State>(&Response::Result {
            seq,
            result,
            new_best,
        })?);
        Ok(lines)
    }

    fn observation(&mut self, last: Option<TurnReport>) -> Result<String> {
        let seq = self.next_seq();
        let session = &self.session;
        let seed = session.seed();
        let observation = Observation {
            game: session.rules().game(),
            seed: seed.map(|s| s.as_str()),
            mode: seed.map(|s| s.mode()),
            phase: session.phase(),
            turn: session.turn(),
            score: session.score(),
            best_chain: session.best_chain(),
            undo_depth: session.undo_depth(),
            headline: session.headline(),
            last,
            state: session.state(),
        };
        encode(&Response::Observation { seq, observation })
    }

    fn error(&mut self, code: ErrorCode, message: String) -> Result<String> {
        let seq = self.next_seq();
        encode::<R::State>(&Response::Error { seq, code, message })
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

/// Write response lines and flush.
pub fn write_lines<O: Write>(lines: &[String], mut output: O) -> Result<()> {
    for line in lines {
        writeln!(output, "{line}").context("failed to write response")?;
    }
    output.flush().context("failed to flush output")?;
    Ok(())
}

fn encode<S: Serialize>(response: &Response<'_, S>) -> Result<String> {
    serde_json::to_string(response).context("failed to encode response")
}
