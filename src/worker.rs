//! Runs computer moves on a background thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use thiserror::Error;

use crate::game::{AiDecision, AiRequest};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum WorkerError {
    /// The thread is gone, either after a request with no legal move or a panic.
    #[error("AI worker thread has stopped")]
    Disconnected,
}

/// Owns one thinking thread. Requests are answered in order.
#[derive(Debug)]
pub struct AiWorker {
    requests: Option<Sender<AiRequest>>,
    decisions: Receiver<AiDecision>,
    handle: Option<JoinHandle<()>>,
}

impl AiWorker {
    pub fn spawn() -> std::io::Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<AiRequest>();
        let (decision_tx, decision_rx) = crossbeam_channel::unbounded();

        let handle = thread::Builder::new()
            .name("ai-worker".into())
            .spawn(move || {
                for request in request_rx {
                    let (color, ply) = (request.color, request.ply);
                    log::debug!("thinking for {color} at ply {ply}");
                    let Some(decision) = request.run() else {
                        log::error!("{color} has no legal move at ply {ply}");
                        break;
                    };
                    if decision_tx.send(decision).is_err() {
                        break;
                    }
                }
                log::debug!("AI worker exiting");
            })?;

        Ok(Self {
            requests: Some(request_tx),
            decisions: decision_rx,
            handle: Some(handle),
        })
    }

    pub fn request(&self, request: AiRequest) -> Result<(), WorkerError> {
        self.requests
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(request)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Block until the next decision arrives.
    pub fn recv(&self) -> Result<AiDecision, WorkerError> {
        self.decisions.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Next decision if one is ready.
    pub fn try_recv(&self) -> Result<Option<AiDecision>, WorkerError> {
        match self.decisions.try_recv() {
            Ok(decision) => Ok(Some(decision)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the thread's loop
        self.requests.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("AI worker thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiConfiguration, AiPlayer, Difficulty};
    use crate::game::Game;
    use crate::player::PlayerKind;

    fn computer(seed: u64) -> PlayerKind {
        PlayerKind::computer(AiPlayer::with_seed(AiConfiguration::new(Difficulty::Easy), seed))
    }

    #[test]
    fn test_worker_answers_request() {
        let worker = AiWorker::spawn().unwrap();
        let mut game = Game::new(computer(11), PlayerKind::Human);

        worker.request(game.ai_request().unwrap()).unwrap();
        let decision = worker.recv().unwrap();

        assert_eq!(decision.ply, 0);
        assert_eq!(game.apply_ai_decision(decision), Ok(()));
        assert_eq!(worker.try_recv(), Ok(None));
    }

    #[test]
    fn test_drop_joins_thread() {
        let worker = AiWorker::spawn().unwrap();
        drop(worker);
    }
}
