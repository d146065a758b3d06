//! Fire-and-forget score submission.
//!
//! The loop driver hands finished scores to a `ScoreSink` and moves on; the
//! outcome comes back later as a `Notice` for the presentation layer.  A
//! failed submission never touches the simulation.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use super::{NewScore, ScoreRecord, ScoreStore, StoreError};

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    ScoreSaved(ScoreRecord),
    SubmitFailed(String),
}

pub trait ScoreSink {
    /// Queue a submission.  Must not block the caller on the store.
    fn submit(&mut self, score: NewScore);
    /// Outcomes that arrived since the last call.
    fn drain(&mut self) -> Vec<Notice>;
}

/// Discards every submission.  For runs with nowhere to record scores.
#[derive(Debug, Default)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn submit(&mut self, score: NewScore) {
        log::debug!("score {} discarded (no store)", score.score);
    }

    fn drain(&mut self) -> Vec<Notice> {
        Vec::new()
    }
}

/// Submits on a dedicated worker thread that shares the store through a
/// mutex, so ticks never wait on disk I/O.
pub struct BackgroundSubmitter {
    jobs: Option<mpsc::Sender<NewScore>>,
    results: mpsc::Receiver<Notice>,
    worker: Option<thread::JoinHandle<()>>,
    local: Vec<Notice>,
}

impl BackgroundSubmitter {
    pub fn spawn<S>(store: Arc<Mutex<S>>) -> Self
    where
        S: ScoreStore + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<NewScore>();
        let (notice_tx, notice_rx) = mpsc::channel::<Notice>();

        let worker = thread::spawn(move || {
            for job in job_rx {
                let outcome = match store.lock() {
                    Ok(mut store) => store.submit_score(job),
                    Err(_) => Err(StoreError::Poisoned),
                };
                let notice = match outcome {
                    Ok(record) => {
                        log::info!("score {} saved as #{}", record.score, record.id);
                        Notice::ScoreSaved(record)
                    }
                    Err(e) => {
                        log::warn!("score submission failed: {}", e);
                        Notice::SubmitFailed(e.to_string())
                    }
                };
                if notice_tx.send(notice).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
        });

        BackgroundSubmitter {
            jobs: Some(job_tx),
            results: notice_rx,
            worker: Some(worker),
            local: Vec::new(),
        }
    }

    /// Wait for every queued submission to finish and return all outcomes
    /// not yet drained.
    pub fn finish(mut self) -> Vec<Notice> {
        self.shutdown();
        self.drain()
    }

    fn shutdown(&mut self) {
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("score worker panicked");
            }
        }
    }
}

impl ScoreSink for BackgroundSubmitter {
    fn submit(&mut self, score: NewScore) {
        let sent = self.jobs.as_ref().map(|tx| tx.send(score));
        if !matches!(sent, Some(Ok(()))) {
            log::warn!("score worker unavailable");
            self.local
                .push(Notice::SubmitFailed("score worker unavailable".to_string()));
        }
    }

    fn drain(&mut self) -> Vec<Notice> {
        let mut notices = std::mem::take(&mut self.local);
        notices.extend(self.results.try_iter());
        notices
    }
}

impl Drop for BackgroundSubmitter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
