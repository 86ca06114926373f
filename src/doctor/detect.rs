//! Concurrent detection.
//!
//! Probes run on a bounded pool of scoped threads. Workers claim ailment
//! indices from a shared counter, so at most `concurrency` probes are in
//! flight, and send results back keyed by index. The caller receives them
//! in the order the ailments were given regardless of completion order.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use crate::ailments::{Ailment, AilmentId};
use crate::error::RemedyError;

use super::ProjectContext;

/// Result of probing one ailment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The ailment applies to the project.
    Applicable,
    /// The ailment does not apply.
    NotApplicable,
    /// The probe failed; the cause is kept for the report.
    Unknown(String),
}

impl Detection {
    /// Whether the ailment applies.
    pub fn applies(&self) -> bool {
        matches!(self, Detection::Applicable)
    }
}

/// Cooperative cancellation shared between the caller and workers.
///
/// Cancelling stops workers from starting new probes and stops treatment
/// at the next step boundary. Probes already running finish, but their
/// results are discarded.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Probe a single ailment, converting errors and panics into
/// [`Detection::Unknown`].
pub fn detect_one(ailment: &dyn Ailment, ctx: &ProjectContext) -> Detection {
    let id = ailment.id();
    match panic::catch_unwind(AssertUnwindSafe(|| ailment.detect(ctx))) {
        Ok(Ok(true)) => {
            tracing::debug!("{}: applicable", id);
            Detection::Applicable
        }
        Ok(Ok(false)) => {
            tracing::debug!("{}: not applicable", id);
            Detection::NotApplicable
        }
        Ok(Err(e)) => unknown(&id, format!("{:#}", e)),
        Err(payload) => unknown(
            &id,
            format!("probe panicked: {}", panic_message(payload.as_ref())),
        ),
    }
}

/// Log a failed probe against its ailment and keep the cause as data.
fn unknown(id: &AilmentId, message: String) -> Detection {
    let err = RemedyError::ProbeFailed {
        ailment: id.to_string(),
        message: message.clone(),
    };
    tracing::warn!("{}", err);
    Detection::Unknown(message)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Probe every ailment with at most `concurrency` probes in flight.
///
/// Returns one entry per ailment, in input order. An entry is `None` only
/// if the run was cancelled before that probe completed.
pub fn detect_all(
    ailments: &[&dyn Ailment],
    ctx: &ProjectContext,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Vec<Option<Detection>> {
    let workers = concurrency.max(1).min(ailments.len());
    let mut results: Vec<Option<Detection>> = vec![None; ailments.len()];
    if workers == 0 {
        return results;
    }

    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, Detection)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                if cancel.is_cancelled() {
                    break;
                }
                let index = next.fetch_add(1, Ordering::SeqCst);
                let Some(ailment) = ailments.get(index) else {
                    break;
                };
                let detection = detect_one(*ailment, ctx);
                if tx.send((index, detection)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        for (index, detection) in rx {
            if cancel.is_cancelled() {
                continue;
            }
            results[index] = Some(detection);
        }
    });

    results
}
