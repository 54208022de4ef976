//! Coalesced preview scheduling
//!
//! A full-resolution pipeline run is O(W*H) and interactive slider drags can
//! fire many edits per second, so rapid submissions are coalesced: each
//! submission bumps a generation token, the worker waits out a short
//! quiescence window draining the queue to the newest job, and any result
//! whose generation is stale by completion time is discarded. Supersession
//! stands in for true cancellation.
//!
//! [`process_image`](crate::pipeline::process_image) stays directly callable
//! for zero-latency paths like comparison dragging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::error::RevelaError;
use crate::models::EditDescriptor;
use crate::pipeline::{process_image, PixelBuffer};
use crate::verbose_println;

/// Window a submission waits for further edits before rendering.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(50);

struct ScheduledJob {
    generation: u64,
    source: Arc<PixelBuffer>,
    edit: EditDescriptor,
}

/// A rendered preview tagged with the generation that produced it.
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub generation: u64,
    pub buffer: PixelBuffer,
}

/// Background preview renderer with latest-wins semantics.
///
/// Dropping the scheduler disconnects the submit channel and the worker
/// thread exits after its current job.
pub struct PreviewScheduler {
    next_generation: AtomicU64,
    latest_generation: Arc<AtomicU64>,
    submit_tx: mpsc::Sender<ScheduledJob>,
    result_rx: Mutex<mpsc::Receiver<PreviewFrame>>,
}

impl PreviewScheduler {
    pub fn new() -> Self {
        Self::with_quiescence(DEFAULT_QUIESCENCE)
    }

    pub fn with_quiescence(window: Duration) -> Self {
        let (submit_tx, submit_rx) = mpsc::channel::<ScheduledJob>();
        let (result_tx, result_rx) = mpsc::channel::<PreviewFrame>();
        let latest_generation = Arc::new(AtomicU64::new(0));

        spawn_worker(submit_rx, result_tx, Arc::clone(&latest_generation), window);

        Self {
            next_generation: AtomicU64::new(0),
            latest_generation,
            submit_tx,
            result_rx: Mutex::new(result_rx),
        }
    }

    /// Queue a render. A newer submission before the quiescence window
    /// elapses replaces this one rather than queueing behind it.
    pub fn submit(
        &self,
        source: Arc<PixelBuffer>,
        edit: EditDescriptor,
    ) -> Result<u64, RevelaError> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest_generation.store(generation, Ordering::SeqCst);
        self.submit_tx
            .send(ScheduledJob {
                generation,
                source,
                edit,
            })
            .map_err(|e| RevelaError::SchedulerUnavailable(format!("preview worker gone: {}", e)))?;
        Ok(generation)
    }

    /// Non-blocking poll. When several frames are waiting only the newest
    /// is returned; the rest are superseded.
    pub fn try_receive(&self) -> Result<Option<PreviewFrame>, RevelaError> {
        let receiver = self
            .result_rx
            .lock()
            .map_err(|_| RevelaError::SchedulerUnavailable("preview result lock poisoned".into()))?;

        let first = match receiver.try_recv() {
            Ok(frame) => frame,
            Err(mpsc::TryRecvError::Empty) => return Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => {
                return Err(RevelaError::SchedulerUnavailable(
                    "preview result channel disconnected".into(),
                ))
            }
        };

        let mut newest = first;
        while let Ok(next) = receiver.try_recv() {
            newest = next;
        }
        Ok(Some(newest))
    }
}

impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_worker(
    submit_rx: mpsc::Receiver<ScheduledJob>,
    result_tx: mpsc::Sender<PreviewFrame>,
    latest_generation: Arc<AtomicU64>,
    window: Duration,
) {
    thread::spawn(move || {
        while let Ok(mut job) = submit_rx.recv() {
            // Quiescence: keep replacing the pending job while edits are
            // still arriving inside the window
            while let Ok(next) = submit_rx.recv_timeout(window) {
                job = next;
            }

            if job.generation < latest_generation.load(Ordering::SeqCst) {
                continue;
            }

            let buffer = process_image(&job.source, &job.edit);

            // The render itself may have been outpaced
            if job.generation < latest_generation.load(Ordering::SeqCst) {
                verbose_println!("[DEBUG] discarding stale preview gen {}", job.generation);
                continue;
            }

            let frame = PreviewFrame {
                generation: job.generation,
                buffer,
            };
            if result_tx.send(frame).is_err() {
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(value: u8) -> Arc<PixelBuffer> {
        let mut data = vec![value; 8 * 8 * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Arc::new(PixelBuffer::new(8, 8, data).unwrap())
    }

    fn wait_for_frame(scheduler: &PreviewScheduler) -> PreviewFrame {
        for _ in 0..200 {
            if let Some(frame) = scheduler.try_receive().unwrap() {
                return frame;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("no preview frame within 2s");
    }

    #[test]
    fn test_single_submission_renders() {
        let scheduler = PreviewScheduler::with_quiescence(Duration::from_millis(5));
        let source = gray(128);
        let mut edit = EditDescriptor::default();
        edit.exposure = 1.0;

        let generation = scheduler.submit(source, edit).unwrap();
        let frame = wait_for_frame(&scheduler);

        assert_eq!(frame.generation, generation);
        assert_eq!(frame.buffer.pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_burst_yields_only_newest_generation() {
        let scheduler = PreviewScheduler::with_quiescence(Duration::from_millis(20));
        let source = gray(100);

        let mut last_generation = 0;
        for i in 0..10 {
            let mut edit = EditDescriptor::default();
            edit.contrast = i as f32 * 10.0;
            last_generation = scheduler.submit(Arc::clone(&source), edit).unwrap();
        }

        let frame = wait_for_frame(&scheduler);
        assert_eq!(frame.generation, last_generation);
        // Nothing older queued behind it
        thread::sleep(Duration::from_millis(100));
        assert!(scheduler.try_receive().unwrap().is_none());
    }

    #[test]
    fn test_poll_drains_to_newest() {
        let scheduler = PreviewScheduler::with_quiescence(Duration::from_millis(1));
        let source = gray(60);

        // Spaced-out submissions so each renders individually
        let mut last_generation = 0;
        for _ in 0..3 {
            last_generation = scheduler
                .submit(Arc::clone(&source), EditDescriptor::default())
                .unwrap();
            thread::sleep(Duration::from_millis(40));
        }

        let frame = wait_for_frame(&scheduler);
        assert_eq!(frame.generation, last_generation);
    }
}
