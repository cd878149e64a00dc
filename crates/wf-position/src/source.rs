//! Fix sources: the one interface behind which live GPS and route playback
//! are interchangeable.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use wf_core::Fix;

/// Anything that yields a stream of fixes.
///
/// `next_fix` must be cancel-safe: a session polls it inside `select!` and
/// may drop the future before it completes.  `None` means the source has
/// ended and will not yield again.
#[async_trait]
pub trait FixSource: Send {
    async fn next_fix(&mut self) -> Option<Fix>;
}

/// The platform location feed.
///
/// A session suspends its live source while simulated playback runs and
/// resumes it afterwards; the two are never consumed together.
pub trait LiveLocationSource: FixSource {
    fn suspend(&mut self);
    fn resume(&mut self);
    fn is_active(&self) -> bool;
}

// ── ChannelLocationSource ─────────────────────────────────────────────────────

/// Live fixes pushed by a platform adapter through an `mpsc` channel.
///
/// Fixes received while suspended are dropped, and so is any fix whose
/// timestamp does not advance past the last one delivered.
#[derive(Debug)]
pub struct ChannelLocationSource {
    rx:             mpsc::Receiver<Fix>,
    active:         bool,
    last_timestamp: Option<f64>,
}

impl ChannelLocationSource {
    /// A source and the sender a platform adapter feeds it through.
    pub fn new(capacity: usize) -> (mpsc::Sender<Fix>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self { rx, active: true, last_timestamp: None })
    }

    fn accepts(&self, fix: &Fix) -> bool {
        self.last_timestamp.is_none_or(|last| fix.timestamp_secs > last)
    }
}

#[async_trait]
impl FixSource for ChannelLocationSource {
    async fn next_fix(&mut self) -> Option<Fix> {
        loop {
            let fix = self.rx.recv().await?;
            if !self.active {
                continue;
            }
            if !self.accepts(&fix) {
                debug!(ts = fix.timestamp_secs, "dropping out-of-order live fix");
                continue;
            }
            self.last_timestamp = Some(fix.timestamp_secs);
            return Some(fix);
        }
    }
}

impl LiveLocationSource for ChannelLocationSource {
    fn suspend(&mut self) {
        self.active = false;
    }

    fn resume(&mut self) {
        let mut dropped = 0usize;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "discarded live fixes buffered while suspended");
        }
        self.active = true;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ── IdleLocationSource ────────────────────────────────────────────────────────

/// A live source with no hardware behind it.  Never yields.
#[derive(Clone, Copy, Debug)]
pub struct IdleLocationSource {
    active: bool,
}

impl Default for IdleLocationSource {
    fn default() -> Self {
        Self { active: true }
    }
}

#[async_trait]
impl FixSource for IdleLocationSource {
    async fn next_fix(&mut self) -> Option<Fix> {
        std::future::pending().await
    }
}

impl LiveLocationSource for IdleLocationSource {
    fn suspend(&mut self) {
        self.active = false;
    }

    fn resume(&mut self) {
        self.active = true;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
