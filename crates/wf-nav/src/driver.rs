//! Actor driver: runs a [`NavSession`] on its own task.
//!
//! ```text
//!   SessionHandle ──mpsc Command──►┐
//!                                  │   select! (biased)
//!   resolution task ──JoinHandle──►├──► ① command     → session command, oneshot reply
//!                                  │    ② resolution  → apply_resolution, reply to caller
//!   SimulatedSource / live ───────►┘    ③ fix         → apply_fix
//! ```
//!
//! The select loop is the session's only consumption point, so commands,
//! finished resolutions, and fixes are applied one at a time.  A route race
//! runs on a spawned task holding only the resolver; when a newer
//! `resolve_routes` arrives the outstanding race is cancelled through its
//! `CancellationToken` and its caller receives `NavError::Superseded`.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use wf_core::{BaseRoutes, Coordinate, OptionId, TransportMode};
use wf_heading::AlignmentEvent;
use wf_options::{RouteOption, RouteOptionSet};
use wf_routing::DirectionsProvider;

use crate::{NavError, NavObserver, NavResult, NavSession, RouteRequest, SessionSnapshot};

type Reply<T> = oneshot::Sender<T>;

enum Command {
    Resolve {
        start: Coordinate,
        end:   Coordinate,
        modes: Vec<TransportMode>,
        reply: Reply<NavResult<RouteOptionSet>>,
    },
    Select {
        id:    OptionId,
        reply: Reply<NavResult<RouteOption>>,
    },
    SelectMode {
        mode:  TransportMode,
        reply: Reply<NavResult<Option<RouteOption>>>,
    },
    StartSimulation {
        /// `None` plays back the selected option.
        polyline:         Option<Vec<Coordinate>>,
        speed_multiplier: f64,
        reply:            Reply<NavResult<()>>,
    },
    StopSimulation {
        reply: Reply<bool>,
    },
    SetTarget {
        target: Option<Coordinate>,
        reply:  Reply<NavResult<()>>,
    },
    ObserveHeading {
        heading_deg: f64,
        reply:       Reply<Option<AlignmentEvent>>,
    },
    Snapshot {
        reply: Reply<SessionSnapshot>,
    },
    Shutdown,
}

struct PendingResolution {
    request: RouteRequest,
    cancel:  CancellationToken,
    reply:   Reply<NavResult<RouteOptionSet>>,
    task:    JoinHandle<NavResult<Option<BaseRoutes>>>,
}

// ── Handle ────────────────────────────────────────────────────────────────────

/// Cloneable handle to a session running under [`spawn_session`].
///
/// Every method fails with `NavError::SessionClosed` once the session task
/// has stopped.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    async fn call<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> NavResult<T> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).await.map_err(|_| NavError::SessionClosed)?;
        rx.await.map_err(|_| NavError::SessionClosed)
    }

    /// Resolve routes and return the new option set.  Resolves with
    /// `Superseded` if another `resolve_routes` arrives first.
    pub async fn resolve_routes(
        &self,
        start: Coordinate,
        end:   Coordinate,
        modes: &[TransportMode],
    ) -> NavResult<RouteOptionSet> {
        let modes = modes.to_vec();
        self.call(|reply| Command::Resolve { start, end, modes, reply }).await?
    }

    pub async fn select_option(&self, id: OptionId) -> NavResult<RouteOption> {
        self.call(|reply| Command::Select { id, reply }).await?
    }

    pub async fn select_mode(&self, mode: TransportMode) -> NavResult<Option<RouteOption>> {
        self.call(|reply| Command::SelectMode { mode, reply }).await?
    }

    pub async fn start_simulation(&self, polyline: Vec<Coordinate>, speed_multiplier: f64) -> NavResult<()> {
        self.call(|reply| Command::StartSimulation { polyline: Some(polyline), speed_multiplier, reply })
            .await?
    }

    /// Play back the currently selected option.
    pub async fn simulate_selected(&self, speed_multiplier: f64) -> NavResult<()> {
        self.call(|reply| Command::StartSimulation { polyline: None, speed_multiplier, reply })
            .await?
    }

    pub async fn stop_simulation(&self) -> NavResult<bool> {
        self.call(|reply| Command::StopSimulation { reply }).await
    }

    pub async fn set_target(&self, target: Option<Coordinate>) -> NavResult<()> {
        self.call(|reply| Command::SetTarget { target, reply }).await?
    }

    pub async fn observe_heading(&self, heading_deg: f64) -> NavResult<Option<AlignmentEvent>> {
        self.call(|reply| Command::ObserveHeading { heading_deg, reply }).await
    }

    pub async fn snapshot(&self) -> NavResult<SessionSnapshot> {
        self.call(|reply| Command::Snapshot { reply }).await
    }

    /// Ask the session task to stop.  Pending resolutions are cancelled.
    pub async fn shutdown(&self) -> NavResult<()> {
        self.tx.send(Command::Shutdown).await.map_err(|_| NavError::SessionClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Move `session` onto a new tokio task and return a handle to it.
///
/// The task ends when [`SessionHandle::shutdown`] is called or every handle
/// has been dropped.
pub fn spawn_session<P, O>(session: NavSession<P, O>) -> SessionHandle
where
    P: DirectionsProvider + 'static,
    O: NavObserver + 'static,
{
    let (tx, rx) = mpsc::channel(session.config().event_capacity);
    tokio::spawn(run(session, rx));
    SessionHandle { tx }
}

async fn run<P, O>(mut session: NavSession<P, O>, mut rx: mpsc::Receiver<Command>)
where
    P: DirectionsProvider + 'static,
    O: NavObserver + 'static,
{
    let mut pending: Option<PendingResolution> = None;
    let mut fixes_open = true;

    loop {
        tokio::select! {
            biased;

            cmd = rx.recv() => {
                match cmd {
                    None | Some(Command::Shutdown) => break,
                    Some(cmd) => handle_command(&mut session, cmd, &mut pending),
                }
                // A command may have started playback.
                fixes_open = true;
            }
            joined = wait_resolution(&mut pending), if pending.is_some() => {
                if let Some(p) = pending.take() {
                    let outcome = match joined {
                        Ok(Ok(Some(bases))) => session.apply_resolution(&p.request, bases).cloned(),
                        Ok(Ok(None)) => Err(NavError::Superseded(p.request.id)),
                        Ok(Err(e)) => Err(e),
                        Err(e) => Err(NavError::TaskFailed(e.to_string())),
                    };
                    let _ = p.reply.send(outcome);
                }
            }
            fix = session.next_fix(), if fixes_open => {
                match fix {
                    Some((fix, origin)) => {
                        session.apply_fix(fix, origin);
                    }
                    None => fixes_open = false,
                }
            }
        }
    }

    if let Some(p) = pending.take() {
        p.cancel.cancel();
        let _ = p.reply.send(Err(NavError::SessionClosed));
    }
    session.stop_simulation();
    debug!("navigation session task finished");
}

async fn wait_resolution(
    pending: &mut Option<PendingResolution>,
) -> Result<NavResult<Option<BaseRoutes>>, tokio::task::JoinError> {
    match pending {
        Some(p) => (&mut p.task).await,
        None => std::future::pending().await,
    }
}

fn handle_command<P, O>(
    session: &mut NavSession<P, O>,
    cmd:     Command,
    pending: &mut Option<PendingResolution>,
) where
    P: DirectionsProvider + 'static,
    O: NavObserver + 'static,
{
    // A dropped reply receiver means the caller gave up; nothing to do.
    match cmd {
        Command::Resolve { start, end, modes, reply } => {
            let request = match session.begin_resolution(start, end, &modes) {
                Ok(r) => r,
                Err(e) => {
                    let _ = reply.send(Err(e));
                    return;
                }
            };
            if let Some(previous) = pending.take() {
                debug!(superseded = %previous.request.id, by = %request.id, "cancelling outstanding route race");
                previous.cancel.cancel();
                let _ = previous.reply.send(Err(NavError::Superseded(previous.request.id)));
            }

            let cancel = CancellationToken::new();
            let resolver = session.resolver();
            let task = tokio::spawn({
                let request = request.clone();
                let cancel = cancel.clone();
                async move { request.resolve(&*resolver, &cancel).await }
            });
            *pending = Some(PendingResolution { request, cancel, reply, task });
        }
        Command::Select { id, reply } => {
            let _ = reply.send(session.select_option(id).cloned());
        }
        Command::SelectMode { mode, reply } => {
            let _ = reply.send(session.select_mode(mode).map(|o| o.cloned()));
        }
        Command::StartSimulation { polyline, speed_multiplier, reply } => {
            let result = match polyline {
                Some(p) => session.start_simulation(p, speed_multiplier),
                None => session.simulate_selected(speed_multiplier),
            };
            let _ = reply.send(result);
        }
        Command::StopSimulation { reply } => {
            let _ = reply.send(session.stop_simulation());
        }
        Command::SetTarget { target, reply } => {
            let _ = reply.send(session.set_target(target));
        }
        Command::ObserveHeading { heading_deg, reply } => {
            let _ = reply.send(session.observe_heading(heading_deg));
        }
        Command::Snapshot { reply } => {
            let _ = reply.send(session.snapshot());
        }
        Command::Shutdown => {}
    }
}
