//! `NavSession`: the single owner of one navigation session's state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use wf_core::{
    BaseModeClass, BaseRoutes, Coordinate, Fix, FixClock, FixOrigin, OptionId, RequestId,
    TransportMode, polyline_length, remaining_distance,
};
use wf_heading::{AlignmentEvent, HeadingAlignmentState, HeadingTracker};
use wf_options::{RouteOption, RouteOptionSet, RouteOptionSynthesizer};
use wf_position::{FixSource, LiveLocationSource, PositionStream, SimulatedSource};
use wf_routing::{DirectionsProvider, FallbackAgent, PrimaryAgent, RouteAgent, RouteResolver};

use crate::{NavConfig, NavError, NavObserver, NavResult, NoopObserver};

// ── Route requests ────────────────────────────────────────────────────────────

/// A route request the session has accepted but not yet resolved.
///
/// Only the most recently accepted request may be applied; older ones are
/// rejected with [`NavError::Superseded`].
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub id:    RequestId,
    pub start: Coordinate,
    pub end:   Coordinate,
    /// Requested modes; empty means every mode.
    pub modes: Vec<TransportMode>,
    classes:   Vec<BaseModeClass>,
}

impl RouteRequest {
    /// Base classes that must be measured to serve this request.
    pub fn classes(&self) -> &[BaseModeClass] {
        &self.classes
    }

    /// Race every needed base class.  `Ok(None)` if `cancel` fired first.
    pub async fn resolve<A: RouteAgent>(
        &self,
        resolver: &RouteResolver<A>,
        cancel:   &CancellationToken,
    ) -> NavResult<Option<BaseRoutes>> {
        Ok(resolver.resolve_bases(self.start, self.end, &self.classes, cancel).await?)
    }
}

// ── Progress / snapshot ───────────────────────────────────────────────────────

/// Where the last fix sits along the selected option.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavProgress {
    /// Polyline vertex the last fix snapped to.
    pub nearest_index: usize,
    pub remaining_m:   f64,
    /// The option's travel time scaled by the remaining share of its polyline.
    pub eta_secs:      f64,
}

/// Point-in-time copy of the observable session state.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub options:     RouteOptionSet,
    pub target:      Option<Coordinate>,
    pub last_fix:    Option<Fix>,
    pub simulating:  bool,
    pub live_active: bool,
    pub alignment:   HeadingAlignmentState,
    pub progress:    Option<NavProgress>,
}

// ── NavSession ────────────────────────────────────────────────────────────────

/// One navigation session.
///
/// Every mutation goes through a `&mut self` command, so a session driven
/// from one task (directly, or through [`spawn_session`][crate::spawn_session])
/// is never mutated concurrently.  The session holds no locks.
///
/// # Position sources
///
/// The live source and simulated playback are mutually exclusive: starting a
/// simulation suspends the live source and stopping or finishing it resumes
/// the live source.  [`next_fix`](Self::next_fix) polls whichever is active.
///
/// Create via [`NavSessionBuilder`][crate::NavSessionBuilder].
pub struct NavSession<P: DirectionsProvider, O: NavObserver = NoopObserver> {
    resolver:       Arc<RouteResolver<PrimaryAgent<P>>>,
    synthesizer:    RouteOptionSynthesizer,
    config:         NavConfig,
    options:        RouteOptionSet,
    preferred_mode: Option<TransportMode>,
    tracker:        HeadingTracker,
    target:         Option<Coordinate>,
    last_fix:       Option<Fix>,
    last_heading:   Option<f64>,
    live:           Box<dyn LiveLocationSource>,
    live_open:      bool,
    simulation:     Option<SimulatedSource>,
    next_request:   RequestId,
    latest_request: Option<RequestId>,
    next_option_id: OptionId,
    observer:       O,
}

impl<P: DirectionsProvider, O: NavObserver> NavSession<P, O> {
    pub(crate) fn new(
        provider:       P,
        config:         NavConfig,
        live:           Box<dyn LiveLocationSource>,
        observer:       O,
        preferred_mode: Option<TransportMode>,
    ) -> NavResult<Self> {
        config.validate()?;
        let fallback = FallbackAgent::new(config.speeds)?;
        let resolver = RouteResolver::with_provider(provider, fallback, config.resolver)?;
        let tracker = HeadingTracker::new(config.alignment)?;

        Ok(Self {
            resolver: Arc::new(resolver),
            synthesizer: RouteOptionSynthesizer::new(config.fares),
            config,
            options: RouteOptionSet::empty(),
            preferred_mode,
            tracker,
            target: None,
            last_fix: None,
            last_heading: None,
            live,
            live_open: true,
            simulation: None,
            next_request: RequestId(0),
            latest_request: None,
            next_option_id: OptionId(0),
            observer,
        })
    }

    // ── Route resolution ──────────────────────────────────────────────────

    /// Resolve base routes for `modes` (every mode if empty) and replace the
    /// option set.
    ///
    /// Suspends for at most the resolver deadline.  Provider failures never
    /// surface: the worst outcome is a straight-line route.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed coordinate.
    pub async fn resolve_routes(
        &mut self,
        start: Coordinate,
        end:   Coordinate,
        modes: &[TransportMode],
    ) -> NavResult<&RouteOptionSet> {
        let request = self.begin_resolution(start, end, modes)?;
        let resolver = Arc::clone(&self.resolver);
        let bases = request
            .resolve(&*resolver, &CancellationToken::new())
            .await?
            .ok_or(NavError::Superseded(request.id))?;
        self.apply_resolution(&request, bases)
    }

    /// Accept a route request and make it the only one that may be applied.
    ///
    /// The resolution itself can then run anywhere (see
    /// [`RouteRequest::resolve`]) and be handed back through
    /// [`apply_resolution`](Self::apply_resolution).
    pub fn begin_resolution(
        &mut self,
        start: Coordinate,
        end:   Coordinate,
        modes: &[TransportMode],
    ) -> NavResult<RouteRequest> {
        start.validate()?;
        end.validate()?;

        let classes = if modes.is_empty() {
            BaseModeClass::MEASURED.to_vec()
        } else {
            modes.iter().map(|m| m.base_class().route_source()).collect()
        };
        let id = self.next_request;
        self.next_request = id.next();
        self.latest_request = Some(id);

        debug!(request = %id, %start, %end, modes = modes.len(), "route request accepted");
        Ok(RouteRequest { id, start, end, modes: modes.to_vec(), classes })
    }

    /// Synthesize options from `bases` and replace the current set.
    ///
    /// # Errors
    ///
    /// `Superseded` if a newer request was accepted after `request`; the
    /// current options are left untouched.
    pub fn apply_resolution(
        &mut self,
        request: &RouteRequest,
        bases:   BaseRoutes,
    ) -> NavResult<&RouteOptionSet> {
        if self.latest_request != Some(request.id) {
            debug!(request = %request.id, "discarding superseded resolution");
            return Err(NavError::Superseded(request.id));
        }

        let preferred = self.preferred_mode.or(match request.modes.as_slice() {
            [only] => Some(*only),
            _ => None,
        });
        let set = self
            .synthesizer
            .synthesize(&bases, &request.modes, preferred, self.next_option_id);
        if !set.is_empty() {
            self.next_option_id = set.next_id();
        }
        self.options = set;

        info!(
            request = %request.id,
            options = self.options.len(),
            unavailable = self.options.unavailable().len(),
            "route options ready"
        );
        self.observer.on_options(request.id, &self.options);
        if let Some(selected) = self.options.selected() {
            self.observer.on_selection(selected);
        }
        Ok(&self.options)
    }

    /// A handle to the resolver for running requests off the session task.
    pub fn resolver(&self) -> Arc<RouteResolver<PrimaryAgent<P>>> {
        Arc::clone(&self.resolver)
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Make `id` the only selected option.
    pub fn select_option(&mut self, id: OptionId) -> NavResult<&RouteOption> {
        let option = self.options.select(id)?;
        self.observer.on_selection(option);
        Ok(option)
    }

    /// Select the option for `mode` and remember `mode` as the preference
    /// for future auto-selection.  With no options yet, only the preference
    /// is recorded.
    pub fn select_mode(&mut self, mode: TransportMode) -> NavResult<Option<&RouteOption>> {
        if self.options.is_empty() {
            self.preferred_mode = Some(mode);
            return Ok(None);
        }
        let option = self.options.select_mode(mode)?;
        self.preferred_mode = Some(mode);
        self.observer.on_selection(option);
        Ok(Some(option))
    }

    // ── Simulation ────────────────────────────────────────────────────────

    /// Play back `polyline` as simulated fixes, replacing any running
    /// playback and suspending the live source.
    ///
    /// # Errors
    ///
    /// `Position` for an empty polyline, an invalid vertex, or a bad speed
    /// multiplier.  Nothing changes on error.
    pub fn start_simulation(&mut self, polyline: Vec<Coordinate>, speed_multiplier: f64) -> NavResult<()> {
        let mut stream = PositionStream::new(polyline, speed_multiplier, self.config.playback)?;
        if let Some(h) = self.last_heading {
            stream.set_heading_hint(h);
        }

        if let Some(mut previous) = self.simulation.take() {
            previous.stop();
            self.observer.on_simulation_stopped(false);
        }
        self.live.suspend();
        self.tracker.reset();

        let points = stream.polyline().len();
        let interval = stream.tick_interval();
        self.simulation = Some(SimulatedSource::start(stream, FixClock::from_system_time()));

        info!(points, ?interval, speed_multiplier, "simulation started");
        self.observer.on_simulation_started(points, interval);
        Ok(())
    }

    /// [`start_simulation`](Self::start_simulation) over the selected
    /// option's polyline.
    pub fn simulate_selected(&mut self, speed_multiplier: f64) -> NavResult<()> {
        let polyline = self
            .options
            .selected()
            .map(|o| o.polyline.clone())
            .ok_or(NavError::NoSelection)?;
        self.start_simulation(polyline, speed_multiplier)
    }

    /// Stop playback and resume the live source.  Returns `false` if no
    /// simulation was running.
    pub fn stop_simulation(&mut self) -> bool {
        let Some(mut sim) = self.simulation.take() else {
            return false;
        };
        sim.stop();
        self.end_simulation(false);
        true
    }

    fn end_simulation(&mut self, finished: bool) {
        self.live.resume();
        self.tracker.reset();
        info!(finished, "simulation stopped");
        self.observer.on_simulation_stopped(finished);
    }

    // ── Target / heading ──────────────────────────────────────────────────

    /// Set or clear the navigation target.  Either way the alignment
    /// memory is reset.
    pub fn set_target(&mut self, target: Option<Coordinate>) -> NavResult<()> {
        if let Some(t) = target {
            t.validate()?;
        }
        self.target = target;
        self.tracker.reset();
        self.observer.on_target(target);
        Ok(())
    }

    /// Feed a compass heading.  Returns the alignment event if this sample
    /// fired one.  While a target is set but no bearing to it exists, the
    /// sample is ignored and the alignment memory is kept.
    pub fn observe_heading(&mut self, heading_deg: f64) -> Option<AlignmentEvent> {
        if !heading_deg.is_finite() {
            return None;
        }
        self.last_heading = Some(heading_deg);
        if let Some(sim) = self.simulation.as_mut() {
            sim.set_heading_hint(heading_deg);
        }
        let bearing = self.bearing_to_target();
        if self.target.is_some() && bearing.is_none() {
            // Target set but bearing undefined (no fix yet, or on the target).
            return None;
        }
        let event = self.tracker.observe(heading_deg, bearing)?;
        self.observer.on_alignment(&event);
        Some(event)
    }

    // ── Fixes ─────────────────────────────────────────────────────────────

    /// Wait for the next fix from the active source.
    ///
    /// Returns `None` once no source can produce a fix: no playback is
    /// running and the live source has closed.  Cancel-safe.
    pub async fn next_fix(&mut self) -> Option<(Fix, FixOrigin)> {
        loop {
            if let Some(sim) = self.simulation.as_mut() {
                match sim.next_fix().await {
                    Some(fix) => return Some((fix, FixOrigin::Simulated)),
                    None => {
                        self.simulation = None;
                        self.end_simulation(true);
                        continue;
                    }
                }
            }
            if !self.live_open {
                return None;
            }
            match self.live.next_fix().await {
                Some(fix) => return Some((fix, FixOrigin::Live)),
                None => {
                    debug!("live location source closed");
                    self.live_open = false;
                }
            }
        }
    }

    /// Record a fix and re-evaluate alignment.
    ///
    /// Simulated fixes supply their course as the heading; live fixes reuse
    /// the last compass heading.  A live fix that arrives while playback is
    /// running is discarded.
    pub fn apply_fix(&mut self, fix: Fix, origin: FixOrigin) -> Option<AlignmentEvent> {
        if origin == FixOrigin::Live && self.simulation.is_some() {
            debug!(ts = fix.timestamp_secs, "ignoring live fix during simulation");
            return None;
        }
        self.last_fix = Some(fix);
        self.observer.on_fix(&fix, origin);

        let heading = match origin {
            FixOrigin::Simulated => Some(fix.course_deg),
            FixOrigin::Live => self.last_heading,
        };
        heading.and_then(|h| self.observe_heading(h))
    }

    /// [`next_fix`](Self::next_fix) followed by [`apply_fix`](Self::apply_fix).
    pub async fn step(&mut self) -> Option<(Fix, Option<AlignmentEvent>)> {
        let (fix, origin) = self.next_fix().await?;
        Some((fix, self.apply_fix(fix, origin)))
    }

    // ── Derived readings ──────────────────────────────────────────────────

    /// Bearing from the last fix to the target.  `None` without both, or
    /// when the fix is on the target (the bearing is undefined there).
    pub fn bearing_to_target(&self) -> Option<f64> {
        let from = self.last_fix?.coordinate;
        let to = self.target?;
        (from.distance_m(to) > 0.0).then(|| from.bearing_to(to))
    }

    pub fn distance_to_target(&self) -> Option<f64> {
        Some(self.last_fix?.coordinate.distance_m(self.target?))
    }

    /// Progress of the last fix along the selected option.
    pub fn progress(&self) -> Option<NavProgress> {
        let option = self.options.selected()?;
        let fix = self.last_fix?;
        let rd = remaining_distance(&option.polyline, fix.coordinate)?;
        let total = polyline_length(&option.polyline);
        let share = if total > 0.0 { (rd.remaining_m / total).min(1.0) } else { 0.0 };
        Some(NavProgress {
            nearest_index: rd.nearest_index,
            remaining_m:   rd.remaining_m,
            eta_secs:      option.travel_time_secs * share,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn options(&self) -> &RouteOptionSet {
        &self.options
    }

    pub fn selected(&self) -> Option<&RouteOption> {
        self.options.selected()
    }

    pub fn preferred_mode(&self) -> Option<TransportMode> {
        self.preferred_mode
    }

    pub fn target(&self) -> Option<Coordinate> {
        self.target
    }

    pub fn last_fix(&self) -> Option<Fix> {
        self.last_fix
    }

    pub fn is_simulating(&self) -> bool {
        self.simulation.is_some()
    }

    pub fn live_active(&self) -> bool {
        self.live.is_active()
    }

    pub fn alignment_state(&self) -> HeadingAlignmentState {
        self.tracker.state()
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            options:     self.options.clone(),
            target:      self.target,
            last_fix:    self.last_fix,
            simulating:  self.is_simulating(),
            live_active: self.live_active(),
            alignment:   self.alignment_state(),
            progress:    self.progress(),
        }
    }
}
