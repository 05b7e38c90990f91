//! Pass detection by stepping the observation geometry through time.
//!
//! Every tracked satellite gets its own [`ScanState`]; they share only the
//! clock. A pass starts on the first tick with `elevation >= min_elevation`
//! and ends on the tick before the first one with `elevation < min_elevation`.

use std::collections::VecDeque;
use std::fmt::Display;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::geodetic::GeodeticPoint;
use crate::observation::observe;
use crate::satellite::Propagator;
use crate::types::Observation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    pub satellite: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Time of closest approach, the tick with the highest elevation
    pub tca: DateTime<Utc>,
    pub max_elevation: f64,
    pub start_azimuth: f64,
    pub tca_azimuth: f64,
    /// Azimuth at the first tick below the threshold
    pub end_azimuth: f64,
}

impl Pass {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {:.2} {:.2} tca: {}",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ"),
            self.satellite,
            self.max_elevation,
            self.tca_azimuth,
            self.tca.format("%Y-%m-%dT%H:%M:%SZ"),
        )
    }
}

/// What has been seen so far of a pass still in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassProgress {
    pub start: DateTime<Utc>,
    pub start_azimuth: f64,
    pub tca: DateTime<Utc>,
    pub best_elevation: f64,
    pub best_azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    InPass(PassProgress),
}

impl ScanState {
    /// Feeds one tick's observation. Returns the completed pass when this tick
    /// is the first one below the threshold; `step` locates the previous tick.
    pub fn advance(
        &mut self,
        satellite: &str,
        observation: &Observation,
        min_elevation: f64,
        step: Duration,
    ) -> Option<Pass> {
        match self {
            ScanState::Idle if observation.elevation >= min_elevation => {
                debug!(satellite, time = %observation.time, "pass started");
                *self = ScanState::InPass(PassProgress {
                    start: observation.time,
                    start_azimuth: observation.azimuth,
                    tca: observation.time,
                    best_elevation: observation.elevation,
                    best_azimuth: observation.azimuth,
                });
                None
            }
            ScanState::Idle => None,
            ScanState::InPass(progress) if observation.elevation < min_elevation => {
                let pass = Pass {
                    satellite: satellite.to_string(),
                    start: progress.start,
                    end: observation.time - step,
                    tca: progress.tca,
                    max_elevation: progress.best_elevation,
                    start_azimuth: progress.start_azimuth,
                    tca_azimuth: progress.best_azimuth,
                    end_azimuth: observation.azimuth,
                };
                *self = ScanState::Idle;
                Some(pass)
            }
            ScanState::InPass(progress) => {
                if observation.elevation > progress.best_elevation {
                    progress.best_elevation = observation.elevation;
                    progress.best_azimuth = observation.azimuth;
                    progress.tca = observation.time;
                }
                None
            }
        }
    }
}

struct Track<'a, P: ?Sized> {
    propagator: &'a P,
    state: ScanState,
}

/// Steps a shared clock over one or more satellites and yields completed
/// passes in the order they end; satellites finishing on the same tick come
/// out in the order they were given.
///
/// The scanner is an iterator of `Result<Pass>`. Running out of the give-up
/// budget yields a single [`Error::NoPassWithinBudget`] and ends iteration;
/// reaching `max_passes` or the end time just ends it. Passes still in
/// progress at the end time are not reported. When a propagator fails, the
/// passes other satellites completed on that tick come out first, then the
/// error, then nothing.
pub struct PassScanner<'a, P: Propagator + ?Sized> {
    observer: GeodeticPoint,
    config: ScanConfig,
    tracks: Vec<Track<'a, P>>,
    time: DateTime<Utc>,
    pending: VecDeque<Pass>,
    emitted: usize,
    budget_left: Option<u64>,
    failure: Option<Error>,
    finished: bool,
}

impl<'a, P: Propagator + ?Sized> PassScanner<'a, P> {
    pub fn new(
        observer: GeodeticPoint,
        satellites: impl IntoIterator<Item = &'a P>,
        start: DateTime<Utc>,
        config: ScanConfig,
    ) -> Result<Self> {
        config.validate()?;
        let tracks = satellites
            .into_iter()
            .map(|propagator| Track {
                propagator,
                state: ScanState::Idle,
            })
            .collect::<Vec<_>>();
        if tracks.is_empty() {
            return Err(Error::Config("no satellites to scan".to_string()));
        }
        debug!(satellites = tracks.len(), %start, "pass scan configured");
        Ok(PassScanner {
            observer,
            budget_left: config.give_up_ticks,
            config,
            tracks,
            time: start,
            pending: VecDeque::new(),
            emitted: 0,
            failure: None,
            finished: false,
        })
    }

    /// Time of the next tick to be evaluated
    pub fn current_time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn collect_passes(self) -> Result<Vec<Pass>> {
        self.collect()
    }

    fn tick(&mut self) -> Result<()> {
        let step = Duration::seconds(self.config.step_seconds);
        let mut completed = false;
        for track in &mut self.tracks {
            let state = track.propagator.state_at(&self.time)?;
            let observation = observe(&self.observer, &state, &self.time)?;
            if let Some(pass) = track.state.advance(
                track.propagator.name(),
                &observation,
                self.config.min_elevation,
                step,
            ) {
                info!(
                    satellite = %pass.satellite,
                    start = %pass.start,
                    end = %pass.end,
                    max_elevation = pass.max_elevation,
                    "pass completed"
                );
                self.pending.push_back(pass);
                completed = true;
            }
        }
        if completed {
            self.budget_left = self.config.give_up_ticks;
        } else if let Some(left) = self.budget_left.as_mut() {
            *left -= 1;
        }
        self.time += step;
        Ok(())
    }
}

impl<P: Propagator + ?Sized> Iterator for PassScanner<'_, P> {
    type Item = Result<Pass>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            if self.config.max_passes.is_some_and(|max| self.emitted >= max) {
                self.finished = true;
                return None;
            }
            if let Some(pass) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(Ok(pass));
            }
            if let Some(e) = self.failure.take() {
                self.finished = true;
                return Some(Err(e));
            }
            if self.config.end.is_some_and(|end| self.time > end) {
                self.finished = true;
                return None;
            }
            if let (Some(0), Some(budget)) = (self.budget_left, self.config.give_up_ticks) {
                warn!(budget, time = %self.time, "no pass found, giving up");
                self.finished = true;
                return Some(Err(Error::NoPassWithinBudget { budget }));
            }
            if let Err(e) = self.tick() {
                warn!(time = %self.time, error = %e, "scan stopped");
                self.failure = Some(e);
            }
        }
    }
}
