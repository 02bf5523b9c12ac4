//! Fixed-timestep playback.
//!
//! The loop keeps logical time with a fractional-tick accumulator: each
//! iteration it samples the wall clock, converts the elapsed time into ticks,
//! and calls [`Blender::advance`] once per whole tick before rendering. The
//! transition therefore progresses at a constant rate no matter how fast or
//! slow the sink presents. Catch-up after a stall is bounded by
//! [`DriverConfig::max_catchup_ticks`] so a long pause drops ticks instead of
//! replaying them in a burst.
//!
//! [`Player`] runs the loop on a dedicated thread. All playback state lives
//! on that thread; the outside world talks to it through [`Controls`], a pair
//! of atomics read once per iteration.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::blend::Blender;
use crate::core::TickRate;
use crate::error::{FadeloopError, FadeloopResult};
use crate::screen::Screen;
use crate::sink::{PresentSink, SinkConfig, SinkFlow};

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct DriverConfig {
    pub tick_rate: TickRate,
    /// Most ticks one loop iteration may replay after a stall.
    pub max_catchup_ticks: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_rate: TickRate::DEFAULT,
            max_catchup_ticks: 8,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> FadeloopResult<()> {
        if self.tick_rate.0 == 0 {
            return Err(FadeloopError::configuration("tick rate must be > 0"));
        }
        if self.max_catchup_ticks == 0 {
            return Err(FadeloopError::configuration(
                "max catch-up ticks must be > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ControlState {
    stop: AtomicBool,
    /// Pending transition-duration change; 0 means none.
    transition_ticks: AtomicU32,
}

/// Thread-safe handle into a running [`Player`].
///
/// Cloneable and cheap; every clone talks to the same playback loop.
#[derive(Clone, Debug)]
pub struct Controls {
    state: Arc<ControlState>,
}

impl Controls {
    /// Asks the loop to exit after its current iteration.
    pub fn request_stop(&self) {
        self.state.stop.store(true, Ordering::Release);
    }

    pub fn stop_requested(&self) -> bool {
        self.state.stop.load(Ordering::Acquire)
    }

    /// Queues a new transition duration, applied at the start of the next
    /// loop iteration. Zero is rejected and leaves the current value alone.
    pub fn set_transition_ticks(&self, ticks: u32) -> FadeloopResult<()> {
        if ticks < 1 {
            return Err(FadeloopError::configuration(
                "transition duration must be at least 1 tick",
            ));
        }
        self.state.transition_ticks.store(ticks, Ordering::Release);
        Ok(())
    }
}

/// Playback on a dedicated thread.
///
/// Dropping the player requests a stop and joins the thread; use
/// [`Player::stop`] or [`Player::wait`] to observe errors and get the sink
/// back. Thread-affine sinks (like a window) belong in [`play_blocking`]
/// instead.
pub struct Player<S: PresentSink + Send + 'static> {
    controls: Controls,
    handle: Option<JoinHandle<FadeloopResult<S>>>,
}

impl<S: PresentSink + Send + 'static> Player<S> {
    /// Spawns the playback thread and starts presenting immediately.
    pub fn start(blender: Blender, sink: S, config: DriverConfig) -> FadeloopResult<Self> {
        config.validate()?;
        let state = Arc::new(ControlState::default());
        let thread_state = Arc::clone(&state);
        info!(
            width = blender.canvas().width,
            height = blender.canvas().height,
            images = blender.gallery().len(),
            tick_rate = config.tick_rate.0,
            "starting playback"
        );
        let handle = std::thread::spawn(move || run_loop(blender, sink, config, thread_state));
        Ok(Self {
            controls: Controls { state },
            handle: Some(handle),
        })
    }

    pub fn controls(&self) -> Controls {
        self.controls.clone()
    }

    /// Requests a stop and blocks until the loop has exited, returning the
    /// sink for inspection.
    pub fn stop(self) -> FadeloopResult<S> {
        self.controls.request_stop();
        self.wait()
    }

    /// Blocks until the loop exits on its own, e.g. when the sink reports
    /// [`SinkFlow::Stop`].
    pub fn wait(mut self) -> FadeloopResult<S> {
        let Some(handle) = self.handle.take() else {
            return Err(FadeloopError::validation("player already joined"));
        };
        handle
            .join()
            .map_err(|_| FadeloopError::validation("playback thread panicked"))?
    }
}

impl<S: PresentSink + Send + 'static> Drop for Player<S> {
    fn drop(&mut self) {
        self.controls.request_stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Runs playback on the calling thread until the sink ends it, then returns
/// the sink.
///
/// This is the home for thread-affine sinks such as windows, which must be
/// created and updated on one thread; the only exit is the sink returning
/// [`SinkFlow::Stop`], e.g. on window close.
pub fn play_blocking<S: PresentSink>(
    blender: Blender,
    sink: S,
    config: DriverConfig,
) -> FadeloopResult<S> {
    config.validate()?;
    info!(
        width = blender.canvas().width,
        height = blender.canvas().height,
        images = blender.gallery().len(),
        tick_rate = config.tick_rate.0,
        "starting playback"
    );
    run_loop(blender, sink, config, Arc::new(ControlState::default()))
}

fn run_loop<S: PresentSink>(
    mut blender: Blender,
    mut sink: S,
    config: DriverConfig,
    state: Arc<ControlState>,
) -> FadeloopResult<S> {
    let mut screen = Screen::new(blender.canvas());
    sink.begin(SinkConfig {
        width: screen.width(),
        height: screen.height(),
        tick_rate: config.tick_rate,
    })?;
    let run = run_realtime(&mut blender, &mut sink, &mut screen, &config, &state);
    let end = sink.end();
    run?;
    end?;
    Ok(sink)
}

fn run_realtime<S: PresentSink>(
    blender: &mut Blender,
    sink: &mut S,
    screen: &mut Screen,
    config: &DriverConfig,
    state: &ControlState,
) -> FadeloopResult<()> {
    let tick_period = config.tick_rate.tick_duration_secs();
    let max_catchup = f64::from(config.max_catchup_ticks);
    let mut accumulator = 0.0f64;
    let mut frames = 0u64;
    let mut ticks = 0u64;
    let mut last = Instant::now();

    loop {
        if state.stop.load(Ordering::Acquire) {
            break;
        }
        let pending = state.transition_ticks.swap(0, Ordering::AcqRel);
        if pending != 0 {
            blender.set_transition_ticks(pending)?;
        }

        let now = Instant::now();
        accumulator += now.duration_since(last).as_secs_f64() / tick_period;
        last = now;
        if accumulator > max_catchup {
            debug!(
                dropped = accumulator - max_catchup,
                "presentation fell behind, dropping ticks"
            );
            accumulator = max_catchup;
        }
        while accumulator >= 1.0 {
            blender.advance();
            accumulator -= 1.0;
            ticks += 1;
        }

        screen.clear();
        screen.copy_from(blender.current_frame())?;
        if sink.present(frames, screen)? == SinkFlow::Stop {
            break;
        }
        frames += 1;

        // Sleep out the rest of the current tick; a stop request is noticed
        // at most one tick period later.
        let remaining = (1.0 - accumulator).max(0.0) * tick_period;
        std::thread::sleep(Duration::from_secs_f64(remaining));
    }

    info!(frames, ticks, "playback stopped");
    Ok(())
}

/// Offline playback: drives exactly `ticks` logical ticks with no wall clock,
/// presenting one frame per tick. Stops early if the sink asks to.
#[tracing::instrument(skip(blender, sink))]
pub fn render_ticks<S: PresentSink>(
    blender: &mut Blender,
    sink: &mut S,
    ticks: u64,
    tick_rate: TickRate,
) -> FadeloopResult<()> {
    if tick_rate.0 == 0 {
        return Err(FadeloopError::configuration("tick rate must be > 0"));
    }
    let mut screen = Screen::new(blender.canvas());
    sink.begin(SinkConfig {
        width: screen.width(),
        height: screen.height(),
        tick_rate,
    })?;
    let run = run_fixed(blender, sink, &mut screen, ticks);
    let end = sink.end();
    run?;
    end
}

fn run_fixed<S: PresentSink>(
    blender: &mut Blender,
    sink: &mut S,
    screen: &mut Screen,
    ticks: u64,
) -> FadeloopResult<()> {
    for idx in 0..ticks {
        blender.advance();
        screen.clear();
        screen.copy_from(blender.current_frame())?;
        if sink.present(idx, screen)? == SinkFlow::Stop {
            break;
        }
    }
    Ok(())
}
