//! Capture/render lifecycle
//!
//! One [`AvatarSession`] per loaded avatar. The session owns the shared
//! scene, the per-session retargeting state, and the two independently
//! clocked loops that mutate it:
//!
//! - the render loop runs continuously once started, advancing avatar
//!   physics by the elapsed time each tick and handing the scene to the
//!   renderer;
//! - the detection loop runs only while capture is enabled, submitting
//!   video frames to the detector and applying each result (at the
//!   detector's own cadence) through the full-body animator.
//!
//! Both loops mutate the scene through a single non-reentrant lock held for
//! the duration of one frame's work and never across the detector boundary,
//! so one frame's retargeting always runs to completion before the next
//! callback of either kind. A render tick that lands while a detection
//! result is in flight simply renders the last applied pose.
//!
//! Swapping the AVATAR means tearing this session down and building a new
//! one; swapping the BACKGROUND rebuilds the scene in place but restarts
//! the detection loop the same way.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::avatar::Avatar;
use crate::config::Config;
use crate::error::Result;
use crate::retarget::Animator;
use crate::solve::{KinematicsSolver, SolveContext};
use crate::tracking::{solve_frame, Detector, VideoFrame};

/// External collaborator: produces video frames from a camera.
///
/// `grab` is non-blocking; `Ok(None)` means no new frame is ready yet.
pub trait CaptureDevice: Send {
    fn acquire(&mut self) -> Result<()>;
    fn grab(&mut self) -> Result<Option<VideoFrame>>;
    fn release(&mut self);
}

/// External collaborator: draws the scene. Called every render tick
/// regardless of detection state.
pub trait Renderer: Send {
    fn render_frame(&mut self, scene: &Scene);
}

/// The mutable world both loops share.
pub struct Scene {
    pub avatar: Avatar,
    /// Background asset path
    pub background: String,
}

/// Detection loop states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Stopped,
    Starting,
    Running,
}

/// Scene plus the session-scoped retargeting state, behind one lock.
struct Stage {
    scene: Scene,
    animator: Animator,
}

struct DetectionTasks {
    submit: JoinHandle<()>,
    apply: JoinHandle<()>,
}

#[derive(Default)]
struct TaskSlots {
    render: Option<JoinHandle<()>>,
    detection: Option<DetectionTasks>,
}

/// Owns the scene and both loops for one avatar's lifetime.
///
/// Call [`AvatarSession::teardown`] when the avatar is swapped or the
/// session ends; it is idempotent. Dropping the session without teardown
/// aborts whatever is still running as a best effort.
pub struct AvatarSession {
    config: Config,
    stage: Mutex<Stage>,
    device: Mutex<Box<dyn CaptureDevice>>,
    detector: Mutex<Box<dyn Detector>>,
    solver: Arc<dyn KinematicsSolver>,
    state_tx: watch::Sender<CaptureState>,
    tasks: Mutex<TaskSlots>,
    shutdown_tx: broadcast::Sender<()>,
    /// Handed to the loop tasks so they never keep the session alive
    weak: Weak<AvatarSession>,
}

impl AvatarSession {
    /// Create a session for a freshly loaded avatar. Nothing runs until
    /// [`start_render_loop`](Self::start_render_loop) and capture are
    /// started.
    pub fn new(
        avatar: Avatar,
        config: Config,
        device: Box<dyn CaptureDevice>,
        detector: Box<dyn Detector>,
        solver: Arc<dyn KinematicsSolver>,
    ) -> Arc<Self> {
        let (state_tx, _) = watch::channel(CaptureState::Stopped);
        let (shutdown_tx, _) = broadcast::channel(1);
        let background = config.avatar.background.clone();

        Arc::new_cyclic(|weak| Self {
            config,
            stage: Mutex::new(Stage {
                scene: Scene { avatar, background },
                animator: Animator::new(),
            }),
            device: Mutex::new(device),
            detector: Mutex::new(detector),
            solver,
            state_tx,
            tasks: Mutex::new(TaskSlots::default()),
            shutdown_tx,
            weak: weak.clone(),
        })
    }

    pub fn capture_state(&self) -> CaptureState {
        *self.state_tx.borrow()
    }

    pub fn subscribe_capture_state(&self) -> watch::Receiver<CaptureState> {
        self.state_tx.subscribe()
    }

    /// Run `f` with the scene under the frame lock.
    pub async fn with_scene<R>(&self, f: impl FnOnce(&Scene) -> R) -> R {
        let stage = self.stage.lock().await;
        f(&stage.scene)
    }

    /// The user-facing capture toggle.
    pub async fn set_capture_enabled(&self, enabled: bool) -> Result<()> {
        if enabled {
            self.start_capture().await
        } else {
            self.stop_capture().await;
            Ok(())
        }
    }

    /// Start the render loop. Runs until teardown; ticks at the configured
    /// rate and is never gated on detection being enabled.
    pub async fn start_render_loop(&self, mut renderer: Box<dyn Renderer>) {
        let mut tasks = self.tasks.lock().await;
        if tasks.render.is_some() {
            warn!("Render loop already running");
            return;
        }

        let session = self.weak.clone();
        let mut shutdown = self.shutdown_tx.subscribe();
        let period = Duration::from_secs_f64(1.0 / f64::from(self.config.render.target_fps));

        tasks.render = Some(tokio::spawn(async move {
            let mut tick = tokio::time::interval(period);
            let mut last = Instant::now();
            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = tick.tick() => {
                        let Some(session) = session.upgrade() else { break };
                        let now = Instant::now();
                        let delta = now.duration_since(last).as_secs_f32();
                        last = now;

                        let mut stage = session.stage.lock().await;
                        stage.scene.avatar.update(delta);
                        renderer.render_frame(&stage.scene);
                    }
                }
            }
            debug!("Render loop stopped");
        }));

        info!("Render loop started");
    }

    /// `Stopped -> Starting -> Running`. Acquires the capture device, wires
    /// the detector's result sink, and spawns the submission and
    /// application tasks. A device acquisition failure reports upward and
    /// leaves the loop `Stopped`.
    pub async fn start_capture(&self) -> Result<()> {
        if self.capture_state() != CaptureState::Stopped {
            debug!("Capture already started");
            return Ok(());
        }
        self.state_tx.send_replace(CaptureState::Starting);

        if let Err(e) = self.device.lock().await.acquire() {
            self.state_tx.send_replace(CaptureState::Stopped);
            warn!("Capture device acquisition failed: {}", e);
            return Err(e);
        }

        let (result_tx, mut result_rx) = mpsc::channel(8);
        {
            let mut detector = self.detector.lock().await;
            detector.configure(&self.config.detector);
            detector.set_result_sink(result_tx);
        }

        // Frame submission, on the capture clock
        let submit = {
            let session = self.weak.clone();
            let period = Duration::from_secs_f64(1.0 / f64::from(self.config.capture.tick_hz));
            tokio::spawn(async move {
                let mut tick = tokio::time::interval(period);
                loop {
                    tick.tick().await;
                    let Some(session) = session.upgrade() else { break };

                    let frame = {
                        let mut device = session.device.lock().await;
                        match device.grab() {
                            Ok(Some(frame)) => frame,
                            Ok(None) => continue,
                            Err(e) => {
                                warn!("Frame grab failed: {}", e);
                                continue;
                            }
                        }
                    };

                    let submit_result = session.detector.lock().await.submit(frame);
                    if let Err(e) = submit_result {
                        debug!("Detector submission failed: {}", e);
                    }
                }
            })
        };

        // Result application, on the detector's clock
        let apply = {
            let session = self.weak.clone();
            let solver = Arc::clone(&self.solver);
            let tuning = self.config.retarget.clone();
            let ctx = SolveContext {
                video_width: self.config.capture.width,
                video_height: self.config.capture.height,
            };
            tokio::spawn(async move {
                while let Some(detection) = result_rx.recv().await {
                    let Some(session) = session.upgrade() else { break };

                    let solved = solve_frame(solver.as_ref(), &detection, &ctx);
                    if solved.is_empty() {
                        continue;
                    }

                    // One frame's retargeting runs to completion under the
                    // stage lock; the lock is never held across the
                    // detector boundary.
                    let mut stage = session.stage.lock().await;
                    let stage = &mut *stage;
                    stage
                        .animator
                        .animate_frame(&mut stage.scene.avatar.binding, &solved, &tuning);
                }
                debug!("Detection result channel closed");
            })
        };

        self.tasks.lock().await.detection = Some(DetectionTasks { submit, apply });
        self.state_tx.send_replace(CaptureState::Running);
        info!("Capture running");
        Ok(())
    }

    /// Stop frame submission, drop the result subscription, and release the
    /// capture device. A result already in transit may still apply once
    /// before the subscription closes; the next render tick simply reflects
    /// one extra frame of motion.
    pub async fn stop_capture(&self) {
        if self.capture_state() == CaptureState::Stopped {
            return;
        }

        let detection = self.tasks.lock().await.detection.take();
        if let Some(tasks) = detection {
            tasks.submit.abort();
            let _ = tasks.submit.await;
            tasks.apply.abort();
            // Joining the apply task drops the result receiver, closing
            // every sink the detector still holds.
            let _ = tasks.apply.await;
        }

        self.device.lock().await.release();
        self.state_tx.send_replace(CaptureState::Stopped);
        info!("Capture stopped");
    }

    /// Replace the background asset. The render scene is rebuilt, so a
    /// running detection loop is stopped and restarted cleanly.
    pub async fn set_background(&self, background: String) -> Result<()> {
        let was_running = self.capture_state() != CaptureState::Stopped;
        if was_running {
            self.stop_capture().await;
        }

        {
            let mut stage = self.stage.lock().await;
            stage.scene.background = background;
        }
        info!("Scene background replaced");

        if was_running {
            self.start_capture().await?;
        }
        Ok(())
    }

    /// Stop both loops and release every resource. Idempotent.
    pub async fn teardown(&self) {
        self.stop_capture().await;
        let _ = self.shutdown_tx.send(());

        let render = self.tasks.lock().await.render.take();
        if let Some(handle) = render {
            let _ = handle.await;
        }
        info!("Avatar session torn down");
    }
}

impl Drop for AvatarSession {
    fn drop(&mut self) {
        // Best effort for sessions dropped without teardown
        if let Ok(mut tasks) = self.tasks.try_lock() {
            if let Some(t) = tasks.detection.take() {
                t.submit.abort();
                t.apply.abort();
            }
            if let Some(render) = tasks.render.take() {
                render.abort();
            }
        }
        if self.capture_state() != CaptureState::Stopped {
            if let Ok(mut device) = self.device.try_lock() {
                device.release();
            }
        }
    }
}
