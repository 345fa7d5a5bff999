//! Face Blaster entry point
//!
//! Native builds run a headless demo: a scripted "player" face is pushed
//! through the full conditioning + simulation pipeline and the run is logged.
//! The browser build starts from `platform::web`.
//!
//! Usage: `face-blaster [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Face Blaster (native demo) starting...");

    if let Err(e) = demo::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use face_blaster::consts::TICK_RATE;
    use face_blaster::platform::resolve_seed;
    use face_blaster::sim::{GameEvent, GameState, Viewport};
    use face_blaster::{EndReason, FaceLandmarks, SessionController, Settings, SettingsError};

    const DEFAULT_SECONDS: u32 = 60;
    /// Where the scripted head rests
    const HEAD_ANCHOR: Vec2 = Vec2::new(0.5, 0.45);
    const MOUTH_CLOSED: f32 = 0.012;
    const MOUTH_OPEN: f32 = 0.045;

    #[derive(Debug, Default)]
    struct RunStats {
        shots: u32,
        hits: u32,
        kills: u32,
        face_lost_frames: u32,
    }

    pub fn run() -> Result<(), SettingsError> {
        let mut args = std::env::args().skip(1);
        let mut settings = match args.next() {
            Some(path) => {
                log::info!("Loading settings from {}", path);
                Settings::load_file(path)?
            }
            None => Settings::default(),
        };
        let seconds = args
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_SECONDS);
        settings.seed = resolve_seed(settings.seed);
        log::info!("Demo seed: {}", settings.seed);

        let sensitivity = settings.sensitivity as f32;
        let viewport = Viewport::new(800.0, 600.0);
        let mut session = SessionController::new(settings, viewport);
        session.start();

        let frame_dt = 1.0 / TICK_RATE;
        let total_frames = seconds * TICK_RATE as u32;
        let mut stats = RunStats::default();
        let mut frames_run = 0;

        for frame in 0..total_frames {
            frames_run = frame + 1;

            // Look away for half a second every ten seconds
            let face = if frame % 600 >= 570 {
                stats.face_lost_frames += 1;
                None
            } else {
                // Resting head (also the calibration anchor) until there is something to aim at
                let reference = pick_target(session.state(), &viewport)
                    .map(|aim| head_position_for(aim, sensitivity))
                    .unwrap_or(HEAD_ANCHOR);
                let firing = frame > 30 && !session.state().enemies.is_empty() && frame % 40 < 8;
                let gap = if firing { MOUTH_OPEN } else { MOUTH_CLOSED };
                Some(FaceLandmarks::synthetic(reference, gap))
            };

            session.on_frame(face.as_ref());
            session.advance(frame_dt);

            for event in session.drain_events() {
                match event {
                    GameEvent::Fired { .. } => stats.shots += 1,
                    GameEvent::EnemyHit { .. } => stats.hits += 1,
                    GameEvent::EnemyDestroyed { enemy_id } => {
                        stats.kills += 1;
                        log::debug!("Enemy {} destroyed", enemy_id);
                    }
                    GameEvent::LevelChanged { level } => log::info!("Reached level {}", level),
                    GameEvent::GameOver { score } => log::info!("Game over! Score: {}", score),
                }
            }

            if !session.is_running() {
                break;
            }
        }

        if session.is_running() {
            session.end();
        }

        let reason = match session.end_reason() {
            Some(EndReason::GameOver) => "game over",
            Some(EndReason::Failed(_)) => "failed",
            _ => "time up",
        };
        println!(
            "Run ended ({}) after {:.1}s | score {} | level {} | shots {} | hits {} | kills {} | face lost {} frames",
            reason,
            frames_run as f32 / TICK_RATE,
            session.score(),
            session.level(),
            stats.shots,
            stats.hits,
            stats.kills,
            stats.face_lost_frames
        );
        Ok(())
    }

    /// Normalized position of the enemy closest to the player
    fn pick_target(state: &GameState, viewport: &Viewport) -> Option<Vec2> {
        state
            .enemies
            .iter()
            .min_by(|a, b| {
                let da = a.pos.distance_squared(state.player.pos);
                let db = b.pos.distance_squared(state.player.pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos / Vec2::new(viewport.width, viewport.height))
    }

    /// Head position that settles the (mirrored, amplified) aim on `aim`,
    /// assuming the tracker anchored on `HEAD_ANCHOR`
    fn head_position_for(aim: Vec2, sensitivity: f32) -> Vec2 {
        let unmirrored = Vec2::new(1.0 - aim.x, aim.y);
        HEAD_ANCHOR + (unmirrored - HEAD_ANCHOR) / sensitivity
    }
}
