//! Galton Drop entry point
//!
//! Native builds run the board headless and log the pile as it grows. The
//! browser host lives in `galton_drop::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::Duration;

    use galton_drop::platform::{FrameClock, ManualClock, SystemClock};
    use galton_drop::renderer::{MeshRenderer, Renderer};
    use galton_drop::{PileTally, Session, Settings};

    pub fn run() {
        env_logger::init();
        log::info!("Galton Drop (native) starting...");

        let path = std::env::args_os().nth(1).map(PathBuf::from);
        let settings = Settings::load_or_default(path.as_deref());
        if let Ok(json) = settings.to_json() {
            log::debug!("Settings: {}", json);
        }
        log::info!(
            "Running {:.0}s of simulated time ({} frames of {:.4}s)",
            settings.run_seconds,
            settings.frame_count(),
            settings.frame_dt
        );

        if settings.realtime {
            run_with(&settings, SystemClock::new());
        } else {
            run_with(&settings, ManualClock::new(settings.frame_dt));
        }
    }

    fn run_with<C: FrameClock>(settings: &Settings, mut clock: C) {
        let mut session = Session::new(settings.resolve_seed());
        let (min, max) = Session::bounds();
        let mut renderer = MeshRenderer::default();
        renderer.init(min, max);

        let mut next_report = settings.report_interval;
        while session.elapsed() < settings.run_seconds {
            if settings.realtime {
                std::thread::sleep(Duration::from_secs_f64(settings.frame_dt));
            }
            session.frame(clock.time_since_last_tick(), &mut renderer);

            if settings.report_interval > 0.0 && session.elapsed() >= next_report {
                report(&session, &renderer);
                next_report += settings.report_interval;
            }
        }

        let tally = PileTally::from_scene(session.scene(), session.board().floor);
        log::info!("Final pile {}", tally.render_line());
        if let (Some(mode), Some(mean)) = (tally.mode(), tally.mean_bin()) {
            log::info!(
                "{} settled, fullest bin {}, mean bin {:.2}, peak height {:.1}",
                tally.total(),
                mode,
                mean,
                tally.peak
            );
        }
    }

    fn report(session: &Session, renderer: &MeshRenderer) {
        let tally = PileTally::from_scene(session.scene(), session.board().floor);
        log::info!(
            "t={:.1}s settled={} falling={} vertices={} {}",
            session.elapsed(),
            session.settled(),
            session.falling(),
            renderer.vertices().len(),
            tally.render_line()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
