//! Gone Batty entry point
//!
//! Native builds run headless rounds driven by the autopilot. The browser
//! build starts from `platform::web::wasm_start` and is driven by the page.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::process;

    use clap::Parser;
    use gone_batty::autopilot;
    use gone_batty::platform::HeadlessRunner;
    use gone_batty::sim::{GameSession, Viewport};
    use gone_batty::{Tuning, ui};

    #[derive(Parser)]
    #[command(name = "gone-batty")]
    #[command(about = "Play Gone Batty headless with the autopilot")]
    struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Rounds to play
        #[arg(long, default_value_t = 3)]
        rounds: u32,
        /// Canvas width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        /// Canvas height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Stop a round after this many seconds
        #[arg(long, default_value_t = 120.0)]
        limit: f64,
        /// JSON file overriding game balance
        #[arg(long)]
        tuning: Option<String>,
        /// Print the default tuning as JSON and exit
        #[arg(long)]
        dump_tuning: bool,
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("failed to read {}: {}", path, e))?;
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning from {}", path);
                Ok(tuning)
            }
            None => Ok(Tuning::default()),
        }
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        if args.dump_tuning {
            println!("{}", Tuning::default().to_json());
            return;
        }
        if !(args.width > 0.0 && args.height > 0.0 && args.fps > 0.0) {
            log::error!("width, height and fps must be positive");
            process::exit(2);
        }

        let tuning = match load_tuning(args.tuning.as_deref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        };

        let seed = args.seed.unwrap_or_else(clock_seed);
        log::info!("Gone Batty (headless) starting with seed {}", seed);

        let viewport = Viewport::new(args.width, args.height);
        let session = GameSession::with_tuning(seed, viewport, tuning);
        let mut runner = HeadlessRunner::new(session, 1000.0 / args.fps);

        let mut best = 0;
        for round in 1..=args.rounds {
            let report = runner.run_round(autopilot::decide, args.limit * 1000.0);
            best = best.max(report.score);
            let message = match ui::overlay_for(&runner.session) {
                Some(overlay) => overlay.body,
                None => format!("still flying after {} seconds", report.score),
            };
            println!(
                "round {:>2}: {:<45} ({} ticks, {} obstacles)",
                round, message, report.ticks, report.obstacles_spawned
            );
        }
        println!("best: {} seconds", best);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
