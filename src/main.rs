//! Cloud Dodge entry point
//!
//! Native builds run a headless session and print a JSON summary. The web
//! build is driven from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use cloud_dodge::sim::{GameEvent, Snapshot};
    use cloud_dodge::{GameConfig, Session, autopilot};

    /// Headless Cloud Dodge runner
    #[derive(Parser)]
    #[command(version, about = "Runs a headless Cloud Dodge session and prints a JSON summary")]
    pub struct Cli {
        /// JSON config file; missing fields use defaults
        #[arg(long, value_name = "PATH")]
        pub config: Option<PathBuf>,

        /// RNG seed (random if omitted)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Override the screen width
        #[arg(long)]
        pub width: Option<f32>,

        /// Override the screen height
        #[arg(long)]
        pub height: Option<f32>,

        /// Simulated time to run for
        #[arg(long, default_value_t = 30_000)]
        pub duration_ms: u64,

        /// Simulated frame length fed to each pump
        #[arg(long, default_value_t = 16)]
        pub frame_ms: u64,

        /// Let the autopilot steer
        #[arg(long)]
        pub autopilot: bool,
    }

    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        elapsed_ms: u64,
        ticks: u64,
        spawned: u32,
        collided_with: Option<u32>,
        final_state: Snapshot,
    }

    fn fail(message: impl std::fmt::Display) -> ! {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let cli = Cli::parse();

        let mut config = match &cli.config {
            Some(path) => GameConfig::load(path).unwrap_or_else(|e| fail(e)),
            None => GameConfig::default(),
        };
        if let Some(width) = cli.width {
            config.screen_width = width;
        }
        if let Some(height) = cli.height {
            config.screen_height = height;
        }

        let seed = cli.seed.unwrap_or_else(rand::random);
        let mut session = Session::new(config, seed).unwrap_or_else(|e| fail(e));
        log::info!(
            "Running for {} ms in {} ms frames (autopilot: {})",
            cli.duration_ms,
            cli.frame_ms,
            cli.autopilot
        );

        let summary = simulate(&mut session, cli.duration_ms, cli.frame_ms, cli.autopilot);
        session.dispose();

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
    }

    /// Pump frames until `duration_ms` of session time has been simulated or the game ends
    fn simulate(
        session: &mut Session,
        duration_ms: u64,
        frame_ms: u64,
        use_autopilot: bool,
    ) -> Summary {
        let frame_ms = frame_ms.max(1);
        let mut spawned = 0;
        let mut collided_with = None;

        // Pumps are clamped, so progress is measured on the session clock
        while session.scheduler().now_ms() < duration_ms {
            if use_autopilot {
                if let Some(command) = autopilot::choose(session.state()) {
                    session.handle(command);
                }
            }

            let remaining_ms = duration_ms - session.scheduler().now_ms();
            session.pump(frame_ms.min(remaining_ms));

            for event in session.drain_events() {
                match event {
                    GameEvent::ObstacleSpawned { .. } => spawned += 1,
                    GameEvent::Collision { obstacle_id } => collided_with = Some(obstacle_id),
                    other => log::trace!("{:?}", other),
                }
            }

            if session.state().is_game_over() {
                break;
            }
        }

        Summary {
            seed: session.state().seed,
            elapsed_ms: session.scheduler().now_ms(),
            ticks: session.state().time_ticks,
            spawned,
            collided_with,
            final_state: session.snapshot(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;

        #[test]
        fn test_cli_definition() {
            Cli::command().debug_assert();
        }

        #[test]
        fn test_summary_reports_simulated_time() {
            // Tall screen keeps the player out of reach for the whole run
            let config = GameConfig::with_screen(320.0, 1_000_000.0);
            let mut session = Session::new(config, 3).unwrap();

            // Frames longer than the catch-up limit are clamped per pump
            let summary = simulate(&mut session, 1000, 1000, false);
            assert_eq!(summary.elapsed_ms, 1000);
            assert_eq!(summary.elapsed_ms, session.scheduler().now_ms());
            assert_eq!(summary.ticks, 33);
            assert_eq!(summary.spawned, 1);
            assert_eq!(summary.seed, 3);
            assert_eq!(summary.collided_with, None);
        }

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::try_parse_from(["cloud-dodge", "--seed", "7", "--autopilot"]).unwrap();
            assert_eq!(cli.seed, Some(7));
            assert!(cli.autopilot);
            assert_eq!(cli.duration_ms, 30_000);
            assert_eq!(cli.frame_ms, 16);
            assert!(cli.config.is_none());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
