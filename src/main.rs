//! Ball Runner entry point
//!
//! Headless driver: plays one level to completion with the autopilot or a
//! scripted list of jump ticks, persists the records and prints the result.
//!
//! ```text
//! ball-runner hard --autopilot --scores
//! ball-runner medium --jump-at 0 --jump-at 50 --realtime
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use clap::Parser;

    use ball_runner::persistence::{RecordKeys, ScoreStore};
    use ball_runner::sim::RunPhase;
    use ball_runner::timestep::FixedTimestep;
    use ball_runner::{LevelDef, LevelId, ScoreBoard, Session, Settings, platform};

    /// Which level to play
    enum LevelArg {
        Builtin(LevelId),
        File(PathBuf),
    }

    #[derive(Parser, Debug)]
    #[command(about = "Play a Ball Runner level headless", version, author)]
    struct Cli {
        /// Built-in level (easy, medium, hard) or a level JSON file
        level: Option<String>,
        /// Jump over hazards automatically
        #[arg(long)]
        autopilot: bool,
        /// Pace ticks with the wall clock
        #[arg(long)]
        realtime: bool,
        /// Print the score board (alone, or after the run when a level is given)
        #[arg(long)]
        scores: bool,
        /// Request a jump on this tick; repeatable
        #[arg(long = "jump-at", value_name = "TICK")]
        jump_at: Vec<u64>,
        /// Give up after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,
        /// Where records and settings live
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Write the effective settings back to disk
        #[arg(long)]
        save_settings: bool,
    }

    impl Cli {
        fn level_arg(&self) -> Option<LevelArg> {
            self.level.as_deref().map(|level| match LevelId::from_str(level) {
                Some(id) => LevelArg::Builtin(id),
                None => LevelArg::File(PathBuf::from(level)),
            })
        }
    }

    pub fn run() -> Result<()> {
        platform::init_logging();
        log::info!("Ball Runner (native) starting...");

        let cli = Cli::parse();
        let level_arg = cli.level_arg();
        let mut settings = Settings::load();
        if let Some(dir) = &cli.data_dir {
            settings.data_dir = Some(dir.clone());
        }
        if let Some(LevelArg::Builtin(id)) = &level_arg {
            settings.level = *id;
        }
        settings.autopilot |= cli.autopilot;
        settings.realtime |= cli.realtime;
        if let Some(max_ticks) = cli.max_ticks {
            settings.max_ticks = max_ticks;
        }
        if cli.save_settings {
            settings.save();
        }

        let store = platform::default_store(settings.resolved_data_dir());

        if cli.scores && level_arg.is_none() {
            println!("{}", ScoreBoard::load(&store).render());
            return Ok(());
        }

        let (level, keys) = match &level_arg {
            Some(LevelArg::File(path)) => {
                let level = LevelDef::load(path)
                    .with_context(|| format!("loading level {}", path.display()))?;
                let keys = RecordKeys::custom(&level.name);
                (level, keys)
            }
            _ => (settings.level.definition(), RecordKeys::for_level(settings.level)),
        };

        let mut session = Session::new(&level, keys, store);
        session.set_autopilot(settings.autopilot);

        let mut jump_at: BTreeSet<u64> = cli.jump_at.iter().copied().collect();
        if !settings.autopilot && jump_at.is_empty() {
            log::info!("No jumps scheduled, starting the run at tick 0");
            jump_at.insert(0);
        }

        let ticks = if settings.realtime {
            play_realtime(&mut session, &settings, &jump_at)
        } else {
            play(&mut session, settings.max_ticks, &jump_at)
        };

        let snap = session.snapshot();
        match snap.phase {
            RunPhase::Won | RunPhase::Lost => println!(
                "{} {} after {} ticks: distance {:.2}, points {}",
                level.name,
                if snap.phase == RunPhase::Won { "WON" } else { "LOST" },
                ticks,
                snap.distance,
                snap.score
            ),
            phase => println!(
                "{} stopped after {} ticks ({}): distance {:.2}, points {}",
                level.name,
                ticks,
                phase.as_str(),
                snap.distance,
                snap.score
            ),
        }
        println!("{}", snap.hud_text());

        if cli.scores {
            println!("{}", ScoreBoard::load(session.store()).render());
        }
        Ok(())
    }

    /// Feed a scheduled jump, if any, and advance one tick
    fn step<S: ScoreStore>(session: &mut Session<S>, tick: u64, jump_at: &BTreeSet<u64>) {
        if jump_at.contains(&tick) {
            session.request_jump();
        }
        session.advance();
    }

    /// Run flat out until the run ends or `max_ticks` elapse
    fn play<S: ScoreStore>(
        session: &mut Session<S>,
        max_ticks: u64,
        jump_at: &BTreeSet<u64>,
    ) -> u64 {
        let mut tick = 0;
        while tick < max_ticks && !session.phase().is_terminal() {
            step(session, tick, jump_at);
            tick += 1;
        }
        tick
    }

    /// Pace ticks with the wall clock through a fixed timestep
    fn play_realtime<S: ScoreStore>(
        session: &mut Session<S>,
        settings: &Settings,
        jump_at: &BTreeSet<u64>,
    ) -> u64 {
        let mut timestep = FixedTimestep::from_hz(settings.tick_hz, settings.max_substeps);
        let frame = Duration::from_secs_f32(timestep.dt());
        let mut last = Instant::now();
        let mut tick = 0;

        while tick < settings.max_ticks && !session.phase().is_terminal() {
            std::thread::sleep(frame);
            let now = Instant::now();
            let substeps = timestep.advance(now.duration_since(last).as_secs_f32());
            last = now;

            for _ in 0..substeps {
                if tick >= settings.max_ticks || session.phase().is_terminal() {
                    break;
                }
                step(session, tick, jump_at);
                tick += 1;
            }
            if tick % 60 == 0 {
                log::debug!("{}", session.snapshot().hud_text());
            }
        }
        tick
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_flags() {
            let cli = Cli::try_parse_from([
                "ball-runner",
                "hard",
                "--autopilot",
                "--jump-at",
                "0",
                "--jump-at",
                "45",
                "--max-ticks",
                "900",
            ])
            .unwrap();
            assert!(cli.autopilot && !cli.realtime);
            assert_eq!(cli.jump_at, vec![0, 45]);
            assert_eq!(cli.max_ticks, Some(900));
            assert!(matches!(cli.level_arg(), Some(LevelArg::Builtin(LevelId::Hard))));
        }

        #[test]
        fn test_cli_level_file_and_defaults() {
            let cli = Cli::try_parse_from(["ball-runner", "levels/custom.json"]).unwrap();
            assert!(matches!(
                cli.level_arg(),
                Some(LevelArg::File(path)) if path.ends_with("custom.json")
            ));
            assert!(cli.jump_at.is_empty());

            let cli = Cli::try_parse_from(["ball-runner", "--scores"]).unwrap();
            assert!(cli.scores && cli.level_arg().is_none());
        }

        #[test]
        fn test_cli_rejects_bad_values() {
            assert!(Cli::try_parse_from(["ball-runner", "--jump-at", "soon"]).is_err());
            assert!(Cli::try_parse_from(["ball-runner", "--warp"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `ball_runner::web::start`
}
