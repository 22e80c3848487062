use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use pinky::listener::KeyboardSource;
use pinky::{AudioError, CancelToken, Collector, CpalHost, PlaybackSettings, Player, run_loop};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(audio) = err.chain().find_map(|cause| cause.downcast_ref::<AudioError>()) {
                eprintln!("{}", audio.report());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cancel = CancelToken::new();
    let mut player =
        Player::new(CpalHost::new(), PlaybackSettings::default()).with_cancel(cancel.clone());
    let mut collector = Collector::new();
    let mut source = KeyboardSource::new().with_cancel(cancel.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "f: fist  r: rest  s: spread  i/o: wave in/out  d: double tap  l/k: left/right arm  x: arm lost  q: quit"
    )?;

    let result = run_loop(&mut source, &mut collector, &mut player, &mut out, &cancel);

    // Leave raw mode before the final newline.
    drop(source);
    writeln!(out)?;

    result.context("pose loop stopped")
}
