mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arena_shooter::entities::{Controls, GameStatus};
use arena_shooter::sound::Clip;
use arena_shooter::{AssetTable, GameError, Settings, World};

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// OS key-repeat refreshes the entry well before it expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Logical commands currently held. Movement is throttled to one step per
/// `move_repeat_frames`; fire is passed through and edge-triggered by the world.
fn poll_controls(key_frame: &HashMap<KeyCode, u64>, frame: u64, move_ready: bool) -> Controls {
    let held = |keys: &[KeyCode]| move_ready && any_held(key_frame, keys, frame);
    Controls {
        left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        up: held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        fire: is_held(key_frame, &KeyCode::Char(' '), frame),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the quit command.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event of every key; each frame the keys still "fresh" become `Controls`.
/// On keyboard-enhancement terminals (kitty protocol) release events remove
/// keys immediately, which is what makes fire edge-triggered there.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let period = world.settings().frame_period();
    let repeat = world.settings().move_repeat_frames;
    let bell = world.settings().bell;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut cues: Vec<Clip> = Vec::new();
    let mut move_cooldown: u32 = 0;
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    world.start_game();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                            log::info!("quit requested");
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            if world.restart() {
                                key_frame.clear();
                                last = Instant::now();
                            }
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let controls = poll_controls(&key_frame, frame, move_cooldown == 0);
        if controls.left || controls.right || controls.up || controls.down {
            move_cooldown = repeat;
        }
        move_cooldown = move_cooldown.saturating_sub(1);

        let now = Instant::now();
        if world.status() == GameStatus::Running {
            world.pump(now - last, &controls, rng, &mut cues);
        }
        last = now;

        if world.take_repaint() {
            display::present(out, world.raster())?;
        }
        display::ring(out, &cues, bell)?;
        cues.clear();

        let elapsed = frame_start.elapsed();
        if elapsed < period {
            thread::sleep(period - elapsed);
        }
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

fn load_settings() -> Result<Settings, GameError> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Ok(Settings::load(&path)?),
        None => Ok(Settings::default()),
    }
}

/// stdout belongs to the game screen, so logs only go to a file.
fn init_logging(settings: &Settings) -> Result<(), GameError> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let settings = load_settings()?;
    init_logging(&settings)?;

    // Missing or malformed sprites abort before the terminal is touched.
    let assets = Arc::new(AssetTable::load()?);
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut world = World::new(settings, assets)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = display::clear(&mut out).and_then(|_| game_loop(&mut out, &mut world, &rx, &mut rng));

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(GameError::from)
}
