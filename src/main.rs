use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context};
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};

use lcd_invaders::compute::init_state;
use lcd_invaders::config::Config;
use lcd_invaders::display::{cells_needed, TerminalDisplay};
use lcd_invaders::driver::{Flow, FrameDriver};
use lcd_invaders::input::{event_queue, EventReceiver, KeyboardSource};

/// The terminal belongs to the game, so logs go to the file named by
/// `INVADERS_LOG_FILE`.  Without it, logging stays off.
fn init_logging() -> anyhow::Result<()> {
    let path = match std::env::var("INVADERS_LOG_FILE") {
        Ok(path) => path,
        Err(_) => return Ok(()),
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = Config::from_env();

    let (need_cols, need_rows) = cells_needed(config.width as u32, config.height as u32);
    let (cols, rows) = terminal::size().context("querying terminal size")?;
    if cols < need_cols || rows < need_rows {
        bail!(
            "terminal is {}x{}, the display needs at least {}x{}",
            cols,
            rows,
            need_cols,
            need_rows
        );
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key release events let held buttons stop immediately.  Terminals
    // without the protocol fall back to the keypad's hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (sender, events) = event_queue(config.event_queue_capacity);
    let mut keyboard = KeyboardSource::new(sender, config.fire_debounce, config.hold_window);
    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if !keyboard.handle_key(key, Instant::now()) {
                    break; // game side gone → program exiting
                }
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("keyboard read failed: {}", err);
                break;
            }
        }
    });

    let result = run(&mut out, config, events);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, config: Config, events: EventReceiver) -> anyhow::Result<()> {
    let mut display = TerminalDisplay::new(out, config.width as u32, config.height as u32);
    display.reset()?;

    let frame_delay = config.frame_delay;
    let state = init_state(&config);
    let mut driver = FrameDriver::new(display, config, state, events);

    log::info!("waiting on the welcome screen");
    loop {
        if driver.step()? == Flow::Exit {
            break;
        }
        thread::sleep(frame_delay);
    }
    log::info!("bye");
    Ok(())
}
