/// Button input.
///
/// Input producers (a key-reader thread, a GPIO interrupt handler) never touch
/// game state.  They push [`InputEvent`]s into a bounded queue that the frame
/// driver drains once per frame.  The FIRE button is edge-triggered and
/// debounced at the producer; LEFT, RIGHT and START are levels, tracked on the
/// consumer side by a [`Keypad`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    /// "A" on the board.
    Fire,
    /// "B" on the board.
    Start,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A level button went (or is still) down.
    Pressed(Button),
    Released(Button),
    /// One debounced FIRE press.
    Fire,
    /// The user asked to stop.
    Interrupt,
}

impl InputEvent {
    /// Events that must reach the driver even when the queue is full.  Losing
    /// one would leave a button stuck down or the program running.
    pub fn is_control(&self) -> bool {
        matches!(self, InputEvent::Released(_) | InputEvent::Interrupt)
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

/// Slots kept free for control events on top of the queue's capacity.
const CONTROL_SLOTS: usize = 8;

/// Bounded single-consumer queue between input producers and the frame driver.
///
/// `capacity` bounds the presses and shots waiting to be drained.  Control
/// events (see [`InputEvent::is_control`]) get their own headroom.
pub fn event_queue(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity + CONTROL_SLOTS);
    let pending = Arc::new(AtomicUsize::new(0));
    (
        EventSender {
            tx,
            pending: Arc::clone(&pending),
            capacity,
        },
        EventReceiver { rx, pending },
    )
}

#[derive(Clone)]
pub struct EventSender {
    tx: SyncSender<InputEvent>,
    /// Events sent but not yet drained.
    pending: Arc<AtomicUsize>,
    capacity: usize,
}

impl EventSender {
    /// Enqueue an event.  Returns `false` only once the receiving side is gone.
    ///
    /// Presses and shots never block: past `capacity` they are dropped.
    /// Control events are always delivered, waiting for the driver's next
    /// drain in the rare case the headroom is used up as well.
    pub fn push(&self, event: InputEvent) -> bool {
        if event.is_control() {
            return self.push_control(event);
        }

        if self.pending.fetch_add(1, Ordering::AcqRel) >= self.capacity {
            self.pending.fetch_sub(1, Ordering::AcqRel);
            log::warn!("input queue full, dropping {:?}", event);
            return true;
        }
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                log::warn!("input queue full, dropping {:?}", event);
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                false
            }
        }
    }

    fn push_control(&self, event: InputEvent) -> bool {
        self.pending.fetch_add(1, Ordering::AcqRel);
        let delivered = match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                log::warn!("input queue full, waiting to deliver {:?}", event);
                self.tx.send(event).is_ok()
            }
            Err(TrySendError::Disconnected(_)) => false,
        };
        if !delivered {
            self.pending.fetch_sub(1, Ordering::AcqRel);
        }
        delivered
    }
}

pub struct EventReceiver {
    rx: Receiver<InputEvent>,
    pending: Arc<AtomicUsize>,
}

impl EventReceiver {
    /// Everything queued since the last call, oldest first.
    ///
    /// Fails with [`GameError::InputClosed`] once every sender is dropped and
    /// nothing is left to deliver.
    pub fn drain(&self) -> Result<Vec<InputEvent>, GameError> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.pending.fetch_sub(1, Ordering::AcqRel);
                    events.push(event);
                }
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) if events.is_empty() => {
                    return Err(GameError::InputClosed)
                }
                Err(TryRecvError::Disconnected) => return Ok(events),
            }
        }
    }
}

// ── Edge-triggered FIRE ───────────────────────────────────────────────────────

/// Ignores edges that arrive within `window` of the last accepted one.
#[derive(Clone, Debug)]
pub struct Debounce {
    window: Duration,
    last: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Debounce { window, last: None }
    }

    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Falling-edge handler for the FIRE button.
pub struct FireButton {
    debounce: Debounce,
    sender: EventSender,
}

impl FireButton {
    pub fn new(sender: EventSender, debounce: Duration) -> Self {
        FireButton {
            debounce: Debounce::new(debounce),
            sender,
        }
    }

    /// Call on every falling edge.  Returns `false` once the game has hung up.
    pub fn on_falling_edge(&mut self, now: Instant) -> bool {
        if self.debounce.accept(now) {
            self.sender.push(InputEvent::Fire)
        } else {
            true
        }
    }
}

// ── Level-polled buttons ──────────────────────────────────────────────────────

/// Current level of LEFT, RIGHT and START as seen by the frame driver.
///
/// A press holds for `hold_window` after the last press/repeat event, or until
/// a release event arrives, whichever comes first.  Terminals without key
/// release reporting rely on the window alone.
pub struct Keypad {
    hold_window: Duration,
    last_seen: HashMap<Button, Instant>,
}

impl Keypad {
    pub fn new(hold_window: Duration) -> Self {
        Keypad {
            hold_window,
            last_seen: HashMap::new(),
        }
    }

    pub fn press(&mut self, button: Button, now: Instant) {
        self.last_seen.insert(button, now);
    }

    pub fn release(&mut self, button: Button) {
        self.last_seen.remove(&button);
    }

    pub fn is_held(&self, button: Button, now: Instant) -> bool {
        self.last_seen
            .get(&button)
            .map(|&last| now.saturating_duration_since(last) <= self.hold_window)
            .unwrap_or(false)
    }
}

// ── Keyboard stand-in for the four buttons ────────────────────────────────────

fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),
        KeyCode::Char(' ') => Some(Button::Fire),
        KeyCode::Enter | KeyCode::Char('b') | KeyCode::Char('B') => Some(Button::Start),
        _ => None,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Turns terminal key events into [`InputEvent`]s.  Runs on the key-reader
/// thread.
pub struct KeyboardSource {
    sender: EventSender,
    fire: FireButton,
    /// A FIRE key event within this long of the previous one belongs to the
    /// same press.
    hold_window: Duration,
    fire_seen: Option<Instant>,
}

impl KeyboardSource {
    pub fn new(sender: EventSender, fire_debounce: Duration, hold_window: Duration) -> Self {
        KeyboardSource {
            fire: FireButton::new(sender.clone(), fire_debounce),
            sender,
            hold_window,
            fire_seen: None,
        }
    }

    /// Returns `false` once the game has hung up and the reader should stop.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if is_interrupt(&key) {
            return key.kind != KeyEventKind::Press || self.sender.push(InputEvent::Interrupt);
        }

        let button = match button_for(key.code) {
            Some(button) => button,
            None => return true,
        };

        match (button, key.kind) {
            // Classic terminals report a held key as repeated presses.  Only
            // the first one of a run is a falling edge.
            (Button::Fire, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let held = matches!(
                    self.fire_seen,
                    Some(last) if now.saturating_duration_since(last) <= self.hold_window
                );
                self.fire_seen = Some(now);
                held || self.fire.on_falling_edge(now)
            }
            (Button::Fire, KeyEventKind::Release) => {
                self.fire_seen = None;
                true
            }
            (button, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.sender.push(InputEvent::Pressed(button))
            }
            (button, KeyEventKind::Release) => self.sender.push(InputEvent::Released(button)),
        }
    }
}
