// Terminal stand-in for the game engine: translates crossterm key and mouse
// events into controller polls and renders the connection status line.
//
// Most terminals never deliver key-release events, so held arrows are
// inferred from a hold window sized above the auto-repeat gap; explicit
// releases are honored where the terminal reports them.

use crate::domain::{ControlTuning, Direction, DirectionLevels};
use crate::frameworks::config;
use crate::interface_adapters::state::ClientState;
use crate::use_cases::{ClientEvent, ConnectionStatus, InputController, Throttle};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

const LOG_THROTTLE: Duration = Duration::from_secs(2);

/// Restores the terminal even when the driver unwinds.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
        let _ = terminal::disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = writeln!(stdout);
    }
}

/// Tracks when each direction key was last seen and whether the terminal
/// reported an explicit release.
#[derive(Debug, Default)]
struct KeyHold {
    last_seen: [Option<Instant>; 4],
    released: [bool; 4],
}

impl KeyHold {
    fn record_press(&mut self, direction: Direction, now: Instant) {
        self.last_seen[direction.index()] = Some(now);
        self.released[direction.index()] = false;
    }

    fn record_release(&mut self, direction: Direction) {
        self.released[direction.index()] = true;
    }

    /// Current levels: a direction is held while its key events keep
    /// arriving inside the hold window and no release was reported.
    fn levels(&self, now: Instant, hold_window: Duration) -> DirectionLevels {
        let mut levels = DirectionLevels::default();
        for direction in Direction::ALL {
            let index = direction.index();
            let held = match self.last_seen[index] {
                Some(seen) => !self.released[index] && now.duration_since(seen) <= hold_window,
                None => false,
            };
            levels.set(direction, held);
        }
        levels
    }
}

/// Maps terminal cells onto the canvas coordinate space the shoot zone is
/// authored in.
#[derive(Debug, Clone, Copy)]
struct CellMapper {
    cols: u16,
    rows: u16,
    tuning: ControlTuning,
}

impl CellMapper {
    fn new(cols: u16, rows: u16, tuning: ControlTuning) -> Self {
        Self { cols, rows, tuning }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn to_canvas(&self, column: u16, row: u16) -> (f32, f32) {
        let x = (column as f32 + 0.5) / self.cols.max(1) as f32 * self.tuning.canvas_width();
        let y = (row as f32 + 0.5) / self.rows.max(1) as f32 * self.tuning.canvas_height();
        (x, y)
    }
}

fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn pointer_event(
    controller: &mut InputController,
    mapper: &CellMapper,
    mouse: MouseEvent,
) -> Option<ClientEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = mapper.to_canvas(mouse.column, mouse.row);
            controller.pointer_down(x, y)
        }
        MouseEventKind::Up(MouseButton::Left) => controller.pointer_up(),
        _ => None,
    }
}

// True while forwarding is possible; a closed channel ends the driver.
fn forward(
    event_tx: &mpsc::Sender<ClientEvent>,
    event: ClientEvent,
    drop_log: &mut Throttle,
) -> bool {
    match event_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            if drop_log.ready() {
                warn!(?event, "event channel full; dropping");
            }
            true
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

fn draw_status(status: &ConnectionStatus) -> io::Result<()> {
    let line = match status {
        ConnectionStatus::Connecting => "connecting...".to_string(),
        ConnectionStatus::Joined { player_id } => {
            format!("joined as {player_id} - arrows steer, mouse fires, q quits")
        }
        ConnectionStatus::Disconnected { reason } => format!("disconnected: {reason}"),
    };
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    write!(stdout, "{line}")?;
    stdout.flush()
}

/// Runs the interactive driver until quit, channel shutdown or disconnect.
/// Blocking; callers run it off the async runtime.
pub fn run_terminal_driver(
    mut controller: InputController,
    tuning: ControlTuning,
    state: ClientState,
) -> io::Result<()> {
    let _guard = RawModeGuard::enter()?;
    let (cols, rows) = terminal::size()?;
    let mut mapper = CellMapper::new(cols, rows, tuning);
    let mut hold = KeyHold::default();
    let mut drop_log = Throttle::new(LOG_THROTTLE);
    let mut shown_status: Option<ConnectionStatus> = None;
    let mut next_tick = Instant::now() + config::INPUT_TICK_INTERVAL;

    'driver: loop {
        // Pump terminal events until the next controller tick is due.
        let wait = next_tick.saturating_duration_since(Instant::now());
        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) => {
                    if is_quit(&key) {
                        break;
                    }
                    if let Some(direction) = arrow_direction(key.code) {
                        if key.kind == KeyEventKind::Release {
                            hold.record_release(direction);
                        } else {
                            hold.record_press(direction, Instant::now());
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(event) = pointer_event(&mut controller, &mapper, mouse) {
                        if !forward(&state.event_tx, event, &mut drop_log) {
                            break;
                        }
                    }
                }
                Event::Resize(new_cols, new_rows) => mapper.resize(new_cols, new_rows),
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            next_tick += config::INPUT_TICK_INTERVAL;
            for event in controller.poll(hold.levels(now, config::KEY_HOLD_WINDOW)) {
                if !forward(&state.event_tx, event, &mut drop_log) {
                    break 'driver;
                }
            }
        }

        let status = state.status_rx.borrow().clone();
        if shown_status.as_ref() != Some(&status) {
            draw_status(&status)?;
            let disconnected = matches!(status, ConnectionStatus::Disconnected { .. });
            shown_status = Some(status);
            if disconnected {
                // Leave the indicator on screen; nothing more to forward.
                break;
            }
        }
    }
    Ok(())
}
