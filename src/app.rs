//! App state and main loop: input handling, watching the poller slots,
//! relaying keystrokes, and drawing.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::warn;

use crate::device::DeviceClient;
use crate::keycodes::{self, Modifiers};
use crate::poller::{spawn_report_poller, spawn_usb_poller, ReportView};
use crate::types::UsbLinkState;
use crate::ui::{
    cpu::draw_cpu_cores, disks::draw_disks, header::draw_header, keyboard::draw_keyboard,
    mem::draw_mem, usb::draw_usb,
};

pub struct App {
    client: DeviceClient,
    poll_interval: Duration,

    // relay input state
    modifiers: Modifiers,
    input: String,

    should_quit: bool,
}

impl App {
    pub fn new(client: DeviceClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
            modifiers: Modifiers::default(),
            input: String::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (usb_poller, usb_rx) = spawn_usb_poller(self.client.clone(), self.poll_interval);
        let (report_poller, report_rx) =
            spawn_report_poller(self.client.clone(), self.poll_interval);

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal, usb_rx, report_rx).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        usb_poller.shutdown().await;
        report_poller.shutdown().await;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        usb_rx: watch::Receiver<Option<UsbLinkState>>,
        report_rx: watch::Receiver<ReportView>,
    ) -> Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    self.handle_key(k);
                }
            }
            if self.should_quit {
                break;
            }

            // Latest slot values; writes are atomic replacements by the pollers
            let usb = *usb_rx.borrow();
            let view = report_rx.borrow().clone();
            terminal.draw(|f| self.draw(f, usb, &view))?;

            sleep(Duration::from_millis(100)).await;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        // one physical keystroke = one relayed command
        if k.kind == KeyEventKind::Release {
            return;
        }
        // Control chords are local; they never reach the relay buffer
        if k.modifiers.contains(KeyModifiers::CONTROL) {
            match k.code {
                KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.reset_usb(),
                _ => {}
            }
            return;
        }
        match k.code {
            KeyCode::F(1) => self.modifiers.ctrl = !self.modifiers.ctrl,
            KeyCode::F(2) => self.modifiers.shift = !self.modifiers.shift,
            KeyCode::F(3) => self.modifiers.alt = !self.modifiers.alt,
            KeyCode::F(4) => self.modifiers.gui = !self.modifiers.gui,
            KeyCode::F(5) => self.send_special(keycodes::KEY_TAB),
            KeyCode::F(6) => self.send_special(keycodes::KEY_ESC),
            KeyCode::F(7) => self.send_special(keycodes::KEY_RETURN),
            KeyCode::F(8) => self.send_special(keycodes::KEY_BACKSPACE),
            KeyCode::Up => self.send_special(keycodes::KEY_UP_ARROW),
            KeyCode::Down => self.send_special(keycodes::KEY_DOWN_ARROW),
            KeyCode::Left => self.send_special(keycodes::KEY_LEFT_ARROW),
            KeyCode::Right => self.send_special(keycodes::KEY_RIGHT_ARROW),
            KeyCode::Enter => self.send_string(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
    }

    // Relay sends are fire-and-forget: outcome is logged, never retried,
    // and never blocks the next send.
    fn send_special(&self, keycode: u8) {
        let client = self.client.clone();
        let mods = self.modifiers;
        tokio::spawn(async move {
            if let Err(e) = client.send_special(mods, keycode).await {
                warn!("special key relay failed: {e}");
            }
        });
    }

    fn send_string(&self) {
        let client = self.client.clone();
        let mods = self.modifiers;
        // empty text is sendable; the device decides what to accept
        let text = self.input.clone();
        tokio::spawn(async move {
            if let Err(e) = client.send_text(mods, &text).await {
                warn!("string relay failed: {e}");
            }
        });
    }

    fn reset_usb(&self) {
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.reset_usb().await {
                warn!("usb reset failed: {e}");
            }
        });
    }

    fn draw(&self, f: &mut ratatui::Frame<'_>, usb: Option<UsbLinkState>, view: &ReportView) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(6),    // per-core CPU
                Constraint::Length(3), // memory
                Constraint::Min(5),    // disks
                Constraint::Length(5), // usb + keyboard
            ])
            .split(f.area());

        draw_header(f, rows[0], self.client.base_url(), view);
        draw_cpu_cores(f, rows[1], &view.report);
        draw_mem(f, rows[2], view.report.memory);
        draw_disks(f, rows[3], &view.report.disks);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[4]);
        draw_usb(f, bottom[0], usb);
        draw_keyboard(f, bottom[1], &self.input, self.modifiers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        // nothing listens here; relay spawns just log their failure
        let client = DeviceClient::new("http://127.0.0.1:9").unwrap();
        App::new(client, Duration::from_secs(3))
    }

    #[tokio::test]
    async fn function_keys_toggle_modifiers() {
        let mut app = app();
        app.handle_key(key(KeyCode::F(1)));
        app.handle_key(key(KeyCode::F(2)));
        assert!(app.modifiers.ctrl);
        assert!(app.modifiers.shift);
        assert_eq!(app.modifiers.mask(), 3);

        app.handle_key(key(KeyCode::F(1)));
        assert!(!app.modifiers.ctrl);
        assert_eq!(app.modifiers.mask(), 2);
    }

    #[tokio::test]
    async fn typed_characters_build_the_relay_buffer() {
        let mut app = app();
        for ch in "hi there".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input, "hi ther");

        // Enter relays but keeps the buffer for repeat sends
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input, "hi ther");
    }

    #[tokio::test]
    async fn ctrl_chords_stay_local() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(app.input.is_empty());
        assert!(!app.should_quit);

        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn release_events_are_ignored() {
        let mut app = app();
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(app.input.is_empty());
    }
}
