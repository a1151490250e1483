use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model, update};
use crate::session::Session;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the editor until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or a
    /// terminal read/draw fails. File errors are reported in the UI and
    /// never end the loop.
    pub fn run(&self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - markedly requires an interactive terminal")?;

        let result = self.run_in(&mut terminal);

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn run_in(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        let size = terminal.size()?;

        let mut model = self.build_model((size.width, size.height));
        if let Some(path) = &self.initial_file {
            info!(path = %path.display(), "opening initial file");
            Self::open_initial_file(&mut model, path);
        }

        Self::event_loop(terminal, &mut model)
    }

    /// Assemble the starting model from the builder settings.
    pub(super) fn build_model(&self, terminal_size: (u16, u16)) -> Model {
        let session = Session::new(self.title_mode, self.write_mode);
        let mut model = Model::new(session, terminal_size);
        model.start_dir.clone_from(&self.start_dir);
        model.theme = self.theme.clone();
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;
        let mut shown_title = String::new();

        loop {
            if model.session.title() != shown_title {
                shown_title = model.session.title().to_string();
                execute!(stdout(), SetTitle(&shown_title))?;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Some(msg) =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer)
                {
                    Self::dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer)
                    {
                        Self::dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                info!("quit");
                break;
            }
        }
        Ok(())
    }

    /// Apply a message: pure update, then its side effects.
    pub(super) fn dispatch(model: &mut Model, msg: Message) {
        debug!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
    }
}
