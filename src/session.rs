//! Interactive calculator session.
//!
//! Reads lines of key presses, applies them to one calculator and re-renders
//! the panel after every line. Lines starting with `:` are session commands.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::calculator::{Calculator, copy_readout};
use crate::config::{Settings, SettingsStore, SettingsWatcher};
use crate::input::tokenize;
use crate::ui::render_frame;

const HELP: &str = "\
keys:  0-9 .  + - * / (or × ÷ −)  = / Enter  % percent  n / ± negate
       c / AC / Escape clear  Backspace / ⌫ delete
       :copy  copy the display   :help  this text   :quit  leave";

/// What a line asked the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keys were applied; show the panel.
    Render,
    Copy,
    Help,
    Quit,
}

pub struct Session {
    calculator: Calculator,
    settings: Settings,
    store: Option<SettingsStore>,
    plain: bool,
}

impl Session {
    pub fn new(settings: Settings, plain: bool) -> Self {
        Self {
            calculator: Calculator::new(),
            settings,
            store: None,
            plain,
        }
    }

    /// Reload settings from `store` when the watcher reports a change.
    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply one input line. Unknown keys are skipped with a warning.
    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        let trimmed = line.trim();
        match trimmed {
            ":q" | ":quit" => return LineOutcome::Quit,
            ":copy" => return LineOutcome::Copy,
            ":help" | ":h" | "?" => return LineOutcome::Help,
            _ => {}
        }

        for token in tokenize(trimmed) {
            match token.command {
                Some(command) => {
                    self.calculator.apply(command);
                }
                None => warn!("Ignoring unknown key '{}'", token.text),
            }
        }

        LineOutcome::Render
    }

    pub fn render(&self) -> String {
        render_frame(
            &self.calculator.readout(),
            &self.calculator.tape(),
            &self.settings.frame_style(self.plain),
        )
    }

    /// Re-read settings from the store; keeps the current ones on failure.
    pub fn reload_settings(&mut self) {
        let Some(store) = &self.store else {
            return;
        };

        match store.load() {
            Ok(settings) => {
                if settings != self.settings {
                    info!("Settings changed, theme is now {}", settings.theme);
                }
                self.settings = settings;
            }
            Err(e) => warn!("Keeping current settings: {}", e),
        }
    }

    /// Run until `:quit` or end of input.
    pub fn run<R, W>(
        &mut self,
        input: R,
        mut out: W,
        watcher: Option<&SettingsWatcher>,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "{}", self.render()).context("Failed to write display")?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;

            if watcher.is_some_and(SettingsWatcher::take_change) {
                self.reload_settings();
            }

            match self.handle_line(&line) {
                LineOutcome::Quit => break,
                LineOutcome::Help => writeln!(out, "{}", HELP)?,
                LineOutcome::Copy => match copy_readout(&self.calculator.readout()) {
                    Ok(text) => writeln!(out, "copied {}", text)?,
                    Err(e) => writeln!(out, "{}", e)?,
                },
                LineOutcome::Render => writeln!(out, "{}", self.render())?,
            }
            out.flush()?;
        }

        debug!("Session finished");
        Ok(())
    }
}
