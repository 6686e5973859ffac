//! TUI for zen
//!
//! Draws each layer as a row of slots swept by the hand, with hits popping
//! as the hand passes them.

mod rings;
mod transport;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use tracing::{info, warn};
use zen_rhythm::{
    engine::AudioEngine,
    runtime::RhythmPlayer,
    sequencing::{layer::MAX_SUBDIVISIONS, persist::PatternStore},
    synth::library,
};

use rings::render_rings;
use transport::render_transport;

const BPM_STEP: u32 = 5;

pub struct ZenUi {
    player: RhythmPlayer<Arc<AudioEngine>>,
    store: PatternStore,
    audio_ready: bool,
    /// Selected layer and slot for editing.
    cursor: (usize, usize),
    status: String,
    should_quit: bool,
}

impl ZenUi {
    pub fn new(player: RhythmPlayer<Arc<AudioEngine>>, store: PatternStore, audio_ready: bool) -> Self {
        let status = if audio_ready { "ready" } else { "no audio device, running silent" };
        Self {
            player,
            store,
            audio_ready,
            cursor: (0, 0),
            status: status.to_string(),
            should_quit: false,
        }
    }

    /// Tick the player once per drawn frame until quit.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let mut last = Instant::now();

        while !self.should_quit {
            let now = Instant::now();
            self.player.tick(now.duration_since(last).as_secs_f64());
            last = now;

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        let (layer, slot) = self.cursor;
        let outcome = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char(' ') => {
                let running = self.player.toggle_running();
                self.status = if running { "playing" } else { "stopped" }.to_string();
                Ok(())
            }
            KeyCode::Char('m') => {
                let muted = self.player.pattern_mut().toggle_global_mute();
                self.status = if muted { "all muted" } else { "all unmuted" }.to_string();
                Ok(())
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let bpm = self.player.pattern().tempo().bpm();
                self.player.set_bpm(bpm + BPM_STEP)
            }
            KeyCode::Char('-') => {
                let bpm = self.player.pattern().tempo().bpm();
                self.player.set_bpm(bpm.saturating_sub(BPM_STEP))
            }
            KeyCode::Char('>') => {
                let beats = self.player.pattern().tempo().beats_per_cycle();
                self.player.set_beats_per_cycle(beats + 1)
            }
            KeyCode::Char('<') => {
                let beats = self.player.pattern().tempo().beats_per_cycle();
                self.player.set_beats_per_cycle(beats.saturating_sub(1))
            }
            KeyCode::Up => {
                self.move_cursor(layer.saturating_sub(1), slot);
                Ok(())
            }
            KeyCode::Down => {
                self.move_cursor(layer + 1, slot);
                Ok(())
            }
            KeyCode::Left => {
                self.move_cursor(layer, slot.saturating_sub(1));
                Ok(())
            }
            KeyCode::Right => {
                self.move_cursor(layer, slot + 1);
                Ok(())
            }
            KeyCode::Enter => self
                .player
                .pattern_mut()
                .layer_mut(layer)
                .and_then(|l| l.toggle(slot))
                .map(|_| ()),
            KeyCode::Char(']') => self.resize_layer(layer, 1),
            KeyCode::Char('[') => self.resize_layer(layer, -1),
            KeyCode::Char('f') => self.player.pattern_mut().layer_mut(layer).map(|l| l.fill()),
            KeyCode::Char('c') => self.player.pattern_mut().layer_mut(layer).map(|l| l.clear()),
            KeyCode::Char('n') => self.player.pattern_mut().layer_mut(layer).map(|l| {
                l.set_sound_index(library::wrap_index(l.sound_index() + 1));
            }),
            KeyCode::Char('u') => self.player.pattern_mut().toggle_mute(layer).map(|_| ()),
            KeyCode::Char('o') => self.player.pattern_mut().toggle_solo(layer).map(|_| ()),
            KeyCode::Char('a') => {
                let index = self.player.pattern_mut().add_layer(&mut rand::thread_rng());
                self.move_cursor(index, 0);
                Ok(())
            }
            KeyCode::Char('x') => self.player.remove_layer(layer).map(|_| {
                self.move_cursor(layer, slot);
            }),
            KeyCode::Char('s') => {
                self.save();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = outcome {
            self.status = err.to_string();
        }
    }

    fn resize_layer(&mut self, layer: usize, delta: isize) -> Result<(), zen_rhythm::error::ConfigError> {
        let layer_ref = self.player.pattern_mut().layer_mut(layer)?;
        let subdivisions = layer_ref.subdivisions().saturating_add_signed(delta).clamp(1, MAX_SUBDIVISIONS);
        layer_ref.resize(subdivisions)?;
        self.move_cursor(layer, self.cursor.1);
        Ok(())
    }

    /// Keep the cursor on an existing layer and slot.
    fn move_cursor(&mut self, layer: usize, slot: usize) {
        let layers = self.player.pattern().layers();
        if layers.is_empty() {
            self.cursor = (0, 0);
            return;
        }
        let layer = layer.min(layers.len() - 1);
        let slot = slot.min(layers[layer].subdivisions() - 1);
        self.cursor = (layer, slot);
    }

    fn save(&mut self) {
        match self.store.save(self.player.pattern()) {
            Ok(path) => {
                info!(path = %path.display(), "pattern saved");
                self.status = format!("saved {}", path.display());
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.status = format!("save failed: {err}");
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(4),    // Layers
                Constraint::Length(1), // Status
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.player, self.audio_ready);

        let rings_block = Block::default().title(" Layers ").borders(Borders::ALL);
        let rings_inner = rings_block.inner(chunks[1]);
        frame.render_widget(rings_block, chunks[1]);
        render_rings(frame, rings_inner, &self.player, self.cursor);

        let status = Paragraph::new(Line::from(format!(" {}", self.status)))
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new(Line::from(
            " Space play/stop  m mute all  +/- bpm  </> beats  arrows move  Enter toggle  [/] slots  \
             f fill  c clear  n sound  u mute  o solo  a add  x remove  s save  q quit",
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
