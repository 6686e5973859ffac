//! Transport bar widget - tempo, play state, cycle position

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};
use zen_rhythm::{engine::AudioEngine, runtime::RhythmPlayer};

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    player: &RhythmPlayer<Arc<AudioEngine>>,
    audio_ready: bool,
) {
    let pattern = player.pattern();
    let tempo = pattern.tempo();
    let block = Block::default()
        .title(format!(" zen: {} ", pattern.name))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(24)])
        .split(inner);

    let running = player.is_running();
    let play = if running { "▶ Playing" } else { "⏸ Stopped" };
    let audio = if audio_ready { "audio on" } else { "silent" };

    let mut spans = vec![
        Span::styled(format!(" BPM: {}  ", tempo.bpm()), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("Beats: {}  ", tempo.beats_per_cycle()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{play}  "),
            Style::default().fg(if running { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("{:.2}/{:.2}s  ", player.clock().beat_time(), player.clock().cycle_duration()),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("{audio}  "), Style::default().fg(Color::DarkGray)),
    ];
    if pattern.global_mute() {
        spans.push(Span::styled("MUTED", Style::default().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), columns[0]);

    let ratio = (player.clock().beat_time() / player.clock().cycle_duration()).clamp(0.0, 1.0);
    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(Color::Magenta))
        .ratio(ratio);
    frame.render_widget(gauge, columns[1]);
}
