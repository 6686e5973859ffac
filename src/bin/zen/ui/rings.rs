//! Layer rows - one line per ring, slots laid out left to right from the top
//! of the circle, with the slot under the hand underlined.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use zen_rhythm::{
    engine::AudioEngine,
    runtime::RhythmPlayer,
    sequencing::color::parse_hex,
    synth::library,
};

/// Pop intensity above which a dot is drawn large.
const POP_THRESHOLD: f64 = 0.3;

pub fn render_rings(
    frame: &mut Frame,
    area: Rect,
    player: &RhythmPlayer<Arc<AudioEngine>>,
    cursor: (usize, usize),
) {
    let pattern = player.pattern();
    let view = player.frame_view();
    let phase = view.beat_time / view.cycle_duration;

    let lines: Vec<Line> = pattern
        .layers()
        .iter()
        .enumerate()
        .map(|(index, layer)| {
            let color = parse_hex(layer.color())
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(Color::White);
            let hand_slot =
                ((phase * layer.subdivisions() as f64) as usize).min(layer.subdivisions() - 1);

            let flags = match (layer.is_muted(), layer.is_soloed(), pattern.is_audible(index)) {
                (true, _, _) => "M",
                (_, true, _) => "S",
                (_, _, false) => "-",
                _ => " ",
            };
            let sound = library::profile(layer.sound_index()).name;
            let mut spans = vec![Span::styled(
                format!(" {:>2} {flags} {sound:<18} {:>2} ", index + 1, layer.subdivisions()),
                Style::default().fg(color),
            )];

            for (slot, &on) in layer.elements().iter().enumerate() {
                let intensity = view
                    .dots
                    .iter()
                    .find(|d| d.layer == index && d.element == slot)
                    .map_or(0.0, |d| d.intensity);

                let symbol = match (on, intensity > POP_THRESHOLD) {
                    (true, true) => "◉",
                    (true, false) => "●",
                    (false, _) => "·",
                };

                let mut style = Style::default().fg(if on { color } else { Color::DarkGray });
                if intensity > POP_THRESHOLD {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if slot == hand_slot && view.running {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if (index, slot) == cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(symbol, style));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
