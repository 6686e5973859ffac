use rand::{rngs::StdRng, SeedableRng};
use zen_rhythm::{
    engine::{Activation, AudioEngine, Mixer},
    runtime::RhythmPlayer,
    sequencing::Pattern,
    synth::library,
    EngineConfig,
};

const SAMPLE_RATE: f32 = 48_000.0;

fn session() -> (AudioEngine, Mixer) {
    let engine = AudioEngine::new(EngineConfig::default());
    match engine.activate_with_rng(SAMPLE_RATE, &mut StdRng::seed_from_u64(11)) {
        Activation::Started(mixer) => (engine, mixer),
        Activation::AlreadyActive => panic!("fresh engine reported active"),
    }
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

#[test]
fn renders_silence_with_nothing_triggered() {
    let (_engine, mut mixer) = session();
    let mut out = vec![1.0; 4_096];
    mixer.render(&mut out);

    assert!(out.iter().all(|&s| s == 0.0));
}

#[test]
fn every_profile_is_audible_bounded_and_ends() {
    for (index, profile) in library::library().iter().enumerate() {
        let (engine, mut mixer) = session();
        assert!(engine.trigger(library::profile(index)) > 0, "{}", profile.name);

        // Two seconds covers the longest release plus padding.
        let mut out = vec![0.0; 2 * SAMPLE_RATE as usize];
        mixer.render(&mut out);

        assert!(out.iter().all(|s| s.is_finite()), "{}", profile.name);
        assert!(peak(&out) > 0.001, "{} is silent", profile.name);
        assert!(peak(&out) <= 1.0, "{} clips", profile.name);
        assert_eq!(mixer.active_voices(), 0, "{} still sounding", profile.name);

        let mut tail = vec![1.0; 1_024];
        mixer.render(&mut tail);
        assert!(tail.iter().all(|&s| s == 0.0), "{}", profile.name);
    }
}

#[test]
fn master_gain_scales_output() {
    let render = |master_gain: f32| {
        let engine = AudioEngine::new(EngineConfig {
            master_gain,
            ..EngineConfig::default()
        });
        let Activation::Started(mut mixer) =
            engine.activate_with_rng(SAMPLE_RATE, &mut StdRng::seed_from_u64(11))
        else {
            panic!("fresh engine reported active");
        };
        engine.trigger(library::profile(0));
        let mut out = vec![0.0; 4_800];
        mixer.render(&mut out);
        peak(&out)
    };

    let loud = render(0.6);
    let quiet = render(0.3);
    approx::assert_relative_eq!(quiet * 2.0, loud, max_relative = 1e-4);
}

#[test]
fn player_drives_engine_end_to_end() {
    let (engine, mut mixer) = session();
    let engine = std::sync::Arc::new(engine);
    let mut player = RhythmPlayer::new(Pattern::default(), engine.clone(), &EngineConfig::default());

    // One 60 fps frame: the top element of the default ring fires.
    let hits = player.tick(1.0 / 60.0);
    assert_eq!(hits.len(), 1);

    let mut out = vec![0.0; 2_400];
    mixer.render(&mut out);
    assert!(peak(&out) > 0.01);
}

#[test]
fn globally_muted_player_stays_silent() {
    let (engine, mut mixer) = session();
    let engine = std::sync::Arc::new(engine);
    let mut pattern = Pattern::default();
    pattern.set_global_mute(true);
    let mut player = RhythmPlayer::new(pattern, engine.clone(), &EngineConfig::default());

    for _ in 0..600 {
        player.tick(1.0 / 60.0);
    }
    let mut out = vec![1.0; 4_800];
    mixer.render(&mut out);

    assert!(out.iter().all(|&s| s == 0.0));
}
