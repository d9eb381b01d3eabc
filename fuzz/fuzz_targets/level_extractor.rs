#![no_main]

use emote_audio::{extract_level, AudioFrame, LevelExtractor, LevelMode, WindowSpec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let frame = AudioFrame::copy_from(data);

    for mode in [LevelMode::Rms, LevelMode::MeanAbs] {
        let window = WindowSpec {
            mode,
            ..Default::default()
        };
        let level = extract_level(&frame, &window).value();
        assert!((0.0..=1.0).contains(&level));
        if data.len() < 4 {
            assert_eq!(level, 0.0);
        }
    }

    // Same bytes split into uneven callbacks
    let mut extractor = LevelExtractor::default();
    for chunk in data.chunks(997) {
        if let Some(level) = extractor.push(&AudioFrame::copy_from(chunk)) {
            assert!((0.0..=1.0).contains(&level.value()));
        }
        assert!(extractor.buffered() < extractor.window().size);
    }
});
