#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use emote_core::{ConnectionState, Expression, FaceTime, Loudness};
use emote_face::{base_expression, ExpressionMachine};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Level(u16),
    Connection(u8),
    Wink,
    Expire,
    Wait(u16),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut machine = ExpressionMachine::default();
    let mut now = FaceTime::ZERO;

    for op in ops {
        let before = machine.expression();
        let change = match op {
            Op::Level(raw) => machine.set_level(Loudness::new(raw as f32 / u16::MAX as f32), now),
            Op::Connection(code) => match ConnectionState::from_raw(code) {
                Some(state) => machine.set_connection(state, now),
                None => None,
            },
            Op::Wink => machine.trigger_wink(now),
            Op::Expire => machine.expire_overrides(now),
            Op::Wait(ms) => {
                now = now + Duration::from_millis(ms as u64);
                machine.recompute(now)
            }
        };

        if let Some(change) = change {
            assert_eq!(change.from, before);
            assert_ne!(change.from, change.to);
        }
        if machine.connection() == ConnectionState::Disconnected {
            assert_eq!(machine.expression(), Expression::Sleeping);
        }
        if machine.transient().map_or(true, |t| !t.is_active(now)) {
            let (expected, _) =
                base_expression(machine.connection(), machine.level(), &machine.config().thresholds);
            let (evaluated, _) = machine.evaluate(now);
            assert_eq!(evaluated, expected);
        }
    }
});
