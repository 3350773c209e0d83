#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use web_time::{Duration, Instant};
use wheelnav_core::config::NavigatorConfig;
use wheelnav_core::event::{KeyCode, KeyEvent};
use wheelnav_core::scroll::WheelOrigin;
use wheelnav_core::{NavOutcome, Navigator, Section, SectionIndex};

#[derive(Debug, Arbitrary)]
enum Input {
    Enter,
    Leave,
    FocusIn,
    FocusOut,
    Wheel { delta: f32, after_ms: u16, inside: bool },
    TouchStart(f32),
    TouchMove(f32),
    TouchEnd,
    Key(u8),
    Click(u8),
    Locate(u8),
}

#[derive(Debug, Arbitrary)]
struct Script {
    sections: u8,
    inputs: Vec<Input>,
}

const KEYS: [KeyCode; 7] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Home,
    KeyCode::End,
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::Tab,
];

fuzz_target!(|script: Script| {
    let len = usize::from(script.sections % 12);
    let sections = (0..len)
        .map(|i| Section::new(format!("s{i}"), format!("S{i}"), format!("/s{i}")))
        .collect();
    let Ok(index) = SectionIndex::new(sections) else {
        return;
    };
    let mut nav = Navigator::new(index, &NavigatorConfig::default());
    let mut now = Instant::now();

    for input in script.inputs.iter().take(512) {
        let outcome = match *input {
            Input::Enter => nav.pointer_enter(),
            Input::Leave => nav.pointer_leave(),
            Input::FocusIn => nav.focus_in(),
            Input::FocusOut => nav.focus_out(None),
            Input::Wheel { delta, after_ms, inside } => {
                now += Duration::from_millis(u64::from(after_ms));
                let origin = if inside { WheelOrigin::Viewport } else { WheelOrigin::Window };
                nav.wheel(delta, now, origin).outcome
            }
            Input::TouchStart(y) => {
                nav.touch_start(y);
                NavOutcome::Idle
            }
            Input::TouchMove(y) => nav.touch_move(y),
            Input::TouchEnd => {
                nav.touch_end();
                NavOutcome::Idle
            }
            Input::Key(k) => nav.key(&KeyEvent::new(KEYS[usize::from(k) % KEYS.len()])),
            Input::Click(i) => nav.click(usize::from(i)),
            Input::Locate(i) => nav.set_location(format!("/s{i}/detail")),
        };

        if len == 0 {
            assert_eq!(nav.highlighted(), 0);
            assert!(!matches!(outcome, NavOutcome::Navigate(_)));
        } else {
            assert!(nav.highlighted() < len);
        }
        // Disengaged navigators always sit on the current section.
        if !nav.engaged() {
            if let Some(current) = nav.current_index() {
                assert_eq!(nav.highlighted(), current);
            }
        }
        // Window wheel is only captured while engaged.
        if !nav.engaged() {
            assert!(!nav.is_capturing_scroll());
        }
    }
});
