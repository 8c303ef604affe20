//! Frame timeline builder.
//!
//! Expands the heterogeneous temporal encodings of the source formats
//! (explicit repeat counts, absolute/delta frame markers, one row per
//! frame) into a gap-free sequence of per-frame records. All running
//! state lives in an explicit [`TimelineBuilder`] value owned by one
//! conversion; nothing is shared across files.

use std::collections::VecDeque;

use log::warn;

use crate::anglemod::{QuantizerState, DEGREES_PER_COUNT};
use crate::gesture::{suppressed, DoubleTapRule};
use crate::types::{
    AxisSample, Button, EventTiming, FrameRecord, InputEvent, MouseButtons, MouseState, PadButtons,
    PadState, ViewAxis,
};

/// Timeline configuration, fixed for the duration of one conversion.
#[derive(Clone, Copy, Debug)]
pub struct TimelineConfig {
    /// Degrees of view rotation per raw mouse count.
    pub angle_step: f64,
    /// Negate the yaw-derived horizontal delta (the source engine's
    /// positive yaw is a leftward turn, which is negative mouse X).
    pub invert_yaw: bool,
    /// Negate the pitch-derived vertical delta.
    pub invert_pitch: bool,
    /// Trailing repeats of the final held state appended by
    /// [`TimelineBuilder::finish`]. Bounded padding for formats whose
    /// last event holds indefinitely; 0 for explicit-duration formats.
    pub tail_frames: u32,
    /// Optional double-tap suppression rule.
    pub gesture: Option<DoubleTapRule>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            angle_step: DEGREES_PER_COUNT,
            invert_yaw: true,
            invert_pitch: false,
            tail_frames: 0,
            gesture: None,
        }
    }
}

/// Builds the per-frame record sequence for one source file.
#[derive(Debug)]
pub struct TimelineBuilder {
    config: TimelineConfig,
    /// Output frames already emitted.
    cursor: u64,
    /// Sticky state: persists across events until explicitly changed.
    keys: Vec<u32>,
    mouse_buttons: MouseButtons,
    pad_buttons: PadButtons,
    axes: [i16; 6],
    yaw: QuantizerState,
    pitch: QuantizerState,
    /// Newly-pressed keysyms of recent frames, most recent last.
    history: VecDeque<Vec<u32>>,
    /// Keys of the previously emitted frame, for newly-pressed derivation.
    prev_frame_keys: Vec<u32>,
    pending: Vec<FrameRecord>,
}

impl TimelineBuilder {
    #[must_use]
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            cursor: 0,
            keys: Vec::new(),
            mouse_buttons: MouseButtons::NONE,
            pad_buttons: PadButtons::NONE,
            axes: [0; 6],
            yaw: QuantizerState::new(),
            pitch: QuantizerState::new(),
            history: VecDeque::new(),
            prev_frame_keys: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Total frames emitted so far.
    #[must_use]
    pub fn frames_emitted(&self) -> u64 {
        self.cursor
    }

    /// Drain the records produced since the last call.
    pub fn take_records(&mut self) -> Vec<FrameRecord> {
        std::mem::take(&mut self.pending)
    }

    /// Process one event: fill up to its position with the previous
    /// state, apply its state changes, then emit its own frames.
    pub fn push(&mut self, event: &InputEvent) {
        debug_assert!(
            event.held.iter().all(|b| event.pressed.contains(b)),
            "held buttons must be a subset of pressed"
        );

        // Fill phase: repeat the previous resolved state.
        let fill = match event.timing {
            EventTiming::AtFrame(frame) => {
                if frame < self.cursor {
                    warn!(
                        "frame marker {} behind cursor {}, not filling",
                        frame, self.cursor
                    );
                    0
                } else {
                    frame - self.cursor
                }
            }
            EventTiming::AfterFrames(n) => n.saturating_sub(1),
            EventTiming::Repeat(_) | EventTiming::Single => 0,
        };
        for _ in 0..fill {
            self.emit_held();
        }

        // Apply phase: update sticky state.
        for button in &event.released {
            self.clear_button(*button);
        }
        for button in &event.held {
            self.set_button(*button);
        }
        let mut delta = (0i64, 0i64);
        for sample in &event.axes {
            match *sample {
                AxisSample::Stick { axis, value } => self.axes[axis.index()] = value,
                AxisSample::Angle { axis, degrees } => match axis {
                    ViewAxis::Yaw => {
                        let d = self.yaw.advance(degrees, self.config.angle_step);
                        delta.0 = if self.config.invert_yaw { -d } else { d };
                    }
                    ViewAxis::Pitch => {
                        let d = self.pitch.advance(degrees, self.config.angle_step);
                        delta.1 = if self.config.invert_pitch { -d } else { d };
                    }
                },
            }
        }

        // Emit phase: one-shots and the mouse delta only appear on the
        // first frame the event covers.
        let emit = match event.timing {
            EventTiming::Repeat(n) => u64::from(n),
            _ => 1,
        };
        if emit > 0 {
            let oneshot: Vec<Button> = event
                .pressed
                .iter()
                .filter(|b| !event.held.contains(b))
                .copied()
                .collect();
            self.emit_first(&oneshot, delta);
            for _ in 1..emit {
                self.emit_held();
            }
        }
    }

    /// Append the bounded tail padding of the final held state.
    pub fn finish(&mut self) {
        for _ in 0..self.config.tail_frames {
            self.emit_held();
        }
    }

    fn set_button(&mut self, button: Button) {
        match button {
            Button::Key(keysym) => {
                if !self.keys.contains(&keysym) {
                    self.keys.push(keysym);
                }
            }
            Button::Mouse(b) => self.mouse_buttons |= b,
            Button::Pad(b) => self.pad_buttons |= b,
        }
    }

    fn clear_button(&mut self, button: Button) {
        match button {
            Button::Key(keysym) => self.keys.retain(|&k| k != keysym),
            Button::Mouse(b) => self.mouse_buttons &= !b,
            Button::Pad(b) => self.pad_buttons &= !b,
        }
    }

    /// Emit one frame of the current held state, with zero mouse delta.
    fn emit_held(&mut self) {
        self.emit_frame(&[], (0, 0));
    }

    /// Emit the first frame of an event, carrying its one-shot buttons
    /// and resolved mouse delta.
    fn emit_first(&mut self, oneshot: &[Button], delta: (i64, i64)) {
        self.emit_frame(oneshot, delta);
    }

    fn emit_frame(&mut self, oneshot: &[Button], delta: (i64, i64)) {
        let mut keys = self.keys.clone();
        let mut mouse_buttons = self.mouse_buttons;
        let mut pad_buttons = self.pad_buttons;
        for button in oneshot {
            match *button {
                Button::Key(keysym) => {
                    if !keys.contains(&keysym) {
                        keys.push(keysym);
                    }
                }
                Button::Mouse(b) => mouse_buttons |= b,
                Button::Pad(b) => pad_buttons |= b,
            }
        }

        let newly_pressed: Vec<u32> = keys
            .iter()
            .filter(|k| !self.prev_frame_keys.contains(k))
            .copied()
            .collect();
        if let Some(rule) = &self.config.gesture {
            let history: Vec<Vec<u32>> = self.history.iter().cloned().collect();
            if suppressed(&history, &newly_pressed, rule) {
                keys.retain(|&k| k != rule.secondary);
            }
        }
        if let Some(rule) = &self.config.gesture {
            self.history.push_back(newly_pressed);
            while self.history.len() > rule.window {
                self.history.pop_front();
            }
        }

        self.prev_frame_keys = keys.clone();
        keys.sort_unstable();
        keys.dedup();

        self.pending.push(FrameRecord {
            keys,
            mouse: MouseState {
                dx: delta.0 as i32,
                dy: delta.1 as i32,
                buttons: mouse_buttons,
            },
            pad: PadState {
                axes: self.axes,
                buttons: pad_buttons,
            },
        });
        self.cursor += 1;
    }
}

/// Run a full event sequence through a builder. Convenience for tests
/// and in-memory conversions.
#[must_use]
pub fn resolve_events(events: &[InputEvent], config: TimelineConfig) -> Vec<FrameRecord> {
    let mut builder = TimelineBuilder::new(config);
    let mut records = Vec::new();
    for event in events {
        builder.push(event);
        records.append(&mut builder.take_records());
    }
    builder.finish();
    records.append(&mut builder.take_records());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anglemod::{angle_mod, quantize};
    use crate::types::StickAxis;

    const UP: Button = Button::Pad(PadButtons::DPAD_UP);
    const SPACE: Button = Button::Key(0x20);

    fn repeat(n: u32, pressed: &[Button], released: &[Button]) -> InputEvent {
        InputEvent {
            timing: EventTiming::Repeat(n),
            pressed: pressed.to_vec(),
            held: pressed.to_vec(),
            released: released.to_vec(),
            axes: Vec::new(),
        }
    }

    #[test]
    fn test_repeat_count_scenario() {
        // "3,U" (hold up for 3 frames) followed by "0" (clear) yields
        // exactly 3 records with up set, then none.
        let events = [
            repeat(3, &[UP], &[]),
            repeat(0, &[], &[UP]),
            repeat(2, &[], &[]),
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        assert_eq!(records.len(), 5);
        for record in &records[..3] {
            assert!(record.pad.buttons.contains(PadButtons::DPAD_UP));
        }
        for record in &records[3..] {
            assert!(!record.pad.buttons.contains(PadButtons::DPAD_UP));
        }
    }

    #[test]
    fn test_timeline_completeness() {
        // Total emitted frames equals the declared duration.
        let events = [
            repeat(4, &[UP], &[]),
            repeat(1, &[], &[]),
            repeat(7, &[], &[]),
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        assert_eq!(records.len(), 12);
    }

    #[test]
    fn test_absolute_marker_fills_previous_state() {
        let events = [
            InputEvent {
                timing: EventTiming::AtFrame(0),
                pressed: vec![SPACE],
                held: vec![SPACE],
                ..Default::default()
            },
            InputEvent {
                timing: EventTiming::AtFrame(5),
                released: vec![SPACE],
                ..Default::default()
            },
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        // Frames 0..=4 hold space, frame 5 is the release row.
        assert_eq!(records.len(), 6);
        for record in &records[..5] {
            assert_eq!(record.keys, vec![0x20]);
        }
        assert!(records[5].keys.is_empty());
    }

    #[test]
    fn test_delta_marker_matches_absolute() {
        let absolute = [
            InputEvent {
                timing: EventTiming::AtFrame(0),
                pressed: vec![SPACE],
                held: vec![SPACE],
                ..Default::default()
            },
            InputEvent {
                timing: EventTiming::AtFrame(5),
                released: vec![SPACE],
                ..Default::default()
            },
        ];
        let delta = [
            InputEvent {
                timing: EventTiming::AfterFrames(1),
                pressed: vec![SPACE],
                held: vec![SPACE],
                ..Default::default()
            },
            InputEvent {
                timing: EventTiming::AfterFrames(5),
                released: vec![SPACE],
                ..Default::default()
            },
        ];
        let config = TimelineConfig::default();
        assert_eq!(resolve_events(&absolute, config), resolve_events(&delta, config));
    }

    #[test]
    fn test_marker_behind_cursor_skips_fill() {
        let events = [
            InputEvent {
                timing: EventTiming::AtFrame(3),
                ..Default::default()
            },
            InputEvent {
                timing: EventTiming::AtFrame(1),
                pressed: vec![SPACE],
                held: vec![SPACE],
                ..Default::default()
            },
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        // 3 fill + marker row, then the late marker emits exactly one row.
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_sticky_persists_until_released() {
        let events = [
            repeat(1, &[SPACE], &[]),
            repeat(3, &[], &[]),
            repeat(1, &[], &[SPACE]),
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        for record in &records[..4] {
            assert_eq!(record.keys, vec![0x20]);
        }
        assert!(records[4].keys.is_empty());
    }

    #[test]
    fn test_oneshot_decays_after_one_frame() {
        let events = [
            InputEvent {
                timing: EventTiming::Repeat(3),
                pressed: vec![SPACE],
                held: vec![],
                ..Default::default()
            },
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        assert_eq!(records[0].keys, vec![0x20]);
        assert!(records[1].keys.is_empty());
        assert!(records[2].keys.is_empty());
    }

    #[test]
    fn test_stick_sample_persists_across_events() {
        let events = [
            InputEvent {
                timing: EventTiming::Repeat(2),
                axes: vec![AxisSample::Stick {
                    axis: StickAxis::LeftX,
                    value: -32767,
                }],
                ..Default::default()
            },
            repeat(2, &[], &[]),
        ];
        let records = resolve_events(&events, TimelineConfig::default());
        assert!(records.iter().all(|r| r.pad.axes[0] == -32767));
    }

    #[test]
    fn test_angle_sequence_with_wraparound() {
        // Absolute yaw [10, 10, 190] with no baseline: deltas [0, 0, d]
        // where d reproduces 180 degrees of rotation under quantization.
        let config = TimelineConfig {
            invert_yaw: false,
            ..Default::default()
        };
        let events: Vec<InputEvent> = [10.0, 10.0, 190.0]
            .iter()
            .map(|&yaw| InputEvent {
                timing: EventTiming::Single,
                axes: vec![AxisSample::Angle {
                    axis: ViewAxis::Yaw,
                    degrees: yaw,
                }],
                ..Default::default()
            })
            .collect();
        let records = resolve_events(&events, config);
        assert_eq!(records[0].mouse.dx, 0);
        assert_eq!(records[1].mouse.dx, 0);
        let d = i64::from(records[2].mouse.dx);
        assert!(d != 0);
        let reproduced = quantize(d as f64 * config.angle_step + angle_mod(10.0));
        assert_eq!(reproduced, quantize(190.0));
    }

    #[test]
    fn test_yaw_inversion_negates_dx() {
        let make = |invert| {
            let config = TimelineConfig {
                invert_yaw: invert,
                ..Default::default()
            };
            let events: Vec<InputEvent> = [0.0, 45.0]
                .iter()
                .map(|&yaw| InputEvent {
                    timing: EventTiming::Single,
                    axes: vec![AxisSample::Angle {
                        axis: ViewAxis::Yaw,
                        degrees: yaw,
                    }],
                    ..Default::default()
                })
                .collect();
            resolve_events(&events, config)[1].mouse.dx
        };
        assert_eq!(make(true), -make(false));
    }

    #[test]
    fn test_repeat_does_not_repeat_mouse_delta() {
        let config = TimelineConfig {
            invert_yaw: false,
            ..Default::default()
        };
        let events = [
            InputEvent {
                timing: EventTiming::Single,
                axes: vec![AxisSample::Angle {
                    axis: ViewAxis::Yaw,
                    degrees: 0.0,
                }],
                ..Default::default()
            },
            InputEvent {
                timing: EventTiming::Repeat(3),
                axes: vec![AxisSample::Angle {
                    axis: ViewAxis::Yaw,
                    degrees: 30.0,
                }],
                ..Default::default()
            },
        ];
        let records = resolve_events(&events, config);
        assert!(records[1].mouse.dx > 0);
        assert_eq!(records[2].mouse.dx, 0);
        assert_eq!(records[3].mouse.dx, 0);
    }

    #[test]
    fn test_tail_padding_repeats_final_state() {
        let config = TimelineConfig {
            tail_frames: 4,
            ..Default::default()
        };
        let events = [repeat(1, &[SPACE], &[])];
        let records = resolve_events(&events, config);
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.keys == vec![0x20]));
    }

    #[test]
    fn test_gesture_suppression_drops_secondary_once() {
        const LEFT_KEY: u32 = 0xff51;
        let config = TimelineConfig {
            gesture: Some(DoubleTapRule {
                directions: &[LEFT_KEY],
                secondary: 0x20,
                window: 15,
            }),
            ..Default::default()
        };
        // Tap left twice, then press space together with the second tap's
        // follow-up frame: the space press is suppressed on that frame.
        let tap = |key| InputEvent {
            timing: EventTiming::Single,
            pressed: vec![Button::Key(key)],
            ..Default::default()
        };
        let events = [
            tap(LEFT_KEY),
            InputEvent {
                timing: EventTiming::Single,
                ..Default::default()
            },
            tap(LEFT_KEY),
            tap(0x20),
            tap(0x20),
        ];
        let records = resolve_events(&events, config);
        assert!(records[3].keys.is_empty(), "secondary suppressed");
        assert_eq!(records[4].keys, vec![0x20], "suppression is per-frame");
    }
}
