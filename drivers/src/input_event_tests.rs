use cellos_abi::{InputDevice, InputEvent, InputEventType};

use crate::input_event::{INPUT_QUEUE_CAPACITY, InputChannel};

fn drain(channel: &InputChannel) -> Vec<InputEvent> {
    std::iter::from_fn(|| channel.poll()).collect()
}

#[test]
fn test_initial_pointer_is_screen_centre() {
    let channel = InputChannel::new();
    assert_eq!(channel.pointer_position(), (40, 12));
    assert_eq!(channel.active_pointer(), InputDevice::Ps2Mouse);
    assert!(channel.poll().is_none());
}

#[test]
fn test_push_poll_is_fifo() {
    let channel = InputChannel::new();
    for i in 0..10 {
        let ev = InputEvent::scroll(InputDevice::Ps2Mouse, i + 1, 0, 0, 0);
        assert!(channel.push(ev));
    }
    let wheels: Vec<i8> = drain(&channel).iter().map(|e| e.wheel).collect();
    assert_eq!(wheels, (1..=10).collect::<Vec<i8>>());
}

#[test]
fn test_full_queue_drops_newest() {
    let channel = InputChannel::new();
    for i in 0..INPUT_QUEUE_CAPACITY {
        let ev = InputEvent::pointer_move(InputDevice::Ps2Mouse, i as i16, 0, 0, 0, 0);
        assert!(channel.push(ev));
    }
    let extra = InputEvent::pointer_move(InputDevice::Ps2Mouse, -1, 0, 0, 0, 0);
    assert!(!channel.push(extra));
    let events = drain(&channel);
    assert_eq!(events.len(), INPUT_QUEUE_CAPACITY);
    assert_eq!(events[0].x, 0);
    assert_eq!(events[INPUT_QUEUE_CAPACITY - 1].x, (INPUT_QUEUE_CAPACITY - 1) as i16);
}

#[test]
fn test_button_press_precedes_move() {
    let channel = InputChannel::new();
    assert_eq!(channel.report_pointer_delta(InputDevice::Ps2Mouse, 5, 0, 0b001, 0), 2);
    let events = drain(&channel);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, InputEventType::ButtonDown);
    assert_eq!(events[0].button, 0);
    assert_eq!(events[1].event_type, InputEventType::PointerMove);
    assert_eq!((events[1].x, events[1].y), (45, 12));
    assert_eq!(events[1].dx, 5);
    assert_eq!(events[1].buttons, 0b001);
}

#[test]
fn test_transitions_ascend_then_move_then_scroll() {
    let channel = InputChannel::new();
    channel.report_pointer_delta(InputDevice::Ps2Mouse, 0, 0, 0b010, 0);
    drain(&channel);

    channel.report_pointer_delta(InputDevice::Ps2Mouse, 1, 1, 0b101, -2);
    let kinds: Vec<(InputEventType, u8)> = drain(&channel)
        .iter()
        .map(|e| (e.event_type, e.button))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (InputEventType::ButtonDown, 0),
            (InputEventType::ButtonUp, 1),
            (InputEventType::ButtonDown, 2),
            (InputEventType::PointerMove, 0),
            (InputEventType::Scroll, 0),
        ]
    );
}

#[test]
fn test_buttons_masked_to_three_bits() {
    let channel = InputChannel::new();
    channel.report_pointer_delta(InputDevice::Ps2Mouse, 0, 0, 0xF8, 0);
    assert!(channel.poll().is_none());
    assert!(channel.pointer_buttons().is_empty());
}

#[test]
fn test_position_clamped_and_unchanged_position_emits_no_move() {
    let channel = InputChannel::new();
    channel.report_pointer_delta(InputDevice::Ps2Mouse, -500, 500, 0, 0);
    assert_eq!(channel.pointer_position(), (0, 24));
    assert_eq!(drain(&channel).len(), 1);

    channel.report_pointer_delta(InputDevice::Ps2Mouse, -3, 3, 0, 0);
    assert!(channel.poll().is_none());

    for (dx, dy) in [(1000, -1000), (7, 3), (-90, 2)] {
        channel.report_pointer_delta(InputDevice::Ps2Mouse, dx, dy, 0, 0);
        let (x, y) = channel.pointer_position();
        assert!((0..80).contains(&x) && (0..25).contains(&y));
    }
}

#[test]
fn test_set_bounds_reclamps_and_ignores_invalid() {
    let channel = InputChannel::new();
    channel.set_bounds(20, 10);
    assert_eq!(channel.pointer_position(), (19, 9));
    channel.set_bounds(0, -4);
    let state = channel.pointer_state();
    assert_eq!((state.max_width, state.max_height), (20, 10));
}

#[test]
fn test_hotplug_report_locks_out_legacy() {
    let channel = InputChannel::new();
    channel.report_pointer_delta(InputDevice::UsbMouse, 1, 0, 0, 0);
    assert_eq!(channel.active_pointer(), InputDevice::UsbMouse);
    drain(&channel);

    assert_eq!(channel.report_pointer_delta(InputDevice::Ps2Mouse, 5, 5, 1, 0), 0);
    assert!(channel.poll().is_none());
    assert_eq!(channel.pointer_position(), (41, 12));

    channel.set_hotplug_pointer_active(false);
    assert_eq!(channel.active_pointer(), InputDevice::Ps2Mouse);
    assert_eq!(channel.report_pointer_delta(InputDevice::Ps2Mouse, 1, 0, 0, 0), 1);
}

#[test]
fn test_reset_restores_initial_state() {
    let channel = InputChannel::new();
    channel.report_pointer_delta(InputDevice::UsbTouchpad, 3, 3, 1, 1);
    channel.reset();
    assert_eq!(channel.pending(), 0);
    assert_eq!(channel.pointer_state(), crate::input_event::PointerState::new());
}
