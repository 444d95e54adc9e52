use crate::input::{InputDevice, InputEvent, InputEventType, PointerButtons};
use crate::keys::{KEY_BACKSPACE, KEY_UP, KeyModifiers, KeyPress};
use crate::{Cell, FsEntry, FsEntryKind, Rect, VgaColor, attr};

#[test]
fn test_attr_packs_background_high() {
    assert_eq!(attr(VgaColor::White, VgaColor::Blue), 0x1F);
    let cell = Cell::new(b'A', attr(VgaColor::Black, VgaColor::LightGrey));
    assert_eq!(cell.fg(), 0);
    assert_eq!(cell.bg(), 7);
    assert_eq!(cell.to_vga_word(), 0x7041);
}

#[test]
fn test_blank_cell_is_default() {
    assert_eq!(Cell::default(), Cell::BLANK);
    assert_eq!(Cell::BLANK.attr, 0x0F);
}

#[test]
fn test_rect_contains_is_half_open() {
    let r = Rect::new(2, 3, 4, 5);
    assert!(r.contains(2, 3));
    assert!(r.contains(5, 7));
    assert!(!r.contains(6, 3));
    assert!(!r.contains(2, 8));
    assert_eq!(r.inflate(1), Rect::new(1, 2, 6, 7));
    assert_eq!(Rect::new(0, 0, 0, 3).area(), 0);
}

#[test]
fn test_key_press_classification() {
    assert!(KeyPress::ctrl(b'W').is_ctrl(b'w'));
    assert!(!KeyPress::plain(b'w').is_ctrl(b'w'));
    assert!(KeyPress::plain(KEY_BACKSPACE).is_backspace());
    assert!(KeyPress::plain(0x7F).is_backspace());
    assert_eq!(KeyPress::plain(b'x').printable(), Some(b'x'));
    assert_eq!(KeyPress::plain(KEY_UP).printable(), None);
    let alt = KeyPress {
        key: b'x',
        modifiers: KeyModifiers::ALT,
    };
    assert_eq!(alt.printable(), None);
}

#[test]
fn test_button_event_carries_bit_and_mask() {
    let ev = InputEvent::button(InputDevice::Ps2Mouse, true, 0, 10, 4, 0b001);
    assert_eq!(ev.event_type, InputEventType::ButtonDown);
    assert!(ev.is_primary());
    assert_eq!(ev.buttons(), PointerButtons::LEFT);
    let mv = InputEvent::pointer_move(InputDevice::UsbMouse, 1, 1, 1, 0, 0);
    assert!(!mv.is_primary());
    assert!(InputDevice::UsbTouchpad.is_hotplug());
    assert!(!InputDevice::Ps2Mouse.is_hotplug());
}

#[test]
fn test_fs_entry_truncates_long_names() {
    let long = "abcdefghijklmnopqrstuvwxyz0123456789";
    let entry = FsEntry::new(long, FsEntryKind::File, 3);
    assert_eq!(entry.name().len(), 31);
    assert!(!entry.is_dir());
}
