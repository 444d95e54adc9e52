use std::sync::Mutex;

use crate::cmdline::{parse_bool, parse_u32, tokens};
use crate::klog::{self, KlogLevel};
use crate::string::{bytes_as_str, copy_truncated};
use crate::{IrqMutex, klog_info};

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn capture_backend(args: core::fmt::Arguments<'_>) {
    CAPTURED.lock().unwrap().push(args.to_string());
}

#[test]
fn test_klog_filters_by_level_and_routes_to_backend() {
    klog::klog_register_backend(capture_backend);
    klog::klog_set_level(KlogLevel::Warn);
    klog_info!("hidden {}", 1);
    crate::klog_warn!("shown {}", 2);
    klog::klog_set_level(KlogLevel::Info);
    klog_info!("now shown");
    klog::klog_clear_backend();

    let lines = CAPTURED.lock().unwrap().clone();
    assert_eq!(lines, vec!["shown 2".to_string(), "now shown".to_string()]);
    assert_eq!(KlogLevel::parse("DEBUG"), Some(KlogLevel::Debug));
    assert_eq!(KlogLevel::parse("loud"), None);
}

#[test]
fn test_irq_mutex_excludes_and_releases() {
    let m = IrqMutex::new(5u32);
    {
        let mut g = m.lock();
        *g += 1;
        assert!(m.is_locked());
        assert!(m.try_lock().is_none());
    }
    assert!(!m.is_locked());
    assert_eq!(*m.lock(), 6);
}

#[test]
fn test_cmdline_parsing() {
    assert_eq!(parse_bool("YES"), Some(true));
    assert_eq!(parse_bool("0"), Some(false));
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_u32("16ms"), Some(16));
    assert_eq!(parse_u32("x"), None);
    let pairs: Vec<_> = tokens(" a=1  flag b=x=y ").collect();
    assert_eq!(pairs, vec![("a", "1"), ("flag", ""), ("b", "x=y")]);
}

#[test]
fn test_fixed_string_helpers() {
    let mut buf = [0u8; 4];
    assert_eq!(copy_truncated(&mut buf, "hello"), 4);
    assert_eq!(bytes_as_str(&buf), "hell");
    assert_eq!(copy_truncated(&mut buf, "hi"), 2);
    assert_eq!(bytes_as_str(&buf), "hi");
    let mut narrow = [0u8; 2];
    assert_eq!(copy_truncated(&mut narrow, "é!"), 2);
}

#[test]
fn test_numfmt_formats_signed_and_unsigned() {
    let mut num = crate::NumBuf::new();
    assert_eq!(num.u64(0), b"0");
    assert_eq!(num.u64(1234567), b"1234567");
    assert_eq!(num.u64(u64::MAX), b"18446744073709551615");
    assert_eq!(num.i64(-42), b"-42");
    assert_eq!(num.i64(i64::MIN), b"-9223372036854775808");

    let mut tiny = [0u8; 2];
    assert_eq!(crate::numfmt::fmt_u64(123, &mut tiny), b"0");
    assert_eq!(crate::numfmt::fmt_i64(-12, &mut tiny), b"0");
}
