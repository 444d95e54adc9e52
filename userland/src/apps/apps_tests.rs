use cellos_abi::keys::{KEY_BACKSPACE, KEY_DOWN, KEY_ENTER, KEY_F2, KEY_LEFT, KEY_UP};
use cellos_abi::{KeyPress, Rect};
use cellos_fs::{FileSystem, RamFs};

use super::bounce::Bounce;
use super::cubedip::{COLUMNS, CubeDip};
use super::file_manager::FileExplorer;
use super::notepad::{NOTE_CAPACITY, Notepad};
use super::shell::{LINE_MAX, MAX_LINES, Shell};
use super::snake::{Direction, Snake, board_size};
use super::sysinfo::SystemMonitor;
use super::welcome::Welcome;
use super::{LAUNCH_TABLE, instantiate, launch_entry};
use crate::appkit::{AppKind, LaunchRequest};
use crate::test_support::{AppHarness, press, wheel};
use crate::theme::TEXT_ON_GREY;

fn enter(h: &mut AppHarness, app: &mut dyn crate::App) {
    h.key(app, KeyPress::plain(KEY_ENTER));
}

fn run(h: &mut AppHarness, shell: &mut Shell, cmd: &str) {
    h.keys(&mut *shell, cmd);
    enter(h, shell);
}

fn shell_harness() -> AppHarness {
    AppHarness::new(launch_entry(AppKind::Shell).geometry)
}

#[test]
fn test_launch_table_matches_kinds() {
    let mut fs = RamFs::seeded();
    for entry in LAUNCH_TABLE.iter() {
        assert_eq!(launch_entry(entry.kind).label, entry.label);
        let app = instantiate(entry.kind, None, entry.geometry, &mut fs, 0);
        assert_eq!(app.kind(), entry.kind);
    }
}

#[test]
fn test_app_names_resolve_case_insensitively() {
    assert_eq!(AppKind::from_name("Editor"), Some(AppKind::Notepad));
    assert_eq!(AppKind::from_name("files"), Some(AppKind::Explorer));
    assert_eq!(AppKind::from_name("CUBEDIP"), Some(AppKind::CubeDip));
    assert_eq!(AppKind::from_name("sysinfo"), Some(AppKind::System));
    assert_eq!(AppKind::from_name("doom"), None);
}

#[test]
fn test_welcome_draws_help() {
    let mut h = AppHarness::new(launch_entry(AppKind::Welcome).geometry);
    h.tick(&mut Welcome);
    assert!(h.row(1).contains("cellos Display Manager"));
    assert!(h.row(7).contains("ESC exits windowed mode."));
}

#[test]
fn test_system_monitor_reports_ticks_pointer_and_cwd() {
    let mut h = AppHarness::new(launch_entry(AppKind::System).geometry);
    let mut mon = SystemMonitor::new();
    h.ticks = 1234;
    h.pointer = (40, 12);
    h.fs.change_dir("docs").unwrap();
    h.tick(&mut mon);
    h.tick(&mut mon);
    assert_eq!(mon.frames(), 2);
    assert!(h.row(2).starts_with(" Ticks: 1234"));
    assert!(h.row(3).starts_with(" Mouse: 40  , 12"));
    assert!(h.row(4).starts_with(" CWD: /docs"));
    assert_eq!(h.cell(1, 1).attr, TEXT_ON_GREY);
}

#[test]
fn test_bounce_reflects_off_bottom_edge() {
    let mut h = AppHarness::new(launch_entry(AppKind::Bounce).geometry);
    let mut ball = Bounce::new();
    h.tick(&mut ball);
    assert_eq!(ball.position(), (6, 4));
    for _ in 0..4 {
        h.tick(&mut ball);
    }
    assert_eq!(ball.position(), (10, 7));
    assert_eq!(ball.direction(), (1, -1));
    assert_eq!(h.cell(10, 7).ch, b'O');

    h.keys(&mut ball, "a");
    assert_eq!(ball.direction(), (-1, -1));
}

#[test]
fn test_shell_greets_and_runs_pwd() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    assert_eq!(shell.lines().len(), 2);
    run(&mut h, &mut shell, "pwd");
    assert_eq!(shell.lines()[2], "> pwd");
    assert_eq!(shell.lines()[3], "/");
    assert!(shell.input().is_empty());

    h.tick(&mut shell);
    assert!(h.row(2).starts_with("> pwd"));
    assert!(h.row(12).starts_with("> _"));
}

#[test]
fn test_shell_filesystem_commands() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    run(&mut h, &mut shell, "mkdir games");
    run(&mut h, &mut shell, "cd games");
    run(&mut h, &mut shell, "pwd");
    run(&mut h, &mut shell, "cd ..");
    run(&mut h, &mut shell, "cd nowhere");
    let tail: Vec<&str> = shell.lines()[2..].iter().map(|s| s.as_str()).collect();
    assert_eq!(
        tail,
        vec![
            "> mkdir games", "dir created", "> cd games", "ok", "> pwd", "/games", "> cd ..", "ok",
            "> cd nowhere", "cd failed",
        ]
    );

    run(&mut h, &mut shell, "clear");
    run(&mut h, &mut shell, "ls");
    let listing: Vec<&str> = shell.lines()[1..].iter().map(|s| s.as_str()).collect();
    assert_eq!(
        listing,
        vec!["<DIR> docs", "<DIR> etc", "<DIR> games", "file1.txt", "log.txt"]
    );
}

#[test]
fn test_shell_write_read_and_delete() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    run(&mut h, &mut shell, "write memo.txt hello world");
    assert_eq!(shell.lines().last().unwrap(), "written");
    assert_eq!(h.fs.read_to_end("memo.txt").unwrap(), b"hello world");

    run(&mut h, &mut shell, "read memo.txt");
    assert_eq!(shell.lines().last().unwrap(), "hello world");

    run(&mut h, &mut shell, "write");
    assert_eq!(shell.lines().last().unwrap(), "write <file> <text>");

    run(&mut h, &mut shell, "del memo.txt");
    assert_eq!(shell.lines().last().unwrap(), "file deleted");
    run(&mut h, &mut shell, "read memo.txt");
    assert_eq!(shell.lines().last().unwrap(), "read failed");

    run(&mut h, &mut shell, "frobnicate");
    assert_eq!(shell.lines().last().unwrap(), "Unknown command");
}

#[test]
fn test_shell_read_splits_long_lines() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    let mut data = "x".repeat(LINE_MAX + 10).into_bytes();
    data.extend_from_slice(b"\nend\n");
    h.fs.write("long.txt", &data).unwrap();

    run(&mut h, &mut shell, "read long.txt");
    let n = shell.lines().len();
    assert_eq!(shell.lines()[n - 3].len(), LINE_MAX);
    assert_eq!(shell.lines()[n - 2], "x".repeat(10));
    assert_eq!(shell.lines()[n - 1], "end");
}

#[test]
fn test_shell_launch_commands_queue_requests() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    run(&mut h, &mut shell, "edit file1.txt");
    run(&mut h, &mut shell, "snake");
    run(&mut h, &mut shell, "explorer");
    assert_eq!(
        h.launches,
        vec![
            LaunchRequest {
                kind: AppKind::Notepad,
                arg: Some("file1.txt".to_string()),
            },
            LaunchRequest {
                kind: AppKind::Snake,
                arg: None,
            },
            LaunchRequest {
                kind: AppKind::Explorer,
                arg: None,
            },
        ]
    );
}

#[test]
fn test_shell_line_editing() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    h.keys(&mut shell, "pwx");
    h.key(&mut shell, KeyPress::plain(KEY_BACKSPACE));
    h.keys(&mut shell, "d");
    assert_eq!(shell.input(), "pwd");

    h.key(&mut shell, KeyPress::plain(KEY_LEFT));
    h.key(&mut shell, KeyPress::plain(KEY_LEFT));
    h.keys(&mut shell, "X");
    assert_eq!(shell.input(), "pXwd");
    assert_eq!(shell.cursor(), 2);

    // Ctrl chords are not text.
    h.key(&mut shell, KeyPress::ctrl(b'c'));
    assert_eq!(shell.input(), "pXwd");

    h.keys(&mut shell, &"y".repeat(100));
    assert_eq!(shell.input().len(), LINE_MAX);
}

#[test]
fn test_shell_history_walks_back_and_restores_input() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    run(&mut h, &mut shell, "echo one");
    run(&mut h, &mut shell, "echo two");
    h.keys(&mut shell, "ec");

    let up = KeyPress::plain(KEY_UP);
    let down = KeyPress::plain(KEY_DOWN);
    h.key(&mut shell, up);
    assert_eq!(shell.input(), "echo two");
    h.key(&mut shell, up);
    assert_eq!(shell.input(), "echo one");
    h.key(&mut shell, up);
    assert_eq!(shell.input(), "echo one");
    h.key(&mut shell, down);
    assert_eq!(shell.input(), "echo two");
    h.key(&mut shell, down);
    assert_eq!(shell.input(), "ec");
    assert_eq!(shell.cursor(), 2);
}

#[test]
fn test_shell_scrollback_is_bounded() {
    let mut shell = Shell::new();
    for i in 0..100 {
        shell.push_line(&format!("line {i}"));
    }
    assert_eq!(shell.lines().len(), MAX_LINES);
    assert_eq!(shell.lines()[0], "line 20");

    shell.push_line(&"z".repeat(200));
    assert_eq!(shell.lines().last().unwrap().len(), LINE_MAX);
}

#[test]
fn test_shell_wheel_and_scrollbar() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    for _ in 0..10 {
        run(&mut h, &mut shell, "help");
    }
    // 2 greeting lines, then 4 per help; 12 rows visible.
    assert_eq!(shell.lines().len(), 42);
    assert_eq!(shell.scroll_top(), 30);

    h.pointer(&mut shell, wheel(20, 10, 3));
    assert_eq!(shell.scroll_top(), 27);
    h.pointer(&mut shell, wheel(20, 10, -10));
    assert_eq!(shell.scroll_top(), 30);

    h.focused = false;
    h.pointer(&mut shell, wheel(20, 10, 5));
    assert_eq!(shell.scroll_top(), 30);

    let frame = h.frame;
    h.pointer(&mut shell, press(frame.x + frame.width - 1, frame.y));
    assert_eq!(shell.scroll_top(), 0);

    // Clicks off the scrollbar leave the view alone.
    h.pointer(&mut shell, press(frame.x + 3, frame.y + 5));
    assert_eq!(shell.scroll_top(), 0);
}

#[test]
fn test_shell_draws_after_clear() {
    let mut h = shell_harness();
    let mut shell = Shell::new();
    run(&mut h, &mut shell, "clear");
    assert!(shell.lines().is_empty());
    h.tick(&mut shell);
    assert!(h.row(12).starts_with("> _"));
}

#[test]
fn test_notepad_greeting_saved_as_default_file() {
    let mut h = AppHarness::new(launch_entry(AppKind::Notepad).geometry);
    let mut note = Notepad::open(None, &mut h.fs);
    assert_eq!(note.text(), b"Window editor ready...");
    assert_eq!(note.filename(), None);
    assert_eq!(note.cursor(), note.text().len());

    h.tick(&mut note);
    assert!(h.row(14).starts_with("F2 save | (untitled)"));

    h.keys(&mut note, "!");
    assert!(note.is_dirty());
    h.tick(&mut note);
    assert!(h.row(14).starts_with("F2 save | (untitled) *"));

    h.key(&mut note, KeyPress::plain(KEY_F2));
    assert!(!note.is_dirty());
    assert_eq!(note.filename(), Some("note.txt"));
    assert_eq!(h.fs.read_to_end("note.txt").unwrap(), b"Window editor ready...!");
}

#[test]
fn test_notepad_opens_existing_and_missing_files() {
    let mut h = AppHarness::new(launch_entry(AppKind::Notepad).geometry);
    let mut note = Notepad::open(Some("file1.txt"), &mut h.fs);
    assert_eq!(note.text(), b"Hello from cellos root!\n");
    h.tick(&mut note);
    assert!(h.row(0).starts_with("Hello from cellos root!"));
    assert_eq!(h.cell(0, 1).ch, b'_');

    let fresh = Notepad::open(Some("missing.txt"), &mut h.fs);
    assert!(fresh.text().is_empty());
    assert_eq!(fresh.filename(), Some("missing.txt"));
}

#[test]
fn test_notepad_vertical_moves_keep_column() {
    let mut h = AppHarness::new(launch_entry(AppKind::Notepad).geometry);
    let mut note = Notepad::open(Some("draft.txt"), &mut h.fs);
    h.keys(&mut note, "abcdef");
    h.key(&mut note, KeyPress::plain(KEY_ENTER));
    h.keys(&mut note, "xy");
    h.key(&mut note, KeyPress::plain(KEY_ENTER));
    h.keys(&mut note, "lmnopq");
    assert_eq!(note.text(), b"abcdef\nxy\nlmnopq");

    let up = KeyPress::plain(KEY_UP);
    let down = KeyPress::plain(KEY_DOWN);
    h.key(&mut note, up);
    assert_eq!(note.cursor(), 9);
    h.key(&mut note, up);
    assert_eq!(note.cursor(), 6);
    h.key(&mut note, up);
    assert_eq!(note.cursor(), 6);
    h.key(&mut note, down);
    assert_eq!(note.cursor(), 9);
    h.key(&mut note, down);
    assert_eq!(note.cursor(), 16);

    h.key(&mut note, KeyPress::plain(KEY_BACKSPACE));
    assert_eq!(note.text(), b"abcdef\nxy\nlmnop");
}

#[test]
fn test_notepad_capacity_is_enforced() {
    let mut h = AppHarness::new(launch_entry(AppKind::Notepad).geometry);
    let mut note = Notepad::open(Some("big.txt"), &mut h.fs);
    h.keys(&mut note, &"a".repeat(NOTE_CAPACITY + 100));
    assert_eq!(note.text().len(), NOTE_CAPACITY - 1);
    h.key(&mut note, KeyPress::plain(KEY_F2));
    assert_eq!(h.fs.read_to_end("big.txt").unwrap().len(), NOTE_CAPACITY - 1);
}

#[test]
fn test_snake_eats_food_and_hits_wall() {
    let geometry = launch_entry(AppKind::Snake).geometry;
    let board = board_size(geometry.width, geometry.height);
    assert_eq!(board, (30, 12));

    // With ticks 0 the food lands straight ahead of the head.
    let mut snake = Snake::new(board, 0);
    assert_eq!(snake.head(), (3, 3));
    assert_eq!(snake.food(), (9, 3));

    snake.advance(5);
    assert_eq!(snake.head(), (3, 3));
    for step in 1..=6 {
        snake.advance(step * 10);
    }
    assert_eq!(snake.head(), (9, 3));
    assert_eq!(snake.score(), 10);
    assert_eq!(snake.segments().len(), 5);
    assert_ne!(snake.food(), snake.head());

    let mut t = 60;
    while snake.is_alive() && t < 1000 {
        t += 10;
        snake.advance(t);
    }
    assert!(!snake.is_alive());
    assert_eq!(snake.head(), (29, 3));
}

#[test]
fn test_snake_steering_and_restart() {
    let geometry = launch_entry(AppKind::Snake).geometry;
    let mut h = AppHarness::new(geometry);
    let mut snake = Snake::new(board_size(geometry.width, geometry.height), 0);

    h.keys(&mut snake, "a");
    assert_eq!(snake.direction(), Direction::Right);
    h.keys(&mut snake, "w");
    assert_eq!(snake.direction(), Direction::Up);

    let mut t = 0;
    while snake.is_alive() && t < 1000 {
        t += 10;
        h.ticks = t;
        h.tick(&mut snake);
    }
    assert!(!snake.is_alive());
    h.tick(&mut snake);
    assert!(h.row(1).contains("Snake game over. Press R."));

    h.keys(&mut snake, "r");
    assert!(snake.is_alive());
    assert_eq!(snake.score(), 0);
    assert_eq!(snake.head(), (3, 3));
    assert_eq!(snake.direction(), Direction::Right);
}

#[test]
fn test_cubedip_block_falls_lands_and_scores() {
    let mut h = AppHarness::new(launch_entry(AppKind::CubeDip).geometry);
    let mut game = CubeDip::new(0);
    assert_eq!(game.block(), (5, 0));

    game.fall(3);
    assert_eq!(game.block(), (5, 0));
    game.fall(5);
    assert_eq!(game.block(), (5, 1));

    h.keys(&mut game, "aa");
    assert_eq!(game.block(), (3, 1));

    let mut t = 5;
    while game.score() == 0 {
        t += 5;
        game.fall(t);
    }
    assert!(game.is_filled(3, 15));
    assert_eq!(game.score(), 5);
    assert_eq!(game.block(), ((t % COLUMNS as u64) as usize, 0));

    h.ticks = t + 5;
    h.tick(&mut game);
    assert!(h.row(0).starts_with("cubeDip 5"));
    assert_eq!(h.cell(4, 16).ch, b'#');
}

#[test]
fn test_cubedip_moves_are_blocked_by_the_stack() {
    let mut h = AppHarness::new(launch_entry(AppKind::CubeDip).geometry);
    let mut game = CubeDip::new(0);
    // Land one block in column 5, then drop the next one (column 0) to the
    // bottom row and try to push it into column 5's neighbour.
    let mut t = 0;
    while game.score() == 0 {
        t += 10;
        game.fall(t);
    }
    assert!(game.is_filled(5, 15));
    assert_eq!(game.block(), (0, 0));
    h.keys(&mut game, "dddd");
    assert_eq!(game.block(), (4, 0));
    while game.block().1 < 15 {
        t += 10;
        game.fall(t);
    }
    h.keys(&mut game, "d");
    assert_eq!(game.block(), (4, 15));
}

#[test]
fn test_cubedip_game_over_and_restart() {
    let mut h = AppHarness::new(launch_entry(AppKind::CubeDip).geometry);
    let mut game = CubeDip::new(0);
    let mut t = 0;
    while game.is_alive() && t < 100_000 {
        t += 10;
        game.fall(t);
    }
    assert!(!game.is_alive());
    assert!(game.is_filled(0, 0));

    h.tick(&mut game);
    assert!(h.row(1).contains("cubeDip game over. Press R."));
    h.keys(&mut game, "R");
    assert!(game.is_alive());
    assert_eq!(game.score(), 0);
    assert!(!game.is_filled(0, 0));
}

#[test]
fn test_explorer_lists_and_navigates() {
    let mut h = AppHarness::new(launch_entry(AppKind::Explorer).geometry);
    let mut explorer = FileExplorer::new();
    h.tick(&mut explorer);
    assert!(h.row(0).starts_with("DIR /"));
    assert!(h.row(1).starts_with("[D] docs"));
    assert!(h.row(2).starts_with("[D] etc"));
    assert!(h.row(3).starts_with("[F] file1.txt"));
    assert!(h.row(4).starts_with("[F] log.txt"));
    assert!(h.row(5).starts_with("Enter=open"));
    assert_eq!(h.cell(0, 1).attr, TEXT_ON_GREY);

    let down = KeyPress::plain(KEY_DOWN);
    for _ in 0..10 {
        h.key(&mut explorer, down);
    }
    assert_eq!(explorer.selected(), 3);
    h.key(&mut explorer, KeyPress::plain(KEY_UP));
    assert_eq!(explorer.selected(), 2);

    h.key(&mut explorer, KeyPress::plain(KEY_ENTER));
    assert_eq!(
        h.launches,
        vec![LaunchRequest {
            kind: AppKind::Notepad,
            arg: Some("file1.txt".to_string()),
        }]
    );

    for _ in 0..5 {
        h.key(&mut explorer, KeyPress::plain(KEY_UP));
    }
    h.key(&mut explorer, KeyPress::plain(KEY_ENTER));
    assert_eq!(h.fs.cwd(), "/docs");
    assert_eq!(explorer.selected(), 0);
    h.tick(&mut explorer);
    assert!(h.row(0).starts_with("DIR /docs"));
    assert!(h.row(1).starts_with("[F] readme.txt"));

    h.key(&mut explorer, KeyPress::plain(KEY_BACKSPACE));
    assert_eq!(h.fs.cwd(), "/");
}

#[test]
fn test_explorer_clamps_selection_when_entries_vanish() {
    let mut h = AppHarness::new(launch_entry(AppKind::Explorer).geometry);
    let mut explorer = FileExplorer::new();
    for _ in 0..3 {
        h.key(&mut explorer, KeyPress::plain(KEY_DOWN));
    }
    assert_eq!(explorer.selected(), 3);
    h.fs.delete("log.txt").unwrap();
    h.fs.delete("file1.txt").unwrap();
    h.tick(&mut explorer);
    assert_eq!(explorer.selected(), 1);
}

#[test]
fn test_explorer_scrolls_to_keep_selection_visible() {
    let mut h = AppHarness::new(Rect::new(0, 2, 30, 5));
    for i in 0..8 {
        h.fs.create(&format!("f{i}.txt")).unwrap();
    }
    let mut explorer = FileExplorer::new();
    for _ in 0..6 {
        h.key(&mut explorer, KeyPress::plain(KEY_DOWN));
    }
    h.tick(&mut explorer);
    // 3 entry rows fit between the path row and the hint row.
    assert_eq!(explorer.scroll_top(), 4);
    assert_eq!(h.cell(0, 3).attr, TEXT_ON_GREY);
    assert!(h.row(4).starts_with("Enter=open"));
}
