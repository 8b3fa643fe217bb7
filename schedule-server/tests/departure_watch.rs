//! The terminal watcher keeps refreshing without an interactive stdin.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

#[test]
fn keeps_running_after_stdin_closes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"lunes_a_viernes": [{{"Plaza": "08:27"}}], "sabados": [], "domingos": []}}"#
    )
    .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_departure-watch"))
        .arg("Plaza")
        .env("SCHEDULE_TIMETABLE", file.path())
        .env("SCHEDULE_REFRESH_SECS", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    // Several refresh intervals
    sleep(Duration::from_millis(2500));
    let status = child.try_wait().unwrap();

    child.kill().unwrap();
    child.wait().unwrap();

    assert!(status.is_none(), "watcher exited early: {:?}", status);
}
