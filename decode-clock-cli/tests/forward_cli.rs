use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use assert_cmd::prelude::*;
use predicates::str::contains;

use decode_clock_core::{ClockSample, TimingOffset, SAMPLE_LEN};
use tempfile::TempDir;

const DECODE: &str = "230610_120000    14.074 Rx FT8    -12  0.3 1234 CQ K1ABC FN42";

fn decode_clock_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("decode-clock"));
    cmd.env("RUST_LOG", "info");
    cmd
}

/// Kills the forwarder when the test is done with it.
struct ForwarderProcess {
    child: Child,
}

impl ForwarderProcess {
    fn start(log: &Path, socket: &Path, extra: &[&str]) -> Self {
        let child = decode_clock_cmd()
            .arg("--log")
            .arg(log)
            .arg("--socket")
            .arg(socket)
            .args(["--poll-interval-ms", "10"])
            .args(extra)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn decode-clock");
        Self { child }
    }

    /// Block until the forwarder reports it is following the log.
    fn wait_until_following(&mut self) {
        let stdout = self.child.stdout.take().expect("piped stdout");
        let mut lines = BufReader::new(stdout).lines();
        loop {
            let line = lines
                .next()
                .expect("decode-clock exited before following the log")
                .expect("read stdout");
            if line.contains("waiting for decodes") {
                break;
            }
        }
        // Keep draining so the child never blocks on a full pipe.
        std::thread::spawn(move || for _ in lines {});
    }
}

impl Drop for ForwarderProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn bind_chrony(dir: &TempDir) -> (PathBuf, UnixDatagram) {
    let path = dir.path().join("chrony.sock");
    let socket = UnixDatagram::bind(&path).expect("bind chrony stand-in");
    socket
        .set_read_timeout(Some(Duration::from_secs(10)))
        .expect("read timeout");
    (path, socket)
}

fn append(path: &Path, text: &str) {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open for append");
    file.write_all(text.as_bytes()).expect("append");
}

fn recv_sample(socket: &UnixDatagram) -> ClockSample {
    let mut buf = [0u8; 128];
    let len = socket.recv(&mut buf).expect("sample within timeout");
    assert_eq!(len, SAMPLE_LEN);
    ClockSample::decode(&buf[..len]).expect("decode sample")
}

#[test]
fn appended_decode_reaches_chrony_socket() {
    let dir = TempDir::new().expect("tempdir");
    let log = dir.path().join("ALL.TXT");
    fs::write(&log, "230610_115945    14.074 Rx FT8     -7  1.7 2011 W1AW K1ABC -09\n").expect("seed");
    let (socket_path, chrony) = bind_chrony(&dir);

    let mut forwarder = ForwarderProcess::start(&log, &socket_path, &[]);
    forwarder.wait_until_following();

    append(&log, &format!("{DECODE}\n"));
    let sample = recv_sample(&chrony);

    assert_eq!(sample.offset, TimingOffset(-0.3), "pre-existing decode must be skipped");
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs_f64();
    let stamped = sample.seconds as f64 + sample.micros as f64 / 1e6;
    assert!((now - stamped).abs() < 5.0, "stamp {stamped} too far from {now}");

    chrony
        .set_read_timeout(Some(Duration::from_millis(300)))
        .expect("short timeout");
    let mut buf = [0u8; 128];
    assert!(chrony.recv(&mut buf).is_err(), "exactly one sample per decode");
}

#[test]
fn as_logged_sign_and_notify_watch_forward_raw_delta_t() {
    let dir = TempDir::new().expect("tempdir");
    let log = dir.path().join("ALL.TXT");
    fs::write(&log, "").expect("seed");
    let (socket_path, chrony) = bind_chrony(&dir);

    let mut forwarder = ForwarderProcess::start(
        &log,
        &socket_path,
        &["--offset-sign", "as-logged", "--watch", "notify"],
    );
    forwarder.wait_until_following();

    append(&log, &format!("{DECODE}\n"));
    assert_eq!(recv_sample(&chrony).offset, TimingOffset(0.3));
}

#[test]
fn malformed_line_terminates_with_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let log = dir.path().join("ALL.TXT");
    fs::write(&log, "230610_120000 14074000 Rx\n").expect("seed");
    let (socket_path, _chrony) = bind_chrony(&dir);

    decode_clock_cmd()
        .arg("--log")
        .arg(&log)
        .arg("--socket")
        .arg(&socket_path)
        .arg("--from-start")
        .assert()
        .failure()
        .stderr(contains("line 1"))
        .stderr(contains("expected at least 6 fields"));
}

#[test]
fn missing_socket_names_the_chrony_directive() {
    let dir = TempDir::new().expect("tempdir");
    let log = dir.path().join("ALL.TXT");
    fs::write(&log, "").expect("seed");

    decode_clock_cmd()
        .arg("--log")
        .arg(&log)
        .arg("--socket")
        .arg(dir.path().join("absent.sock"))
        .assert()
        .failure()
        .stderr(contains("no such socket"))
        .stderr(contains("refclock SOCK"));
}

#[test]
fn missing_log_is_reported() {
    let dir = TempDir::new().expect("tempdir");

    decode_clock_cmd()
        .arg("--log")
        .arg(dir.path().join("ALL.TXT"))
        .arg("--socket")
        .arg(dir.path().join("absent.sock"))
        .assert()
        .failure()
        .stderr(contains("cannot open log file"));
}

#[test]
fn log_argument_is_required() {
    decode_clock_cmd()
        .assert()
        .failure()
        .stderr(contains("--log"));
}
