// CLASSIFICATION: COMMUNITY
// Filename: ramdev_sessions.rs v0.2
// Date Modified: 2027-08-02
// Author: Cohesix Codex

use cohesix_ramdev::{DevConfig, DevFile, OpenMode, RamDev};
use std::io::{Read, Seek, SeekFrom, Write};

fn dev(capacity: usize) -> RamDev {
    let _ = env_logger::builder().is_test(true).try_init();
    RamDev::new(DevConfig {
        name: "ram0".into(),
        capacity,
    })
    .expect("allocate")
}

#[test]
fn sessions_share_one_buffer() {
    let dev = dev(64);
    let mut w = dev.open(OpenMode::WRITE);
    dev.write(&mut w, b"shared").expect("write");
    let mut r = dev.open(OpenMode::READ);
    let mut buf = [0u8; 16];
    let n = dev.read(&mut r, &mut buf);
    assert_eq!(&buf[..n], b"shared");
    dev.close(w);
    dev.close(r);
}

#[test]
fn round_trip_full_capacity() {
    let dev = dev(256);
    let payload: Vec<u8> = (0..=255u8).collect();
    let mut s = dev.open(OpenMode::READ | OpenMode::WRITE);
    assert_eq!(dev.write(&mut s, &payload).expect("write"), 256);
    dev.seek(&mut s, SeekFrom::Start(0));
    let mut buf = vec![0u8; 256];
    assert_eq!(dev.read(&mut s, &mut buf), 256);
    assert_eq!(buf, payload);
}

#[test]
fn short_read_at_end_of_data() {
    let dev = dev(32);
    let mut s = dev.open(OpenMode::READ | OpenMode::WRITE);
    dev.write(&mut s, b"0123456789").expect("write");
    dev.seek(&mut s, SeekFrom::Start(7));
    let mut buf = [0u8; 8];
    assert_eq!(dev.read(&mut s, &mut buf), 3);
    assert_eq!(&buf[..3], b"789");
    assert_eq!(dev.read(&mut s, &mut buf), 0);
}

#[test]
fn relative_and_end_seeks() {
    let dev = dev(32);
    let mut s = dev.open(OpenMode::READ | OpenMode::WRITE);
    dev.write(&mut s, b"abcdefgh").expect("write");
    assert_eq!(dev.seek(&mut s, SeekFrom::Current(-3)), 5);
    assert_eq!(dev.seek(&mut s, SeekFrom::End(-8)), 0);
    assert_eq!(dev.seek(&mut s, SeekFrom::End(2)), 10);
}

#[test]
fn append_session_sees_other_writers() {
    let dev = dev(32);
    let mut w = dev.open(OpenMode::WRITE);
    dev.write(&mut w, b"one").expect("write");
    // the append cursor is fixed at open time, not at write time
    let mut a = dev.open(OpenMode::WRITE | OpenMode::APPEND);
    dev.write(&mut w, b"xxx").expect("write");
    assert_eq!(a.cursor(), 3);
    dev.write(&mut a, b"two").expect("write");
    let mut r = dev.open(OpenMode::READ);
    let mut buf = [0u8; 16];
    let n = dev.read(&mut r, &mut buf);
    assert_eq!(&buf[..n], b"onetwo");
}

#[test]
fn sparse_write_through_file_view() {
    let dev = dev(64);
    let mut f = DevFile::open(&dev, OpenMode::READ | OpenMode::WRITE);
    f.seek(SeekFrom::Start(8)).expect("seek");
    f.write_all(b"tail").expect("write");
    f.seek(SeekFrom::Start(0)).expect("rewind");
    let mut out = Vec::new();
    f.read_to_end(&mut out).expect("read");
    assert_eq!(out.len(), 12);
    assert!(out[..8].iter().all(|b| *b == 0));
    assert_eq!(&out[8..], b"tail");
    f.close();
}
