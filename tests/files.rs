use mpack::{encoding::*, Error, Options, Value};
use std::{
    env, fs,
    io::Write,
    path::PathBuf,
};

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("mpack-files-{}-{}", std::process::id(), name))
}

#[test]
fn value_to_file_and_back() {
    let path = temp_path("value");
    let v = Value::from(vec![
        Value::from(u64::max_value()),
        Value::from(-2i8),
        Value::from(vec![Value::from("nested"), Value::Nil]),
    ]);

    dump_to_file(&path, &v, &Options::default()).unwrap();
    assert_eq!(fs::read(&path).unwrap(), encode_full(&v).unwrap());
    assert_eq!(load_from_file::<Value, _>(&path).unwrap(), v);

    fs::remove_file(&path).unwrap();
}

#[test]
fn depth_limit_applies_to_files() {
    let path = temp_path("deep");
    let v = Value::from(vec![Value::from(vec![Value::Nil])]);

    match dump_to_file(&path, &v, &Options::default().with_max_depth(1)) {
        Err(Error::NestingTooDeep) => {}
        other => panic!("unexpected {:?}", other),
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn file_reader_waits_for_appended_bytes() {
    let path = temp_path("growing");
    let enc = encode_full(&(1u8, "growing".to_string())).unwrap();
    let (head, tail) = enc.split_at(5);

    let mut f = fs::File::create(&path).unwrap();
    f.write_all(head).unwrap();
    f.flush().unwrap();

    let mut r = FileReader::open(&path).unwrap();
    match try_decode::<(u8, String), _>(&mut r) {
        Err(Error::NeedMoreData(n)) => assert_eq!(n, enc.len()),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(r.position(), 0);

    f.write_all(tail).unwrap();
    f.flush().unwrap();
    assert_eq!(r.refresh_size().unwrap(), enc.len());

    assert_eq!(
        try_decode::<(u8, String), _>(&mut r).unwrap(),
        (1, "growing".to_string())
    );
    assert!(r.at_end());

    fs::remove_file(&path).unwrap();
}

#[test]
fn each_over_a_file() {
    let path = temp_path("each");
    let mut w = FileWriter::create(&path).unwrap();
    for i in 0..100u32 {
        (i * 1000).ser(&mut w).unwrap();
    }
    w.flush().unwrap();
    drop(w);

    let mut r = FileReader::open(&path).unwrap();
    let back: Vec<u32> = each(&mut r).collect::<mpack::Result<_>>().unwrap();
    assert_eq!(back, (0..100).map(|i| i * 1000).collect::<Vec<u32>>());

    fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file() {
    match load_from_file::<Value, _>(temp_path("missing")) {
        Err(Error::File { reason, .. }) => assert_eq!(reason, "failed to open file"),
        other => panic!("unexpected {:?}", other),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn full_device_reports_write_errors() {
    match dump_to_file("/dev/full", &Value::from(vec![1u8; 10]), &Options::default()) {
        Err(Error::File { reason, .. }) => assert_eq!(reason, "write error"),
        other => panic!("unexpected {:?}", other),
    }
    match save_to_file("/dev/full", &vec![1u8; 10]) {
        Err(Error::File { reason, .. }) => assert_eq!(reason, "write error"),
        other => panic!("unexpected {:?}", other),
    }

    // small writes sit in the buffer until the flush
    let mut w = FileWriter::create("/dev/full").unwrap();
    w.write(&[0x91, 0x01]).unwrap();
    match w.flush() {
        Err(Error::File { reason, .. }) => assert_eq!(reason, "write error"),
        other => panic!("unexpected {:?}", other),
    }

    // larger ones than the buffer hit the device directly
    let mut w = FileWriter::create("/dev/full").unwrap();
    match w.write(&vec![0u8; 1 << 16]) {
        Err(Error::File { reason, .. }) => assert_eq!(reason, "write error"),
        other => panic!("unexpected {:?}", other),
    }
}
