use ctmap::{Argument, CtMap, Error};

fn entries(m: &CtMap) -> Vec<(Vec<u8>, Vec<u8>)> {
    m.iter().map(|(k, v)| (k.to_vec(), v.to_vec())).collect()
}

fn single(k: u8, v: u8) -> (Vec<u8>, Vec<u8>) {
    (vec![k], vec![v])
}

#[test]
fn lookup_in_empty_map() {
    let m = CtMap::new(1, 1);
    let mut buf = [0u8];
    assert!(!bool::from(m.lookup(&[0xa5], &mut buf).unwrap()));
    assert!(m.is_empty());
}

#[test]
fn add_to_empty_map() {
    let mut m = CtMap::new(1, 1);
    m.add(&[0xa5], &[0x5a]).unwrap();
    assert_eq!(m.len(), 1);
    assert_eq!(entries(&m), [single(0xa5, 0x5a)]);
}

#[test]
fn set_only_touches_first_duplicate() {
    let mut m = CtMap::new(1, 1);
    m.add(&[0xa5], &[0x5a]).unwrap();
    m.add(&[0xa5], &[0x5a]).unwrap();

    assert!(bool::from(m.set(&[0xa5], &[0xff]).unwrap()));
    assert_eq!(entries(&m), [single(0xa5, 0xff), single(0xa5, 0x5a)]);
}

#[test]
fn delete_from_the_middle() {
    let mut m = CtMap::new(1, 1);
    for k in [0x5a, 0xa5, 0x5a] {
        m.add(&[k], &[0x5a]).unwrap();
    }

    assert!(bool::from(m.delete(&[0xa5]).unwrap()));
    assert_eq!(entries(&m), [single(0x5a, 0x5a), single(0x5a, 0x5a)]);
    assert_eq!(m.len(), 2);
}

#[test]
fn lookup_returns_first_duplicate() {
    let mut m = CtMap::new(1, 1);
    m.add(&[0xa5], &[0x11]).unwrap();
    m.add(&[0xa5], &[0x22]).unwrap();

    let mut buf = [0u8];
    assert!(bool::from(m.lookup(&[0xa5], &mut buf).unwrap()));
    assert_eq!(buf, [0x11]);
}

#[test]
fn set_without_values() {
    let mut m = CtMap::new(1, 0);
    m.add(&[0x01], &[]).unwrap();
    assert!(bool::from(m.contains(&[0x01]).unwrap()));
    assert!(!bool::from(m.contains(&[0x02]).unwrap()));
}

#[test]
fn rename_keeps_value_and_order() {
    let mut m = CtMap::new(2, 2);
    m.add(b"aa", b"11").unwrap();
    m.add(b"bb", b"22").unwrap();
    m.add(b"bb", b"33").unwrap();

    assert!(bool::from(m.rename(b"bb", b"cc").unwrap()));
    assert!(!bool::from(m.rename(b"zz", b"aa").unwrap()));

    let keys: Vec<_> = m.iter().map(|(k, v)| (k.to_vec(), v.to_vec())).collect();
    assert_eq!(
        keys,
        [
            (b"aa".to_vec(), b"11".to_vec()),
            (b"cc".to_vec(), b"22".to_vec()),
            (b"bb".to_vec(), b"33".to_vec()),
        ]
    );
}

#[test]
fn replace_then_lookup_by_new_key() {
    let mut m = CtMap::new(4, 4);
    m.add(b"old!", b"val1").unwrap();

    assert!(bool::from(m.replace(b"old!", b"new!", b"val2").unwrap()));
    let mut buf = [0u8; 4];
    assert!(!bool::from(m.lookup(b"old!", &mut buf).unwrap()));
    assert!(bool::from(m.lookup(b"new!", &mut buf).unwrap()));
    assert_eq!(&buf, b"val2");
}

#[test]
fn len_tracks_adds_and_successful_deletes() {
    let mut m = CtMap::new(1, 1);
    for k in 0..10u8 {
        m.add(&[k % 3], &[k]).unwrap();
    }
    let mut removed = 0;
    for k in [0u8, 0, 7, 2, 9] {
        removed += m.delete(&[k]).unwrap().unwrap_u8() as usize;
    }
    assert_eq!(removed, 3);
    assert_eq!(m.len(), 10 - removed);
}

#[test]
fn errors_name_the_argument() {
    let mut m = CtMap::new(8, 4);
    let err = m.add(&[0; 7], &[0; 4]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidSize {
            arg: Argument::Key,
            expected: 8,
            actual: 7
        }
    );
    assert_eq!(
        err.to_string(),
        "key has invalid size, required 8 but found 7"
    );

    let err = m.replace(&[0; 8], &[0; 9], &[0; 4]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "new_key has invalid size, required 8 but found 9"
    );
}

#[test]
fn growth_without_preallocation() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut m = CtMap::new(32, 32);
    for i in 0..1000u32 {
        let mut key = [0u8; 32];
        key[..4].copy_from_slice(&i.to_le_bytes());
        m.add(&key, &key).unwrap();
    }
    assert_eq!(m.len(), 1000);
    assert!(m.capacity() >= 1000);

    let mut key = [0u8; 32];
    key[..4].copy_from_slice(&999u32.to_le_bytes());
    let mut val = [0u8; 32];
    assert!(bool::from(m.lookup(&key, &mut val).unwrap()));
    assert_eq!(val, key);
}
