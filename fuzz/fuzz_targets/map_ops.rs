#![no_main]
extern crate arbitrary;
extern crate ctmap;

use libfuzzer_sys::fuzz_target;

use ctmap::CtMap;

#[derive(arbitrary::Arbitrary, Debug)]
pub enum Op {
    Add { key: [u8; 2], val: [u8; 3] },
    Set { key: [u8; 2], val: [u8; 3] },
    Replace {
        old_key: [u8; 2],
        new_key: [u8; 2],
        val: [u8; 3],
    },
    Rename { old_key: [u8; 2], new_key: [u8; 2] },
    Contains { key: [u8; 2] },
    Lookup { key: [u8; 2] },
    Delete { key: [u8; 2] },
}

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub capacity: Option<u8>,
    pub ops: Vec<Op>,
}

type Model = Vec<([u8; 2], [u8; 3])>;

fn first(model: &[([u8; 2], [u8; 3])], key: &[u8; 2]) -> Option<usize> {
    model.iter().position(|(k, _)| k == key)
}

fuzz_target!(|input: Input| {
    let mut map = match input.capacity {
        Some(c) => CtMap::with_capacity(2, 3, c as usize),
        None => CtMap::new(2, 3),
    };
    let mut model = Model::new();

    for op in input.ops {
        match op {
            Op::Add { key, val } => {
                map.add(&key, &val).unwrap();
                model.push((key, val));
            }
            Op::Set { key, val } => {
                let pos = first(&model, &key);
                let found = map.set(&key, &val).unwrap();
                assert_eq!(bool::from(found), pos.is_some());
                if let Some(i) = pos {
                    model[i].1 = val;
                }
            }
            Op::Replace {
                old_key,
                new_key,
                val,
            } => {
                let pos = first(&model, &old_key);
                let found = map.replace(&old_key, &new_key, &val).unwrap();
                assert_eq!(bool::from(found), pos.is_some());
                if let Some(i) = pos {
                    model[i] = (new_key, val);
                }
            }
            Op::Rename { old_key, new_key } => {
                let pos = first(&model, &old_key);
                let found = map.rename(&old_key, &new_key).unwrap();
                assert_eq!(bool::from(found), pos.is_some());
                if let Some(i) = pos {
                    model[i].0 = new_key;
                }
            }
            Op::Contains { key } => {
                let found = map.contains(&key).unwrap();
                assert_eq!(bool::from(found), first(&model, &key).is_some());
            }
            Op::Lookup { key } => {
                let mut val = [0u8; 3];
                let found = map.lookup(&key, &mut val).unwrap();
                match first(&model, &key) {
                    Some(i) => {
                        assert!(bool::from(found));
                        assert_eq!(val, model[i].1);
                    }
                    None => assert!(!bool::from(found)),
                }
            }
            Op::Delete { key } => {
                let pos = first(&model, &key);
                let found = map.delete(&key).unwrap();
                assert_eq!(bool::from(found), pos.is_some());
                if let Some(i) = pos {
                    model.remove(i);
                }
            }
        }
        assert_eq!(map.len(), model.len());
    }

    let stored = map.iter();
    assert!(stored.eq(model.iter().map(|(k, v)| (&k[..], &v[..]))));
});
