#![no_main]

use libfuzzer_sys::fuzz_target;

use ctmap_constant_time::{conditional_copy, memeq, Choice};

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub a: [u8; 32],
    pub b: [u8; 32],
    pub choice: bool,
}

fuzz_target!(|input: Input| {
    assert_eq!(bool::from(memeq(&input.a, &input.b)), input.a == input.b);

    let mut dst = input.a;
    conditional_copy(&mut dst, &input.b, Choice::from(input.choice as u8));
    assert_eq!(dst, if input.choice { input.b } else { input.a });
});
