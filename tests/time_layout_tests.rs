//! The process-wide timestamp layout.
//!
//! Kept in its own test binary: changing the layout affects every conversion in the
//! process, so these tests run serially inside one function.

use convey::chrono::{DateTime, FixedOffset, TimeZone};
use convey::{
    DEFAULT_TIME_LAYOUT, InvalidLayout, Zero, convert_strict, reset_time_layout, set_time_layout,
    time_layout,
};

#[test]
fn test_time_layout_lifecycle() {
    assert_eq!(time_layout(), DEFAULT_TIME_LAYOUT);

    set_time_layout("%Y-%m-%d %H:%M:%S %z").unwrap();
    assert_eq!(time_layout(), "%Y-%m-%d %H:%M:%S %z");

    let mut ts = DateTime::<FixedOffset>::zero();
    convert_strict("2023-07-04 18:00:00 -0400", &mut ts).unwrap();
    let expected = FixedOffset::west_opt(4 * 3600)
        .unwrap()
        .with_ymd_and_hms(2023, 7, 4, 18, 0, 0)
        .unwrap();
    assert_eq!(ts, expected);

    let mut text = String::new();
    convert_strict(&expected, &mut text).unwrap();
    assert_eq!(text, "2023-07-04 18:00:00 -0400");

    // A rejected layout leaves the current one in place.
    assert_eq!(
        set_time_layout("%Y-%Q"),
        Err(InvalidLayout("%Y-%Q".to_owned()))
    );
    assert_eq!(time_layout(), "%Y-%m-%d %H:%M:%S %z");

    reset_time_layout();
    assert_eq!(time_layout(), DEFAULT_TIME_LAYOUT);
    assert!(convert_strict("2023-07-04 18:00:00 -0400", &mut ts).unwrap_err().is_parse());
}
