use super::*;

#[test]
fn brightness_is_max_channel() {
    assert_eq!(Color::rgb(10, 200, 30).brightness(), 200);
    assert_eq!(Color::rgba(90, 20, 30, 0).brightness(), 90);
    assert_eq!(Color::gray(77).brightness(), 77);
}

#[test]
fn constructors_default_to_opaque() {
    assert_eq!(Color::gray(5).a, 255);
    assert_eq!(Color::rgb(1, 2, 3).a, 255);
    assert_eq!(Color::default(), Color::rgba(0, 0, 0, 255));
}

#[test]
fn to_array_keeps_channel_order() {
    assert_eq!(Color::rgba(1, 2, 3, 4).to_array(), [1, 2, 3, 4]);
    assert_eq!(Color::rgb(9, 8, 7).to_array(), [9, 8, 7, 255]);
}
