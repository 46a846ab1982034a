use convey::{Convert, StructSlot, Zero};

#[derive(Convert)]
struct Pair(i32, String);

#[derive(Convert)]
struct Empty;

fn main() {
    assert_eq!(Pair::zero().fields().len(), 2);
    assert!(Empty::zero().fields().is_empty());
}
