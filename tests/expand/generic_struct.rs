use std::collections::HashMap;

use convey::{Convert, Policy, Zero};

#[derive(Convert)]
struct Wrapper<K, V>
where
    K: std::hash::Hash + Eq,
{
    entries: HashMap<K, V>,
    fallback: Option<V>,
}

fn main() {
    let mut w: Wrapper<String, u8> = Wrapper::zero();
    let _ = Policy::Weak.convert(&HashMap::from([("fallback", "1")]), &mut w);
    let _ = (w.entries, w.fallback);
}
