use std::collections::HashMap;

use convey::{Convert, Zero, convert_weak};

#[derive(Convert)]
#[convey(name = "Listener")]
struct Listener {
    #[convey(rename = "Addr")]
    addr: String,
    port: u16,
    #[convey(readonly)]
    id: u64,
    #[convey(skip)]
    cache: Vec<u8>,
}

fn main() {
    let mut l = Listener::zero();
    let _ = convert_weak(&HashMap::from([("Addr", "localhost")]), &mut l);
    let _ = (l.addr, l.port, l.id, l.cache);
}
