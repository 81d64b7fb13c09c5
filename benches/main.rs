#[macro_use]
extern crate criterion;

mod vec;

criterion_group!(
    benches,
    crate::skipset::insert,
    crate::skipset::contains,
    crate::skipset::remove,
    crate::skipset::lookup_sweep,
    crate::vec::lookup_sweep,
    crate::btreeset::contains
);
criterion_main!(benches);
