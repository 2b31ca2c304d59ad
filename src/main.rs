use rand::SeedableRng;
use rand::rngs::StdRng;

use indexable_skiplist::SkipList;

fn main() {
    let mut list = SkipList::with_rng(StdRng::seed_from_u64(2));
    for value in [3, 1, 9, 12, 11, 16, 99, 18, 7, 22] {
        list.insert(value);
    }

    println!("{}", list);
    println!("{}", list.dump());

    let removed = list.remove_at(4).expect("list has ten elements");
    println!("removed rank 4: {}", removed);
    println!("{}", list.dump());
}
