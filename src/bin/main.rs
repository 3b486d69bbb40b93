use cordyceps_avl::map::AvlMap;
use cordyceps_avl::paths::{equal_paths, BinaryNode};

fn main() {
    let mut map: AvlMap<u32, &str> = AvlMap::new();

    for (key, name) in [
        (2, "two"),
        (0, "zero"),
        (3, "three"),
        (4, "four"),
        (5, "five"),
        (1, "one"),
        (6, "six"),
    ] {
        map.insert(key, name);
        println!("{:?}", map.iter().map(|(&k, _)| k).collect::<Vec<_>>());
    }

    let (zero, name) = map.pop_first().unwrap();
    assert_eq!(zero, 0);
    println!("popped {zero} ({name})");

    map.insert(3, "THREE");
    println!("overwrote 3 -> {:?}", map.get(&3).unwrap());

    let lopsided = BinaryNode::branch(
        Some(BinaryNode::branch(
            Some(BinaryNode::leaf()),
            Some(BinaryNode::leaf()),
        )),
        Some(BinaryNode::leaf()),
    );
    println!("equal paths: {}", equal_paths(Some(&lopsided)));
}
