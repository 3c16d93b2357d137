use std::env;

use avl_dict::{AvlTree, Error, LogSink};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn initialize_logging() {
    let level = env::var("AVL_DICT_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logging disabled: {e}");
    }
}

fn main() -> Result<(), Error> {
    initialize_logging();

    let mut tree = AvlTree::with_sink(LogSink::new(log::Level::Info));

    for key in [6, 3, 8, 1, 4, 7, 9] {
        tree.insert(key);
    }
    tree.assert_invariants();

    println!("height {} with {} keys", tree.height(), tree.len());
    println!(
        "min {} max {} predecessor(7) {} successor(7) {}",
        tree.min()?,
        tree.max()?,
        tree.predecessor(&7)?,
        tree.successor(&7)?,
    );

    tree.delete(&6);
    tree.assert_invariants();
    for node in tree.dump_nodes() {
        println!("{node}");
    }

    let mut iter = tree.iterator();
    println!("first from snapshot: {}", iter.next(&tree)?);
    tree.insert(5);
    match iter.next(&tree) {
        Err(e) => println!("snapshot after insert: {e}"),
        Ok(key) => println!("snapshot after insert yielded {key}"),
    }

    let ascending: AvlTree<u32> = (1..=7).collect();
    print!("{ascending}");

    let mut graph = String::new();
    if ascending.dotgraph("ascending", &mut graph).is_ok() {
        println!("{graph}");
    }

    Ok(())
}
