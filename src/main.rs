extern crate log;
extern crate simplelog;
extern crate splay_collections;

use log::{info, LevelFilter};
use simplelog::{Config as LogConfig, SimpleLogger};
use splay_collections::splay_tree::SplayMap;

fn main() {
    if let Err(err) = SimpleLogger::init(LevelFilter::Debug, LogConfig::default()) {
        eprintln!("Error: could not install logger: {}.", err);
    }

    let mut map = SplayMap::new();
    for key in &[5u32, 3, 8, 1, 4, 7, 9] {
        map.insert(*key, key * 10);
    }
    info!("inserted {} keys, root is {:?}", map.len(), map.root());

    let value = map.get(&4).cloned();
    info!("get(4) = {:?}, root is {:?}", value, map.root());

    let removed = map.remove(&5);
    info!("remove(5) = {:?}, root is {:?}", removed, map.root());

    let keys: Vec<u32> = map.iter().map(|(key, _)| *key).collect();
    println!("{:?}", keys);
}
