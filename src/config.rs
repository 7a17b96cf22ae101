//! Construction-time settings for trees.

use crate::logger::Logger;

const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Settings for the node allocator and logger of a tree.
///
/// # Examples
///
/// ```
/// use splay_collections::compare::Natural;
/// use splay_collections::config::Config;
/// use splay_collections::splay_tree::SplayMap;
///
/// let config = Config::default().chunk_size(64).node_limit(2);
/// let mut map = SplayMap::with_config(Natural, config);
/// assert!(map.try_insert(1, 1).is_ok());
/// assert!(map.try_insert(2, 2).is_ok());
/// assert!(map.try_insert(3, 3).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of nodes allocated per arena chunk.
    pub chunk_size: usize,
    /// Maximum number of live nodes, if bounded.
    pub node_limit: Option<usize>,
    pub logger: Logger,
}

impl Config {
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: DEFAULT_CHUNK_SIZE,
            node_limit: None,
            logger: Logger::global(),
        }
    }
}
