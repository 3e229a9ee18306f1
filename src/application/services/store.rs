//! Tree persistence service
//!
//! Loads the guessing tree from the data file and writes it back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{codec, DomainError, Node};
use crate::infrastructure::traits::FileSystem;

/// Service for loading and saving the tree.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    default_animal: String,
}

impl TreeStore {
    /// Create a new store for `path`.
    ///
    /// `default_animal` seeds the one-leaf tree used when nothing usable is
    /// stored.
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf, default_animal: impl Into<String>) -> Self {
        Self {
            fs,
            path,
            default_animal: default_animal.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bootstrap tree: a single guess leaf.
    pub fn default_tree(&self) -> Node {
        Node::guess(&self.default_animal)
    }

    /// Load the stored tree, falling back to the default tree.
    ///
    /// A missing, unreadable or malformed file is never an error here; the
    /// partially read data is discarded.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Node {
        match self.try_load() {
            Ok(Some(tree)) => {
                debug!("load: restored {} nodes", tree.node_count());
                tree
            }
            Ok(None) => {
                debug!("load: no stored tree, using default");
                self.default_tree()
            }
            Err(e) => {
                debug!("load: discarding stored tree: {}", e);
                self.default_tree()
            }
        }
    }

    /// Load the stored tree, reporting why it could not be used.
    ///
    /// Returns `Ok(None)` when the file does not exist or stores an empty tree.
    pub fn try_load(&self) -> ApplicationResult<Option<Node>> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read game data", &self.path)?;
        let tree = codec::restore(&content).map_err(DomainError::from)?;
        Ok(tree)
    }

    /// Rewrite the data file with the given tree.
    #[instrument(level = "debug", skip(self, root), fields(path = %self.path.display()))]
    pub fn save(&self, root: &Node) -> ApplicationResult<()> {
        let records = codec::persist(root);
        self.fs
            .write(&self.path, &records)
            .map_err(|source| ApplicationError::Save {
                path: self.path.clone(),
                source,
            })?;
        debug!("save: wrote {} nodes", root.node_count());
        Ok(())
    }
}
