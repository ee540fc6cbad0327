use std::collections::HashMap;

use crate::types::{fields, Item, ItemId, ItemKind};

/// Read-only tree-walk over a content repository.
///
/// The engine never mutates the store: it discovers rule folders, walks
/// their descendants, and checks whether link targets still exist.
/// Implementations decide what "unavailable" means: `None` from
/// [`folders_under`](Repository::folders_under) makes every resolution
/// against this repository yield "not resolvable".
pub trait Repository {
    /// Stable identity of this repository. Caches are keyed by it.
    fn name(&self) -> &str;

    /// Rule folders at or below `root`, in traversal order, or `None` when
    /// the backing store cannot be reached.
    fn folders_under(&self, root: &str) -> Option<Vec<Item>>;

    /// Depth-first descendants of `folder` restricted to `kinds`, in
    /// traversal order. The folder itself is not included.
    fn descendants(&self, folder: &Item, kinds: &[ItemKind]) -> Vec<Item>;

    /// Whether an item with this identity currently exists.
    fn exists(&self, id: ItemId) -> bool;
}

/// In-memory repository backed by an arena tree.
///
/// Primarily a fixture for tests, demos and benches; it implements the full
/// [`Repository`] contract, including simulated unavailability via
/// [`set_available`](MemoryRepository::set_available).
#[derive(Debug)]
pub struct MemoryRepository {
    name: String,
    nodes: Vec<Node>,
    index: HashMap<ItemId, usize>,
    roots: Vec<usize>,
    available: bool,
}

#[derive(Debug)]
struct Node {
    item: Item,
    path: String,
    children: Vec<usize>,
    removed: bool,
}

impl MemoryRepository {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
            roots: Vec::new(),
            available: true,
        }
    }

    /// Toggle reachability of the whole store. While unavailable, every
    /// resolve against this repository yields `None`.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Add a rule folder under `parent` (or at the top level when `None`).
    pub fn add_folder(
        &mut self,
        parent: Option<ItemId>,
        name: &str,
        site: Option<&str>,
    ) -> ItemId {
        let mut item = Item::new(ItemId::new(), ItemKind::RedirectFolder, name);
        if let Some(site) = site {
            item = item.with_field(fields::SITE, site);
        }
        self.add_item(parent, item)
    }

    /// Add a plain grouping node.
    pub fn add_content(&mut self, parent: Option<ItemId>, name: &str) -> ItemId {
        self.add_item(parent, Item::new(ItemId::new(), ItemKind::Content, name))
    }

    /// Add a simple redirect definition: a request path and a link-field raw
    /// value naming the target.
    pub fn add_simple_redirect(
        &mut self,
        parent: ItemId,
        name: &str,
        path: &str,
        target: &str,
    ) -> ItemId {
        let item = Item::new(ItemId::new(), ItemKind::SimpleRedirect, name)
            .with_field(fields::PATH, path)
            .with_field(fields::TARGET, target);
        self.add_item(Some(parent), item)
    }

    /// Add an arbitrary item. The general form behind the shape helpers;
    /// full rule definitions are built with [`Item::with_field`] and added
    /// here.
    pub fn add_item(&mut self, parent: Option<ItemId>, item: Item) -> ItemId {
        let id = item.id;
        let parent_index = parent.and_then(|p| self.index.get(&p).copied());
        let path = match parent_index {
            Some(parent_index) => format!("{}/{}", self.nodes[parent_index].path, item.name),
            None => format!("/{}", item.name),
        };
        let node_index = self.nodes.len();
        self.nodes.push(Node {
            item,
            path,
            children: Vec::new(),
            removed: false,
        });
        self.index.insert(id, node_index);
        match parent_index {
            Some(parent_index) => self.nodes[parent_index].children.push(node_index),
            None => self.roots.push(node_index),
        }
        id
    }

    /// Detach an item and its subtree from the hierarchy.
    pub fn remove_item(&mut self, id: ItemId) {
        if let Some(&index) = self.index.get(&id) {
            self.nodes[index].removed = true;
        }
    }

    /// Clone of a stored item, e.g. for building change events.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.index
            .get(&id)
            .filter(|&&index| !self.nodes[index].removed)
            .map(|&index| self.nodes[index].item.clone())
    }

    fn collect_folders(&self, node_index: usize, root: &str, out: &mut Vec<Item>) {
        let node = &self.nodes[node_index];
        if node.removed {
            return;
        }
        if node.item.kind == ItemKind::RedirectFolder && under(&node.path, root) {
            out.push(node.item.clone());
        }
        for &child in &node.children {
            self.collect_folders(child, root, out);
        }
    }

    fn collect_descendants(&self, node_index: usize, kinds: &[ItemKind], out: &mut Vec<Item>) {
        for &child in &self.nodes[node_index].children {
            let node = &self.nodes[child];
            if node.removed {
                continue;
            }
            if kinds.contains(&node.item.kind) {
                out.push(node.item.clone());
            }
            self.collect_descendants(child, kinds, out);
        }
    }
}

/// Whether `path` is `root` itself or sits below it.
fn under(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    root.is_empty() || path == root || path.strip_prefix(root).is_some_and(|rest| rest.starts_with('/'))
}

impl Repository for MemoryRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn folders_under(&self, root: &str) -> Option<Vec<Item>> {
        if !self.available {
            return None;
        }
        let mut folders = Vec::new();
        for &root_index in &self.roots {
            self.collect_folders(root_index, root, &mut folders);
        }
        Some(folders)
    }

    fn descendants(&self, folder: &Item, kinds: &[ItemKind]) -> Vec<Item> {
        let mut items = Vec::new();
        if let Some(&index) = self.index.get(&folder.id) {
            if !self.nodes[index].removed {
                self.collect_descendants(index, kinds, &mut items);
            }
        }
        items
    }

    fn exists(&self, id: ItemId) -> bool {
        self.available
            && self
                .index
                .get(&id)
                .is_some_and(|&index| !self.nodes[index].removed)
    }
}
