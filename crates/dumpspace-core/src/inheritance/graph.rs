use crate::store::EntityStore;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

type Closure = Arc<BTreeSet<String>>;

/// Which way along the inheritance edges a traversal walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards ancestors
    Up,
    /// Towards descendants
    Down,
    /// Ancestors, then descendants
    Both,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Both => "both",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown direction '{}', expected up, down or both", other)),
        }
    }
}

/// Parent/child adjacency over class and struct names
///
/// All keys are lowercase; `display` maps them back to the spelling the
/// dump used. Ancestor names that have no entity of their own are kept as
/// name-only nodes.
#[derive(Debug, Default)]
pub struct InheritanceGraph {
    display: HashMap<String, String>,
    parents: HashMap<String, Vec<String>>,
    children: HashMap<String, Vec<String>>,
    ancestor_cache: Mutex<HashMap<String, Closure>>,
    descendant_cache: Mutex<HashMap<String, Closure>>,
}

impl InheritanceGraph {
    /// Derive the adjacency maps from every class and struct in the store
    pub fn from_store(store: &EntityStore) -> Self {
        let mut graph = Self::default();

        for (_, class) in store.class_likes() {
            graph.display.insert(class.name.to_lowercase(), class.name.clone());
        }

        for (_, class) in store.class_likes() {
            let key = class.name.to_lowercase();
            for ancestor in &class.direct_ancestors {
                let parent = ancestor.to_lowercase();
                if parent == key {
                    continue;
                }
                graph
                    .display
                    .entry(parent.clone())
                    .or_insert_with(|| ancestor.clone());
                push_unique(graph.parents.entry(key.clone()).or_default(), &parent);
                push_unique(graph.children.entry(parent).or_default(), &key);
            }
        }

        debug!(
            nodes = graph.display.len(),
            edges = graph.parents.values().map(Vec::len).sum::<usize>(),
            "Built inheritance graph"
        );
        graph
    }

    pub fn node_count(&self) -> usize {
        self.display.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.display.contains_key(&name.to_lowercase())
    }

    /// Spelling of a name as it appears in the dump
    pub fn display_name(&self, name: &str) -> Option<&str> {
        self.display.get(&name.to_lowercase()).map(String::as_str)
    }

    fn display_of(&self, key: &str) -> String {
        self.display
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn to_display(&self, keys: &BTreeSet<String>) -> BTreeSet<String> {
        keys.iter().map(|key| self.display_of(key)).collect()
    }

    /// Direct parents, in the order the dump lists them
    pub fn direct_parents(&self, name: &str) -> Vec<String> {
        self.parents
            .get(&name.to_lowercase())
            .map(|keys| keys.iter().map(|key| self.display_of(key)).collect())
            .unwrap_or_default()
    }

    /// Direct children, sorted by name
    pub fn direct_children(&self, name: &str) -> Vec<String> {
        let mut children: Vec<String> = self
            .children
            .get(&name.to_lowercase())
            .map(|keys| keys.iter().map(|key| self.display_of(key)).collect())
            .unwrap_or_default();
        children.sort_by_key(|name| name.to_lowercase());
        children
    }

    /// Transitive ancestors of a type, excluding itself
    pub fn ancestors(&self, name: &str) -> BTreeSet<String> {
        self.to_display(&self.ancestor_keys(&name.to_lowercase()))
    }

    /// Transitive descendants of a type, excluding itself
    pub fn descendants(&self, name: &str) -> BTreeSet<String> {
        self.to_display(&self.descendant_keys(&name.to_lowercase()))
    }

    pub(crate) fn ancestor_keys(&self, key: &str) -> Closure {
        closure(key, &self.parents, &self.ancestor_cache)
    }

    pub(crate) fn descendant_keys(&self, key: &str) -> Closure {
        closure(key, &self.children, &self.descendant_cache)
    }

    /// Compute and cache both closures for one name
    pub fn warm(&self, name: &str) {
        let key = name.to_lowercase();
        self.ancestor_keys(&key);
        self.descendant_keys(&key);
    }

    /// Names whose ancestor closure is currently memoized
    pub fn cached_closures(&self) -> usize {
        self.ancestor_cache.lock().len()
    }

    /// Breadth-first lineage, nearest relatives first, excluding the start
    pub fn lineage(&self, name: &str, direction: Direction) -> Vec<String> {
        let key = name.to_lowercase();
        let mut out = Vec::new();
        let mut seen = HashSet::from([key.clone()]);

        let mut walk = |edges: &HashMap<String, Vec<String>>| {
            let mut queue = VecDeque::from([key.clone()]);
            while let Some(current) = queue.pop_front() {
                for next in edges.get(&current).into_iter().flatten() {
                    if seen.insert(next.clone()) {
                        out.push(self.display_of(next));
                        queue.push_back(next.clone());
                    }
                }
            }
        };

        match direction {
            Direction::Up => walk(&self.parents),
            Direction::Down => walk(&self.children),
            Direction::Both => {
                walk(&self.parents);
                walk(&self.children);
            }
        }
        out
    }

    fn neighbors<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a String> + use<'a> {
        self.parents
            .get(key)
            .into_iter()
            .flatten()
            .chain(self.children.get(key).into_iter().flatten())
    }

    /// Shortest connection between two types over parent and child edges
    ///
    /// Returns `[a]` when both names are the same and an empty list when the
    /// two are not connected. Ties between equally short paths are broken
    /// the same way regardless of argument order, so
    /// `path_between(b, a)` is always the reverse of `path_between(a, b)`.
    pub fn path_between(&self, a: &str, b: &str) -> Vec<String> {
        let (ka, kb) = (a.to_lowercase(), b.to_lowercase());
        if ka == kb {
            return vec![self.display_name(a).unwrap_or(a).to_string()];
        }
        if !self.display.contains_key(&ka) || !self.display.contains_key(&kb) {
            return Vec::new();
        }

        let (source, target) = if ka < kb { (&ka, &kb) } else { (&kb, &ka) };

        let mut distance: HashMap<&str, usize> = HashMap::from([(target.as_str(), 0)]);
        let mut queue = VecDeque::from([target.as_str()]);
        'search: while let Some(current) = queue.pop_front() {
            let next_distance = distance[current] + 1;
            for next in self.neighbors(current) {
                if !distance.contains_key(next.as_str()) {
                    distance.insert(next.as_str(), next_distance);
                    if next == source {
                        break 'search;
                    }
                    queue.push_back(next.as_str());
                }
            }
        }

        let Some(&source_distance) = distance.get(source.as_str()) else {
            return Vec::new();
        };

        let mut path = vec![source.clone()];
        let mut current = source.as_str();
        for remaining in (0..source_distance).rev() {
            let step = self
                .neighbors(current)
                .filter(|n| distance.get(n.as_str()) == Some(&remaining))
                .min();
            match step {
                Some(step) => {
                    path.push(step.clone());
                    current = step.as_str();
                }
                None => return Vec::new(),
            }
        }

        if *source != ka {
            path.reverse();
        }
        path.iter().map(|key| self.display_of(key)).collect()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Memoized transitive closure over one edge map
///
/// Walks every reachable name once, reusing cached closures of the nodes
/// it meets. Reachable sets do not depend on where a cycle is entered, so
/// every result is cached, including those of types inside a cycle.
fn closure(
    key: &str,
    edges: &HashMap<String, Vec<String>>,
    cache: &Mutex<HashMap<String, Closure>>,
) -> Closure {
    if let Some(hit) = cache.lock().get(key) {
        return Arc::clone(hit);
    }

    let mut result = BTreeSet::new();
    let mut stack: Vec<&str> = vec![key];
    let mut cyclic = false;

    while let Some(current) = stack.pop() {
        for next in edges.get(current).into_iter().flatten() {
            if next == key {
                cyclic = true;
                continue;
            }
            if !result.insert(next.clone()) {
                continue;
            }
            let cached = cache.lock().get(next.as_str()).cloned();
            match cached {
                Some(sub) => {
                    cyclic |= sub.contains(key);
                    result.extend(sub.iter().filter(|name| *name != key).cloned());
                }
                None => stack.push(next.as_str()),
            }
        }
    }

    if cyclic {
        warn!(name = key, "Inheritance cycle detected, cycle edges not followed");
    }

    let result = Arc::new(result);
    cache.lock().insert(key.to_string(), Arc::clone(&result));
    result
}
