//! Color taxonomy index.
//!
//! Colors form a directed acyclic graph: a color may have several parents
//! ("Teal" is under both "Green" and "Blue") and carries per-language
//! translations. [`ColorTaxonomyIndex`] is a read-only index over a flat list
//! of [`ColorNode`] rows with five lookups:
//!
//! | Map | Key | Value |
//! |-----|-----|-------|
//! | `id_map` | node id | node |
//! | `name_map` | canonical name | node (first wins) |
//! | `children_map` | parent id | child ids |
//! | `translation_map` | canonical translated name, any language | node (first wins) |
//! | `alias_map` | canonical name | canonical name ∪ canonical translations |
//!
//! `alias_map` is not closed over the hierarchy. A plant's own color tokens
//! come from `alias_map` only; hierarchy is flattened on demand by
//! [`ColorTaxonomyIndex::expand_with_descendants`] when building a filter
//! selection, so selecting "Green" matches a "Teal" plant but selecting
//! "Teal" does not match a plain "Green" plant.
//!
//! Traversal never assumes the authored data is acyclic: a cycle is
//! truncated at the back edge and logged, never followed.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canonical::{canonicalize, canonicalize_non_empty, CanonicalKey};
use crate::defaults::DEFAULT_COLOR_TAXONOMY_YAML;
use crate::error::Result;
use crate::vocabulary_set::{data_format, DataFormat};

/// One row of the color taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorNode {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "hexCode", skip_serializing_if = "Option::is_none")]
    pub hex_code: Option<String>,
    #[serde(default, alias = "isPrimary")]
    pub is_primary: bool,
    #[serde(default, alias = "parentIds")]
    pub parent_ids: Vec<String>,
    /// Language code to translated name. Iterated in language-code order,
    /// which decides first-wins ties in the translation lookup.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl ColorNode {
    /// Create a root color.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hex_code: None,
            is_primary: false,
            parent_ids: Vec::new(),
            translations: BTreeMap::new(),
        }
    }

    /// Add a parent.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_ids.push(parent_id.into());
        self
    }

    /// Add a translation.
    pub fn with_translation(mut self, language: impl Into<String>, name: impl Into<String>) -> Self {
        self.translations.insert(language.into(), name.into());
        self
    }

    /// Mark as a primary color.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Set the hex code.
    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.hex_code = Some(hex.into());
        self
    }
}

/// Authored color taxonomy rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTaxonomyConfig {
    #[serde(default)]
    pub colors: Vec<ColorNode>,
}

impl ColorTaxonomyConfig {
    /// The taxonomy bundled with flora.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(DEFAULT_COLOR_TAXONOMY_YAML)
    }

    /// Parse from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match data_format(path)? {
            DataFormat::Yaml => Self::from_yaml(&content),
            DataFormat::Json => Self::from_json(&content),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Read-only lookup structure over the color taxonomy.
#[derive(Debug, Clone, Default)]
pub struct ColorTaxonomyIndex {
    nodes: Vec<ColorNode>,
    id_map: HashMap<String, usize>,
    name_map: HashMap<CanonicalKey, usize>,
    children_map: HashMap<String, Vec<String>>,
    translation_map: HashMap<CanonicalKey, usize>,
    alias_map: HashMap<CanonicalKey, HashSet<CanonicalKey>>,
}

impl ColorTaxonomyIndex {
    /// Build the index from taxonomy rows.
    ///
    /// Duplicate ids keep the first row. Cycles and parents missing from the
    /// rows are logged; they never fail construction.
    pub fn new(nodes: Vec<ColorNode>) -> Self {
        let mut index = Self::default();

        for node in nodes {
            if index.id_map.contains_key(&node.id) {
                warn!(color_id = %node.id, "Duplicate color id, keeping first row");
                continue;
            }
            let position = index.nodes.len();
            index.id_map.insert(node.id.clone(), position);

            let name_key = canonicalize(&node.name);
            if !name_key.is_empty() {
                index.name_map.entry(name_key.clone()).or_insert(position);
            }

            for parent_id in &node.parent_ids {
                let children = index.children_map.entry(parent_id.clone()).or_default();
                if !children.contains(&node.id) {
                    children.push(node.id.clone());
                }
            }

            let mut aliases: HashSet<CanonicalKey> = HashSet::new();
            if !name_key.is_empty() {
                aliases.insert(name_key.clone());
            }
            for translated in node.translations.values() {
                let Some(key) = canonicalize_non_empty(translated) else {
                    continue;
                };
                index.translation_map.entry(key.clone()).or_insert(position);
                aliases.insert(key);
            }
            if !name_key.is_empty() {
                if let Entry::Vacant(slot) = index.alias_map.entry(name_key) {
                    slot.insert(aliases);
                }
            }

            index.nodes.push(node);
        }

        let cycles = index.find_cycles();
        if !cycles.is_empty() {
            warn!(
                subsystem = "taxonomy",
                component = "color_index",
                cycle_count = cycles.len(),
                "Color taxonomy contains cycles, traversal will truncate them"
            );
        }
        for (child, parent) in index.dangling_parents() {
            warn!(color_id = %child, parent_id = %parent, "Color parent not found in taxonomy");
        }

        debug!(
            subsystem = "taxonomy",
            component = "color_index",
            op = "build",
            entry_count = index.nodes.len(),
            key_count = index.name_map.len() + index.translation_map.len(),
            "Color taxonomy index built"
        );

        index
    }

    /// Build the index from configuration.
    pub fn from_config(config: &ColorTaxonomyConfig) -> Self {
        Self::new(config.colors.clone())
    }

    /// Build the index from the bundled taxonomy.
    pub fn bundled() -> Result<Self> {
        Ok(Self::from_config(&ColorTaxonomyConfig::bundled()?))
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// All nodes in input order.
    pub fn nodes(&self) -> &[ColorNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the taxonomy has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id.
    pub fn get(&self, id: &str) -> Option<&ColorNode> {
        self.id_map.get(id).map(|&i| &self.nodes[i])
    }

    /// Resolve a color name, trying own names first and translations second.
    pub fn resolve_by_name(&self, raw: &str) -> Option<&ColorNode> {
        let key = canonicalize(raw);
        if key.is_empty() {
            return None;
        }
        self.name_map
            .get(&key)
            .or_else(|| self.translation_map.get(&key))
            .map(|&i| &self.nodes[i])
    }

    /// Resolve an id, falling back to name resolution.
    pub fn resolve(&self, id_or_name: &str) -> Option<&ColorNode> {
        self.get(id_or_name.trim())
            .or_else(|| self.resolve_by_name(id_or_name))
    }

    /// Direct children of a node.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children_map
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Primary colors in input order.
    pub fn primary_colors(&self) -> Vec<&ColorNode> {
        self.nodes.iter().filter(|n| n.is_primary).collect()
    }

    /// A node's own tokens: its canonical name and canonical translations.
    ///
    /// Never includes relatives.
    pub fn aliases_of(&self, node: &ColorNode) -> Option<&HashSet<CanonicalKey>> {
        self.alias_map.get(&canonicalize(&node.name))
    }

    // =========================================================================
    // HIERARCHY
    // =========================================================================

    /// Tokens of a node and every node reachable through its children.
    ///
    /// Unknown ids expand to an empty set. A back edge (cycle) is not
    /// followed; it is logged at warn level and the rest of the traversal
    /// continues.
    pub fn expand_with_descendants(&self, id: &str) -> HashSet<CanonicalKey> {
        let mut tokens = HashSet::new();
        let Some(root) = self.get(id) else {
            return tokens;
        };
        let root = root.id.as_str();

        let mut state: HashMap<&str, VisitState> = HashMap::new();
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
        state.insert(root, VisitState::InProgress);
        self.collect_aliases(root, &mut tokens);

        while let Some(&(node, next)) = stack.last() {
            let Some(child) = self.children_of(node).get(next) else {
                state.insert(node, VisitState::Done);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let child = child.as_str();
            match state.get(child) {
                Some(VisitState::InProgress) => {
                    warn!(
                        subsystem = "taxonomy",
                        op = "expand_with_descendants",
                        color_id = %root,
                        from = %node,
                        to = %child,
                        "Cycle in color taxonomy, truncating traversal"
                    );
                }
                Some(VisitState::Done) => {}
                None => {
                    state.insert(child, VisitState::InProgress);
                    self.collect_aliases(child, &mut tokens);
                    stack.push((child, 0));
                }
            }
        }

        tokens
    }

    /// Expand a user's color selection into the canonical token set the
    /// filter engine matches plant colors against.
    ///
    /// Each entry may be a node id or any name or translation. Resolved
    /// entries contribute their descendant expansion; unresolved entries
    /// contribute their own canonical key.
    pub fn expand_selection<I, S>(&self, selected: I) -> HashSet<CanonicalKey>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = HashSet::new();
        for raw in selected {
            let raw = raw.as_ref();
            match self.resolve(raw) {
                Some(node) => tokens.extend(self.expand_with_descendants(&node.id)),
                None => tokens.extend(canonicalize_non_empty(raw)),
            }
        }
        tokens
    }

    fn collect_aliases(&self, id: &str, tokens: &mut HashSet<CanonicalKey>) {
        if let Some(aliases) = self.get(id).and_then(|node| self.aliases_of(node)) {
            tokens.extend(aliases.iter().cloned());
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Cycles detected in the child graph, one per back edge found by a
    /// depth-first walk. Each is the list of ids from the re-entered node to
    /// the node closing the loop. Cycles sharing an already-visited node are
    /// not enumerated separately.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        let mut state: HashMap<&str, VisitState> = HashMap::new();

        for start in &self.nodes {
            let start = start.id.as_str();
            if state.contains_key(start) {
                continue;
            }
            let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
            state.insert(start, VisitState::InProgress);

            while let Some(&(node, next)) = stack.last() {
                let Some(child) = self.children_of(node).get(next) else {
                    state.insert(node, VisitState::Done);
                    stack.pop();
                    continue;
                };
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                let child = child.as_str();
                match state.get(child) {
                    Some(VisitState::InProgress) => {
                        let from = stack
                            .iter()
                            .position(|(id, _)| *id == child)
                            .unwrap_or(0);
                        cycles.push(stack[from..].iter().map(|(id, _)| id.to_string()).collect());
                    }
                    Some(VisitState::Done) => {}
                    None => {
                        if self.id_map.contains_key(child) {
                            state.insert(child, VisitState::InProgress);
                            stack.push((child, 0));
                        }
                    }
                }
            }
        }

        cycles
    }

    /// `(child id, parent id)` pairs whose parent is not in the taxonomy.
    pub fn dangling_parents(&self) -> Vec<(String, String)> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.parent_ids
                    .iter()
                    .filter(|parent| !self.id_map.contains_key(parent.as_str()))
                    .map(move |parent| (node.id.clone(), parent.clone()))
            })
            .collect()
    }
}
