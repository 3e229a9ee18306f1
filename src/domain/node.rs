//! Decision tree node: a yes/no question or a terminal guess

use crate::domain::DomainError;

/// Leading text of every guess leaf, e.g. `Is it a dog?`.
pub const GUESS_PREFIX: &str = "Is it a ";
/// Trailing text of every guess leaf.
pub const GUESS_SUFFIX: &str = "?";
/// Animal of the bootstrap tree.
pub const DEFAULT_ANIMAL: &str = "human";

/// A node of the guessing tree.
///
/// A node is a leaf (a guess) iff it has no children. Internal nodes always
/// own both branches, so a half-populated node cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    text: String,
    branches: Option<Box<Branches>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Branches {
    yes: Node,
    no: Node,
}

impl Default for Node {
    fn default() -> Self {
        Self::guess(DEFAULT_ANIMAL)
    }
}

impl Node {
    /// Create a leaf with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            branches: None,
        }
    }

    /// Create an internal node owning both branches.
    pub fn question(text: impl Into<String>, yes: Node, no: Node) -> Self {
        Self {
            text: text.into(),
            branches: Some(Box::new(Branches { yes, no })),
        }
    }

    /// Create a guess leaf for `animal`: `Is it a <animal>?`.
    pub fn guess(animal: &str) -> Self {
        Self::new(format!("{GUESS_PREFIX}{animal}{GUESS_SUFFIX}"))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_leaf(&self) -> bool {
        self.branches.is_none()
    }

    pub fn yes_child(&self) -> Option<&Node> {
        self.branches.as_deref().map(|b| &b.yes)
    }

    pub fn no_child(&self) -> Option<&Node> {
        self.branches.as_deref().map(|b| &b.no)
    }

    /// Branch followed for the given answer; `None` at a leaf.
    pub fn child(&self, affirmed: bool) -> Option<&Node> {
        if affirmed {
            self.yes_child()
        } else {
            self.no_child()
        }
    }

    pub fn child_mut(&mut self, affirmed: bool) -> Option<&mut Node> {
        self.branches
            .as_deref_mut()
            .map(|b| if affirmed { &mut b.yes } else { &mut b.no })
    }

    /// Animal named by a guess leaf.
    ///
    /// Strips `Is it a ` and the trailing `?` independently, so text that does
    /// not follow the guess pattern comes back unchanged.
    pub fn guessed_animal(&self) -> &str {
        let text = self.text.strip_prefix(GUESS_PREFIX).unwrap_or(&self.text);
        text.strip_suffix(GUESS_SUFFIX).unwrap_or(text)
    }

    /// Turn this wrong-guess leaf into a question separating `new_animal`
    /// from the old guess.
    ///
    /// The old guess keeps its original text and moves to the branch opposite
    /// to `new_animal_is_yes`.
    pub fn learn(
        &mut self,
        new_animal: &str,
        question: impl Into<String>,
        new_animal_is_yes: bool,
    ) -> Result<(), DomainError> {
        if !self.is_leaf() {
            return Err(DomainError::NotALeaf {
                text: self.text.clone(),
            });
        }
        let old_guess = Node::new(std::mem::replace(&mut self.text, question.into()));
        let new_guess = Node::guess(new_animal);
        let (yes, no) = if new_animal_is_yes {
            (new_guess, old_guess)
        } else {
            (old_guess, new_guess)
        };
        self.branches = Some(Box::new(Branches { yes, no }));
        Ok(())
    }

    /// Pre-order iterator: node, yes subtree, no subtree.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of questions on the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        match self.branches.as_deref() {
            None => 0,
            Some(b) => 1 + b.yes.depth().max(b.no.depth()),
        }
    }

    /// Animals known to the tree, in pre-order.
    pub fn animals(&self) -> Vec<&str> {
        self.iter()
            .filter(|n| n.is_leaf())
            .map(Node::guessed_animal)
            .collect()
    }
}

/// Stack-based pre-order traversal.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(b) = node.branches.as_deref() {
            self.stack.push(&b.no);
            self.stack.push(&b.yes);
        }
        Some(node)
    }
}
