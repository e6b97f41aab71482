use serde::{Deserialize, Serialize};

use crate::stylesheet::StyleSource;

/// Ordered list of style class names on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleClasses(Vec<String>);

impl StyleClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, class: impl Into<String>) {
        self.0.push(class.into());
    }

    /// Adds `class` unless it is already present. Returns `true` if added.
    pub fn add_unique(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.0.push(class);
        true
    }

    /// Removes every occurrence of `class`, returns how many were removed.
    pub fn remove_all(&mut self, class: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|c| c != class);
        before - self.0.len()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn count(&self, class: &str) -> usize {
        self.0.iter().filter(|c| *c == class).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a StyleClasses {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for StyleClasses {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Called with the class lists of the old and the new root when a scene
/// replaces its root node. Either side is `None` when there is no root.
pub type RootListener = Box<dyn FnMut(Option<&mut StyleClasses>, Option<&mut StyleClasses>)>;

/// What the binder needs from a host scene.
pub trait Scene {
    /// Class list of the current root node, `None` while the scene has no root.
    fn root_classes_mut(&mut self) -> Option<&mut StyleClasses>;

    /// Style sources attached to the scene.
    fn stylesheets_mut(&mut self) -> &mut Vec<StyleSource>;

    /// Registers `listener` to run on every root replacement.
    fn on_root_replaced(&mut self, listener: RootListener);
}

/// Minimal node carrying a label and its style classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledNode {
    pub label: String,
    pub classes: StyleClasses,
}

impl StyledNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            classes: StyleClasses::default(),
        }
    }

    pub fn with_classes(mut self, classes: StyleClasses) -> Self {
        self.classes = classes;
        self
    }
}

/// In-memory [`Scene`] with a replaceable root.
#[derive(Default)]
pub struct SimpleScene {
    root: Option<StyledNode>,
    stylesheets: Vec<StyleSource>,
    root_listeners: Vec<RootListener>,
}

impl std::fmt::Debug for SimpleScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleScene")
            .field("root", &self.root)
            .field("stylesheets", &self.stylesheets)
            .field("root_listeners", &self.root_listeners.len())
            .finish()
    }
}

impl SimpleScene {
    pub fn new(root: Option<StyledNode>) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn root(&self) -> Option<&StyledNode> {
        self.root.as_ref()
    }

    pub fn stylesheets(&self) -> &[StyleSource] {
        &self.stylesheets
    }

    /// Replaces the root and returns the previous one. Root listeners see
    /// both nodes before the swap.
    pub fn set_root(&mut self, mut root: Option<StyledNode>) -> Option<StyledNode> {
        for listener in &mut self.root_listeners {
            listener(
                self.root.as_mut().map(|n| &mut n.classes),
                root.as_mut().map(|n| &mut n.classes),
            );
        }
        std::mem::replace(&mut self.root, root)
    }
}

impl Scene for SimpleScene {
    fn root_classes_mut(&mut self) -> Option<&mut StyleClasses> {
        self.root.as_mut().map(|n| &mut n.classes)
    }

    fn stylesheets_mut(&mut self) -> &mut Vec<StyleSource> {
        &mut self.stylesheets
    }

    fn on_root_replaced(&mut self, listener: RootListener) {
        self.root_listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn test_style_classes() {
        let mut classes: StyleClasses = ["root", "dark"].into_iter().collect();
        assert!(!classes.add_unique("dark"));
        assert!(classes.add_unique("big"));
        classes.add("dark");
        assert_eq!(classes.count("dark"), 2);

        assert_eq!(classes.remove_all("dark"), 2);
        assert_eq!(classes.remove_all("missing"), 0);
        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["root", "big"]);
    }

    #[test]
    fn test_set_root_notifies_listeners() {
        let mut scene = SimpleScene::new(Some(StyledNode::new("a")));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        scene.on_root_replaced(Box::new(
            move |old: Option<&mut StyleClasses>, new: Option<&mut StyleClasses>| {
                s.borrow_mut().push((old.is_some(), new.is_some()));
            },
        ));

        let old = scene.set_root(Some(StyledNode::new("b")));
        assert_eq!(old.map(|n| n.label), Some("a".to_string()));
        scene.set_root(None);

        assert_eq!(*seen.borrow(), vec![(true, true), (true, false)]);
        assert!(scene.root().is_none());
    }

    #[test]
    fn test_listener_edits_land_on_new_root() {
        let mut scene = SimpleScene::new(None);
        scene.on_root_replaced(Box::new(
            |_: Option<&mut StyleClasses>, new: Option<&mut StyleClasses>| {
                if let Some(new) = new {
                    new.add("touched");
                }
            },
        ));
        scene.set_root(Some(StyledNode::new("b")));
        assert!(scene.root().unwrap().classes.contains("touched"));
    }
}
