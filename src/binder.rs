use std::{
    any::Any,
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use tracing::{debug, warn};

use crate::{
    catalog::StyleCatalog,
    error::Result,
    events::Event,
    scale::{FontScale, SubscriptionId},
    scene::{Scene, StyleClasses},
    settings::SettingsStyle,
    stylesheet::{StyleSource, Stylesheet},
};

/// Size class last written to a scene's root, `None` while nothing is applied.
type Applied = Rc<RefCell<Option<String>>>;

struct Binding {
    scene: Weak<dyn Any>,
    subscription: SubscriptionId,
    /// Root listeners cannot be removed from a scene, they check this flag.
    active: Rc<Cell<bool>>,
    applied: Applied,
    /// Puts the class of the given size on the root.
    sync: Rc<dyn Fn(i32) -> bool>,
    /// Strips the applied class and the stylesheet from the scene.
    detach: Box<dyn Fn()>,
}

impl Binding {
    fn is(&self, scene: &Weak<dyn Any>) -> bool {
        Weak::ptr_eq(&self.scene, scene)
    }
}

/// Keeps the size class of a [`FontScale`] on the root node of every bound
/// scene.
///
/// On every bound scene with a root there is exactly one size class and it
/// is the class of the current size. The class follows size changes and
/// moves along when the scene replaces its root.
///
/// Each binding remembers the class it applied last and replaces exactly
/// that one, so an update skipped while the scene was borrowed elsewhere is
/// repaired by the next size change or by [`SceneStyleBinder::resync`].
///
/// Scenes are held weakly. Dropping the binder stops all updates but leaves
/// the last applied classes in place.
pub struct SceneStyleBinder {
    scale: FontScale,
    catalog: Rc<StyleCatalog>,
    stylesheet: Stylesheet,
    bindings: Vec<Binding>,
}

impl std::fmt::Debug for SceneStyleBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneStyleBinder")
            .field("catalog", &self.catalog)
            .field("stylesheet", self.stylesheet.source())
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}

impl SceneStyleBinder {
    /// Generates the stylesheet right away, a binder without one cannot style
    /// any scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the stylesheet backing cannot be created.
    pub fn new(scale: FontScale, settings: &SettingsStyle) -> Result<Self> {
        let catalog = StyleCatalog::new(settings.class_prefix.clone());
        let stylesheet = Stylesheet::create(&catalog, settings)?;
        Ok(Self {
            scale,
            catalog: Rc::new(catalog),
            stylesheet,
            bindings: Vec::new(),
        })
    }

    pub fn scale(&self) -> &FontScale {
        &self.scale
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Class matching the current size.
    pub fn current_class(&self) -> String {
        self.catalog.class_name(self.scale.current())
    }

    /// Attaches the stylesheet to `scene`, tags its root and starts tracking
    /// size changes and root replacements.
    ///
    /// Binding an already bound scene only re-applies the stylesheet and the
    /// class where they are missing.
    pub fn bind<S: Scene + 'static>(&mut self, scene: &Rc<RefCell<S>>) {
        self.prune();

        let id: Weak<dyn Any> = Rc::<RefCell<S>>::downgrade(scene);
        let existing = self
            .bindings
            .iter()
            .find(|b| b.is(&id))
            .map(|b| Rc::clone(&b.applied));
        let bound = existing.is_some();
        let applied = existing.unwrap_or_default();

        let class = self.current_class();
        let source = self.stylesheet.source();
        let mut guard = scene.borrow_mut();
        if !guard.stylesheets_mut().contains(source) {
            guard.stylesheets_mut().push(source.clone());
        }
        if let Some(root) = guard.root_classes_mut() {
            apply_class(root, &applied, class.clone());
        }

        if bound {
            debug!(%class, "scene already bound");
            return;
        }

        let active = Rc::new(Cell::new(true));
        guard.on_root_replaced(Box::new(
            self.root_listener(Rc::clone(&active), Rc::clone(&applied)),
        ));
        drop(guard);

        let sync: Rc<dyn Fn(i32) -> bool> = Rc::new(class_sync(
            Rc::downgrade(scene),
            Rc::clone(&self.catalog),
            Rc::clone(&applied),
        ));
        let on_size = Rc::clone(&sync);
        let subscription = self.scale.subscribe(move |event: Event| {
            if let Event::CurrentChanged(change) = event {
                on_size(change.new);
            }
        });
        self.bindings.push(Binding {
            scene: id,
            subscription,
            active,
            detach: Box::new(detacher(
                Rc::downgrade(scene),
                source.clone(),
                Rc::clone(&applied),
            )),
            applied,
            sync,
        });

        debug!(%class, scenes = self.bindings.len(), "scene bound");
    }

    /// Stops tracking `scene` and removes the size class and stylesheet from
    /// it. Returns `false` if the scene was not bound.
    pub fn unbind<S: Scene + 'static>(&mut self, scene: &Rc<RefCell<S>>) -> bool {
        let id: Weak<dyn Any> = Rc::<RefCell<S>>::downgrade(scene);
        let Some(pos) = self.bindings.iter().position(|b| b.is(&id)) else {
            return false;
        };

        let binding = self.bindings.remove(pos);
        self.release(&binding);
        (binding.detach)();

        debug!(scenes = self.bindings.len(), "scene unbound");
        true
    }

    /// Re-applies the current class to every live bound scene. Returns how
    /// many scenes could be updated; busy scenes are skipped.
    pub fn resync(&self) -> usize {
        let size = self.scale.current();
        self.bindings.iter().filter(|b| (b.sync)(size)).count()
    }

    pub fn is_bound<S: Scene + 'static>(&self, scene: &Rc<RefCell<S>>) -> bool {
        let id: Weak<dyn Any> = Rc::<RefCell<S>>::downgrade(scene);
        self.bindings
            .iter()
            .any(|b| b.is(&id) && b.scene.strong_count() > 0)
    }

    /// Number of bound scenes that are still alive.
    pub fn bound_scenes(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.scene.strong_count() > 0)
            .count()
    }

    fn root_listener(
        &self,
        active: Rc<Cell<bool>>,
        applied: Applied,
    ) -> impl FnMut(Option<&mut StyleClasses>, Option<&mut StyleClasses>) {
        let catalog = Rc::clone(&self.catalog);
        let scale = self.scale.clone();
        move |old: Option<&mut StyleClasses>, new: Option<&mut StyleClasses>| {
            if !active.get() {
                return;
            }
            let previous = applied.borrow_mut().take();
            if let (Some(old), Some(previous)) = (old, previous.as_deref()) {
                old.remove_all(previous);
            }
            if let Some(new) = new {
                apply_class(new, &applied, catalog.class_name(scale.current()));
            }
        }
    }

    fn release(&self, binding: &Binding) {
        binding.active.set(false);
        self.scale.unsubscribe(binding.subscription);
    }

    fn prune(&mut self) {
        let (alive, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bindings)
            .into_iter()
            .partition(|b| b.scene.strong_count() > 0);
        for binding in &dead {
            self.release(binding);
        }
        self.bindings = alive;
    }
}

impl Drop for SceneStyleBinder {
    fn drop(&mut self) {
        for binding in &self.bindings {
            self.release(binding);
        }
    }
}

/// Replaces the previously applied class on `root` with `class`.
fn apply_class(root: &mut StyleClasses, applied: &RefCell<Option<String>>, class: String) {
    let mut applied = applied.borrow_mut();
    if let Some(previous) = applied.as_deref() {
        if previous != class {
            root.remove_all(previous);
        }
    }
    root.add_unique(class.as_str());
    *applied = Some(class);
}

fn class_sync<S: Scene + 'static>(
    scene: Weak<RefCell<S>>,
    catalog: Rc<StyleCatalog>,
    applied: Applied,
) -> impl Fn(i32) -> bool {
    move |size: i32| {
        let Some(scene) = scene.upgrade() else {
            return false;
        };
        let Ok(mut scene) = scene.try_borrow_mut() else {
            warn!(size, "scene busy, size class not updated");
            return false;
        };
        if let Some(root) = scene.root_classes_mut() {
            apply_class(root, &applied, catalog.class_name(size));
        }
        true
    }
}

fn detacher<S: Scene + 'static>(
    scene: Weak<RefCell<S>>,
    source: StyleSource,
    applied: Applied,
) -> impl Fn() {
    move || {
        let Some(scene) = scene.upgrade() else {
            return;
        };
        let Ok(mut scene) = scene.try_borrow_mut() else {
            warn!("scene busy, not detached");
            return;
        };
        if let Some(previous) = applied.borrow_mut().take() {
            if let Some(root) = scene.root_classes_mut() {
                root.remove_all(&previous);
            }
        }
        scene.stylesheets_mut().retain(|s| *s != source);
    }
}
