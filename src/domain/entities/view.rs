//! Renderable view entities.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Visual transform state of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub opacity: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub translate_z: f32,
    /// Rotation in degrees.
    pub rotate: f32,
}

impl Transform {
    /// Fully opaque, unscaled, untranslated and unrotated.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
        scale_z: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        translate_z: 0.0,
        rotate: 0.0,
    };

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Tree-structured UI node produced by a view loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub title: String,
    pub body: Vec<String>,
    pub style_classes: Vec<String>,
    pub stylesheets: Vec<String>,
    pub transform: Transform,
}

impl View {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_style_class(mut self, class: impl Into<String>) -> Self {
        self.style_classes.push(class.into());
        self
    }

    /// Restores the identity transform.
    pub fn reset_transform(&mut self) {
        self.transform = Transform::IDENTITY;
    }
}

/// Shared handle to a view.
///
/// Views are shared between the screen registry, the host display list and
/// running transitions. All of them live on the UI thread, hence `Rc`.
#[derive(Debug, Clone)]
pub struct ViewHandle(Rc<RefCell<View>>);

impl ViewHandle {
    #[must_use]
    pub fn new(view: View) -> Self {
        Self(Rc::new(RefCell::new(view)))
    }

    /// # Panics
    /// Panics if the view is currently mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, View> {
        self.0.borrow()
    }

    /// # Panics
    /// Panics if the view is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, View> {
        self.0.borrow_mut()
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.0.borrow().transform
    }

    pub fn set_transform(&self, transform: Transform) {
        self.0.borrow_mut().transform = transform;
    }

    pub fn update_transform(&self, f: impl FnOnce(&mut Transform)) {
        f(&mut self.0.borrow_mut().transform);
    }

    /// Returns whether both handles point to the same view.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<View> for ViewHandle {
    fn from(view: View) -> Self {
        Self::new(view)
    }
}
