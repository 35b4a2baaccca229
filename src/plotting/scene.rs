//! Retained scene the chart is drawn from.
//!
//! Layouts never draw directly. They describe the elements that should exist,
//! keyed by a stable identity, and [`Scene::reconcile`] turns that description
//! into enter/update/exit changes. Backends (the egui window, the PNG
//! rasteriser) only read the scene.

use plotters::style::RGBColor;
use std::collections::BTreeMap;
use std::time::Duration;

/// Stable identity of a scene element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKey {
    Commit(usize),
    FileCommit { file: usize, entry: usize },
    AuthorRow(String),
    FileRow(String),
    RhythmMarker { author: String, index: usize },
    TopAuthor(String),
    Axis,
    Tooltip,
    HitSurface,
}

/// Groups of elements created and removed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Commits,
    Rows,
    Markers,
    TopAuthors,
    Chrome,
}

impl ElementKey {
    pub fn layer(&self) -> Layer {
        match self {
            ElementKey::Commit(_) | ElementKey::FileCommit { .. } => Layer::Commits,
            ElementKey::AuthorRow(_) | ElementKey::FileRow(_) => Layer::Rows,
            ElementKey::RhythmMarker { .. } => Layer::Markers,
            ElementKey::TopAuthor(_) => Layer::TopAuthors,
            ElementKey::Axis | ElementKey::Tooltip | ElementKey::HitSurface => Layer::Chrome,
        }
    }
}

/// `translate(x, y) rotate(deg) translate(0, offset)`, applied right to left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translate: (f64, f64),
    pub rotate: f64,
    pub offset: f64,
}

impl Transform {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: (x, y),
            ..Self::default()
        }
    }

    pub fn radial(center: (f64, f64), degrees: f64, offset: f64) -> Self {
        Self {
            translate: center,
            rotate: degrees,
            offset,
        }
    }

    /// Map a point from element-local to chart coordinates.
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let y = y + self.offset;
        let (sin, cos) = self.rotate.to_radians().sin_cos();
        (
            self.translate.0 + x * cos - y * sin,
            self.translate.1 + x * sin + y * cos,
        )
    }

    pub fn then(&self, inner: &Transform) -> impl Fn((f64, f64)) -> (f64, f64) + '_ {
        let inner = *inner;
        move |point| self.apply(inner.apply(point))
    }

    pub fn lerp(&self, to: &Transform, t: f64) -> Transform {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Transform {
            translate: (
                mix(self.translate.0, to.translate.0),
                mix(self.translate.1, to.translate.1),
            ),
            rotate: mix(self.rotate, to.rotate),
            offset: mix(self.offset, to.offset),
        }
    }
}

/// A vertical bar in element-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub y: f64,
    pub height: f64,
    pub color: RGBColor,
}

/// A horizontal guide line spanning the time range behind a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Commit {
        insertion: Bar,
        deletion: Bar,
        width: f64,
    },
    Row {
        name: Label,
        count: Option<Label>,
        guide: Option<Guide>,
    },
    Marker {
        label: Option<&'static str>,
        label_transform: Transform,
    },
    TopAuthor {
        name: String,
    },
    Axis {
        length: f64,
        ticks: Vec<(f64, String)>,
    },
    Tooltip {
        message: String,
        stats: String,
        date: String,
    },
    HitSurface {
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Per-element visual state toggled by pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub hovered: bool,
    pub hidden: bool,
    pub highlighted: bool,
}

/// A move in flight: the element animates from `from` to its transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub from: Transform,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub transform: Transform,
    pub shape: Shape,
    pub flags: Flags,
    pub animation: Option<Animation>,
}

impl Element {
    pub fn new(transform: Transform, shape: Shape) -> Self {
        Self {
            transform,
            shape,
            flags: Flags::default(),
            animation: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.flags.hidden = true;
        self
    }

    /// Transform to draw `elapsed` into the element's animation.
    pub fn transform_at(&self, elapsed: Duration) -> Transform {
        match self.animation {
            Some(animation) if !animation.duration.is_zero() => {
                let t = (elapsed.as_secs_f64() / animation.duration.as_secs_f64()).min(1.0);
                animation.from.lerp(&self.transform, t)
            }
            _ => self.transform,
        }
    }
}

/// Enter/update/exit counts of one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Retained, keyed scene graph.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: BTreeMap<ElementKey, Element>,
    revision: u64,
}

impl PartialEq for Scene {
    /// Scenes are equal when they hold the same elements, whatever their history.
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every mutation; backends restart animations when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, key: &ElementKey) -> Option<&Element> {
        self.elements.get(key)
    }

    pub fn get_mut(&mut self, key: &ElementKey) -> Option<&mut Element> {
        self.revision += 1;
        self.elements.get_mut(key)
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.elements.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementKey, &Element)> {
        self.elements.iter()
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = (&ElementKey, &Element)> {
        self.elements.iter().filter(move |(key, _)| key.layer() == layer)
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).count()
    }

    /// Ensure `key` exists with `element`. Returns true when it was created.
    ///
    /// Pointer flags survive updates; with a non-zero `transition` a moved
    /// element animates from its previous target.
    pub fn upsert(&mut self, key: ElementKey, mut element: Element, transition: Duration) -> bool {
        self.revision += 1;
        match self.elements.get_mut(&key) {
            Some(existing) => {
                if !transition.is_zero() && existing.transform != element.transform {
                    element.animation = Some(Animation {
                        from: existing.transform,
                        duration: transition,
                    });
                }
                element.flags = existing.flags;
                *existing = element;
                false
            }
            None => {
                self.elements.insert(key, element);
                true
            }
        }
    }

    /// Make `layer` hold exactly `items`: new keys enter, known keys update,
    /// the rest of the layer exits.
    pub fn reconcile<I>(&mut self, layer: Layer, items: I, transition: Duration) -> ReconcileStats
    where
        I: IntoIterator<Item = (ElementKey, Element)>,
    {
        let mut stats = ReconcileStats::default();
        let mut seen = std::collections::BTreeSet::new();
        for (key, element) in items {
            debug_assert_eq!(key.layer(), layer);
            seen.insert(key.clone());
            if self.upsert(key, element, transition) {
                stats.entered += 1;
            } else {
                stats.updated += 1;
            }
        }
        let before = self.elements.len();
        self.elements
            .retain(|key, _| key.layer() != layer || seen.contains(key));
        stats.exited = before - self.elements.len();
        log::debug!("Reconciled {:?}: {:?}", layer, stats);
        stats
    }

    pub fn remove(&mut self, key: &ElementKey) -> Option<Element> {
        self.revision += 1;
        self.elements.remove(key)
    }

    pub fn remove_layer(&mut self, layer: Layer) -> usize {
        self.revision += 1;
        let before = self.elements.len();
        self.elements.retain(|key, _| key.layer() != layer);
        before - self.elements.len()
    }

    pub fn clear(&mut self) {
        self.revision += 1;
        self.elements.clear();
    }

    /// Apply `f` to every element of `layer`.
    pub fn update_layer(&mut self, layer: Layer, mut f: impl FnMut(&ElementKey, &mut Element)) {
        self.revision += 1;
        for (key, element) in self.elements.iter_mut() {
            if key.layer() == layer {
                f(key, element);
            }
        }
    }

    /// Flag `target` as hovered and clear the flag on the rest of its layer.
    pub fn set_hovered(&mut self, layer: Layer, target: Option<&ElementKey>) {
        self.update_layer(layer, |key, element| {
            element.flags.hovered = Some(key) == target;
        });
    }

    /// Drop finished animations so backends stop interpolating.
    pub fn settle(&mut self) {
        for element in self.elements.values_mut() {
            element.animation = None;
        }
    }
}
