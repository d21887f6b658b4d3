//! The label registry and its per-frame layout pass.

use glam::{DVec2, DVec3};
use rustc_hash::FxHashMap;

use astrolabe_render::{
    Align, Frame, ObjectKey, Painter, TextEffects, lang_supports_spacing,
};

use crate::label::{Label, LabelAnchor, LabelKey, LabelStyle, MAX_PRIORITY};

/// Tunables of the label engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSettings {
    /// Overlap in window units above which a floating label is hidden.
    pub max_overlap: f64,
    /// Fade time of new labels, in seconds.
    pub fade_duration: f64,
    /// UI language, decides whether spaced text is supported.
    pub lang: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            max_overlap: 8.0,
            fade_duration: 0.2,
            lang: "en".to_string(),
        }
    }
}

/// Registry of the labels on screen.
///
/// Labels live in a slot vector with a free list; `order` holds the live
/// slots in render order and `index` maps label identity to its slot.
#[derive(Debug, Default)]
pub struct LabelEngine {
    slots: Vec<Option<Label>>,
    free: Vec<usize>,
    order: Vec<usize>,
    index: FxHashMap<LabelKey, usize>,
    hidden: Option<ObjectKey>,
    settings: LabelSettings,
}

impl LabelEngine {
    pub fn new(settings: LabelSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &LabelSettings {
        &self.settings
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.settings.lang = lang.to_string();
    }

    /// Request a label at a window position for this frame.
    pub fn add(
        &mut self,
        text: &str,
        win_pos: DVec2,
        style: &LabelStyle,
        priority: f64,
        obj: Option<ObjectKey>,
    ) {
        self.upsert(text, LabelAnchor::Screen(win_pos), style, priority, obj);
    }

    /// Request a label attached to a sky position for this frame.
    #[allow(clippy::too_many_arguments)]
    pub fn add_3d(
        &mut self,
        text: &str,
        frame: Frame,
        pos: DVec3,
        at_inf: bool,
        style: &LabelStyle,
        priority: f64,
        obj: Option<ObjectKey>,
    ) {
        self.upsert(text, LabelAnchor::Sky { frame, pos, at_inf }, style, priority, obj);
    }

    fn upsert(
        &mut self,
        text: &str,
        anchor: LabelAnchor,
        style: &LabelStyle,
        priority: f64,
        obj: Option<ObjectKey>,
    ) {
        if text.is_empty() {
            return;
        }
        let mut style = *style;
        if style.text.align.is_empty() {
            style.text.align = Align::CENTER | Align::BOTTOM;
        }
        if !lang_supports_spacing(&self.settings.lang) {
            style.text.effects.remove(TextEffects::SPACED);
        }
        let priority = if style.text.effects.contains(TextEffects::FLOAT) {
            priority.min(MAX_PRIORITY)
        } else {
            MAX_PRIORITY
        };

        let key = LabelKey {
            obj,
            text: text.to_string(),
            size_bits: style.text.size.to_bits(),
        };
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let label = Label::new(obj, text, self.settings.fade_duration);
                let slot = match self.free.pop() {
                    Some(slot) => {
                        self.slots[slot] = Some(label);
                        slot
                    }
                    None => {
                        self.slots.push(Some(label));
                        self.slots.len() - 1
                    }
                };
                self.order.push(slot);
                self.index.insert(key, slot);
                slot
            }
        };
        let Some(label) = self.slots[slot].as_mut() else {
            return;
        };
        if let LabelAnchor::Screen(win) = anchor {
            label.win_pos = win;
        }
        label.anchor = anchor;
        label.render_text = if style.text.effects.contains(TextEffects::UPPERCASE) {
            text.to_uppercase()
        } else {
            text.to_string()
        };
        label.style = style;
        label.priority = priority;
        label.fader.target = true;
        label.active = true;
    }

    /// Lay out and paint every label, farthest first.
    pub fn render(&mut self, painter: &mut dyn Painter) {
        let slots = &self.slots;
        let depth = |i: usize| slots[i].as_ref().map_or(f64::INFINITY, |l| l.anchor.depth());
        self.order.sort_by(|&a, &b| depth(b).total_cmp(&depth(a)));

        for rank in 0..self.order.len() {
            let idx = self.order[rank];
            let Some(label) = self.slots[idx].as_mut() else {
                continue;
            };
            if self.hidden.is_some() && label.obj == self.hidden {
                continue;
            }

            let mut on_screen = true;
            if let LabelAnchor::Sky { frame, pos, at_inf } = label.anchor {
                match painter.project(frame, pos, at_inf) {
                    Some(win) => label.win_pos = win,
                    None => on_screen = false,
                }
            }
            let win = label.offset_position();
            label.bounds = painter.text_bounds(&label.render_text, win, &label.style.text);

            let overlap = self.overlap(rank);
            let max_overlap = self.settings.max_overlap;
            let Some(label) = self.slots[idx].as_mut() else {
                continue;
            };
            label.fader.target = label.active && on_screen && overlap <= max_overlap;

            if let LabelAnchor::Sky { frame, pos, at_inf } = label.anchor {
                let icrf = painter.observer().convert(frame, Frame::Icrf, pos);
                if painter.is_point_occulted(icrf, at_inf, label.obj) {
                    label.fader.target = false;
                }
            }

            let mut style = label.style.text;
            style.color[3] *= label.fader.value as f32;
            if on_screen && style.color[3] > 0.0 {
                painter.paint_text(&label.render_text, win, &style);
            }
        }
    }

    /// Largest overlap between the label at `rank` and the labels that
    /// take precedence over it: any visible label of strictly higher
    /// priority, or an equal-priority one already laid out this pass.
    fn overlap(&self, rank: usize) -> f64 {
        let Some(label) = self.slots[self.order[rank]].as_ref() else {
            return 0.0;
        };
        if !label.effects().contains(TextEffects::FLOAT) {
            return 0.0;
        }
        self.order
            .iter()
            .enumerate()
            .filter(|&(r, _)| r != rank)
            .filter_map(|(r, &i)| self.slots[i].as_ref().map(|other| (r, other)))
            .filter(|(r, other)| {
                other.fader.target
                    && (other.priority > label.priority
                        || (other.priority == label.priority && *r < rank))
            })
            .filter_map(|(_, other)| label.bounds.intersection(&other.bounds))
            .map(|inter| inter.width().min(inter.height()))
            .fold(0.0, f64::max)
    }

    /// Advance every label fader.
    pub fn update(&mut self, dt: f64) {
        for label in self.slots.iter_mut().flatten() {
            label.fader.update(dt);
        }
    }

    /// Start a new frame: drop fully faded labels and mark the others as
    /// not requested yet.
    pub fn reset(&mut self) {
        let mut reclaimed = 0;
        let slots = &mut self.slots;
        let free = &mut self.free;
        let index = &mut self.index;
        self.order.retain(|&i| {
            let Some(label) = slots[i].as_mut() else {
                return false;
            };
            if !label.fader.target && label.fader.value == 0.0 {
                index.remove(&label.key());
                slots[i] = None;
                free.push(i);
                reclaimed += 1;
                false
            } else {
                label.active = false;
                label.fader.target = false;
                true
            }
        });
        if reclaimed > 0 {
            tracing::debug!("Reclaimed {reclaimed} faded labels, {} left", self.order.len());
        }
    }

    /// Whether any label is bound to `obj`.
    pub fn has_obj(&self, obj: ObjectKey) -> bool {
        self.iter().any(|l| l.obj == Some(obj))
    }

    /// Object of the first visible label within `max_dist` of `pos`.
    pub fn obj_at(&self, pos: DVec2, max_dist: f64) -> Option<ObjectKey> {
        self.iter()
            .filter(|l| l.obj.is_some() && l.active && l.fader.value != 0.0)
            .find(|l| l.bounds.distance_to(pos) <= max_dist)
            .and_then(|l| l.obj)
    }

    /// Stop painting labels of `obj`; replaces any previously hidden
    /// object. `None` shows everything again.
    pub fn hide_label_for(&mut self, obj: Option<ObjectKey>) {
        self.hidden = obj;
    }

    pub fn hidden(&self) -> Option<ObjectKey> {
        self.hidden
    }

    /// Labels in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.order.iter().filter_map(|&i| self.slots[i].as_ref())
    }

    /// Label with the given identity.
    pub fn get(&self, obj: Option<ObjectKey>, text: &str, size: f64) -> Option<&Label> {
        let key = LabelKey {
            obj,
            text: text.to_string(),
            size_bits: size.to_bits(),
        };
        self.index.get(&key).and_then(|&i| self.slots[i].as_ref())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
