//! The rendering context: sky modules, label engine and shared services.

use glam::{DVec2, DVec3};

use astrolabe_catalog::StarCatalog;
use astrolabe_config::Config;
use astrolabe_constellations::{
    ConstellationDisplay, ConstellationLocator, ConstellationSet, CultureNames, FrameContext,
    NameTable, NearestCapLocator, SkyCulture, SkyObject,
};
use astrolabe_labels::{LabelEngine, LabelSettings, LabelStyle};
use astrolabe_render::{Frame, InfoKind, InfoValue, ObjectKey, Observer, Painter, TextureLoader};

/// The closed set of modules drawn in the sky.
#[derive(Debug)]
pub enum SkyModule {
    Constellations(ConstellationSet),
    /// Paints the labels requested by the other modules.
    Labels,
}

impl SkyModule {
    /// Modules render in increasing order.
    pub fn render_order(&self) -> f64 {
        match self {
            Self::Constellations(_) => 25.0,
            Self::Labels => 100.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Constellations(_) => "constellations",
            Self::Labels => "labels",
        }
    }
}

/// Sky rendering context.
pub struct Sky {
    modules: Vec<SkyModule>,
    labels: LabelEngine,
    stars: Box<dyn StarCatalog>,
    textures: Box<dyn TextureLoader>,
    names: Box<dyn CultureNames>,
    locator: Box<dyn ConstellationLocator>,
    selection: Option<ObjectKey>,
    next_key: u64,
}

impl Sky {
    pub fn new(
        stars: Box<dyn StarCatalog>,
        textures: Box<dyn TextureLoader>,
        settings: LabelSettings,
        display: ConstellationDisplay,
    ) -> Self {
        let mut modules = vec![
            SkyModule::Labels,
            SkyModule::Constellations(ConstellationSet::new(display)),
        ];
        modules.sort_by(|a, b| a.render_order().total_cmp(&b.render_order()));
        Self {
            modules,
            labels: LabelEngine::new(settings),
            stars,
            textures,
            names: Box::new(NameTable::new()),
            locator: Box::new(NearestCapLocator::new()),
            selection: None,
            next_key: 1,
        }
    }

    /// Create a sky with the label and display settings of `config`.
    pub fn from_config(
        config: &Config,
        stars: Box<dyn StarCatalog>,
        textures: Box<dyn TextureLoader>,
    ) -> Self {
        let settings = LabelSettings {
            max_overlap: config.labels.max_overlap,
            fade_duration: config.labels.fade_duration,
            lang: config.view.lang.clone(),
        };
        let mut sky = Self::new(stars, textures, settings, ConstellationDisplay::default());
        sky.apply_config(config);
        sky
    }

    /// Apply display toggles and language. Layers fade toward the new
    /// values.
    pub fn apply_config(&mut self, config: &Config) {
        self.labels.set_lang(&config.view.lang);
        if let Some(set) = self.constellations_mut() {
            let c = &config.constellations;
            set.set_lines_visible(c.lines_visible);
            set.set_labels_visible(c.labels_visible);
            set.set_images_visible(c.images_visible);
            set.set_bounds_visible(c.bounds_visible);
            set.set_lines_animation(c.lines_animation);
            set.set_show_only_pointed(c.show_only_pointed);
            set.set_illustrations_bscale(c.illustrations_bscale);
        }
    }

    pub fn modules(&self) -> &[SkyModule] {
        &self.modules
    }

    pub fn constellations(&self) -> Option<&ConstellationSet> {
        self.modules.iter().find_map(|m| match m {
            SkyModule::Constellations(set) => Some(set),
            SkyModule::Labels => None,
        })
    }

    pub fn constellations_mut(&mut self) -> Option<&mut ConstellationSet> {
        self.modules.iter_mut().find_map(|m| match m {
            SkyModule::Constellations(set) => Some(set),
            SkyModule::Labels => None,
        })
    }

    /// Replace the constellations with the ones of `culture`. Returns the
    /// keys given to the new figures, in definition order.
    pub fn load_culture(&mut self, culture: SkyCulture) -> Vec<ObjectKey> {
        let SkyCulture {
            name,
            names,
            constellations,
        } = culture;
        self.names = Box::new(NameTable::from(names));

        let first = self.next_key;
        self.next_key += constellations.len() as u64;
        let keys: Vec<ObjectKey> = (first..self.next_key).map(ObjectKey).collect();
        let Some(set) = self.modules.iter_mut().find_map(|m| match m {
            SkyModule::Constellations(set) => Some(set),
            SkyModule::Labels => None,
        }) else {
            return Vec::new();
        };
        set.clear(self.stars.as_mut(), self.textures.as_mut());
        set.invalidate_pointed();
        for (key, info) in keys.iter().zip(constellations) {
            set.insert(*key, info);
        }
        tracing::info!("Sky culture '{name}' active with {} figures", keys.len());
        keys
    }

    /// Locator built from the caps of the figures ready so far.
    pub fn figure_locator(&self) -> NearestCapLocator {
        let mut locator = NearestCapLocator::new();
        for con in self.constellations().into_iter().flat_map(|set| set.iter()) {
            if let Some(cap) = con.cap()
                && !con.info().iau.is_empty()
            {
                locator.add(con.info().iau.clone(), cap);
            }
        }
        locator
    }

    pub fn set_locator(&mut self, locator: Box<dyn ConstellationLocator>) {
        self.locator = locator;
        if let Some(set) = self.constellations_mut() {
            set.invalidate_pointed();
        }
    }

    pub fn set_names(&mut self, names: Box<dyn CultureNames>) {
        self.names = names;
    }

    pub fn selection(&self) -> Option<ObjectKey> {
        self.selection
    }

    pub fn select(&mut self, key: Option<ObjectKey>) {
        self.selection = key;
    }

    /// Advance every fader by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        for module in &mut self.modules {
            match module {
                SkyModule::Constellations(set) => set.update(dt, self.selection),
                SkyModule::Labels => self.labels.update(dt),
            }
        }
    }

    /// Render every module in order.
    pub fn render(&mut self, painter: &mut dyn Painter) {
        self.labels.reset();
        for module in &mut self.modules {
            match module {
                SkyModule::Constellations(set) => {
                    let mut ctx = FrameContext {
                        painter: &mut *painter,
                        stars: self.stars.as_mut(),
                        textures: self.textures.as_mut(),
                        labels: &mut self.labels,
                        names: self.names.as_ref(),
                        locator: self.locator.as_ref(),
                        selection: self.selection,
                    };
                    set.render(&mut ctx);
                }
                SkyModule::Labels => self.labels.render(painter),
            }
        }
    }

    /// Query a property of the object `key`, loading its data if needed.
    pub fn info(
        &mut self,
        key: ObjectKey,
        kind: InfoKind,
        observer: &Observer,
    ) -> Option<InfoValue> {
        let set = self.modules.iter_mut().find_map(|m| match m {
            SkyModule::Constellations(set) => Some(set),
            SkyModule::Labels => None,
        })?;
        set.get_mut(key)?
            .info_value(kind, self.stars.as_mut(), self.textures.as_mut(), observer)
    }

    pub fn labels(&self) -> &LabelEngine {
        &self.labels
    }

    /// Request a screen label for this frame.
    pub fn add_label(
        &mut self,
        text: &str,
        win_pos: DVec2,
        style: &LabelStyle,
        priority: f64,
        obj: Option<ObjectKey>,
    ) {
        self.labels.add(text, win_pos, style, priority, obj);
    }

    /// Request a sky label for this frame.
    #[allow(clippy::too_many_arguments)]
    pub fn add_label_3d(
        &mut self,
        text: &str,
        frame: Frame,
        pos: DVec3,
        at_inf: bool,
        style: &LabelStyle,
        priority: f64,
        obj: Option<ObjectKey>,
    ) {
        self.labels.add_3d(text, frame, pos, at_inf, style, priority, obj);
    }

    /// Hide the label of `obj`, e.g. while a selection pointer shows it.
    pub fn hide_label_for(&mut self, obj: Option<ObjectKey>) {
        self.labels.hide_label_for(obj);
    }

    pub fn has_label(&self, obj: ObjectKey) -> bool {
        self.labels.has_obj(obj)
    }

    /// Object whose label is under `pos`.
    pub fn label_at(&self, pos: DVec2, max_dist: f64) -> Option<ObjectKey> {
        self.labels.obj_at(pos, max_dist)
    }
}
