use glam::{DVec2, DVec3};

use astrolabe_catalog::{StarArena, StarRecord};
use astrolabe_labels::LabelEngine;
use astrolabe_math::{Cap, Fader, from_spherical};
use astrolabe_render::{
    BlendMode, DrawCommand, InfoKind, InfoValue, ObjectKey, Observer, Painter, SkyPainter,
    TextureCache, Viewport,
};

use crate::*;

const TT: f64 = 51544.5;

fn dir(ra_deg: f64, dec_deg: f64) -> DVec3 {
    from_spherical(ra_deg.to_radians(), dec_deg.to_radians())
}

fn star(hip: u32, ra: f64, dec: f64) -> StarRecord {
    StarRecord {
        hip,
        ra,
        dec,
        vmag: 2.0,
        pm_ra: 0.0,
        pm_dec: 0.0,
    }
}

struct Fixture {
    stars: StarArena,
    textures: TextureCache,
    painter: SkyPainter,
    labels: LabelEngine,
    names: NameTable,
    locator: NearestCapLocator,
}

impl Fixture {
    fn new() -> Self {
        let stars = StarArena::from_records([
            star(1, 80.0, -4.0),
            star(2, 84.0, -2.0),
            star(3, 86.0, 2.0),
            star(4, 90.0, 4.0),
            star(5, 88.0, -5.0),
            star(7, 83.0, 5.0),
        ])
        .unwrap();
        let observer = Observer::looking_at(TT, dir(85.0, 0.0), DVec3::Z);
        let painter = SkyPainter::new(
            observer,
            Viewport::new(800.0, 600.0, 1.0, 60f64.to_radians()),
        );
        let mut names = NameTable::new();
        names.insert("CON western Ori", "Orion");
        let mut locator = NearestCapLocator::new();
        locator.add("Ori", Cap::from_angle(dir(85.0, 0.0), 10f64.to_radians()));
        Self {
            stars,
            textures: TextureCache::new(),
            painter,
            labels: LabelEngine::default(),
            names,
            locator,
        }
    }

    fn ctx(&mut self, selection: Option<ObjectKey>) -> FrameContext<'_> {
        FrameContext {
            painter: &mut self.painter,
            stars: &mut self.stars,
            textures: &mut self.textures,
            labels: &mut self.labels,
            names: &self.names,
            locator: &self.locator,
            selection,
        }
    }

    /// Run `n` frames of one second; returns the draw calls of the last.
    fn frames(
        &mut self,
        set: &mut ConstellationSet,
        selection: Option<ObjectKey>,
        n: usize,
    ) -> Vec<DrawCommand> {
        let mut last = Vec::new();
        for _ in 0..n {
            self.painter.take_commands();
            self.labels.reset();
            set.render(&mut self.ctx(selection));
            self.labels.render(&mut self.painter);
            set.update(1.0, selection);
            self.labels.update(1.0);
            last = self.painter.take_commands();
        }
        last
    }
}

fn display(lines: bool, labels: bool, images: bool, bounds: bool) -> ConstellationDisplay {
    ConstellationDisplay {
        lines: Fader::new(lines),
        labels: Fader::new(labels),
        images: Fader::new(images),
        bounds: Fader::new(bounds),
        show_only_pointed: false,
        ..ConstellationDisplay::default()
    }
}

fn orion() -> ConstellationInfo {
    let mut info = ConstellationInfo::new("CON western Ori", "Ori");
    info.lines = vec![
        LineDef {
            stars: [1, 2],
            weight: LineWeight::Normal,
        },
        LineDef {
            stars: [3, 4],
            weight: LineWeight::Bold,
        },
        LineDef {
            stars: [5, 6],
            weight: LineWeight::Normal,
        },
    ];
    info
}

fn with_image(mut info: ConstellationInfo, uvs: [[f64; 2]; 3]) -> ConstellationInfo {
    let hips = [1, 4, 7];
    info.image = Some(ImageDef {
        path: "ori.webp".to_string(),
        anchors: [0, 1, 2].map(|i| Anchor {
            uv: uvs[i],
            hip: hips[i],
        }),
    });
    info
}

const GOOD_UVS: [[f64; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

fn constellation_lines(cmds: &[DrawCommand]) -> usize {
    cmds.iter()
        .filter(|c| matches!(c, DrawCommand::Line { style, .. } if style.dash_length == 0.0))
        .count()
}

#[test]
fn test_partial_resolution_becomes_ready() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, false, false, false));
    let key = ObjectKey(1);
    set.insert(key, orion());

    let cmds = fx.frames(&mut set, None, 3);
    let con = set.get(key).unwrap();
    assert_eq!(con.state(), LoadState::Ready);
    assert!(con.error().is_none());
    assert_eq!(con.nb_stars(), 6);
    assert_eq!(con.drawable_segments(), 2);
    assert_eq!(constellation_lines(&cmds), 2);
    // Five stars found, one reference each.
    assert_eq!(fx.stars.total_refs(), 5);
}

#[test]
fn test_no_resolvable_star_is_errored_and_never_rendered() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, true, true, true));
    let key = ObjectKey(2);
    let mut info = ConstellationInfo::new("CON western Xxx", "");
    info.lines = vec![LineDef {
        stars: [100, 101],
        weight: LineWeight::Normal,
    }];
    set.insert(key, info);

    let cmds = fx.frames(&mut set, Some(key), 3);
    let con = set.get(key).unwrap();
    assert_eq!(con.state(), LoadState::Errored);
    assert!(matches!(con.error(), Some(ConstellationError::NoStars(_))));
    assert!(con.cap().is_none());
    assert!(cmds.is_empty());
    assert!(fx.labels.is_empty());
}

#[test]
fn test_empty_definition_is_errored() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, true, true, true));
    let key = ObjectKey(3);
    set.insert(key, ConstellationInfo::new("CON western Nil", "Nil"));
    let cmds = fx.frames(&mut set, Some(key), 2);
    let con = set.get(key).unwrap();
    assert_eq!(con.state(), LoadState::Errored);
    assert!(matches!(con.error(), Some(ConstellationError::Empty(_))));
    assert!(cmds.is_empty());
}

#[test]
fn test_pending_star_retried_without_holding_references() {
    let mut fx = Fixture::new();
    fx.stars.defer(3);
    let mut con = Constellation::new(ObjectKey(4), orion());
    let obs = fx.painter.observer().clone();
    assert_eq!(
        con.refresh(&mut fx.stars, &mut fx.textures, &obs),
        LoadState::Loading
    );
    assert_eq!(fx.stars.total_refs(), 0);
    assert!(con.position().is_none());
    assert!(
        con.info_value(InfoKind::Radius, &mut fx.stars, &mut fx.textures, &obs)
            .is_none()
    );

    fx.stars.complete_all();
    assert_eq!(
        con.refresh(&mut fx.stars, &mut fx.textures, &obs),
        LoadState::Ready
    );
    assert_eq!(fx.stars.total_refs(), 5);
}

#[test]
fn test_geometry_kept_within_a_year() {
    let mut fast = star(2, 84.0, -2.0);
    fast.pm_dec = 2_000_000.0;
    let mut stars = StarArena::from_records([star(1, 80.0, -4.0), fast]).unwrap();
    let mut textures = TextureCache::new();
    let mut info = ConstellationInfo::new("CON test Fst", "");
    info.lines = vec![LineDef {
        stars: [1, 2],
        weight: LineWeight::Normal,
    }];
    let mut con = Constellation::new(ObjectKey(5), info);
    let mut obs = Observer::looking_at(TT, dir(85.0, 0.0), DVec3::Z);

    con.refresh(&mut stars, &mut textures, &obs);
    let cap = con.cap().unwrap();
    let radius = con.radius().unwrap();

    obs.set_tt(TT + 200.0);
    con.refresh(&mut stars, &mut textures, &obs);
    assert_eq!(con.cap().unwrap(), cap);
    assert_eq!(con.radius().unwrap(), radius);
    assert_eq!(con.position().unwrap(), cap.center);

    obs.set_tt(TT + 400.0);
    con.refresh(&mut stars, &mut textures, &obs);
    assert_ne!(con.cap().unwrap(), cap);
}

#[test]
fn test_single_star_figure_gets_default_radius() {
    let mut fx = Fixture::new();
    let mut info = ConstellationInfo::new("CON kamilaroi One", "");
    info.lines = vec![LineDef {
        stars: [2, 2],
        weight: LineWeight::Normal,
    }];
    let mut con = Constellation::new(ObjectKey(6), info);
    let obs = fx.painter.observer().clone();
    con.refresh(&mut fx.stars, &mut fx.textures, &obs);
    assert!(con.is_single_point());
    assert!((con.radius().unwrap() - 1f64.to_radians()).abs() < 1e-9);
}

#[test]
fn test_illustration_fades_in_once_texture_ready() {
    let mut fx = Fixture::new();
    fx.textures.mark_ready("ori.webp");
    let mut set = ConstellationSet::new(display(true, false, true, false));
    let key = ObjectKey(7);
    set.insert(key, with_image(orion(), GOOD_UVS));

    // Ready, then visible, then image-loaded fader.
    let cmds = fx.frames(&mut set, None, 4);
    let quads: Vec<&DrawCommand> = cmds
        .iter()
        .filter(|c| matches!(c, DrawCommand::Quad { .. }))
        .collect();
    assert_eq!(quads.len(), 1);
    match quads[0] {
        DrawCommand::Quad { color, blend, .. } => {
            assert_eq!(*blend, BlendMode::Additive);
            assert!((color[3] - 0.3).abs() < 1e-6);
        }
        _ => unreachable!(),
    }
    let con = set.get(key).unwrap();
    assert!(con.image_cap().is_some());
    assert_eq!(con.image_loaded_fader().value, 1.0);
}

#[test]
fn test_illustration_waits_for_texture() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, false, true, false));
    set.insert(ObjectKey(8), with_image(orion(), GOOD_UVS));
    let cmds = fx.frames(&mut set, None, 4);
    assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::Quad { .. })));
    assert_eq!(constellation_lines(&cmds), 2);
}

#[test]
fn test_singular_image_transform_drops_illustration() {
    let mut fx = Fixture::new();
    fx.textures.mark_ready("ori.webp");
    let mut set = ConstellationSet::new(display(true, false, true, false));
    let key = ObjectKey(9);
    set.insert(
        key,
        with_image(orion(), [[0.0, 0.0], [0.5, 0.5], [1.0, 1.0]]),
    );
    let cmds = fx.frames(&mut set, None, 4);
    let con = set.get(key).unwrap();
    assert_eq!(con.state(), LoadState::Ready);
    assert!(!con.has_illustration());
    assert!(con.image_cap().is_none());
    assert!(fx.textures.is_empty());
    // Anchor stars given back, line stars kept.
    assert_eq!(fx.stars.total_refs(), 5);
    assert_eq!(constellation_lines(&cmds), 2);
}

#[test]
fn test_missing_anchor_drops_illustration() {
    let mut fx = Fixture::new();
    let mut info = with_image(orion(), GOOD_UVS);
    if let Some(image) = info.image.as_mut() {
        image.anchors[2].hip = 999;
    }
    let mut con = Constellation::new(ObjectKey(10), info);
    let obs = fx.painter.observer().clone();
    assert_eq!(
        con.refresh(&mut fx.stars, &mut fx.textures, &obs),
        LoadState::Ready
    );
    assert!(!con.has_illustration());
    assert!(fx.textures.is_empty());
}

#[test]
fn test_image_only_figure_uses_image_cap() {
    let mut fx = Fixture::new();
    let info = with_image(ConstellationInfo::new("CON test Img", "Img"), GOOD_UVS);
    let mut con = Constellation::new(ObjectKey(11), info);
    let obs = fx.painter.observer().clone();
    assert_eq!(
        con.refresh(&mut fx.stars, &mut fx.textures, &obs),
        LoadState::Ready
    );
    assert_eq!(con.cap(), con.image_cap());
    assert_eq!(con.nb_stars(), 0);
}

#[test]
fn test_label_added_when_it_fits() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, true, false, false));
    let key = ObjectKey(12);
    set.insert(key, orion());
    fx.frames(&mut set, None, 3);
    let label = fx
        .labels
        .get(Some(key), "Orion", FONT_SIZE_BASE)
        .expect("label registered");
    assert_eq!(label.render_text(), "ORION");
    assert!(label.is_active());
    assert_eq!(label.priority(), astrolabe_labels::MAX_PRIORITY);
}

#[test]
fn test_label_skipped_when_figure_too_small() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, true, false, false));
    let key = ObjectKey(13);
    let mut info = ConstellationInfo::new("CON western Tiny", "");
    info.lines = vec![LineDef {
        stars: [2, 3],
        weight: LineWeight::Normal,
    }];
    fx.names
        .insert("CON western Tiny", "A Very Long Constellation Name");
    set.insert(key, info);
    fx.frames(&mut set, None, 3);
    assert!(fx.labels.is_empty());

    // Selected figures are always labelled.
    fx.frames(&mut set, Some(key), 1);
    assert!(fx.labels.has_obj(key));
}

#[test]
fn test_pointed_mode_limits_to_center_figure() {
    let mut fx = Fixture::new();
    let mut d = display(true, false, false, false);
    d.show_only_pointed = true;
    let mut set = ConstellationSet::new(d);
    let ori = ObjectKey(14);
    let other = ObjectKey(15);
    set.insert(ori, orion());
    let mut cas = ConstellationInfo::new("CON western Cas", "Cas");
    cas.lines = vec![LineDef {
        stars: [3, 4],
        weight: LineWeight::Normal,
    }];
    set.insert(other, cas);
    fx.frames(&mut set, None, 3);
    assert!(set.get(ori).unwrap().visible_fader().target);
    assert!(!set.get(other).unwrap().visible_fader().target);
    assert_eq!(set.get(other).unwrap().visible_fader().value, 0.0);
}

#[test]
fn test_bounds_drawn_dashed() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(false, false, false, true));
    let mut info = orion();
    let ra = |deg: f64| deg.to_radians();
    info.edges = vec![
        [[ra(82.0), ra(-3.0)], [ra(88.0), ra(-3.0)]],
        // Crosses ra = 0.
        [[ra(359.0), ra(1.0)], [ra(1.0), ra(1.0)]],
    ];
    set.insert(ObjectKey(16), info);
    let cmds = fx.frames(&mut set, None, 3);
    let dashed: Vec<&DrawCommand> = cmds
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { style, .. } if style.dash_length == 8.0))
        .collect();
    assert_eq!(dashed.len(), 2);
    if let DrawCommand::Line { points, style } = dashed[1] {
        assert!((style.dash_ratio - 0.85).abs() < 1e-12);
        // The wrapped edge stays short instead of going around the sky.
        let span = points[0].dot(points[points.len() - 1]).acos();
        assert!(span < 3f64.to_radians());
    }
    assert_eq!(constellation_lines(&cmds), 0);
}

#[test]
fn test_idle_collection_skips_entities() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(false, false, false, false));
    let key = ObjectKey(17);
    set.insert(key, orion());
    fx.frames(&mut set, None, 2);
    assert_eq!(set.get(key).unwrap().state(), LoadState::Loading);

    // The selection wakes the module up.
    let cmds = fx.frames(&mut set, Some(key), 3);
    assert_eq!(set.get(key).unwrap().state(), LoadState::Ready);
    assert_eq!(constellation_lines(&cmds), 2);
}

#[test]
fn test_selected_lines_are_wider() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, false, false, false));
    let key = ObjectKey(18);
    set.insert(key, orion());
    let cmds = fx.frames(&mut set, Some(key), 3);
    for cmd in &cmds {
        if let DrawCommand::Line { style, .. } = cmd {
            assert_eq!(style.width, 2.0);
        }
    }
}

#[test]
fn test_info_designations_and_json() {
    let mut fx = Fixture::new();
    let mut info = orion();
    info.description = Some("The hunter.".to_string());
    let mut con = Constellation::new(ObjectKey(19), info);
    let obs = fx.painter.observer().clone();
    let Some(InfoValue::Position(pos)) =
        con.info_value(InfoKind::Position, &mut fx.stars, &mut fx.textures, &obs)
    else {
        panic!("no position");
    };
    assert!(pos.dot(dir(85.0, 0.0)) > 0.99);
    let Some(InfoValue::Radius(r)) =
        con.info_value(InfoKind::Radius, &mut fx.stars, &mut fx.textures, &obs)
    else {
        panic!("no radius");
    };
    assert!(r > 0.0);

    assert_eq!(
        con.designations(),
        vec![
            ("CON", "western Ori".to_string()),
            ("NAME", "Ori".to_string())
        ]
    );
    assert_eq!(con.json_data()["description"], "The hunter.");

    let (center, size, angle) = con.ellipse_2d(&fx.painter).unwrap();
    assert!((center - DVec2::new(400.0, 300.0)).length() < 100.0);
    assert!(size.x > 0.0);
    assert_eq!(angle, 0.0);
}

#[test]
fn test_release_returns_everything() {
    let mut fx = Fixture::new();
    let mut set = ConstellationSet::new(display(true, false, true, false));
    let key = ObjectKey(20);
    set.insert(key, with_image(orion(), GOOD_UVS));
    fx.frames(&mut set, None, 1);
    assert!(fx.stars.total_refs() > 0);
    assert!(!fx.textures.is_empty());
    let con = set.remove(key, &mut fx.stars, &mut fx.textures).unwrap();
    assert_eq!(fx.stars.total_refs(), 0);
    assert!(fx.textures.is_empty());
    assert_eq!(con.state(), LoadState::Loading);
    assert!(set.is_empty());
}
