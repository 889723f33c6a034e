// Frame-loop tests for the engine: activity gating, reset convergence, zoom
// and housekeeping.

use glam::DVec2;
use std::time::Duration;
use supershape_core::*;

const DT: Duration = Duration::from_millis(16);

fn engine(preset: TuningPreset) -> Engine {
    Engine::new(EngineConfig::from_preset(preset), 800.0, 600.0).unwrap()
}

fn key(e: &Engine, c: char) -> ControlId {
    e.control_for_key(c).unwrap()
}

fn run(e: &mut Engine, frames: usize) -> FrameOutput {
    let mut out = e.tick(DT);
    for _ in 1..frames {
        out = e.tick(DT);
    }
    out
}

#[test]
fn new_engine_starts_with_one_baseline_shape() {
    let e = engine(TuningPreset::Cinematic);
    assert_eq!(e.shapes().len(), 1);
    assert_eq!(*e.shapes()[0].params(), ShapeParams::BASELINE);
    assert_eq!(e.shapes()[0].center(), DVec2::new(400.0, 300.0));
    assert_eq!(e.zoom(), 1.0);
}

#[test]
fn events_wait_for_the_next_tick() {
    let mut e = engine(TuningPreset::Cinematic);
    let q = key(&e, 'q');
    e.push_event(InputEvent::Press(q));
    e.push_event(InputEvent::AddShape);
    assert_eq!(e.pending_events(), 2);
    assert_eq!(e.shapes().len(), 1);
    assert!(!e.controls().get(q).unwrap().is_held());
    let out = e.tick(DT);
    assert_eq!(e.pending_events(), 0);
    assert_eq!(e.shapes().len(), 2);
    assert!(out.active);
}

#[test]
fn phases_stay_frozen_while_nothing_is_held() {
    let mut e = Engine::new(
        EngineConfig::from_preset(TuningPreset::Cinematic).with_phase_init(PhaseInit::Seeded(3)),
        800.0,
        600.0,
    )
    .unwrap();
    let before = *e.phases();
    let out = run(&mut e, 200);
    assert!(!out.active);
    assert_eq!(*e.phases(), before);
}

#[test]
fn phases_advance_once_per_active_tick() {
    let mut e = engine(TuningPreset::Cinematic);
    let q = key(&e, 'q');
    e.push_event(InputEvent::Press(q));
    run(&mut e, 10);
    let p = e.phases();
    assert!((p.m - 0.1).abs() < 1e-12);
    assert!((p.n1 - 0.0618).abs() < 1e-12);
    assert!((p.radius - 0.0146).abs() < 1e-12);
}

#[test]
fn repeated_presses_count_as_one() {
    let mut e = engine(TuningPreset::Cinematic);
    let q = key(&e, 'q');
    for _ in 0..5 {
        e.push_event(InputEvent::Press(q));
    }
    e.tick(DT);
    assert!((e.controls().weight(q).unwrap() - 0.05).abs() < 1e-12);
    assert_eq!(e.controls().active_count(), 1);
}

#[test]
fn active_frames_keep_every_parameter_above_its_floor() {
    let mut e = engine(TuningPreset::Cinematic);
    for _ in 0..4 {
        e.push_event(InputEvent::AddShape);
    }
    for c in ['q', 'w', 'e', 'r'] {
        let id = key(&e, c);
        e.push_event(InputEvent::Press(id));
    }
    for _ in 0..600 {
        e.tick(DT);
        for s in e.shapes() {
            let p = s.params();
            assert!(p.m >= constants::M_FLOOR);
            assert!(p.n1 >= constants::N_FLOOR);
            assert!(p.n2 >= constants::N_FLOOR);
            assert!(p.n3 >= constants::N_FLOOR);
            assert!(p.radius >= constants::RADIUS_FLOOR);
        }
    }
}

#[test]
fn release_converges_back_to_indexed_baselines() {
    let mut e = engine(TuningPreset::Cinematic);
    e.push_event(InputEvent::AddShape);
    e.push_event(InputEvent::AddShape);
    let q = key(&e, 'q');
    let w = key(&e, 'w');
    e.push_event(InputEvent::Press(q));
    e.push_event(InputEvent::Press(w));
    run(&mut e, 120);
    e.push_event(InputEvent::Release(q));
    e.push_event(InputEvent::Release(w));
    e.tick(DT);
    assert_eq!(e.reset_state(), ResetState::Converging);
    let frozen = *e.phases();

    let mut frames = 1;
    while e.reset_state() == ResetState::Converging {
        let before = e.shapes().to_vec();
        e.tick(DT);
        assert_eq!(*e.phases(), frozen);
        assert_ne!(e.shapes(), before.as_slice(), "shapes stalled mid-convergence");
        frames += 1;
        assert!(frames < 2000, "reset did not converge");
    }
    assert!(e.reset_controller().is_settled());
    for (i, s) in e.shapes().iter().enumerate() {
        let target = baseline(i, &ShapeParams::BASELINE);
        assert!(s.params().within(&target, constants::RESET_EPSILON));
    }
    assert!((e.shapes()[2].params().radius - 140.0).abs() < constants::RESET_EPSILON);
}

#[test]
fn settled_shapes_are_left_alone() {
    let mut e = engine(TuningPreset::Cinematic);
    run(&mut e, 3);
    assert!(e.reset_controller().is_settled());
    let before = e.shapes().to_vec();
    run(&mut e, 50);
    assert_eq!(e.shapes(), before.as_slice());
    assert_eq!(e.reset_state(), ResetState::Idle);
}

#[test]
fn pressing_mid_convergence_aborts_and_remodulates() {
    let mut e = engine(TuningPreset::Cinematic);
    let q = key(&e, 'q');
    e.push_event(InputEvent::Press(q));
    run(&mut e, 60);
    e.push_event(InputEvent::Release(q));
    run(&mut e, 30);
    assert_eq!(e.reset_state(), ResetState::Converging);
    let phases_before = *e.phases();

    e.push_event(InputEvent::Press(q));
    let out = e.tick(DT);
    assert!(out.active);
    assert_eq!(e.reset_state(), ResetState::Idle);
    assert!(e.reset_controller().snapshot().is_none());
    assert!(!e.reset_controller().is_settled());
    assert!(e.phases().m > phases_before.m);

    // The modulated value does not depend on where convergence had got to
    let params = e.config().modulation(e.radius_range());
    let expected = modulate(0, 1, e.phases(), e.controls(), &params).unwrap();
    assert_eq!(*e.shapes()[0].params(), expected);
}

#[test]
fn add_shape_while_converging_extends_the_snapshot() {
    let mut e = engine(TuningPreset::Cinematic);
    let r = key(&e, 'r');
    e.push_event(InputEvent::Press(r));
    run(&mut e, 40);
    e.push_event(InputEvent::Release(r));
    run(&mut e, 5);
    assert_eq!(e.reset_controller().snapshot().map(<[_]>::len), Some(1));
    e.push_event(InputEvent::AddShape);
    e.tick(DT);
    let snap = e.reset_controller().snapshot().unwrap();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[1], baseline(1, &ShapeParams::BASELINE));
}

#[test]
fn focus_lost_releases_everything() {
    let mut e = engine(TuningPreset::Cinematic);
    for c in ['q', 'e'] {
        let id = key(&e, c);
        e.push_event(InputEvent::Press(id));
    }
    assert!(run(&mut e, 10).active);
    e.push_event(InputEvent::FocusLost);
    let out = e.tick(DT);
    assert!(!out.active);
    assert_eq!(e.controls().active_count(), 0);
    assert_eq!(e.reset_state(), ResetState::Converging);
}

#[test]
fn zoom_is_clamped_and_stroke_width_compensates() {
    let mut e = engine(TuningPreset::Cinematic);
    e.push_event(InputEvent::Zoom(100.0));
    let out = e.tick(DT);
    assert_eq!(e.zoom(), constants::ZOOM_MAX);
    assert!((out.view.stroke_width() - 0.4).abs() < 1e-12);
    assert!(out.strokes.iter().all(|s| (s.stroke_width - 0.4).abs() < 1e-12));

    e.push_event(InputEvent::Zoom(-100.0));
    let out = e.tick(DT);
    assert_eq!(e.zoom(), constants::ZOOM_MIN);
    assert!((out.view.stroke_width() - 20.0).abs() < 1e-9);

    e.push_event(InputEvent::Zoom(f64::NAN));
    e.tick(DT);
    assert_eq!(e.zoom(), constants::ZOOM_MIN);
}

#[test]
fn view_transform_scales_about_the_center() {
    let view = ViewTransform {
        center: DVec2::new(400.0, 300.0),
        zoom: 2.0,
    };
    let m = view.affine();
    assert_eq!(m.transform_point2(DVec2::new(400.0, 300.0)), DVec2::new(400.0, 300.0));
    assert_eq!(m.transform_point2(DVec2::new(500.0, 300.0)), DVec2::new(600.0, 300.0));
}

#[test]
fn resize_recenters_every_shape() {
    let mut e = engine(TuningPreset::Cinematic);
    e.push_event(InputEvent::AddShape);
    e.push_event(InputEvent::Resize {
        width: 1000.0,
        height: 200.0,
    });
    let out = e.tick(DT);
    for s in e.shapes() {
        assert_eq!(s.center(), DVec2::new(500.0, 100.0));
    }
    assert_eq!(out.view.center, DVec2::new(500.0, 100.0));
}

#[test]
fn each_frame_sweeps_every_shape_through_one_full_turn() {
    let mut e = engine(TuningPreset::Cinematic);
    e.push_event(InputEvent::AddShape);
    let out = e.tick(DT);
    assert_eq!(out.strokes.len(), 2);
    let center = DVec2::new(400.0, 300.0);
    let start = e.phases().m;
    for (i, s) in out.strokes.iter().enumerate() {
        assert_eq!(s.index, i);
        assert_eq!(s.points.len(), constants::SWEEP_SEGMENTS + 1);
        let dir = (s.points[0] - center).normalize();
        assert!(dir.distance(DVec2::new(start.cos(), start.sin())) < 1e-9);

        // only a 2π-periodic outline lands back on its first point
        let m = e.shapes()[i].params().m;
        if m.fract() == 0.0 && (m as i64) % 2 == 0 {
            assert!(s.points[0].distance(s.points[constants::SWEEP_SEGMENTS]) < 1e-6);
        }
    }
    assert_eq!(e.shapes()[0].params().m, 2.0);
}

#[test]
fn cinematic_sweep_starts_at_the_m_phase() {
    let mut e = Engine::new(
        EngineConfig::from_preset(TuningPreset::Cinematic).with_phase_init(PhaseInit::Seeded(11)),
        800.0,
        600.0,
    )
    .unwrap();
    let out = e.tick(DT);
    let m = e.phases().m;
    let dir = (out.strokes[0].points[0] - DVec2::new(400.0, 300.0)).normalize();
    assert!(dir.distance(DVec2::new(m.cos(), m.sin())) < 1e-9);
}

#[test]
fn arpeggio_sweep_starts_at_angle_zero() {
    let mut e = Engine::new(
        EngineConfig::from_preset(TuningPreset::Arpeggio).with_phase_init(PhaseInit::Seeded(11)),
        800.0,
        600.0,
    )
    .unwrap();
    let out = e.tick(DT);
    let p0 = out.strokes[0].points[0];
    assert!((p0.y - 300.0).abs() < 1e-9);
    assert!(p0.x > 400.0);
}

#[test]
fn arpeggio_control_is_activity_without_color_or_geometry() {
    let mut e = engine(TuningPreset::Arpeggio);
    let p = key(&e, 'p');
    e.push_event(InputEvent::Press(p));
    let out = run(&mut e, 30);
    assert!(out.active);
    assert!(e.phases().m > 0.0);
    assert_eq!(out.strokes[0].color.to_hex(), "#2c2c54");
    for axis in Axis::ALL {
        assert_eq!(e.controls().key_modulation(axis), 0.0);
    }
    assert!(out.weights.iter().any(|&(id, w)| id == p && w > 0.0));
}

#[test]
fn cinematic_has_no_arpeggio_key() {
    let e = engine(TuningPreset::Cinematic);
    assert!(e.control_for_key('p').is_none());
    assert_eq!(e.controls().len(), 4);
}

#[test]
fn add_shape_updates_the_radius_range() {
    let mut e = engine(TuningPreset::Cinematic);
    assert!((e.radius_range() - 20.0).abs() < 1e-12);
    e.push_event(InputEvent::AddShape);
    e.push_event(InputEvent::AddShape);
    e.tick(DT);
    assert!((e.radius_range() - 28.0).abs() < 1e-12);
}

#[test]
fn housekeeping_releases_voices_only_when_idle() {
    let mut e = engine(TuningPreset::Cinematic);
    let hk = Duration::from_millis(constants::HOUSEKEEPING_CINEMATIC_MS);
    assert!(e.tick(hk).release_voices);
    assert!(!e.tick(Duration::from_millis(10)).release_voices);

    let q = key(&e, 'q');
    e.push_event(InputEvent::Press(q));
    assert!(!e.tick(hk).release_voices);
}

#[test]
fn housekeeping_repairs_non_finite_fields() {
    let mut registry = ShapeRegistry::new();
    registry.add(DVec2::ZERO).unwrap();
    registry.add(DVec2::ZERO).unwrap();
    let mut broken = *registry.get(1).unwrap().params();
    broken.n2 = f64::NAN;
    broken.radius = f64::INFINITY;
    registry.get_mut(1).unwrap().set_params(broken);

    let config = EngineConfig::from_preset(TuningPreset::Cinematic);
    let controls = ControlBank::new(&config.controls, config.transition_rate);
    let mut hk = Housekeeping::new(Duration::from_millis(100));
    assert!(hk
        .step(Duration::from_millis(50), &mut registry, &controls, &config.base)
        .is_none());
    let report = hk
        .step(Duration::from_millis(50), &mut registry, &controls, &config.base)
        .unwrap();
    assert_eq!(report.repaired_fields, 2);
    assert!(report.release_voices);
    let p = registry.get(1).unwrap().params();
    assert_eq!(p.n2, config.base.n2);
    assert_eq!(p.radius, config.base.radius);
}

#[test]
fn housekeeping_keeps_time_past_the_interval() {
    let mut registry = ShapeRegistry::new();
    registry.add(DVec2::ZERO).unwrap();
    let config = EngineConfig::from_preset(TuningPreset::Cinematic);
    let controls = ControlBank::new(&config.controls, config.transition_rate);
    let mut hk = Housekeeping::new(Duration::from_millis(100));
    let runs = (0..10)
        .filter(|_| {
            hk.step(Duration::from_millis(70), &mut registry, &controls, &config.base)
                .is_some()
        })
        .count();
    // 700 ms of frames at a 100 ms interval
    assert_eq!(runs, 7);
}

#[test]
fn a_malformed_shape_does_not_stop_the_modulation_pass() {
    let mut registry = ShapeRegistry::new();
    for _ in 0..3 {
        registry.add(DVec2::ZERO).unwrap();
    }
    let mut broken = *registry.get(1).unwrap().params();
    broken.m = f64::NAN;
    registry.get_mut(1).unwrap().set_params(broken);

    let config = EngineConfig::from_preset(TuningPreset::Cinematic);
    let controls = ControlBank::new(&config.controls, config.transition_rate);
    let phases = PhaseState::seeded(5);
    let skipped = modulate_all(&mut registry, &phases, &controls, &config.modulation(20.0));
    assert_eq!(skipped, 0);
    for s in registry.iter() {
        assert!(s.params().check_finite().is_ok());
    }
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = EngineConfig::from_preset(TuningPreset::Cinematic);
    config.controls[1].key = 'Q';
    assert_eq!(
        Engine::new(config, 800.0, 600.0).err(),
        Some(ConfigError::DuplicateKey('Q'))
    );
}

#[test]
fn non_finite_viewport_is_rejected() {
    let config = EngineConfig::from_preset(TuningPreset::Cinematic);
    assert!(matches!(
        Engine::new(config.clone(), f64::NAN, 600.0),
        Err(ConfigError::Viewport { .. })
    ));
    assert!(matches!(
        Engine::new(config, 800.0, f64::INFINITY),
        Err(ConfigError::Viewport { .. })
    ));
}
