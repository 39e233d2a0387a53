use cat_sketch::animation::blink::{blink_shape, closed_handle_target};
use cat_sketch::animation::{BlinkController, BlinkPhase, BlinkStatus, BlinkTick};
use cat_sketch::config::BlinkConfig;
use cat_sketch::eye::{Corner, EyeModel};

#[test]
fn test_blink_round_trip_restores_shape() {
    let model = EyeModel::default();
    let rest = model.shape().clone();
    let mut blink = BlinkController::new(BlinkConfig::default());
    assert!(blink.trigger(&rest));

    let mut now = 0.0;
    let mut last_progress = 0.0;
    let mut last_phase = BlinkPhase::Closing;
    let mut completed = 0;
    for _ in 0..500 {
        match blink.advance(now) {
            BlinkTick::Completed => completed += 1,
            BlinkTick::Idle => break,
            BlinkTick::Running => {}
        }
        if let Some(session) = blink.session() {
            let p = session.progress();
            assert!((0.0..=1.0).contains(&p));
            if session.phase() == last_phase {
                match session.phase() {
                    BlinkPhase::Closing => assert!(p >= last_progress),
                    BlinkPhase::Holding => assert_eq!(p, 1.0),
                    BlinkPhase::Opening => assert!(p <= last_progress),
                }
            }
            last_phase = session.phase();
            last_progress = p;
        }
        now += 16.0;
    }

    assert_eq!(completed, 1);
    assert_eq!(blink.status(), BlinkStatus::Idle);
    assert_eq!(blink.effective_shape(&rest, 0.47), rest);
}

#[test]
fn test_fully_closed_lids_meet() {
    let shape = EyeModel::default().shape().clone();
    let closed = blink_shape(&shape, 1.0, 0.47);
    assert!((closed.upper_lid.cp1 - closed.lower_lid.cp1).length() < 1e-4);
    assert!((closed.upper_lid.cp2 - closed.lower_lid.cp2).length() < 1e-4);
    assert_eq!(closed.inner_corner, shape.inner_corner);
    assert_eq!(closed.outer_corner, shape.outer_corner);
    let target = closed_handle_target(&shape, Corner::Inner, 0.47);
    assert!((closed.upper_lid.cp1 - target).length() < 1e-3);
}

#[test]
fn test_hold_waits_for_duration() {
    let config = BlinkConfig {
        close_speed: 1.0,
        open_speed: 1.0,
        hold_ms: 100.0,
    };
    let shape = EyeModel::default().shape().clone();
    let mut blink = BlinkController::new(config);
    blink.trigger(&shape);
    blink.advance(0.0);
    assert_eq!(blink.session().map(|s| s.phase()), Some(BlinkPhase::Holding));
    blink.advance(50.0);
    assert_eq!(blink.session().map(|s| s.phase()), Some(BlinkPhase::Holding));
    blink.advance(100.0);
    assert_eq!(blink.session().map(|s| s.phase()), Some(BlinkPhase::Opening));
    assert_eq!(blink.advance(116.0), BlinkTick::Completed);
    assert_eq!(blink.advance(132.0), BlinkTick::Idle);
}

#[test]
fn test_blink_uses_snapshot_not_live_shape() {
    let mut model = EyeModel::default();
    let mut blink = BlinkController::new(BlinkConfig::default());
    blink.trigger(model.shape());
    let snapshot = blink.session().map(|s| s.start_shape().clone());
    model.drag_corner(Corner::Inner, egui::pos2(0.0, 500.0));
    assert_eq!(blink.session().map(|s| s.start_shape().clone()), snapshot);
}
