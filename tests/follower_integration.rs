use portfolio_motion::cursor::{
    CursorFrame, ElementInfo, FollowerConfig, HoverConfig, PointerFollower, PointerSample,
};
use proptest::prelude::*;

fn frames_until_settled(follower: &mut PointerFollower, epsilon: f64) -> u32 {
    let mut frames = 0;
    while follower.remaining_distance() > epsilon {
        follower.on_frame_tick();
        frames += 1;
        assert!(frames < 1000, "follower never settled");
    }
    frames
}

#[test]
fn test_pointer_session() {
    let mut follower = PointerFollower::default();

    follower.on_pointer_move(PointerSample::new(640.0, 360.0, 0));
    for _ in 0..30 {
        follower.on_frame_tick();
    }
    let frame = CursorFrame::capture(&follower);
    assert!(frame.visible);
    assert!((frame.position.x - 640.0).abs() < 0.01);
    assert_eq!(frame.class_list(), "custom-cursor");

    // Hover a nested element inside a link
    follower.on_pointer_over(&[
        ElementInfo::new("span"),
        ElementInfo::new("a"),
        ElementInfo::new("nav"),
    ]);
    assert!(follower.state().hovering);

    // Moving from the link text to the link itself keeps hover
    follower.on_pointer_out(Some(&[ElementInfo::new("a")]));
    assert!(follower.state().hovering);

    follower.on_pointer_out(Some(&[ElementInfo::new("section")]));
    assert!(!follower.state().hovering);

    // Idle one window after the last move, not a millisecond earlier
    follower.on_pointer_move(PointerSample::new(650.0, 360.0, 5000));
    assert!(!follower.poll_idle(5999));
    assert!(follower.poll_idle(6000));
    assert_eq!(CursorFrame::capture(&follower).class_list(), "custom-cursor idle");

    // The next move clears it again
    follower.on_pointer_move(PointerSample::new(660.0, 360.0, 6100));
    assert!(!follower.state().idle);
}

#[test]
fn test_custom_hover_markers() {
    let hover = HoverConfig {
        interactive_tags: vec!["summary".to_string()],
        interactive_classes: vec!["card".to_string()],
    };
    let mut follower = PointerFollower::with_hover(FollowerConfig::default(), &hover);

    follower.on_pointer_over(&[ElementInfo::new("button")]);
    assert!(!follower.state().hovering);

    follower.on_pointer_over(&[ElementInfo::new("div").with_class("card")]);
    assert!(follower.state().hovering);
}

#[test]
fn test_boost_shortens_large_jumps() {
    let mut large = PointerFollower::default();
    large.on_pointer_move(PointerSample::new(100.0, 0.0, 0));
    let mut small = PointerFollower::default();
    small.on_pointer_move(PointerSample::new(8.0, 0.0, 0));

    // A jump twelve times larger settles within a few extra frames
    let large_frames = frames_until_settled(&mut large, 0.5);
    let small_frames = frames_until_settled(&mut small, 0.5);
    assert!(large_frames <= small_frames + 4);
}

proptest! {
    #[test]
    fn prop_distance_never_grows(
        tx in -5000.0f64..5000.0,
        ty in -5000.0f64..5000.0,
    ) {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(tx, ty, 0));

        let mut previous = follower.remaining_distance();
        for _ in 0..100 {
            let before = follower.position();
            let after = follower.on_frame_tick();

            // Each axis approaches without crossing the target
            prop_assert!((after.x - tx).abs() <= (before.x - tx).abs() + 1e-9);
            if (before.x - tx).abs() > 1e-6 {
                prop_assert!((after.x - tx) * (before.x - tx) >= 0.0);
            }
            if (before.y - ty).abs() > 1e-6 {
                prop_assert!((after.y - ty) * (before.y - ty) >= 0.0);
            }

            let distance = follower.remaining_distance();
            prop_assert!(distance <= previous + 1e-9);
            previous = distance;
        }
        prop_assert!(previous < 0.01);
    }

    #[test]
    fn prop_only_latest_sample_counts(
        samples in prop::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0), 1..20),
    ) {
        let mut follower = PointerFollower::default();
        for (i, (x, y)) in samples.iter().enumerate() {
            follower.on_pointer_move(PointerSample::new(*x, *y, i as u64));
        }
        let (lx, ly) = *samples.last().unwrap();
        prop_assert_eq!(follower.target(), Some((lx, ly)));

        for _ in 0..100 {
            follower.on_frame_tick();
        }
        prop_assert!(follower.position().distance_to(lx, ly) < 0.01);
    }
}
