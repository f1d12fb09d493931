// Unit tests for Animinder

use animinder::core::{
    decide, filter_candidates, interpolate, visual_signals, Deck, Decision, GestureConfig,
    GesturePhase, Motion, SwipeInterpreter,
};
use animinder::core::gesture::{Vector, EXIT_SPRING, RETURN_SPRING};
use animinder::models::{CreatePetRequest, LoadDeckRequest, Pet, PLACEHOLDER_PHOTO};
use std::collections::HashSet;
use validator::Validate;

fn create_pet(id: &str, owner: &str) -> Pet {
    Pet {
        id: id.to_string(),
        name: format!("Pet {}", id),
        species: "Dog".to_string(),
        age: 3,
        breed: "Beagle".to_string(),
        photo: PLACEHOLDER_PHOTO.to_string(),
        bio: String::new(),
        owner_id: owner.to_string(),
    }
}

fn create_request(age: &str) -> CreatePetRequest {
    CreatePetRequest {
        owner_id: "owner".to_string(),
        name: "Max".to_string(),
        species: "Dog".to_string(),
        age: age.to_string(),
        breed: "Golden Retriever".to_string(),
        photo: None,
        bio: String::new(),
    }
}

#[test]
fn test_decide_threshold_scales_with_viewport() {
    let narrow = GestureConfig::with_viewport_width(320.0);
    let wide = GestureConfig::with_viewport_width(800.0);

    // 80 is the narrow threshold, well short of the wide one
    assert_eq!(decide(&narrow, 80.0, 0.0), Decision::Accept);
    assert_eq!(decide(&wide, 80.0, 0.0), Decision::Cancel);
    assert_eq!(decide(&wide, 200.0, 0.0), Decision::Accept);
}

#[test]
fn test_decide_is_antisymmetric() {
    let config = GestureConfig::with_viewport_width(400.0);

    for (dx, vx) in [(120.0, 0.0), (60.0, 0.9), (30.0, 2.0), (51.0, 0.51), (99.0, 0.1)] {
        let right = decide(&config, dx, vx);
        let left = decide(&config, -dx, -vx);
        let mirrored = match right {
            Decision::Accept => Decision::Reject,
            Decision::Reject => Decision::Accept,
            Decision::Cancel => Decision::Cancel,
        };
        assert_eq!(left, mirrored, "dx={} vx={}", dx, vx);
    }
}

#[test]
fn test_flick_requires_offset_and_velocity() {
    let config = GestureConfig::with_viewport_width(400.0);

    assert_eq!(decide(&config, 60.0, 0.9), Decision::Accept);
    // Fast but too short
    assert_eq!(decide(&config, 40.0, 3.0), Decision::Cancel);
    // Far enough but too slow
    assert_eq!(decide(&config, 60.0, 0.2), Decision::Cancel);
    // Velocity against the offset does not flick
    assert_eq!(decide(&config, 60.0, -0.9), Decision::Cancel);
}

#[test]
fn test_decide_handles_non_finite_input() {
    let config = GestureConfig::with_viewport_width(400.0);

    assert_eq!(decide(&config, f64::NAN, 5.0), Decision::Cancel);
    assert_eq!(decide(&config, f64::INFINITY, 0.0), Decision::Accept);
    assert_eq!(decide(&config, f64::NEG_INFINITY, 0.0), Decision::Reject);
}

#[test]
fn test_rotation_is_bounded() {
    let config = GestureConfig::with_viewport_width(400.0);

    for dx in [-10_000.0, -200.0, -50.0, 0.0, 50.0, 200.0, 10_000.0] {
        let signals = visual_signals(&config, Vector::new(dx, 0.0), 1.0);
        assert!(signals.rotation_deg.abs() <= config.max_rotation_deg);
        assert!((0.0..=1.0).contains(&signals.like_opacity));
        assert!((0.0..=1.0).contains(&signals.pass_opacity));
    }

    let signals = visual_signals(&config, Vector::new(200.0, 0.0), 1.0);
    assert!((signals.rotation_deg - 12.0).abs() < 1e-9);
}

#[test]
fn test_indicators_only_show_on_their_side() {
    let config = GestureConfig::with_viewport_width(400.0);

    let right = visual_signals(&config, Vector::new(100.0, 0.0), 1.0);
    assert!((right.like_opacity - 0.8).abs() < 1e-9);
    assert_eq!(right.pass_opacity, 0.0);

    let left = visual_signals(&config, Vector::new(-100.0, 0.0), 1.0);
    assert!((left.pass_opacity - 0.8).abs() < 1e-9);
    assert_eq!(left.like_opacity, 0.0);
}

#[test]
fn test_vertical_offset_is_damped() {
    let config = GestureConfig::with_viewport_width(400.0);

    let signals = visual_signals(&config, Vector::new(0.0, 300.0), 1.0);
    assert!((signals.translate_y - 60.0).abs() < 1e-9);

    let signals = visual_signals(&config, Vector::new(0.0, -3000.0), 1.0);
    assert!((signals.translate_y + 60.0).abs() < 1e-9);
}

#[test]
fn test_interpolate_clamps_both_ends() {
    assert_eq!(interpolate(-5.0, &[0.0, 10.0], &[0.0, 1.0]), 0.0);
    assert_eq!(interpolate(50.0, &[0.0, 10.0], &[0.0, 1.0]), 1.0);
    assert!((interpolate(5.0, &[0.0, 10.0], &[0.0, 1.0]) - 0.5).abs() < 1e-9);
}

#[test]
fn test_interpreter_accept_release() {
    let mut interpreter = SwipeInterpreter::new(GestureConfig::with_viewport_width(400.0));

    interpreter.on_drag_update(40.0, 0.0);
    assert_eq!(interpreter.phase(), GesturePhase::Dragging);

    let release = interpreter.on_drag_release(150.0, 20.0, 0.3, 0.0);
    assert_eq!(release.decision, Decision::Accept);
    assert_eq!(interpreter.phase(), GesturePhase::AcceptExit);

    match release.motion {
        Some(Motion::Exit { target, spring, fade_to, .. }) => {
            assert_eq!(target.x, 500.0);
            assert_eq!(spring, EXIT_SPRING);
            assert_eq!(fade_to, 0.0);
        }
        other => panic!("Expected exit motion, got {:?}", other),
    }

    interpreter.complete_animation();
    assert_eq!(interpreter.phase(), GesturePhase::Idle);
    assert_eq!(interpreter.signals().card_opacity, 1.0);
}

#[test]
fn test_interpreter_cancel_springs_back() {
    let mut interpreter = SwipeInterpreter::new(GestureConfig::with_viewport_width(400.0));

    interpreter.on_drag_update(30.0, 0.0);
    let release = interpreter.on_drag_release(30.0, 0.0, 0.1, 0.0);

    assert_eq!(release.decision, Decision::Cancel);
    assert_eq!(interpreter.phase(), GesturePhase::Returning);
    match release.motion {
        Some(Motion::Return { target, spring, .. }) => {
            assert_eq!(target, Vector::ZERO);
            assert_eq!(spring, RETURN_SPRING);
        }
        other => panic!("Expected return motion, got {:?}", other),
    }
}

#[test]
fn test_interpreter_deadzone_keeps_taps_idle() {
    let mut interpreter = SwipeInterpreter::new(GestureConfig::with_viewport_width(400.0));

    interpreter.on_drag_update(3.0, -2.0);
    assert_eq!(interpreter.phase(), GesturePhase::Idle);

    let release = interpreter.on_drag_release(4.0, 0.0, 5.0, 0.0);
    assert_eq!(release.decision, Decision::Cancel);
}

#[test]
fn test_interpreter_ignores_input_while_exiting() {
    let mut interpreter = SwipeInterpreter::new(GestureConfig::with_viewport_width(400.0));

    interpreter.on_drag_update(20.0, 0.0);
    interpreter.on_drag_release(-150.0, 0.0, 0.0, 0.0);
    assert_eq!(interpreter.phase(), GesturePhase::RejectExit);

    let mut calls = 0;
    let release = interpreter.release_with(200.0, 0.0, 0.0, 0.0, |_| calls += 1);
    assert_eq!(release.decision, Decision::Cancel);
    assert!(release.motion.is_none());
    assert_eq!(calls, 0);
    assert_eq!(interpreter.phase(), GesturePhase::RejectExit);
}

#[test]
fn test_filter_candidates_drops_own_and_liked() {
    let liked: HashSet<String> = ["b".to_string()].into_iter().collect();
    let candidates = vec![
        create_pet("a", "other"),
        create_pet("b", "other"),
        create_pet("mine", "me"),
        create_pet("c", "other"),
    ];

    let deck = filter_candidates(candidates, "me", &liked);
    let ids: Vec<&str> = deck.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn test_deck_advances_through_every_card_once() {
    let mut deck = Deck::load(
        "me",
        vec![create_pet("a", "x"), create_pet("b", "y"), create_pet("c", "z")],
        &HashSet::new(),
    );

    let mut seen = Vec::new();
    while let Some(pet) = deck.advance() {
        seen.push(pet.id);
    }

    assert_eq!(seen, vec!["a", "b", "c"]);
    assert!(deck.is_exhausted());
    assert!(deck.visible().is_empty());
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn test_create_pet_request_validation() {
    assert!(create_request("3").validate().is_ok());
    assert!(create_request("0").validate().is_err());
    assert!(create_request("31").validate().is_err());
    assert!(create_request("three").validate().is_err());

    let mut blank_name = create_request("3");
    blank_name.name = "   ".to_string();
    assert!(blank_name.validate().is_err());
}

#[test]
fn test_create_pet_request_defaults_photo() {
    let pet = create_request(" 7 ").into_pet().unwrap();
    assert_eq!(pet.age, 7);
    assert_eq!(pet.photo, PLACEHOLDER_PHOTO);
    assert_eq!(pet.owner_id, "owner");
    assert!(!pet.id.is_empty());
}

#[test]
fn test_load_deck_request_validation() {
    let valid = LoadDeckRequest {
        user_id: "user".to_string(),
        viewport_width: 390.0,
    };
    assert!(valid.validate().is_ok());

    let zero_width = LoadDeckRequest {
        user_id: "user".to_string(),
        viewport_width: 0.0,
    };
    assert!(zero_width.validate().is_err());
}
