mod common;

use common::{Recorder, controller, draw_line, labels, test_image};
use eframe_measure::interaction::CALIBRATION_PROMPT;
use eframe_measure::{
    CalibrationOutcome, DrawCommand, HelpLevel, InteractionState, MeasureEvent, Segment,
};
use egui::Pos2;

#[test]
fn test_click_starts_drawing() {
    let mut controller = controller();
    let mut out = Recorder::default();

    controller.primary_click(Pos2::new(10.0, 10.0), 1.0, &mut out);

    assert_eq!(controller.state(), InteractionState::Drawing);
    let session = controller.session();
    assert_eq!(session.in_progress(), Some(&Segment::anchored_at(Pos2::new(10.0, 10.0))));
    assert_eq!(session.anchor_timestamp(), Some(1.0));
    assert_eq!(out.repaints.len(), 1);
}

#[test]
fn test_pointer_move_tracks_free_end() {
    let mut controller = controller();
    let mut out = Recorder::default();

    controller.primary_click(Pos2::new(10.0, 10.0), 0.0, &mut out);
    controller.pointer_move(Pos2::new(40.0, 50.0), Pos2::new(40.0, 50.0), &mut out);

    let segment = controller.session().in_progress().copied().unwrap();
    assert_eq!(segment.p2, Pos2::new(40.0, 50.0));
    assert_eq!(out.repaints.len(), 2);
}

#[test]
fn test_pointer_move_while_idle_only_updates_loupe() {
    let mut controller = controller();
    let mut out = Recorder::default();
    controller.image_loaded(test_image(400, 300).into_ref(), &mut out);
    let repaints = out.repaints.len();

    controller.pointer_move(Pos2::new(200.0, 200.0), Pos2::new(200.0, 200.0), &mut out);

    assert_eq!(out.repaints.len(), repaints);
    assert_eq!(out.loupe_views.len(), 1);
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn test_long_line_finished_immediately_is_committed() {
    let mut controller = controller();
    let mut out = Recorder::default();

    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(60.0, 0.0), 0.0, 0.0);

    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(controller.session().committed().len(), 1);
    assert!((controller.session().committed()[0].length() - 60.0).abs() < 1e-4);
}

#[test]
fn test_short_quick_line_is_discarded() {
    let mut controller = controller();
    let mut out = Recorder::default();

    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), 5.0, 0.1);

    assert_eq!(controller.state(), InteractionState::Idle);
    assert!(controller.session().committed().is_empty());
    assert!(controller.session().in_progress().is_none());
}

#[test]
fn test_short_slow_line_is_committed() {
    let mut controller = controller();
    let mut out = Recorder::default();

    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), 5.0, 0.6);

    assert_eq!(controller.session().committed().len(), 1);
}

#[test]
fn test_escape_discards_in_progress() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(80.0, 0.0), 0.0, 1.0);

    controller.primary_click(Pos2::new(5.0, 5.0), 2.0, &mut out);
    controller.pointer_move(Pos2::new(90.0, 90.0), Pos2::new(90.0, 90.0), &mut out);
    controller.escape(&mut out);

    assert_eq!(controller.state(), InteractionState::Idle);
    assert!(controller.session().in_progress().is_none());
    assert!(controller.session().anchor_timestamp().is_none());
    assert_eq!(controller.session().committed().len(), 1);
}

#[test]
fn test_escape_while_idle_is_a_no_op() {
    let mut controller = controller();
    let mut out = Recorder::default();

    controller.escape(&mut out);

    assert!(out.repaints.is_empty());
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn test_nearest_segment_is_calibrated() {
    let mut controller = controller();
    let mut out = Recorder::default();
    // Centers at (50, 0) and (50, 90)
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 90.0), Pos2::new(100.0, 90.0), 2.0, 1.0);

    let mut asked = Vec::new();
    let mut prompt = |text: &str, default: &str| {
        asked.push((text.to_owned(), default.to_owned()));
        Some("200".to_owned())
    };
    // 10px from the first center, 80px from the second
    let outcome = controller.double_click(Pos2::new(50.0, 10.0), &mut prompt, &mut out);

    assert_eq!(asked, vec![(CALIBRATION_PROMPT.to_owned(), "100.0".to_owned())]);
    assert_eq!(outcome, CalibrationOutcome::Applied { scale_factor: 2.0 });
}

#[test]
fn test_nearest_segment_outside_radius_is_ignored() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 90.0), Pos2::new(100.0, 90.0), 0.0, 1.0);

    let mut called = false;
    let mut prompt = |_: &str, _: &str| {
        called = true;
        Some("1".to_owned())
    };
    let outcome = controller.double_click(Pos2::new(50.0, 10.0), &mut prompt, &mut out);

    assert!(!called);
    assert_eq!(outcome, CalibrationOutcome::Unchanged);
    assert_eq!(controller.session().scale_factor(), 1.0);
}

#[test]
fn test_double_click_without_segments_is_a_no_op() {
    let mut controller = controller();
    let mut out = Recorder::default();

    let mut prompt = |_: &str, _: &str| -> Option<String> { panic!("no prompt expected") };
    let outcome = controller.double_click(Pos2::new(1.0, 1.0), &mut prompt, &mut out);

    assert_eq!(outcome, CalibrationOutcome::Unchanged);
    assert!(out.repaints.is_empty());
}

#[test]
fn test_calibration_rescales_every_label() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 200.0), Pos2::new(0.0, 280.0), 2.0, 1.0);
    assert_eq!(labels(out.last_repaint()), vec!["100.0", "80.00"]);

    let mut prompt = |_: &str, _: &str| Some("50".to_owned());
    controller.double_click(Pos2::new(50.0, 0.0), &mut prompt, &mut out);

    assert_eq!(controller.session().scale_factor(), 0.5);
    assert_eq!(labels(out.last_repaint()), vec!["50.00", "40.00"]);
}

#[test]
fn test_invalid_calibration_answers_keep_scale() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);

    for answer in [None, Some("100.0"), Some("abc"), Some("0"), Some("-5"), Some("")] {
        let mut prompt = |_: &str, _: &str| answer.map(str::to_owned);
        let outcome = controller.double_click(Pos2::new(50.0, 0.0), &mut prompt, &mut out);
        assert_eq!(outcome, CalibrationOutcome::Unchanged, "answer {answer:?}");
        assert_eq!(controller.session().scale_factor(), 1.0);
    }
}

#[test]
fn test_calibration_accepts_units_after_number() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);

    let mut prompt = |_: &str, _: &str| Some("25 mm".to_owned());
    controller.double_click(Pos2::new(50.0, 0.0), &mut prompt, &mut out);

    assert_eq!(controller.session().scale_factor(), 0.25);
}

#[test]
fn test_two_phase_calibration_highlights_selection() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);

    let request = controller
        .begin_calibration(Pos2::new(50.0, 5.0), &mut out)
        .unwrap();
    assert_eq!(request.segment_index, 0);
    assert_eq!(controller.pending_calibration(), Some(&request));

    let highlight = eframe_measure::render::RenderStyle::default().highlight_halo;
    let highlighted = out.last_repaint().iter().any(|cmd| {
        matches!(cmd, DrawCommand::Lines { style, .. } if style.color == highlight)
    });
    assert!(highlighted);

    // A second double click while the prompt is open is ignored
    assert!(controller.begin_calibration(Pos2::new(50.0, 5.0), &mut out).is_none());

    let outcome = controller.finish_calibration(Some("10"), &mut out);
    assert_eq!(outcome, CalibrationOutcome::Applied { scale_factor: 0.1 });
    assert!(controller.pending_calibration().is_none());
    let still_highlighted = out.last_repaint().iter().any(|cmd| {
        matches!(cmd, DrawCommand::Lines { style, .. } if style.color == highlight)
    });
    assert!(!still_highlighted);
}

#[test]
fn test_double_click_while_drawing_is_ignored() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);
    controller.primary_click(Pos2::new(50.0, 0.0), 5.0, &mut out);

    assert!(controller.begin_calibration(Pos2::new(50.0, 0.0), &mut out).is_none());
    assert_eq!(controller.state(), InteractionState::Drawing);
}

#[test]
fn test_double_click_gesture_sequence() {
    // click, click, double click at (almost) the same spot on top of a line
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);

    let mut prompt = |_: &str, _: &str| Some("1".to_owned());
    let spot = Pos2::new(50.0, 1.0);
    controller.handle(MeasureEvent::PrimaryClick { pos: spot }, 10.0, &mut prompt, &mut out);
    controller.handle(
        MeasureEvent::PrimaryClick { pos: Pos2::new(51.0, 1.0) },
        10.2,
        &mut prompt,
        &mut out,
    );
    controller.handle(MeasureEvent::DoubleClick { pos: spot }, 10.2, &mut prompt, &mut out);

    assert_eq!(controller.session().committed().len(), 1);
    assert!((controller.session().scale_factor() - 0.01).abs() < 1e-9);
}

#[test]
fn test_image_load_resets_session() {
    let mut controller = controller();
    let mut out = Recorder::default();
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);
    controller.primary_click(Pos2::new(5.0, 5.0), 2.0, &mut out);

    controller.image_loaded(test_image(320, 240).into_ref(), &mut out);

    let session = controller.session();
    assert!(session.committed().is_empty());
    assert!(session.in_progress().is_none());
    assert_eq!(session.scale_factor(), 1.0);
    assert_eq!(session.canvas_size(), egui::vec2(320.0, 240.0));
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn test_help_levels_follow_milestones() {
    let mut controller = controller();
    let mut out = Recorder::default();

    controller.start(&mut out);
    controller.image_loaded(test_image(200, 200).into_ref(), &mut out);
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 0.0, 1.0);
    // A second line reaches no new milestone
    draw_line(&mut controller, &mut out, Pos2::new(0.0, 50.0), Pos2::new(100.0, 50.0), 2.0, 1.0);
    let mut prompt = |_: &str, _: &str| -> Option<String> { None };
    controller.double_click(Pos2::new(50.0, 0.0), &mut prompt, &mut out);
    // Loading another image does not go back
    controller.image_loaded(test_image(200, 200).into_ref(), &mut out);

    assert_eq!(
        out.help_levels,
        vec![
            HelpLevel::FileLoading,
            HelpLevel::StartLine,
            HelpLevel::FinishLine,
            HelpLevel::SetLength,
            HelpLevel::Expert,
        ]
    );
}

#[test]
fn test_loupe_needs_image() {
    let mut controller = controller();
    let mut out = Recorder::default();

    controller.pointer_move(Pos2::new(10.0, 10.0), Pos2::new(10.0, 10.0), &mut out);
    assert!(out.loupe_views.is_empty());

    controller.image_loaded(test_image(500, 500).into_ref(), &mut out);
    controller.pointer_move(Pos2::new(300.0, 320.0), Pos2::new(300.0, 320.0), &mut out);
    let view = out.loupe_views.last().unwrap();
    assert_eq!(view.crop_region.center(), Pos2::new(300.0, 320.0));
    assert!((view.crop_region.width() - 30.0).abs() < 1e-4);
}
