//! Debounce behavior driven through the update loop

mod common;

use std::time::Duration;

use common::{run_texts, scheduled_generation, step, test_model};
use markpad::commands::Cmd;
use markpad::highlight::{DebouncePolicy, HighlightPhase, TimerState};
use markpad::messages::{EditMsg, Msg};

#[test]
fn test_rapid_edits_coalesce_into_one_pass() {
    let mut model = test_model("");

    let mut generations = Vec::new();
    for (offset, ch) in ["#", " ", "T"].iter().enumerate() {
        let cmds = step(&mut model, Msg::insert(offset, *ch));
        assert!(cmds.contains(&Cmd::Redraw));
        generations.push(scheduled_generation(&cmds).unwrap());
    }
    assert!(generations.windows(2).all(|g| g[0] < g[1]));

    // Earlier timers report back first and are dropped
    for generation in &generations[..2] {
        assert!(step(&mut model, Msg::debounce_elapsed(*generation)).is_empty());
    }
    assert_eq!(model.highlighter.passes_run(), 0);
    assert!(model.document.buffer.runs().is_empty());

    let cmds = step(&mut model, Msg::debounce_elapsed(generations[2]));
    assert_eq!(cmds, vec![Cmd::Redraw]);
    assert_eq!(model.highlighter.passes_run(), 1);
    assert_eq!(run_texts(&model.document.buffer), vec!["# T"]);
    assert_eq!(model.highlighter.phase(), HighlightPhase::Idle);
}

#[test]
fn test_timer_firing_twice_runs_once() {
    let mut model = test_model("");
    let cmds = step(&mut model, Msg::insert(0, "# a"));
    let generation = scheduled_generation(&cmds).unwrap();

    step(&mut model, Msg::debounce_elapsed(generation));
    assert!(step(&mut model, Msg::debounce_elapsed(generation)).is_empty());
    assert_eq!(model.highlighter.passes_run(), 1);
}

#[test]
fn test_delay_grows_with_document_size() {
    let policy = DebouncePolicy::default();
    let delays: Vec<_> = [500, 3_000, 7_000, 20_000]
        .into_iter()
        .map(|chars| policy.delay_for(chars).as_millis())
        .collect();
    assert_eq!(delays, vec![400, 800, 1_500, 2_000]);
    assert!(delays.windows(2).all(|d| d[0] <= d[1]));
}

#[test]
fn test_scheduled_delay_matches_tier() {
    for (chars, delay_ms) in [(500, 400), (3_000, 800), (7_000, 1_500), (20_000, 2_000)] {
        let mut model = test_model(&"a".repeat(chars - 1));
        let cmds = step(&mut model, Msg::insert(0, "b"));
        let schedule = cmds
            .iter()
            .find_map(Cmd::highlight_delay)
            .expect("edit should schedule a pass");
        assert_eq!(schedule, Duration::from_millis(delay_ms), "{} chars", chars);
    }
}

#[test]
fn test_unchanged_text_does_not_reschedule() {
    let mut model = test_model("# Title");
    step(
        &mut model,
        Msg::Highlight(markpad::messages::HighlightMsg::ForceHighlight),
    );
    assert_eq!(model.highlighter.passes_run(), 1);

    // Cursor movement doesn't touch the text
    let cmds = step(&mut model, Msg::Edit(EditMsg::SetCursor(3)));
    assert_eq!(cmds, vec![Cmd::Redraw]);

    // Reloading identical content keeps the styling and schedules nothing
    let runs = model.document.buffer.runs().to_vec();
    let cmds = step(&mut model, Msg::Edit(EditMsg::ReplaceAll("# Title".into())));
    assert!(cmds.is_empty());
    assert_eq!(model.document.buffer.runs(), runs.as_slice());
    assert_eq!(model.highlighter.scheduler().state(), TimerState::Idle);
}

#[test]
fn test_edit_and_undo_does_not_rearm() {
    let mut model = test_model("# Title");
    step(
        &mut model,
        Msg::Highlight(markpad::messages::HighlightMsg::ForceHighlight),
    );

    let cmds = step(&mut model, Msg::insert(7, "x"));
    let generation = scheduled_generation(&cmds).unwrap();

    // Back to the highlighted text: the armed timer is left alone
    let cmds = step(&mut model, Msg::delete(7..8));
    assert_eq!(cmds, vec![Cmd::Redraw]);
    assert!(model.highlighter.scheduler().is_armed());

    step(&mut model, Msg::debounce_elapsed(generation));
    assert_eq!(run_texts(&model.document.buffer), vec!["# Title"]);
}

#[test]
fn test_edits_while_disabled_schedule_nothing() {
    let mut model = test_model("# a");
    step(
        &mut model,
        Msg::Highlight(markpad::messages::HighlightMsg::ToggleHighlighting),
    );
    assert!(!model.highlighter.is_enabled());

    let cmds = step(&mut model, Msg::insert(3, "b"));
    assert_eq!(scheduled_generation(&cmds), None);
}

#[test]
fn test_custom_policy_from_config() {
    let mut config = markpad::EditorConfig::default();
    config.highlight.debounce.tiers.truncate(1);
    config.highlight.debounce.fallback_ms = 50;
    let mut model = common::test_model_with_config(&"x".repeat(2_000), config);

    let cmds = step(&mut model, Msg::insert(0, "y"));
    assert_eq!(
        cmds.iter().find_map(Cmd::highlight_delay),
        Some(Duration::from_millis(50))
    );
}
