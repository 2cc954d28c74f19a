use super::fixture::Fixture;
use crate::display::impl_console::format_view;
use crate::identifier::core::{Msg, Notice, Phase};
use crate::identifier::render::view;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::interface::Prediction;
use crate::image_source::core::Upload;
use crate::image_source::loader::png_bytes;
use crate::lookup::impl_fake::LookupFake;

fn cat_and_dog() -> Vec<Prediction> {
    vec![Prediction::new("cat", 0.91), Prediction::new("dog", 0.05)]
}

fn cat_articles() -> LookupFake {
    LookupFake::with_results(
        Fixture::logger(),
        vec![
            LookupFake::result(
                "Cat",
                6678,
                "The <span class=\"searchmatch\">cat</span> is a small carnivore",
            ),
            LookupFake::result("Cat (Unix)", 43157, "Standard Unix utility"),
        ],
    )
}

#[test]
fn test_upload_identify_and_look_up() {
    let fixture = Fixture::predicting(cat_and_dog(), cat_articles());
    let state = fixture.start();

    fixture.send(Msg::UploadSelected(Some(Upload::new("cat.png", png_bytes(4, 4)))));
    fixture.send(Msg::IdentifyRequested);
    let state = fixture.run_until(state, |s| matches!(s.phase, Phase::Complete { .. }));

    let lines = format_view(&view(&state));
    assert!(lines.contains(&"Image: cat.png".to_string()));
    assert!(lines.contains(&"  cat — 91.00% (Best Guess)".to_string()));
    assert!(lines.contains(&"  dog — 5.00%".to_string()));
    assert!(lines.contains(&"    https://en.wikipedia.org/?curid=6678".to_string()));
    assert!(lines.contains(&"    https://en.wikipedia.org/?curid=43157".to_string()));
    assert!(lines.contains(&"    The cat is a small carnivore".to_string()));
    assert_eq!(fixture.lookup.searches(), vec!["cat"]);

    // the display saw the same final view
    assert_eq!(fixture.display.last(), Some(view(&state)));
}

#[test]
fn test_display_shows_progress() {
    let fixture = Fixture::predicting(cat_and_dog(), cat_articles());
    let state = fixture.start();

    fixture.send(Msg::UploadSelected(Some(Upload::new("cat.png", png_bytes(4, 4)))));
    fixture.send(Msg::IdentifyRequested);
    fixture.run_until(state, |s| matches!(s.phase, Phase::Complete { .. }));

    let views = fixture.display.views();
    assert!(views.first().is_some_and(|v| v.model_loading));
    assert!(views.iter().any(|v| v.identifying));
    assert!(views.iter().any(|v| v.looking_up));
}

#[test]
fn test_empty_label_skips_lookup() {
    let fixture = Fixture::predicting(vec![Prediction::new("", 0.6)], cat_articles());
    let state = fixture.start();

    fixture.send(Msg::UploadSelected(Some(Upload::new("blank.png", png_bytes(2, 2)))));
    fixture.send(Msg::IdentifyRequested);
    let state = fixture.run_until(state, |s| matches!(s.phase, Phase::Classified { .. }));

    assert_eq!(state.predictions().len(), 1);
    assert!(fixture.lookup.searches().is_empty());
}

#[test]
fn test_lookup_failure_keeps_predictions() {
    let fixture = Fixture::predicting(
        cat_and_dog(),
        LookupFake::failing(Fixture::logger(), 503, "Service Unavailable"),
    );
    let state = fixture.start();

    fixture.send(Msg::UploadSelected(Some(Upload::new("cat.png", png_bytes(4, 4)))));
    fixture.send(Msg::IdentifyRequested);
    let state = fixture.run_until(state, |s| matches!(s.phase, Phase::Complete { .. }));

    let view = view(&state);
    assert_eq!(view.predictions.len(), 2);
    assert!(view.lookup_results.is_empty());
    assert!(matches!(view.notice, Some(Notice::Warning(_))));
}

#[test]
fn test_undecodable_upload_surfaces_error() {
    let fixture = Fixture::predicting(cat_and_dog(), cat_articles());
    let state = fixture.start();

    fixture.send(Msg::UploadSelected(Some(Upload::new(
        "notes.txt",
        b"not an image".to_vec(),
    ))));
    fixture.send(Msg::IdentifyRequested);
    let state = fixture.run_until(state, |s| s.notice().is_some());

    assert!(matches!(state.notice(), Some(Notice::Error(_))));
    assert!(state.predictions().is_empty());
    assert!(fixture.lookup.searches().is_empty());
}

#[test]
fn test_classifier_failure_surfaces_error() {
    let fixture = Fixture::new(
        ImageClassifierFake::failing(Fixture::logger(), "out of memory"),
        cat_articles(),
    );
    let state = fixture.start();

    fixture.send(Msg::UploadSelected(Some(Upload::new("cat.png", png_bytes(4, 4)))));
    fixture.send(Msg::IdentifyRequested);
    let state = fixture.run_until(state, |s| s.notice().is_some());

    assert!(matches!(
        state.notice(),
        Some(Notice::Error(message)) if message.contains("out of memory")
    ));
}

#[test]
fn test_model_load_failure_is_shown() {
    let fixture = Fixture::new(
        ImageClassifierFake::new(Fixture::logger()).with_load_error("missing weights"),
        cat_articles(),
    );

    let state = fixture.start();

    let view = view(&state);
    assert!(!view.model_loading);
    assert!(view
        .model_error
        .as_deref()
        .is_some_and(|e| e.contains("missing weights")));
    assert!(format_view(&view)
        .iter()
        .any(|line| line.starts_with("Model failed to load:")));
}
