mod common;

use common::{persona, turn, EchoProvider};
use podcast_voice::{Pipeline, SynthesisTier, TurnSynthesizer, VoiceError, VoiceMap};
use std::sync::Arc;

fn plain_pipeline(provider: Arc<EchoProvider>) -> Pipeline {
    let synthesizer = TurnSynthesizer::new(provider, vec![SynthesisTier::NeuralPlain]).unwrap();
    Pipeline::new(synthesizer)
}

fn voices() -> VoiceMap {
    VoiceMap::from_personas(&[
        persona("host", "female", "energetic"),
        persona("guest", "male", "calm"),
    ])
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_completion_keeps_turn_order() {
    let provider = Arc::new(EchoProvider::with_delays(&[
        ("one ", 300),
        ("two ", 200),
        ("three", 10),
    ]));
    let pipeline = plain_pipeline(provider.clone());

    let turns = vec![
        turn("t1", "host", "one "),
        turn("t2", "guest", "two "),
        turn("t3", "host", "three"),
    ];

    let audio = pipeline
        .synthesize_conversation(&turns, &voices())
        .await
        .unwrap();

    assert_eq!(provider.completion_order(), vec!["three", "two ", "one "]);
    assert_eq!(&audio.data[..], b"one two three");
}

#[tokio::test]
async fn test_output_length_is_sum_of_segments() {
    let provider = Arc::new(EchoProvider::default());
    let pipeline = plain_pipeline(provider.clone());

    let texts = ["Welcome to the show.", "Thanks for having me!", "Let's begin."];
    let turns: Vec<_> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| turn(&format!("t{}", i), if i % 2 == 0 { "host" } else { "guest" }, text))
        .collect();

    let audio = pipeline
        .synthesize_conversation(&turns, &voices())
        .await
        .unwrap();

    let expected: usize = texts.iter().map(|t| t.len()).sum();
    assert_eq!(audio.len(), expected);
    assert_eq!(
        audio.segment_lengths,
        texts.iter().map(|t| t.len()).collect::<Vec<_>>()
    );
    assert_eq!(audio.content_type(), "audio/mpeg");
}

#[tokio::test]
async fn test_turns_are_dispatched_concurrently() {
    let provider = Arc::new(EchoProvider::with_delays(&[("a", 200), ("b", 200), ("c", 200)]));
    let pipeline = plain_pipeline(provider.clone());
    let turns = vec![
        turn("t1", "host", "a"),
        turn("t2", "guest", "b"),
        turn("t3", "host", "c"),
    ];

    let started = std::time::Instant::now();
    pipeline
        .synthesize_conversation(&turns, &voices())
        .await
        .unwrap();

    // Sequential dispatch would take at least 600ms.
    assert!(started.elapsed() < std::time::Duration::from_millis(550));
}

#[tokio::test]
async fn test_unknown_persona_fails_before_any_synthesis() {
    let provider = Arc::new(EchoProvider::default());
    let pipeline = plain_pipeline(provider.clone());
    let turns = vec![turn("t1", "host", "hello"), turn("t2", "ghost", "boo")];

    let result = pipeline.synthesize_conversation(&turns, &voices()).await;

    match result {
        Err(VoiceError::InvalidPersona(msg)) => assert!(msg.contains("ghost"), "got: {}", msg),
        other => panic!("expected InvalidPersona, got {:?}", other),
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_single_failed_turn_fails_whole_conversation() {
    let provider = Arc::new(EchoProvider::failing_on(&["boom"]));
    let pipeline = plain_pipeline(provider.clone());
    let turns = vec![
        turn("t1", "host", "fine"),
        turn("t2", "guest", "boom"),
        turn("t3", "host", "also fine"),
    ];

    let result = pipeline.synthesize_conversation(&turns, &voices()).await;

    match result {
        Err(VoiceError::SynthesisFailure { turn_id, .. }) => assert_eq!(turn_id, "t2"),
        other => panic!("expected SynthesisFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_conversation_is_rejected() {
    let provider = Arc::new(EchoProvider::default());
    let pipeline = plain_pipeline(provider.clone());

    let result = pipeline.synthesize_conversation(&[], &voices()).await;

    assert!(matches!(result, Err(VoiceError::InvalidRequest(_))));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_blank_turn_is_rejected_before_any_synthesis() {
    let provider = Arc::new(EchoProvider::default());
    let pipeline = plain_pipeline(provider.clone());
    let turns = vec![
        turn("t1", "host", "Hello there."),
        turn("t2", "guest", "Second line."),
        turn("t3", "host", "   "),
    ];

    let result = pipeline.synthesize_conversation(&turns, &voices()).await;

    match result {
        Err(VoiceError::InvalidRequest(msg)) => assert!(msg.contains("t3"), "got: {}", msg),
        other => panic!("expected InvalidRequest, got {:?}", other),
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_oversized_turn_is_rejected_before_any_synthesis() {
    let provider = Arc::new(EchoProvider::default());
    let pipeline = plain_pipeline(provider.clone());
    let long = "a".repeat(3_001);
    let turns = vec![turn("t1", "host", "fine"), turn("t2", "guest", &long)];

    let result = pipeline.synthesize_conversation(&turns, &voices()).await;

    assert!(matches!(result, Err(VoiceError::InvalidRequest(_))));
    assert_eq!(provider.calls(), 0);
}
