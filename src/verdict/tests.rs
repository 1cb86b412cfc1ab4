use std::time::Duration;

use super::*;
use crate::completion::{CompletionError, MockCompletionService};
use crate::constants::UNPARSEABLE_REASONING;

#[test]
fn test_prompt_numbers_evidence_from_one() {
    let prompt = build_prompt(
        "The sky is blue",
        &["The sky appears blue due to Rayleigh scattering.", "Water is wet."],
    );

    assert!(prompt.contains("Claim: The sky is blue\n"));
    assert!(prompt.contains(
        "Evidence:\n1. The sky appears blue due to Rayleigh scattering.\n2. Water is wet.\n"
    ));
    assert!(prompt.contains("\"Likely True\""));
    assert!(prompt.contains("\"Likely False\""));
    assert!(prompt.contains("\"Unverifiable\""));
    assert!(prompt.contains("\"verdict\""));
    assert!(prompt.contains("\"reasoning\""));
}

#[test]
fn test_prompt_is_deterministic() {
    let evidence = vec!["a".to_string(), "b".to_string()];
    assert_eq!(
        build_prompt("claim", &evidence),
        build_prompt("claim", &evidence)
    );
}

#[test]
fn test_prompt_preserves_evidence_order() {
    let prompt = build_prompt("c", &["zeta", "alpha"]);
    let zeta = prompt.find("1. zeta").unwrap();
    let alpha = prompt.find("2. alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_parse_plain_object() {
    let parsed =
        parse_completion(r#"{"verdict":"Likely True","reasoning":"Evidence confirms claim."}"#);

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            verdict: Verdict::LikelyTrue,
            reasoning: "Evidence confirms claim.".to_string(),
        }
    );
}

#[test]
fn test_parse_object_wrapped_in_prose() {
    let text = "Sure! Here is my answer:\n```json\n{\n  \"verdict\": \"Likely False\",\n  \"reasoning\": \"Evidence says otherwise.\"\n}\n```\nHope that helps.";

    assert_eq!(
        parse_completion(text),
        ParsedCompletion::Parsed {
            verdict: Verdict::LikelyFalse,
            reasoning: "Evidence says otherwise.".to_string(),
        }
    );
}

#[test]
fn test_parse_truncated_json_is_unparseable() {
    assert_eq!(
        parse_completion(r#"{"verdict": "Likely True", "reasoning": "The evid"#),
        ParsedCompletion::Unparseable
    );
}

#[test]
fn test_parse_without_braces_is_unparseable() {
    assert_eq!(parse_completion("Likely True"), ParsedCompletion::Unparseable);
    assert_eq!(parse_completion(""), ParsedCompletion::Unparseable);
}

#[test]
fn test_parse_reversed_braces_is_unparseable() {
    assert_eq!(
        parse_completion("} nothing here {"),
        ParsedCompletion::Unparseable
    );
}

#[test]
fn test_parse_missing_key_is_unparseable() {
    assert_eq!(
        parse_completion(r#"{"verdict": "Likely True"}"#),
        ParsedCompletion::Unparseable
    );
    assert_eq!(
        parse_completion(r#"{"reasoning": "no verdict"}"#),
        ParsedCompletion::Unparseable
    );
}

#[test]
fn test_parse_two_objects_spans_both_and_fails() {
    // First '{' to last '}' covers both objects, which is not a single JSON value.
    let text = r#"{"verdict":"Likely True","reasoning":"a"} {"verdict":"Likely False","reasoning":"b"}"#;
    assert_eq!(parse_completion(text), ParsedCompletion::Unparseable);
}

#[test]
fn test_parse_unknown_verdict_label_is_unverifiable() {
    let parsed = parse_completion(r#"{"verdict":"Partially True","reasoning":"Mixed."}"#);
    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            verdict: Verdict::Unverifiable,
            reasoning: "Mixed.".to_string(),
        }
    );
}

#[test]
fn test_normalize_verdict_variants() {
    for label in ["Likely True", "likely true", "LIKELY_TRUE", "likely-true.", "True"] {
        assert_eq!(normalize_verdict(label), Verdict::LikelyTrue, "{label}");
    }
    for label in ["Likely False", "likely false", "Likely-False", "false"] {
        assert_eq!(normalize_verdict(label), Verdict::LikelyFalse, "{label}");
    }
    for label in ["Unverifiable", "unknown", "", "Likely True/Likely False/Unverifiable"] {
        assert_eq!(normalize_verdict(label), Verdict::Unverifiable, "{label}");
    }
}

#[test]
fn test_unparseable_degrades_to_fixed_reasoning() {
    let judgment = ParsedCompletion::Unparseable.into_judgment();
    assert_eq!(judgment.verdict, Verdict::Unverifiable);
    assert_eq!(judgment.reasoning, UNPARSEABLE_REASONING);
    assert_eq!(judgment.reasoning, "Could not parse LLM response");
}

#[test]
fn test_verdict_serializes_as_label() {
    assert_eq!(
        serde_json::to_string(&Verdict::LikelyTrue).unwrap(),
        "\"Likely True\""
    );
    assert_eq!(
        serde_json::to_string(&Verdict::LikelyFalse).unwrap(),
        "\"Likely False\""
    );
    assert_eq!(
        serde_json::to_string(&Verdict::Unverifiable).unwrap(),
        "\"Unverifiable\""
    );
    assert_eq!(Verdict::LikelyTrue.to_string(), "Likely True");
}

#[tokio::test]
async fn test_synthesize_parsed_response() {
    let service = MockCompletionService::responding(
        r#"{"verdict":"Likely True","reasoning":"Evidence confirms claim."}"#,
    );
    let synthesizer = VerdictSynthesizer::new(service.clone());

    let judgment = synthesizer
        .synthesize(
            "The sky is blue",
            &["The sky appears blue due to Rayleigh scattering."],
        )
        .await
        .unwrap();

    assert_eq!(judgment.verdict, Verdict::LikelyTrue);
    assert_eq!(judgment.reasoning, "Evidence confirms claim.");
    assert_eq!(service.call_count(), 1);
    let prompt = service.last_prompt().unwrap();
    assert!(prompt.contains("1. The sky appears blue due to Rayleigh scattering."));
}

#[tokio::test]
async fn test_synthesize_truncated_response_degrades() {
    let service = MockCompletionService::responding(r#"{"verdict": "Likely Tr"#);
    let synthesizer = VerdictSynthesizer::new(service);

    let judgment = synthesizer
        .synthesize("claim", &["fact"])
        .await
        .unwrap();

    assert_eq!(judgment.verdict, Verdict::Unverifiable);
    assert_eq!(judgment.reasoning, "Could not parse LLM response");
}

#[tokio::test]
async fn test_synthesize_network_failure_is_error() {
    let synthesizer = VerdictSynthesizer::new(MockCompletionService::failing("connection refused"));

    let err = synthesizer
        .synthesize("claim", &["fact"])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SynthesisError::Unavailable {
            source: CompletionError::RequestFailed { .. }
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_synthesize_hung_service_times_out() {
    let synthesizer = VerdictSynthesizer::new(MockCompletionService::hanging())
        .with_timeout(Duration::from_secs(30));

    let err = synthesizer
        .synthesize("claim", &["fact"])
        .await
        .unwrap_err();

    match err {
        SynthesisError::Unavailable {
            source: CompletionError::Timeout { after },
        } => assert_eq!(after, Duration::from_secs(30)),
        other => panic!("expected timeout, got {other:?}"),
    }
}
