/*!
 * Tests for model to encoding mapping and token counting
 */

use anyhow::Result;
use svb2json::chunking::{count_tokens, Encoding, Model, TiktokenCounter, TokenCounter};

const SAMPLES: [&str; 4] = [
    "Hello, world!",
    "The quick brown fox jumps over the lazy dog",
    "{\n  \"id\": 1,\n  \"text\": \"Première ligne\"\n}",
    "日本語のテキストも数えられます。",
];

#[test]
fn test_count_tokens_withBasicText_shouldBePositive() -> Result<()> {
    for model in Model::all() {
        assert!(count_tokens("Hello, world!", model)? > 0, "{} counted nothing", model);
    }
    Ok(())
}

#[test]
fn test_count_tokens_withEmptyText_shouldBeZero() -> Result<()> {
    for model in Model::all() {
        assert_eq!(count_tokens("", model)?, 0);
    }
    Ok(())
}

#[test]
fn test_count_tokens_withSharedEncoding_shouldMatch() -> Result<()> {
    for text in SAMPLES {
        assert_eq!(count_tokens(text, Model::Gpt4)?, count_tokens(text, Model::Gpt35)?);
        assert_eq!(count_tokens(text, Model::Gpt4o)?, count_tokens(text, Model::Gpt5)?);
        assert_eq!(count_tokens(text, Model::Gpt3)?, count_tokens(text, Model::Codex)?);
    }
    Ok(())
}

#[test]
fn test_count_tokens_withKnownCl100kText_shouldMatchReference() -> Result<()> {
    let counter = TiktokenCounter::for_encoding(Encoding::Cl100kBase)?;
    assert_eq!(counter.count("hello world"), 2);
    assert_eq!(counter.count("Hello, world!"), 4);
    Ok(())
}

#[test]
fn test_count_tokens_withRepeatedCalls_shouldBeDeterministic() -> Result<()> {
    let counter = TiktokenCounter::for_model(Model::Gpt5)?;
    let text = SAMPLES.concat();
    assert_eq!(counter.count(&text), counter.count(&text));
    Ok(())
}

#[test]
fn test_counter_for_model_shouldUseMappedEncoding() -> Result<()> {
    for model in Model::all() {
        assert_eq!(TiktokenCounter::for_model(model)?.encoding(), model.encoding());
    }
    Ok(())
}

#[test]
fn test_model_from_str_withAnyCase_shouldParse() -> Result<()> {
    assert_eq!("gpt-4o".parse::<Model>()?, Model::Gpt4o);
    assert_eq!("GPT-3.5".parse::<Model>()?, Model::Gpt35);
    assert_eq!("codex".parse::<Model>()?, Model::Codex);
    assert_eq!("GPT5".parse::<Model>()?, Model::Gpt5);
    assert!("GPT-6".parse::<Model>().is_err());
    Ok(())
}

#[test]
fn test_model_names_shouldRoundTrip() -> Result<()> {
    for model in Model::all() {
        assert_eq!(model.to_string().parse::<Model>()?, model);
    }
    assert_eq!(Model::all().count(), 6);
    Ok(())
}

#[test]
fn test_model_serde_shouldUseDisplayNames() -> Result<()> {
    assert_eq!(serde_json::to_string(&Model::Gpt35)?, "\"GPT-3.5\"");
    assert_eq!(serde_json::from_str::<Model>("\"GPT-4O\"")?, Model::Gpt4o);
    Ok(())
}

#[test]
fn test_encoding_names_shouldMatchTiktoken() {
    assert_eq!(Encoding::Cl100kBase.name(), "cl100k_base");
    assert_eq!(Encoding::O200kBase.name(), "o200k_base");
    assert_eq!(Encoding::P50kBase.name(), "p50k_base");
}
