use std::io;
use std::path::Path;

use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Loads `tokenizer.json` from a model directory, configured for batched prompt encoding.
pub fn load_prompt_tokenizer(
    model_dir: &Path,
    max_len: usize,
    pad_token: &str,
) -> io::Result<Tokenizer> {
    let path = model_dir.join(TOKENIZER_FILE);
    let mut tokenizer = Tokenizer::from_file(&path)
        .map_err(|e| io::Error::other(format!("{}: {}", path.display(), e)))?;
    configure_prompt_tokenizer(&mut tokenizer, max_len, pad_token)?;
    Ok(tokenizer)
}

/// Truncates prompts to `max_len` tokens and right-pads a batch to its longest prompt
/// with `pad_token`.
pub fn configure_prompt_tokenizer(
    tokenizer: &mut Tokenizer,
    max_len: usize,
    pad_token: &str,
) -> io::Result<()> {
    let pad_id = tokenizer.token_to_id(pad_token).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Tokenizer has no {pad_token} token"),
        )
    })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        pad_id,
        pad_token: pad_token.to_string(),
        ..Default::default()
    }));

    Ok(())
}

/// Fills the `{}` placeholder of a prompt template with a label.
pub fn render_prompt(template: &str, label: &str) -> String {
    template.replacen("{}", label, 1)
}

/// Token ids for one rendered prompt per label, padded to equal length.
pub fn prompt_token_ids(
    tokenizer: &Tokenizer,
    template: &str,
    labels: &[String],
) -> tokenizers::Result<Vec<Vec<u32>>> {
    let prompts: Vec<String> = labels
        .iter()
        .map(|label| render_prompt(template, label))
        .collect();

    Ok(tokenizer
        .encode_batch(prompts, true)?
        .iter()
        .map(|encoding| encoding.get_ids().to_vec())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORD_LEVEL: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {
                "<pad>": 0, "[UNK]": 1, "a": 2, "photo": 3, "of": 4,
                "pothole": 5, "broken": 6, "street": 7, "light": 8
            },
            "unk_token": "[UNK]"
        }
    }"#;

    fn model_dir() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOKENIZER_FILE), WORD_LEVEL).unwrap();
        dir
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_prompt() {
        assert_eq!(render_prompt("a photo of {}", "pothole"), "a photo of pothole");
        assert_eq!(render_prompt("{}", "graffiti"), "graffiti");
    }

    #[test]
    fn test_load_missing_tokenizer() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_prompt_tokenizer(dir.path(), 77, "<pad>").unwrap_err();
        assert!(err.to_string().contains(TOKENIZER_FILE));
    }

    #[test]
    fn test_unknown_pad_token_rejected() {
        let dir = model_dir();
        let err = load_prompt_tokenizer(dir.path(), 77, "<|endoftext|>").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_batch_padded_to_longest_prompt() {
        let dir = model_dir();
        let tokenizer = load_prompt_tokenizer(dir.path(), 77, "<pad>").unwrap();

        let ids = prompt_token_ids(
            &tokenizer,
            "a photo of {}",
            &labels(&["pothole", "broken street light"]),
        )
        .unwrap();

        assert_eq!(ids, vec![vec![2, 3, 4, 5, 0, 0], vec![2, 3, 4, 6, 7, 8]]);
    }

    #[test]
    fn test_long_prompts_truncated() {
        let dir = model_dir();
        let tokenizer = load_prompt_tokenizer(dir.path(), 4, "<pad>").unwrap();

        let ids = prompt_token_ids(
            &tokenizer,
            "a photo of {}",
            &labels(&["broken street light"]),
        )
        .unwrap();

        assert_eq!(ids, vec![vec![2, 3, 4, 6]]);
    }
}
