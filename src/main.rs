//! Snapcheck command-line entrypoint.
//!
//! ```text
//! snapcheck <image-file> <category> [description...]
//! snapcheck --preload
//! ```

use std::path::Path;

use anyhow::Context;
use mimalloc::MiMalloc;

use snapcheck::classifier::preprocess::{encode_data_url, mime_for_extension};
use snapcheck::config::VerifierConfig;
use snapcheck::labels::IssueCategory;
use snapcheck::verifier::ImageVerifier;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: snapcheck <image-file> <category> [description...]\n       snapcheck --preload";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = VerifierConfig::from_env()?;
    config.validate()?;

    tracing::info!(
        model_id = %config.model_id,
        model_path = ?config.model_path,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Snapcheck starting"
    );

    let verifier = ImageVerifier::from_config(&config);

    if args[0] == "--preload" {
        let ready = verifier.preload().await;
        let report = serde_json::json!({
            "ready": ready,
            "state": verifier.state().as_str(),
            "target": verifier.execution_target().map(|t| t.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !ready {
            std::process::exit(1);
        }
        return Ok(());
    }

    let [image_path, category, description @ ..] = args.as_slice() else {
        anyhow::bail!("{USAGE}");
    };

    let image = read_image_as_data_url(Path::new(image_path))?;
    let category_parsed: IssueCategory = category.parse().unwrap_or_else(|_| {
        tracing::warn!(category = %category, "Unrecognized category, using \"other\"");
        IssueCategory::Other
    });
    let description = description.join(" ");

    let result = verifier
        .verify_image(&image, &description, category_parsed)
        .await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn read_image_as_data_url(path: &Path) -> anyhow::Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mime = mime_for_extension(
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default(),
    );
    Ok(encode_data_url(mime, &bytes))
}
