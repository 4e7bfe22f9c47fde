// ============================================================
// Layer 2 — Crawl Use Case
// ============================================================
// Scans one web page for images of the trained concept:
//
//   1. Load the predictor for `<models_dir>/<name>.json`
//   2. Fetch the page HTML
//   3. Pull every <img src> ending in .jpg/.jpeg/.png and
//      resolve it against the page URL
//   4. Predict each image in page order, one at a time
//   5. Positive → download to data/<name>/coincidences/ and
//      record a Trigger
//   6. Write data/<name>/triggers.json if anything matched
//
// Any failure (predictor load, fetch, write) aborts the whole
// crawl. Nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::traits::{ImageScorer, PageFetcher};
use crate::domain::trigger::Trigger;
use crate::infra::artifact_store::{write_atomic, ArtifactStore};
use crate::ml::predictor::{Predictor, DEFAULT_LATENCY};

/// Escaped in run directory names: everything except ASCII
/// alphanumerics and `- _ . ! ~ * ' ( )`
const RUN_DIR_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub url:              String,
    pub name:             String,
    pub models_dir:       String,
    pub data_dir:         String,
    pub predict_delay_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            url:              String::new(),
            name:             String::new(),
            models_dir:       "models".to_string(),
            data_dir:         "data".to_string(),
            predict_delay_ms: DEFAULT_LATENCY.as_millis() as u64,
        }
    }
}

impl CrawlConfig {
    pub fn artifact_path(&self) -> PathBuf {
        ArtifactStore::new(&self.models_dir).artifact_path(&self.name)
    }

    /// `<data_dir>/<percent-encoded name>`
    pub fn run_dir(&self) -> PathBuf {
        let encoded = utf8_percent_encode(&self.name, RUN_DIR_ESCAPES).to_string();
        Path::new(&self.data_dir).join(encoded)
    }

    pub fn coincidences_dir(&self) -> PathBuf {
        self.run_dir().join("coincidences")
    }

    pub fn triggers_path(&self) -> PathBuf {
        self.run_dir().join("triggers.json")
    }
}

#[derive(Debug)]
pub struct CrawlReport {
    /// Number of <img src> values on the page
    pub images_found:  usize,
    /// Images with a supported extension that were predicted
    pub candidates:    usize,
    pub triggers:      Vec<Trigger>,
    /// Set only when at least one trigger was written
    pub triggers_path: Option<PathBuf>,
}

pub struct CrawlUseCase<F> {
    config:  CrawlConfig,
    fetcher: F,
}

impl<F: PageFetcher> CrawlUseCase<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub async fn execute(&self) -> Result<CrawlReport> {
        if self.config.name.trim().is_empty() {
            anyhow::bail!("--name is required");
        }
        let artifact_path = self.config.artifact_path();
        let predictor = Predictor::load(&artifact_path)
            .await
            .with_context(|| format!("Cannot load model '{}'", self.config.name))?
            .with_latency(Duration::from_millis(self.config.predict_delay_ms));

        self.crawl_with(&predictor).await
    }

    /// Crawl using an already loaded predictor.
    pub async fn crawl_with<S: ImageScorer>(&self, predictor: &Predictor<S>) -> Result<CrawlReport> {
        let page_url = Url::parse(&self.config.url)
            .with_context(|| format!("Invalid crawl URL '{}'", self.config.url))?;

        tracing::info!("Crawling: {}", page_url);
        let html = self.fetcher.fetch_text(&page_url).await?;

        let sources = extract_img_sources(&html);
        tracing::info!("Found {} images", sources.len());

        let candidates: Vec<Url> = sources
            .iter()
            .filter(|src| is_image_source(src))
            .map(|src| page_url.join(src))
            .collect::<Result<_, _>>()
            .context("Cannot resolve image URL")?;

        let coincidences = self.config.coincidences_dir();
        tokio::fs::create_dir_all(&coincidences)
            .await
            .with_context(|| format!("Cannot create '{}'", coincidences.display()))?;

        let mut triggers = Vec::new();
        for image_url in &candidates {
            if !predictor.predict(image_url.as_str()).await.is_positive() {
                continue;
            }
            tracing::info!("Match found: {}", image_url);

            let bytes    = self.fetcher.fetch_bytes(image_url).await?;
            let local    = coincidences.join(file_name_for(image_url));
            tokio::fs::write(&local, &bytes)
                .await
                .with_context(|| format!("Cannot save '{}'", local.display()))?;

            triggers.push(Trigger::new(
                image_url.as_str(),
                page_url.as_str(),
                local.display().to_string(),
            ));
        }

        let triggers_path = if triggers.is_empty() {
            tracing::info!("No new matches found");
            None
        } else {
            let path = self.config.triggers_path();
            let json = serde_json::to_vec_pretty(&triggers)?;
            write_atomic(&path, &json)
                .with_context(|| format!("Cannot write '{}'", path.display()))?;
            tracing::info!("Saved {} matches to '{}'", triggers.len(), path.display());
            Some(path)
        };

        Ok(CrawlReport {
            images_found: sources.len(),
            candidates: candidates.len(),
            triggers,
            triggers_path,
        })
    }
}

/// Every `src` attribute value of an `<img>` tag, in document order.
///
/// Comments and `<script>` / `<style>` bodies are skipped, a `>`
/// inside a quoted attribute does not end the tag, and character
/// references in the value are decoded.
pub fn extract_img_sources(html: &str) -> Vec<String> {
    static NOT_MARKUP: OnceLock<Regex> = OnceLock::new();
    static IMG_SRC: OnceLock<Regex> = OnceLock::new();

    let not_markup = NOT_MARKUP.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
            .expect("static regex")
    });
    let img_src = IMG_SRC.get_or_init(|| {
        Regex::new(
            r#"(?is)<img\b(?:[^>"']|"[^"]*"|'[^']*')*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#,
        )
        .expect("static regex")
    });

    let markup = not_markup.replace_all(html, " ");
    img_src
        .captures_iter(&markup)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| decode_char_refs(m.as_str().trim()))
        .collect()
}

/// Decode numeric references and the common named ones. Anything
/// unrecognised is kept verbatim.
fn decode_char_refs(value: &str) -> String {
    static CHAR_REF: OnceLock<Regex> = OnceLock::new();
    let re = CHAR_REF.get_or_init(|| {
        Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([a-zA-Z]+));").expect("static regex")
    });

    re.replace_all(value, |c: &regex::Captures<'_>| {
        let decoded = if let Some(dec) = c.get(1) {
            dec.as_str().parse().ok().and_then(char::from_u32)
        } else if let Some(hex) = c.get(2) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else {
            match &c[3] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => None,
            }
        };
        decoded.map_or_else(|| c[0].to_string(), String::from)
    })
    .into_owned()
}

/// `src` ends in .jpg, .jpeg or .png (any case)
pub fn is_image_source(src: &str) -> bool {
    static IMAGE_EXT: OnceLock<Regex> = OnceLock::new();
    IMAGE_EXT
        .get_or_init(|| Regex::new(r"(?i)\.(jpe?g|png)$").expect("static regex"))
        .is_match(src)
}

/// Last path segment of the URL, or "image" when there is none
fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("image")
        .to_string()
}
