// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `crawl`, and all
// their configurable flags. Each Args struct converts into the
// matching application config; the application layer never
// sees clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::{crawl_use_case::CrawlConfig, train_use_case::TrainConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a concept / no-concept image corpus
    Train(TrainArgs),

    /// Crawl a page and keep the images a trained model flags
    Crawl(CrawlArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory of images that show the concept (label 1)
    #[arg(long, default_value = "data/concept")]
    pub concept_dir: String,

    /// Directory of images that do not show it (label 0)
    #[arg(long, default_value = "data/no-concept")]
    pub no_concept_dir: String,

    /// Model name; the artifact is written to <models-dir>/<name>.json
    #[arg(long, default_value = "simulated_model")]
    pub name: String,

    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Explicit artifact path, instead of <models-dir>/<name>.json
    #[arg(long)]
    pub model_path: Option<String>,

    /// Number of full passes through the training set
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Images per batch; a trailing partial batch is skipped
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Fraction of the corpus held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub val_split: f64,

    /// Model input as height,width,channels
    #[arg(long, value_delimiter = ',', default_values_t = [224, 224, 3], allow_negative_numbers = true)]
    pub input_shape: Vec<i64>,

    /// Simulated time spent per batch
    #[arg(long, default_value_t = 5)]
    pub batch_delay_ms: u64,

    /// After training, reload the model and predict this image
    #[arg(long)]
    pub predict_image: Option<String>,

    /// Seed for the metric evolution, for repeatable runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            concept_dir:    a.concept_dir,
            no_concept_dir: a.no_concept_dir,
            name:           a.name,
            models_dir:     a.models_dir,
            model_path:     a.model_path,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            val_split:      a.val_split,
            input_shape:    a.input_shape,
            batch_delay_ms: a.batch_delay_ms,
            predict_image:  a.predict_image,
            seed:           a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Page to scan for <img> tags
    #[arg(long)]
    pub url: String,

    /// Name of a model trained earlier
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Matches go under <data-dir>/<name>/
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Simulated time spent per prediction
    #[arg(long, default_value_t = 50)]
    pub predict_delay_ms: u64,
}

impl From<CrawlArgs> for CrawlConfig {
    fn from(a: CrawlArgs) -> Self {
        CrawlConfig {
            url:              a.url,
            name:             a.name,
            models_dir:       a.models_dir,
            data_dir:         a.data_dir,
            predict_delay_ms: a.predict_delay_ms,
        }
    }
}
