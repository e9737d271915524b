//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use reimage::models::{AspectRatio, TransformationForm, TransformationKind};
use reimage::value::Format;

/// Transformation config builder and deep merge toolkit.
#[derive(Parser, Debug)]
#[command(name = "reimage", version = reimage::constants::VERSION)]
pub struct Cli {
    /// Log debug output to stderr (REIMAGE_LOG takes precedence).
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    /// Directory containing `.reimage.toml` (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Deep-merge two structured files and print the result as JSON.
    Merge(MergeArgs),

    /// Validate form values and print the transformation plan.
    Transform(Box<TransformArgs>),

    /// List available transformation kinds.
    Kinds,

    /// Print the JSON schema of the transformation form.
    Schema,

    /// Print the shimmer placeholder as a data URL.
    Placeholder(PlaceholderArgs),

    /// Print the effective configuration.
    Config,

    /// Print version and build information.
    Version,
}

/// Arguments for the `merge` subcommand.
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Base file. Its values win wherever both files define a key.
    pub base: PathBuf,

    /// Override file. Supplies keys the base leaves out. `-` reads stdin.
    pub overlay: Option<PathBuf>,

    /// Input format (json, toml, yaml). Inferred from the extension by default.
    #[arg(long)]
    pub format: Option<Format>,

    /// Maximum nesting depth to merge (default: `[merge] max_depth`).
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Print compact JSON instead of pretty JSON.
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

impl MergeArgs {
    /// Both inputs are `-`; stdin can only be read once.
    pub fn reads_stdin_twice(&self) -> bool {
        super::is_stdin(&self.base) && self.overlay.as_deref().is_some_and(super::is_stdin)
    }
}

/// Arguments for the `transform` subcommand.
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Transformation kind (default: `[transform] default_kind`).
    #[arg(long, value_enum)]
    pub kind: Option<TransformationKind>,

    /// JSON, TOML or YAML file with form values. Flags override its fields.
    #[arg(long)]
    pub form: Option<PathBuf>,

    /// Image title.
    #[arg(long)]
    pub title: Option<String>,

    /// Public id of the uploaded source image.
    #[arg(long)]
    pub public_id: Option<String>,

    /// Aspect ratio for fill: 1:1, 3:4 or 9:16.
    #[arg(long)]
    pub aspect_ratio: Option<AspectRatio>,

    /// Object to remove or recolor.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Replacement color for recolor.
    #[arg(long)]
    pub color: Option<String>,

    /// Print compact JSON instead of pretty JSON.
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}

impl TransformArgs {
    /// Overwrite form fields with any values given on the command line.
    pub fn apply_to(&self, form: &mut TransformationForm) {
        if let Some(ref title) = self.title {
            form.title = title.clone();
        }
        if let Some(ref public_id) = self.public_id {
            form.public_id = public_id.clone();
        }
        if let Some(ratio) = self.aspect_ratio {
            form.aspect_ratio = Some(ratio.to_string());
        }
        if let Some(ref prompt) = self.prompt {
            form.prompt = Some(prompt.clone());
        }
        if let Some(ref color) = self.color {
            form.color = Some(color.clone());
        }
    }
}

/// Arguments for the `placeholder` subcommand.
#[derive(Parser, Debug)]
pub struct PlaceholderArgs {
    /// Placeholder width in pixels.
    #[arg(long, default_value_t = reimage::constants::DEFAULT_IMAGE_DIMENSION)]
    pub width: u32,

    /// Placeholder height in pixels.
    #[arg(long, default_value_t = reimage::constants::DEFAULT_IMAGE_DIMENSION)]
    pub height: u32,
}
