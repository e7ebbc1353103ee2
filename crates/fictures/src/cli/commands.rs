//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fictures::GenerationParameters;
use std::path::PathBuf;

/// Fictures - generate complete novels with the Fictures AI server
#[derive(Parser, Debug)]
#[command(name = "fictures")]
#[command(about = "Generate complete novels with the Fictures AI server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./fictures.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a novel from a premise
    Generate(GenerateArgs),

    /// Check that the AI server is reachable and ready
    Health {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List the text models the AI server offers
    Models {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Arguments of `fictures generate`.
///
/// Flags override values read from `--params`.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Premise of the novel
    #[arg(long)]
    pub prompt: Option<String>,

    /// TOML file with generation parameters
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Number of characters
    #[arg(long)]
    pub characters: Option<usize>,

    /// Number of settings
    #[arg(long)]
    pub settings: Option<usize>,

    /// Number of parts
    #[arg(long)]
    pub parts: Option<usize>,

    /// Chapters in every part
    #[arg(long)]
    pub chapters_per_part: Option<usize>,

    /// Scenes in every chapter
    #[arg(long)]
    pub scenes_per_chapter: Option<usize>,

    /// Preferred genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Preferred tone
    #[arg(long)]
    pub tone: Option<String>,

    /// Language of the prose
    #[arg(long)]
    pub language: Option<String>,

    /// Evaluate and revise every scene
    #[arg(long)]
    pub evaluate: bool,

    /// Revision budget per scene
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Write the novel JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Lay the flags over `base`.
    pub fn apply_to(&self, mut base: GenerationParameters) -> GenerationParameters {
        if let Some(prompt) = &self.prompt {
            base.prompt = prompt.clone();
        }
        if self.characters.is_some() {
            base.character_count = self.characters;
        }
        if self.settings.is_some() {
            base.setting_count = self.settings;
        }
        if self.parts.is_some() {
            base.parts_count = self.parts;
        }
        if self.chapters_per_part.is_some() {
            base.chapters_per_part = self.chapters_per_part;
        }
        if self.scenes_per_chapter.is_some() {
            base.scenes_per_chapter = self.scenes_per_chapter;
        }
        if self.genre.is_some() {
            base.genre = self.genre.clone();
        }
        if self.tone.is_some() {
            base.tone = self.tone.clone();
        }
        if self.language.is_some() {
            base.language = self.language.clone();
        }
        if self.evaluate {
            base.enable_scene_evaluation = true;
        }
        if self.max_iterations.is_some() {
            base.max_evaluation_iterations = self.max_iterations;
        }
        base
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
