use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use look_lab::progress::{self, ProgressMessages};
use look_lab::types::config::ImageConfig;
use look_lab::types::outfit::{ClothingSlot, UploadTarget};
use look_lab::upload::{self, DEFAULT_RESULT_FILE_NAME};
use look_lab::{ClientBuilder, Studio, TryOn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Dress a reference photo in the given clothing items.
///
/// Items are layered in the order they are given: `--top`, `--bottom`,
/// `--accessory`, then each `--item` in turn. Reusing a slot replaces the
/// earlier image but keeps its position.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Photo of the person to dress.
    #[arg(long)]
    photo: PathBuf,

    #[arg(long, help = slot_help(ClothingSlot::Top))]
    top: Option<PathBuf>,

    #[arg(long, help = slot_help(ClothingSlot::Bottom))]
    bottom: Option<PathBuf>,

    #[arg(long, alias = "shoes", help = slot_help(ClothingSlot::Accessory))]
    accessory: Option<PathBuf>,

    /// Additional item as SLOT=PATH (slot is top, bottom or accessory).
    #[arg(long = "item", value_name = "SLOT=PATH", value_parser = parse_item)]
    items: Vec<(ClothingSlot, PathBuf)>,

    /// Image model to call.
    #[arg(long, env = "LOOK_LAB_MODEL", default_value = look_lab::try_on::DEFAULT_MODEL)]
    model: String,

    /// Aspect ratio of the generated image, e.g. 3:4.
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Where to write the generated image.
    #[arg(long, short, default_value = DEFAULT_RESULT_FILE_NAME)]
    out: PathBuf,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,
}

fn slot_help(slot: ClothingSlot) -> String {
    format!("{} image ({})", slot.label(), slot.hint())
}

fn parse_item(value: &str) -> std::result::Result<(ClothingSlot, PathBuf), String> {
    let (slot, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=PATH, got `{value}`"))?;
    let slot = slot.parse::<ClothingSlot>().map_err(|err| err.to_string())?;
    if path.is_empty() {
        return Err(format!("missing path for slot `{slot}`"));
    }
    Ok((slot, PathBuf::from(path)))
}

impl Args {
    fn outfit(&self) -> Vec<(ClothingSlot, PathBuf)> {
        [
            (ClothingSlot::Top, &self.top),
            (ClothingSlot::Bottom, &self.bottom),
            (ClothingSlot::Accessory, &self.accessory),
        ]
        .into_iter()
        .filter_map(|(slot, path)| path.clone().map(|path| (slot, path)))
        .chain(self.items.iter().cloned())
        .collect()
    }
}

async fn run(args: Args) -> Result<()> {
    let mut builder = ClientBuilder::from_env()?;
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("failed to build client")?;

    let mut service = TryOn::new(&client).with_model(&args.model);
    if let Some(aspect_ratio) = &args.aspect_ratio {
        service = service.with_image_config(ImageConfig {
            aspect_ratio: Some(aspect_ratio.clone()),
            ..Default::default()
        });
    }
    let studio = Studio::new(service);

    let photo = upload::load_image(&args.photo)
        .await
        .with_context(|| format!("failed to load photo {}", args.photo.display()))?;
    studio.upload(UploadTarget::ReferencePhoto, photo);
    for (slot, path) in args.outfit() {
        let image = upload::load_image(&path)
            .await
            .with_context(|| format!("failed to load {slot} {}", path.display()))?;
        studio.upload(slot, image);
    }

    eprintln!("{}", progress::PATIENCE_HINT);
    let generation = studio.generate();
    tokio::pin!(generation);
    let mut ticker = tokio::time::interval(progress::INTERVAL);
    let mut messages = ProgressMessages::new();
    let outcome = loop {
        tokio::select! {
            outcome = &mut generation => break outcome,
            _ = ticker.tick() => {
                if let Some(message) = messages.next() {
                    eprintln!("{message}");
                }
            }
        }
    };

    let result = outcome?;
    if let Some(text) = &result.text {
        tracing::info!(%text, "model commentary");
    }
    studio
        .export(&args.out)
        .await
        .with_context(|| format!("failed to save {}", args.out.display()))?;
    println!("{}", args.out.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    run(args).await
}
