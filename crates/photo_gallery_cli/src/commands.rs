use crate::cli::{Cli, Commands};
use log::info;
use photo_gallery_core::logging::init_logging_from_config;
use photo_gallery_core::{
    core_version, open_gallery, ping, AppGallery, CapturedPhoto, GalleryConfig, GalleryState,
    PendingCapture, RuntimeKind, UserPhoto,
};
use std::error::Error;
use std::path::Path;
use url::Url;

type CommandResult = Result<(), Box<dyn Error>>;

pub fn execute(cli: Cli) -> CommandResult {
    let mut config = GalleryConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        let log_dir_was_default = config.log_dir == config.data_dir.join("logs");
        config.data_dir = data_dir;
        if log_dir_was_default {
            config.log_dir = config.data_dir.join("logs");
        }
    }
    if let Some(runtime) = cli.runtime {
        config.runtime = runtime.into();
    }

    match cli.command {
        Commands::Ping => {
            println!("photo_gallery_core ping={}", ping());
            println!("photo_gallery_core version={}", core_version());
            Ok(())
        }
        Commands::Load => {
            let (mut gallery, _) = open(&config)?;
            let count = gallery.on_init()?;
            let corrupted = matches!(gallery.service().state(), GalleryState::Corrupted { .. });
            println!(
                "runtime={} count={count} corrupted={corrupted} data_dir={}",
                config.runtime,
                config.data_dir.display()
            );
            Ok(())
        }
        Commands::List => {
            let (mut gallery, _) = open(&config)?;
            gallery.on_init()?;
            print_photos(gallery.photos())
        }
        Commands::Capture { image } => {
            let (mut gallery, camera) = open(&config)?;
            gallery.on_init()?;
            camera.stage(capture_for(&image, config.runtime)?)?;
            let saved = gallery.add_photo_to_gallery()?;
            info!(
                "event=cli_capture module=cli status=ok file_name={}",
                saved.file_name()
            );
            print_photos(std::slice::from_ref(&saved))
        }
    }
}

fn open(config: &GalleryConfig) -> Result<(AppGallery, PendingCapture), Box<dyn Error>> {
    if let Err(err) = init_logging_from_config(config) {
        eprintln!("warning: logging disabled: {err}");
    }
    let camera = PendingCapture::new();
    let gallery = open_gallery(config, camera.clone())?;
    Ok((gallery, camera))
}

/// Builds the capture result a camera would report for `image` in `runtime`.
fn capture_for(image: &Path, runtime: RuntimeKind) -> Result<CapturedPhoto, Box<dyn Error>> {
    let absolute = std::fs::canonicalize(image)
        .map_err(|err| format!("cannot read image `{}`: {err}", image.display()))?;
    let web_path = Url::from_file_path(&absolute)
        .map_err(|_| format!("cannot express `{}` as a file URL", absolute.display()))?
        .to_string();
    let path = absolute
        .to_str()
        .ok_or_else(|| format!("image path is not valid UTF-8: {}", absolute.display()))?;

    Ok(match runtime {
        RuntimeKind::Native => CapturedPhoto::native(path, Some(web_path)),
        RuntimeKind::Browser => CapturedPhoto::web(web_path),
    })
}

fn print_photos(photos: &[UserPhoto]) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(photos)?);
    Ok(())
}
