use clap::{Parser, Subcommand, ValueEnum};
use photo_gallery_core::RuntimeKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "photo-gallery")]
#[command(about = "Capture photos into a local gallery and list them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Gallery data directory (overrides PHOTO_GALLERY_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Runtime the storage adapter is built for (overrides PHOTO_GALLERY_RUNTIME)
    #[arg(long, global = true, value_enum)]
    pub runtime: Option<RuntimeArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the core library is linked
    Ping,

    /// Load the saved gallery and print a summary
    Load,

    /// Load the saved gallery and print it newest first
    List,

    /// Save an image file as a new capture
    Capture {
        /// Image to import as the captured photo
        image: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuntimeArg {
    Native,
    Browser,
}

impl From<RuntimeArg> for RuntimeKind {
    fn from(value: RuntimeArg) -> Self {
        match value {
            RuntimeArg::Native => RuntimeKind::Native,
            RuntimeArg::Browser => RuntimeKind::Browser,
        }
    }
}
