//! Print the OpenAPI document as JSON or YAML.
//!
//! ```sh
//! cargo run --bin openapi-dump -- --format yaml
//! ```

use clap::{Parser, ValueEnum};
use events_backend::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(about = "Print the event API OpenAPI document")]
struct Cli {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = match cli.format {
        Format::Json => doc.to_pretty_json().map_err(std::io::Error::other)?,
        Format::Yaml => doc.to_yaml().map_err(std::io::Error::other)?,
    };
    println!("{rendered}");
    Ok(())
}
