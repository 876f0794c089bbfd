use anyhow::{Context, Result};
use clap::Args;
use liftoff_core::{
    CoreConfig, HttpTransport, KeyValueStore, MultipartForm, OutboundRequest, TierAnnotator,
    TieredTransport, Transport,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct RequestArgs {
    /// Path relative to the API base url, or an absolute url
    url: String,
    /// JSON body; sends a POST
    #[arg(long, conflicts_with = "upload")]
    data: Option<String>,
    /// File to upload as multipart field `file`; sends a POST
    #[arg(long)]
    upload: Option<PathBuf>,
}

pub fn run<S: KeyValueStore>(args: RequestArgs, store: S, config: &CoreConfig) -> Result<()> {
    let http = HttpTransport::new(config.api_base_url.clone(), config.request_timeout())?;
    let transport = TieredTransport::new(
        http,
        TierAnnotator::with_path_marker(store, config.api_path_marker.as_str()),
    );

    let request = match (args.data, args.upload) {
        (Some(data), _) => {
            let body = serde_json::from_str(&data).context("--data is not valid JSON")?;
            OutboundRequest::post_json(args.url, body)
        }
        (None, Some(path)) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let mime = file_name
                .to_ascii_lowercase()
                .ends_with(".pdf")
                .then_some("application/pdf");
            let form = MultipartForm::new().file("file", file_name, mime, bytes);
            OutboundRequest::post_multipart(args.url, form)
        }
        (None, None) => OutboundRequest::get(args.url),
    };

    let response = transport.send(request)?;
    eprintln!("HTTP {}", response.status);
    println!("{}", response.body);
    Ok(())
}
