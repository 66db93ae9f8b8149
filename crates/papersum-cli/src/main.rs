use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use papersum_core::config_file::{self, ConfigFile};
use papersum_core::present::{AnalysisView, ExpansionMap, PaperListView};
use papersum_core::{
    AnalysisController, ApiConfig, CoreError, FileCandidate, HttpApi, IngestError, Notifier,
    PaperApi, SearchController, SearchOutcome, ingest,
};

mod output;

use output::ColorMode;

/// papersum: search arXiv papers and analyze text against a papersum backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides PAPERSUM_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search papers by keyword
    Search {
        /// Search query (multiple words are joined with spaces)
        #[arg(required = true)]
        query: Vec<String>,

        /// Show full abstracts instead of the 200-character preview
        #[arg(long)]
        expand: bool,

        /// Print the raw JSON array returned by the backend
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Summarize text and extract key insights
    Analyze {
        /// Text to analyze (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Load the text from a .txt or .md file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the full analysis as JSON, including sentiment and topics
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show the effective configuration, or save settings to the config file
    ///
    /// With no options, prints the merged settings. Any of --api-url,
    /// --theme, or --timeout-secs are written to the platform config file.
    Config {
        /// Color theme used by papersum-tui
        #[arg(long, value_parser = ["hacker", "modern"])]
        theme: Option<String>,

        /// HTTP request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Command::Config {
        theme,
        timeout_secs,
    } = cli.command
    {
        return configure(cli.api_url, theme, timeout_secs);
    }

    let api_config = ApiConfig::resolve(cli.api_url, &config_file::load_config());
    let api = HttpApi::new(api_config).context("failed to build HTTP client")?;

    match cli.command {
        Command::Search {
            query,
            expand,
            json,
            no_color,
        } => search(&api, &query.join(" "), expand, json, color_mode(no_color)).await,
        Command::Analyze {
            text,
            file,
            json,
            no_color,
        } => {
            let text = resolve_text(text, file.as_deref())
                .await
                .context("failed to load text to analyze")?;
            analyze(&api, text, json, color_mode(no_color)).await
        }
        Command::Config { .. } => Ok(()),
    }
}

fn color_mode(no_color: bool) -> ColorMode {
    ColorMode(!no_color && std::io::stdout().is_terminal())
}

/// Spinner on stderr while a request is in flight; hidden when piped.
fn spinner(msg: &str) -> ProgressBar {
    let pb = if std::io::stderr().is_terminal() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

async fn search(
    api: &dyn PaperApi,
    query: &str,
    expand: bool,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let mut controller = SearchController::new();
    let pb = spinner("Searching...");
    let outcome = controller.submit(api, query).await;
    pb.finish_and_clear();
    match outcome {
        None => {
            return Err(CoreError::Validation("search query must not be empty".into()).into());
        }
        Some(SearchOutcome::Failed(e)) => {
            return Err(CoreError::from(e))
                .with_context(|| format!("search for {query:?} failed"));
        }
        Some(SearchOutcome::Superseded) => bail!("search response was superseded"),
        Some(SearchOutcome::Replaced(_)) => {}
    }
    let papers = controller.papers().unwrap_or_default();

    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut w, papers)?;
        writeln!(w)?;
        return Ok(());
    }

    let mut expansion = ExpansionMap::new();
    if expand {
        for paper in papers {
            if !expansion.is_expanded(&paper.id) {
                expansion.toggle(&paper.id);
            }
        }
    }
    let view = PaperListView::build(Some(papers), false, &expansion);
    output::print_paper_list(&mut w, &view, color)?;
    Ok(())
}

async fn analyze(
    api: &dyn PaperApi,
    text: String,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let mut controller = AnalysisController::new();
    controller.set_text(text);
    if !controller.can_submit() {
        return Err(CoreError::Validation("text to analyze must not be empty".into()).into());
    }

    let mut notifier = Notifier::default();
    let pb = spinner("Analyzing...");
    controller.submit(api, &mut notifier).await;
    pb.finish_and_clear();
    // The underlying error was already logged by the controller.
    if let Some(failure) = notifier.drain().into_iter().find(|n| n.is_error()) {
        bail!("{}: {}", failure.title, failure.description);
    }
    let Some(result) = controller.result() else {
        bail!("analysis returned no result");
    };

    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut w, result)?;
        writeln!(w)?;
        return Ok(());
    }
    if let Some(view) = AnalysisView::build(Some(result)) {
        output::print_analysis(&mut w, &view, color)?;
    }
    Ok(())
}

/// Pick the analysis input: the argument, a gated text file, or stdin.
async fn resolve_text(text: Option<String>, file: Option<&Path>) -> Result<String, CoreError> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        ingest::check_file_type(&FileCandidate::from_path(path))?;
        return Ok(ingest::read_text_file(path).await?);
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(IngestError::Read)?;
    Ok(buf)
}

fn configure(
    api_url: Option<String>,
    theme: Option<String>,
    timeout_secs: Option<u64>,
) -> anyhow::Result<()> {
    let Some(path) = config_file::config_path() else {
        bail!("could not determine config directory");
    };

    let mut saved = config_file::load_from_path(&path).unwrap_or_default();
    if !apply_settings(&mut saved, api_url, theme, timeout_secs) {
        let effective = config_file::load_config();
        println!("config file: {}", path.display());
        println!(
            "api.base_url = {}",
            ApiConfig::resolve(None, &effective).base_url
        );
        if let Some(secs) = effective.timeout_secs() {
            println!("api.timeout_secs = {secs}");
        }
        println!("display.theme = {}", effective.theme().unwrap_or("hacker"));
        if let Some(fps) = effective.fps() {
            println!("display.fps = {fps}");
        }
        return Ok(());
    }

    let written = config_file::save_config(&saved).map_err(anyhow::Error::msg)?;
    println!("saved {}", written.display());
    Ok(())
}

/// Overlay the given settings onto `config`. Returns `false` if none were given.
fn apply_settings(
    config: &mut ConfigFile,
    api_url: Option<String>,
    theme: Option<String>,
    timeout_secs: Option<u64>,
) -> bool {
    if api_url.is_none() && theme.is_none() && timeout_secs.is_none() {
        return false;
    }
    if api_url.is_some() || timeout_secs.is_some() {
        let api = config.api.get_or_insert_with(Default::default);
        if let Some(url) = api_url {
            api.base_url = Some(url);
        }
        if let Some(secs) = timeout_secs {
            api.timeout_secs = Some(secs);
        }
    }
    if let Some(theme) = theme {
        config.display.get_or_insert_with(Default::default).theme = Some(theme);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use papersum_core::api::mock::{MockApi, MockResponse};

    #[tokio::test]
    async fn argument_text_wins() {
        let text = resolve_text(Some("hello".into()), None).await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn markdown_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes").unwrap();
        let text = resolve_text(None, Some(&path)).await.unwrap();
        assert_eq!(text, "# Notes");
    }

    #[tokio::test]
    async fn non_text_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, "%PDF").unwrap();
        let err = resolve_text(None, Some(&path)).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Ingest(IngestError::InvalidType { ref name }) if name == "paper.pdf"
        ));
    }

    #[tokio::test]
    async fn analyze_failure_is_reported_as_error() {
        let api = MockApi::default().analyze_sequence(vec![MockResponse::Status {
            status: 500,
            message: None,
        }]);
        let err = analyze(&api, "hello world".into(), true, ColorMode(false))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Failed to analyze text. Please try again."
        );
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn blank_analysis_text_sends_nothing() {
        let api = MockApi::default();
        let err = analyze(&api, "  \n".into(), false, ColorMode(false))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_search_sends_nothing() {
        let api = MockApi::default();
        let err = search(&api, " ", false, false, ColorMode(false))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Validation(_))
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn settings_overlay_keeps_unrelated_fields() {
        let mut config = ConfigFile::default();
        config.display.get_or_insert_with(Default::default).fps = Some(30);

        assert!(apply_settings(
            &mut config,
            Some("http://example.test".into()),
            Some("modern".into()),
            None,
        ));
        assert_eq!(config.base_url(), Some("http://example.test"));
        assert_eq!(config.theme(), Some("modern"));
        assert_eq!(config.fps(), Some(30));
        assert_eq!(config.timeout_secs(), None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papersum").join("config.toml");
        config_file::save_to_path(&config, &path).unwrap();
        let reloaded = config_file::load_from_path(&path).unwrap();
        assert_eq!(reloaded.base_url(), Some("http://example.test"));
        assert_eq!(reloaded.fps(), Some(30));
    }

    #[test]
    fn no_settings_means_no_change() {
        let mut config = ConfigFile::default();
        assert!(!apply_settings(&mut config, None, None, None));
        assert!(config.api.is_none());
    }

    #[test]
    fn config_rejects_unknown_theme() {
        let res = Cli::try_parse_from(["papersum", "config", "--theme", "neon"]);
        assert!(res.is_err());
    }

    #[test]
    fn cli_parses_search_words() {
        let cli = Cli::try_parse_from(["papersum", "search", "machine", "learning", "--expand"])
            .unwrap();
        match cli.command {
            Command::Search { query, expand, .. } => {
                assert_eq!(query.join(" "), "machine learning");
                assert!(expand);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_text_and_file_together() {
        let res = Cli::try_parse_from(["papersum", "analyze", "hi", "--file", "a.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn global_api_url_after_subcommand() {
        let cli = Cli::try_parse_from([
            "papersum",
            "analyze",
            "hi",
            "--api-url",
            "http://example.test",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://example.test"));
    }
}
