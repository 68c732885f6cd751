//! Interactive legal assistant over the Kementerian Keuangan regulation
//! database: keyword search, document analysis, model fallback.

mod display;

use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use konsul_ai::{
    HttpBackend, ModelCandidate, ModelPipeline, PipelineError, Provider, default_ladder,
    openai_ladder,
};
use konsul_chat::{
    GREETING, HistorySink, JsonlHistory, NullSink, Session, SessionConfig, read_upload, run_turn,
};
use konsul_store::{RegulationStore, StoreError};
use tracing::info;

#[derive(Parser)]
#[command(name = "konsul")]
#[command(about = "Asisten peraturan Kementerian Keuangan: cari aturan, analisa dokumen")]
struct Args {
    /// Path to the extractor's CSV output
    #[arg(long, default_value = "clean_legal_data.csv")]
    data: PathBuf,

    /// API key; read from GOOGLE_API_KEY or OPENAI_API_KEY (per --provider) when omitted
    #[arg(long)]
    api_key: Option<String>,

    /// Provider: google or openai
    #[arg(long, default_value = "google")]
    provider: Provider,

    /// Override the model ladder (repeat the flag for ordered fallback)
    #[arg(long = "model")]
    models: Vec<String>,

    /// Max records fed into the model context
    #[arg(long, default_value_t = konsul_chat::DEFAULT_TOP_K)]
    top_k: usize,

    /// Max uploaded characters forwarded to the model
    #[arg(long, default_value_t = konsul_ai::context::DEFAULT_UPLOAD_CAP)]
    upload_cap: usize,

    /// Document (.pdf or .txt) to attach before the first turn
    #[arg(long)]
    file: Option<PathBuf>,

    /// Mirror the conversation to this JSONL file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Ask one question and exit instead of starting the prompt loop
    #[arg(long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let store = match RegulationStore::from_csv_path(&args.data) {
        Ok(store) => store,
        Err(StoreError::SourceMissing(path)) => {
            anyhow::bail!(
                "database peraturan tidak ditemukan di {}. Jalankan script extractor dulu.",
                path.display()
            );
        }
        Err(err) => return Err(err).context("gagal membaca database peraturan"),
    };
    info!(count = store.len(), "database peraturan siap");

    let api_key = resolve_api_key(args.api_key.clone(), args.provider);
    let backend = HttpBackend::new().context("gagal menyiapkan klien HTTP")?;
    let pipeline = ModelPipeline::new(
        Box::new(backend),
        build_ladder(args.provider, &args.models),
        api_key,
    );

    let sink: Box<dyn HistorySink> = match &args.history {
        Some(path) => Box::new(JsonlHistory::open(path).context("gagal membuka file riwayat")?),
        None => Box::new(NullSink),
    };
    let mut session = Session::new(
        store,
        sink,
        SessionConfig {
            top_k: args.top_k,
            upload_cap: args.upload_cap,
        },
    );

    if let Some(path) = &args.file {
        attach_file(&mut session, path);
    }

    match &args.query {
        Some(question) => ask_once(&mut session, &pipeline, question).await,
        None => repl(&mut session, &pipeline).await,
    }
}

/// The flag wins; otherwise only the chosen provider's own variable is
/// consulted, so an OpenAI run never picks up a stray GOOGLE_API_KEY. The
/// provider itself is never inferred from which variables are set.
fn resolve_api_key(flag: Option<String>, provider: Provider) -> String {
    resolve_api_key_with(flag, provider, |var| std::env::var(var).ok())
}

fn resolve_api_key_with(
    flag: Option<String>,
    provider: Provider,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    if let Some(key) = flag {
        return key;
    }
    let var = match provider {
        Provider::Google => "GOOGLE_API_KEY",
        Provider::OpenAI => "OPENAI_API_KEY",
    };
    lookup(var).unwrap_or_default()
}

fn build_ladder(provider: Provider, overrides: &[String]) -> Vec<ModelCandidate> {
    if overrides.is_empty() {
        return match provider {
            Provider::Google => default_ladder(),
            Provider::OpenAI => openai_ladder(),
        };
    }
    overrides
        .iter()
        .map(|model| ModelCandidate {
            provider,
            model: model.clone(),
        })
        .collect()
}

fn attach_file(session: &mut Session, path: &Path) {
    match read_upload(path) {
        Ok(doc) => {
            println!("File terbaca: {} ({} karakter)", doc.name, doc.char_count());
            let preview = doc.preview(500);
            if !preview.is_empty() {
                let ellipsis = if doc.char_count() > 500 { "..." } else { "" };
                println!("--- cuplikan ---\n{preview}{ellipsis}\n");
            }
            session.attach_upload(doc);
        }
        Err(err) => eprintln!("Gagal membaca file: {err}"),
    }
}

async fn ask_once(
    session: &mut Session,
    pipeline: &ModelPipeline,
    question: &str,
) -> anyhow::Result<()> {
    match run_turn(session, pipeline, question, show_thinking).await {
        Ok(outcome) => {
            println!("{}", outcome.answer);
            if !outcome.references.is_empty() {
                println!("\n{}", display::reference_table(&outcome.references));
            }
            Ok(())
        }
        Err(PipelineError::MissingCredential) => {
            anyhow::bail!("Masukkan API Key dulu (--api-key, GOOGLE_API_KEY, atau OPENAI_API_KEY).")
        }
        Err(err @ PipelineError::Exhausted { .. }) => {
            eprintln!("Gagal koneksi ke AI. Coba lagi. ({err})");
            anyhow::bail!("Gagal memproses.")
        }
    }
}

/// One line of REPL input. Colon-prefixed input always parses as a command:
/// a mistyped command is `Unknown`, never a model query.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Upload(&'a str),
    Clear,
    Quit,
    Unknown(&'a str),
    Ask(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    if let Some(rest) = input.strip_prefix(":upload") {
        if rest.is_empty() {
            return Command::Upload("");
        }
        if rest.starts_with(char::is_whitespace) {
            return Command::Upload(rest.trim());
        }
        return Command::Unknown(input);
    }
    match input {
        ":quit" | ":q" => Command::Quit,
        ":clear" => Command::Clear,
        _ if input.starts_with(':') => Command::Unknown(input),
        question => Command::Ask(question),
    }
}

async fn repl(session: &mut Session, pipeline: &ModelPipeline) -> anyhow::Result<()> {
    println!("{GREETING}");
    println!("Perintah: :upload <path>, :clear, :quit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let question = match parse_command(input) {
            Command::Upload("") => {
                eprintln!("Pakai: :upload <path>");
                continue;
            }
            Command::Upload(path) => {
                attach_file(session, Path::new(path));
                continue;
            }
            Command::Clear => {
                session.clear_upload();
                println!("Dokumen dilepas.");
                continue;
            }
            Command::Quit => break,
            Command::Unknown(cmd) => {
                eprintln!("Perintah tidak dikenal: {cmd}. Perintah: :upload <path>, :clear, :quit");
                continue;
            }
            Command::Ask(question) => question,
        };

        match run_turn(session, pipeline, question, show_thinking).await {
            Ok(outcome) => {
                println!("\n{}\n", outcome.answer);
                if !outcome.references.is_empty() {
                    println!("{}", display::reference_table(&outcome.references));
                }
            }
            Err(PipelineError::MissingCredential) => {
                eprintln!("Masukkan API Key dulu (--api-key, GOOGLE_API_KEY, atau OPENAI_API_KEY).");
            }
            Err(err) => {
                eprintln!("Gagal koneksi ke AI. Coba lagi. ({err})");
            }
        }
    }
    Ok(())
}

fn show_thinking(candidate: &ModelCandidate) {
    eprintln!("Berpikir dengan: {candidate}...");
}
