use clap::Parser;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;

use ferrokv_cli::{LineOutcome, Session, process_tokens};
use ferrokv_common::{BANNER, DEFAULT_PROMPT};
use ferrokv_storage::{Db, DbConfig};

#[derive(Parser, Debug)]
#[command(name = "ferrokv", about = "ferrokv: cache chave-valor em memória")]
struct Args {
    /// INCR mantém o TTL da chave em vez de descartá-lo
    #[arg(long)]
    preserve_ttl_on_incr: bool,
    #[arg(long)]
    no_banner: bool,
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Comando para executar diretamente (modo não interativo)
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Logs em stderr para não misturar com as respostas
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferrokv=warn".into()),
        )
        .init();

    let args = Args::parse();
    let db = Db::with_config(DbConfig {
        preserve_ttl_on_incr: args.preserve_ttl_on_incr,
    });

    // Modo comando único (via argumentos)
    if !args.command.is_empty() {
        if let LineOutcome::Reply(reply) = process_tokens(args.command, &db) {
            println!("{reply}");
        }
        return Ok(());
    }

    if !args.no_banner {
        println!("{BANNER}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(repl(db, args.prompt));

    // A leitura de stdin fica presa numa thread bloqueante até chegar uma
    // linha; não esperar por ela ao encerrar.
    runtime.shutdown_background();
    result
}

async fn repl(db: Db, prompt: String) -> anyhow::Result<()> {
    let mut session = Session::new(db, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .with_prompt(prompt);

    tokio::select! {
        result = session.run() => result?,
        _ = signal::ctrl_c() => {
            info!("shutdown signal recebido");
        }
    }

    Ok(())
}
