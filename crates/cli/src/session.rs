use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use ferrokv_common::{DEFAULT_PROMPT, KvResult};
use ferrokv_storage::Db;

use crate::handler::{LineOutcome, process_line};

/// Loop interativo: lê uma linha, executa, escreve a resposta.
pub struct Session<R, W> {
    db: Db,
    reader: R,
    writer: W,
    prompt: String,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(db: Db, reader: R, writer: W) -> Self {
        Self {
            db,
            reader,
            writer,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Roda até EOF ou EXIT. Apenas falhas de I/O encerram com erro;
    /// entrada inválida vira uma linha `(error) ...`.
    pub async fn run(&mut self) -> KvResult<()> {
        info!("sessão iniciada");
        let mut buf = Vec::new();

        loop {
            self.writer.write_all(self.prompt.as_bytes()).await?;
            self.writer.flush().await?;

            buf.clear();
            if self.reader.read_until(b'\n', &mut buf).await? == 0 {
                break; // EOF
            }

            let line = String::from_utf8_lossy(&buf);
            match process_line(&line, &self.db) {
                LineOutcome::Empty => continue,
                LineOutcome::Exit => break,
                LineOutcome::Reply(reply) => {
                    self.writer.write_all(format!("{reply}\n").as_bytes()).await?;
                }
            }
        }

        self.writer.flush().await?;
        info!("sessão encerrada");
        Ok(())
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
