use std::time::Duration;

use tracing::{debug, warn};

use ferrokv_common::{HELP_TEXT, StorageError};
use ferrokv_protocol::{Command, Reply, tokenize};
use ferrokv_storage::Db;

/// Resultado de processar uma linha de entrada.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Linha em branco: nada a responder.
    Empty,
    /// EXIT/QUIT: encerra a sessão.
    Exit,
    Reply(Reply),
}

/// Tokeniza, faz o parse e executa uma linha. Nunca falha: erros de parse
/// ou de execução viram `Reply::Error`.
pub fn process_line(line: &str, db: &Db) -> LineOutcome {
    process_tokens(tokenize(line), db)
}

pub fn process_tokens(tokens: Vec<String>, db: &Db) -> LineOutcome {
    if tokens.is_empty() {
        return LineOutcome::Empty;
    }

    let cmd = match Command::from_tokens(tokens) {
        Ok(cmd) => cmd,
        Err(e) => {
            warn!("erro de parse: {e}");
            return LineOutcome::Reply(Reply::Error(format!("ERR {e}")));
        }
    };

    if cmd == Command::Exit {
        return LineOutcome::Exit;
    }

    debug!(command = cmd.name(), "comando recebido: {cmd:?}");
    LineOutcome::Reply(execute_command(&cmd, db))
}

/// Executa um comando e retorna o Reply de resposta.
pub fn execute_command(cmd: &Command, db: &Db) -> Reply {
    match cmd {
        Command::Ping => Reply::Simple("PONG".into()),
        Command::Help => Reply::Simple(HELP_TEXT.into()),
        Command::Exit => Reply::ok(),
        Command::DbSize => Reply::Integer(db.len() as i64),
        Command::Get(key) => match db.get(key) {
            Some(value) => Reply::Bulk(value),
            None => Reply::Null,
        },
        Command::Set {
            key,
            value,
            options,
        } => {
            let ttl = options.expire_secs.map(Duration::from_secs);
            db.set(key.clone(), value.clone(), ttl);
            Reply::ok()
        }
        Command::Del(keys) => Reply::Integer(db.del(keys) as i64),
        Command::Exists(key) => Reply::Integer(i64::from(db.exists(key))),
        Command::Ttl(key) => Reply::Integer(db.ttl(key)),
        Command::Incr(key) => match db.incr(key) {
            Ok(n) => Reply::Integer(n),
            Err(e) => storage_error(e),
        },
        Command::Type(key) => {
            Reply::Simple(db.key_type(key).map(|kind| kind.as_str()).unwrap_or("none").into())
        }
        Command::LPush { key, values } => match db.lpush(key, values) {
            Ok(len) => Reply::Integer(len as i64),
            Err(e) => storage_error(e),
        },
        Command::RPush { key, values } => match db.rpush(key, values) {
            Ok(len) => Reply::Integer(len as i64),
            Err(e) => storage_error(e),
        },
        Command::LPop(key) => db.lpop(key).map(Reply::Bulk).unwrap_or(Reply::Null),
        Command::RPop(key) => db.rpop(key).map(Reply::Bulk).unwrap_or(Reply::Null),
        Command::LLen(key) => Reply::Integer(db.llen(key) as i64),
        Command::LRange { key, start, stop } => match db.lrange(key, *start, *stop) {
            Some(items) => Reply::array_from_strings(items),
            None => Reply::Null,
        },
        Command::HSet { key, fields } => {
            let result = match fields.as_slice() {
                [(field, value)] => db.hset(key, field.clone(), value.clone()),
                _ => db.hset_multiple(key, fields),
            };
            match result {
                Ok(created) => Reply::Integer(created as i64),
                Err(e) => storage_error(e),
            }
        }
        Command::HGet { key, field } => db.hget(key, field).map(Reply::Bulk).unwrap_or(Reply::Null),
        Command::HGetAll(key) => match db.hgetall(key) {
            Some(hash) => {
                // ordenado por campo para saída estável
                let mut pairs: Vec<_> = hash.into_iter().collect();
                pairs.sort();
                Reply::array_from_strings(pairs.into_iter().flat_map(|(f, v)| [f, v]))
            }
            None => Reply::Null,
        },
        Command::HDel { key, fields } => Reply::Integer(db.hdel(key, fields) as i64),
        Command::HExists { key, field } => Reply::Integer(i64::from(db.hexists(key, field))),
        Command::HLen(key) => Reply::Integer(db.hlen(key) as i64),
        Command::Unknown(name) => Reply::Error(format!("ERR unknown command '{name}'")),
    }
}

fn storage_error(e: StorageError) -> Reply {
    warn!("erro ao executar comando: {e}");
    match e {
        StorageError::WrongType => Reply::Error(
            "WRONGTYPE Operation against a key holding the wrong kind of value".into(),
        ),
        StorageError::NotAnInteger => {
            Reply::Error("ERR value is not an integer or out of range".into())
        }
        e => Reply::Error(format!("ERR {e}")),
    }
}
