#![forbid(unsafe_code)]

mod error;

pub use error::*;

pub const DEFAULT_PROMPT: &str = "ferrokv> ";
pub const BANNER: &str =
    "ferrokv: cache chave-valor em memória (digite 'help' para ver os comandos, 'exit' para sair)";

/// Texto exibido pelo comando HELP.
pub const HELP_TEXT: &str = "\
SET key value [EX seconds] | GET key | DEL key [key ...] | EXISTS key | TTL key | INCR key
LPUSH key value [value ...] | RPUSH key value [value ...] | LPOP key | RPOP key | LLEN key | LRANGE key start stop
HSET key field value [field value ...] | HGET key field | HGETALL key | HDEL key field [field ...] | HEXISTS key field | HLEN key
TYPE key | DBSIZE | PING | HELP | EXIT";
