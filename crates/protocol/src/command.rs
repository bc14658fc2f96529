use ferrokv_common::CommandError;

use crate::{Parse, tokenize};

/// Opções do comando SET.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetOptions {
    pub expire_secs: Option<u64>,
}

/// Enum com todos os comandos suportados.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ping,
    Help,
    Exit,
    DbSize,
    Get(String),
    Set {
        key: String,
        value: String,
        options: SetOptions,
    },
    Del(Vec<String>),
    Exists(String),
    Ttl(String),
    Incr(String),
    Type(String),
    LPush {
        key: String,
        values: Vec<String>,
    },
    RPush {
        key: String,
        values: Vec<String>,
    },
    LPop(String),
    RPop(String),
    LLen(String),
    LRange {
        key: String,
        start: i64,
        stop: i64,
    },
    HSet {
        key: String,
        fields: Vec<(String, String)>,
    },
    HGet {
        key: String,
        field: String,
    },
    HGetAll(String),
    HDel {
        key: String,
        fields: Vec<String>,
    },
    HExists {
        key: String,
        field: String,
    },
    HLen(String),
    Unknown(String),
}

impl Command {
    /// Tokeniza e faz o parse de uma linha de entrada.
    pub fn from_line(line: &str) -> Result<Command, CommandError> {
        Command::from_tokens(tokenize(line))
    }

    /// Faz o parse dos tokens de uma linha em um Command.
    pub fn from_tokens(tokens: Vec<String>) -> Result<Command, CommandError> {
        let mut parse = Parse::new(tokens)?;
        let cmd_name = parse.next_string()?.to_uppercase();

        let cmd = match cmd_name.as_str() {
            "PING" => no_args(&parse, Command::Ping)?,
            "HELP" => no_args(&parse, Command::Help)?,
            "EXIT" | "QUIT" => no_args(&parse, Command::Exit)?,
            "DBSIZE" => no_args(&parse, Command::DbSize)?,
            "GET" => Command::Get(single_key(&mut parse)?),
            "SET" => parse_set(&mut parse)?,
            "DEL" => {
                if !parse.has_remaining() {
                    return Err(parse.wrong_arity());
                }
                Command::Del(parse.rest())
            }
            "EXISTS" => Command::Exists(single_key(&mut parse)?),
            "TTL" => Command::Ttl(single_key(&mut parse)?),
            "INCR" => Command::Incr(single_key(&mut parse)?),
            "TYPE" => Command::Type(single_key(&mut parse)?),
            "LPUSH" => {
                let key = parse.next_string()?;
                if !parse.has_remaining() {
                    return Err(parse.wrong_arity());
                }
                Command::LPush {
                    key,
                    values: parse.rest(),
                }
            }
            "RPUSH" => {
                let key = parse.next_string()?;
                if !parse.has_remaining() {
                    return Err(parse.wrong_arity());
                }
                Command::RPush {
                    key,
                    values: parse.rest(),
                }
            }
            "LPOP" => Command::LPop(single_key(&mut parse)?),
            "RPOP" => Command::RPop(single_key(&mut parse)?),
            "LLEN" => Command::LLen(single_key(&mut parse)?),
            "LRANGE" => {
                let key = parse.next_string()?;
                let start = parse.next_int()?;
                let stop = parse.next_int()?;
                parse.finish()?;
                Command::LRange { key, start, stop }
            }
            "HSET" => parse_hset(&mut parse)?,
            "HGET" => {
                let key = parse.next_string()?;
                let field = parse.next_string()?;
                parse.finish()?;
                Command::HGet { key, field }
            }
            "HGETALL" => Command::HGetAll(single_key(&mut parse)?),
            "HDEL" => {
                let key = parse.next_string()?;
                if !parse.has_remaining() {
                    return Err(parse.wrong_arity());
                }
                Command::HDel {
                    key,
                    fields: parse.rest(),
                }
            }
            "HEXISTS" => {
                let key = parse.next_string()?;
                let field = parse.next_string()?;
                parse.finish()?;
                Command::HExists { key, field }
            }
            "HLEN" => Command::HLen(single_key(&mut parse)?),
            _ => Command::Unknown(cmd_name),
        };

        Ok(cmd)
    }

    /// Nome canônico do comando (para logs).
    pub fn name(&self) -> &str {
        match self {
            Command::Ping => "PING",
            Command::Help => "HELP",
            Command::Exit => "EXIT",
            Command::DbSize => "DBSIZE",
            Command::Get(_) => "GET",
            Command::Set { .. } => "SET",
            Command::Del(_) => "DEL",
            Command::Exists(_) => "EXISTS",
            Command::Ttl(_) => "TTL",
            Command::Incr(_) => "INCR",
            Command::Type(_) => "TYPE",
            Command::LPush { .. } => "LPUSH",
            Command::RPush { .. } => "RPUSH",
            Command::LPop(_) => "LPOP",
            Command::RPop(_) => "RPOP",
            Command::LLen(_) => "LLEN",
            Command::LRange { .. } => "LRANGE",
            Command::HSet { .. } => "HSET",
            Command::HGet { .. } => "HGET",
            Command::HGetAll(_) => "HGETALL",
            Command::HDel { .. } => "HDEL",
            Command::HExists { .. } => "HEXISTS",
            Command::HLen(_) => "HLEN",
            Command::Unknown(name) => name.as_str(),
        }
    }
}

fn no_args(parse: &Parse, cmd: Command) -> Result<Command, CommandError> {
    parse.finish()?;
    Ok(cmd)
}

fn single_key(parse: &mut Parse) -> Result<String, CommandError> {
    let key = parse.next_string()?;
    parse.finish()?;
    Ok(key)
}

fn parse_set(parse: &mut Parse) -> Result<Command, CommandError> {
    let key = parse.next_string()?;
    let value = parse.next_string()?;

    let mut options = SetOptions::default();

    while parse.has_remaining() {
        let opt = parse.next_string()?.to_uppercase();
        match opt.as_str() {
            "EX" => {
                let secs = parse.next_int()?;
                if secs <= 0 {
                    return Err(CommandError::InvalidSetOption(
                        "EX deve ser positivo".into(),
                    ));
                }
                options.expire_secs = Some(secs as u64);
            }
            other => {
                return Err(CommandError::InvalidSetOption(other.to_string()));
            }
        }
    }

    Ok(Command::Set {
        key,
        value,
        options,
    })
}

fn parse_hset(parse: &mut Parse) -> Result<Command, CommandError> {
    let key = parse.next_string()?;
    let remaining = parse.remaining();
    if remaining == 0 || remaining % 2 != 0 {
        return Err(parse.wrong_arity());
    }

    let mut fields = Vec::with_capacity(remaining / 2);
    while parse.has_remaining() {
        let field = parse.next_string()?;
        let value = parse.next_string()?;
        fields.push((field, value));
    }

    Ok(Command::HSet { key, fields })
}
