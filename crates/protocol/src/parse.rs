use ferrokv_common::CommandError;

/// Cursor sobre os tokens de uma linha para extrair argumentos sequencialmente.
///
/// Falta ou sobra de argumentos vira `WrongArity` com o nome do comando
/// (primeiro token, em maiúsculas).
pub struct Parse {
    parts: Vec<String>,
    pos: usize,
    command: String,
}

impl Parse {
    /// Cria um Parse a partir dos tokens. A linha não pode ser vazia.
    pub fn new(parts: Vec<String>) -> Result<Parse, CommandError> {
        if parts.is_empty() {
            return Err(CommandError::InvalidArgument("linha vazia".into()));
        }
        let command = parts[0].to_uppercase();
        Ok(Parse {
            parts,
            pos: 0,
            command,
        })
    }

    /// Retorna o próximo token.
    pub fn next_string(&mut self) -> Result<String, CommandError> {
        if self.pos >= self.parts.len() {
            return Err(self.wrong_arity());
        }
        let token = std::mem::take(&mut self.parts[self.pos]);
        self.pos += 1;
        Ok(token)
    }

    /// Retorna o próximo token como i64.
    pub fn next_int(&mut self) -> Result<i64, CommandError> {
        let s = self.next_string()?;
        s.parse::<i64>()
            .map_err(|_| CommandError::InvalidArgument(format!("'{s}' não é um inteiro")))
    }

    /// Consome todos os tokens restantes.
    pub fn rest(&mut self) -> Vec<String> {
        let rest = self.parts.split_off(self.pos);
        self.pos = self.parts.len();
        rest
    }

    /// Verifica se todos os argumentos foram consumidos.
    pub fn finish(&self) -> Result<(), CommandError> {
        if self.pos < self.parts.len() {
            Err(self.wrong_arity())
        } else {
            Ok(())
        }
    }

    /// Verifica se ainda há argumentos restantes.
    pub fn has_remaining(&self) -> bool {
        self.pos < self.parts.len()
    }

    /// Retorna o número de argumentos restantes.
    pub fn remaining(&self) -> usize {
        self.parts.len() - self.pos
    }

    /// Erro de aridade para o comando sendo lido.
    pub fn wrong_arity(&self) -> CommandError {
        CommandError::WrongArity(self.command.clone())
    }
}
