/// Erros de armazenamento/engine de dados.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("operação contra chave com tipo errado")]
    WrongType,
    #[error("tipo declarado '{declared}' não corresponde ao valor ('{actual}')")]
    TypeMismatch {
        declared: &'static str,
        actual: &'static str,
    },
    #[error("valor não é um inteiro válido ou está fora do intervalo")]
    NotAnInteger,
}

/// Erros de parsing/validação de comandos.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("número errado de argumentos para '{0}'")]
    WrongArity(String),
    #[error("opção inválida para SET: {0}")]
    InvalidSetOption(String),
    #[error("argumento inválido: {0}")]
    InvalidArgument(String),
}

/// Erro top-level do ferrokv.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type KvResult<T> = Result<T, KvError>;
