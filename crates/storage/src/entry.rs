use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use ferrokv_common::StorageError;

/// Tag do tipo de valor armazenado sob uma chave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    List,
    Hash,
    /// Reconhecido, mas nenhum comando opera sobre conjuntos.
    Set,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::List => "list",
            Kind::Hash => "hash",
            Kind::Set => "set",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tipo do valor armazenado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    List(VecDeque<String>),
    Hash(HashMap<String, String>),
    Set(HashSet<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Hash(_) => Kind::Hash,
            Value::Set(_) => Kind::Set,
        }
    }

    /// Valor vazio do tipo pedido (usado nos comandos que criam a chave).
    pub fn empty(kind: Kind) -> Value {
        match kind {
            Kind::String => Value::String(String::new()),
            Kind::List => Value::List(VecDeque::new()),
            Kind::Hash => Value::Hash(HashMap::new()),
            Kind::Set => Value::Set(HashSet::new()),
        }
    }
}

/// Entrada no store: valor tipado + expiração opcional.
///
/// O tipo é fixado na criação; sobrescrever uma chave sempre cria uma
/// `Entry` nova.
#[derive(Debug, Clone)]
pub struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    /// O tipo é derivado do próprio `Value`, então não há como divergir do
    /// conteúdo. `with_kind` serve para quem recebe o tipo separado do valor.
    pub fn new(value: Value, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    /// Constrói validando que o valor tem o formato do tipo declarado.
    pub fn with_kind(
        value: Value,
        kind: Kind,
        expires_at: Option<Instant>,
    ) -> Result<Self, StorageError> {
        let actual = value.kind();
        if actual != kind {
            return Err(StorageError::TypeMismatch {
                declared: kind.as_str(),
                actual: actual.as_str(),
            });
        }
        Ok(Self::new(value, expires_at))
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Expirada somente quando `now` passou estritamente do instante de expiração.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.map(|t| now > t).unwrap_or(false)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Tempo restante até a expiração, `None` se a entrada não expira.
    pub fn ttl_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at.map(|t| t.saturating_duration_since(now))
    }

    pub fn as_string(&self) -> Result<&str, StorageError> {
        match &self.value {
            Value::String(s) => Ok(s),
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn as_list(&self) -> Result<&VecDeque<String>, StorageError> {
        match &self.value {
            Value::List(list) => Ok(list),
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut VecDeque<String>, StorageError> {
        match &mut self.value {
            Value::List(list) => Ok(list),
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn as_hash(&self) -> Result<&HashMap<String, String>, StorageError> {
        match &self.value {
            Value::Hash(hash) => Ok(hash),
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn as_hash_mut(&mut self) -> Result<&mut HashMap<String, String>, StorageError> {
        match &mut self.value {
            Value::Hash(hash) => Ok(hash),
            _ => Err(StorageError::WrongType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_kind_accepts_matching_shape() {
        let entry = Entry::with_kind(Value::String("v".into()), Kind::String, None).unwrap();
        assert_eq!(entry.kind(), Kind::String);
        assert_eq!(entry.value(), &Value::String("v".into()));
        assert_eq!(entry.as_string().unwrap(), "v");
    }

    #[test]
    fn with_kind_rejects_mismatched_shape() {
        let err = Entry::with_kind(Value::String("v".into()), Kind::List, None).unwrap_err();
        assert_eq!(
            err,
            StorageError::TypeMismatch {
                declared: "list",
                actual: "string",
            }
        );

        let err = Entry::with_kind(Value::empty(Kind::Set), Kind::Hash, None).unwrap_err();
        assert!(matches!(err, StorageError::TypeMismatch { .. }));
    }

    #[test]
    fn new_entry_kind_follows_value() {
        for kind in [Kind::String, Kind::List, Kind::Hash, Kind::Set] {
            let entry = Entry::new(Value::empty(kind), None);
            assert_eq!(entry.kind(), kind);
            assert!(Entry::with_kind(Value::empty(kind), kind, None).is_ok());
        }
    }

    #[test]
    fn accessors_do_not_coerce() {
        let mut entry = Entry::new(Value::empty(Kind::List), None);
        assert!(entry.as_list().is_ok());
        assert!(entry.as_list_mut().is_ok());
        assert_eq!(entry.as_string(), Err(StorageError::WrongType));
        assert_eq!(entry.as_hash(), Err(StorageError::WrongType));
        assert_eq!(entry.as_hash_mut().unwrap_err(), StorageError::WrongType);
    }

    #[test]
    fn set_kind_is_inert_but_recognized() {
        let entry = Entry::new(Value::empty(Kind::Set), None);
        assert_eq!(entry.kind(), Kind::Set);
        assert_eq!(entry.kind().as_str(), "set");
        assert!(entry.as_list().is_err());
    }

    #[test]
    fn no_expiry_never_expires() {
        let entry = Entry::new(Value::String("v".into()), None);
        let far = Instant::now() + Duration::from_secs(3600 * 24 * 365);
        assert!(!entry.is_expired_at(far));
        assert_eq!(entry.ttl_at(far), None);
    }

    #[test]
    fn expiry_is_strict() {
        let t = Instant::now();
        let entry = Entry::new(Value::String("v".into()), Some(t));
        // no exato instante ainda não expirou
        assert!(!entry.is_expired_at(t));
        assert!(entry.is_expired_at(t + Duration::from_nanos(1)));
    }

    #[test]
    fn ttl_saturates_at_zero() {
        let now = Instant::now();
        let entry = Entry::new(Value::String("v".into()), Some(now + Duration::from_secs(5)));
        assert_eq!(entry.ttl_at(now), Some(Duration::from_secs(5)));
        assert_eq!(
            entry.ttl_at(now + Duration::from_secs(10)),
            Some(Duration::ZERO)
        );
    }
}
