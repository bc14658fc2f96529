use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::one::{Ref, RefMut};
use tracing::debug;

use ferrokv_common::StorageError;

use crate::entry::{Entry, Kind, Value};

/// Maior TTL aceito; valores acima são reduzidos a este (~100 anos).
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Configuração do store.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    /// Se `true`, INCR mantém a expiração da chave. O padrão descarta o TTL,
    /// como um SET sem EX.
    pub preserve_ttl_on_incr: bool,
}

/// Estado compartilhado entre todos os handles.
struct SharedState {
    data: DashMap<String, Entry>,
    config: DbConfig,
}

/// Handle para o banco de dados in-memory.
///
/// Cada operação é atômica em relação à sua chave (lock do shard do
/// `DashMap`); operações com várias chaves não são transacionais.
/// A expiração é preguiçosa: uma chave expirada só é removida quando
/// alguma operação a toca.
#[derive(Clone)]
pub struct Db {
    shared: Arc<SharedState>,
}

impl Db {
    pub fn new() -> Self {
        Self::with_config(DbConfig::default())
    }

    pub fn with_config(config: DbConfig) -> Self {
        Db {
            shared: Arc::new(SharedState {
                data: DashMap::new(),
                config,
            }),
        }
    }

    /// Número de entradas fisicamente armazenadas, incluindo expiradas
    /// que ainda não foram tocadas.
    pub fn len(&self) -> usize {
        self.shared.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.data.is_empty()
    }

    pub fn key_type(&self, key: &str) -> Option<Kind> {
        self.live(key).map(|entry| entry.kind())
    }

    // --- String operations ---

    pub fn set(&self, key: String, value: String, ttl: Option<Duration>) {
        let expires_at = ttl.and_then(|d| Instant::now().checked_add(d.min(MAX_TTL)));
        let entry = Entry::new(Value::String(value), expires_at);

        if let Some(previous) = self.shared.data.insert(key, entry)
            && previous.kind() != Kind::String
        {
            debug!("SET sobrescreveu valor do tipo {}", previous.kind());
        }
    }

    /// Leitura permissiva: chave de outro tipo é tratada como ausente.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.live(key)?;
        entry.as_string().ok().map(str::to_owned)
    }

    pub fn del(&self, keys: &[String]) -> usize {
        let mut count = 0;
        for key in keys {
            if self.shared.data.remove(key).is_some() {
                count += 1;
            }
        }
        count
    }

    pub fn exists(&self, key: &str) -> bool {
        self.live(key).is_some()
    }

    /// Segundos restantes (truncados); -1 sem expiração, -2 ausente ou expirada.
    pub fn ttl(&self, key: &str) -> i64 {
        let Some(entry) = self.live(key) else {
            return -2;
        };
        match entry.ttl_at(Instant::now()) {
            None => -1,
            Some(remaining) if remaining.is_zero() => -2,
            Some(remaining) => i64::try_from(remaining.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn incr(&self, key: &str) -> Result<i64, StorageError> {
        // Usar entry API do DashMap para atomicidade
        let mut entry = self
            .shared
            .data
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::String("0".into()), None));

        if entry.is_expired() {
            debug!("chave expirada reiniciada por INCR: {key}");
            *entry = Entry::new(Value::String("0".into()), None);
        }

        let current = parse_integer(entry.as_string()?)?;
        let next = current.checked_add(1).ok_or(StorageError::NotAnInteger)?;
        let expires_at = if self.shared.config.preserve_ttl_on_incr {
            entry.expires_at()
        } else {
            None
        };
        *entry = Entry::new(Value::String(next.to_string()), expires_at);
        Ok(next)
    }

    // --- List operations ---

    /// Insere na cabeça, um valor por vez: o último argumento fica à esquerda.
    pub fn lpush(&self, key: &str, values: &[String]) -> Result<usize, StorageError> {
        let mut entry = self.get_or_create_list(key)?;
        let list = entry.as_list_mut()?;
        for v in values {
            list.push_front(v.clone());
        }
        Ok(list.len())
    }

    pub fn rpush(&self, key: &str, values: &[String]) -> Result<usize, StorageError> {
        let mut entry = self.get_or_create_list(key)?;
        let list = entry.as_list_mut()?;
        list.extend(values.iter().cloned());
        Ok(list.len())
    }

    pub fn lpop(&self, key: &str) -> Option<String> {
        self.list_pop(key, true)
    }

    pub fn rpop(&self, key: &str) -> Option<String> {
        self.list_pop(key, false)
    }

    fn list_pop(&self, key: &str, from_left: bool) -> Option<String> {
        let mut entry = self.live_mut(key)?;
        let list = entry.as_list_mut().ok()?;
        // Lista vazia continua armazenada sob a chave
        if from_left {
            list.pop_front()
        } else {
            list.pop_back()
        }
    }

    pub fn llen(&self, key: &str) -> usize {
        self.live(key)
            .and_then(|entry| entry.as_list().map(|list| list.len()).ok())
            .unwrap_or(0)
    }

    /// Faixa inclusiva com índices estilo Redis. `None` apenas se a chave não
    /// existe ou não é lista; faixa vazia ou invertida retorna `Some(vec![])`.
    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Option<Vec<String>> {
        let entry = self.live(key)?;
        let list = entry.as_list().ok()?;
        let items = match normalize_range(list.len(), start, stop) {
            Some(range) => list.range(range).cloned().collect(),
            None => Vec::new(),
        };
        Some(items)
    }

    // --- Hash operations ---

    /// Retorna 1 se o campo foi criado, 0 se foi sobrescrito.
    pub fn hset(&self, key: &str, field: String, value: String) -> Result<usize, StorageError> {
        let mut entry = self.get_or_create_hash(key)?;
        let hash = entry.as_hash_mut()?;
        Ok(usize::from(hash.insert(field, value).is_none()))
    }

    /// Aplica os pares em ordem; retorna quantos campos foram criados.
    pub fn hset_multiple(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<usize, StorageError> {
        let mut entry = self.get_or_create_hash(key)?;
        let hash = entry.as_hash_mut()?;
        let mut created = 0;
        for (field, value) in fields {
            if hash.insert(field.clone(), value.clone()).is_none() {
                created += 1;
            }
        }
        Ok(created)
    }

    pub fn hget(&self, key: &str, field: &str) -> Option<String> {
        let entry = self.live(key)?;
        entry.as_hash().ok()?.get(field).cloned()
    }

    /// Cópia independente de todos os campos.
    pub fn hgetall(&self, key: &str) -> Option<HashMap<String, String>> {
        let entry = self.live(key)?;
        entry.as_hash().ok().cloned()
    }

    pub fn hdel(&self, key: &str, fields: &[String]) -> usize {
        let Some(mut entry) = self.live_mut(key) else {
            return 0;
        };
        let Ok(hash) = entry.as_hash_mut() else {
            return 0;
        };
        fields
            .iter()
            .filter(|field| hash.remove(field.as_str()).is_some())
            .count()
    }

    pub fn hexists(&self, key: &str, field: &str) -> bool {
        self.live(key)
            .map(|entry| entry.as_hash().is_ok_and(|hash| hash.contains_key(field)))
            .unwrap_or(false)
    }

    pub fn hlen(&self, key: &str) -> usize {
        self.live(key)
            .and_then(|entry| entry.as_hash().map(|hash| hash.len()).ok())
            .unwrap_or(0)
    }

    // --- Helpers ---

    /// Entrada não expirada de `key`; remove a chave se já expirou.
    fn live(&self, key: &str) -> Option<Ref<'_, String, Entry>> {
        let entry = self.shared.data.get(key)?;
        if entry.is_expired() {
            drop(entry);
            self.remove_expired(key);
            return None;
        }
        Some(entry)
    }

    fn live_mut(&self, key: &str) -> Option<RefMut<'_, String, Entry>> {
        let entry = self.shared.data.get_mut(key)?;
        if entry.is_expired() {
            drop(entry);
            self.remove_expired(key);
            return None;
        }
        Some(entry)
    }

    fn remove_expired(&self, key: &str) {
        // Só remove se ainda estiver expirada (pode ter sido re-setada)
        if self
            .shared
            .data
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some()
        {
            debug!("chave expirada removida: {key}");
        }
    }

    /// Entrada do tipo `kind` sob `key`, criando uma vazia (sem expiração)
    /// se a chave não existe ou expirou. Outro tipo é erro.
    fn get_or_create(&self, key: &str, kind: Kind) -> Result<RefMut<'_, String, Entry>, StorageError> {
        let mut entry = self
            .shared
            .data
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::empty(kind), None));

        if entry.is_expired() {
            debug!("chave expirada substituída por {kind} vazio: {key}");
            *entry = Entry::new(Value::empty(kind), None);
        }

        if entry.kind() != kind {
            return Err(StorageError::WrongType);
        }
        Ok(entry)
    }

    fn get_or_create_list(&self, key: &str) -> Result<RefMut<'_, String, Entry>, StorageError> {
        self.get_or_create(key, Kind::List)
    }

    fn get_or_create_hash(&self, key: &str) -> Result<RefMut<'_, String, Entry>, StorageError> {
        self.get_or_create(key, Kind::Hash)
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_integer(s: &str) -> Result<i64, StorageError> {
    s.parse::<i64>().map_err(|_| StorageError::NotAnInteger)
}

/// Normaliza índices negativos (estilo Redis) e limita a `[0, len-1]`.
fn normalize_range(len: usize, start: i64, stop: i64) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let start = if start < 0 { len + start } else { start }.max(0);
    let stop = if stop < 0 { len + stop } else { stop }.min(len - 1);
    if start > stop {
        return None;
    }
    Some(start as usize..=stop as usize)
}
