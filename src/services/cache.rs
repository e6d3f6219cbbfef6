use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::Value;

/// Cache em processo para leituras de dashboard/listagens, chaveado por
/// (operacao, id da entidade) com TTL explicito. Escritas que mudam o
/// resultado chamam `invalidar_entidade`.
#[derive(Clone)]
pub struct TtlCache {
    ttl: Duration,
    inner: Arc<Mutex<HashMap<(&'static str, i64), Entrada>>>,
}

struct Entrada {
    expira_em: Instant,
    valor: Value,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            ttl,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, operacao: &'static str, id: i64) -> Option<Value> {
        let mut mapa = self.inner.lock().unwrap();
        match mapa.get(&(operacao, id)) {
            Some(entrada) if entrada.expira_em > Instant::now() => Some(entrada.valor.clone()),
            Some(_) => {
                mapa.remove(&(operacao, id));
                None
            }
            None => None,
        }
    }

    pub fn put(&self, operacao: &'static str, id: i64, valor: Value) {
        let mut mapa = self.inner.lock().unwrap();
        mapa.insert(
            (operacao, id),
            Entrada {
                expira_em: Instant::now() + self.ttl,
                valor,
            },
        );
    }

    /// Remove todas as operacoes cacheadas para uma entidade.
    pub fn invalidar_entidade(&self, id: i64) {
        let mut mapa = self.inner.lock().unwrap();
        mapa.retain(|(_, chave_id), _| *chave_id != id);
    }
}
