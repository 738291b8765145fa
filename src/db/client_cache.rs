// src/db/client_cache.rs

// Cache explícito de clientes (nome de exibição + fator de correção).
// Pertence ao AppState e é injetado no serviço; invalidação é sempre explícita.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::client_repo::ClientRepository,
    models::{
        billing::{ClientInfo, RawBillingLine},
        finance::ClientCode,
    },
};

// --- Parte síncrona (sem banco), fácil de testar ---
#[derive(Debug, Default)]
pub struct ClientCache {
    entries: HashMap<ClientCode, ClientInfo>,
}

impl ClientCache {
    pub fn get(&self, code: &ClientCode) -> Option<&ClientInfo> {
        self.entries.get(code)
    }

    /// Códigos ainda não carregados, sem repetição e na ordem em que aparecem.
    pub fn missing<'a, I>(&self, codes: I) -> Vec<ClientCode>
    where
        I: IntoIterator<Item = &'a ClientCode>,
    {
        let mut seen = HashSet::new();
        codes
            .into_iter()
            .filter(|code| !self.entries.contains_key(*code))
            .filter(|code| seen.insert(*code))
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, code: ClientCode, info: ClientInfo) {
        self.entries.insert(code, info);
    }

    pub fn invalidate(&mut self, code: &ClientCode) -> bool {
        self.entries.remove(code).is_some()
    }

    pub fn invalidate_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Anexa nome e fator em cada linha. Devolve quantas linhas com código
    /// de cliente ficaram sem cadastro.
    pub fn attach(&self, lines: &mut [RawBillingLine]) -> usize {
        let mut unresolved = 0;
        for line in lines.iter_mut() {
            let Some(code) = line.client_code.as_ref() else {
                continue;
            };
            match self.get(code) {
                Some(info) => line.attach_client(info),
                None => unresolved += 1,
            }
        }
        unresolved
    }
}

// --- Diretório assíncrono: cache + repositório ---
#[derive(Clone)]
pub struct ClientDirectory {
    repo: ClientRepository,
    cache: Arc<RwLock<ClientCache>>,
}

impl ClientDirectory {
    pub fn new(repo: ClientRepository) -> Self {
        Self {
            repo,
            cache: Arc::new(RwLock::new(ClientCache::default())),
        }
    }

    /// Resolve os clientes das linhas (carregando do banco só o que falta)
    /// e anexa nome/fator em cada uma.
    pub async fn attach(&self, lines: &mut [RawBillingLine]) -> Result<(), AppError> {
        let missing = {
            let cache = self.cache.read().await;
            cache.missing(lines.iter().filter_map(|l| l.client_code.as_ref()))
        };

        if !missing.is_empty() {
            let records = self.repo.find_by_codes(&missing).await?;
            tracing::debug!(
                pedidos = missing.len(),
                encontrados = records.len(),
                "Clientes carregados para o cache"
            );

            let mut cache = self.cache.write().await;
            for record in &records {
                cache.insert(record.client_code.clone(), ClientInfo::from(record));
            }
        }

        let cache = self.cache.read().await;
        let unresolved = cache.attach(lines);
        tracing::debug!(clientes_em_cache = cache.len(), "Clientes anexados ao faturamento");
        if unresolved > 0 {
            tracing::warn!(linhas = unresolved, "Linhas de faturamento com cliente sem cadastro");
        }

        Ok(())
    }

    pub async fn invalidate(&self, code: &ClientCode) -> bool {
        self.cache.write().await.invalidate(code)
    }

    pub async fn invalidate_all(&self) -> usize {
        let removed = self.cache.write().await.invalidate_all();
        tracing::info!(removidos = removed, "Cache de clientes invalidado");
        removed
    }
}
