use homeservices::access::AccessDecisionEngine;
use homeservices::orders::{OrderId, OrderRecord, OrderRepository, RepositoryError};
use homeservices::status::StatusRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) registry: StatusRegistry,
    pub(crate) engine: Arc<AccessDecisionEngine>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrderRepository {
    records: Arc<Mutex<HashMap<OrderId, OrderRecord>>>,
}

impl InMemoryOrderRepository {
    fn records(&self) -> Result<MutexGuard<'_, HashMap<OrderId, OrderRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order store mutex poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update_if_unchanged(
        &self,
        expected: &OrderRecord,
        record: OrderRecord,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        match guard.get_mut(&record.id) {
            Some(stored) if stored == expected => {
                *stored = record;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
        Ok(self.records()?.get(id).cloned())
    }
}
