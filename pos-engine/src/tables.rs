//! Table service
//!
//! CRUD over the floor plan plus status management. Occupancy driven by
//! orders lives in the order service; this service only handles explicit
//! edits (reserve, cleaning, manual release).

use crate::repository::Repository;
use crate::storage::CollectionStore;
use shared::error::AppResult;
use shared::models::{Position, Table, TableCreate, TableStatus, TableUpdate};
use shared::util::entity_id;
use validator::Validate;

#[derive(Clone)]
pub struct TableService {
    repo: Repository<Table>,
}

impl TableService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    pub fn list(&self) -> AppResult<Vec<Table>> {
        self.repo.list()
    }

    pub fn get(&self, id: &str) -> AppResult<Table> {
        self.repo.get_required(id)
    }

    /// Tables currently free for a new order
    pub fn available(&self) -> AppResult<Vec<Table>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.status == TableStatus::Available)
            .collect())
    }

    pub fn create(&self, payload: TableCreate) -> AppResult<Table> {
        payload.validate()?;
        let table = Table {
            id: entity_id(),
            name: payload.name,
            capacity: payload.capacity,
            status: TableStatus::Available,
            position: payload.position.unwrap_or(Position::default()),
            current_order: None,
        };
        tracing::info!(table_id = %table.id, name = %table.name, "table created");
        self.repo.insert(table)
    }

    pub fn update(&self, id: &str, payload: TableUpdate) -> AppResult<Table> {
        payload.validate()?;
        let mut table = self.repo.get_required(id)?;
        if let Some(name) = payload.name {
            table.name = name;
        }
        if let Some(capacity) = payload.capacity {
            table.capacity = capacity;
        }
        if let Some(status) = payload.status {
            table.status = status;
        }
        if let Some(position) = payload.position {
            table.position = position;
        }
        self.repo.update(table)
    }

    pub fn set_status(&self, id: &str, status: TableStatus) -> AppResult<Table> {
        let mut table = self.repo.get_required(id)?;
        table.status = status;
        if status == TableStatus::Available {
            table.current_order = None;
        }
        self.repo.update(table)
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.repo.get_required(id)?;
        self.repo.remove(id)?;
        tracing::info!(table_id = %id, "table deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    fn service() -> TableService {
        TableService::new(CollectionStore::open_in_memory().unwrap())
    }

    fn create(svc: &TableService, name: &str) -> Table {
        svc.create(TableCreate {
            name: name.to_string(),
            capacity: 4,
            position: None,
        })
        .unwrap()
    }

    #[test]
    fn test_create_defaults_to_available() {
        let svc = service();
        let table = create(&svc, "Meja 1");
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.current_order.is_none());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let svc = service();
        let err = svc
            .create(TableCreate {
                name: "Meja 1".to_string(),
                capacity: 0,
                position: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(svc.list().unwrap().is_empty());
    }

    #[test]
    fn test_available_excludes_other_statuses() {
        let svc = service();
        let t1 = create(&svc, "Meja 1");
        let t2 = create(&svc, "Meja 2");
        svc.set_status(&t2.id, TableStatus::Reserved).unwrap();

        let available = svc.available().unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, t1.id);
    }

    #[test]
    fn test_set_available_clears_back_reference() {
        let svc = service();
        let t = create(&svc, "Meja 1");
        let mut occupied = svc.get(&t.id).unwrap();
        occupied.status = TableStatus::Occupied;
        occupied.current_order = Some("order-1".to_string());
        svc.repo.update(occupied).unwrap();

        let released = svc.set_status(&t.id, TableStatus::Available).unwrap();
        assert!(released.current_order.is_none());
    }

    #[test]
    fn test_delete_removes_table() {
        let svc = service();
        let t = create(&svc, "Meja 1");
        svc.delete(&t.id).unwrap();
        assert_eq!(svc.get(&t.id).unwrap_err().code, ErrorCode::TableNotFound);
    }
}
