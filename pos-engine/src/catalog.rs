//! Catalog service
//!
//! Menu categories and menu items. Deleting a category cascades to every
//! menu item referencing it; there is no soft-delete.

use crate::repository::Repository;
use crate::storage::CollectionStore;
use shared::error::AppResult;
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::entity_id;
use validator::Validate;

#[derive(Clone)]
pub struct CatalogService {
    categories: Repository<MenuCategory>,
    items: Repository<MenuItem>,
}

impl CatalogService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            categories: Repository::new(store.clone()),
            items: Repository::new(store),
        }
    }

    // ==================== Categories ====================

    pub fn categories(&self) -> AppResult<Vec<MenuCategory>> {
        self.categories.list()
    }

    pub fn category(&self, id: &str) -> AppResult<Option<MenuCategory>> {
        self.categories.get(id)
    }

    pub fn create_category(&self, payload: MenuCategoryCreate) -> AppResult<MenuCategory> {
        payload.validate()?;
        let category = MenuCategory {
            id: entity_id(),
            name: payload.name,
            description: payload.description,
            is_active: true,
        };
        tracing::info!(category_id = %category.id, name = %category.name, "category created");
        self.categories.insert(category)
    }

    pub fn update_category(&self, id: &str, payload: MenuCategoryUpdate) -> AppResult<MenuCategory> {
        payload.validate()?;
        let mut category = self.categories.get_required(id)?;
        if let Some(name) = payload.name {
            category.name = name;
        }
        if let Some(description) = payload.description {
            category.description = Some(description);
        }
        if let Some(is_active) = payload.is_active {
            category.is_active = is_active;
        }
        self.categories.update(category)
    }

    /// Delete a category and cascade to every menu item referencing it
    pub fn delete_category(&self, id: &str) -> AppResult<()> {
        self.categories.get_required(id)?;
        self.categories.remove(id)?;

        let all = self.items.list()?;
        let before = all.len();
        let remaining: Vec<MenuItem> = all
            .into_iter()
            .filter(|item| item.category_id != id)
            .collect();
        let removed = before - remaining.len();
        self.items.replace_all(&remaining)?;

        tracing::info!(category_id = %id, cascaded_items = removed, "category deleted");
        Ok(())
    }

    // ==================== Menu items ====================

    pub fn menu_items(&self) -> AppResult<Vec<MenuItem>> {
        self.items.list()
    }

    pub fn menu_item(&self, id: &str) -> AppResult<Option<MenuItem>> {
        self.items.get(id)
    }

    pub fn menu_item_required(&self, id: &str) -> AppResult<MenuItem> {
        self.items.get_required(id)
    }

    /// Active items for order entry, optionally restricted to one category
    pub fn active_items(&self, category_id: Option<&str>) -> AppResult<Vec<MenuItem>> {
        Ok(self
            .items
            .list()?
            .into_iter()
            .filter(|item| item.is_active)
            .filter(|item| category_id.is_none_or(|c| item.category_id == c))
            .collect())
    }

    pub fn create_item(&self, payload: MenuItemCreate) -> AppResult<MenuItem> {
        payload.validate()?;
        // the category reference must resolve at creation time
        self.categories.get_required(&payload.category_id)?;
        let item = MenuItem {
            id: entity_id(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category_id: payload.category_id,
            image: payload.image,
            is_active: true,
            stock: None,
            is_stock_managed: payload.is_stock_managed.unwrap_or(false),
        };
        tracing::info!(item_id = %item.id, name = %item.name, price = item.price, "menu item created");
        self.items.insert(item)
    }

    pub fn update_item(&self, id: &str, payload: MenuItemUpdate) -> AppResult<MenuItem> {
        payload.validate()?;
        let mut item = self.items.get_required(id)?;
        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = Some(description);
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(category_id) = payload.category_id {
            self.categories.get_required(&category_id)?;
            item.category_id = category_id;
        }
        if let Some(image) = payload.image {
            item.image = Some(image);
        }
        if let Some(is_active) = payload.is_active {
            item.is_active = is_active;
        }
        if let Some(is_stock_managed) = payload.is_stock_managed {
            item.is_stock_managed = is_stock_managed;
        }
        self.items.update(item)
    }

    pub fn delete_item(&self, id: &str) -> AppResult<()> {
        self.items.get_required(id)?;
        self.items.remove(id)?;
        tracing::info!(item_id = %id, "menu item deleted");
        Ok(())
    }
}
