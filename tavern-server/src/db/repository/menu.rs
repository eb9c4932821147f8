//! Menu Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Menu, MenuCreate, MenuUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu";

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menus
    pub async fn find_all(&self) -> RepoResult<Vec<Menu>> {
        let menus: Vec<Menu> = self
            .base
            .db()
            .query("SELECT * FROM menu ORDER BY name")
            .await?
            .take(0)?;
        Ok(menus)
    }

    /// Find menu by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Menu>> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let menu: Option<Menu> = self.base.db().select(thing).await?;
        Ok(menu)
    }

    /// Find menu by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Menu>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let menus: Vec<Menu> = result.take(0)?;
        Ok(menus.into_iter().next())
    }

    /// Create a new menu
    pub async fn create(&self, data: MenuCreate) -> RepoResult<Menu> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Menu '{}' already exists",
                data.name
            )));
        }

        let menu = Menu {
            id: None,
            name: data.name,
        };

        let created: Option<Menu> = self.base.db().create(TABLE).content(menu).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu".to_string()))
    }

    /// Update a menu
    pub async fn update(&self, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu {} not found", id)))?;

        if let Some(ref name) = data.name
            && let Some(found) = self.find_by_name(name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Menu '{}' already exists",
                name
            )));
        }

        let name = data.name.unwrap_or(existing.name);

        self.base
            .db()
            .query("UPDATE $thing SET name = $name")
            .bind(("thing", thing))
            .bind(("name", name))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu {} not found", id)))
    }

    /// Hard delete a menu together with its items
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        self.base
            .db()
            .query("DELETE menu_item WHERE menu = $menu; DELETE $menu;")
            .bind(("menu", thing))
            .await?;
        Ok(true)
    }

    /// RecordId helper for cross-repo queries
    pub fn record_id(id: &str) -> RepoResult<RecordId> {
        BaseRepository::parse_id(id, TABLE)
    }
}
