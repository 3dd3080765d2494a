//! SQLite-backed store for orders, templates, and generated content.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::schema::SCHEMA_SQL;
use crate::traits::{ContentStore, NewTemplate, OrderStore, TemplateStore};
use copyforge_core::{
    Error, GeneratedContent, NewGeneratedContent, Order, OrderPatch, PromptTemplate, Result,
};

/// SQLite store. One connection guarded by a mutex, WAL journal.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store. `db_dir` is the directory (e.g., `data/db/`);
    /// the file will be `db_dir/copyforge.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("copyforge.db");

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        info!("SqliteStore initialized: path={}", store.db_path.display());
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn row_to_order(row: &Row) -> rusqlite::Result<Order> {
        let options_json: Option<String> = row.get("service_options_json")?;
        let service_options: HashMap<String, String> = options_json
            .as_deref()
            .and_then(|j| serde_json::from_str(j).ok())
            .unwrap_or_default();
        let status: String = row.get("status")?;

        Ok(Order {
            id: row.get("id")?,
            service_type: row.get("service_type")?,
            details: row.get("details")?,
            service_options,
            additional_requirements: row.get("additional_requirements")?,
            contact_name: row.get("contact_name")?,
            contact: row.get("contact")?,
            status: status.parse().unwrap_or(copyforge_core::OrderStatus::Received),
            prompt: row.get("prompt")?,
            created_at: row.get("created_at")?,
            completed_at: row.get("completed_at")?,
        })
    }

    fn row_to_template(row: &Row) -> rusqlite::Result<PromptTemplate> {
        Ok(PromptTemplate {
            id: row.get("id")?,
            name: row.get("name")?,
            service_type: row.get("service_type")?,
            template: row.get("template")?,
            version: row.get("version")?,
            active: row.get::<_, i64>("active")? != 0,
        })
    }

    fn row_to_content(row: &Row) -> rusqlite::Result<GeneratedContent> {
        Ok(GeneratedContent {
            id: row.get("id")?,
            order_id: row.get("order_id")?,
            content: row.get("content")?,
            content_type: row.get("content_type")?,
            prompt_used: row.get("prompt_used")?,
            model_used: row.get("model_used")?,
            content_hash: row.get("content_hash")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl OrderStore for SqliteStore {
    fn get_order(&self, id: &str) -> Result<Option<Order>> {
        let conn = self.conn.lock();
        let result = conn
            .prepare_cached("SELECT * FROM orders WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], Self::row_to_order)
            .optional()
            .map_err(|e| Error::Database(e.to_string()));
        result
    }

    fn insert_order(&self, order: &Order) -> Result<()> {
        let options_json = if order.service_options.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&order.service_options)?)
        };
        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO orders (id, service_type, details, service_options_json,
                 additional_requirements, contact_name, contact, status, prompt,
                 created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            order.id,
            order.service_type,
            order.details,
            options_json,
            order.additional_requirements,
            order.contact_name,
            order.contact,
            order.status.to_string(),
            order.prompt,
            order.created_at,
            order.completed_at,
        ])
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    fn update_order(&self, id: &str, patch: &OrderPatch) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .prepare_cached(
                "UPDATE orders SET
                     status = COALESCE(?2, status),
                     prompt = COALESCE(?3, prompt),
                     completed_at = COALESCE(?4, completed_at)
                 WHERE id = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .execute(params![
                id,
                patch.status.map(|s| s.to_string()),
                patch.prompt,
                patch.completed_at,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }
}

impl TemplateStore for SqliteStore {
    fn active_template(&self, service_type: &str) -> Result<Option<PromptTemplate>> {
        let conn = self.conn.lock();
        let result = conn
            .prepare_cached(
                "SELECT * FROM prompt_templates
                 WHERE service_type = ?1 AND active = 1
                 ORDER BY version DESC LIMIT 1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![service_type], Self::row_to_template)
            .optional()
            .map_err(|e| Error::Database(e.to_string()));
        result
    }

    fn add_template(&self, template: NewTemplate) -> Result<i64> {
        let conn = self.conn.lock();
        if template.active {
            conn.prepare_cached(
                "UPDATE prompt_templates SET active = 0 WHERE service_type = ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .execute(params![template.service_type])
            .map_err(|e| Error::Database(e.to_string()))?;
        }
        let id = conn
            .prepare_cached(
                "INSERT INTO prompt_templates (name, service_type, template, version, active)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                template.name,
                template.service_type,
                template.template,
                template.version,
                template.active as i64,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    fn list_templates(&self) -> Result<Vec<PromptTemplate>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM prompt_templates ORDER BY service_type, version")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], Self::row_to_template)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }
}

impl ContentStore for SqliteStore {
    fn add_content(&self, content: &NewGeneratedContent) -> Result<i64> {
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO generated_content (order_id, content, content_type,
                     prompt_used, model_used, content_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                content.order_id,
                content.content,
                content.content_type,
                content.prompt_used,
                content.model_used,
                content.content_hash,
                now,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    fn contents_for_order(&self, order_id: &str) -> Result<Vec<GeneratedContent>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM generated_content WHERE order_id = ?1 ORDER BY created_at",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![order_id], Self::row_to_content)
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyforge_core::OrderStatus;

    fn test_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn test_order_roundtrip() {
        let (store, _dir) = test_store();
        let mut order = Order::new("seo-article", "статья про кофеварки", "Анна", "anna@x.ru");
        order
            .service_options
            .insert("length".into(), "2000".into());
        store.insert_order(&order).unwrap();

        let loaded = store.get_order(&order.id).unwrap().unwrap();
        assert_eq!(loaded.details, "статья про кофеварки");
        assert_eq!(loaded.status, OrderStatus::Received);
        assert_eq!(loaded.service_options.get("length").unwrap(), "2000");
    }

    #[test]
    fn test_order_update_patch() {
        let (store, _dir) = test_store();
        let order = Order::new("landing", "лендинг", "Иван", "ivan@x.ru");
        store.insert_order(&order).unwrap();

        let updated = store
            .update_order(
                &order.id,
                &OrderPatch {
                    status: Some(OrderStatus::Processing),
                    prompt: Some("готовый промпт".into()),
                    completed_at: None,
                },
            )
            .unwrap();
        assert!(updated);

        let loaded = store.get_order(&order.id).unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Processing);
        assert_eq!(loaded.prompt.as_deref(), Some("готовый промпт"));
        // Untouched fields stay intact
        assert_eq!(loaded.details, "лендинг");
    }

    #[test]
    fn test_update_missing_order() {
        let (store, _dir) = test_store();
        let updated = store
            .update_order("no-such-id", &OrderPatch::default())
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_active_template_lookup() {
        let (store, _dir) = test_store();
        assert!(store.active_template("seo-article").unwrap().is_none());

        store
            .add_template(NewTemplate {
                name: "SEO v1".into(),
                service_type: "seo-article".into(),
                template: "Напиши {{details}}".into(),
                version: 1,
                active: true,
            })
            .unwrap();

        let tpl = store.active_template("seo-article").unwrap().unwrap();
        assert_eq!(tpl.name, "SEO v1");
        assert!(tpl.active);
    }

    #[test]
    fn test_add_active_template_deactivates_previous() {
        let (store, _dir) = test_store();
        for version in 1..=2 {
            store
                .add_template(NewTemplate {
                    name: format!("v{}", version),
                    service_type: "seo-article".into(),
                    template: "{{details}}".into(),
                    version,
                    active: true,
                })
                .unwrap();
        }

        let active: Vec<_> = store
            .list_templates()
            .unwrap()
            .into_iter()
            .filter(|t| t.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].version, 2);
    }

    #[test]
    fn test_content_append_only() {
        let (store, _dir) = test_store();
        let order = Order::new("seo-article", "текст", "Анна", "anna@x.ru");
        store.insert_order(&order).unwrap();

        for n in 1..=2 {
            store
                .add_content(&NewGeneratedContent {
                    order_id: order.id.clone(),
                    content: format!("вариант {}", n),
                    content_type: "seo-article".into(),
                    prompt_used: "промпт".into(),
                    model_used: "text-generation-default".into(),
                    content_hash: format!("hash{}", n),
                })
                .unwrap();
        }

        // Regeneration appends, never overwrites
        let contents = store.contents_for_order(&order.id).unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0].content, "вариант 1");
        assert_eq!(contents[1].content, "вариант 2");
    }
}
