//! Local SQLite log of chat prompts and replies.
//!
//! Writes are best-effort from the chat routes; nothing in the aggregation
//! flows reads this table back.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    role TEXT,
    content TEXT,
    ts DATETIME DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Clone)]
pub struct MessageLog {
    conn: Arc<Mutex<Connection>>,
}

impl MessageLog {
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn save_message(&self, role: &str, content: &str) -> Result<(), rusqlite::Error> {
        self.lock().execute(
            "INSERT INTO messages (role, content) VALUES (?1, ?2)",
            params![role, content],
        )?;
        Ok(())
    }

    /// Most recent messages, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<(String, String)>, rusqlite::Error> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT role, content FROM messages ORDER BY id DESC LIMIT ?1")?;
        let rows = stmt.query_map(params![limit], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect()
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_read_back() {
        let log = MessageLog::open_in_memory().expect("in-memory db");
        log.save_message("user", "3 days in Lisbon").unwrap();
        log.save_message("assistant", "{\"stops\":[]}").unwrap();

        let recent = log.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].0, "assistant");
        assert_eq!(recent[1], ("user".to_string(), "3 days in Lisbon".to_string()));
    }
}
