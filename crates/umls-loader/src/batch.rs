//! Batched write transactions.

use rusqlite::Connection;

use crate::types::{LoaderConfig, UmlsError, UmlsResult};

/// Groups consecutive writes into fixed-size transactions.
///
/// A transaction is open from [`BatchWriter::begin`] until
/// [`BatchWriter::finish`]. Every `batch_size` recorded writes it is
/// committed and a new one opened. Dropping an unfinished writer rolls the
/// open transaction back, so an error mid-batch leaves nothing half-written
/// in that batch.
pub struct BatchWriter<'a> {
    conn: &'a Connection,
    config: &'a LoaderConfig,
    pending: usize,
    commits: usize,
    open: bool,
}

impl<'a> BatchWriter<'a> {
    /// Opens the first transaction.
    pub fn begin(conn: &'a Connection, config: &'a LoaderConfig) -> UmlsResult<Self> {
        conn.execute_batch("BEGIN")?;
        Ok(Self {
            conn,
            config,
            pending: 0,
            commits: 0,
            open: true,
        })
    }

    /// Counts one write, committing when the batch is full.
    ///
    /// Returns [`UmlsError::Cancelled`] if the cancel flag is set when the
    /// batch commits.
    pub fn record(&mut self) -> UmlsResult<()> {
        self.pending += 1;
        if self.pending >= self.config.batch_size.max(1) {
            self.commit()?;
            if self.config.is_cancelled() {
                return Err(UmlsError::Cancelled);
            }
            self.conn.execute_batch("BEGIN")?;
            self.open = true;
        }
        Ok(())
    }

    /// Commits the final, possibly partial, batch.
    ///
    /// Returns the number of commits made.
    pub fn finish(mut self) -> UmlsResult<usize> {
        self.commit()?;
        Ok(self.commits)
    }

    fn commit(&mut self) -> UmlsResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.open = false;
        self.pending = 0;
        self.commits += 1;
        Ok(())
    }
}

impl Drop for BatchWriter<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!("Rollback of unfinished batch failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn make_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER)").unwrap();
        conn
    }

    fn insert(conn: &Connection, v: i64) {
        conn.execute("INSERT INTO t (v) VALUES (?1)", [v]).unwrap();
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn test_commits_every_batch_and_tail() {
        let conn = make_conn();
        let config = LoaderConfig {
            batch_size: 2,
            ..Default::default()
        };

        let mut batch = BatchWriter::begin(&conn, &config).unwrap();
        for v in 0..5 {
            insert(&conn, v);
            batch.record().unwrap();
        }
        assert_eq!(batch.finish().unwrap(), 3);

        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 5);
    }

    #[test]
    fn test_drop_rolls_back_open_batch() {
        let conn = make_conn();
        let config = LoaderConfig {
            batch_size: 3,
            ..Default::default()
        };

        {
            let mut batch = BatchWriter::begin(&conn, &config).unwrap();
            for v in 0..4 {
                insert(&conn, v);
                batch.record().unwrap();
            }
        }

        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 3);
    }

    #[test]
    fn test_cancel_stops_after_commit() {
        let conn = make_conn();
        let flag = Arc::new(AtomicBool::new(true));
        let config = LoaderConfig {
            batch_size: 2,
            cancel: Some(flag),
            ..Default::default()
        };

        let mut batch = BatchWriter::begin(&conn, &config).unwrap();
        insert(&conn, 1);
        batch.record().unwrap();
        insert(&conn, 2);
        let err = batch.record().unwrap_err();
        assert!(matches!(err, UmlsError::Cancelled));
        drop(batch);

        assert!(conn.is_autocommit());
        assert_eq!(count(&conn), 2);
    }
}
