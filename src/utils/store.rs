#![forbid(unsafe_code)]

use std::sync::RwLock;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Records every store starts out with.
const SEED_RECORDS: [(&str, &str); 2] = [("20240001", "A"), ("20240002", "B")];

// ***************************************************************************
//                              Record Struct
// ***************************************************************************
// ---------------------------------------------------------------------------
// StudentRecord:
// ---------------------------------------------------------------------------
/** A single registry entry.  The student_id is the lookup key; uniqueness is
 * assumed by convention and not enforced by the store.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_id: String,
    pub student_name: String,
}

impl StudentRecord {
    pub fn new(student_id: &str, student_name: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
        }
    }
}

// ***************************************************************************
//                               Store Struct
// ***************************************************************************
// ---------------------------------------------------------------------------
// StudentStore:
// ---------------------------------------------------------------------------
/** The in-memory student registry.  The record sequence keeps its insertion
 * order and is guarded by a read/write lock since poem dispatches handlers
 * concurrently.  Handlers receive the store by injection rather than through
 * process-wide state, which also keeps tests isolated.
 *
 * State is not persisted; a restart reconstructs the seed records.
 */
#[derive(Debug, Default)]
pub struct StudentStore {
    records: RwLock<Vec<StudentRecord>>,
}

impl StudentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { records: RwLock::new(Vec::new()) }
    }

    /// Create a store pre-populated with the fixed seed records.
    pub fn seeded() -> Self {
        let records = SEED_RECORDS
            .iter()
            .map(|(id, name)| StudentRecord::new(id, name))
            .collect();
        Self { records: RwLock::new(records) }
    }

    // -----------------------------------------------------------------------
    // get:
    // -----------------------------------------------------------------------
    /** Scan the sequence in order and return a copy of the first record whose
     * student_id matches, or None when no record matches.
     */
    pub fn get(&self, student_id: &str) -> Option<StudentRecord> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.iter().find(|r| r.student_id == student_id).cloned()
    }

    // -----------------------------------------------------------------------
    // delete:
    // -----------------------------------------------------------------------
    /** Remove the first record whose student_id matches and return the number
     * of records removed (0 or 1).  A miss leaves the sequence unchanged.
     */
    pub fn delete(&self, student_id: &str) -> u64 {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        match records.iter().position(|r| r.student_id == student_id) {
            Some(ix) => {
                records.remove(ix);
                1
            }
            None => 0,
        }
    }

    // -----------------------------------------------------------------------
    // len:
    // -----------------------------------------------------------------------
    /// Current number of records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_returns_first_record() {
        let store = StudentStore::seeded();
        let rec = store.get("20240001").expect("seed record missing");
        assert_eq!(rec, StudentRecord::new("20240001", "A"));
    }

    #[test]
    fn get_miss_returns_none() {
        let store = StudentStore::seeded();
        assert!(store.get("99999999").is_none());
    }

    #[test]
    fn delete_removes_only_the_matching_record() {
        let store = StudentStore::seeded();
        assert_eq!(store.delete("20240001"), 1);
        assert!(store.get("20240001").is_none());

        // The other record survives.
        let rec = store.get("20240002").expect("unrelated record was removed");
        assert_eq!(rec.student_name, "B");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_miss_leaves_store_unchanged() {
        let store = StudentStore::seeded();
        assert_eq!(store.delete("99999999"), 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("20240001").unwrap().student_name, "A");
        assert_eq!(store.get("20240002").unwrap().student_name, "B");
    }

    #[test]
    fn duplicate_ids_delete_first_match_only() {
        // Uniqueness is assumed, not enforced; a duplicate id is tolerated
        // and delete takes the earliest entry.
        let store = StudentStore::new();
        {
            let mut records = store.records.write().unwrap();
            records.push(StudentRecord::new("20240009", "X"));
            records.push(StudentRecord::new("20240009", "Y"));
        }
        assert_eq!(store.delete("20240009"), 1);
        assert_eq!(store.get("20240009").unwrap().student_name, "Y");
    }

    #[test]
    fn empty_store_reports_empty() {
        let store = StudentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.delete("20240001"), 0);
    }
}
