use std::{fs, path::Path};

use crate::{domain::UserList, errors::Error, Result};

/// Write a snapshot as a pretty-printed JSON array, fully overwriting any
/// prior file. Each run is a full resync; there is no incremental update.
pub fn save_list(path: &Path, list: &UserList) -> Result<()> {
    let json = serde_json::to_string_pretty(list)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a snapshot back. Any shape violation (not an array, missing `pk` or
/// `username`, non-numeric `pk`) fails with `MalformedInput` naming the file.
pub fn load_list(path: &Path) -> Result<UserList> {
    let contents = fs::read_to_string(path).map_err(|e| Error::MalformedInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| Error::MalformedInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::UserRecord;

    fn tmp(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    #[test]
    fn round_trips_a_snapshot() {
        let path = tmp("followgap-store");
        let mut rec = UserRecord::new(1, "alice");
        rec.extra
            .insert("full_name".into(), serde_json::json!("Alice A."));
        let list = vec![rec, UserRecord::new(2, "bob")];

        save_list(&path, &list).unwrap();
        let loaded = load_list(&path).unwrap();
        assert_eq!(loaded, list);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn overwrites_prior_snapshot() {
        let path = tmp("followgap-store");
        save_list(&path, &vec![UserRecord::new(1, "a"), UserRecord::new(2, "b")]).unwrap();
        save_list(&path, &vec![UserRecord::new(3, "c")]).unwrap();

        let loaded = load_list(&path).unwrap();
        assert_eq!(loaded, vec![UserRecord::new(3, "c")]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_pk_is_malformed_input() {
        let path = tmp("followgap-store");
        fs::write(&path, r#"[{"username": "ghost"}]"#).unwrap();

        let err = load_list(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn non_array_is_malformed_input() {
        let path = tmp("followgap-store");
        fs::write(&path, r#"{"pk": 1, "username": "x"}"#).unwrap();

        let err = load_list(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_malformed_input() {
        let err = load_list(&tmp("followgap-store-missing")).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }
}
