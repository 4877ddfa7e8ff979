use std::error::Error as StdError;
use std::fs;
use std::path::Path;

const MAX_FILE_CHARS: usize = 2000;
const SUPPORTED_EXTENSIONS: [&str; 8] = [
    ".txt", ".md", ".py", ".js", ".html", ".css", ".json", ".xml",
];

/// Read a text-like file, truncated to the first 2000 characters. Every
/// failure is reported in-band as the returned text; the caller always has
/// something to hand to the model.
pub fn read_file(path: &str) -> String {
    let file_path = Path::new(path);
    if !file_path.exists() {
        return format!("File not found: {}", path);
    }

    let ext = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return format!(
            "Cannot read file type: {}. Supported types: {}",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    // The whole file is loaded before truncation; there is no size check
    // up front.
    match fs::read_to_string(file_path) {
        Ok(content) => {
            let truncated: String = content.chars().take(MAX_FILE_CHARS).collect();
            let ellipsis = if content.chars().count() > MAX_FILE_CHARS { "..." } else { "" };
            format!("File content ({}):\n{}{}", path, truncated, ellipsis)
        }
        Err(e) => format!("Error reading file: {}", e),
    }
}

/// Top-level regular files in `dir`, hidden (dot-prefixed) entries and
/// directories excluded. Sorted so the listing is stable.
pub fn list_files(dir: &Path) -> Result<Vec<String>, Box<dyn StdError + Send + Sync>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("failed to write test file");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn missing_file_is_reported_in_band() {
        let text = read_file("no/such/file.txt");
        assert_eq!(text, "File not found: no/such/file.txt");
    }

    #[test]
    fn unsupported_extension_is_rejected_without_reading() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "binary.exe", "not really a binary");

        let text = read_file(&path);
        assert!(text.starts_with("Cannot read file type: .exe"));
        assert!(text.contains(".txt"));
        assert!(!text.contains("not really a binary"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "NOTES.TXT", "shouting");

        let text = read_file(&path);
        assert!(text.contains("shouting"));
    }

    #[test]
    fn long_file_is_truncated_with_ellipsis() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.txt", &"a".repeat(2500));

        let text = read_file(&path);
        let body = text.split_once('\n').unwrap().1;
        assert_eq!(body.len(), 2000 + 3);
        assert!(body.ends_with("..."));
    }

    #[test]
    fn file_of_exactly_the_limit_is_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "exact.txt", &"b".repeat(2000));

        let text = read_file(&path);
        let body = text.split_once('\n').unwrap().1;
        assert_eq!(body.len(), 2000);
        assert!(!body.ends_with("..."));
    }

    #[test]
    fn listing_excludes_hidden_entries_and_directories() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "notes.txt", "n");
        write_file(&dir, "script.py", "s");
        write_file(&dir, ".hidden", "h");
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["notes.txt".to_string(), "script.py".to_string()]);
    }
}
